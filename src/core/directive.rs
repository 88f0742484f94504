use std::sync::LazyLock;

use regex::Regex;

use crate::host::ElementKind;

/// `(path) {Type} field description`, every part but the type optional.
static DIRECTIVE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\((.+?)\))?\s*\{(.+?)\}\s*(?:(\S*))?\s*(?:(.+))?").unwrap());

/// Destructured content of one interface directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDirective {
    pub kind: ElementKind,
    /// Path of the declaring file, relative to the file holding the directive.
    pub file_path_override: Option<String>,
    /// Raw type target, e.g. `Ns.Item[]`.
    pub type_reference: String,
    pub field_name_override: Option<String>,
    pub description: Option<String>,
}

impl ParsedDirective {
    /// Returns `None` when `content` does not match the directive grammar.
    pub fn parse(kind: ElementKind, content: &str) -> Option<Self> {
        let content = content.trim();
        if content.is_empty() {
            return None;
        }
        let caps = DIRECTIVE_REGEX.captures(content)?;
        let non_empty = |i: usize| {
            caps.get(i)
                .map(|m| m.as_str().trim())
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        Some(Self {
            kind,
            file_path_override: non_empty(1),
            type_reference: caps[2].trim().to_string(),
            field_name_override: non_empty(3),
            description: non_empty(4),
        })
    }
}
