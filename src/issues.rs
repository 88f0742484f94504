//! Warnings reported while expanding interface directives.
//!
//! None of these are fatal: each one costs at most the output of the
//! directive that produced it. They are handed to a
//! [`Logger`](crate::core::context::Logger) and, in the CLI, printed after
//! the expanded output.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ExpandWarning {
    /// Directive content did not match `(path) {Type} field description`.
    #[error("Could not parse values of element: {content}")]
    UnparsableDirective { content: String },

    /// A namespace segment of a dotted reference does not exist.
    #[error("Could not find namespace {namespace} in file at {}", .file.display())]
    UnresolvedNamespace { namespace: String, file: PathBuf },

    /// The leaf interface of a directive does not exist in its scope.
    #[error("Could not find interface «{name}» in file «{}»", .file.display())]
    UnresolvedInterface { name: String, file: PathBuf },

    /// An `extends` clause could not be resolved; that parent is skipped.
    #[error("Could not find interface to be extended {name} (extended by {interface})")]
    UnresolvedExtends { name: String, interface: String },

    /// An `extends` chain loops back on itself; the repeated parent is skipped.
    #[error("Interface {interface} is part of an extends cycle through {name}")]
    ExtendsCycle { name: String, interface: String },

    /// A field's JSDoc could not be read back; the field is documented as empty.
    #[error("Could not read documentation of {field}: {reason}")]
    DocumentationComment { field: String, reason: String },

    /// The file a directive points at could not be loaded.
    #[error("Could not load {}: {reason}", .path.display())]
    FileLoad { path: PathBuf, reason: String },

    /// A dependency of a loaded file could not be loaded; its declarations
    /// are unavailable.
    #[error("Could not load dependency {} of {}: {reason}", .path.display(), .from.display())]
    DependencyLoad {
        path: PathBuf,
        from: PathBuf,
        reason: String,
    },
}

impl ExpandWarning {
    /// Stable short name, used as a structured logging field.
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnparsableDirective { .. } => "unparsable-directive",
            Self::UnresolvedNamespace { .. } => "unresolved-namespace",
            Self::UnresolvedInterface { .. } => "unresolved-interface",
            Self::UnresolvedExtends { .. } => "unresolved-extends",
            Self::ExtendsCycle { .. } => "extends-cycle",
            Self::DocumentationComment { .. } => "documentation-comment",
            Self::FileLoad { .. } => "file-load",
            Self::DependencyLoad { .. } => "dependency-load",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let warning = ExpandWarning::UnresolvedInterface {
            name: "Missing".to_string(),
            file: PathBuf::from("/src/api.ts"),
        };
        assert_eq!(
            warning.to_string(),
            "Could not find interface «Missing» in file «/src/api.ts»"
        );
        assert_eq!(warning.code(), "unresolved-interface");
    }

    #[test]
    fn test_serialize_tagged() {
        let warning = ExpandWarning::UnparsableDirective {
            content: "no braces".to_string(),
        };
        let json = serde_json::to_string(&warning).unwrap();
        assert_eq!(json, r#"{"kind":"unparsable-directive","content":"no braces"}"#);
    }
}
