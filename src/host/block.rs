//! Comment-block scanning: `/** ... */` blocks carrying `@api` elements.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use super::{Element, HookRegistry};

static BLOCK_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)/\*\*(.*?)\*/").unwrap());

static ELEMENT_START_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^@(\w+)\s?(.*)$").unwrap());

/// A documentation comment block with its leading `*`s removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentBlock {
    /// 1-based line of the opening `/**`.
    pub line: usize,
    pub text: String,
}

/// Every `/** ... */` block of `source` that contains an `@api` element.
pub fn find_blocks(source: &str) -> Vec<CommentBlock> {
    BLOCK_REGEX
        .captures_iter(source)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let text = caps
                .get(1)?
                .as_str()
                .lines()
                .map(|line| {
                    let line = line.trim_start();
                    let line = line.strip_prefix('*').unwrap_or(line);
                    line.strip_prefix(' ').unwrap_or(line).trim_end()
                })
                .collect::<Vec<_>>()
                .join("\n")
                .trim()
                .to_string();
            if !text.contains("@api") {
                return None;
            }
            Some(CommentBlock {
                line: source[..whole.start()].matches('\n').count() + 1,
                text,
            })
        })
        .collect()
}

/// Split block text into `@name content` elements. Lines that do not start
/// a new element continue the previous one.
pub fn split_elements(block: &str) -> Vec<Element> {
    let mut elements: Vec<Element> = Vec::new();
    for line in block.lines() {
        if let Some(caps) = ELEMENT_START_REGEX.captures(line.trim_start()) {
            let source_name = &caps[1];
            let content = caps[2].trim_end();
            elements.push(Element {
                source: line.trim().to_string(),
                name: source_name.to_lowercase(),
                source_name: source_name.to_string(),
                content: content.to_string(),
            });
        } else if let Some(current) = elements.last_mut() {
            current.content.push('\n');
            current.content.push_str(line);
            current.source.push('\n');
            current.source.push_str(line);
        }
    }
    for element in &mut elements {
        let trimmed = element.content.trim_end().len();
        element.content.truncate(trimmed);
    }
    elements
}

/// Build a block's element list, running the registered hooks after each
/// element is pushed.
pub fn parse_block(block: &CommentBlock, filename: &Path, registry: &mut HookRegistry) -> Vec<Element> {
    let mut elements = Vec::new();
    for element in split_elements(&block.text) {
        elements.push(element.clone());
        registry.find_elements(&mut elements, &element, &block.text, filename);
    }
    elements
}
