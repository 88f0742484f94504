//! JSDoc text extraction.

use swc_common::comments::{Comment, CommentKind};

/// True for `/** ... */` blocks (but not `/**/`).
pub fn is_jsdoc(comment: &Comment) -> bool {
    comment.kind == CommentKind::Block && comment.text.starts_with('*') && comment.text.len() > 1
}

/// Inner text of a JSDoc block as written in the source (`/** ... */`):
/// delimiters and the leading ` * ` of each line removed, surrounding blank
/// lines dropped, inner lines joined with `\n`.
pub fn inner_text(raw: &str) -> String {
    let body = raw.trim();
    let body = body.strip_prefix("/**").unwrap_or(body);
    let body = body.strip_suffix("*/").unwrap_or(body);

    let lines: Vec<&str> = body
        .lines()
        .map(|line| {
            let line = line.trim();
            let line = line.strip_prefix('*').unwrap_or(line);
            line.strip_prefix(' ').unwrap_or(line).trim_end()
        })
        .collect();

    let start = lines.iter().position(|l| !l.is_empty());
    let end = lines.iter().rposition(|l| !l.is_empty());
    match (start, end) {
        (Some(start), Some(end)) => lines[start..=end].join("\n"),
        _ => String::new(),
    }
}
