use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::{BlockReport, CommandResult, CommandSummary, ExpandSummary, FileReport};
use crate::cli::args::ExpandCommand;
use crate::config::load_config;
use crate::core::CollectingLogger;
use crate::core::file_scanner::{ScanOptions, scan_files};
use crate::host::{HookRegistry, find_blocks, parse_block};
use crate::plugin;

pub fn expand(cmd: ExpandCommand) -> Result<CommandResult> {
    let source_root = source_root(cmd.common.source_root.as_deref())?;
    let config = load_config(&source_root)?.config;

    let scan = scan_files(
        &source_root,
        &ScanOptions {
            includes: &config.includes,
            ignores: &config.ignores,
            ignore_test_files: config.ignore_test_files,
            extensions: &config.extensions,
        },
    );

    let logger = CollectingLogger::new();
    let mut registry = HookRegistry::new();
    plugin::init(&mut registry, logger.clone());

    let mut files = Vec::new();
    let mut unreadable_count = scan.skipped_count;
    for file in &scan.files {
        let source = match fs::read_to_string(file) {
            Ok(source) => source,
            Err(err) => {
                unreadable_count += 1;
                tracing::warn!(path = %file.display(), "cannot read source file: {err}");
                continue;
            }
        };

        let blocks: Vec<BlockReport> = find_blocks(&source)
            .iter()
            .map(|block| BlockReport {
                line: block.line,
                elements: parse_block(block, file, &mut registry),
            })
            .collect();
        if blocks.is_empty() {
            continue;
        }
        files.push(FileReport {
            path: file.strip_prefix(&source_root).unwrap_or(file).to_path_buf(),
            blocks,
        });
    }

    Ok(CommandResult {
        summary: CommandSummary::Expand(ExpandSummary {
            format: cmd.format,
            files,
            source_files_checked: scan.files.len(),
            unreadable_count,
        }),
        warnings: logger.take(),
        deny_warnings: cmd.deny_warnings,
    })
}

/// Absolute source root, `.` when not given.
pub(super) fn source_root(arg: Option<&Path>) -> Result<PathBuf> {
    let root = arg.unwrap_or_else(|| Path::new("."));
    root.canonicalize()
        .with_context(|| format!("Source root does not exist: {}", root.display()))
}
