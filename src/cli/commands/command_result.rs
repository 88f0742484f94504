use std::path::PathBuf;

use serde::Serialize;

use crate::cli::args::OutputFormat;
use crate::host::Element;
use crate::issues::ExpandWarning;

#[derive(Debug)]
pub enum CommandSummary {
    Expand(ExpandSummary),
    Resolve(ResolveSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct ExpandSummary {
    pub format: OutputFormat,
    pub files: Vec<FileReport>,
    pub source_files_checked: usize,
    /// Scanned files that could not be read.
    pub unreadable_count: usize,
}

/// Expanded blocks of one source file.
#[derive(Debug, Serialize)]
pub struct FileReport {
    /// Relative to the source root.
    pub path: PathBuf,
    pub blocks: Vec<BlockReport>,
}

#[derive(Debug, Serialize)]
pub struct BlockReport {
    pub line: usize,
    pub elements: Vec<Element>,
}

#[derive(Debug)]
pub struct ResolveSummary {
    pub elements: Vec<Element>,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
}

/// Result of running an apidoc-ts command.
pub struct CommandResult {
    pub summary: CommandSummary,
    /// Every warning reported while expanding, in order.
    pub warnings: Vec<ExpandWarning>,
    /// If true, exit code 1 is returned when there are warnings.
    pub deny_warnings: bool,
}
