//! Output formatting: expanded elements to stdout, warnings cargo-style to
//! stderr.

use std::io::{self, Write};

use colored::Colorize;

use super::args::OutputFormat;
use super::commands::{CommandResult, CommandSummary, ExpandSummary, FileReport};
use crate::config::CONFIG_FILE_NAME;
use crate::host::Element;
use crate::issues::ExpandWarning;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

pub fn print(result: &CommandResult, verbose: bool) {
    print_to(
        result,
        verbose,
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    );
}

/// Print a command result to custom writers.
pub fn print_to<O: Write, E: Write>(result: &CommandResult, verbose: bool, out: &mut O, err: &mut E) {
    match &result.summary {
        CommandSummary::Expand(summary) => {
            match summary.format {
                OutputFormat::Text => print_files_text(&summary.files, out),
                OutputFormat::Json => print_files_json(&summary.files, out, err),
            }
            print_warnings(&result.warnings, err);
            print_expand_summary(summary, result.warnings.len(), verbose, err);
        }
        CommandSummary::Resolve(summary) => {
            print_elements(&summary.elements, out);
            print_warnings(&result.warnings, err);
        }
        CommandSummary::Init(summary) => {
            if summary.created {
                let _ = writeln!(
                    out,
                    "{} {}",
                    SUCCESS_MARK.green(),
                    format!("Created {}", CONFIG_FILE_NAME).green()
                );
            }
        }
    }
}

fn print_files_text<W: Write>(files: &[FileReport], writer: &mut W) {
    for file in files {
        for block in &file.blocks {
            let _ = writeln!(
                writer,
                "{}",
                format!("{}:{}", file.path.display(), block.line).bold()
            );
            print_elements(&block.elements, writer);
            let _ = writeln!(writer);
        }
    }
}

fn print_files_json<O: Write, E: Write>(files: &[FileReport], out: &mut O, err: &mut E) {
    match serde_json::to_string_pretty(files) {
        Ok(json) => {
            let _ = writeln!(out, "{json}");
        }
        Err(e) => {
            let _ = writeln!(err, "{} {e}", "error:".bold().red());
        }
    }
}

fn print_elements<W: Write>(elements: &[Element], writer: &mut W) {
    for element in elements {
        let _ = writeln!(
            writer,
            "@{} {}",
            element.source_name,
            element.content.trim_end()
        );
    }
}

fn print_warnings<W: Write>(warnings: &[ExpandWarning], writer: &mut W) {
    for warning in warnings {
        let _ = writeln!(
            writer,
            "{} {}  {}",
            "warning:".bold().yellow(),
            warning,
            warning.code().dimmed().cyan()
        );
    }
}

fn print_expand_summary<W: Write>(summary: &ExpandSummary, warning_count: usize, verbose: bool, writer: &mut W) {
    if summary.unreadable_count > 0 && !verbose {
        let _ = writeln!(
            writer,
            "{} {} file(s) could not be read (use {} for details)",
            "warning:".bold().yellow(),
            summary.unreadable_count,
            "-v".cyan()
        );
    }

    let blocks: usize = summary.files.iter().map(|f| f.blocks.len()).sum();
    let msg = format!(
        "Expanded {} {} in {} source {}",
        blocks,
        if blocks == 1 { "block" } else { "blocks" },
        summary.source_files_checked,
        if summary.source_files_checked == 1 { "file" } else { "files" }
    );
    if warning_count == 0 {
        let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), msg.green());
    } else {
        let _ = writeln!(
            writer,
            "{} ({} {})",
            msg,
            warning_count,
            if warning_count == 1 { "warning" } else { "warnings" }
        );
    }
}
