//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `expand`: expand every interface directive in the scanned sources
//! - `resolve`: expand a single directive given on the command line
//! - `init`: write a default configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};

use crate::host::ElementKind;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Expand(cmd)) => cmd.common.verbose,
            Some(Command::Resolve(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Source root directory (default: current directory)
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Args)]
pub struct ExpandCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Exit with status 1 when any directive produced a warning
    #[arg(long)]
    pub deny_warnings: bool,
}

#[derive(Debug, Args)]
pub struct ResolveCommand {
    /// File declaring the type
    pub file: PathBuf,

    /// Type reference, e.g. `Namespace.Item[]`
    #[arg(value_name = "TYPE")]
    pub type_reference: String,

    /// Field name the members are nested under
    #[arg(long)]
    pub field: Option<String>,

    #[arg(long, value_enum, default_value_t = ElementKind::Success)]
    pub kind: ElementKind,

    /// Description of the root field
    #[arg(long, requires = "field")]
    pub description: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Expand interface directives in all `@api` comment blocks
    Expand(ExpandCommand),
    /// Expand a single type reference
    Resolve(ResolveCommand),
    /// Initialize a new .apidoctsrc.json configuration file
    Init,
}
