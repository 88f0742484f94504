use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::CommandResult,
    commands::{expand::expand, init::init, resolve::resolve},
};

/// Dispatch to the command handler.
///
/// # Returns
/// - `Ok(CommandResult)` with the expanded output and collected warnings
/// - `Err` if the command fails (e.g. invalid config, missing source root)
pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Expand(cmd)) => expand(cmd),
        Some(Command::Resolve(cmd)) => resolve(cmd),
        Some(Command::Init) => init(),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
