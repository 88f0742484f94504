use anyhow::Result;

use super::{CommandResult, CommandSummary, ResolveSummary, expand::source_root};
use crate::cli::args::ResolveCommand;
use crate::core::{CollectingLogger, TypeCatalog};
use crate::host::Element;
use crate::plugin::expand_element;

pub fn resolve(cmd: ResolveCommand) -> Result<CommandResult> {
    let root = source_root(cmd.common.source_root.as_deref())?;
    let file = root.join(&cmd.file);

    let mut content = format!("{{{}}}", cmd.type_reference);
    for part in [&cmd.field, &cmd.description].into_iter().flatten() {
        content.push(' ');
        content.push_str(part);
    }
    let directive = Element::new(cmd.kind.custom_name(), &content);

    let logger = CollectingLogger::new();
    let mut catalog = TypeCatalog::new();
    let elements = expand_element(&mut catalog, &logger, &directive, &file);

    Ok(CommandResult {
        summary: CommandSummary::Resolve(ResolveSummary { elements }),
        warnings: logger.take(),
        deny_warnings: true,
    })
}
