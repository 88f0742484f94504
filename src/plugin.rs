//! The interface plugin: replaces `@api*Interface` elements with the
//! flattened fields of the referenced type.
//!
//! ```ignore
//! let mut registry = HookRegistry::new();
//! apidoc_ts::plugin::init(&mut registry, TracingLogger);
//! let elements = parse_block(&block, Path::new("src/routes.ts"), &mut registry);
//! ```

use std::path::{Path, PathBuf};

use crate::core::{ExpandContext, Logger, ParsedDirective, TypeCatalog, emit, expand};
use crate::host::{Element, HookPoint, Host, ParserHook};
use crate::issues::ExpandWarning;

/// Priority the plugin registers at.
pub const HOOK_PRIORITY: i32 = 200;

/// Register the interface plugin on `host`, with a fresh catalog.
pub fn init<L: Logger + 'static>(host: &mut dyn Host, logger: L) {
    host.add_hook(
        HookPoint::ParserFindElements,
        Box::new(InterfacePlugin::new(TypeCatalog::new(), logger)),
        HOOK_PRIORITY,
    );
}

/// `parser-find-elements` hook owning the catalog of one run.
pub struct InterfacePlugin<L> {
    catalog: TypeCatalog,
    logger: L,
}

impl<L: Logger> InterfacePlugin<L> {
    pub fn new(catalog: TypeCatalog, logger: L) -> Self {
        Self { catalog, logger }
    }

    pub fn catalog(&self) -> &TypeCatalog {
        &self.catalog
    }
}

impl<L: Logger> ParserHook for InterfacePlugin<L> {
    fn find_elements(&mut self, elements: &mut Vec<Element>, element: &Element, _block: &str, filename: &Path) {
        if element.directive_kind().is_none() {
            return;
        }
        elements.pop();
        elements.extend(expand_element(&mut self.catalog, &self.logger, element, filename));
    }
}

/// Expand a directive element found in `filename` into standard elements.
///
/// Non-directive elements and failed directives yield nothing; failures are
/// reported to `logger`.
pub fn expand_element(
    catalog: &mut TypeCatalog,
    logger: &dyn Logger,
    element: &Element,
    filename: &Path,
) -> Vec<Element> {
    let Some(kind) = element.directive_kind() else {
        return Vec::new();
    };
    let Some(directive) = ParsedDirective::parse(kind, &element.content) else {
        logger.warn(&ExpandWarning::UnparsableDirective {
            content: element.content.trim().to_string(),
        });
        return Vec::new();
    };

    let path = declaring_file(&directive, filename);
    let root = match catalog.load_file(&path, logger) {
        Ok(root) => root,
        Err(err) => {
            logger.warn(&ExpandWarning::FileLoad {
                path,
                reason: err.to_string(),
            });
            return Vec::new();
        }
    };

    let ctx = ExpandContext::new(catalog, logger, kind);
    match expand(&ctx, root, &directive) {
        Ok(descriptors) => {
            tracing::debug!(
                reference = %directive.type_reference,
                count = descriptors.len(),
                "expanded directive"
            );
            descriptors.iter().map(emit).collect()
        }
        Err(warning) => {
            ctx.warn(warning);
            Vec::new()
        }
    }
}

/// The directive's path override, relative to the directory of `filename`,
/// or `filename` itself.
fn declaring_file(directive: &ParsedDirective, filename: &Path) -> PathBuf {
    match &directive.file_path_override {
        Some(relative) => filename
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(relative),
        None => filename.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::core::CollectingLogger;
    use crate::host::{HookRegistry, find_blocks, parse_block};

    const MODELS: &str = r#"
export interface SquareConfig {
    color: string;
    width: number;
}
"#;

    const ROUTES: &str = r#"
/**
 * @api {get} /square Get square
 * @apiName GetSquare
 * @apiSuccessInterface (./models.ts) {SquareConfig} square
 * @apiParamInterface (./models.ts) {Missing.Thing}
 * @apiQueryInterface (./models.ts) {string} id Identifier
 */
export function get() {}
"#;

    fn contents(elements: &[Element]) -> Vec<String> {
        elements
            .iter()
            .map(|e| format!("@{} {}", e.source_name, e.content.trim_end()))
            .collect()
    }

    #[test]
    fn test_hook_replaces_directives() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("models.ts"), MODELS).unwrap();
        let routes = dir.path().join("routes.ts");
        fs::write(&routes, ROUTES).unwrap();

        let logger = CollectingLogger::new();
        let mut registry = HookRegistry::new();
        init(&mut registry, logger.clone());

        let blocks = find_blocks(ROUTES);
        let elements = parse_block(&blocks[0], &routes, &mut registry);

        assert_eq!(
            contents(&elements),
            vec![
                "@api {get} /square Get square",
                "@apiName GetSquare",
                "@apiSuccess {String} square.color `square.color`",
                "@apiSuccess {Number} square.width `square.width`",
                "@apiQuery {String} id Identifier",
            ]
        );
        let warnings = logger.take();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code(), "unresolved-namespace");
    }

    #[test]
    fn test_unparsable_and_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let routes = dir.path().join("routes.ts");
        let logger = CollectingLogger::new();
        let mut catalog = TypeCatalog::new();

        let unparsable = Element::new("apiBodyInterface", "no braces here");
        assert!(expand_element(&mut catalog, &logger, &unparsable, &routes).is_empty());

        let missing = Element::new("apiBodyInterface", "(./nope.ts) {Thing}");
        assert!(expand_element(&mut catalog, &logger, &missing, &routes).is_empty());

        let codes: Vec<&str> = logger.take().iter().map(|w| w.code()).collect();
        assert_eq!(codes, vec!["unparsable-directive", "file-load"]);
    }

    #[test]
    fn test_other_elements_are_left_alone() {
        let logger = CollectingLogger::new();
        let mut plugin = InterfacePlugin::new(TypeCatalog::new(), logger.clone());
        let element = Element::new("apiName", "GetSquare");
        let mut elements = vec![element.clone()];
        plugin.find_elements(&mut elements, &element, "", Path::new("routes.ts"));
        assert_eq!(elements, vec![element]);
        assert_eq!(plugin.catalog().file_count(), 0);
        assert!(logger.is_empty());
    }
}
