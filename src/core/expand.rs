//! Directive-level expansion: native, array and interface roots.

use crate::core::classify::{capitalize, decapitalize, is_primitive};
use crate::core::context::ExpandContext;
use crate::core::directive::ParsedDirective;
use crate::core::emit::Descriptor;
use crate::core::flatten::Flattener;
use crate::core::resolve::{ResolveError, TypeReference, resolve};
use crate::core::types::ScopeId;
use crate::issues::ExpandWarning;

impl From<ResolveError> for ExpandWarning {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::UnresolvedNamespace { namespace, file } => {
                ExpandWarning::UnresolvedNamespace { namespace, file }
            }
        }
    }
}

/// Expand one directive whose declaring file has been loaded as `root`.
///
/// Either every descriptor of the directive is returned or none is: a
/// failing root reports the warning instead.
pub fn expand(
    ctx: &ExpandContext<'_>,
    root: ScopeId,
    directive: &ParsedDirective,
) -> Result<Vec<Descriptor>, ExpandWarning> {
    let reference = TypeReference::parse(&directive.type_reference);
    let resolved = resolve(ctx.catalog, root, &reference)?;

    if is_primitive(&resolved.leaf) {
        return Ok(vec![native_root(ctx, &resolved.leaf, directive)]);
    }

    let Some(id) = ctx.catalog.interface_in(resolved.scope, &resolved.leaf) else {
        let name = if reference.is_array() {
            resolved.leaf.clone()
        } else {
            directive.type_reference.clone()
        };
        return Err(ExpandWarning::UnresolvedInterface {
            name,
            file: ctx.catalog.file_path(root).to_path_buf(),
        });
    };

    let mut flattener = Flattener::new(ctx);
    if reference.is_array() {
        let field = directive
            .field_name_override
            .clone()
            .unwrap_or_else(|| decapitalize(&resolved.leaf));
        let description = directive.description.clone().unwrap_or_else(|| field.clone());
        flattener.push(Descriptor {
            kind: ctx.kind,
            label: "Object[]".to_string(),
            field_path: field.clone(),
            optional: false,
            description,
        });
        flattener.flatten_interface(id, &field);
    } else {
        let prefix = directive.field_name_override.as_deref().unwrap_or_default();
        flattener.flatten_interface(id, prefix);
    }
    Ok(flattener.finish())
}

/// `{String} field description` for a directive naming a primitive (or an
/// array of one).
fn native_root(ctx: &ExpandContext<'_>, leaf: &str, directive: &ParsedDirective) -> Descriptor {
    Descriptor {
        kind: ctx.kind,
        label: capitalize(leaf),
        field_path: directive.field_name_override.clone().unwrap_or_default(),
        optional: false,
        description: directive.description.clone().unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::core::catalog::TypeCatalog;
    use crate::core::context::CollectingLogger;
    use crate::host::ElementKind;

    const FIXTURE: &str = r#"
export interface SquareConfig {
    color: string;
    width: number;
}

export interface SquareConfigsInterface {
    squares: SquareConfig[];
    logs?: string[];
}

export interface QueryInterface {
    /** optional test description */
    optional_test?: string;
    /** required test description */
    required_test: number;
}

export interface SquareConfigsGeneric {
    squares: Array<SquareConfig>;
}

export namespace FirstNamespace {
    export namespace SecondNamespace {
        export interface Result {
            id: string;
        }
    }
}
"#;

    fn run(content: &str) -> (Result<Vec<String>, ExpandWarning>, CollectingLogger) {
        let logger = CollectingLogger::new();
        let mut catalog = TypeCatalog::new();
        let root = catalog
            .load_source(Path::new("/virtual/fixture.ts"), FIXTURE, &logger)
            .unwrap();
        let directive = ParsedDirective::parse(ElementKind::Success, content).unwrap();
        let ctx = ExpandContext::new(&catalog, &logger, ElementKind::Success);
        let result = expand(&ctx, root, &directive)
            .map(|descriptors| descriptors.iter().map(Descriptor::content).collect());
        (result, logger)
    }

    fn lines(content: &str) -> Vec<String> {
        run(content).0.unwrap()
    }

    #[test]
    fn test_interface_root_with_field_name() {
        assert_eq!(
            lines("{SquareConfig} config"),
            vec![
                "{String} config.color `config.color`",
                "{Number} config.width `config.width`",
            ]
        );
    }

    #[test]
    fn test_interface_root_without_field_name() {
        insta::assert_snapshot!(lines("{SquareConfigsInterface}").join("\n"), @r"
        {Object[]} squares `squares`
        {String} squares.color `squares.color`
        {Number} squares.width `squares.width`
        {String} [logs] `logs`
        ");
    }

    #[test]
    fn test_generic_array_fields_match_bracket_arrays() {
        assert_eq!(
            lines("{SquareConfigsGeneric}"),
            lines("{SquareConfigsInterface}")[..3].to_vec()
        );
    }

    #[test]
    fn test_documentation_and_optional_fields() {
        assert_eq!(
            lines("{QueryInterface} query"),
            vec![
                "{String} [query.optional_test] `query.optional_test` - optional test description",
                "{Number} query.required_test `query.required_test` - required test description",
            ]
        );
    }

    #[test]
    fn test_array_root() {
        insta::assert_snapshot!(lines("{SquareConfig[]}").join("\n"), @r"
        {Object[]} squareConfig squareConfig
        {String} squareConfig.color `squareConfig.color`
        {Number} squareConfig.width `squareConfig.width`
        ");

        assert_eq!(
            lines("{Array<SquareConfig>} list All squares")[0],
            "{Object[]} list All squares"
        );
    }

    #[test]
    fn test_native_roots() {
        assert_eq!(lines("{string} name The name"), vec!["{String} name The name"]);
        assert_eq!(lines("{Boolean} ok"), vec!["{Boolean} ok"]);
        assert_eq!(lines("{string[]} names"), vec!["{String} names"]);
    }

    #[test]
    fn test_namespaced_reference() {
        assert_eq!(
            lines("{FirstNamespace.SecondNamespace.Result} result"),
            vec!["{String} result.id `result.id`"]
        );
        assert_eq!(
            lines("{FirstNamespace.SecondNamespace.Result}"),
            vec!["{String} id `id`"]
        );
    }

    #[test]
    fn test_unresolved_namespace_yields_nothing() {
        let (result, _) = run("{FirstNamespace.Missing.Result} result");
        assert_eq!(
            result,
            Err(ExpandWarning::UnresolvedNamespace {
                namespace: "Missing".to_string(),
                file: PathBuf::from("/virtual/fixture.ts"),
            })
        );
    }

    #[test]
    fn test_unresolved_interface_yields_nothing() {
        let (result, _) = run("{Nope} field");
        assert_eq!(
            result,
            Err(ExpandWarning::UnresolvedInterface {
                name: "Nope".to_string(),
                file: PathBuf::from("/virtual/fixture.ts"),
            })
        );
        let (result, _) = run("{Nope[]}");
        assert!(matches!(
            result,
            Err(ExpandWarning::UnresolvedInterface { name, .. }) if name == "Nope"
        ));
    }
}
