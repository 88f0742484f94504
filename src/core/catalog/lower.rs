//! Lowering of a parsed module into catalog scopes.
//!
//! One [`ScopeBuilder`] pass per file records namespaces, interfaces, enums,
//! type aliases, imports and re-exports into the catalog arena. Bodies of
//! functions, arrow functions and classes are not entered: declarations
//! there are not addressable by a directive.

use std::sync::Arc;

use swc_common::{SourceMap, SourceMapper, Span, Spanned};
use swc_ecma_ast::{
    ArrowExpr, Class, ExportAll, ExportSpecifier, Expr, Function, ImportDecl, ImportSpecifier, Lit,
    MemberProp, Module, ModuleExportName, ModuleItem, NamedExport, TsEntityName, TsEnumDecl,
    TsInterfaceDecl, TsKeywordTypeKind, TsModuleDecl, TsModuleName, TsNamespaceBody, TsType,
    TsTypeAliasDecl, TsTypeElement, TsTypeOperatorOp, TsUnionOrIntersectionType,
};
use swc_ecma_visit::{Visit, VisitWith};

use super::Arena;
use super::jsdoc::is_jsdoc;
use crate::core::parsers::typescript::ExtractedComments;
use crate::core::types::{
    Field, ImportBinding, ImportKind, InterfaceDeclaration, ReExport, ReExportNames, ScopeId,
    ScopeKind, SourceScope, TypeAlias, TypeExpr,
};

pub struct ScopeBuilder<'a> {
    arena: &'a mut Arena,
    comments: &'a ExtractedComments,
    source_map: Arc<SourceMap>,
    /// Root scope of the file being lowered.
    file: ScopeId,
    /// Innermost scope last.
    stack: Vec<ScopeId>,
}

impl<'a> ScopeBuilder<'a> {
    pub fn new(
        arena: &'a mut Arena,
        file: ScopeId,
        comments: &'a ExtractedComments,
        source_map: Arc<SourceMap>,
    ) -> Self {
        Self {
            arena,
            comments,
            source_map,
            file,
            stack: vec![file],
        }
    }

    /// Lower every top-level item of `module` into the file scope.
    pub fn lower(mut self, module: &Module) {
        let is_module = module
            .body
            .iter()
            .any(|item| matches!(item, ModuleItem::ModuleDecl(_)));
        if let ScopeKind::File { is_module: flag, .. } = &mut self.arena.scope_mut(self.file).kind {
            *flag = is_module;
        }
        module.visit_with(&mut self);
    }

    fn current(&self) -> ScopeId {
        *self.stack.last().unwrap_or(&self.file)
    }

    /// Find or create the child namespace `name` of the current scope.
    /// Same-name namespace blocks merge, as in TypeScript.
    fn namespace_scope(&mut self, name: &str) -> ScopeId {
        let parent = self.current();
        let existing = self.arena.scope(parent).namespaces.iter().copied().find(|id| {
            self.arena.scope(*id).name() == Some(name)
        });
        if let Some(id) = existing {
            return id;
        }
        let kind = ScopeKind::Namespace {
            name: name.to_string(),
        };
        let id = self
            .arena
            .push_scope(SourceScope::new(kind, Some(parent), self.file));
        self.arena.scope_mut(parent).namespaces.push(id);
        id
    }

    fn enter_namespace(&mut self, name: &str, body: Option<&TsNamespaceBody>) {
        let scope = self.namespace_scope(name);
        self.stack.push(scope);
        self.lower_namespace_body(body);
        self.stack.pop();
    }

    fn lower_namespace_body(&mut self, body: Option<&TsNamespaceBody>) {
        match body {
            Some(TsNamespaceBody::TsModuleBlock(block)) => block.visit_with(self),
            Some(TsNamespaceBody::TsNamespaceDecl(decl)) => {
                self.enter_namespace(decl.id.sym.as_str(), Some(decl.body.as_ref()))
            }
            None => {}
        }
    }

    fn lower_members(&self, members: &[TsTypeElement]) -> Vec<Field> {
        members
            .iter()
            .filter_map(|member| match member {
                TsTypeElement::TsPropertySignature(prop) if !prop.computed => {
                    let name = property_name(&prop.key)?;
                    let ty = prop
                        .type_ann
                        .as_ref()
                        .map(|ann| self.lower_type(&ann.type_ann))
                        .unwrap_or(TypeExpr::Keyword("any"));
                    Some(Field {
                        name,
                        ty,
                        optional: prop.optional,
                        docs: self.jsdoc_spans(prop.span),
                    })
                }
                _ => None,
            })
            .collect()
    }

    fn jsdoc_spans(&self, span: Span) -> Vec<Span> {
        self.comments
            .leading_at(span.lo)
            .iter()
            .filter(|cmt| is_jsdoc(cmt))
            .map(|cmt| cmt.span)
            .collect()
    }

    fn lower_type(&self, ty: &TsType) -> TypeExpr {
        match ty {
            TsType::TsKeywordType(keyword) => TypeExpr::Keyword(keyword_name(keyword.kind)),
            TsType::TsTypeRef(type_ref) => {
                let name = entity_name(&type_ref.type_name);
                let mut args: Vec<TypeExpr> = type_ref
                    .type_params
                    .as_ref()
                    .map(|params| params.params.iter().map(|t| self.lower_type(t)).collect())
                    .unwrap_or_default();
                if matches!(name.as_str(), "Array" | "ReadonlyArray") && args.len() == 1 {
                    if let Some(elem) = args.pop() {
                        return TypeExpr::Array(Box::new(elem));
                    }
                }
                TypeExpr::Reference { name, args }
            }
            TsType::TsArrayType(array) => TypeExpr::Array(Box::new(self.lower_type(&array.elem_type))),
            TsType::TsTypeLit(lit) => TypeExpr::Literal(self.lower_members(&lit.members)),
            TsType::TsParenthesizedType(paren) => self.lower_type(&paren.type_ann),
            TsType::TsUnionOrIntersectionType(TsUnionOrIntersectionType::TsUnionType(union)) => {
                TypeExpr::Union(union.types.iter().map(|t| self.lower_type(t)).collect())
            }
            TsType::TsUnionOrIntersectionType(TsUnionOrIntersectionType::TsIntersectionType(
                intersection,
            )) => TypeExpr::Intersection(
                intersection
                    .types
                    .iter()
                    .map(|t| self.lower_type(t))
                    .collect(),
            ),
            TsType::TsTypeOperator(op) if op.op == TsTypeOperatorOp::ReadOnly => {
                self.lower_type(&op.type_ann)
            }
            other => TypeExpr::Other(
                self.source_map
                    .span_to_snippet(other.span())
                    .unwrap_or_default(),
            ),
        }
    }
}

impl Visit for ScopeBuilder<'_> {
    fn visit_import_decl(&mut self, node: &ImportDecl) {
        let Some(specifier) = node.src.value.as_str() else {
            return;
        };
        for spec in &node.specifiers {
            let (local, kind) = match spec {
                ImportSpecifier::Named(named) => {
                    let local = named.local.sym.to_string();
                    let imported = named
                        .imported
                        .as_ref()
                        .map(export_name)
                        .unwrap_or_else(|| local.clone());
                    (local, ImportKind::Named { imported })
                }
                ImportSpecifier::Default(default) => {
                    (default.local.sym.to_string(), ImportKind::Default)
                }
                ImportSpecifier::Namespace(ns) => (ns.local.sym.to_string(), ImportKind::Namespace),
            };
            self.arena.scope_mut(self.file).imports.push(ImportBinding {
                local,
                kind,
                specifier: specifier.to_string(),
                target: None,
            });
        }
    }

    fn visit_export_all(&mut self, node: &ExportAll) {
        if let Some(specifier) = node.src.value.as_str() {
            self.arena.scope_mut(self.file).reexports.push(ReExport {
                names: ReExportNames::All,
                specifier: specifier.to_string(),
                target: None,
            });
        }
    }

    fn visit_named_export(&mut self, node: &NamedExport) {
        let Some(specifier) = node.src.as_ref().and_then(|src| src.value.as_str()) else {
            return;
        };
        let mut named = Vec::new();
        for spec in &node.specifiers {
            match spec {
                ExportSpecifier::Named(export) => {
                    let local = export_name(&export.orig);
                    let exported = export
                        .exported
                        .as_ref()
                        .map(export_name)
                        .unwrap_or_else(|| local.clone());
                    named.push((local, exported));
                }
                ExportSpecifier::Namespace(ns) => {
                    self.arena.scope_mut(self.file).reexports.push(ReExport {
                        names: ReExportNames::Namespace(export_name(&ns.name)),
                        specifier: specifier.to_string(),
                        target: None,
                    });
                }
                ExportSpecifier::Default(_) => {}
            }
        }
        if !named.is_empty() {
            self.arena.scope_mut(self.file).reexports.push(ReExport {
                names: ReExportNames::Named(named),
                specifier: specifier.to_string(),
                target: None,
            });
        }
    }

    fn visit_ts_interface_decl(&mut self, node: &TsInterfaceDecl) {
        let scope = self.current();
        let declaration = InterfaceDeclaration {
            name: node.id.sym.to_string(),
            fields: self.lower_members(&node.body.body),
            extends: node
                .extends
                .iter()
                .filter_map(|parent| dotted_expr(&parent.expr))
                .collect(),
            scope,
        };
        let id = self.arena.push_interface(declaration);
        self.arena.scope_mut(scope).interfaces.push(id);
    }

    fn visit_ts_enum_decl(&mut self, node: &TsEnumDecl) {
        let scope = self.current();
        self.arena
            .scope_mut(scope)
            .enums
            .push(node.id.sym.to_string());
    }

    fn visit_ts_type_alias_decl(&mut self, node: &TsTypeAliasDecl) {
        let alias = TypeAlias {
            name: node.id.sym.to_string(),
            ty: self.lower_type(&node.type_ann),
        };
        let scope = self.current();
        self.arena.scope_mut(scope).aliases.push(alias);
    }

    fn visit_ts_module_decl(&mut self, node: &TsModuleDecl) {
        if node.global {
            // `declare global { ... }` contributes to the file root.
            self.stack.push(self.file);
            self.lower_namespace_body(node.body.as_ref());
            self.stack.pop();
            return;
        }
        // `declare module "pkg"` blocks are not namespaces.
        if let TsModuleName::Ident(id) = &node.id {
            self.enter_namespace(id.sym.as_str(), node.body.as_ref());
        }
    }

    fn visit_function(&mut self, _: &Function) {}

    fn visit_arrow_expr(&mut self, _: &ArrowExpr) {}

    fn visit_class(&mut self, _: &Class) {}
}

fn export_name(name: &ModuleExportName) -> String {
    match name {
        ModuleExportName::Ident(ident) => ident.sym.to_string(),
        ModuleExportName::Str(s) => s.value.to_string_lossy().to_string(),
    }
}

fn property_name(key: &Expr) -> Option<String> {
    match key {
        Expr::Ident(ident) => Some(ident.sym.to_string()),
        Expr::Lit(Lit::Str(s)) => s.value.as_str().map(|s| s.to_string()),
        Expr::Lit(Lit::Num(n)) => Some(n.value.to_string()),
        _ => None,
    }
}

/// `Base` or `Ns.Base` from an `extends` clause.
fn dotted_expr(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Ident(ident) => Some(ident.sym.to_string()),
        Expr::Member(member) => {
            let MemberProp::Ident(prop) = &member.prop else {
                return None;
            };
            Some(format!("{}.{}", dotted_expr(&member.obj)?, prop.sym))
        }
        _ => None,
    }
}

fn entity_name(name: &TsEntityName) -> String {
    match name {
        TsEntityName::Ident(ident) => ident.sym.to_string(),
        TsEntityName::TsQualifiedName(qualified) => {
            format!("{}.{}", entity_name(&qualified.left), qualified.right.sym)
        }
    }
}

fn keyword_name(kind: TsKeywordTypeKind) -> &'static str {
    #[allow(unreachable_patterns)]
    match kind {
        TsKeywordTypeKind::TsAnyKeyword => "any",
        TsKeywordTypeKind::TsUnknownKeyword => "unknown",
        TsKeywordTypeKind::TsNumberKeyword => "number",
        TsKeywordTypeKind::TsObjectKeyword => "object",
        TsKeywordTypeKind::TsBooleanKeyword => "boolean",
        TsKeywordTypeKind::TsBigIntKeyword => "bigint",
        TsKeywordTypeKind::TsStringKeyword => "string",
        TsKeywordTypeKind::TsSymbolKeyword => "symbol",
        TsKeywordTypeKind::TsVoidKeyword => "void",
        TsKeywordTypeKind::TsUndefinedKeyword => "undefined",
        TsKeywordTypeKind::TsNullKeyword => "null",
        TsKeywordTypeKind::TsNeverKeyword => "never",
        TsKeywordTypeKind::TsIntrinsicKeyword => "intrinsic",
        _ => "unknown",
    }
}
