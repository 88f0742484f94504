//! Arena data model for loaded TypeScript declarations.
//!
//! Scopes and interfaces live in flat vectors owned by the
//! [`TypeCatalog`](crate::core::catalog::TypeCatalog) and are addressed by
//! index handles. Nothing here holds a back-reference; a scope knows its
//! parent and its file root by id only.

use std::fmt;
use std::path::PathBuf;

use swc_common::Span;

/// Handle to a [`SourceScope`] (file root or namespace).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(pub(crate) usize);

/// Handle to an [`InterfaceDeclaration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InterfaceId(pub(crate) usize);

/// Whether a file was authored by the user or pulled in from a package.
///
/// Only [`FileOrigin::Known`] files contribute members to structural
/// expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOrigin {
    /// Loaded by a directive, or a relative dependency of such a file.
    Known,
    /// Resolved through `node_modules`.
    Library,
}

#[derive(Debug, Clone)]
pub enum ScopeKind {
    File {
        path: PathBuf,
        /// True when the file has import/export syntax (its declarations
        /// are not global).
        is_module: bool,
    },
    Namespace {
        name: String,
    },
}

/// A file or a namespace nested within one.
#[derive(Debug, Clone)]
pub struct SourceScope {
    pub kind: ScopeKind,
    pub parent: Option<ScopeId>,
    /// Root scope of the file this scope belongs to (itself for files).
    pub file: ScopeId,
    /// Child namespaces in declaration order.
    pub namespaces: Vec<ScopeId>,
    /// Interfaces in declaration order.
    pub interfaces: Vec<InterfaceId>,
    pub enums: Vec<String>,
    pub aliases: Vec<TypeAlias>,
    /// Import bindings; only populated on file roots.
    pub imports: Vec<ImportBinding>,
    /// Re-exports; only populated on file roots.
    pub reexports: Vec<ReExport>,
}

impl SourceScope {
    pub fn new(kind: ScopeKind, parent: Option<ScopeId>, file: ScopeId) -> Self {
        Self {
            kind,
            parent,
            file,
            namespaces: Vec::new(),
            interfaces: Vec::new(),
            enums: Vec::new(),
            aliases: Vec::new(),
            imports: Vec::new(),
            reexports: Vec::new(),
        }
    }

    /// Name of a namespace scope, `None` for file roots.
    pub fn name(&self) -> Option<&str> {
        match &self.kind {
            ScopeKind::Namespace { name } => Some(name),
            ScopeKind::File { .. } => None,
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self.kind, ScopeKind::File { .. })
    }
}

/// A named structural type.
#[derive(Debug, Clone)]
pub struct InterfaceDeclaration {
    pub name: String,
    pub fields: Vec<Field>,
    /// `extends` clauses as written (`Base`, `Ns.Base`), resolved lazily.
    pub extends: Vec<String>,
    /// Owning scope.
    pub scope: ScopeId,
}

/// A property of an interface or an inline type literal.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub ty: TypeExpr,
    pub optional: bool,
    /// Spans of the JSDoc blocks attached to the property. The text is read
    /// back from the source map on demand.
    pub docs: Vec<Span>,
}

impl Field {
    /// Textual form of the declared type, arrays always as `T[]`.
    pub fn type_text(&self) -> String {
        self.ty.to_string()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeAlias {
    pub name: String,
    pub ty: TypeExpr,
}

/// Structural form of a type annotation.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeExpr {
    /// `string`, `number`, `any`, ...
    Keyword(&'static str),
    /// `Foo`, `Ns.Foo`, `Promise<Foo>`.
    Reference { name: String, args: Vec<TypeExpr> },
    /// `T[]`, `Array<T>`, `ReadonlyArray<T>`.
    Array(Box<TypeExpr>),
    /// Inline `{ a: string }`.
    Literal(Vec<Field>),
    Union(Vec<TypeExpr>),
    Intersection(Vec<TypeExpr>),
    /// Anything else, kept as source text.
    Other(String),
}

impl TypeExpr {
    /// Strip every array layer.
    pub fn element(&self) -> &TypeExpr {
        match self {
            TypeExpr::Array(inner) => inner.element(),
            other => other,
        }
    }

    /// `T | null | undefined` seen as `T`.
    ///
    /// Unions that keep more than one member after dropping `null` and
    /// `undefined` are returned unchanged.
    pub fn non_nullable(&self) -> &TypeExpr {
        let TypeExpr::Union(types) = self else {
            return self;
        };
        let mut rest = types.iter().filter(|ty| !ty.is_nullish());
        match (rest.next(), rest.next()) {
            (Some(only), None) => only.non_nullable(),
            _ => self,
        }
    }

    fn is_nullish(&self) -> bool {
        matches!(self, TypeExpr::Keyword("null" | "undefined"))
    }

    fn needs_parens_in_array(&self) -> bool {
        matches!(self, TypeExpr::Union(_) | TypeExpr::Intersection(_))
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Keyword(name) => f.write_str(name),
            TypeExpr::Reference { name, args } => {
                f.write_str(name)?;
                if !args.is_empty() {
                    let args: Vec<String> = args.iter().map(ToString::to_string).collect();
                    write!(f, "<{}>", args.join(", "))?;
                }
                Ok(())
            }
            TypeExpr::Array(inner) if inner.needs_parens_in_array() => write!(f, "({inner})[]"),
            TypeExpr::Array(inner) => write!(f, "{inner}[]"),
            TypeExpr::Literal(fields) => {
                if fields.is_empty() {
                    return f.write_str("{}");
                }
                f.write_str("{ ")?;
                for field in fields {
                    let q = if field.optional { "?" } else { "" };
                    write!(f, "{}{}: {}; ", field.name, q, field.ty)?;
                }
                f.write_str("}")
            }
            TypeExpr::Union(types) => join(f, types, " | "),
            TypeExpr::Intersection(types) => join(f, types, " & "),
            TypeExpr::Other(text) => f.write_str(text),
        }
    }
}

fn join(f: &mut fmt::Formatter<'_>, types: &[TypeExpr], sep: &str) -> fmt::Result {
    for (i, ty) in types.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{ty}")?;
    }
    Ok(())
}

/// What an `import` statement binds in a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportKind {
    /// `import { imported as local }`
    Named { imported: String },
    /// `import local from`
    Default,
    /// `import * as local from`
    Namespace,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportBinding {
    pub local: String,
    pub kind: ImportKind,
    /// Module specifier as written.
    pub specifier: String,
    /// Resolved target file, `None` when the specifier could not be located.
    pub target: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReExportNames {
    /// `export * from`
    All,
    /// `export { local as exported } from`, stored as `(local, exported)`.
    Named(Vec<(String, String)>),
    /// `export * as name from`
    Namespace(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReExport {
    pub names: ReExportNames,
    pub specifier: String,
    pub target: Option<PathBuf>,
}

/// What a type name resolved to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TypeTarget<'a> {
    Interface(InterfaceId),
    Enum,
    Alias { alias: &'a TypeAlias, scope: ScopeId },
}
