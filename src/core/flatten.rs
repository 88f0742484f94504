//! Flattening Engine.
//!
//! Turns an interface declaration into an ordered list of descriptors:
//! inherited members first (under the same prefix), then each own field,
//! each followed by the members of its type when that type is an object or
//! an array of objects. Which nested types contribute members is decided by
//! [`members_of`].

use std::collections::HashSet;

use crate::core::catalog::TypeCatalog;
use crate::core::classify::TypeClass;
use crate::core::context::ExpandContext;
use crate::core::emit::Descriptor;
use crate::core::resolve::lookup_type;
use crate::core::types::{Field, InterfaceId, ScopeId, TypeAlias, TypeExpr, TypeTarget};
use crate::issues::ExpandWarning;

/// Where the members of a nested field type come from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Members<'a> {
    /// An interface declared in a known file.
    Interface(InterfaceId),
    /// A type alias declared in a known file; its body decides further.
    Alias { alias: &'a TypeAlias, scope: ScopeId },
    /// Inline `{ ... }` members.
    Literal(&'a [Field]),
    /// Every part of `A & B` contributes.
    Intersection(&'a [TypeExpr]),
    None(NoMembers),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoMembers {
    /// Name not declared in any loaded file (built-ins such as `Promise`).
    Unresolved,
    /// Declared in a package declaration file.
    Library,
    Enum,
    Union,
    /// Keywords, literals and anything else without members.
    Scalar,
}

/// Member policy for a nested type written in `scope`.
///
/// Array layers and `null`/`undefined` union members are looked through.
/// Members only ever come from declarations in known files.
pub fn members_of<'a>(catalog: &'a TypeCatalog, scope: ScopeId, ty: &'a TypeExpr) -> Members<'a> {
    match ty.non_nullable().element().non_nullable() {
        TypeExpr::Reference { name, .. } => match lookup_type(catalog, scope, name) {
            Some(TypeTarget::Interface(id)) if catalog.is_known_scope(catalog.interface(id).scope) => {
                Members::Interface(id)
            }
            Some(TypeTarget::Alias { alias, scope }) if catalog.is_known_scope(scope) => {
                Members::Alias { alias, scope }
            }
            Some(TypeTarget::Interface(_) | TypeTarget::Alias { .. }) => Members::None(NoMembers::Library),
            Some(TypeTarget::Enum) => Members::None(NoMembers::Enum),
            None => Members::None(NoMembers::Unresolved),
        },
        TypeExpr::Literal(fields) => Members::Literal(fields),
        TypeExpr::Intersection(parts) => Members::Intersection(parts),
        TypeExpr::Union(_) => Members::None(NoMembers::Union),
        _ => Members::None(NoMembers::Scalar),
    }
}

/// Expansion currently in progress, for recursion guarding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Active {
    Interface(InterfaceId),
    Alias(ScopeId, String),
}

pub struct Flattener<'a> {
    ctx: &'a ExpandContext<'a>,
    active: HashSet<Active>,
    out: Vec<Descriptor>,
}

impl<'a> Flattener<'a> {
    pub fn new(ctx: &'a ExpandContext<'a>) -> Self {
        Self {
            ctx,
            active: HashSet::new(),
            out: Vec::new(),
        }
    }

    /// Append a descriptor built outside the engine (synthetic roots).
    pub fn push(&mut self, descriptor: Descriptor) {
        self.out.push(descriptor);
    }

    pub fn finish(self) -> Vec<Descriptor> {
        self.out
    }

    /// Flatten `id` with every field path starting at `prefix` (empty for
    /// none).
    pub fn flatten_interface(&mut self, id: InterfaceId, prefix: &str) {
        if !self.active.insert(Active::Interface(id)) {
            return;
        }
        let declaration = self.ctx.catalog.interface(id);

        for parent in &declaration.extends {
            self.flatten_parent(parent, declaration.scope, &declaration.name, prefix);
        }
        for field in &declaration.fields {
            self.emit_field(field, declaration.scope, prefix);
        }

        self.active.remove(&Active::Interface(id));
    }

    fn flatten_parent(&mut self, parent: &str, scope: ScopeId, child: &str, prefix: &str) {
        match lookup_type(self.ctx.catalog, scope, parent) {
            Some(TypeTarget::Interface(id)) if self.active.contains(&Active::Interface(id)) => {
                self.ctx.warn(ExpandWarning::ExtendsCycle {
                    name: parent.to_string(),
                    interface: child.to_string(),
                });
            }
            Some(TypeTarget::Interface(id))
                if !self.ctx.catalog.is_known_scope(self.ctx.catalog.interface(id).scope) =>
            {
                tracing::debug!(parent, interface = child, "library parent, members not emitted");
            }
            Some(TypeTarget::Alias { scope, .. }) if !self.ctx.catalog.is_known_scope(scope) => {
                tracing::debug!(parent, interface = child, "library parent, members not emitted");
            }
            Some(TypeTarget::Interface(id)) => self.flatten_interface(id, prefix),
            // `interface A extends Alias {}` where the alias names an object type
            Some(TypeTarget::Alias { alias, scope }) => self.expand_alias(alias, scope, prefix),
            Some(TypeTarget::Enum) | None => {
                self.ctx.warn(ExpandWarning::UnresolvedExtends {
                    name: parent.to_string(),
                    interface: child.to_string(),
                });
            }
        }
    }

    fn emit_field(&mut self, field: &Field, scope: ScopeId, prefix: &str) {
        let catalog = self.ctx.catalog;
        let field_path = if prefix.is_empty() {
            field.name.clone()
        } else {
            format!("{prefix}.{}", field.name)
        };

        // `string | null` documents as `string`
        let ty = field.ty.non_nullable();
        let is_enum = match ty {
            TypeExpr::Reference { name, .. } => {
                matches!(lookup_type(catalog, scope, name), Some(TypeTarget::Enum))
            }
            _ => false,
        };
        let class = TypeClass::classify(&ty.to_string(), is_enum);

        let description = match catalog.documentation(field) {
            Ok(Some(doc)) => format!("`{field_path}` - {doc}"),
            Ok(None) => format!("`{field_path}`"),
            Err(err) => {
                self.ctx.warn(ExpandWarning::DocumentationComment {
                    field: field_path.clone(),
                    reason: err.reason,
                });
                format!("`{field_path}`")
            }
        };

        self.out.push(Descriptor {
            kind: self.ctx.kind,
            label: class.label(),
            field_path: field_path.clone(),
            optional: field.optional,
            description,
        });

        if class.has_members() {
            self.expand_members(ty, scope, &field_path);
        }
    }

    fn expand_members(&mut self, ty: &TypeExpr, scope: ScopeId, prefix: &str) {
        match members_of(self.ctx.catalog, scope, ty) {
            Members::Interface(id) if self.active.contains(&Active::Interface(id)) => {
                tracing::debug!(path = prefix, "recursive type, members not expanded again");
            }
            Members::Interface(id) => self.flatten_interface(id, prefix),
            Members::Alias { alias, scope } => self.expand_alias(alias, scope, prefix),
            Members::Literal(fields) => {
                for field in fields {
                    self.emit_field(field, scope, prefix);
                }
            }
            Members::Intersection(parts) => {
                for part in parts {
                    self.expand_members(part, scope, prefix);
                }
            }
            Members::None(reason) => {
                tracing::debug!(path = prefix, ?reason, "no members emitted");
            }
        }
    }

    fn expand_alias(&mut self, alias: &TypeAlias, scope: ScopeId, prefix: &str) {
        let key = Active::Alias(scope, alias.name.clone());
        if !self.active.insert(key.clone()) {
            tracing::debug!(alias = %alias.name, "recursive alias, members not expanded again");
            return;
        }
        self.expand_members(&alias.ty, scope, prefix);
        self.active.remove(&key);
    }
}
