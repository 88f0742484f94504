//! Reference Resolver: dotted, possibly array-wrapped type names to scopes
//! and declarations.
//!
//! Two entry points:
//! - [`resolve`] walks the namespace path of a directive's reference from a
//!   root scope, the way a directive names its target.
//! - [`lookup_type`] finds the declaration a field's type refers to, the
//!   way TypeScript would see it from the declaring scope: lexical scopes,
//!   then imports, then global scripts.

use std::collections::HashSet;
use std::path::PathBuf;

use thiserror::Error;

use crate::core::catalog::TypeCatalog;
use crate::core::types::{ImportKind, ReExportNames, ScopeId, TypeTarget};

/// Surface syntax of an array-wrapped reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayWrapper {
    /// `T[]`
    Brackets,
    /// `Array<T>`
    Generic,
}

/// A directive's raw type target, split for namespace walking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeReference {
    /// Namespace segments before the leaf.
    pub namespaces: Vec<String>,
    /// Leaf name with any array wrapper removed.
    pub leaf: String,
    pub array: Option<ArrayWrapper>,
}

impl TypeReference {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let (inner, array) = match strip_array_wrapper(raw) {
            Some((inner, wrapper)) => (inner, Some(wrapper)),
            None => (raw, None),
        };

        let mut namespaces: Vec<String> = inner.split('.').map(|s| s.trim().to_string()).collect();
        let leaf = namespaces.pop().unwrap_or_default();
        Self {
            namespaces,
            leaf,
            array,
        }
    }

    pub fn is_array(&self) -> bool {
        self.array.is_some()
    }

    /// Namespaces and leaf joined back with `.`, without the array wrapper.
    pub fn dotted(&self) -> String {
        let mut segments = self.namespaces.clone();
        segments.push(self.leaf.clone());
        segments.join(".")
    }
}

/// `Array<T>` or `T[]` -> `T`.
pub fn strip_array_wrapper(name: &str) -> Option<(&str, ArrayWrapper)> {
    if let Some(inner) = name.strip_prefix("Array<").and_then(|n| n.strip_suffix('>')) {
        return Some((inner.trim(), ArrayWrapper::Generic));
    }
    name.strip_suffix("[]")
        .map(|inner| (inner.trim(), ArrayWrapper::Brackets))
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("Could not find namespace {namespace} in file at {}", .file.display())]
    UnresolvedNamespace { namespace: String, file: PathBuf },
}

/// Deepest scope reached by a reference, plus the leaf to look up in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub scope: ScopeId,
    pub leaf: String,
}

/// Walk `reference`'s namespace segments from `root`.
///
/// An un-namespaced reference resolves to `root` itself. The leaf is not
/// looked up here.
pub fn resolve(
    catalog: &TypeCatalog,
    root: ScopeId,
    reference: &TypeReference,
) -> Result<Resolved, ResolveError> {
    let mut scope = root;
    for segment in &reference.namespaces {
        scope = catalog.namespace_in(scope, segment).ok_or_else(|| {
            ResolveError::UnresolvedNamespace {
                namespace: segment.clone(),
                file: catalog.file_path(root).to_path_buf(),
            }
        })?;
    }
    Ok(Resolved {
        scope,
        leaf: reference.leaf.clone(),
    })
}

/// Find the declaration `name` (possibly dotted) refers to when written
/// inside `from`.
pub fn lookup_type<'a>(catalog: &'a TypeCatalog, from: ScopeId, name: &str) -> Option<TypeTarget<'a>> {
    let segments: Vec<&str> = name.split('.').collect();

    if let Some(found) = catalog
        .lexical_chain(from)
        .find_map(|scope| lookup_path(catalog, scope, &segments))
    {
        return Some(found);
    }

    if let Some(found) = lookup_imported(catalog, from, &segments) {
        return Some(found);
    }

    catalog
        .global_scripts()
        .find_map(|root| lookup_path(catalog, root, &segments))
}

/// Walk all but the last segment as namespaces from `scope`, then look up
/// the last one there.
fn lookup_path<'a>(catalog: &'a TypeCatalog, scope: ScopeId, segments: &[&str]) -> Option<TypeTarget<'a>> {
    let (leaf, namespaces) = segments.split_last()?;
    let mut current = scope;
    for segment in namespaces {
        current = catalog.namespace_in(current, segment)?;
    }
    catalog.target_in(current, leaf)
}

fn lookup_imported<'a>(catalog: &'a TypeCatalog, from: ScopeId, segments: &[&str]) -> Option<TypeTarget<'a>> {
    let (first, rest) = segments.split_first()?;
    let file = catalog.scope(catalog.scope(from).file);

    file.imports
        .iter()
        .filter(|import| import.local == *first)
        .find_map(|import| {
            let root = catalog.file_root(import.target.as_deref()?)?;
            let mut visited = HashSet::new();
            match &import.kind {
                ImportKind::Named { imported } => {
                    let mut path = vec![imported.as_str()];
                    path.extend_from_slice(rest);
                    lookup_exported(catalog, root, &path, &mut visited)
                }
                ImportKind::Namespace if !rest.is_empty() => {
                    lookup_exported(catalog, root, rest, &mut visited)
                }
                _ => None,
            }
        })
}

/// Look `segments` up among what the module at `root` exports, following
/// re-exports.
fn lookup_exported<'a>(
    catalog: &'a TypeCatalog,
    root: ScopeId,
    segments: &[&str],
    visited: &mut HashSet<(ScopeId, String)>,
) -> Option<TypeTarget<'a>> {
    if !visited.insert((root, segments.join("."))) {
        return None;
    }
    if let Some(found) = lookup_path(catalog, root, segments) {
        return Some(found);
    }

    let (first, rest) = segments.split_first()?;
    for reexport in &catalog.scope(root).reexports {
        let Some(target) = reexport.target.as_deref().and_then(|p| catalog.file_root(p)) else {
            continue;
        };
        let found = match &reexport.names {
            ReExportNames::All => lookup_exported(catalog, target, segments, visited),
            ReExportNames::Named(pairs) => pairs
                .iter()
                .filter(|(_, exported)| exported == first)
                .find_map(|(local, _)| {
                    let mut path = vec![local.as_str()];
                    path.extend_from_slice(rest);
                    lookup_exported(catalog, target, &path, visited)
                }),
            ReExportNames::Namespace(name) if name == first && !rest.is_empty() => {
                lookup_exported(catalog, target, rest, visited)
            }
            ReExportNames::Namespace(_) => None,
        };
        if found.is_some() {
            return found;
        }
    }
    None
}
