//! Type Catalog: parsed source files, cached by absolute path.
//!
//! A file is parsed and lowered at most once per catalog. Loading a file
//! also loads everything it depends on (relative imports, re-exports,
//! triple-slash references and package type declarations), so later
//! lookups never touch the filesystem.
//!
//! The catalog is an explicit value owned by the caller of a run; build a
//! fresh one for isolated runs.

mod deps;
pub mod jsdoc;
mod lower;

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use swc_common::{SourceMap, SourceMapper};
use thiserror::Error;

pub use deps::{DependencyKind, clean_path, normalize_path};
use deps::{ReferenceDirective, reference_directives, resolve_package_types, resolve_specifier};
use lower::ScopeBuilder;

use crate::core::context::Logger;
use crate::core::parsers::typescript::parse_ts_source;
use crate::core::types::{
    Field, FileOrigin, InterfaceDeclaration, InterfaceId, ScopeId, ScopeKind, SourceScope,
    TypeTarget,
};
use crate::issues::ExpandWarning;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("{message}")]
    Parse { path: PathBuf, message: String },
}

#[derive(Debug, Error)]
#[error("{reason}")]
pub struct DocCommentError {
    pub reason: String,
}

/// Flat storage for scopes and interfaces of every loaded file.
#[derive(Debug, Default)]
pub struct Arena {
    scopes: Vec<SourceScope>,
    interfaces: Vec<InterfaceDeclaration>,
}

impl Arena {
    pub fn scope(&self, id: ScopeId) -> &SourceScope {
        &self.scopes[id.0]
    }

    pub fn scope_mut(&mut self, id: ScopeId) -> &mut SourceScope {
        &mut self.scopes[id.0]
    }

    pub fn push_scope(&mut self, scope: SourceScope) -> ScopeId {
        self.scopes.push(scope);
        ScopeId(self.scopes.len() - 1)
    }

    pub fn interface(&self, id: InterfaceId) -> &InterfaceDeclaration {
        &self.interfaces[id.0]
    }

    pub fn push_interface(&mut self, declaration: InterfaceDeclaration) -> InterfaceId {
        self.interfaces.push(declaration);
        InterfaceId(self.interfaces.len() - 1)
    }
}

#[derive(Debug)]
struct FileEntry {
    root: ScopeId,
    origin: FileOrigin,
    /// Relative dependencies, promoted together with the file.
    relative_deps: Vec<PathBuf>,
}

pub struct TypeCatalog {
    source_map: Arc<SourceMap>,
    arena: Arena,
    files: HashMap<PathBuf, FileEntry>,
    /// File roots in load order.
    load_order: Vec<ScopeId>,
}

impl Default for TypeCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeCatalog {
    pub fn new() -> Self {
        Self {
            source_map: Arc::new(SourceMap::default()),
            arena: Arena::default(),
            files: HashMap::new(),
            load_order: Vec::new(),
        }
    }

    /// Load `path` (and its dependencies) as a known, user-authored file.
    ///
    /// Returns the cached root scope when the file is already loaded.
    pub fn load_file(&mut self, path: &Path, logger: &dyn Logger) -> Result<ScopeId, CatalogError> {
        self.load(&normalize_path(path), None, FileOrigin::Known, logger)
    }

    /// Load in-memory source as if it were the file at `path`.
    pub fn load_source(
        &mut self,
        path: &Path,
        code: impl Into<String>,
        logger: &dyn Logger,
    ) -> Result<ScopeId, CatalogError> {
        self.load(
            &normalize_path(path),
            Some(code.into()),
            FileOrigin::Known,
            logger,
        )
    }

    fn load(
        &mut self,
        key: &Path,
        code: Option<String>,
        origin: FileOrigin,
        logger: &dyn Logger,
    ) -> Result<ScopeId, CatalogError> {
        if let Some(entry) = self.files.get(key) {
            let root = entry.root;
            if origin == FileOrigin::Known {
                self.promote(key);
            }
            return Ok(root);
        }

        let code = match code {
            Some(code) => code,
            None => read_source(key)?,
        };
        let file_name = key.to_string_lossy().to_string();
        let parsed = parse_ts_source(code, &file_name, self.source_map.clone()).map_err(|e| {
            CatalogError::Parse {
                path: key.to_path_buf(),
                message: e.to_string(),
            }
        })?;

        let kind = ScopeKind::File {
            path: key.to_path_buf(),
            is_module: false,
        };
        let root = self.arena.push_scope(SourceScope::new(kind, None, ScopeId(0)));
        self.arena.scope_mut(root).file = root;
        ScopeBuilder::new(&mut self.arena, root, &parsed.comments, self.source_map.clone())
            .lower(&parsed.module);

        self.files.insert(
            key.to_path_buf(),
            FileEntry {
                root,
                origin,
                relative_deps: Vec::new(),
            },
        );
        self.load_order.push(root);
        tracing::debug!(path = %key.display(), ?origin, "loaded source file");

        let dependencies = self.resolve_dependencies(key, root, &reference_directives(&parsed.comments));
        let relative_deps = dependencies
            .iter()
            .filter(|(_, kind)| *kind == DependencyKind::Relative)
            .map(|(path, _)| path.clone())
            .collect();
        if let Some(entry) = self.files.get_mut(key) {
            entry.relative_deps = relative_deps;
        }

        for (dep, kind) in dependencies {
            let dep_origin = match kind {
                DependencyKind::Relative => origin,
                DependencyKind::Package => FileOrigin::Library,
            };
            if let Err(err) = self.load(&dep, None, dep_origin, logger) {
                logger.warn(&ExpandWarning::DependencyLoad {
                    path: dep.clone(),
                    from: key.to_path_buf(),
                    reason: err.to_string(),
                });
            }
        }

        Ok(root)
    }

    /// Resolve import/re-export targets of a freshly lowered file and list
    /// the files to load next, without duplicates, in source order.
    fn resolve_dependencies(
        &mut self,
        key: &Path,
        root: ScopeId,
        references: &[ReferenceDirective],
    ) -> Vec<(PathBuf, DependencyKind)> {
        let files = &self.files;
        let exists = |p: &Path| files.contains_key(p) || p.is_file();
        let mut dependencies: Vec<(PathBuf, DependencyKind)> = Vec::new();
        let mut push = |dep: (PathBuf, DependencyKind)| {
            if !dependencies.iter().any(|(p, _)| *p == dep.0) {
                dependencies.push(dep);
            }
        };

        let locate = |specifier: &str| {
            resolve_specifier(key, specifier, &exists).map(|(p, kind)| (normalize_path(&p), kind))
        };

        let scope = self.arena.scope_mut(root);
        for import in &mut scope.imports {
            if let Some(dep) = locate(&import.specifier) {
                import.target = Some(dep.0.clone());
                push(dep);
            }
        }
        for reexport in &mut scope.reexports {
            if let Some(dep) = locate(&reexport.specifier) {
                reexport.target = Some(dep.0.clone());
                push(dep);
            }
        }
        for reference in references {
            let dep = match reference {
                ReferenceDirective::Path(path) => key
                    .parent()
                    .map(|dir| clean_path(&dir.join(path)))
                    .filter(|p| exists(p.as_path()))
                    .map(|p| (normalize_path(&p), DependencyKind::Relative)),
                ReferenceDirective::Types(name) => resolve_package_types(key, name, &exists)
                    .map(|p| (normalize_path(&p), DependencyKind::Package)),
            };
            if let Some(dep) = dep {
                push(dep);
            }
        }
        dependencies
    }

    /// Mark a library file (and its relative dependencies) as known.
    fn promote(&mut self, key: &Path) {
        let mut pending = vec![key.to_path_buf()];
        while let Some(path) = pending.pop() {
            let Some(entry) = self.files.get_mut(&path) else {
                continue;
            };
            if entry.origin == FileOrigin::Known {
                continue;
            }
            tracing::debug!(path = %path.display(), "promoted library file to known");
            entry.origin = FileOrigin::Known;
            pending.extend(entry.relative_deps.iter().cloned());
        }
    }

    /// True when `path` was loaded by a directive or as a relative
    /// dependency of one. Package declarations are loaded but not known.
    pub fn is_known_file(&self, path: &Path) -> bool {
        self.files
            .get(&normalize_path(path))
            .is_some_and(|entry| entry.origin == FileOrigin::Known)
    }

    /// [`Self::is_known_file`] for the file owning `scope`.
    pub fn is_known_scope(&self, scope: ScopeId) -> bool {
        self.files
            .get(self.file_path(scope))
            .is_some_and(|entry| entry.origin == FileOrigin::Known)
    }

    pub fn scope(&self, id: ScopeId) -> &SourceScope {
        self.arena.scope(id)
    }

    pub fn interface(&self, id: InterfaceId) -> &InterfaceDeclaration {
        self.arena.interface(id)
    }

    /// Root scope of an already loaded file.
    pub fn file_root(&self, path: &Path) -> Option<ScopeId> {
        self.files.get(path).map(|entry| entry.root)
    }

    /// Path of the file owning `scope`.
    pub fn file_path(&self, scope: ScopeId) -> &Path {
        let file = self.arena.scope(scope).file;
        match &self.arena.scope(file).kind {
            ScopeKind::File { path, .. } => path,
            ScopeKind::Namespace { .. } => Path::new(""),
        }
    }

    /// Number of loaded files.
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Loaded files without module syntax, whose declarations are global.
    pub fn global_scripts(&self) -> impl Iterator<Item = ScopeId> + '_ {
        self.load_order.iter().copied().filter(|root| {
            matches!(
                self.arena.scope(*root).kind,
                ScopeKind::File {
                    is_module: false,
                    ..
                }
            )
        })
    }

    /// `scope`, then each enclosing namespace, then the file root.
    pub fn lexical_chain(&self, scope: ScopeId) -> impl Iterator<Item = ScopeId> + '_ {
        std::iter::successors(Some(scope), |id| self.arena.scope(*id).parent)
    }

    /// Child namespace `name` of `scope`.
    pub fn namespace_in(&self, scope: ScopeId, name: &str) -> Option<ScopeId> {
        self.arena
            .scope(scope)
            .namespaces
            .iter()
            .copied()
            .find(|id| self.arena.scope(*id).name() == Some(name))
    }

    /// Interface `name` declared directly in `scope` (first match wins).
    pub fn interface_in(&self, scope: ScopeId, name: &str) -> Option<InterfaceId> {
        self.arena
            .scope(scope)
            .interfaces
            .iter()
            .copied()
            .find(|id| self.arena.interface(*id).name == name)
    }

    /// Any type declaration `name` directly in `scope`: interfaces first,
    /// then enums, then type aliases.
    pub fn target_in(&self, scope: ScopeId, name: &str) -> Option<TypeTarget<'_>> {
        if let Some(id) = self.interface_in(scope, name) {
            return Some(TypeTarget::Interface(id));
        }
        let source = self.arena.scope(scope);
        if source.enums.iter().any(|e| e == name) {
            return Some(TypeTarget::Enum);
        }
        source
            .aliases
            .iter()
            .find(|alias| alias.name == name)
            .map(|alias| TypeTarget::Alias { alias, scope })
    }

    /// Attached JSDoc text of `field`, several blocks joined with `,`.
    ///
    /// The text is read back from the source map by span.
    pub fn documentation(&self, field: &Field) -> Result<Option<String>, DocCommentError> {
        let mut blocks = Vec::new();
        for span in &field.docs {
            let raw = self
                .source_map
                .span_to_snippet(*span)
                .map_err(|err| DocCommentError {
                    reason: format!("{err:?}"),
                })?;
            let text = jsdoc::inner_text(&raw);
            if !text.is_empty() {
                blocks.push(text);
            }
        }
        Ok((!blocks.is_empty()).then(|| blocks.join(",")))
    }
}

fn read_source(path: &Path) -> Result<String, CatalogError> {
    fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => CatalogError::NotFound {
            path: path.to_path_buf(),
        },
        _ => CatalogError::Io {
            path: path.to_path_buf(),
            source,
        },
    })
}
