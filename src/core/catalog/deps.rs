//! Locating the files a loaded file depends on.

use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::core::parsers::typescript::ExtractedComments;

/// Extensions tried, in order, for an extension-less relative specifier.
const SOURCE_EXTENSIONS: &[&str] = &["ts", "tsx", "d.ts"];

/// `/// <reference path="..." />` or `/// <reference types="..." />`.
/// swc strips the leading `//`, so the comment text starts with `/`.
static REFERENCE_DIRECTIVE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^/\s*<reference\s+(path|types)\s*=\s*["']([^"']+)["']"#).unwrap()
});

/// How a dependency was reached, which decides its origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyKind {
    /// Relative import, re-export or `reference path`: same origin as the
    /// importing file.
    Relative,
    /// Bare specifier resolved through `node_modules`: always a library.
    Package,
}

/// A triple-slash reference found in a file's comments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceDirective {
    Path(String),
    Types(String),
}

/// Collect triple-slash reference directives, in source order.
pub fn reference_directives(comments: &ExtractedComments) -> Vec<ReferenceDirective> {
    let mut found: Vec<_> = comments
        .iter_all()
        .filter_map(|cmt| {
            let caps = REFERENCE_DIRECTIVE_REGEX.captures(cmt.text.trim_start())?;
            let value = caps[2].to_string();
            let directive = match &caps[1] {
                "path" => ReferenceDirective::Path(value),
                _ => ReferenceDirective::Types(value),
            };
            Some((cmt.span.lo, directive))
        })
        .collect();
    found.sort_by_key(|(pos, _)| *pos);
    found.into_iter().map(|(_, d)| d).collect()
}

/// Resolve a module specifier used in `current_file`.
///
/// `exists` decides whether a candidate path is loadable (on disk, or
/// already loaded from memory).
pub fn resolve_specifier(
    current_file: &Path,
    specifier: &str,
    exists: &dyn Fn(&Path) -> bool,
) -> Option<(PathBuf, DependencyKind)> {
    if specifier.starts_with('.') || specifier.starts_with('/') {
        return resolve_import_path(current_file, specifier, exists)
            .map(|p| (p, DependencyKind::Relative));
    }
    resolve_package_types(current_file, specifier, exists).map(|p| (p, DependencyKind::Package))
}

/// Resolve a relative import the way the TypeScript compiler does.
pub fn resolve_import_path(
    current_file: &Path,
    import_path: &str,
    exists: &dyn Fn(&Path) -> bool,
) -> Option<PathBuf> {
    let base_dir = current_file.parent()?;
    let resolved = clean_path(&base_dir.join(import_path));

    if has_source_extension(&resolved) && exists(&resolved) {
        return Some(resolved);
    }

    // `./user.js` in ESM-style TypeScript points at `./user.ts`.
    let stem = match resolved.to_string_lossy() {
        s if s.ends_with(".js") || s.ends_with(".jsx") => {
            PathBuf::from(s.trim_end_matches(".jsx").trim_end_matches(".js"))
        }
        _ => resolved.clone(),
    };

    for ext in SOURCE_EXTENSIONS {
        let with_ext = append_extension(&stem, ext);
        if exists(&with_ext) {
            return Some(with_ext);
        }
    }

    for ext in SOURCE_EXTENSIONS {
        let index_path = resolved.join(format!("index.{}", ext));
        if exists(&index_path) {
            return Some(index_path);
        }
    }

    None
}

/// Resolve a bare specifier to its type declarations in `node_modules`.
///
/// Tries `node_modules/<pkg>` (its `package.json` `types`/`typings`, then
/// `index.d.ts`) and `node_modules/@types/<pkg>` in every ancestor
/// directory of `current_file`.
pub fn resolve_package_types(
    current_file: &Path,
    specifier: &str,
    exists: &dyn Fn(&Path) -> bool,
) -> Option<PathBuf> {
    let types_name = match specifier.strip_prefix('@') {
        Some(scoped) => scoped.replacen('/', "__", 1),
        None => specifier.to_string(),
    };

    for dir in current_file.ancestors().skip(1) {
        let node_modules = dir.join("node_modules");
        if !node_modules.is_dir() {
            continue;
        }
        for candidate in [
            node_modules.join(specifier),
            node_modules.join("@types").join(&types_name),
        ] {
            if let Some(found) = package_entry(&candidate, exists) {
                return Some(found);
            }
        }
    }
    None
}

fn package_entry(package_dir: &Path, exists: &dyn Fn(&Path) -> bool) -> Option<PathBuf> {
    let dts = append_extension(package_dir, "d.ts");
    if exists(&dts) {
        return Some(dts);
    }
    if let Some(entry) = package_json_types(package_dir) {
        let entry = clean_path(&package_dir.join(entry));
        if exists(&entry) {
            return Some(entry);
        }
    }
    let index = package_dir.join("index.d.ts");
    exists(&index).then_some(index)
}

fn package_json_types(package_dir: &Path) -> Option<String> {
    let content = fs::read_to_string(package_dir.join("package.json")).ok()?;
    let manifest: serde_json::Value = serde_json::from_str(&content).ok()?;
    ["types", "typings"]
        .iter()
        .find_map(|key| manifest.get(key)?.as_str().map(str::to_string))
}

fn has_source_extension(path: &Path) -> bool {
    let name = path.to_string_lossy();
    name.ends_with(".ts") || name.ends_with(".tsx")
}

fn append_extension(path: &Path, ext: &str) -> PathBuf {
    PathBuf::from(format!("{}.{}", path.to_string_lossy(), ext))
}

/// Lexically normalize `.` and `..` components.
pub fn clean_path(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !cleaned.pop() {
                    cleaned.push("..");
                }
            }
            other => cleaned.push(other.as_os_str()),
        }
    }
    cleaned
}

/// Absolute, normalized key for a file path. Symlinks are resolved when the
/// file exists on disk.
pub fn normalize_path(path: &Path) -> PathBuf {
    if let Ok(canonical) = fs::canonicalize(path) {
        return canonical;
    }
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    clean_path(&absolute)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use super::*;
    use crate::core::parsers::typescript::parse_ts_source;

    fn in_memory(files: &[&str]) -> impl Fn(&Path) -> bool {
        let files: HashSet<PathBuf> = files.iter().map(PathBuf::from).collect();
        move |p: &Path| files.contains(p)
    }

    #[test]
    fn test_resolves_extensionless_relative_import() {
        let exists = in_memory(&["/src/models/user.ts"]);
        let found = resolve_import_path(Path::new("/src/api/a.ts"), "../models/user", &exists);
        assert_eq!(found, Some(PathBuf::from("/src/models/user.ts")));
    }

    #[test]
    fn test_dotted_file_names_keep_their_stem() {
        let exists = in_memory(&["/src/user.model.ts"]);
        let found = resolve_import_path(Path::new("/src/a.ts"), "./user.model", &exists);
        assert_eq!(found, Some(PathBuf::from("/src/user.model.ts")));
    }

    #[test]
    fn test_js_extension_maps_to_ts() {
        let exists = in_memory(&["/src/user.ts"]);
        let found = resolve_import_path(Path::new("/src/a.ts"), "./user.js", &exists);
        assert_eq!(found, Some(PathBuf::from("/src/user.ts")));
    }

    #[test]
    fn test_directory_index() {
        let exists = in_memory(&["/src/models/index.d.ts"]);
        let found = resolve_import_path(Path::new("/src/a.ts"), "./models", &exists);
        assert_eq!(found, Some(PathBuf::from("/src/models/index.d.ts")));
    }

    #[test]
    fn test_missing_relative_import() {
        let exists = in_memory(&[]);
        assert_eq!(resolve_import_path(Path::new("/src/a.ts"), "./nope", &exists), None);
    }

    #[test]
    fn test_package_types_from_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let pkg = dir.path().join("node_modules/geo");
        fs::create_dir_all(pkg.join("dist")).unwrap();
        fs::write(pkg.join("package.json"), r#"{"types": "dist/geo.d.ts"}"#).unwrap();
        fs::write(pkg.join("dist/geo.d.ts"), "export interface Point { x: number }").unwrap();

        let file = dir.path().join("src/a.ts");
        let found = resolve_specifier(&file, "geo", &|p: &Path| p.exists());
        assert_eq!(found, Some((pkg.join("dist/geo.d.ts"), DependencyKind::Package)));
    }

    #[test]
    fn test_scoped_package_falls_back_to_definitely_typed() {
        let dir = tempfile::tempdir().unwrap();
        let types = dir.path().join("node_modules/@types/acme__http");
        fs::create_dir_all(&types).unwrap();
        fs::write(types.join("index.d.ts"), "export interface Request {}").unwrap();

        let file = dir.path().join("a.ts");
        let found = resolve_package_types(&file, "@acme/http", &|p: &Path| p.exists());
        assert_eq!(found, Some(types.join("index.d.ts")));
    }

    #[test]
    fn test_reference_directives() {
        let source = r#"/// <reference path="./globals.d.ts" />
/// <reference types="node" />
// <reference path="ignored.d.ts" />
interface A {}
"#;
        let parsed = parse_ts_source(
            source.to_string(),
            "a.ts",
            Arc::new(swc_common::SourceMap::default()),
        )
        .unwrap();
        assert_eq!(
            reference_directives(&parsed.comments),
            vec![
                ReferenceDirective::Path("./globals.d.ts".to_string()),
                ReferenceDirective::Types("node".to_string()),
            ]
        );
    }

    #[test]
    fn test_clean_path() {
        assert_eq!(
            clean_path(Path::new("/a/b/./../c/d.ts")),
            PathBuf::from("/a/c/d.ts")
        );
    }
}
