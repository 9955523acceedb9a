//! Output placement and relative import paths between generated files.
//!
//! All computations are lexical; the filesystem is never consulted.
use std::path::{Component, Path};

use crate::error::{Error, Result};
use crate::settings::Settings;

#[derive(Debug, Clone)]
pub struct PathResolver {
    schemes_dir: String,
    scheme_infix: String,
    strip_leading_dot: bool,
}

impl Default for PathResolver {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

impl PathResolver {
    pub fn new(settings: &Settings) -> Self {
        Self {
            schemes_dir: settings.schemes_dir.clone(),
            scheme_infix: settings.scheme_infix.clone(),
            strip_leading_dot: settings.strip_leading_dot,
        }
    }

    /// `dir/foo.ts` → `dir/schemes/foo.scheme` (import form, no extension).
    pub fn scheme_base(&self, source_path: &str) -> String {
        let path = Path::new(source_path);
        let stem = path.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
        format!("{}/{}/{stem}.{}", dirname(path), self.schemes_dir, self.scheme_infix)
    }

    /// `dir/foo.ts` → `dir/schemes/foo.scheme.ts`.
    pub fn output_filename(&self, source_path: &str) -> String {
        let mut out = self.scheme_base(source_path);
        out.push_str(&extension(source_path));
        out
    }

    /// The `from` text for an import of `target_base` written into the file
    /// at `consumer_path`. The result always resolves against the
    /// consumer's directory.
    pub fn import_path(&self, consumer_path: &str, target_base: &str) -> Result<String> {
        if self.strip_leading_dot {
            // relative to the file itself, then `../x` → `./x`
            let rel = relative(consumer_path, target_base)?;
            Ok(if rel.starts_with("../") { rel[1..].to_string() } else { rel })
        } else {
            let consumer_dir = dirname(Path::new(consumer_path));
            let rel = relative(&consumer_dir, target_base)?;
            Ok(if rel.starts_with("../") { rel } else { format!("./{rel}") })
        }
    }
}

/// Extension of `path` including its dot, or empty.
pub fn extension(path: &str) -> String {
    Path::new(path)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}

/// Lexically clean a path: drop `.` segments and fold `dir/..` pairs.
///
/// Public helper for callers that resolve a rendered import back to the
/// generated file it names; the pipeline itself never needs it.
///
/// ```
/// use zodgen::PathResolver;
/// use zodgen::paths::normalize;
///
/// let from = PathResolver::default()
///     .import_path("b/schemes/b.scheme.ts", "a/schemes/a.scheme")
///     .unwrap();
/// assert_eq!(normalize(&format!("b/schemes/{from}")), "a/schemes/a.scheme");
/// ```
pub fn normalize(path: &str) -> String {
    let rooted = Path::new(path).has_root();
    let parts = segments(path);
    match (rooted, parts.is_empty()) {
        (true, _) => format!("/{}", parts.join("/")),
        (false, true) => ".".to_string(),
        (false, false) => parts.join("/"),
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn dirname(path: &Path) -> String {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            parent.to_string_lossy().trim_end_matches('/').to_string()
        }
        _ => ".".to_string(),
    }
}

/// Normal segments after cleaning. Leading `..` survive only on relative
/// paths; on rooted paths they collapse into the root.
fn segments(path: &str) -> Vec<String> {
    let rooted = Path::new(path).has_root();
    let mut out: Vec<String> = Vec::new();
    for component in Path::new(path).components() {
        match component {
            Component::Normal(part) => out.push(part.to_string_lossy().into_owned()),
            Component::ParentDir => match out.last() {
                Some(last) if last != ".." => {
                    out.pop();
                }
                _ if rooted => {}
                _ => out.push("..".to_string()),
            },
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }
    out
}

fn relative(base: &str, target: &str) -> Result<String> {
    let unrelated = || Error::UnrelatedPaths { base: base.to_string(), target: target.to_string() };

    if Path::new(base).has_root() != Path::new(target).has_root() {
        return Err(unrelated());
    }
    let base_parts = segments(base);
    let target_parts = segments(target);

    let common = base_parts
        .iter()
        .zip(&target_parts)
        .take_while(|(a, b)| a == b)
        .count();
    if base_parts[common..].iter().any(|p| p == "..") {
        return Err(unrelated());
    }

    let mut parts: Vec<&str> = vec![".."; base_parts.len() - common];
    parts.extend(target_parts[common..].iter().map(String::as_str));
    if parts.is_empty() {
        return Ok(".".to_string());
    }
    Ok(parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keep_dots() -> PathResolver {
        PathResolver::new(&Settings { strip_leading_dot: false, ..Settings::default() })
    }

    #[test]
    fn scheme_base_and_output_filename() {
        let r = PathResolver::default();
        assert_eq!(r.scheme_base("dir/foo.ts"), "dir/schemes/foo.scheme");
        assert_eq!(r.output_filename("dir/foo.ts"), "dir/schemes/foo.scheme.ts");
        assert_eq!(r.output_filename("a.ts"), "./schemes/a.scheme.ts");
        assert_eq!(r.output_filename("./a.ts"), "./schemes/a.scheme.ts");
        assert_eq!(r.output_filename("/abs/x/m.d.ts"), "/abs/x/schemes/m.d.scheme.ts");
        assert_eq!(r.output_filename("/m.tsx"), "/schemes/m.scheme.tsx");
    }

    #[test]
    fn custom_directory_and_infix() {
        let r = PathResolver::new(&Settings {
            schemes_dir: "zod".into(),
            scheme_infix: "schema".into(),
            ..Settings::default()
        });
        assert_eq!(r.output_filename("src/user.ts"), "src/zod/user.schema.ts");
    }

    #[test]
    fn sibling_file_import() {
        let r = PathResolver::default();
        let from = r.import_path("schemes/b.scheme.ts", "schemes/a.scheme").unwrap();
        assert_eq!(from, "./a.scheme");
        let from = keep_dots().import_path("schemes/b.scheme.ts", "schemes/a.scheme").unwrap();
        assert_eq!(from, "./a.scheme");
    }

    #[test]
    fn cross_directory_import() {
        let r = PathResolver::default();
        let from = r.import_path("b/schemes/b.scheme.ts", "a/schemes/a.scheme").unwrap();
        assert_eq!(from, "./../../a/schemes/a.scheme");
        let from = keep_dots().import_path("b/schemes/b.scheme.ts", "a/schemes/a.scheme").unwrap();
        assert_eq!(from, "../../a/schemes/a.scheme");
    }

    #[test]
    fn nested_directory_import() {
        let r = PathResolver::default();
        let from = r.import_path("x/schemes/x.scheme.ts", "x/y/schemes/y.scheme").unwrap();
        assert_eq!(from, "./../y/schemes/y.scheme");
        assert_eq!(
            normalize(&format!("x/schemes/{from}")),
            "x/y/schemes/y.scheme"
        );
    }

    #[test]
    fn mixed_rooted_and_relative_paths_fail() {
        let err = PathResolver::default()
            .import_path("/abs/schemes/a.scheme.ts", "rel/schemes/b.scheme")
            .unwrap_err();
        assert_eq!(err.kind(), "unrelated-paths");
    }

    #[test]
    fn normalize_folds_segments() {
        assert_eq!(normalize("a/./b/../c"), "a/c");
        assert_eq!(normalize("./x"), "x");
        assert_eq!(normalize("../x/.."), "..");
        assert_eq!(normalize("/r/../.."), "/");
        assert_eq!(normalize("a/.."), ".");
    }

    #[test]
    fn extension_keeps_dot() {
        assert_eq!(extension("a/b.ts"), ".ts");
        assert_eq!(extension("noext"), "");
    }
}
