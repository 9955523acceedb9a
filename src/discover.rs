//! Input discovery for the CLI: walk a working directory and keep the files
//! a set of glob patterns selects.
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::settings::Settings;

pub const DEFAULT_PATTERN: &str = "*.ts";

/// Decides whether a discovered file is an input.
#[derive(Debug, Clone)]
pub struct FilePredicate {
    patterns: Vec<glob::Pattern>,
    generated_marker: String, // stem suffix of files we wrote ourselves
}

impl FilePredicate {
    /// Compile `patterns`; an empty list means [`DEFAULT_PATTERN`].
    pub fn new<I>(patterns: I, settings: &Settings) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut compiled = patterns
            .into_iter()
            .map(|raw| {
                let raw = raw.as_ref();
                glob::Pattern::new(raw).map_err(|source| Error::Glob { pattern: raw.to_string(), source })
            })
            .collect::<Result<Vec<_>>>()?;
        if compiled.is_empty() {
            compiled.push(glob::Pattern::new(DEFAULT_PATTERN).map_err(|source| Error::Glob {
                pattern: DEFAULT_PATTERN.to_string(),
                source,
            })?);
        }
        Ok(Self { patterns: compiled, generated_marker: format!(".{}", settings.scheme_infix) })
    }

    /// A file matches when any pattern matches its file name or its path
    /// relative to `root`. Generated files never match.
    pub fn matches(&self, root: &Path, path: &Path) -> bool {
        let Some(file_name) = path.file_name() else {
            return false;
        };
        let generated = path
            .file_stem()
            .is_some_and(|stem| stem.to_string_lossy().ends_with(&self.generated_marker));
        if generated {
            return false;
        }
        let relative = path.strip_prefix(root).unwrap_or(path);
        self.patterns
            .iter()
            .any(|p| p.matches_path(Path::new(file_name)) || p.matches_path(relative))
    }
}

/// Regular files under `root` accepted by `predicate`, in file-name order.
/// Subdirectories are entered only when `recursive` is set.
pub fn find_sources(root: &Path, recursive: bool, predicate: &FilePredicate) -> Result<Vec<PathBuf>> {
    let walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(if recursive { usize::MAX } else { 1 })
        .sort_by_file_name();

    let mut found = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|err| {
            let path = err.path().map_or_else(|| root.to_path_buf(), Path::to_path_buf);
            Error::io(path, std::io::Error::from(err))
        })?;
        if entry.file_type().is_file() && predicate.matches(root, entry.path()) {
            found.push(entry.into_path());
        }
    }
    tracing::debug!(root = %root.display(), recursive, files = found.len(), "discovered sources");
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn tree() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.ts"), "").unwrap();
        fs::write(dir.path().join("a.ts"), "").unwrap();
        fs::write(dir.path().join("notes.md"), "").unwrap();
        fs::create_dir_all(dir.path().join("nested/schemes")).unwrap();
        fs::write(dir.path().join("nested/c.ts"), "").unwrap();
        fs::write(dir.path().join("nested/schemes/c.scheme.ts"), "").unwrap();
        dir
    }

    fn names(root: &Path, paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn flat_walk_skips_subdirectories() {
        let dir = tree();
        let predicate = FilePredicate::new(Vec::<String>::new(), &Settings::default()).unwrap();
        let found = find_sources(dir.path(), false, &predicate).unwrap();
        assert_eq!(names(dir.path(), &found), ["a.ts", "b.ts"]);
    }

    #[test]
    fn recursive_walk_skips_generated_files() {
        let dir = tree();
        let predicate = FilePredicate::new(["*.ts"], &Settings::default()).unwrap();
        let found = find_sources(dir.path(), true, &predicate).unwrap();
        assert_eq!(names(dir.path(), &found), ["a.ts", "b.ts", "nested/c.ts"]);
    }

    #[test]
    fn relative_path_patterns() {
        let dir = tree();
        let predicate = FilePredicate::new(["nested/*.ts"], &Settings::default()).unwrap();
        let found = find_sources(dir.path(), true, &predicate).unwrap();
        assert_eq!(names(dir.path(), &found), ["nested/c.ts"]);
    }

    #[test]
    fn bad_glob_is_reported() {
        let err = FilePredicate::new(["[unclosed"], &Settings::default()).unwrap_err();
        assert_eq!(err.kind(), "glob");
    }

    #[test]
    fn missing_root_is_io_error() {
        let predicate = FilePredicate::new(["*.ts"], &Settings::default()).unwrap();
        let err = find_sources(Path::new("/no/such/dir/anywhere"), false, &predicate).unwrap_err();
        assert_eq!(err.kind(), "io");
    }
}
