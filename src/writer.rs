//! On-disk write step. Runs only after the whole batch rendered.
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Write `(path, text)` pairs, creating parent directories as needed.
pub fn write_outputs(rendered: &[(String, String)]) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(rendered.len());
    for (path, text) in rendered {
        let path = Path::new(path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        std::fs::write(path, text).map_err(|e| Error::io(path, e))?;
        tracing::debug!(path = %path.display(), bytes = text.len(), "wrote scheme file");
        written.push(path.to_path_buf());
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_schemes_directory() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("schemes/a.scheme.ts");
        let written = write_outputs(&[(target.to_string_lossy().into_owned(), "x\n".into())]).unwrap();
        assert_eq!(written, vec![target.clone()]);
        assert_eq!(std::fs::read_to_string(target).unwrap(), "x\n");
    }
}
