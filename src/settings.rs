//! Settings for scheme generation.
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Knobs that control naming, placement and the emitted import form.
///
/// Loadable from a JSON file (camelCase keys); every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct Settings {
    /// Appended to each record name: `User` → `UserScheme`.
    pub scheme_suffix: String,

    /// Directory created next to each input for its generated file.
    pub schemes_dir: String,

    /// Infix between file stem and extension: `foo.ts` → `foo.scheme.ts`.
    pub scheme_infix: String,

    /// Compute relative imports from the consuming file path and turn the
    /// leading `../` into `./`. When false the path is taken from the
    /// consuming file's directory and prefixed with `./` when needed.
    ///
    /// **Default: true.**
    pub strip_leading_dot: bool,

    /// Start every generated file with `import { z } from 'zod';`.
    ///
    /// **Default: false.**
    pub zod_import: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scheme_suffix: "Scheme".to_string(),
            schemes_dir: "schemes".to_string(),
            scheme_infix: "scheme".to_string(),
            strip_leading_dot: true,
            zod_import: false,
        }
    }
}

impl Settings {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let de = &mut serde_json::Deserializer::from_str(&text);
        serde_path_to_error::deserialize(de).map_err(|err| {
            let at = err.path().to_string();
            Error::Config {
                path: path.to_path_buf(),
                message: format!("at JSON path {at} → {}", err.into_inner()),
            }
        })
    }
}
