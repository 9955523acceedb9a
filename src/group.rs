//! Buckets emitted schemes into one output file per input file.
use indexmap::IndexMap;

use crate::ir::{EmittedModel, Import, OutputFile};
use crate::paths::{self, PathResolver};
use crate::settings::Settings;

/// Group by source path, keeping synthesis order inside each file.
///
/// Imports are merged per file: an import pointing back at the file itself is
/// dropped, and so is any import whose leading symbol is already present.
/// The second rule is name-level only, so `{ A }` and `{ A, B }` collapse to
/// whichever came first.
pub fn group_models(models: Vec<EmittedModel>, settings: &Settings) -> Vec<OutputFile> {
    let resolver = PathResolver::new(settings);
    let mut files: IndexMap<String, OutputFile> = IndexMap::new();

    for model in models {
        let file = files.entry(model.source_path.clone()).or_insert_with(|| OutputFile {
            path: resolver.output_filename(&model.source_path),
            imports: if settings.zod_import { vec![zod_import()] } else { Vec::new() },
            models: Vec::new(),
        });
        let ext = paths::extension(&file.path);

        for import in &model.imports {
            if format!("{}{ext}", import.from) == file.path {
                tracing::trace!(path = %file.path, from = %import.from, "skipping self import");
                continue;
            }
            let seen = file
                .imports
                .iter()
                .any(|existing| existing.leading_symbol() == import.leading_symbol());
            if seen {
                tracing::trace!(path = %file.path, symbol = ?import.leading_symbol(), "skipping duplicate import");
                continue;
            }
            file.imports.push(import.clone());
        }

        file.models.push(model);
    }

    files.into_values().collect()
}

fn zod_import() -> Import {
    Import::module(&["z"], "zod")
}
