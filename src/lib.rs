//! Generate zod scheme files from TypeScript-style `interface` declarations.
//!
//! ```text
//! sources → parse → [ParsedModel] → sort → codegen → group → [OutputFile] → render
//! ```
//!
//! Each input `dir/foo.ts` yields `dir/schemes/foo.scheme.ts` holding one
//! `export const NameScheme = z.object({…});` per declared interface, with
//! imports between generated files rewritten relative to each other.
pub mod cli;
pub mod codegen;
pub mod discover;
pub mod error;
pub mod group;
pub mod ir;
pub mod parser;
pub mod paths;
pub mod primitives;
pub mod render;
pub mod settings;
pub mod sort;
pub mod writer;

pub use codegen::Codegen;
pub use error::{Error, Result};
pub use ir::{EmittedField, EmittedModel, Import, OutputFile, ParsedField, ParsedFile, ParsedModel, Scheme, Source};
pub use parser::{parse, read_sources};
pub use paths::PathResolver;
pub use render::{render, render_with};
pub use settings::Settings;

/// Translate parsed files with default settings.
pub fn convert(files: &[ParsedFile]) -> Result<Vec<OutputFile>> {
    convert_with(files, &Settings::default())
}

/// Sort every record across all files, emit schemes in that order, then
/// group them back into one output per input file.
pub fn convert_with(files: &[ParsedFile], settings: &Settings) -> Result<Vec<OutputFile>> {
    let models: Vec<ParsedModel> = files.iter().flat_map(|f| f.models.iter().cloned()).collect();
    let sorted = sort::sort_models(models)?;
    let emitted = Codegen::with_settings(settings).emit_all(&sorted)?;
    let outputs = group::group_models(emitted, settings);
    tracing::info!(outputs = outputs.len(), "grouped output files");
    Ok(outputs)
}

/// Full in-memory run: `(output path, rendered text)` per output file.
/// Either the whole batch succeeds or nothing is returned.
pub fn generate(sources: &[Source], settings: &Settings) -> Result<Vec<(String, String)>> {
    let parsed = parse(sources)?;
    convert_with(&parsed, settings)?
        .iter()
        .map(|file| Ok((file.path.clone(), render_with(file, settings)?)))
        .collect()
}
