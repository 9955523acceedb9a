//! Text form of an output file.
//!
//! ```text
//! import { A, B } from '<path>';
//! …
//!
//! export const XScheme = z.object({
//! 	…
//! });
//!
//! export const YScheme = …
//! ```
use crate::error::Result;
use crate::ir::{Import, OutputFile};
use crate::paths::PathResolver;
use crate::settings::Settings;

pub fn render(file: &OutputFile) -> Result<String> {
    render_with(file, &Settings::default())
}

pub fn render_with(file: &OutputFile, settings: &Settings) -> Result<String> {
    let resolver = PathResolver::new(settings);
    let mut out = String::new();

    for import in &file.imports {
        out.push_str(&import.render_line(&file.path, &resolver)?);
        out.push('\n');
    }
    if !file.imports.is_empty() {
        out.push('\n');
    }

    let blocks: Vec<&str> = file.models.iter().map(|m| m.raw.as_str()).collect();
    out.push_str(&blocks.join("\n\n"));
    out.push('\n');
    Ok(out)
}

impl Import {
    /// `import { a, b } from '<from>';`, rewriting relative imports against
    /// the file at `consumer_path`.
    pub fn render_line(&self, consumer_path: &str, resolver: &PathResolver) -> Result<String> {
        let from = if self.resolve_relative {
            resolver.import_path(consumer_path, &self.from)?
        } else {
            self.from.clone()
        };
        Ok(format!("import {{ {} }} from '{from}';", self.symbols.join(", ")))
    }
}
