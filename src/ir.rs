// Strongly-typed IR shared by the parser, codegen and grouper.
use indexmap::IndexSet;
use serde::Serialize;

// ————————————————————————————————————————————————————————————————————————————
// PARSED (immutable after parsing)
// ————————————————————————————————————————————————————————————————————————————

/// One input file: its path plus its textual contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub path: String,
    pub contents: String,
}

impl Source {
    pub fn new(path: impl Into<String>, contents: impl Into<String>) -> Self {
        Self { path: path.into(), contents: contents.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedField {
    pub name: String,
    pub types: Vec<String>,          // non-empty, primitive or record names
    pub nullable: bool,
    pub is_array: bool,
    pub depends_on: IndexSet<String>, // the non-primitive subset of `types`
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedModel {
    pub name: String,
    pub source_path: String,
    pub fields: Vec<ParsedField>,
    pub depends_on: IndexSet<String>, // union of field deps, first-seen order
}

impl ParsedModel {
    /// Build a model, deriving `depends_on` from its fields.
    pub fn new(name: impl Into<String>, source_path: impl Into<String>, fields: Vec<ParsedField>) -> Self {
        let depends_on = fields
            .iter()
            .flat_map(|f| f.depends_on.iter().cloned())
            .collect();
        Self { name: name.into(), source_path: source_path.into(), fields, depends_on }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedFile {
    pub source_path: String,
    pub models: Vec<ParsedModel>,
}

// ————————————————————————————————————————————————————————————————————————————
// EMITTED
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Import {
    pub symbols: Vec<String>, // non-empty
    pub from: String,
    /// `from` is a scheme base that must be rewritten relative to the
    /// consuming output file at render time.
    pub resolve_relative: bool,
}

impl Import {
    pub fn module(symbols: &[&str], from: &str) -> Self {
        Self {
            symbols: symbols.iter().map(|s| s.to_string()).collect(),
            from: from.to_string(),
            resolve_relative: false,
        }
    }

    pub fn relative(symbol: impl Into<String>, from: impl Into<String>) -> Self {
        Self { symbols: vec![symbol.into()], from: from.into(), resolve_relative: true }
    }

    /// Name-level identity used for de-duplication inside one output file.
    pub fn leading_symbol(&self) -> Option<&str> {
        self.symbols.first().map(String::as_str)
    }
}

/// How a type is referred to in emitted code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scheme {
    pub expr: String,
    pub imports: Vec<Import>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmittedField {
    pub name: String,
    pub expr: String,
    pub imports: Vec<Import>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmittedModel {
    pub source_path: String,
    pub name: String,                // record name + suffix, e.g. `UserScheme`
    pub fields: Vec<EmittedField>,
    pub raw: String,                 // the full `export const …` declaration
    pub imports: Vec<Import>,        // duplicates tolerated until grouping
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputFile {
    pub path: String,
    pub imports: Vec<Import>,        // de-duplicated by leading symbol
    pub models: Vec<EmittedModel>,   // synthesis order
}
