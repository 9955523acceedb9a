//! Regex-grade extraction of `interface Name { field: type; … }` declarations.
//!
//! Not a type-syntax parser: it accepts the small dialect used for
//! data-transfer objects and ignores everything outside interface blocks.
//!
//! - The pattern admits one nested `{…}` pair so such blocks are reported as
//!   malformed interfaces instead of being skipped; deeper nesting never matches.
//! - Fields are separated by `;`, newline, or `;` + newline.
//! - A field is `name[?]: type[|type…][[]]`.
use std::path::Path;

use indexmap::IndexSet;
use once_cell::sync::Lazy;
use rayon::prelude::*;
use regex::{Captures, Regex};

use crate::error::{Error, Result};
use crate::ir::{ParsedField, ParsedFile, ParsedModel, Source};
use crate::primitives;

static INTERFACE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"interface\s+(\w+)\s*\{\s*([^{}]+(\{\s*[^{}]+\}\s*)?[^{}]+)*\}\s*")
        .expect("interface regex")
});

static SEPARATOR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r";\n|[;\n]").expect("separator regex"));

// ————————————————————————————————————————————————————————————————————————————
// ENTRY POINTS
// ————————————————————————————————————————————————————————————————————————————

/// Read every path in full. The returned sources keep the caller's spelling
/// of each path, which later drives output placement.
pub fn read_sources<I>(paths: I) -> Result<Vec<Source>>
where
    I: IntoIterator,
    I::Item: AsRef<Path>,
{
    paths
        .into_iter()
        .map(|path| {
            let path = path.as_ref();
            let contents = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
            Ok(Source::new(path.to_string_lossy(), contents))
        })
        .collect()
}

/// Parse independent sources in parallel; output order follows input order.
/// When several sources fail, the error of the earliest one is returned.
pub fn parse(sources: &[Source]) -> Result<Vec<ParsedFile>> {
    let outcomes: Vec<Result<ParsedFile>> = sources.par_iter().map(parse_source).collect();
    let files = outcomes.into_iter().collect::<Result<Vec<_>>>()?;
    tracing::info!(
        files = files.len(),
        models = files.iter().map(|f| f.models.len()).sum::<usize>(),
        "parsed sources"
    );
    Ok(files)
}

pub fn parse_source(source: &Source) -> Result<ParsedFile> {
    let models = INTERFACE_RE
        .captures_iter(&source.contents)
        .map(|caps| parse_interface(&source.path, &caps))
        .collect::<Result<Vec<_>>>()?;
    tracing::debug!(path = %source.path, models = models.len(), "parsed source");
    Ok(ParsedFile { source_path: source.path.clone(), models })
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

/// The name comes from the capture group; the body is everything between the
/// first `{` after the name and the last `}` of the match. A body that still
/// holds braces (the one nested pair the pattern admits) is rejected here.
fn parse_interface(path: &str, caps: &Captures<'_>) -> Result<ParsedModel> {
    let matched = caps.get(0).map_or("", |m| m.as_str());
    let malformed = |reason: &str| Error::MalformedInterface {
        path: path.to_string(),
        reason: format!("{reason} in `{}`", matched.trim()),
    };

    let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
        return Err(malformed("missing name"));
    };
    let after_name = &matched[name.end() - whole.start()..];
    let (_, rest) = after_name.split_once('{').ok_or_else(|| malformed("missing `{`"))?;
    let (body, _) = rest.rsplit_once('}').ok_or_else(|| malformed("missing `}`"))?;
    if body.contains(['{', '}']) {
        return Err(malformed("nested object literal"));
    }

    let fields = split_instructions(body)
        .into_iter()
        .map(|line| parse_field(path, line))
        .collect::<Result<Vec<_>>>()?;

    Ok(ParsedModel::new(name.as_str(), path, fields))
}

fn split_instructions(text: &str) -> Vec<&str> {
    SEPARATOR_RE
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_field(path: &str, line: &str) -> Result<ParsedField> {
    let malformed = || Error::MalformedField { path: path.to_string(), field: line.to_string() };

    let mut halves = line.split(':');
    let (Some(name), Some(ty), None) = (halves.next(), halves.next(), halves.next()) else {
        return Err(malformed());
    };

    let name = name.trim();
    let (name, nullable) = match name.strip_suffix('?') {
        Some(stripped) => (stripped.trim(), true),
        None => (name, false),
    };

    let ty = ty.trim();
    let (ty, is_array) = match ty.strip_suffix("[]") {
        Some(stripped) => (stripped, true),
        None => (ty, false),
    };

    let types: Vec<String> = ty.split('|').map(|t| t.trim().to_string()).collect();
    if name.is_empty() || types.iter().any(String::is_empty) {
        return Err(malformed());
    }

    let depends_on: IndexSet<String> = types
        .iter()
        .filter(|t| !primitives::is_primitive(t))
        .cloned()
        .collect();

    Ok(ParsedField { name: name.to_string(), types, nullable, is_array, depends_on })
}
