//! Emits one `export const NameScheme = z.object({…});` block per record.
//!
//! The scheme registry starts with the primitive table and grows as records
//! are emitted, so records must arrive in dependency order (see `sort`).
use std::fmt::Write as _;

use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::ir::{EmittedField, EmittedModel, Import, ParsedField, ParsedModel, Scheme};
use crate::paths::PathResolver;
use crate::primitives;
use crate::settings::Settings;

pub struct Codegen {
    suffix: String,
    paths: PathResolver,
    records: IndexMap<String, Scheme>,
}

impl Default for Codegen {
    fn default() -> Self {
        Self::new()
    }
}

impl Codegen {
    pub fn new() -> Self {
        Self::with_settings(&Settings::default())
    }

    pub fn with_settings(settings: &Settings) -> Self {
        Self {
            suffix: settings.scheme_suffix.clone(),
            paths: PathResolver::new(settings),
            records: IndexMap::new(),
        }
    }

    /// Emit every model in order, registering each one as it goes.
    pub fn emit_all(&mut self, models: &[ParsedModel]) -> Result<Vec<EmittedModel>> {
        let emitted = models.iter().map(|m| self.emit(m)).collect::<Result<Vec<_>>>()?;
        tracing::info!(models = emitted.len(), "emitted schemes");
        Ok(emitted)
    }

    pub fn emit(&mut self, model: &ParsedModel) -> Result<EmittedModel> {
        let name = format!("{}{}", model.name, self.suffix);

        let fields = model
            .fields
            .iter()
            .map(|f| self.emit_field(&model.source_path, f))
            .collect::<Result<Vec<_>>>()?;
        let imports: Vec<Import> = fields.iter().flat_map(|f| f.imports.iter().cloned()).collect();

        let mut raw = format!("export const {name} = z.object({{\n");
        for field in &fields {
            let _ = writeln!(raw, "\t{}: {},", field.name, field.expr);
        }
        raw.push_str("});");

        // registered only now so a record never resolves itself
        self.records.insert(model.name.clone(), Scheme {
            expr: name.clone(),
            imports: vec![Import::relative(name.clone(), self.paths.scheme_base(&model.source_path))],
        });
        tracing::debug!(model = %model.name, scheme = %name, path = %model.source_path, "emitted scheme");

        Ok(EmittedModel {
            source_path: model.source_path.clone(),
            name,
            fields,
            raw,
            imports,
        })
    }

    /// Primitive table first, then records emitted so far.
    pub fn scheme(&self, type_name: &str) -> Result<&Scheme> {
        primitives::lookup(type_name)
            .or_else(|| self.records.get(type_name))
            .ok_or_else(|| Error::UnknownType { name: type_name.to_string() })
    }

    /// `nullable(array(a.or(b)…))`: union folds left, array wraps the union,
    /// nullable wraps everything.
    fn emit_field(&self, source_path: &str, field: &ParsedField) -> Result<EmittedField> {
        let Some((first, rest)) = field.types.split_first() else {
            return Err(Error::MalformedField {
                path: source_path.to_string(),
                field: field.name.clone(),
            });
        };

        let mut imports = Vec::new();
        let mut expr = String::new();
        if field.is_array {
            expr.push_str("z.array(");
        }

        let scheme = self.scheme(first)?;
        imports.extend(scheme.imports.iter().cloned());
        expr.push_str(&scheme.expr);

        for type_name in rest {
            let scheme = self.scheme(type_name)?;
            imports.extend(scheme.imports.iter().cloned());
            let _ = write!(expr, ".or({})", scheme.expr);
        }

        if field.is_array {
            expr.push(')');
        }
        if field.nullable {
            expr.push_str(".nullable()");
        }

        Ok(EmittedField { name: field.name.clone(), expr, imports })
    }
}
