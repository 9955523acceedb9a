//! Static table of primitive type names and the schema expressions they emit.
use indexmap::IndexMap;
use once_cell::sync::Lazy;

use crate::ir::{Import, Scheme};

pub const DATETIME_EXPR: &str = "z.string().datetime().transform(dt => DateTime.fromISO(dt))";

pub static PRIMITIVES: Lazy<IndexMap<&'static str, Scheme>> = Lazy::new(|| {
    let plain = |expr: &str| Scheme { expr: expr.to_string(), imports: Vec::new() };
    IndexMap::from([
        ("number", plain("z.number()")),
        ("string", plain("z.string()")),
        ("boolean", plain("z.boolean()")),
        ("any", plain("z.any()")),
        ("null", plain("z.null()")),
        ("undefined", plain("z.undefined()")),
        ("DateTime", Scheme {
            expr: DATETIME_EXPR.to_string(),
            imports: vec![Import::module(&["DateTime"], "luxon")],
        }),
    ])
});

pub fn is_primitive(name: &str) -> bool {
    PRIMITIVES.contains_key(name)
}

pub fn lookup(name: &str) -> Option<&'static Scheme> {
    PRIMITIVES.get(name)
}
