//! # Root-Relative References
//!
//! A string of the form `#/<key>` stands for "the value stored at
//! `root[<key>]`", where `root` is the outermost document handed to the
//! resolver. Reference strings are produced by document authors (e.g.
//! `"id:emails": ["#/~12345"]` with `"~12345"` at the top level) and pass
//! through contextualization untouched.
//!
//! Only one level of lookup is performed and the substituted value is
//! returned exactly as stored in root.

use serde_json::Value;

use crate::options::RootLookup;

/// Leading characters that mark a root-relative reference.
pub const ROOT_REFERENCE_PREFIX: &str = "#/";

/// Returns true if `s` is a root-relative reference.
pub fn is_root_reference(s: &str) -> bool {
    s.starts_with(ROOT_REFERENCE_PREFIX)
}

/// Dereference `reference` against `root`.
///
/// Object roots are looked up by key, array roots by canonical decimal
/// index. If the entry is missing, or counts as absent under `lookup`,
/// or `root` is a scalar, the reference string itself is returned.
pub fn resolve_root_reference(reference: &str, root: &Value, lookup: RootLookup) -> Value {
    let unchanged = || Value::String(reference.to_string());

    let Some(key) = reference.strip_prefix(ROOT_REFERENCE_PREFIX) else {
        return unchanged();
    };

    let entry = match root {
        Value::Object(map) => map.get(key),
        Value::Array(items) => key
            .parse::<usize>()
            .ok()
            .filter(|idx| idx.to_string() == key)
            .and_then(|idx| items.get(idx)),
        _ => None,
    };

    match entry {
        Some(value) if lookup == RootLookup::Present || is_truthy(value) => {
            tracing::trace!(key, "dereferenced root reference");
            value.clone()
        }
        _ => unchanged(),
    }
}

/// Truthiness of a JSON value: `null`, `false`, numeric zero, and `""` are
/// falsy; everything else, including empty arrays and objects, is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
