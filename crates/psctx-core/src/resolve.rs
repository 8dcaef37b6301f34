//! # Resolver
//!
//! Expands contextualized data back to full schema URLs and dereferences
//! root-relative references.
//!
//! ## Rewrite Rules
//!
//! 1. **String** — `#/<key>` is looked up in the root document. Otherwise
//!    the first-inserted context token that prefixes the string is
//!    replaced by its namespace, keeping the suffix exactly. Strings with
//!    no matching token stay unresolved.
//! 2. **Array** — elements resolved in order.
//! 3. **Object** — all keys resolved first into an intermediate object,
//!    then all values, mirroring the contextualizer.
//! 4. **Anything else** — returned unchanged.
//!
//! The root is fixed by the outermost call and threaded unchanged through
//! every level of recursion. Resolution is read-only on both the context
//! and the input, so one `Context` can back any number of concurrent
//! resolves.

use serde_json::{Map, Value};

use crate::context::Context;
use crate::options::RootLookup;
use crate::reference::{is_root_reference, resolve_root_reference};

/// Read-only resolver bound to a context.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    context: &'a Context,
    lookup: RootLookup,
}

impl<'a> Resolver<'a> {
    /// Resolver over `context` with the default (truthy) root lookup.
    pub fn new(context: &'a Context) -> Self {
        Self {
            context,
            lookup: RootLookup::default(),
        }
    }

    /// Select how root references test for presence.
    pub fn with_lookup(mut self, lookup: RootLookup) -> Self {
        self.lookup = lookup;
        self
    }

    /// Resolve `value` using itself as the root document.
    pub fn resolve(&self, value: &Value) -> Value {
        self.resolve_with_root(value, value)
    }

    /// Resolve `value`, dereferencing `#/` references against `root`.
    pub fn resolve_with_root(&self, value: &Value, root: &Value) -> Value {
        match value {
            Value::String(s) => self.resolve_string(s, root),
            Value::Array(items) => Value::Array(
                items
                    .iter()
                    .map(|item| self.resolve_with_root(item, root))
                    .collect(),
            ),
            Value::Object(map) => {
                let mut resolved = Map::with_capacity(map.len());
                for (key, v) in map {
                    resolved.insert(self.resolve_key(key, root), v.clone());
                }
                for v in resolved.values_mut() {
                    let original = std::mem::take(v);
                    *v = self.resolve_with_root(&original, root);
                }
                Value::Object(resolved)
            }
            Value::Null | Value::Bool(_) | Value::Number(_) => value.clone(),
        }
    }

    /// Expand a token prefix, leaving unmatched strings as they are.
    pub fn expand_str(&self, s: &str) -> String {
        match self.context.prefix_match(s) {
            Some((token, namespace)) => format!("{namespace}{}", &s[token.len()..]),
            None => s.to_string(),
        }
    }

    fn resolve_string(&self, s: &str, root: &Value) -> Value {
        if is_root_reference(s) {
            return resolve_root_reference(s, root, self.lookup);
        }
        Value::String(self.expand_str(s))
    }

    /// Object keys go through the same string rules as values. A reference
    /// key that dereferences to a non-string cannot be a key, so the
    /// reference text is kept.
    fn resolve_key(&self, key: &str, root: &Value) -> String {
        match self.resolve_string(key, root) {
            Value::String(s) => s,
            other => {
                tracing::debug!(key, kind = value_kind(&other), "non-string root reference used as key");
                key.to_string()
            }
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Resolve `data` against `context`, using `data` as the root document.
pub fn resolve_data_context(data: &Value, context: &Context) -> Value {
    Resolver::new(context).resolve(data)
}

/// Resolve `data` against `context`, dereferencing references in `root`.
pub fn resolve_data_context_with_root(data: &Value, context: &Context, root: &Value) -> Value {
    Resolver::new(context).resolve_with_root(data, root)
}
