//! # Contextualizer
//!
//! Rewrites a resource document so that every schema-qualified string
//! (`<namespace>#<property>`) becomes `<token>:<property>`, extending the
//! working context with a freshly generated token for each namespace not
//! yet mapped.
//!
//! ## Rewrite Rules
//!
//! 1. **String** — if `#` is absent or preceded by fewer than 3 characters
//!    the string is returned as-is (this covers `#/...` references and
//!    already-short strings). Otherwise it is split after the first `#`;
//!    a mapped namespace reuses its first-inserted token, an unmapped one
//!    gets a new token from the `TokenGenerator`.
//! 2. **Array** — elements rewritten in order.
//! 3. **Object** — two phases. All keys are rewritten first, building an
//!    intermediate object of new key → original value; then every value in
//!    that object is rewritten. A later key that collapses onto an earlier
//!    rewritten key replaces its value in place.
//! 4. **Anything else** — returned unchanged.
//!
//! The input document is never modified; a new tree is built.

use rand::rngs::StdRng;
use rand::Rng;
use serde_json::{Map, Value};

use crate::context::{Context, DataContext, TOKEN_SEPARATOR};
use crate::error::ContextError;
use crate::token::TokenGenerator;

/// Minimum number of characters that must precede `#` for a string to be
/// treated as schema-qualified.
pub const MIN_NAMESPACE_CHARS: usize = 3;

/// Split a schema-qualified string into `(namespace, property)`.
///
/// The namespace includes the `#`. Returns `None` for strings that are
/// left untouched by contextualization.
pub fn split_schema_string(s: &str) -> Option<(&str, &str)> {
    let idx = s.find('#')?;
    if s[..idx].chars().count() < MIN_NAMESPACE_CHARS {
        return None;
    }
    Some((&s[..=idx], &s[idx + 1..]))
}

/// Stateful tree walker that contextualizes values against one context.
///
/// Holds the context mutably for its whole lifetime, so no other writer can
/// touch it mid-walk. Newly generated mappings are recorded and available
/// through [`Contextualizer::discovered`].
pub struct Contextualizer<'a, R = StdRng> {
    context: &'a mut Context,
    tokens: &'a mut TokenGenerator<R>,
    discovered: Vec<(String, String)>,
}

impl<'a, R: Rng> Contextualizer<'a, R> {
    /// Walker over `context`, drawing new tokens from `tokens`.
    pub fn new(context: &'a mut Context, tokens: &'a mut TokenGenerator<R>) -> Self {
        Self {
            context,
            tokens,
            discovered: Vec::new(),
        }
    }

    /// Contextualize any value.
    ///
    /// # Errors
    ///
    /// Returns `ContextError::TokenSpaceExhausted` if a new namespace could
    /// not be assigned a token.
    pub fn contextualize(&mut self, value: &Value) -> Result<Value, ContextError> {
        match value {
            Value::String(s) => Ok(Value::String(self.contextualize_str(s)?)),
            Value::Array(items) => {
                let rewritten: Result<Vec<_>, _> =
                    items.iter().map(|item| self.contextualize(item)).collect();
                Ok(Value::Array(rewritten?))
            }
            Value::Object(map) => {
                let mut rewritten = Map::with_capacity(map.len());
                for (key, v) in map {
                    rewritten.insert(self.contextualize_str(key)?, v.clone());
                }
                for v in rewritten.values_mut() {
                    let original = std::mem::take(v);
                    *v = self.contextualize(&original)?;
                }
                Ok(Value::Object(rewritten))
            }
            Value::Null | Value::Bool(_) | Value::Number(_) => Ok(value.clone()),
        }
    }

    /// Contextualize a single string (a key or a leaf value).
    pub fn contextualize_str(&mut self, s: &str) -> Result<String, ContextError> {
        let Some((namespace, property)) = split_schema_string(s) else {
            return Ok(s.to_string());
        };

        if let Some(token_key) = self.context.token_for(namespace) {
            return Ok(format!("{token_key}{property}"));
        }

        let token = self.tokens.generate(self.context, namespace)?;
        self.discovered
            .push((format!("{token}{TOKEN_SEPARATOR}"), namespace.to_string()));
        tracing::trace!(input = s, %token, "contextualized new namespace");
        Ok(format!("{token}{TOKEN_SEPARATOR}{property}"))
    }

    /// Mappings added to the context by this walker, in discovery order.
    pub fn discovered(&self) -> &[(String, String)] {
        &self.discovered
    }

    /// Consume the walker and return the discovered mappings.
    pub fn into_discovered(self) -> Vec<(String, String)> {
        self.discovered
    }
}

/// Contextualize `value` against `context` using an entropy-seeded token
/// generator with default options.
pub fn contextualize(value: &Value, context: &mut Context) -> Result<Value, ContextError> {
    let mut tokens = TokenGenerator::from_entropy();
    Contextualizer::new(context, &mut tokens).contextualize(value)
}

/// Contextualize `data`, returning the rewritten document together with
/// the (possibly extended) context.
pub fn make_data_context(data: &Value, context: Context) -> Result<DataContext, ContextError> {
    let mut tokens = TokenGenerator::from_entropy();
    make_data_context_with(data, context, &mut tokens)
}

/// [`make_data_context`] with a caller-supplied token generator.
pub fn make_data_context_with<R: Rng>(
    data: &Value,
    mut context: Context,
    tokens: &mut TokenGenerator<R>,
) -> Result<DataContext, ContextError> {
    let initial = context.len();
    let mut walker = Contextualizer::new(&mut context, tokens);
    let data = walker.contextualize(data)?;
    let discovered = walker.into_discovered().len();

    tracing::debug!(
        initial_entries = initial,
        discovered,
        "contextualized document"
    );

    Ok(DataContext { data, context })
}
