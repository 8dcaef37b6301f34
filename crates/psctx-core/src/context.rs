//! # Context — Token to Namespace Mapping
//!
//! A `Context` maps short tokens (by convention ending in `:`) to full
//! schema namespaces (ending in `#`). It is threaded through both the
//! contextualizer, which extends it, and the resolver, which only reads it.
//!
//! ## Ordering
//!
//! Entries keep insertion order. Every lookup that can match more than one
//! entry (`token_for`, `prefix_match`) returns the first-inserted match, so
//! a context holding two tokens for one namespace always picks the older
//! token.
//!
//! ## Serde
//!
//! Serializes as a plain JSON object `{"id:": "https://.../identity#"}`
//! with entries in insertion order.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Separator appended to a bare token to form its context key.
pub const TOKEN_SEPARATOR: char = ':';

/// Insertion-ordered token → namespace mapping with unique tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    entries: Vec<(String, String)>,
}

impl Context {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a context from `(token, namespace)` pairs.
    ///
    /// A repeated token overwrites the earlier namespace in place.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut ctx = Self::new();
        for (token, namespace) in pairs {
            ctx.insert(token, namespace);
        }
        ctx
    }

    /// Map `token` to `namespace`, returning the previous namespace if the
    /// token was already present. Existing tokens keep their position.
    pub fn insert(&mut self, token: impl Into<String>, namespace: impl Into<String>) -> Option<String> {
        let token = token.into();
        let namespace = namespace.into();
        match self.entries.iter_mut().find(|(t, _)| *t == token) {
            Some((_, existing)) => Some(std::mem::replace(existing, namespace)),
            None => {
                self.entries.push((token, namespace));
                None
            }
        }
    }

    /// Namespace stored under `token`.
    pub fn get(&self, token: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(t, _)| t == token)
            .map(|(_, ns)| ns.as_str())
    }

    /// Returns true if `token` is a key of this context.
    pub fn contains_token(&self, token: &str) -> bool {
        self.entries.iter().any(|(t, _)| t == token)
    }

    /// First-inserted token whose namespace equals `namespace`.
    pub fn token_for(&self, namespace: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, ns)| ns == namespace)
            .map(|(t, _)| t.as_str())
    }

    /// First-inserted entry whose token is a prefix of `s`.
    pub fn prefix_match(&self, s: &str) -> Option<(&str, &str)> {
        self.entries
            .iter()
            .find(|(t, _)| s.starts_with(t.as_str()))
            .map(|(t, ns)| (t.as_str(), ns.as_str()))
    }

    /// Fold `(token, namespace)` pairs into this context.
    pub fn merge<I>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (token, namespace) in pairs {
            self.insert(token, namespace);
        }
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(t, ns)| (t.as_str(), ns.as_str()))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the context has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Context {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

impl IntoIterator for Context {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (token, namespace)) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{token} => {namespace}")?;
        }
        Ok(())
    }
}

/// Contextualized data together with the context it was built in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataContext {
    /// Document with namespaces replaced by tokens.
    pub data: Value,
    /// Every token the data may use, including newly generated ones.
    pub context: Context,
}

// ---------------------------------------------------------------------------
// Serde
// ---------------------------------------------------------------------------

impl Serialize for Context {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (token, namespace) in &self.entries {
            map.serialize_entry(token, namespace)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Context {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ContextVisitor;

        impl<'de> Visitor<'de> for ContextVisitor {
            type Value = Context;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping tokens to namespace strings")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Context, A::Error> {
                let mut ctx = Context::new();
                while let Some((token, namespace)) = access.next_entry::<String, String>()? {
                    ctx.insert(token, namespace);
                }
                Ok(ctx)
            }
        }

        deserializer.deserialize_map(ContextVisitor)
    }
}
