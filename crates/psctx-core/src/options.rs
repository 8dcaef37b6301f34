//! # Options
//!
//! Tunables for token generation and root-reference lookup. Every field
//! has a default, so an empty YAML/JSON document deserializes to
//! `ContextOptions::default()`.

use serde::{Deserialize, Serialize};

use crate::error::ContextError;

/// How a root-relative reference (`#/<key>`) decides whether `root[<key>]`
/// exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RootLookup {
    /// Entries holding `null`, `false`, numeric zero, or `""` count as
    /// absent and the reference string is kept. Compatible with documents
    /// produced by existing tooling.
    #[default]
    Truthy,
    /// Any entry that exists is substituted, whatever its value.
    Present,
}

/// Token generator settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenOptions {
    /// Maximum token length. Draws that keep fewer letters yield shorter
    /// tokens; they are not padded.
    pub token_len: usize,
    /// Number of random base-36 digits rendered per draw before filtering
    /// to letters.
    pub draw_len: usize,
    /// Draws attempted before giving up with `TokenSpaceExhausted`.
    pub max_attempts: u32,
}

impl Default for TokenOptions {
    fn default() -> Self {
        Self {
            token_len: 3,
            draw_len: 11,
            max_attempts: 64,
        }
    }
}

impl TokenOptions {
    /// Reject settings under which no token could ever be produced.
    pub fn validate(&self) -> Result<(), ContextError> {
        if self.token_len == 0 {
            return Err(ContextError::Options("token_len must be at least 1".into()));
        }
        if self.draw_len == 0 {
            return Err(ContextError::Options("draw_len must be at least 1".into()));
        }
        if self.max_attempts == 0 {
            return Err(ContextError::Options("max_attempts must be at least 1".into()));
        }
        Ok(())
    }
}

/// Combined options for a contextualize/resolve session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextOptions {
    /// Token generator settings.
    pub token: TokenOptions,
    /// Root-reference lookup mode used when resolving.
    pub root_lookup: RootLookup,
}

impl ContextOptions {
    /// Validate all nested settings.
    pub fn validate(&self) -> Result<(), ContextError> {
        self.token.validate()
    }
}
