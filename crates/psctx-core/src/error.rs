//! # Error Types
//!
//! Errors raised by the context engine. All errors use `thiserror` for
//! derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! Structural input never fails: unknown value kinds pass through and
//! unmapped tokens stay unresolved. The only runtime failure is the
//! token generator running out of retry budget for a namespace.

use thiserror::Error;

/// Top-level error type for context operations.
#[derive(Error, Debug)]
pub enum ContextError {
    /// No unused token could be drawn within the configured attempt budget.
    #[error("token space exhausted for namespace '{namespace}' after {attempts} attempts")]
    TokenSpaceExhausted {
        /// Namespace that needed a token.
        namespace: String,
        /// Number of draws made before giving up.
        attempts: u32,
    },

    /// An option value is out of range.
    #[error("invalid options: {0}")]
    Options(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
