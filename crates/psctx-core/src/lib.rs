//! # psctx-core — Schema-URL Context Compression
//!
//! Resource documents identify every property by a fully-qualified schema
//! URL of the form `<namespace>#<property>`. This crate shortens such
//! documents by replacing each namespace with a short random token
//! (`id:name` instead of `https://schema.personaspace.com/identity#name`)
//! and records the token → namespace mapping in a [`Context`]. Resolution
//! is the inverse, and also dereferences root-relative references
//! (`#/<key>`) against the outermost document.
//!
//! ## Entry Points
//!
//! - [`make_data_context`] — contextualize a document, returning the new
//!   data and the extended context as a [`DataContext`].
//! - [`resolve_data_context`] — expand a contextualized document.
//!
//! ```
//! use psctx_core::{make_data_context, resolve_data_context, Context};
//! use serde_json::json;
//!
//! let data = json!({
//!     "https://ns.example/p#name": "Ann",
//!     "https://ns.example/p#email": "#/~9",
//!     "~9": "a@x.com"
//! });
//! let dc = make_data_context(&data, Context::new()).unwrap();
//! let expanded = resolve_data_context(&dc.data, &dc.context);
//! assert_eq!(expanded["https://ns.example/p#email"], "a@x.com");
//! ```
//!
//! ## Crate Policy
//!
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Inputs are never modified; every walk builds a new tree.
//! - The contextualizer takes `&mut Context`, so concurrent writers need
//!   external synchronization. The resolver only reads.

pub mod context;
pub mod contextualize;
pub mod error;
pub mod options;
pub mod reference;
pub mod resolve;
pub mod token;

// Re-export primary types for ergonomic imports.
pub use context::{Context, DataContext, TOKEN_SEPARATOR};
pub use contextualize::{
    contextualize, make_data_context, make_data_context_with, split_schema_string, Contextualizer,
};
pub use error::ContextError;
pub use options::{ContextOptions, RootLookup, TokenOptions};
pub use reference::{is_root_reference, resolve_root_reference, ROOT_REFERENCE_PREFIX};
pub use resolve::{resolve_data_context, resolve_data_context_with_root, Resolver};
pub use token::TokenGenerator;
