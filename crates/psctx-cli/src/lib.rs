//! # psctx-cli — Context Compression on the Command Line
//!
//! Provides the `psctx` binary over `psctx-core`.
//!
//! ## Subcommands
//!
//! - `psctx compress` — contextualize a JSON/YAML document.
//! - `psctx expand` — resolve a contextualized document.
//!
//! ```bash
//! psctx compress person.json --context known.json --out person.ctx.json
//! psctx expand person.ctx.json
//! psctx expand data.json --context ctx.json --strict-references
//! ```
//!
//! ## Crate Policy
//!
//! - Argument parsing lives here; all rewriting is delegated to `psctx-core`.
//! - Documents go to stdout (or `--out`); logs go to stderr.

pub mod compress;
pub mod expand;

use std::io::Read;
use std::path::Path;

use anyhow::{Context as _, Result};
use serde::Serialize;
use serde_json::Value;

use psctx_core::{Context, ContextOptions};

/// Path argument that stands for stdin/stdout.
pub const STDIO_PATH: &str = "-";

/// Load session options from an optional YAML file.
///
/// A missing path yields the defaults. The loaded options are validated.
pub fn load_options(path: Option<&Path>) -> Result<ContextOptions> {
    let options = match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config file: {}", path.display()))?;
            if content.trim().is_empty() {
                ContextOptions::default()
            } else {
                serde_yaml::from_str(&content)
                    .with_context(|| format!("failed to parse config YAML: {}", path.display()))?
            }
        }
        None => ContextOptions::default(),
    };
    options
        .validate()
        .context("invalid configuration")?;
    tracing::debug!(?options, "loaded options");
    Ok(options)
}

/// Read a document from `path`.
///
/// `.yaml`/`.yml` files are parsed as YAML, everything else as JSON.
/// `-` reads JSON from stdin.
pub fn read_document(path: &Path) -> Result<Value> {
    if path == Path::new(STDIO_PATH) {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("failed to read stdin")?;
        return serde_json::from_str(&content).context("failed to parse JSON from stdin");
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read file: {}", path.display()))?;

    if is_yaml(path) {
        serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse YAML: {}", path.display()))
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse JSON: {}", path.display()))
    }
}

/// Read a token → namespace context document.
pub fn read_context(path: &Path) -> Result<Context> {
    let value = read_document(path)?;
    serde_json::from_value(value)
        .with_context(|| format!("not a token-to-namespace object: {}", path.display()))
}

/// Write `value` as pretty JSON to `path`, or stdout when `path` is `None`
/// or `-`.
pub fn write_json(value: &impl Serialize, path: Option<&Path>) -> Result<()> {
    let mut text = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    text.push('\n');

    match path {
        Some(path) if path != Path::new(STDIO_PATH) => {
            std::fs::write(path, text)
                .with_context(|| format!("failed to write file: {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote output");
        }
        _ => print!("{text}"),
    }
    Ok(())
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}
