//! # Expand Subcommand
//!
//! Resolves a contextualized document back to full schema URLs and
//! dereferences `#/<key>` references against the root document.
//!
//! The context comes from `--context`, or, when that is omitted, from the
//! `context` field of a combined `{data, context}` input as written by
//! `psctx compress`.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Args;
use serde_json::Value;

use psctx_core::{ContextOptions, DataContext, Resolver, RootLookup};

/// Arguments for the `psctx expand` subcommand.
#[derive(Args, Debug)]
pub struct ExpandArgs {
    /// Contextualized document (JSON or YAML; `-` for JSON on stdin).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Context to resolve with. Required unless INPUT is a combined
    /// `{data, context}` object.
    #[arg(long, value_name = "FILE")]
    pub context: Option<PathBuf>,

    /// Document to dereference `#/` references against. Defaults to the
    /// data being expanded.
    #[arg(long, value_name = "FILE")]
    pub root: Option<PathBuf>,

    /// Output path. Defaults to stdout.
    #[arg(long, short)]
    pub out: Option<PathBuf>,

    /// Substitute references whose target is `null`, `false`, `0`, or `""`
    /// instead of keeping the reference string.
    #[arg(long)]
    pub strict_references: bool,
}

/// Execute the expand subcommand.
pub fn run_expand(args: &ExpandArgs, options: &ContextOptions) -> Result<u8> {
    let expanded = expand(args, options)?;
    crate::write_json(&expanded, args.out.as_deref())?;
    Ok(0)
}

/// Load inputs and resolve without writing anything.
pub fn expand(args: &ExpandArgs, options: &ContextOptions) -> Result<Value> {
    let input = crate::read_document(&args.input)?;

    let DataContext { data, context } = match &args.context {
        Some(path) => DataContext {
            data: input,
            context: crate::read_context(path)?,
        },
        None => serde_json::from_value(input).with_context(|| {
            format!(
                "{} is not a {{data, context}} object; pass --context",
                args.input.display()
            )
        })?,
    };

    let lookup = if args.strict_references {
        RootLookup::Present
    } else {
        options.root_lookup
    };
    let resolver = Resolver::new(&context).with_lookup(lookup);

    let expanded = match &args.root {
        Some(path) => {
            let root = crate::read_document(path)?;
            resolver.resolve_with_root(&data, &root)
        }
        None => resolver.resolve(&data),
    };

    tracing::info!(
        input = %args.input.display(),
        tokens = context.len(),
        ?lookup,
        "expanded document"
    );

    Ok(expanded)
}
