//! # Compress Subcommand
//!
//! Contextualizes a document: every schema URL's namespace is replaced by
//! a short token, and the token → namespace mapping is emitted alongside
//! the data. A starting context can be supplied so that well-known
//! namespaces keep their familiar tokens.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use rand::rngs::StdRng;
use rand::SeedableRng;

use psctx_core::{make_data_context_with, Context, ContextOptions, DataContext, TokenGenerator};

/// Arguments for the `psctx compress` subcommand.
#[derive(Args, Debug)]
pub struct CompressArgs {
    /// Document to compress (JSON or YAML; `-` for JSON on stdin).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Starting context (token → namespace object).
    #[arg(long, value_name = "FILE")]
    pub context: Option<PathBuf>,

    /// Output path for the data (or the combined object). Defaults to stdout.
    #[arg(long, short)]
    pub out: Option<PathBuf>,

    /// Write the context to this file and the bare data to `--out`,
    /// instead of one combined `{data, context}` object.
    #[arg(long, value_name = "FILE")]
    pub context_out: Option<PathBuf>,

    /// Seed the token generator for reproducible tokens.
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Execute the compress subcommand.
pub fn run_compress(args: &CompressArgs, options: &ContextOptions) -> Result<u8> {
    let result = compress(args, options)?;

    match &args.context_out {
        Some(context_path) => {
            crate::write_json(&result.context, Some(context_path.as_path()))?;
            crate::write_json(&result.data, args.out.as_deref())?;
        }
        None => crate::write_json(&result, args.out.as_deref())?,
    }

    Ok(0)
}

/// Load inputs and contextualize without writing anything.
pub fn compress(args: &CompressArgs, options: &ContextOptions) -> Result<DataContext> {
    let data = crate::read_document(&args.input)?;
    let context = match &args.context {
        Some(path) => crate::read_context(path)?,
        None => Context::new(),
    };

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut tokens = TokenGenerator::with_rng(rng, options.token.clone())?;

    let initial = context.len();
    let result = make_data_context_with(&data, context, &mut tokens)?;

    tracing::info!(
        input = %args.input.display(),
        known = initial,
        generated = result.context.len() - initial,
        "compressed document"
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::path::Path;

    const ID: &str = "https://schema.personaspace.com/identity#";
    const TEST: &str = "https://example.com/schema/test#";

    fn args(input: &Path) -> CompressArgs {
        CompressArgs {
            input: input.to_path_buf(),
            context: None,
            out: None,
            context_out: None,
            seed: Some(5),
        }
    }

    fn write(dir: &Path, name: &str, value: &Value) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, serde_json::to_string(value).unwrap()).unwrap();
        path
    }

    #[test]
    fn compress_with_starting_context() {
        let dir = tempfile::tempdir().unwrap();
        let input = write(
            dir.path(),
            "doc.json",
            &json!({format!("{ID}name"): "Ann", format!("{TEST}word"): "hi"}),
        );
        let ctx = write(dir.path(), "ctx.json", &json!({"id:": ID}));

        let mut a = args(&input);
        a.context = Some(ctx);
        let result = compress(&a, &ContextOptions::default()).unwrap();

        assert_eq!(result.data["id:name"], json!("Ann"));
        assert_eq!(result.context.len(), 2);
        let token = result.context.token_for(TEST).unwrap();
        assert_eq!(result.data[format!("{token}word")], json!("hi"));
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let dir = tempfile::tempdir().unwrap();
        let input = write(dir.path(), "doc.json", &json!({format!("{TEST}word"): "hi"}));

        let first = compress(&args(&input), &ContextOptions::default()).unwrap();
        let second = compress(&args(&input), &ContextOptions::default()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn run_compress_writes_split_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let input = write(dir.path(), "doc.json", &json!({format!("{ID}name"): "Ann"}));
        let data_out = dir.path().join("data.json");
        let ctx_out = dir.path().join("context.json");

        let mut a = args(&input);
        a.out = Some(data_out.clone());
        a.context_out = Some(ctx_out.clone());
        assert_eq!(run_compress(&a, &ContextOptions::default()).unwrap(), 0);

        let data: Value = serde_json::from_str(&std::fs::read_to_string(&data_out).unwrap()).unwrap();
        let ctx: Context = serde_json::from_str(&std::fs::read_to_string(&ctx_out).unwrap()).unwrap();
        let token = ctx.token_for(ID).unwrap();
        assert_eq!(data[format!("{token}name")], json!("Ann"));
    }

    #[test]
    fn run_compress_writes_combined_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = write(dir.path(), "doc.json", &json!({format!("{ID}name"): "Ann"}));
        let out = dir.path().join("out.json");

        let mut a = args(&input);
        a.out = Some(out.clone());
        run_compress(&a, &ContextOptions::default()).unwrap();

        let combined: DataContext =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(combined.context.len(), 1);
    }

    #[test]
    fn missing_input_is_an_error() {
        let err = compress(&args(Path::new("/nonexistent/doc.json")), &ContextOptions::default())
            .unwrap_err();
        assert!(err.to_string().contains("failed to read file"));
    }
}
