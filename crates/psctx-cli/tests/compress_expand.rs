//! # Compress → Expand Through Files
//!
//! Drives both subcommand handlers against on-disk documents the way the
//! `psctx` binary does, and checks that expansion restores the source.

use std::path::Path;

use psctx_cli::compress::{run_compress, CompressArgs};
use psctx_cli::expand::{expand, ExpandArgs};
use psctx_core::ContextOptions;
use serde_json::{json, Value};

const ID: &str = "https://schema.personaspace.com/identity#";
const LOC: &str = "https://schema.personaspace.com/location#";

fn person() -> Value {
    json!({
        format!("{ID}name"): "Eric L. Bentley",
        format!("{ID}emails"): ["#/~12345"],
        "~12345": "ebntly@example.com",
        format!("{ID}address"): {
            format!("{LOC}city"): "Hometown"
        }
    })
}

fn expand_args(input: &Path) -> ExpandArgs {
    ExpandArgs {
        input: input.to_path_buf(),
        context: None,
        root: None,
        out: None,
        strict_references: false,
    }
}

#[test]
fn combined_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("person.json");
    let compressed = dir.path().join("person.ctx.json");
    std::fs::write(&source, serde_json::to_string_pretty(&person()).unwrap()).unwrap();

    let args = CompressArgs {
        input: source,
        context: None,
        out: Some(compressed.clone()),
        context_out: None,
        seed: None,
    };
    assert_eq!(run_compress(&args, &ContextOptions::default()).unwrap(), 0);

    let expanded = expand(&expand_args(&compressed), &ContextOptions::default()).unwrap();
    let mut expected = person();
    expected[format!("{ID}emails")] = json!(["ebntly@example.com"]);
    assert_eq!(expanded, expected);
}

#[test]
fn yaml_source_with_split_context() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("person.yaml");
    let known = dir.path().join("known.json");
    let data_out = dir.path().join("data.json");
    let context_out = dir.path().join("context.json");

    std::fs::write(
        &source,
        format!("\"{ID}name\": Ann\n\"{LOC}city\": Hometown\n"),
    )
    .unwrap();
    std::fs::write(&known, format!(r#"{{"id:": "{ID}"}}"#)).unwrap();

    let args = CompressArgs {
        input: source,
        context: Some(known),
        out: Some(data_out.clone()),
        context_out: Some(context_out.clone()),
        seed: Some(1),
    };
    run_compress(&args, &ContextOptions::default()).unwrap();

    let data: Value = serde_json::from_str(&std::fs::read_to_string(&data_out).unwrap()).unwrap();
    assert_eq!(data["id:name"], json!("Ann"));

    let mut exp = expand_args(&data_out);
    exp.context = Some(context_out);
    let expanded = expand(&exp, &ContextOptions::default()).unwrap();
    assert_eq!(
        expanded,
        json!({format!("{ID}name"): "Ann", format!("{LOC}city"): "Hometown"})
    );
}
