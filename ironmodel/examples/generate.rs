//! Generates an object model and prints it as JSON.
//!
//! Run with: cargo run --example generate -- <schema.json> [hints.json]
//!
//! Without arguments a small built-in schema is used.

use ironmodel::prelude::*;
use std::path::PathBuf;
use tracing::info;

const DEMO_SCHEMA: &str = r##"{
    "type": "object",
    "properties": {
        "version": { "type": "string" },
        "runs": { "type": "array", "items": { "$ref": "#/definitions/run" } }
    },
    "definitions": {
        "run": {
            "type": "object",
            "properties": {
                "tool": { "type": "string" },
                "properties": { "type": "object" },
                "level": { "enum": ["note", "warning", "error"] }
            }
        }
    }
}"##;

const DEMO_HINTS: &str = r#"{
    "*.properties": [ { "kind": "DictionaryHint" } ],
    "run.level": [ { "kind": "EnumHint", "arguments": { "typeName": "Level" } } ]
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let settings = GeneratorSettings::default()
        .generate_rewriting_visitor(true)
        .generate_equality_comparers(true);

    let mut args = std::env::args().skip(1);
    let types = match args.next() {
        Some(schema) => {
            let hints = args.next().map(PathBuf::from);
            generate_from_files(&PathBuf::from(schema), hints.as_deref(), &settings)?
        }
        None => generate_from_json(DEMO_SCHEMA, DEMO_HINTS, &settings)?,
    };
    info!(types = types.len(), "generation complete");

    let stdout = std::io::stdout();
    let mut emitter = JsonEmitter::new(stdout.lock()).pretty(true);
    emitter.emit(&types)?;
    println!();
    Ok(())
}
