/// Implementation of `eterm encode`.
///
/// Reads a JSON document, converts it to terms under `--schema` and
/// encodes them in one session, so the output is a single buffer with
/// one version byte followed by every term.
///
/// ```text
///   input.json ──parse──▶ Value ──schema──▶ Term ──Encoder──▶ 83 .. .. ..
/// ```
///
/// Without `--output` the buffer is printed to stdout as lowercase hex.
use std::fs;

use anyhow::{Context, Result};
use eterm_encoder::Encoder;
use serde_json::Value;

use crate::EncodeArgs;
use crate::convert;

/// Run the `eterm encode` command.
///
/// # Errors
///
/// Returns an error if the input cannot be read or parsed, a value does
/// not fit the schema, a term cannot be encoded, or the output cannot be
/// written.
pub fn run(args: &EncodeArgs) -> Result<()> {
    let text = fs::read_to_string(&args.input)
        .with_context(|| format!("cannot read {}", args.input.display()))?;
    let json: Value = serde_json::from_str(&text)
        .with_context(|| format!("{} is not valid JSON", args.input.display()))?;

    let values: Vec<&Value> = if args.many {
        json.as_array()
            .context("--many expects a top-level JSON array")?
            .iter()
            .collect()
    } else {
        vec![&json]
    };

    let mut encoder = Encoder::new();
    for (i, value) in values.iter().enumerate() {
        let term = convert::term_from_json(value, &args.schema)
            .with_context(|| format!("term #{i} does not match {}", args.schema))?;
        encoder.encode(&term);
    }
    let bytes = encoder.into_bytes().context("encoding failed")?;
    tracing::debug!(terms = values.len(), len = bytes.len(), "encoded buffer");

    match &args.output {
        Some(path) => {
            fs::write(path, &bytes)
                .with_context(|| format!("cannot write {}", path.display()))?;
            eprintln!(
                "wrote {} bytes ({} term{}) to {}",
                bytes.len(),
                values.len(),
                if values.len() == 1 { "" } else { "s" },
                path.display()
            );
        }
        None => println!("{}", hex::encode(&bytes)),
    }
    Ok(())
}
