/// Implementation of `eterm decode`.
///
/// Opens one decoder session over the whole buffer and reads terms under
/// `--schema` until no bytes remain, printing one term per line.
///
/// # Output
///
/// ```text
/// $ eterm decode reply.bin --schema '{integer, [atom]}'
/// {42,[ok,error]}
///
/// $ eterm decode reply.bin --schema '{integer, [atom]}' --json
/// [42,["ok","error"]]
/// ```
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use eterm_decoder::{DecodeError, Decoder, DecoderConfig};
use eterm_types::{SchemaNode, Term};

use crate::DecodeArgs;
use crate::convert;

/// Run the `eterm decode` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or any term fails to decode.
pub fn run(args: &DecodeArgs, config: DecoderConfig) -> Result<()> {
    let bytes = read_payload(&args.file, args.hex)?;
    let terms = decode_all(&bytes, &args.schema, config)
        .with_context(|| format!("cannot decode {}", args.file.display()))?;

    for term in &terms {
        if args.json {
            println!("{}", serde_json::to_string(&convert::term_to_json(term))?);
        } else {
            println!("{term}");
        }
    }
    Ok(())
}

/// Read an encoded buffer, either raw or as hex text.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid hex.
pub fn read_payload(path: &Path, hex: bool) -> Result<Vec<u8>> {
    let raw = fs::read(path).with_context(|| format!("cannot read {}", path.display()))?;
    if !hex {
        return Ok(raw);
    }
    let text = String::from_utf8(raw)
        .with_context(|| format!("{} is not hex text", path.display()))?;
    let digits: String = text.split_whitespace().collect();
    hex::decode(digits).with_context(|| format!("{} is not hex text", path.display()))
}

/// Decode successive top-level terms until the buffer is exhausted.
///
/// # Errors
///
/// The first [`DecodeError`] raised by the session.
pub fn decode_all(
    bytes: &[u8],
    schema: &SchemaNode,
    config: DecoderConfig,
) -> Result<Vec<Term>, DecodeError> {
    let mut decoder = Decoder::with_config(bytes, config)?;
    let mut terms = Vec::new();
    while !decoder.is_exhausted() {
        terms.push(decoder.parse_dynamic(schema)?);
    }
    tracing::debug!(terms = terms.len(), "decoded buffer");
    Ok(terms)
}
