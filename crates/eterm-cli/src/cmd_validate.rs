/// Implementation of `eterm validate`.
///
/// Decodes every term in the buffer under `--schema` and reports either
/// a series of success checkmarks (`✓`) or a diagnostic failure line
/// (`✗`). The command exits with code 0 on a valid buffer and code 1 on
/// any error. A buffer holding only the version byte has no term to
/// check against the schema and is rejected.
///
/// # Success output
///
/// ```text
/// ✓ Envelope: version 131
/// ✓ Terms: 2 terms match {integer, [atom]}
/// ✓ Length: all 31 bytes consumed
/// ```
///
/// # Failure output
///
/// ```text
/// ✗ Error: type mismatch at offset 5: expected atom, found tag 97
/// ✗ Error: buffer holds no terms after the version byte
/// ```
use anyhow::{Result, anyhow, bail};
use eterm_decoder::DecoderConfig;
use eterm_types::SchemaNode;
use eterm_wire::header::VERSION_MAGIC;

use crate::ValidateArgs;
use crate::cmd_decode::{decode_all, read_payload};

/// Run the `eterm validate` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the buffer does not
/// decode completely under the schema.
pub fn run(args: &ValidateArgs, config: DecoderConfig) -> Result<()> {
    let bytes = read_payload(&args.file, args.hex)?;

    match validate(&bytes, &args.schema, config) {
        Ok(count) => {
            println!("✓ Envelope: version {VERSION_MAGIC}");
            println!(
                "✓ Terms: {count} term{} match {}",
                if count == 1 { "" } else { "s" },
                args.schema
            );
            println!("✓ Length: all {} bytes consumed", bytes.len());
            Ok(())
        }
        Err(e) => {
            println!("✗ Error: {e}");
            Err(anyhow!("validation failed"))
        }
    }
}

/// Count the terms in `bytes`, requiring at least one and every one to
/// match `schema`.
fn validate(bytes: &[u8], schema: &SchemaNode, config: DecoderConfig) -> Result<usize> {
    let terms = decode_all(bytes, schema, config)?;
    if terms.is_empty() {
        bail!("buffer holds no terms after the version byte");
    }
    Ok(terms.len())
}
