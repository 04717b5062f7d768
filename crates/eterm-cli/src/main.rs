/// eterm command-line tool: encode, decode, and validate buffers in the
/// external term format against a schema given on the command line.
///
/// # Command overview
///
/// ```text
/// eterm <COMMAND> [OPTIONS]
///
/// Commands:
///   encode     Convert JSON to terms and write a version-prefixed buffer
///   decode     Print every term in a buffer (term syntax or JSON)
///   validate   Check that a buffer decodes cleanly under a schema
///   help       Print help information
///
/// Global options:
///   -v, --verbose        Log decoder/encoder activity to stderr
///   --max-depth <N>      Nesting limit while decoding (default 256)
///   -h, --help           Print help
///   -V, --version        Print version
/// ```
///
/// # Schemas
///
/// `--schema` takes the text form of a schema, e.g. `'{integer, [atom]}'`
/// or `'#{atom => binary}'`. See `SchemaNode` in `eterm-types`.
///
/// # Exit codes
///
/// | Code | Meaning                                     |
/// |------|---------------------------------------------|
/// | 0    | Success                                     |
/// | 1    | Error (I/O failure, bad input, bad buffer)  |
///
/// All error details are written to stderr so stdout can be piped cleanly.
/// `RUST_LOG` overrides the log filter chosen by `--verbose`.
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use eterm_decoder::DecoderConfig;
use eterm_types::SchemaNode;
use tracing_subscriber::EnvFilter;

mod cmd_decode;
mod cmd_encode;
mod cmd_validate;
mod convert;

// ── CLI root ──────────────────────────────────────────────────────────────────

/// Encode, decode, and validate external term format buffers.
#[derive(Parser)]
#[command(name = "eterm", version, about = "External term format CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log session activity (debug level) to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Maximum compound nesting accepted while decoding.
    #[arg(long, global = true, default_value_t = DecoderConfig::DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// Convert a JSON document to terms and write the encoded buffer.
    Encode(EncodeArgs),
    /// Decode every term in a buffer and print it.
    Decode(DecodeArgs),
    /// Check that a buffer decodes completely under a schema.
    Validate(ValidateArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Arguments for `eterm encode`.
///
/// The JSON document is mapped onto the schema:
///
/// ```text
/// ┌──────────────┬──────────────────────────────────────────────────┐
/// │ Schema       │ JSON                                             │
/// ├──────────────┼──────────────────────────────────────────────────┤
/// │ integer      │ integral number                                  │
/// │ float        │ number                                           │
/// │ string, atom │ string                                           │
/// │ binary       │ hex string ("cafe")                              │
/// │ [T], {..}    │ array (tuples must have the exact length)        │
/// │ #{K => V}    │ object (string/atom keys) or array of [k, v]     │
/// └──────────────┴──────────────────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct EncodeArgs {
    /// Path to the JSON input.
    pub input: PathBuf,

    /// Schema of each encoded term.
    #[arg(short, long)]
    pub schema: SchemaNode,

    /// Write the buffer to this file instead of printing hex to stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Treat a top-level JSON array as a sequence of terms, one per element.
    #[arg(long)]
    pub many: bool,
}

/// Arguments for `eterm decode`.
///
/// Terms are read until the buffer is exhausted. Output is one term per
/// line, in term syntax (`{42,[ok,error]}`) or, with `--json`, using the
/// same JSON mapping as `encode`.
#[derive(clap::Args)]
pub struct DecodeArgs {
    /// Path to the encoded buffer.
    pub file: PathBuf,

    /// Schema of each term in the buffer.
    #[arg(short, long)]
    pub schema: SchemaNode,

    /// Print JSON instead of term syntax.
    #[arg(long)]
    pub json: bool,

    /// The file holds hex text rather than raw bytes.
    #[arg(long)]
    pub hex: bool,
}

/// Arguments for `eterm validate`.
#[derive(clap::Args)]
pub struct ValidateArgs {
    /// Path to the encoded buffer.
    pub file: PathBuf,

    /// Schema every term in the buffer must match.
    #[arg(short, long)]
    pub schema: SchemaNode,

    /// The file holds hex text rather than raw bytes.
    #[arg(long)]
    pub hex: bool,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = DecoderConfig::default().with_max_depth(cli.max_depth);
    let result = match cli.command {
        Commands::Encode(args) => cmd_encode::run(&args),
        Commands::Decode(args) => cmd_decode::run(&args, config),
        Commands::Validate(args) => cmd_validate::run(&args, config),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
