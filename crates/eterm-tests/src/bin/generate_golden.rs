//! Golden fixture generator for the conformance suite.
//!
//! Writes every fixture under `tests/golden/` as a hex text file holding
//! one encoder session's output. Run it after changing how the encoder
//! lays out terms, then review the diff of the `.hex` files.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin generate_golden -p eterm-tests
//! ```
//!
//! # Generated fixtures
//!
//! | File                  | Contents                                         |
//! |-----------------------|--------------------------------------------------|
//! | reply.hex             | `{42,[ok,error]}`                                |
//! | scalars.hex           | One tuple holding every scalar kind + a bignum   |
//! | nested_map.hex        | Map of atom to list of `{integer, binary}`       |
//! | stream.hex            | Three integer lists written back to back         |
//! | empty_containers.hex  | Empty list, map and tuple inside a tuple         |

#![allow(clippy::pedantic)]

use std::path::Path;

use eterm_encoder::Encoder;
use eterm_types::{Atom, Binary, List, Map};

fn main() {
    let manifest_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let golden_dir = manifest_dir.join("tests/golden");
    std::fs::create_dir_all(&golden_dir).expect("create golden dir");

    generate_reply(&golden_dir);
    generate_scalars(&golden_dir);
    generate_nested_map(&golden_dir);
    generate_stream(&golden_dir);
    generate_empty_containers(&golden_dir);

    println!("All golden fixtures written to {}", golden_dir.display());
}

fn write_fixture(dir: &Path, name: &str, encoder: Encoder) {
    let bytes = encoder.into_bytes().expect("fixture encodes cleanly");
    let path = dir.join(format!("{name}.hex"));
    std::fs::write(&path, format!("{}\n", hex::encode(&bytes))).expect("write fixture");
    println!("  {name}: {} bytes", bytes.len());
}

fn generate_reply(dir: &Path) {
    let mut encoder = Encoder::new();
    encoder.encode(&(42_i64, vec![Atom::from("ok"), Atom::from("error")]));
    write_fixture(dir, "reply", encoder);
}

fn generate_scalars(dir: &Path) {
    let mut encoder = Encoder::new();
    encoder.encode(&(
        -1_i64,
        70_000_i64,
        1_i64 << 40,
        3.25_f64,
        "héllo",
        Atom::from("node@host"),
        Binary::from(vec![1, 2, 3]),
    ));
    write_fixture(dir, "scalars", encoder);
}

fn generate_nested_map(dir: &Path) {
    let map: Map<Atom, List<(i64, Binary)>> = [
        (Atom::from("a"), vec![(1, Binary::default())].into()),
        (Atom::from("b"), List::new()),
    ]
    .into_iter()
    .collect();

    let mut encoder = Encoder::new();
    encoder.encode(&map);
    write_fixture(dir, "nested_map", encoder);
}

fn generate_stream(dir: &Path) {
    let mut encoder = Encoder::new();
    encoder
        .encode(&Vec::<i64>::new())
        .encode(&vec![1_i64])
        .encode(&vec![256_i64, -256]);
    write_fixture(dir, "stream", encoder);
}

fn generate_empty_containers(dir: &Path) {
    let mut encoder = Encoder::new();
    encoder.encode(&(Vec::<i64>::new(), Map::<Atom, i64>::new(), ()));
    write_fixture(dir, "empty_containers", encoder);
}
