//! Conformance tests: golden fixtures decoded and rendered to insta snapshots.
//!
//! Each test reads a hex fixture from `tests/golden/`, decodes it twice,
//! once through the static schema type and once through the equivalent
//! registered `SchemaNode`, and checks that:
//!
//! - the dynamic rendering matches the inline snapshot,
//! - the static and dynamic decodes agree,
//! - re-encoding the decoded value reproduces the fixture byte for byte.
//!
//! Fixtures are written by `src/bin/generate_golden.rs`. A snapshot diff
//! signals either a deliberate format change (accept via `cargo insta
//! review`) or a regression.

use std::path::Path;

use eterm_decoder::{Decode, Decoder, decode, decode_term};
use eterm_encoder::{Encode, Encoder, encode};
use eterm_types::{Atom, Binary, List, Map, SchemaNode, Term};
use insta::assert_snapshot;

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Read `tests/golden/<fixture>.hex` as raw bytes.
fn golden(fixture: &str) -> Vec<u8> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/golden")
        .join(format!("{fixture}.hex"));
    let text = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read golden fixture {}: {e}", path.display()));
    hex::decode(text.trim())
        .unwrap_or_else(|e| panic!("fixture {} is not hex: {e}", path.display()))
}

/// Decode a single-term fixture as `S`, check it against the dynamic
/// decoder and the encoder, and return the dynamic rendering.
fn check_single<S>(fixture: &str) -> String
where
    S: Decode + Encode,
{
    let bytes = golden(fixture);
    let value: S = decode(&bytes).unwrap_or_else(|e| panic!("{fixture}: {e}"));
    let term = decode_term(&bytes, &S::schema()).unwrap_or_else(|e| panic!("{fixture}: {e}"));

    assert!(term.conforms_to(&S::schema()), "{fixture}: term does not fit its schema");
    assert_eq!(encode(&value).unwrap(), bytes, "{fixture}: static re-encode differs");
    assert_eq!(encode(&term).unwrap(), bytes, "{fixture}: dynamic re-encode differs");
    term.to_string()
}

// ── Single-term fixtures ──────────────────────────────────────────────────────

#[test]
fn reply() {
    let rendered = check_single::<(i64, List<Atom>)>("reply");
    assert_snapshot!(rendered, @"{42,[ok,error]}");
}

#[test]
fn reply_static_fields() {
    let (n, names): (i64, List<Atom>) = decode(&golden("reply")).unwrap();
    assert_eq!(n, 42);
    assert_eq!(names.len(), 2);
    assert_eq!(names[0], "ok");
    assert_eq!(names[1], "error");
}

#[test]
fn scalars() {
    let rendered = check_single::<(i64, i64, i64, f64, String, Atom, Binary)>("scalars");
    assert_snapshot!(rendered, @r#"{-1,70000,1099511627776,3.25,"héllo",node@host,<<1,2,3>>}"#);
}

#[test]
fn nested_map() {
    let rendered = check_single::<Map<Atom, List<(i64, Binary)>>>("nested_map");
    assert_snapshot!(rendered, @"#{a => [{1,<<>>}],b => []}");
}

#[test]
fn nested_map_lookup() {
    let map: Map<Atom, List<(i64, Binary)>> = decode(&golden("nested_map")).unwrap();
    let entries = map.get("a").unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].0, 1);
    assert!(entries[0].1.is_empty());
    assert!(map.get("b").unwrap().is_empty());
    assert!(!map.contains_key("c"));
}

#[test]
fn empty_containers() {
    let rendered = check_single::<(List<i64>, Map<Atom, i64>, ())>("empty_containers");
    assert_snapshot!(rendered, @"{[],#{},{}}");
}

// ── Multi-term fixture ────────────────────────────────────────────────────────

#[test]
fn stream_static() {
    let bytes = golden("stream");
    let mut decoder = Decoder::new(&bytes).unwrap();
    let mut lists = Vec::new();
    while !decoder.is_exhausted() {
        lists.push(decoder.parse::<List<i64>>().unwrap().into_vec());
    }
    decoder.finish().unwrap();
    assert_eq!(lists, vec![vec![], vec![1], vec![256, -256]]);

    let mut encoder = Encoder::new();
    for list in &lists {
        encoder.encode(list);
    }
    assert_eq!(encoder.into_bytes().unwrap(), bytes);
}

#[test]
fn stream_dynamic() {
    let bytes = golden("stream");
    let schema: SchemaNode = "[integer]".parse().unwrap();
    let mut decoder = Decoder::new(&bytes).unwrap();
    let mut terms: Vec<Term> = Vec::new();
    while !decoder.is_exhausted() {
        terms.push(decoder.parse_dynamic(&schema).unwrap());
    }
    decoder.finish().unwrap();

    let rendered = terms
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n");
    assert_snapshot!(rendered, @r"
    []
    [1]
    [256,-256]
    ");
}

// ── Registered schemas ────────────────────────────────────────────────────────

#[test]
fn text_schemas_match_static_schemas() {
    let cases: [(&str, SchemaNode); 4] = [
        ("{integer, [atom]}", <(i64, List<Atom>)>::schema()),
        (
            "{int, int, int, float, string, atom, binary}",
            <(i64, i64, i64, f64, String, Atom, Binary)>::schema(),
        ),
        ("#{atom => [{integer, binary}]}", <Map<Atom, List<(i64, Binary)>>>::schema()),
        ("{[integer], #{atom => integer}, {}}", <(List<i64>, Map<Atom, i64>, ())>::schema()),
    ];
    for (text, expected) in cases {
        let parsed: SchemaNode = text.parse().unwrap();
        assert_eq!(parsed, expected, "{text}");
    }
}
