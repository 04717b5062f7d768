//! End-to-end tests: values written by one encoder session and read back
//! by one decoder session, through both static types and registered schemas.

use std::collections::{BTreeMap, HashMap, VecDeque};

use eterm_decoder::{Decode, Decoder, decode, decode_term};
use eterm_encoder::{Encoder, encode};
use eterm_types::{Atom, Binary, List, Map, SchemaNode, Term};

// ── Helpers ───────────────────────────────────────────────────────────────────

type Record = (Atom, i64, f64, String, Binary);

fn record(n: i64) -> Record {
    (
        Atom::new(format!("rec_{n}")),
        n * 1_000_003,
        n as f64 / 4.0,
        format!("entry #{n}"),
        Binary::from(n.to_be_bytes().to_vec()),
    )
}

// ── Static schemas ────────────────────────────────────────────────────────────

#[test]
fn list_of_records() {
    let records: List<Record> = (-50..50).map(record).collect();
    let bytes = encode(&records).unwrap();
    let back: List<Record> = decode(&bytes).unwrap();
    assert_eq!(back.len(), 100);
    for (got, want) in back.iter().zip(records.iter()) {
        assert_eq!(got.0, want.0);
        assert_eq!(got.1, want.1);
        assert_eq!(got.2, want.2);
        assert_eq!(got.3, want.3);
        assert_eq!(got.4, want.4);
    }
}

#[test]
fn deep_mixed_nesting() {
    type Shape = Map<Atom, (List<Map<i64, String>>, (Binary, List<Atom>))>;

    let inner: Map<i64, String> = [(1, "one".to_owned()), (-2, "minus two".to_owned())]
        .into_iter()
        .collect();
    let value: Shape = [
        (
            Atom::from("full"),
            (
                vec![inner.clone(), Map::new(), inner].into(),
                (Binary::from(vec![0, 255]), vec![Atom::from("x")].into()),
            ),
        ),
        (
            Atom::from("empty"),
            (List::new(), (Binary::default(), List::new())),
        ),
    ]
    .into_iter()
    .collect();

    let bytes = encode(&value).unwrap();
    let back: Shape = decode(&bytes).unwrap();
    assert_eq!(back, value);

    let term = decode_term(&bytes, &<Shape as Decode>::schema()).unwrap();
    assert_eq!(encode(&term).unwrap(), bytes);
}

#[test]
fn std_containers_decode_into_list_and_map() {
    let queue: VecDeque<i64> = (1..=5).collect();
    let bytes = encode(&queue).unwrap();
    let list: List<i64> = decode(&bytes).unwrap();
    assert_eq!(list.as_slice(), &[1, 2, 3, 4, 5]);

    let mut hash = HashMap::new();
    hash.insert("b".to_owned(), 2_i64);
    hash.insert("a".to_owned(), 1_i64);
    let bytes = encode(&hash).unwrap();
    let map: Map<String, i64> = decode(&bytes).unwrap();
    assert_eq!(map.keys().map(String::as_str).collect::<Vec<_>>(), ["a", "b"]);
}

#[test]
fn byte_vector_is_a_list_binary_is_a_binary() {
    let raw = vec![1_u8, 2, 3];
    let as_list = encode(&raw).unwrap();
    let as_binary = encode(&Binary::from(raw.clone())).unwrap();
    assert_eq!(as_list[1], 108);
    assert_eq!(as_binary[1], 109);

    let codes: List<i64> = decode(&as_list).unwrap();
    assert_eq!(codes.as_slice(), &[1, 2, 3]);
    let bytes: Binary = decode(&as_binary).unwrap();
    assert_eq!(bytes.as_bytes(), raw.as_slice());
}

// ── Sessions ──────────────────────────────────────────────────────────────────

#[test]
fn many_terms_in_one_session_come_back_in_order() {
    let mut encoder = Encoder::new();
    encoder
        .encode(&Atom::from("header"))
        .encode(&(1_i64, 2_i64))
        .encode("text")
        .encode(&Map::<Atom, i64>::new());
    for n in 0..3 {
        encoder.encode(&record(n));
    }
    let bytes = encoder.into_bytes().unwrap();

    let mut decoder = Decoder::new(&bytes).unwrap();
    assert_eq!(decoder.parse::<Atom>().unwrap(), "header");
    assert_eq!(decoder.parse::<(i64, i64)>().unwrap(), (1, 2));
    assert_eq!(decoder.parse::<String>().unwrap(), "text");
    assert!(decoder.parse::<Map<Atom, i64>>().unwrap().is_empty());
    for n in 0..3 {
        let (name, ..) = decoder.parse::<Record>().unwrap();
        assert_eq!(name, format!("rec_{n}").as_str());
    }
    decoder.finish().unwrap();
}

#[test]
fn manual_composite_matches_derived_encoding() {
    use eterm_wire::Compound;

    let mut manual = Encoder::new();
    {
        let mut tuple = manual.composite(Compound::Tuple, 2);
        tuple.encode(&7_i64);
        let mut list = tuple.composite(Compound::List, 2);
        list.encode(&Atom::from("a")).encode(&Atom::from("b"));
    }

    let derived = encode(&(7_i64, vec![Atom::from("a"), Atom::from("b")])).unwrap();
    assert_eq!(manual.into_bytes().unwrap(), derived);
}

// ── Registered schemas ────────────────────────────────────────────────────────

#[test]
fn dynamic_terms_survive_a_round_trip() {
    let schema: SchemaNode = "{atom, #{string => [float]}, binary}".parse().unwrap();
    let mut entries = BTreeMap::new();
    entries.insert(
        Term::from("xs"),
        Term::List(vec![Term::Float(1.0), Term::Float(-2.5)]),
    );
    entries.insert(Term::from("none"), Term::List(Vec::new()));
    let term = Term::Tuple(vec![
        Term::atom("sample"),
        Term::Map(entries),
        Term::Binary(Binary::from(vec![0xca, 0xfe])),
    ]);
    assert!(term.conforms_to(&schema));

    let bytes = encode(&term).unwrap();
    assert_eq!(decode_term(&bytes, &schema).unwrap(), term);
    assert_eq!(
        term.to_string(),
        r#"{sample,#{"none" => [],"xs" => [1.0,-2.5]},<<202,254>>}"#
    );
}

#[test]
fn static_and_dynamic_decoders_accept_the_same_bytes() {
    type Shape = (List<(Atom, i64)>, Map<String, Binary>);

    let value: Shape = (
        vec![(Atom::from("k"), 1), (Atom::from("'quoted'"), -1)].into(),
        [("bin".to_owned(), Binary::from(vec![7]))].into_iter().collect(),
    );
    let bytes = encode(&value).unwrap();

    let term = decode_term(&bytes, &<Shape as Decode>::schema()).unwrap();
    assert_eq!(term.to_string(), r#"{[{k,1},{'\'quoted\'',-1}],#{"bin" => <<7>>}}"#);
    assert_eq!(decode::<Shape>(&bytes).unwrap(), value);
}
