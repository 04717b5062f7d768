#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use eterm_decoder::{Decoder, DecoderConfig};
use eterm_types::SchemaNode;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum FuzzSchema {
    Integer,
    Float,
    String,
    Atom,
    Binary,
    List(Box<FuzzSchema>),
    Tuple(Vec<FuzzSchema>),
    Map(Box<FuzzSchema>, Box<FuzzSchema>),
}

fn to_schema(fuzz: &FuzzSchema, depth: usize) -> SchemaNode {
    if depth > 8 {
        return SchemaNode::Integer;
    }
    match fuzz {
        FuzzSchema::Integer => SchemaNode::Integer,
        FuzzSchema::Float => SchemaNode::Float,
        FuzzSchema::String => SchemaNode::String,
        FuzzSchema::Atom => SchemaNode::Atom,
        FuzzSchema::Binary => SchemaNode::Binary,
        FuzzSchema::List(element) => SchemaNode::list(to_schema(element, depth + 1)),
        FuzzSchema::Tuple(elements) => SchemaNode::Tuple(
            elements.iter().take(12).map(|e| to_schema(e, depth + 1)).collect(),
        ),
        FuzzSchema::Map(key, value) => {
            SchemaNode::map(to_schema(key, depth + 1), to_schema(value, depth + 1))
        }
    }
}

// Fuzz target: schema-driven dynamic decoding.
//
// An arbitrary schema is paired with arbitrary bytes. Every term that
// decodes must conform to the schema it was decoded with.
fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);
    let Ok(fuzz) = FuzzSchema::arbitrary(&mut u) else {
        return;
    };
    let schema = to_schema(&fuzz, 0);
    let config = DecoderConfig::default().with_max_depth(16).with_max_arity(4096);

    let Ok(mut decoder) = Decoder::with_config(u.take_rest(), config) else {
        return;
    };
    while !decoder.is_exhausted() {
        match decoder.parse_dynamic(&schema) {
            Ok(term) => assert!(term.conforms_to(&schema), "{term} does not fit {schema}"),
            Err(_) => break,
        }
    }
});
