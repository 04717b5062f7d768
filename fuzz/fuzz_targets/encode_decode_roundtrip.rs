#![no_main]

use std::collections::BTreeMap;

use arbitrary::{Arbitrary, Result, Unstructured};
use eterm_decoder::decode_term;
use eterm_encoder::Encoder;
use eterm_types::{Atom, Binary, SchemaNode, Term};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Shape {
    Integer,
    Float,
    String,
    Atom,
    Binary,
    List(Box<Shape>),
    Tuple(Vec<Shape>),
    Map(Box<Shape>, Box<Shape>),
}

fn schema_of(shape: &Shape, depth: usize) -> SchemaNode {
    if depth > 6 {
        return SchemaNode::Atom;
    }
    match shape {
        Shape::Integer => SchemaNode::Integer,
        Shape::Float => SchemaNode::Float,
        Shape::String => SchemaNode::String,
        Shape::Atom => SchemaNode::Atom,
        Shape::Binary => SchemaNode::Binary,
        Shape::List(element) => SchemaNode::list(schema_of(element, depth + 1)),
        Shape::Tuple(elements) => {
            SchemaNode::Tuple(elements.iter().take(8).map(|e| schema_of(e, depth + 1)).collect())
        }
        Shape::Map(key, value) => {
            SchemaNode::map(schema_of(key, depth + 1), schema_of(value, depth + 1))
        }
    }
}

/// Draw a term that fits `schema` from the remaining fuzz input.
fn term_for(u: &mut Unstructured<'_>, schema: &SchemaNode) -> Result<Term> {
    Ok(match schema {
        SchemaNode::Integer => Term::Integer(u.arbitrary()?),
        SchemaNode::Float => Term::Float(u.arbitrary()?),
        SchemaNode::String => Term::String(u.arbitrary()?),
        SchemaNode::Atom => {
            let name: String = u.arbitrary()?;
            Term::Atom(Atom::new(name.chars().take(255).collect::<String>()))
        }
        SchemaNode::Binary => Term::Binary(Binary::from(u.arbitrary::<Vec<u8>>()?)),
        SchemaNode::List(element) => {
            let len = u.int_in_range(0..=16)?;
            let mut items = Vec::with_capacity(len);
            for _ in 0..len {
                items.push(term_for(u, element)?);
            }
            Term::List(items)
        }
        SchemaNode::Tuple(elements) => Term::Tuple(
            elements
                .iter()
                .map(|element| term_for(u, element))
                .collect::<Result<Vec<_>>>()?,
        ),
        SchemaNode::Map(key, value) => {
            let len = u.int_in_range(0..=8)?;
            let mut entries = BTreeMap::new();
            for _ in 0..len {
                entries.insert(term_for(u, key)?, term_for(u, value)?);
            }
            Term::Map(entries)
        }
    })
}

// Fuzz target: Encoder -> Decoder roundtrip through registered schemas.
//
// Builds a schema and a conforming term from the input, encodes it a
// few times in one session, and decodes every copy back. The decoder
// must accept everything the encoder produces and return equal terms.
fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);
    let Ok(shape) = Shape::arbitrary(&mut u) else {
        return;
    };
    let schema = schema_of(&shape, 0);
    let Ok(term) = term_for(&mut u, &schema) else {
        return;
    };
    assert!(term.conforms_to(&schema));

    let single = {
        let mut encoder = Encoder::new();
        encoder.encode(&term);
        encoder.into_bytes().expect("conforming term must encode")
    };
    let decoded = decode_term(&single, &schema);
    assert_eq!(decoded.as_ref(), Ok(&term), "schema {schema}");

    let mut encoder = Encoder::new();
    encoder.encode(&term).encode(&term).encode(&term);
    let stream = encoder.into_bytes().expect("conforming term must encode");
    let mut decoder = eterm_decoder::Decoder::new(&stream).unwrap();
    for _ in 0..3 {
        assert_eq!(decoder.parse_dynamic(&schema).unwrap(), term);
    }
    decoder.finish().unwrap();
});
