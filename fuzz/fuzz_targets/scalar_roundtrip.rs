#![no_main]

use arbitrary::Arbitrary;
use eterm_decoder::decode;
use eterm_encoder::encode;
use eterm_types::{Atom, Binary};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum FuzzScalar {
    Integer(i64),
    Float(f64),
    Text(String),
    Atom(String),
    Binary(Vec<u8>),
}

// Fuzz target: scalar encode -> decode roundtrip.
//
// Every scalar the encoder accepts must decode back to itself.
fuzz_target!(|scalar: FuzzScalar| {
    match scalar {
        FuzzScalar::Integer(value) => {
            let bytes = encode(&value).unwrap();
            assert_eq!(decode::<i64>(&bytes).unwrap(), value);
        }
        FuzzScalar::Float(value) => {
            let bytes = encode(&value).unwrap();
            assert_eq!(decode::<f64>(&bytes).unwrap().to_bits(), value.to_bits());
        }
        FuzzScalar::Text(text) => {
            let bytes = encode(text.as_str()).unwrap();
            assert_eq!(decode::<String>(&bytes).unwrap(), text);
        }
        FuzzScalar::Atom(name) => {
            let atom = Atom::new(name);
            match encode(&atom) {
                Ok(bytes) => assert_eq!(decode::<Atom>(&bytes).unwrap(), atom),
                Err(_) => assert!(atom.chars().count() > 255),
            }
        }
        FuzzScalar::Binary(data) => {
            let binary = Binary::from(data);
            let bytes = encode(&binary).unwrap();
            assert_eq!(decode::<Binary>(&bytes).unwrap(), binary);
        }
    }
});
