#![no_main]

use eterm_decoder::{decode, Decoder};
use eterm_types::{Atom, Binary, List, Map};
use libfuzzer_sys::fuzz_target;

// Fuzz target: statically typed decoders on arbitrary input.
//
// Exercises the version check, tuple arity checks, list tails, map
// headers and the arity/depth limits. Errors are fine; panics and
// runaway allocation are not.
fuzz_target!(|data: &[u8]| {
    let _ = decode::<i64>(data);
    let _ = decode::<(i64, List<Atom>)>(data);
    let _ = decode::<Map<Atom, List<(i64, Binary)>>>(data);
    let _ = decode::<List<List<List<String>>>>(data);
    let _ = decode::<(f64, String, Binary, Map<i64, f64>)>(data);

    // A stream of terms until the first failure.
    if let Ok(mut decoder) = Decoder::new(data) {
        while !decoder.is_exhausted() {
            if decoder.parse::<List<i64>>().is_err() {
                assert!(!decoder.is_valid());
                break;
            }
        }
    }
});
