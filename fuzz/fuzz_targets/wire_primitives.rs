#![no_main]

use eterm_wire::{header, scalar};
use libfuzzer_sys::fuzz_target;

// Fuzz target: every primitive decoder on arbitrary bytes.
//
// None may panic, and a successful decode never claims more bytes
// than the slice holds.
fuzz_target!(|data: &[u8]| {
    let _ = header::decode_version(data);

    if let Ok((_, n)) = scalar::decode_long(data) {
        assert!(n <= data.len());
    }
    if let Ok((_, n)) = scalar::decode_double(data) {
        assert!(n <= data.len());
    }
    if let Ok((_, n)) = scalar::decode_string(data) {
        assert!(n <= data.len());
    }
    if let Ok((_, n)) = scalar::decode_atom(data) {
        assert!(n <= data.len());
    }
    if let Ok((bytes, n)) = scalar::decode_binary(data) {
        assert!(n <= data.len());
        assert_eq!(n, 5 + bytes.len());
    }
    if let Ok((_, n)) = header::decode_tuple_header(data) {
        assert!(n <= data.len());
    }
    if let Ok((_, n)) = header::decode_list_header(data) {
        assert!(n <= data.len());
    }
    if let Ok((_, n)) = header::decode_map_header(data) {
        assert!(n <= data.len());
    }
    let _ = header::decode_nil(data);
});
