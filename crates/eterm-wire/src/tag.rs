//! Tag bytes of the external term format.
//!
//! Every term starts with one of these. The first byte of a whole buffer
//! is the [`VERSION`] envelope, which is not a term tag.

/// Envelope byte preceding the first term of a buffer.
pub const VERSION: u8 = 131;

pub const NEW_FLOAT_EXT: u8 = 70;
pub const SMALL_INTEGER_EXT: u8 = 97;
pub const INTEGER_EXT: u8 = 98;
pub const FLOAT_EXT: u8 = 99;
pub const ATOM_EXT: u8 = 100;
pub const SMALL_TUPLE_EXT: u8 = 104;
pub const LARGE_TUPLE_EXT: u8 = 105;
pub const NIL_EXT: u8 = 106;
pub const STRING_EXT: u8 = 107;
pub const LIST_EXT: u8 = 108;
pub const BINARY_EXT: u8 = 109;
pub const SMALL_BIG_EXT: u8 = 110;
pub const LARGE_BIG_EXT: u8 = 111;
pub const SMALL_ATOM_EXT: u8 = 115;
pub const MAP_EXT: u8 = 116;
pub const ATOM_UTF8_EXT: u8 = 118;
pub const SMALL_ATOM_UTF8_EXT: u8 = 119;

/// Human-readable name of a tag byte, for diagnostics.
#[must_use]
pub fn name(tag: u8) -> &'static str {
    match tag {
        VERSION => "VERSION",
        NEW_FLOAT_EXT => "NEW_FLOAT_EXT",
        SMALL_INTEGER_EXT => "SMALL_INTEGER_EXT",
        INTEGER_EXT => "INTEGER_EXT",
        FLOAT_EXT => "FLOAT_EXT",
        ATOM_EXT => "ATOM_EXT",
        SMALL_TUPLE_EXT => "SMALL_TUPLE_EXT",
        LARGE_TUPLE_EXT => "LARGE_TUPLE_EXT",
        NIL_EXT => "NIL_EXT",
        STRING_EXT => "STRING_EXT",
        LIST_EXT => "LIST_EXT",
        BINARY_EXT => "BINARY_EXT",
        SMALL_BIG_EXT => "SMALL_BIG_EXT",
        LARGE_BIG_EXT => "LARGE_BIG_EXT",
        SMALL_ATOM_EXT => "SMALL_ATOM_EXT",
        MAP_EXT => "MAP_EXT",
        ATOM_UTF8_EXT => "ATOM_UTF8_EXT",
        SMALL_ATOM_UTF8_EXT => "SMALL_ATOM_UTF8_EXT",
        _ => "unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_known_tags() {
        assert_eq!(name(LIST_EXT), "LIST_EXT");
        assert_eq!(name(SMALL_ATOM_UTF8_EXT), "SMALL_ATOM_UTF8_EXT");
    }

    #[test]
    fn unknown_tag_has_placeholder_name() {
        assert_eq!(name(0x01), "unknown");
    }
}
