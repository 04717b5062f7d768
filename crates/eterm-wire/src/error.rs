/// Errors raised by the primitive term codecs.
///
/// These describe a single malformed or unwritable primitive: a tag, a
/// scalar payload, or a compound header. Higher layers decide whether a
/// given variant is a structural type mismatch or a hard codec failure.
///
/// ```text
///   WireError
///   ├── UnexpectedEof      ← slice ended inside a tag or payload
///   ├── UnexpectedTag      ← tag byte is not valid for the requested primitive
///   ├── InvalidVersion     ← envelope byte is not 131
///   ├── IntegerOverflow    ← bignum does not fit in an i64
///   ├── InvalidUtf8        ← string or atom bytes are not UTF-8
///   ├── InvalidFloat       ← legacy float text could not be parsed
///   ├── AtomTooLong        ← atom longer than 255 characters (encode)
///   └── LengthOverflow     ← length or arity too large for its wire field
/// ```
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum WireError {
    /// Input ended before a complete tag or payload could be read.
    ///
    /// `offset` is relative to the slice handed to the codec, i.e. the
    /// start of the term being read.
    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEof { offset: usize },

    /// The tag byte does not belong to the primitive being read.
    #[error("unexpected tag {found}, expected {expected}")]
    UnexpectedTag { expected: &'static str, found: u8 },

    /// The buffer does not start with the format's version byte.
    #[error("invalid version byte: expected 131, got {found}")]
    InvalidVersion { found: u8 },

    /// A big integer on the wire needs more than 64 bits.
    #[error("integer does not fit in a signed 64-bit value")]
    IntegerOverflow,

    /// String or atom payload is not valid UTF-8.
    #[error("text payload is not valid UTF-8")]
    InvalidUtf8,

    /// A legacy `FLOAT_EXT` payload did not parse as a number.
    #[error("malformed float payload")]
    InvalidFloat,

    /// Atoms are limited to 255 characters.
    #[error("atom has {chars} characters, limit is 255")]
    AtomTooLong { chars: usize },

    /// A length or arity exceeds the width of its wire field.
    #[error("length {len} does not fit in the wire length field")]
    LengthOverflow { len: usize },
}
