use eterm_types::Kind;
use eterm_wire::WireError;

/// Errors that can occur while decoding terms against a schema.
///
/// Decoding is fail-fast: the first error ends the current `parse` and
/// poisons the session, so every later call reports
/// [`DecodeError::SessionFailed`]. Offsets are absolute positions in the
/// buffer handed to the decoder, version byte included.
///
/// Error hierarchy:
///
/// ```text
///   DecodeError
///   ├── BridgeFailure   ← primitive codec rejected the bytes (truncated, malformed)
///   ├── TypeMismatch    ← term on the wire has a different kind than the schema
///   ├── ArityMismatch   ← tuple header arity differs from the schema's arity
///   ├── LimitExceeded   ← nesting depth or declared arity above the configured limit
///   ├── TrailingData    ← bytes left over after the last expected term
///   └── SessionFailed   ← an earlier parse on this session already failed
/// ```
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// A primitive decode failed for a reason other than a wrong tag.
    ///
    /// `offset` is where the failing primitive starts; the inner
    /// [`WireError`] says what was wrong with it.
    #[error("malformed term at offset {offset}: {source}")]
    BridgeFailure {
        offset: usize,
        #[source]
        source: WireError,
    },

    /// The schema expected one kind of term and the wire holds another.
    ///
    /// `found` is the raw tag byte at `offset`.
    #[error("type mismatch at offset {offset}: expected {expected}, found tag {found}")]
    TypeMismatch {
        expected: Kind,
        found: u8,
        offset: usize,
    },

    /// A tuple header declared a different number of elements than the
    /// schema's tuple type.
    #[error("tuple arity mismatch at offset {offset}: expected {expected}, found {found}")]
    ArityMismatch {
        expected: usize,
        found: usize,
        offset: usize,
    },

    /// Nesting or a declared element count went past a [`DecoderConfig`] limit.
    ///
    /// [`DecoderConfig`]: crate::DecoderConfig
    #[error("{limit} limit of {max} exceeded at offset {offset}")]
    LimitExceeded {
        limit: &'static str,
        max: usize,
        offset: usize,
    },

    /// The buffer holds more bytes after the terms that were asked for.
    #[error("unexpected data after last term ({extra_bytes} bytes)")]
    TrailingData { extra_bytes: usize },

    /// The session already failed; its cursor is no longer trustworthy.
    #[error("decoder session has already failed")]
    SessionFailed,
}

impl DecodeError {
    /// Classify a primitive codec failure for a term starting at `offset`.
    ///
    /// A wrong tag is a schema mismatch; anything else means the bytes
    /// themselves are bad.
    pub(crate) fn from_wire(source: WireError, expected: Kind, offset: usize) -> Self {
        match source {
            WireError::UnexpectedTag { found, .. } => Self::TypeMismatch {
                expected,
                found,
                offset,
            },
            source => Self::BridgeFailure { offset, source },
        }
    }
}
