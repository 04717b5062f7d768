use eterm_wire::{Compound, WireError};

/// Errors that can occur while encoding terms.
///
/// Encoding never stops early: the session records the first failure
/// and keeps running the remaining writes, then refuses to hand out the
/// buffer. Only the first failure is kept.
///
/// Error hierarchy:
///
/// ```text
///   EncodeError
///   ├── BridgeFailure(WireError)  ← a primitive could not be written
///   │                               (atom too long, length overflow)
///   └── ChildCountMismatch        ← a compound scope closed holding a
///                                   different number of terms than
///                                   its header declares
/// ```
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    #[error("failed to encode term: {0}")]
    BridgeFailure(#[from] WireError),

    /// For a map, `expected` counts keys and values separately.
    #[error("{compound:?} scope declared {expected} terms but held {found}")]
    ChildCountMismatch {
        compound: Compound,
        expected: usize,
        found: usize,
    },
}
