use eterm_types::SchemaNode;

/// Resource limits applied while decoding untrusted input.
///
/// The wire format never states a compound's byte size, only its element
/// count, so a hostile header can claim billions of children or nest
/// compounds until the stack runs out. Both are bounded here.
///
/// ```text
/// ┌────────────┬──────────┬──────────────────────────────────────┐
/// │ Field      │ Default  │ Bounds                               │
/// ├────────────┼──────────┼──────────────────────────────────────┤
/// │ max_depth  │ 256      │ compounds open at once               │
/// │ max_arity  │ 16 Mi    │ children declared by one header      │
/// └────────────┴──────────┴──────────────────────────────────────┘
/// ```
///
/// Independently of `max_arity`, element storage is never preallocated
/// beyond the number of bytes left in the buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecoderConfig {
    pub max_depth: usize,
    pub max_arity: usize,
}

impl DecoderConfig {
    pub const DEFAULT_MAX_DEPTH: usize = SchemaNode::MAX_DEPTH;
    pub const DEFAULT_MAX_ARITY: usize = 16 * 1024 * 1024;

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[must_use]
    pub fn with_max_arity(mut self, max_arity: usize) -> Self {
        self.max_arity = max_arity;
        self
    }
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
            max_arity: Self::DEFAULT_MAX_ARITY,
        }
    }
}
