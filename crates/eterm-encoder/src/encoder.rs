use eterm_wire::{Compound, WireError, header, scalar};

use crate::encode::Encode;
use crate::error::EncodeError;
use crate::scope::CompositeScope;

/// An encoding session producing one version-prefixed buffer.
///
/// Values go in through [`encode`](Self::encode), which dispatches on the
/// value's [`Encode`] impl. Scalars are written straight into the
/// current buffer. A compound cannot write its header first, because the
/// header belongs in front of children that have not been encoded yet,
/// so non-empty compounds go through the **buffer stack**:
///
/// ```text
///   encode((1, [a, b]))
///
///   out: [131]                      stack: []
///   open tuple(2)                   stack: [""]
///     1            → scratch        stack: ["61 01"]
///     open list(2)                  stack: ["61 01", ""]
///       a, b       → scratch        stack: ["61 01", "77 01 a 77 01 b"]
///     close list   → header + body + tail into parent
///                                   stack: ["61 01 6c 00000002 77 01 a 77 01 b 6a"]
///   close tuple    → header + body into out
///   out: [131, 68 02, 61 01, 6c ...]
/// ```
///
/// Opening and closing are handled by [`CompositeScope`], whose `Drop`
/// always pops the scratch buffer, so the stack is balanced on every
/// exit path. Empty compounds skip the stack and write their empty form
/// directly.
///
/// # Failure handling
///
/// A primitive that cannot be written (an atom over 255 characters, a
/// length that does not fit its field) does not abort encoding. The
/// first such failure is kept in a sticky status slot, later writes
/// still run, and [`into_bytes`](Self::into_bytes) and
/// [`data`](Self::data) return the recorded error instead of the buffer.
///
/// # Usage
///
/// ```rust
/// use eterm_encoder::Encoder;
/// use eterm_types::Atom;
///
/// let mut encoder = Encoder::new();
/// encoder
///     .encode(&(42_i64, vec![Atom::from("ok"), Atom::from("error")]))
///     .encode("done");
/// let bytes = encoder.into_bytes().unwrap();
/// assert_eq!(&bytes[..5], &[131, 104, 2, 97, 42]);
/// ```
#[derive(Debug)]
pub struct Encoder {
    out: Vec<u8>,
    stack: Vec<Scratch>,
    status: Result<(), EncodeError>,
    pushes: usize,
}

/// One open compound: its body so far and how many terms it holds.
#[derive(Debug, Default)]
struct Scratch {
    body: Vec<u8>,
    children: usize,
}

impl Encoder {
    /// Start a session; the buffer begins with the version byte.
    #[must_use]
    pub fn new() -> Self {
        let mut out = Vec::new();
        header::encode_version(&mut out);
        tracing::debug!("encoder session opened");
        Self {
            out,
            stack: Vec::new(),
            status: Ok(()),
            pushes: 0,
        }
    }

    /// Encode one value and return the session for chaining.
    ///
    /// At top level each call appends one complete term; inside a
    /// [`CompositeScope`] it appends one child of that compound.
    pub fn encode<T: Encode + ?Sized>(&mut self, value: &T) -> &mut Self {
        value.encode(self);
        self
    }

    // ── Primitive writes ──────────────────────────────────────────────

    pub fn write_long(&mut self, value: i64) {
        scalar::encode_long(self.current(), value);
    }

    pub fn write_ulong(&mut self, value: u64) {
        scalar::encode_ulong(self.current(), value);
    }

    pub fn write_double(&mut self, value: f64) {
        scalar::encode_double(self.current(), value);
    }

    pub fn write_string(&mut self, value: &str) {
        self.bridge(|buf| scalar::encode_string(buf, value));
    }

    pub fn write_atom(&mut self, name: &str) {
        self.bridge(|buf| scalar::encode_atom(buf, name));
    }

    pub fn write_binary(&mut self, data: &[u8]) {
        self.bridge(|buf| scalar::encode_binary(buf, data));
    }

    /// Open a compound of `arity` children. See [`CompositeScope`].
    pub fn composite(&mut self, compound: Compound, arity: usize) -> CompositeScope<'_> {
        CompositeScope::open(self, compound, arity)
    }

    fn bridge(&mut self, write: impl FnOnce(&mut Vec<u8>) -> Result<(), WireError>) {
        let result = write(self.current());
        self.record(result);
    }

    fn record(&mut self, result: Result<(), WireError>) {
        if let Err(err) = result {
            self.record_error(EncodeError::BridgeFailure(err));
        }
    }

    fn record_error(&mut self, err: EncodeError) {
        if self.status.is_ok() {
            tracing::debug!(depth = self.stack.len(), %err, "encoder session failed");
            self.status = Err(err);
        }
    }

    // ── Buffer stack ──────────────────────────────────────────────────

    /// Buffer that receives the next term: the innermost scratch
    /// buffer, or the output once every compound is closed. Each call
    /// writes exactly one term, which is counted against its compound.
    fn current(&mut self) -> &mut Vec<u8> {
        match self.stack.last_mut() {
            Some(scratch) => {
                scratch.children += 1;
                &mut scratch.body
            }
            None => &mut self.out,
        }
    }

    /// Write the empty form of `compound` in place.
    pub(crate) fn write_empty(&mut self, compound: Compound) {
        compound.encode_empty(self.current());
    }

    pub(crate) fn push_scratch(&mut self) {
        self.stack.push(Scratch::default());
        self.pushes += 1;
        tracing::trace!(depth = self.stack.len(), "scratch buffer pushed");
    }

    /// Pop the innermost scratch buffer and splice it into its parent
    /// behind the compound's header. A list body gets its tail first.
    ///
    /// A body holding a different number of terms than `arity` declares
    /// (twice `arity` for a map) is recorded as
    /// [`EncodeError::ChildCountMismatch`].
    pub(crate) fn pop_scratch(&mut self, compound: Compound, arity: usize) {
        let Some(Scratch { mut body, children }) = self.stack.pop() else {
            return;
        };
        let expected = if compound == Compound::Map {
            arity.saturating_mul(2)
        } else {
            arity
        };
        if children != expected {
            self.record_error(EncodeError::ChildCountMismatch {
                compound,
                expected,
                found: children,
            });
        }
        if compound == Compound::List {
            header::encode_nil(&mut body);
        }

        let parent = self.current();
        let result = compound.encode_header(parent, arity);
        parent.extend_from_slice(&body);
        tracing::trace!(
            depth = self.stack.len(),
            ?compound,
            arity,
            len = body.len(),
            "scratch buffer popped"
        );
        self.record(result);
    }

    // ── Results ───────────────────────────────────────────────────────

    /// Whether every write so far succeeded.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.status.is_ok()
    }

    /// The first failure recorded, if any.
    #[must_use]
    pub fn error(&self) -> Option<&EncodeError> {
        self.status.as_ref().err()
    }

    /// Compound scopes currently open.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Scratch buffers pushed over the session's lifetime.
    #[must_use]
    pub fn scratch_pushes(&self) -> usize {
        self.pushes
    }

    /// The encoded bytes so far, version byte included.
    ///
    /// # Errors
    ///
    /// The first [`EncodeError`] recorded by this session.
    pub fn data(&self) -> Result<&[u8], EncodeError> {
        self.status.clone()?;
        Ok(&self.out)
    }

    /// Finish the session and take the buffer.
    ///
    /// # Errors
    ///
    /// The first [`EncodeError`] recorded by this session.
    pub fn into_bytes(self) -> Result<Vec<u8>, EncodeError> {
        self.status?;
        Ok(self.out)
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode a single value into a fresh version-prefixed buffer.
///
/// # Errors
///
/// The first [`EncodeError`] raised while writing `value`.
pub fn encode<T: Encode + ?Sized>(value: &T) -> Result<Vec<u8>, EncodeError> {
    let mut encoder = Encoder::new();
    encoder.encode(value);
    encoder.into_bytes()
}
