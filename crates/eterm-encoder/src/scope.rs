use std::ops::{Deref, DerefMut};

use eterm_wire::Compound;

use crate::encoder::Encoder;

/// Guard for one compound being encoded.
///
/// Opening a scope with a non-zero arity pushes a scratch buffer; every
/// child encoded through the scope (it derefs to the [`Encoder`]) lands
/// in that buffer. Dropping the scope pops the buffer, writes the
/// compound header into the parent, appends the children after it and
/// releases the scratch buffer. This happens on every exit path, so the
/// buffer stack can never be left unbalanced.
///
/// With arity zero the scope writes the compound's empty form at once
/// and never touches the stack; dropping it does nothing.
///
/// The caller must encode exactly `arity` children (`arity` key/value
/// pairs for a map) before the scope ends. Any other count still closes
/// the scope but fails the session with
/// [`EncodeError::ChildCountMismatch`](crate::EncodeError::ChildCountMismatch).
///
/// ```rust
/// use eterm_encoder::Encoder;
/// use eterm_wire::Compound;
///
/// let mut encoder = Encoder::new();
/// {
///     let mut pair = encoder.composite(Compound::Tuple, 2);
///     pair.encode(&1_i64).encode("one");
/// }
/// assert_eq!(
///     encoder.into_bytes().unwrap(),
///     [131, 104, 2, 97, 1, 107, 0, 3, b'o', b'n', b'e']
/// );
/// ```
#[derive(Debug)]
pub struct CompositeScope<'e> {
    encoder: &'e mut Encoder,
    compound: Compound,
    arity: usize,
    pushed: bool,
}

impl<'e> CompositeScope<'e> {
    pub(crate) fn open(encoder: &'e mut Encoder, compound: Compound, arity: usize) -> Self {
        let pushed = arity > 0;
        if pushed {
            encoder.push_scratch();
        } else {
            encoder.write_empty(compound);
        }
        Self {
            encoder,
            compound,
            arity,
            pushed,
        }
    }
}

impl Deref for CompositeScope<'_> {
    type Target = Encoder;

    fn deref(&self) -> &Encoder {
        &*self.encoder
    }
}

impl DerefMut for CompositeScope<'_> {
    fn deref_mut(&mut self) -> &mut Encoder {
        &mut *self.encoder
    }
}

impl Drop for CompositeScope<'_> {
    fn drop(&mut self) {
        if self.pushed {
            self.encoder.pop_scratch(self.compound, self.arity);
        }
    }
}
