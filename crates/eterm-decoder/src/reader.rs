use eterm_types::{Atom, Binary, Kind};
use eterm_wire::{WireError, header, scalar};

use crate::config::DecoderConfig;
use crate::error::DecodeError;

/// Cursor over an encoded buffer, shared by every [`Decode`] impl.
///
/// A `TermReader` owns the single position that all nested decodes
/// advance. Each read hands the primitive codec the slice starting at
/// the cursor and moves forward by however many bytes it consumed, so
/// the cursor only ever grows.
///
/// Every read validates before it moves: on error the cursor stays at
/// the start of the offending term, and that position is the offset
/// reported in the error.
///
/// [`Decode`]: crate::Decode
#[derive(Debug)]
pub struct TermReader<'a> {
    buf: &'a [u8],
    pos: usize,
    depth: usize,
    config: DecoderConfig,
}

impl<'a> TermReader<'a> {
    /// Start reading `buf` at byte `pos`.
    #[must_use]
    pub fn new(buf: &'a [u8], pos: usize, config: DecoderConfig) -> Self {
        Self {
            buf,
            pos: pos.min(buf.len()),
            depth: 0,
            config,
        }
    }

    /// Absolute cursor position in the buffer.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Compounds currently open around the cursor.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    fn rest(&self) -> &'a [u8] {
        self.buf.get(self.pos..).unwrap_or_default()
    }

    /// Run one primitive decode at the cursor and advance past it.
    fn bridge<T>(
        &mut self,
        expected: Kind,
        read: impl FnOnce(&'a [u8]) -> Result<(T, usize), WireError>,
    ) -> Result<T, DecodeError> {
        let offset = self.pos;
        let (value, consumed) =
            read(self.rest()).map_err(|e| DecodeError::from_wire(e, expected, offset))?;
        self.pos += consumed;
        Ok(value)
    }

    /// Tag byte of the next term, without consuming it.
    ///
    /// # Errors
    ///
    /// [`DecodeError::BridgeFailure`] if the buffer is exhausted.
    pub fn peek_tag(&self) -> Result<u8, DecodeError> {
        scalar::peek_tag(self.rest()).map_err(|source| DecodeError::BridgeFailure {
            offset: self.pos,
            source,
        })
    }

    // ── Scalars ───────────────────────────────────────────────────────

    /// # Errors
    ///
    /// [`DecodeError::TypeMismatch`] if the next term is not an integer,
    /// [`DecodeError::BridgeFailure`] if it is truncated or overflows `i64`.
    pub fn read_long(&mut self) -> Result<i64, DecodeError> {
        self.bridge(Kind::Integer, scalar::decode_long)
    }

    /// # Errors
    ///
    /// [`DecodeError::TypeMismatch`] if the next term is not a float,
    /// [`DecodeError::BridgeFailure`] if it is truncated or malformed.
    pub fn read_double(&mut self) -> Result<f64, DecodeError> {
        self.bridge(Kind::Float, scalar::decode_double)
    }

    /// # Errors
    ///
    /// [`DecodeError::TypeMismatch`] if the next term is not string-shaped,
    /// [`DecodeError::BridgeFailure`] if it is truncated or not UTF-8.
    pub fn read_string(&mut self) -> Result<String, DecodeError> {
        self.bridge(Kind::String, scalar::decode_string)
    }

    /// # Errors
    ///
    /// [`DecodeError::TypeMismatch`] if the next term is not an atom,
    /// [`DecodeError::BridgeFailure`] if it is truncated or not UTF-8.
    pub fn read_atom(&mut self) -> Result<Atom, DecodeError> {
        self.bridge(Kind::Atom, |buf| {
            scalar::decode_atom(buf).map(|(name, n)| (Atom::from(name), n))
        })
    }

    /// # Errors
    ///
    /// [`DecodeError::TypeMismatch`] if the next term is not a binary,
    /// [`DecodeError::BridgeFailure`] if it is truncated.
    pub fn read_binary(&mut self) -> Result<Binary, DecodeError> {
        self.bridge(Kind::Binary, |buf| {
            scalar::decode_binary(buf).map(|(data, n)| (Binary::from(data), n))
        })
    }

    // ── Compound headers ──────────────────────────────────────────────

    /// Read a tuple header and return its arity.
    ///
    /// # Errors
    ///
    /// [`DecodeError::TypeMismatch`] if the next term is not a tuple,
    /// [`DecodeError::LimitExceeded`] above the configured arity.
    pub fn tuple_header(&mut self) -> Result<usize, DecodeError> {
        let offset = self.pos;
        let arity = self.bridge(Kind::Tuple, header::decode_tuple_header)?;
        self.check_arity(arity, offset)?;
        Ok(arity)
    }

    /// Read a tuple header that must declare exactly `expected` elements.
    ///
    /// # Errors
    ///
    /// [`DecodeError::ArityMismatch`] if the header disagrees,
    /// [`DecodeError::TypeMismatch`] if the next term is not a tuple.
    ///
    /// Only `expected` bounds the header here; `max_arity` does not apply.
    pub fn expect_tuple(&mut self, expected: usize) -> Result<(), DecodeError> {
        let offset = self.pos;
        let found = self.bridge(Kind::Tuple, header::decode_tuple_header)?;
        if found != expected {
            self.pos = offset;
            return Err(DecodeError::ArityMismatch {
                expected,
                found,
                offset,
            });
        }
        Ok(())
    }

    /// Read a list header. The empty list yields `0` and is complete:
    /// no tail follows it.
    ///
    /// # Errors
    ///
    /// [`DecodeError::TypeMismatch`] if the next term is not a list,
    /// [`DecodeError::LimitExceeded`] above the configured arity.
    pub fn list_header(&mut self) -> Result<usize, DecodeError> {
        let offset = self.pos;
        let arity = self.bridge(Kind::List, header::decode_list_header)?;
        self.check_arity(arity, offset)?;
        Ok(arity)
    }

    /// Consume the empty-list tail that closes a non-empty list.
    ///
    /// # Errors
    ///
    /// [`DecodeError::TypeMismatch`] for an improper list,
    /// [`DecodeError::BridgeFailure`] if the buffer ends first.
    pub fn list_tail(&mut self) -> Result<(), DecodeError> {
        self.bridge(Kind::List, |buf| header::decode_nil(buf).map(|n| ((), n)))
    }

    /// Read a map header and return its pair count.
    ///
    /// # Errors
    ///
    /// [`DecodeError::TypeMismatch`] if the next term is not a map,
    /// [`DecodeError::LimitExceeded`] above the configured arity.
    pub fn map_header(&mut self) -> Result<usize, DecodeError> {
        let offset = self.pos;
        let arity = self.bridge(Kind::Map, header::decode_map_header)?;
        self.check_arity(arity, offset)?;
        Ok(arity)
    }

    fn check_arity(&mut self, arity: usize, offset: usize) -> Result<(), DecodeError> {
        if arity > self.config.max_arity {
            self.pos = offset;
            return Err(DecodeError::LimitExceeded {
                limit: "arity",
                max: self.config.max_arity,
                offset,
            });
        }
        Ok(())
    }

    /// Capacity to reserve for `arity` children: never more than the
    /// bytes left, since every term takes at least one.
    #[must_use]
    pub fn capacity_hint(&self, arity: usize) -> usize {
        arity.min(self.remaining())
    }

    // ── Nesting ───────────────────────────────────────────────────────

    /// Run `body` one compound level deeper.
    ///
    /// # Errors
    ///
    /// [`DecodeError::LimitExceeded`] if entering would pass the
    /// configured depth; otherwise whatever `body` returns.
    pub fn nested<T>(
        &mut self,
        body: impl FnOnce(&mut Self) -> Result<T, DecodeError>,
    ) -> Result<T, DecodeError> {
        if self.depth >= self.config.max_depth {
            return Err(DecodeError::LimitExceeded {
                limit: "depth",
                max: self.config.max_depth,
                offset: self.pos,
            });
        }
        self.depth += 1;
        let out = body(self);
        self.depth -= 1;
        out
    }
}
