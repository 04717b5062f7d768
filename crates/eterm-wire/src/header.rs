use crate::bytes::{be_u32, len_of, u8_at};
use crate::error::WireError;
use crate::tag;

/// Version byte that opens every encoded buffer.
pub const VERSION_MAGIC: u8 = tag::VERSION;

/// Write the version envelope. Called once per buffer, before any term.
pub fn encode_version(buf: &mut Vec<u8>) {
    buf.push(VERSION_MAGIC);
}

/// Read and validate the version envelope.
///
/// Returns `(version, bytes_consumed)`.
///
/// # Errors
///
/// - [`WireError::UnexpectedEof`] on an empty buffer.
/// - [`WireError::InvalidVersion`] if the first byte is not 131.
pub fn decode_version(buf: &[u8]) -> Result<(u8, usize), WireError> {
    let found = u8_at(buf, 0)?;
    if found != VERSION_MAGIC {
        return Err(WireError::InvalidVersion { found });
    }
    Ok((found, 1))
}

/// The three compound term shapes that carry an arity header.
///
/// ```text
/// ┌──────────┬─────────────────────────────┬──────────────────────┐
/// │ Compound │ Header                      │ Empty encoding       │
/// ├──────────┼─────────────────────────────┼──────────────────────┤
/// │ Tuple    │ SMALL_TUPLE_EXT u8 /        │ SMALL_TUPLE_EXT 0    │
/// │          │ LARGE_TUPLE_EXT u32         │                      │
/// │ List     │ LIST_EXT u32 (+ NIL tail)   │ NIL_EXT              │
/// │ Map      │ MAP_EXT u32                 │ MAP_EXT 0            │
/// └──────────┴─────────────────────────────┴──────────────────────┘
/// ```
///
/// Only element counts are written; a compound's body size is never on
/// the wire, so a reader must decode every child to find the end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Compound {
    Tuple,
    List,
    Map,
}

impl Compound {
    /// Write the header (tag + arity) for a compound with `arity` children.
    ///
    /// A list header of arity 0 is the empty list itself.
    ///
    /// # Errors
    ///
    /// [`WireError::LengthOverflow`] if `arity` exceeds `u32::MAX`.
    pub fn encode_header(self, buf: &mut Vec<u8>, arity: usize) -> Result<(), WireError> {
        match self {
            Self::Tuple => encode_tuple_header(buf, arity),
            Self::List => encode_list_header(buf, arity),
            Self::Map => encode_map_header(buf, arity),
        }
    }

    /// Write the zero-element form of this compound.
    pub fn encode_empty(self, buf: &mut Vec<u8>) {
        match self {
            Self::Tuple => buf.extend_from_slice(&[tag::SMALL_TUPLE_EXT, 0]),
            Self::List => encode_nil(buf),
            Self::Map => buf.extend_from_slice(&[tag::MAP_EXT, 0, 0, 0, 0]),
        }
    }
}

fn wire_u32(arity: usize) -> Result<u32, WireError> {
    u32::try_from(arity).map_err(|_| WireError::LengthOverflow { len: arity })
}

// ── Tuples ────────────────────────────────────────────────────────────

/// Write a tuple header: `SMALL_TUPLE_EXT` below 256 elements,
/// `LARGE_TUPLE_EXT` otherwise.
///
/// # Errors
///
/// [`WireError::LengthOverflow`] if `arity` exceeds `u32::MAX`.
pub fn encode_tuple_header(buf: &mut Vec<u8>, arity: usize) -> Result<(), WireError> {
    if let Ok(small) = u8::try_from(arity) {
        buf.push(tag::SMALL_TUPLE_EXT);
        buf.push(small);
    } else {
        let arity = wire_u32(arity)?;
        buf.push(tag::LARGE_TUPLE_EXT);
        buf.extend_from_slice(&arity.to_be_bytes());
    }
    Ok(())
}

/// Read a tuple header. Returns `(arity, bytes_consumed)`.
///
/// # Errors
///
/// - [`WireError::UnexpectedTag`] if the term is not a tuple.
/// - [`WireError::UnexpectedEof`] if the header is truncated.
pub fn decode_tuple_header(buf: &[u8]) -> Result<(usize, usize), WireError> {
    match u8_at(buf, 0)? {
        tag::SMALL_TUPLE_EXT => Ok((usize::from(u8_at(buf, 1)?), 2)),
        tag::LARGE_TUPLE_EXT => Ok((len_of(be_u32(buf, 1)?), 5)),
        found => Err(WireError::UnexpectedTag {
            expected: "tuple",
            found,
        }),
    }
}

// ── Lists ─────────────────────────────────────────────────────────────

/// Write a list header. Arity 0 writes `NIL_EXT`, which is the complete
/// empty list; any other arity writes `LIST_EXT` and the caller must
/// follow the elements with a tail (see [`encode_nil`]).
///
/// # Errors
///
/// [`WireError::LengthOverflow`] if `arity` exceeds `u32::MAX`.
pub fn encode_list_header(buf: &mut Vec<u8>, arity: usize) -> Result<(), WireError> {
    if arity == 0 {
        encode_nil(buf);
        return Ok(());
    }
    let arity = wire_u32(arity)?;
    buf.push(tag::LIST_EXT);
    buf.extend_from_slice(&arity.to_be_bytes());
    Ok(())
}

/// Read a list header. `NIL_EXT` is recognised directly as arity 0 with
/// nothing further to read.
///
/// # Errors
///
/// - [`WireError::UnexpectedTag`] if the term is not a list.
/// - [`WireError::UnexpectedEof`] if the header is truncated.
pub fn decode_list_header(buf: &[u8]) -> Result<(usize, usize), WireError> {
    match u8_at(buf, 0)? {
        tag::NIL_EXT => Ok((0, 1)),
        tag::LIST_EXT => Ok((len_of(be_u32(buf, 1)?), 5)),
        found => Err(WireError::UnexpectedTag {
            expected: "list",
            found,
        }),
    }
}

/// Write the empty list, used both as `[]` and as a proper list's tail.
pub fn encode_nil(buf: &mut Vec<u8>) {
    buf.push(tag::NIL_EXT);
}

/// Read a proper-list tail. Returns the bytes consumed.
///
/// # Errors
///
/// - [`WireError::UnexpectedTag`] if the tail is not `NIL_EXT` (an
///   improper list).
/// - [`WireError::UnexpectedEof`] if input ended before the tail.
pub fn decode_nil(buf: &[u8]) -> Result<usize, WireError> {
    match u8_at(buf, 0)? {
        tag::NIL_EXT => Ok(1),
        found => Err(WireError::UnexpectedTag {
            expected: "list tail",
            found,
        }),
    }
}

// ── Maps ──────────────────────────────────────────────────────────────

/// Write a map header with `arity` key/value pairs.
///
/// # Errors
///
/// [`WireError::LengthOverflow`] if `arity` exceeds `u32::MAX`.
pub fn encode_map_header(buf: &mut Vec<u8>, arity: usize) -> Result<(), WireError> {
    let arity = wire_u32(arity)?;
    buf.push(tag::MAP_EXT);
    buf.extend_from_slice(&arity.to_be_bytes());
    Ok(())
}

/// Read a map header. Returns `(pair_count, bytes_consumed)`.
///
/// # Errors
///
/// - [`WireError::UnexpectedTag`] if the term is not a map.
/// - [`WireError::UnexpectedEof`] if the header is truncated.
pub fn decode_map_header(buf: &[u8]) -> Result<(usize, usize), WireError> {
    match u8_at(buf, 0)? {
        tag::MAP_EXT => Ok((len_of(be_u32(buf, 1)?), 5)),
        found => Err(WireError::UnexpectedTag {
            expected: "map",
            found,
        }),
    }
}
