use crate::error::WireError;

/// Borrow `len` bytes starting at `at`, or report where input ran out.
pub(crate) fn take(buf: &[u8], at: usize, len: usize) -> Result<&[u8], WireError> {
    at.checked_add(len)
        .and_then(|end| buf.get(at..end))
        .ok_or(WireError::UnexpectedEof { offset: buf.len() })
}

pub(crate) fn u8_at(buf: &[u8], at: usize) -> Result<u8, WireError> {
    buf.get(at)
        .copied()
        .ok_or(WireError::UnexpectedEof { offset: buf.len() })
}

pub(crate) fn be_u16(buf: &[u8], at: usize) -> Result<u16, WireError> {
    let b = take(buf, at, 2)?;
    Ok(u16::from_be_bytes([b[0], b[1]]))
}

pub(crate) fn be_u32(buf: &[u8], at: usize) -> Result<u32, WireError> {
    let b = take(buf, at, 4)?;
    Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
}

/// Convert a wire length into a buffer length.
pub(crate) fn len_of(raw: u32) -> usize {
    raw as usize
}
