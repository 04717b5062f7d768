use crate::bytes::{be_u16, be_u32, len_of, take, u8_at};
use crate::error::WireError;
use crate::tag;

// ── Scalar primitives ─────────────────────────────────────────────────
//
// Encoders append one complete term (tag + payload) to a `Vec<u8>`.
// Decoders take the slice starting at the term's tag byte and return
// `(value, bytes_consumed)`; the caller advances its cursor.

/// Longest atom, in characters, the format can carry.
pub const MAX_ATOM_CHARS: usize = 255;

/// Size of a legacy `FLOAT_EXT` text payload.
const FLOAT_EXT_LEN: usize = 31;

/// Read the tag byte of the term at the start of `buf` without consuming it.
///
/// # Errors
///
/// [`WireError::UnexpectedEof`] if `buf` is empty.
pub fn peek_tag(buf: &[u8]) -> Result<u8, WireError> {
    u8_at(buf, 0)
}

// ── Integers ──────────────────────────────────────────────────────────

/// Encode a signed integer using the narrowest representation.
///
/// ```text
/// ┌──────────────────────┬───────────────────────────────────────┐
/// │ Range                │ Encoding                              │
/// ├──────────────────────┼───────────────────────────────────────┤
/// │ 0..=255              │ SMALL_INTEGER_EXT  u8                 │
/// │ i32::MIN..=i32::MAX  │ INTEGER_EXT        i32 big-endian     │
/// │ everything else      │ SMALL_BIG_EXT      n, sign, LE digits │
/// └──────────────────────┴───────────────────────────────────────┘
/// ```
pub fn encode_long(buf: &mut Vec<u8>, value: i64) {
    if let Ok(small) = u8::try_from(value) {
        buf.push(tag::SMALL_INTEGER_EXT);
        buf.push(small);
    } else if let Ok(int) = i32::try_from(value) {
        buf.push(tag::INTEGER_EXT);
        buf.extend_from_slice(&int.to_be_bytes());
    } else {
        encode_big(buf, value < 0, value.unsigned_abs());
    }
}

/// Encode an unsigned integer. Values above `i64::MAX` become bignums.
pub fn encode_ulong(buf: &mut Vec<u8>, value: u64) {
    match i64::try_from(value) {
        Ok(signed) => encode_long(buf, signed),
        Err(_) => encode_big(buf, false, value),
    }
}

fn encode_big(buf: &mut Vec<u8>, negative: bool, magnitude: u64) {
    let digits = magnitude.to_le_bytes();
    let n = (64 - magnitude.leading_zeros()).div_ceil(8) as usize;
    buf.push(tag::SMALL_BIG_EXT);
    #[allow(clippy::cast_possible_truncation)]
    buf.push(n as u8);
    buf.push(u8::from(negative));
    buf.extend_from_slice(&digits[..n]);
}

/// Decode an integer term into an `i64`.
///
/// Accepts `SMALL_INTEGER_EXT`, `INTEGER_EXT`, and small or large bignums
/// whose magnitude fits in 64 bits.
///
/// # Errors
///
/// - [`WireError::UnexpectedTag`] if the term is not an integer.
/// - [`WireError::IntegerOverflow`] if a bignum exceeds the `i64` range.
/// - [`WireError::UnexpectedEof`] if the payload is truncated.
pub fn decode_long(buf: &[u8]) -> Result<(i64, usize), WireError> {
    match peek_tag(buf)? {
        tag::SMALL_INTEGER_EXT => Ok((i64::from(u8_at(buf, 1)?), 2)),
        tag::INTEGER_EXT => {
            #[allow(clippy::cast_possible_wrap)]
            let value = be_u32(buf, 1)? as i32;
            Ok((i64::from(value), 5))
        }
        tag::SMALL_BIG_EXT => {
            let n = usize::from(u8_at(buf, 1)?);
            decode_big(buf, 2, n)
        }
        tag::LARGE_BIG_EXT => {
            let n = len_of(be_u32(buf, 1)?);
            decode_big(buf, 5, n)
        }
        found => Err(WireError::UnexpectedTag {
            expected: "integer",
            found,
        }),
    }
}

/// Decode bignum sign + digits starting at `at`; `n` is the digit count.
fn decode_big(buf: &[u8], at: usize, n: usize) -> Result<(i64, usize), WireError> {
    let sign = u8_at(buf, at)?;
    let digits = take(buf, at + 1, n)?;

    let mut magnitude: u64 = 0;
    for (i, &digit) in digits.iter().enumerate() {
        if digit == 0 {
            continue;
        }
        if i >= 8 {
            return Err(WireError::IntegerOverflow);
        }
        magnitude |= u64::from(digit) << (8 * i);
    }

    let value = if sign == 0 {
        i128::from(magnitude)
    } else {
        -i128::from(magnitude)
    };
    let value = i64::try_from(value).map_err(|_| WireError::IntegerOverflow)?;
    Ok((value, at + 1 + n))
}

// ── Floats ────────────────────────────────────────────────────────────

/// Encode a float as `NEW_FLOAT_EXT` (IEEE 754 double, big-endian).
pub fn encode_double(buf: &mut Vec<u8>, value: f64) {
    buf.push(tag::NEW_FLOAT_EXT);
    buf.extend_from_slice(&value.to_be_bytes());
}

/// Decode a float term. Both `NEW_FLOAT_EXT` and the legacy 31-byte
/// text form `FLOAT_EXT` are accepted.
///
/// # Errors
///
/// - [`WireError::UnexpectedTag`] if the term is not a float.
/// - [`WireError::InvalidFloat`] if a `FLOAT_EXT` payload is not numeric.
/// - [`WireError::UnexpectedEof`] if the payload is truncated.
pub fn decode_double(buf: &[u8]) -> Result<(f64, usize), WireError> {
    match peek_tag(buf)? {
        tag::NEW_FLOAT_EXT => {
            let b = take(buf, 1, 8)?;
            let raw = [b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]];
            Ok((f64::from_be_bytes(raw), 9))
        }
        tag::FLOAT_EXT => {
            let text = take(buf, 1, FLOAT_EXT_LEN)?;
            let end = text.iter().position(|&b| b == 0).unwrap_or(text.len());
            let value = std::str::from_utf8(&text[..end])
                .ok()
                .and_then(|s| s.trim().parse::<f64>().ok())
                .ok_or(WireError::InvalidFloat)?;
            Ok((value, 1 + FLOAT_EXT_LEN))
        }
        found => Err(WireError::UnexpectedTag {
            expected: "float",
            found,
        }),
    }
}

// ── Strings ───────────────────────────────────────────────────────────

/// Encode text as a string term.
///
/// The empty string is the empty list (`NIL_EXT`). Up to 65535 bytes use
/// `STRING_EXT`; longer text falls back to a proper list of byte-valued
/// small integers, which is how the format spells long strings.
///
/// # Errors
///
/// [`WireError::LengthOverflow`] if the text exceeds `u32::MAX` bytes.
pub fn encode_string(buf: &mut Vec<u8>, value: &str) -> Result<(), WireError> {
    let bytes = value.as_bytes();
    if bytes.is_empty() {
        buf.push(tag::NIL_EXT);
    } else if let Ok(len) = u16::try_from(bytes.len()) {
        buf.push(tag::STRING_EXT);
        buf.extend_from_slice(&len.to_be_bytes());
        buf.extend_from_slice(bytes);
    } else {
        let len = u32::try_from(bytes.len())
            .map_err(|_| WireError::LengthOverflow { len: bytes.len() })?;
        buf.reserve(5 + bytes.len() * 2 + 1);
        buf.push(tag::LIST_EXT);
        buf.extend_from_slice(&len.to_be_bytes());
        for &b in bytes {
            buf.push(tag::SMALL_INTEGER_EXT);
            buf.push(b);
        }
        buf.push(tag::NIL_EXT);
    }
    Ok(())
}

/// Decode a string term into owned UTF-8 text.
///
/// # Errors
///
/// - [`WireError::UnexpectedTag`] if the term is not string-shaped, or a
///   list-form string holds a non-byte element or an improper tail.
/// - [`WireError::InvalidUtf8`] if the bytes are not UTF-8.
/// - [`WireError::UnexpectedEof`] if the payload is truncated.
pub fn decode_string(buf: &[u8]) -> Result<(String, usize), WireError> {
    let (bytes, consumed) = match peek_tag(buf)? {
        tag::NIL_EXT => (Vec::new(), 1),
        tag::STRING_EXT => {
            let len = usize::from(be_u16(buf, 1)?);
            (take(buf, 3, len)?.to_vec(), 3 + len)
        }
        tag::LIST_EXT => {
            let len = len_of(be_u32(buf, 1)?);
            let mut bytes = Vec::with_capacity(len.min(buf.len() / 2));
            let mut at = 5;
            for _ in 0..len {
                let found = u8_at(buf, at)?;
                if found != tag::SMALL_INTEGER_EXT {
                    return Err(WireError::UnexpectedTag {
                        expected: "string",
                        found,
                    });
                }
                bytes.push(u8_at(buf, at + 1)?);
                at += 2;
            }
            let tail = u8_at(buf, at)?;
            if tail != tag::NIL_EXT {
                return Err(WireError::UnexpectedTag {
                    expected: "string",
                    found: tail,
                });
            }
            (bytes, at + 1)
        }
        found => {
            return Err(WireError::UnexpectedTag {
                expected: "string",
                found,
            });
        }
    };

    let text = String::from_utf8(bytes).map_err(|_| WireError::InvalidUtf8)?;
    Ok((text, consumed))
}

// ── Atoms ─────────────────────────────────────────────────────────────

/// Encode an atom using the UTF-8 atom tags.
///
/// # Errors
///
/// [`WireError::AtomTooLong`] if `name` has more than
/// [`MAX_ATOM_CHARS`] characters.
pub fn encode_atom(buf: &mut Vec<u8>, name: &str) -> Result<(), WireError> {
    let chars = name.chars().count();
    if chars > MAX_ATOM_CHARS {
        return Err(WireError::AtomTooLong { chars });
    }

    if let Ok(len) = u8::try_from(name.len()) {
        buf.push(tag::SMALL_ATOM_UTF8_EXT);
        buf.push(len);
    } else {
        let len =
            u16::try_from(name.len()).map_err(|_| WireError::LengthOverflow { len: name.len() })?;
        buf.push(tag::ATOM_UTF8_EXT);
        buf.extend_from_slice(&len.to_be_bytes());
    }
    buf.extend_from_slice(name.as_bytes());
    Ok(())
}

/// Decode an atom term. UTF-8 and legacy Latin-1 atom tags are accepted;
/// Latin-1 bytes are widened to the matching code points.
///
/// # Errors
///
/// - [`WireError::UnexpectedTag`] if the term is not an atom.
/// - [`WireError::InvalidUtf8`] if a UTF-8 atom holds invalid bytes.
/// - [`WireError::UnexpectedEof`] if the payload is truncated.
pub fn decode_atom(buf: &[u8]) -> Result<(String, usize), WireError> {
    let (utf8, len, at) = match peek_tag(buf)? {
        tag::ATOM_UTF8_EXT => (true, usize::from(be_u16(buf, 1)?), 3),
        tag::SMALL_ATOM_UTF8_EXT => (true, usize::from(u8_at(buf, 1)?), 2),
        tag::ATOM_EXT => (false, usize::from(be_u16(buf, 1)?), 3),
        tag::SMALL_ATOM_EXT => (false, usize::from(u8_at(buf, 1)?), 2),
        found => {
            return Err(WireError::UnexpectedTag {
                expected: "atom",
                found,
            });
        }
    };

    let data = take(buf, at, len)?;
    let name = if utf8 {
        std::str::from_utf8(data)
            .map_err(|_| WireError::InvalidUtf8)?
            .to_owned()
    } else {
        data.iter().map(|&b| char::from(b)).collect()
    };
    Ok((name, at + len))
}

// ── Binaries ──────────────────────────────────────────────────────────

/// Encode raw bytes as `BINARY_EXT`.
///
/// # Errors
///
/// [`WireError::LengthOverflow`] if `data` exceeds `u32::MAX` bytes.
pub fn encode_binary(buf: &mut Vec<u8>, data: &[u8]) -> Result<(), WireError> {
    let len = u32::try_from(data.len()).map_err(|_| WireError::LengthOverflow { len: data.len() })?;
    buf.push(tag::BINARY_EXT);
    buf.extend_from_slice(&len.to_be_bytes());
    buf.extend_from_slice(data);
    Ok(())
}

/// Decode a binary term, borrowing its bytes from `buf`.
///
/// # Errors
///
/// - [`WireError::UnexpectedTag`] if the term is not a binary.
/// - [`WireError::UnexpectedEof`] if the payload is truncated.
pub fn decode_binary(buf: &[u8]) -> Result<(&[u8], usize), WireError> {
    match peek_tag(buf)? {
        tag::BINARY_EXT => {
            let len = len_of(be_u32(buf, 1)?);
            Ok((take(buf, 5, len)?, 5 + len))
        }
        found => Err(WireError::UnexpectedTag {
            expected: "binary",
            found,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn long_bytes(value: i64) -> Vec<u8> {
        let mut buf = Vec::new();
        encode_long(&mut buf, value);
        buf
    }

    #[test]
    fn small_integer_uses_one_byte_payload() {
        assert_eq!(long_bytes(42), vec![97, 42]);
        assert_eq!(long_bytes(255), vec![97, 255]);
    }

    #[test]
    fn i32_range_uses_integer_ext() {
        assert_eq!(long_bytes(256), vec![98, 0, 0, 1, 0]);
        assert_eq!(long_bytes(-1), vec![98, 0xFF, 0xFF, 0xFF, 0xFF]);
    }

    #[test]
    fn large_values_use_small_big() {
        assert_eq!(long_bytes(1 << 40), vec![110, 6, 0, 0, 0, 0, 0, 0, 1]);
        assert_eq!(
            long_bytes(i64::MIN),
            vec![110, 8, 1, 0, 0, 0, 0, 0, 0, 0, 0x80]
        );
    }

    #[test]
    fn integer_boundaries_decode_back() {
        let values = [
            0,
            255,
            256,
            -1,
            i64::from(i32::MAX),
            i64::from(i32::MIN),
            i64::from(i32::MAX) + 1,
            i64::MAX,
            i64::MIN,
        ];
        for value in values {
            let bytes = long_bytes(value);
            let (decoded, consumed) = decode_long(&bytes).unwrap();
            assert_eq!(decoded, value);
            assert_eq!(consumed, bytes.len());
        }
    }

    #[test]
    fn ulong_above_i64_is_a_bignum_that_overflows_i64() {
        let mut buf = Vec::new();
        encode_ulong(&mut buf, u64::MAX);
        assert_eq!(buf[..3], [110, 8, 0]);
        assert_eq!(decode_long(&buf), Err(WireError::IntegerOverflow));
    }

    #[test]
    fn bignum_with_nine_significant_digits_overflows() {
        let buf = [110, 9, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1];
        assert_eq!(decode_long(&buf), Err(WireError::IntegerOverflow));
    }

    #[test]
    fn decode_long_rejects_atom_tag() {
        let result = decode_long(&[119, 2, b'o', b'k']);
        assert!(matches!(
            result,
            Err(WireError::UnexpectedTag { found: 119, .. })
        ));
    }

    #[test]
    fn decode_long_truncated() {
        assert!(matches!(
            decode_long(&[98, 0, 0]),
            Err(WireError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn double_is_big_endian_ieee() {
        let mut buf = Vec::new();
        encode_double(&mut buf, 1.5);
        assert_eq!(buf, vec![70, 0x3F, 0xF8, 0, 0, 0, 0, 0, 0]);
        assert_eq!(decode_double(&buf).unwrap(), (1.5, 9));
    }

    #[test]
    fn legacy_float_text_is_parsed() {
        let mut buf = vec![99];
        let mut text = b"1.50000000000000000000e+00".to_vec();
        text.resize(31, 0);
        buf.extend_from_slice(&text);
        assert_eq!(decode_double(&buf).unwrap(), (1.5, 32));
    }

    #[test]
    fn legacy_float_garbage_is_rejected() {
        let mut buf = vec![99];
        buf.extend_from_slice(&[b'x'; 31]);
        assert_eq!(decode_double(&buf), Err(WireError::InvalidFloat));
    }

    #[test]
    fn empty_string_is_nil() {
        let mut buf = Vec::new();
        encode_string(&mut buf, "").unwrap();
        assert_eq!(buf, vec![106]);
        assert_eq!(decode_string(&buf).unwrap(), (String::new(), 1));
    }

    #[test]
    fn short_string_uses_string_ext() {
        let mut buf = Vec::new();
        encode_string(&mut buf, "hi").unwrap();
        assert_eq!(buf, vec![107, 0, 2, b'h', b'i']);
        assert_eq!(decode_string(&buf).unwrap(), ("hi".to_string(), 5));
    }

    #[test]
    fn long_string_falls_back_to_byte_list() {
        let text = "a".repeat(70_000);
        let mut buf = Vec::new();
        encode_string(&mut buf, &text).unwrap();
        assert_eq!(buf[0], tag::LIST_EXT);
        assert_eq!(buf.len(), 5 + 70_000 * 2 + 1);
        let (decoded, consumed) = decode_string(&buf).unwrap();
        assert_eq!(decoded, text);
        assert_eq!(consumed, buf.len());
    }

    #[test]
    fn list_string_with_non_byte_element_is_rejected() {
        let buf = [108, 0, 0, 0, 1, 119, 1, b'a', 106];
        assert!(matches!(
            decode_string(&buf),
            Err(WireError::UnexpectedTag { found: 119, .. })
        ));
    }

    #[test]
    fn string_with_invalid_utf8_is_rejected() {
        let buf = [107, 0, 2, 0xC3, 0x28];
        assert_eq!(decode_string(&buf), Err(WireError::InvalidUtf8));
    }

    #[test]
    fn atom_uses_small_utf8_tag() {
        let mut buf = Vec::new();
        encode_atom(&mut buf, "ok").unwrap();
        assert_eq!(buf, vec![119, 2, b'o', b'k']);
        assert_eq!(decode_atom(&buf).unwrap(), ("ok".to_string(), 4));
    }

    #[test]
    fn multibyte_atom_over_255_bytes_uses_wide_tag() {
        let name = "é".repeat(200);
        let mut buf = Vec::new();
        encode_atom(&mut buf, &name).unwrap();
        assert_eq!(buf[..3], [118, 1, 144]);
        assert_eq!(decode_atom(&buf).unwrap().0, name);
    }

    #[test]
    fn atom_over_255_chars_is_rejected() {
        let mut buf = Vec::new();
        let result = encode_atom(&mut buf, &"a".repeat(256));
        assert_eq!(result, Err(WireError::AtomTooLong { chars: 256 }));
        assert!(buf.is_empty());
    }

    #[test]
    fn latin1_atom_is_widened() {
        let buf = [115, 3, b'c', 0xE9, b'z'];
        assert_eq!(decode_atom(&buf).unwrap(), ("céz".to_string(), 5));
    }

    #[test]
    fn binary_roundtrip_borrows_payload() {
        let mut buf = Vec::new();
        encode_binary(&mut buf, &[1, 2, 3]).unwrap();
        assert_eq!(buf, vec![109, 0, 0, 0, 3, 1, 2, 3]);
        let (data, consumed) = decode_binary(&buf).unwrap();
        assert_eq!(data, &[1, 2, 3]);
        assert_eq!(consumed, 8);
    }

    #[test]
    fn binary_length_past_end_is_eof() {
        let buf = [109, 0, 0, 0, 9, 1, 2];
        assert!(matches!(
            decode_binary(&buf),
            Err(WireError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn peek_on_empty_input() {
        assert_eq!(peek_tag(&[]), Err(WireError::UnexpectedEof { offset: 0 }));
    }
}
