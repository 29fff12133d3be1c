//! EVM ABI word codec.
//!
//! Only the subset the trap exchanges with the operator is implemented:
//! static `uint256` words and a single trailing dynamic `string`. Integers
//! are 32-byte big-endian words; dynamic data is length-prefixed and
//! right-padded to a word boundary.

use crate::{config::WORD_SIZE, error::DecodeError};

/// Encode an unsigned integer as one left-padded 32-byte word.
pub fn encode_word(value: u128) -> [u8; WORD_SIZE] {
    let mut word = [0u8; WORD_SIZE];
    word[WORD_SIZE - 16..].copy_from_slice(&value.to_be_bytes());
    word
}

/// Borrow word `index` from `buf`.
///
/// Callers check the overall buffer length first; a short buffer here is
/// still reported as a length error rather than a panic.
pub fn word_at(buf: &[u8], index: usize) -> Result<&[u8], DecodeError> {
    let start = index.checked_mul(WORD_SIZE);
    let end = start.and_then(|s| s.checked_add(WORD_SIZE));
    match (start, end) {
        (Some(start), Some(end)) if end <= buf.len() => Ok(&buf[start..end]),
        _ => Err(DecodeError::InvalidLength {
            expected: index.saturating_add(1).saturating_mul(WORD_SIZE),
            actual: buf.len(),
        }),
    }
}

/// Decode word `index` as a `u64`, rejecting values with any high bit set.
pub fn decode_u64(buf: &[u8], index: usize) -> Result<u64, DecodeError> {
    let word = word_at(buf, index)?;
    let (high, low) = word.split_at(WORD_SIZE - 8);
    if high.iter().any(|b| *b != 0) {
        return Err(DecodeError::WordOverflow { index, bits: 64 });
    }
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(low);
    Ok(u64::from_be_bytes(bytes))
}

/// Decode word `index` as a `u128`, rejecting values with any high bit set.
pub fn decode_u128(buf: &[u8], index: usize) -> Result<u128, DecodeError> {
    let word = word_at(buf, index)?;
    let (high, low) = word.split_at(WORD_SIZE - 16);
    if high.iter().any(|b| *b != 0) {
        return Err(DecodeError::WordOverflow { index, bits: 128 });
    }
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(low);
    Ok(u128::from_be_bytes(bytes))
}

/// Number of bytes `len` occupies once right-padded to a word boundary.
#[inline]
pub fn padded_len(len: usize) -> usize {
    len.div_ceil(WORD_SIZE).saturating_mul(WORD_SIZE)
}

/// Append the tail encoding of a dynamic string: a length word followed by
/// the bytes, zero-padded to a word boundary.
pub fn append_string_tail(out: &mut Vec<u8>, s: &str) {
    out.extend_from_slice(&encode_word(s.len() as u128));
    out.extend_from_slice(s.as_bytes());
    let padding = padded_len(s.len()).saturating_sub(s.len());
    out.resize(out.len().saturating_add(padding), 0);
}

/// Decode a dynamic string whose tail starts at byte `offset` of `buf`.
///
/// The tail must end exactly at the end of `buf`; trailing garbage is
/// rejected so each payload has a single canonical encoding.
pub fn decode_string_tail(buf: &[u8], offset: usize) -> Result<String, DecodeError> {
    if !offset.is_multiple_of(WORD_SIZE) || offset >= buf.len() {
        return Err(DecodeError::InvalidStringOffset {
            offset: offset as u64,
        });
    }
    let tail = &buf[offset..];
    let len = decode_u64(tail, 0)?;
    let len = usize::try_from(len).map_err(|_| DecodeError::WordOverflow {
        index: offset / WORD_SIZE,
        bits: usize::BITS,
    })?;
    let expected = WORD_SIZE.saturating_add(padded_len(len));
    if tail.len() != expected {
        return Err(DecodeError::InvalidLength {
            expected: offset.saturating_add(expected),
            actual: buf.len(),
        });
    }
    let data = &tail[WORD_SIZE..];
    let (text, padding) = data.split_at(len);
    if padding.iter().any(|b| *b != 0) {
        return Err(DecodeError::NonZeroPadding {
            offset: offset.saturating_add(WORD_SIZE).saturating_add(len),
        });
    }
    String::from_utf8(text.to_vec()).map_err(|_| DecodeError::InvalidUtf8)
}
