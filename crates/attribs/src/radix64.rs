//! crates/attribs/src/radix64.rs
//!
//! Variable-length printable integer encoding used for every field of the
//! extended attribute blob.
//!
//! Values are written most-significant digit first using the alphabet
//! `A-Z a-z 0-9 + /`, one digit per six bits, with no padding. Zero encodes as
//! a single `A`. Negative values carry a leading `-` followed by the digits of
//! their magnitude. Unsigned 64-bit fields travel through their `i64` bit
//! pattern, so values above `i64::MAX` appear with a `-` prefix on the wire;
//! older backups were written the same way and must keep decoding.

use crate::error::DecodeError;

const DIGITS: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Largest accumulator value that can still be shifted by six bits.
const SHIFT_LIMIT: u64 = u64::MAX >> 6;

/// Maps a digit byte back to its six-bit value.
const fn digit_value(byte: u8) -> Option<u64> {
    let value = match byte {
        b'A'..=b'Z' => byte - b'A',
        b'a'..=b'z' => byte - b'a' + 26,
        b'0'..=b'9' => byte - b'0' + 52,
        b'+' => 62,
        b'/' => 63,
        _ => return None,
    };
    Some(value as u64)
}

/// Appends the encoding of `value` to `out`.
///
/// The output buffer grows as needed; there is no fixed scratch area to
/// overrun regardless of the value supplied.
pub fn encode_i64_into(value: i64, out: &mut String) {
    if value < 0 {
        out.push('-');
    }
    let magnitude = value.unsigned_abs();

    // At most eleven digits are needed for a 64-bit magnitude.
    let mut scratch = [0u8; 11];
    let mut start = scratch.len();
    let mut remaining = magnitude;
    loop {
        start -= 1;
        scratch[start] = DIGITS[(remaining & 0x3f) as usize];
        remaining >>= 6;
        if remaining == 0 {
            break;
        }
    }

    for &digit in &scratch[start..] {
        out.push(char::from(digit));
    }
}

/// Encodes `value` into a fresh string.
#[must_use]
pub fn encode_i64(value: i64) -> String {
    let mut out = String::with_capacity(12);
    encode_i64_into(value, &mut out);
    out
}

/// Encodes an unsigned value through its two's-complement bit pattern.
#[must_use]
pub fn encode_u64(value: u64) -> String {
    encode_i64(value as i64)
}

/// Decodes a single field.
///
/// The field must be non-empty and contain nothing but an optional leading
/// `-` and alphabet digits.
pub fn decode_i64(field: &str) -> Result<i64, DecodeError> {
    let (negative, digits) = match field.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, field),
    };

    if digits.is_empty() {
        return Err(DecodeError::EmptyField);
    }

    let mut value: u64 = 0;
    for (offset, byte) in digits.bytes().enumerate() {
        let digit = digit_value(byte).ok_or(DecodeError::InvalidDigit {
            digit: char::from(byte),
            offset: offset + usize::from(negative),
        })?;
        if value > SHIFT_LIMIT {
            return Err(DecodeError::Overflow {
                field: field.to_owned(),
            });
        }
        value = (value << 6) | digit;
    }

    let signed = value as i64;
    Ok(if negative { signed.wrapping_neg() } else { signed })
}

/// Decodes a field that was written from an unsigned value.
pub fn decode_u64(field: &str) -> Result<u64, DecodeError> {
    decode_i64(field).map(|value| value as u64)
}
