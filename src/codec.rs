use num_bigint::BigUint;
use num_traits::{Num, Zero};
use crate::errors::KexError;

/// Lowercase hex, left-padded to a whole number of bytes. Zero renders as `00`.
#[must_use]
pub fn to_hex(n: &BigUint, prefix: bool) -> String {
    let digits = n.to_str_radix(16);
    let pad = if digits.len() % 2 == 1 { "0" } else { "" };
    let head = if prefix { "0x" } else { "" };
    format!("{head}{pad}{digits}")
}

/// Big-endian interpretation; empty input yields 0.
#[must_use]
pub fn bytes_to_int(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_be(bytes)
}

/// Minimal big-endian bytes with no leading zeros. Zero encodes as an empty vector.
#[must_use]
pub fn int_to_bytes(n: &BigUint) -> Vec<u8> {
    if n.is_zero() {
        return Vec::new();
    }
    n.to_bytes_be()
}

/// Number of whole bytes needed to hold `n`, never less than one.
#[must_use]
pub fn byte_len(n: &BigUint) -> usize {
    int_to_bytes(n).len().max(1)
}

/// Decode a hex string with an optional `0x` prefix. Odd digit counts get an implicit leading zero.
///
/// # Errors
///
/// Returns `KexError::Parse` if the input contains a non-hex character.
pub fn hex_to_bytes(s: &str) -> Result<Vec<u8>, KexError> {
    let digits = strip_hex_prefix(s).unwrap_or(s);
    let res = if digits.len() % 2 == 1 {
        hex::decode(format!("0{digits}"))
    } else {
        hex::decode(digits)
    };
    res.map_err(|e| KexError::Parse(e.to_string()))
}

/// Parse an unsigned integer: hex when `0x`-prefixed, decimal otherwise.
/// Only bare ASCII digits are accepted; no sign, no `_` separators.
///
/// # Errors
///
/// Returns `KexError::Parse` on empty input or invalid digits.
pub fn parse_uint(s: &str) -> Result<BigUint, KexError> {
    let s = s.trim();
    let (digits, is_hex) = match strip_hex_prefix(s) {
        Some(rest) => (rest, true),
        None => (s, false),
    };
    if digits.is_empty() {
        return Err(KexError::Parse("empty integer literal".into()));
    }
    if is_hex {
        if !digits.bytes().all(|c| c.is_ascii_hexdigit()) {
            return Err(KexError::Parse(format!("{s:?}: invalid hex digit")));
        }
        return hex_to_bytes(digits).map(|b| bytes_to_int(&b));
    }
    if !digits.bytes().all(|c| c.is_ascii_digit()) {
        return Err(KexError::Parse(format!("{s:?}: invalid decimal digit")));
    }
    BigUint::from_str_radix(digits, 10)
        .map_err(|e| KexError::Parse(format!("{s:?}: {e}")))
}

fn strip_hex_prefix(s: &str) -> Option<&str> {
    s.strip_prefix("0x").or_else(|| s.strip_prefix("0X"))
}
