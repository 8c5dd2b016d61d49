//! Base and bit conversion helpers
//!
//! Values are handled as `u128` so every binary-multiple constant fits.
//! Widths are counted in bits; when a width of zero is passed the natural
//! width is used, which is the value's hex digit count times four (so `5`
//! renders as `0101`, not `101`).

use crate::error::{CalcError, Result};
use tracing::debug;

const VALUE_BITS: u32 = u128::BITS;

/// Widest digit string or position list the namespace will build
pub const MAX_WIDTH: u32 = 4096;

/// Check a caller-supplied width against [`MAX_WIDTH`].
pub fn check_width(bits: u32) -> Result<u32> {
    if bits > MAX_WIDTH {
        return Err(CalcError::domain(format!(
            "bit width {} exceeds the maximum of {}",
            bits, MAX_WIDTH
        )));
    }
    Ok(bits)
}

/// Number of significant bits in `value` (zero for zero).
pub fn bit_length(value: u128) -> u32 {
    VALUE_BITS - value.leading_zeros()
}

/// Width of `value` rounded up to a whole number of hex digits.
///
/// Zero still occupies one digit.
pub fn natural_width(value: u128) -> u32 {
    bit_length(value).div_ceil(4).max(1) * 4
}

fn bit_is_set(value: u128, index: u32) -> bool {
    index < VALUE_BITS && (value >> index) & 1 == 1
}

/// Render `value` as a string of binary digits, most significant first.
///
/// With `num_bits == 0` the natural (nibble-rounded) width is used. A width
/// narrower than the value keeps only the low `num_bits` bits.
pub fn int_to_binary_string(value: u128, num_bits: u32) -> String {
    let width = if num_bits == 0 {
        natural_width(value)
    } else {
        num_bits
    };

    (0..width)
        .rev()
        .map(|i| if bit_is_set(value, i) { '1' } else { '0' })
        .collect()
}

/// Reverse the low `bits` bits of `value`.
///
/// Fails when `value` needs more than `bits` bits, since the reversal would
/// otherwise have to pick between truncating and widening.
pub fn bit_reverse(value: u128, bits: u32) -> Result<u128> {
    if bits > VALUE_BITS {
        return Err(CalcError::domain(format!(
            "bit_reverse: width {} exceeds {} bits",
            bits, VALUE_BITS
        )));
    }

    let significant = bit_length(value);
    if significant > bits {
        return Err(CalcError::domain(format!(
            "bit_reverse: 0x{:x} needs {} bits, wider than the requested {}",
            value, significant, bits
        )));
    }

    if bits == 0 {
        return Ok(0);
    }

    let reversed = value.reverse_bits() >> (VALUE_BITS - bits);
    debug!(value = %value, bits = bits, reversed = %reversed, "bit_reverse");
    Ok(reversed)
}

/// Strip the `0x` marker and legacy long-integer `L` suffix from a hex string.
pub fn raw_hex(hex: &str) -> &str {
    let trimmed = hex.trim();
    let trimmed = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    trimmed
        .strip_suffix('L')
        .or_else(|| trimmed.strip_suffix('l'))
        .unwrap_or(trimmed)
}

/// Convert a hex string such as `0x1f` to its natural-width binary string.
pub fn hex_to_binary_string(hex: &str) -> Result<String> {
    let digits = raw_hex(hex);
    let value = u128::from_str_radix(digits, 16)
        .map_err(|e| CalcError::parse(format!("invalid hex string '{}': {}", hex, e)))?;
    Ok(int_to_binary_string(value, 0))
}

/// Parse a string of `0`/`1` digits. An optional `0b` prefix is accepted.
pub fn binary_string_to_int(binary: &str) -> Result<u128> {
    let trimmed = binary.trim();
    let digits = trimmed
        .strip_prefix("0b")
        .or_else(|| trimmed.strip_prefix("0B"))
        .unwrap_or(trimmed);
    u128::from_str_radix(digits, 2)
        .map_err(|e| CalcError::parse(format!("invalid binary string '{}': {}", binary, e)))
}

/// Split `s` into space separated groups of `group_len` characters.
///
/// Groups are aligned to the end of the string, so only the first group can
/// be short: `group_string("1010101", 4)` is `"101 0101"`. A group length of
/// zero leaves the string untouched.
pub fn group_string(s: &str, group_len: usize) -> String {
    if group_len == 0 {
        return s.to_string();
    }

    let chars: Vec<char> = s.chars().collect();
    let lead = chars.len() % group_len;
    let mut grouped = String::with_capacity(chars.len() + chars.len() / group_len);

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (i + group_len - lead) % group_len == 0 {
            grouped.push(' ');
        }
        grouped.push(*c);
    }
    grouped
}

fn bit_positions(value: u128, bits: u32, reversed: bool, set: bool) -> Vec<u32> {
    (0..bits)
        .filter(|&i| bit_is_set(value, i) == set)
        .map(|i| if reversed { bits - i - 1 } else { i })
        .collect()
}

/// Indices of the set bits among the low `bits` bits, in ascending bit order.
///
/// With `reversed`, each index `i` is reported as `bits - i - 1`; the
/// iteration order stays ascending in `i`, so the list comes out descending.
pub fn ones_positions(value: u128, bits: u32, reversed: bool) -> Vec<u32> {
    bit_positions(value, bits, reversed, true)
}

/// Indices of the clear bits among the low `bits` bits. See [`ones_positions`].
pub fn zeros_positions(value: u128, bits: u32, reversed: bool) -> Vec<u32> {
    bit_positions(value, bits, reversed, false)
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;

    #[test]
    fn test_natural_width_is_nibble_rounded() {
        assert_eq!(natural_width(0), 4);
        assert_eq!(natural_width(1), 4);
        assert_eq!(natural_width(0xf), 4);
        assert_eq!(natural_width(0x10), 8);
        assert_eq!(natural_width(0x1ff), 12);
    }

    #[test]
    fn test_int_to_binary_string() {
        assert_eq!(int_to_binary_string(5, 0), "0101");
        assert_eq!(int_to_binary_string(0, 0), "0000");
        assert_eq!(int_to_binary_string(0xa5, 0), "10100101");
        assert_eq!(int_to_binary_string(5, 8), "00000101");
    }

    #[test]
    fn test_int_to_binary_string_truncates_to_width() {
        assert_eq!(int_to_binary_string(0xff, 4), "1111");
        assert_eq!(int_to_binary_string(0x10, 4), "0000");
    }

    #[test]
    fn test_int_to_binary_string_wider_than_u128() {
        let s = int_to_binary_string(1, 130);
        assert_eq!(s.len(), 130);
        assert!(s.ends_with("01"));
        assert!(s.starts_with("00"));
    }

    #[test]
    fn test_bit_reverse() {
        assert_eq!(bit_reverse(1, 8).unwrap(), 0x80);
        assert_eq!(bit_reverse(0b0011, 4).unwrap(), 0b1100);
        assert_eq!(bit_reverse(1, 1).unwrap(), 1);
        assert_eq!(bit_reverse(0x12345678, 32).unwrap(), 0x1e6a2c48);
        assert_eq!(bit_reverse(0, 0).unwrap(), 0);
    }

    #[test]
    fn test_bit_reverse_rejects_narrow_width() {
        assert!(matches!(bit_reverse(0x100, 8), Err(CalcError::Domain(_))));
        assert!(bit_reverse(1, 129).is_err());
    }

    #[test]
    fn test_raw_hex() {
        assert_eq!(raw_hex("0x1f"), "1f");
        assert_eq!(raw_hex("0X1F"), "1F");
        assert_eq!(raw_hex("0xffL"), "ff");
        assert_eq!(raw_hex("abc"), "abc");
    }

    #[test]
    fn test_hex_to_binary_string() {
        assert_eq!(hex_to_binary_string("0x1f").unwrap(), "00011111");
        assert_eq!(hex_to_binary_string("a").unwrap(), "1010");
        assert_eq!(hex_to_binary_string("0xffL").unwrap(), "11111111");
        assert!(matches!(
            hex_to_binary_string("0xzz"),
            Err(CalcError::Parse(_))
        ));
    }

    #[test]
    fn test_binary_string_to_int() {
        assert_eq!(binary_string_to_int("101").unwrap(), 5);
        assert_eq!(binary_string_to_int("0b1111").unwrap(), 15);
        assert_eq!(binary_string_to_int(" 0001 ").unwrap(), 1);
        assert!(matches!(
            binary_string_to_int("102"),
            Err(CalcError::Parse(_))
        ));
        assert!(binary_string_to_int("").is_err());
    }

    #[test]
    fn test_group_string_aligns_to_end() {
        assert_eq!(group_string("10101010", 4), "1010 1010");
        assert_eq!(group_string("1010101", 4), "101 0101");
        assert_eq!(group_string("1", 4), "1");
        assert_eq!(group_string("abcdefg", 3), "a bcd efg");
        assert_eq!(group_string("", 4), "");
        assert_eq!(group_string("abc", 0), "abc");
    }

    #[test]
    fn test_ones_and_zeros() {
        assert_eq!(ones_positions(0b1010, 4, false), vec![1, 3]);
        assert_eq!(zeros_positions(0b1010, 4, false), vec![0, 2]);
    }

    #[test]
    fn test_reversed_positions_keep_iteration_order() {
        assert_eq!(ones_positions(0b0011, 8, true), vec![7, 6]);
        assert_eq!(zeros_positions(0b1110, 4, true), vec![3]);
    }

    #[test]
    fn test_positions_default_width() {
        assert_eq!(ones_positions(1 << 31, 32, false), vec![31]);
        assert_eq!(zeros_positions(u32::MAX as u128, 32, false), Vec::<u32>::new());
        assert!(ones_positions(1 << 40, 32, false).is_empty());
    }

    #[test]
    fn test_check_width() {
        assert_eq!(check_width(0).unwrap(), 0);
        assert_eq!(check_width(MAX_WIDTH).unwrap(), MAX_WIDTH);
        assert!(matches!(
            check_width(4_000_000_000),
            Err(CalcError::Domain(_))
        ));
    }
}
