//! ASCII hexadecimal decoding for the DATA region
//!
//! Two decoders are provided:
//!
//! - [`decode_hex_lenient`] follows the conventional unsigned base-16
//!   conversion of C runtimes: it takes whatever valid prefix it can find
//!   and never fails. This is what the reader firmware has always done.
//! - [`decode_hex_strict`] accepts exactly eight hex digits and reports
//!   anything else.

use crate::frame::DATA_LEN;

/// Errors from strict hex decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// Input is not exactly `DATA_LEN` bytes long
    InvalidLength {
        /// Length of the rejected input
        len: usize,
    },
    /// A byte that is not an ASCII hex digit
    InvalidDigit {
        /// Position of the byte within the input
        index: usize,
        /// The offending byte
        byte: u8,
    },
}

/// Value of a single ASCII hex digit
#[inline]
fn digit_value(byte: u8) -> Option<u32> {
    match byte {
        b'0'..=b'9' => Some((byte - b'0') as u32),
        b'a'..=b'f' => Some((byte - b'a' + 10) as u32),
        b'A'..=b'F' => Some((byte - b'A' + 10) as u32),
        _ => None,
    }
}

/// C `isspace` in the "C" locale (includes vertical tab)
#[inline]
fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | 0x0B | 0x0C | b'\r')
}

/// Decode hex text leniently
///
/// - Leading whitespace is skipped
/// - An optional `+` or `-` sign is accepted
/// - An optional `0x`/`0X` prefix is skipped when a digit follows it
/// - Digits are consumed up to the first non-digit; the rest is ignored
///
/// No digits at all yields 0. Overflow saturates to `u32::MAX`. A `-` sign
/// negates the magnitude modulo 2^32.
pub fn decode_hex_lenient(text: &[u8]) -> u32 {
    let mut i = 0;
    while i < text.len() && is_space(text[i]) {
        i += 1;
    }

    let mut negative = false;
    match text.get(i) {
        Some(b'+') => i += 1,
        Some(b'-') => {
            negative = true;
            i += 1;
        }
        _ => {}
    }

    if text.get(i) == Some(&b'0')
        && matches!(text.get(i + 1), Some(b'x' | b'X'))
        && text.get(i + 2).copied().and_then(digit_value).is_some()
    {
        i += 2;
    }

    let mut value: u32 = 0;
    let mut overflow = false;
    for &byte in &text[i..] {
        let Some(digit) = digit_value(byte) else {
            break;
        };
        match value.checked_mul(16).and_then(|v| v.checked_add(digit)) {
            Some(v) => value = v,
            None => overflow = true,
        }
    }

    if overflow {
        u32::MAX
    } else if negative {
        value.wrapping_neg()
    } else {
        value
    }
}

/// Decode exactly `DATA_LEN` hex digits
///
/// Upper and lower case are both accepted. Eight digits always fit in a
/// `u32`, so there is no overflow case.
pub fn decode_hex_strict(text: &[u8]) -> Result<u32, DecodeError> {
    if text.len() != DATA_LEN {
        return Err(DecodeError::InvalidLength { len: text.len() });
    }

    let mut value: u32 = 0;
    for (index, &byte) in text.iter().enumerate() {
        let digit = digit_value(byte).ok_or(DecodeError::InvalidDigit { index, byte })?;
        value = (value << 4) | digit;
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_lenient_plain() {
        assert_eq!(decode_hex_lenient(b"0000ABCD"), 0xABCD);
        assert_eq!(decode_hex_lenient(b"DEADBEEF"), 0xDEAD_BEEF);
        assert_eq!(decode_hex_lenient(b"deadbeef"), 0xDEAD_BEEF);
    }

    #[test]
    fn test_lenient_boundaries() {
        assert_eq!(decode_hex_lenient(b"FFFFFFFF"), 4_294_967_295);
        assert_eq!(decode_hex_lenient(b"00000000"), 0);
    }

    #[test]
    fn test_lenient_stops_at_first_non_digit() {
        assert_eq!(decode_hex_lenient(b"12G45678"), 0x12);
        assert_eq!(decode_hex_lenient(b"1234\05678"), 0x1234);
    }

    #[test]
    fn test_lenient_no_digits_is_zero() {
        assert_eq!(decode_hex_lenient(b"ZZZZZZZZ"), 0);
        assert_eq!(decode_hex_lenient(b""), 0);
        assert_eq!(decode_hex_lenient(b"   -"), 0);
    }

    #[test]
    fn test_lenient_whitespace_and_sign() {
        assert_eq!(decode_hex_lenient(b"  +00FF"), 0xFF);
        assert_eq!(decode_hex_lenient(b"\x0b\t1A"), 0x1A);
        assert_eq!(decode_hex_lenient(b"-0000001"), u32::MAX);
        assert_eq!(decode_hex_lenient(b"-10"), 0xFFFF_FFF0);
    }

    #[test]
    fn test_lenient_prefix() {
        assert_eq!(decode_hex_lenient(b"0x00ABCD"), 0xABCD);
        assert_eq!(decode_hex_lenient(b"0X1f"), 0x1F);
        // "0x" without a digit after it parses the leading zero only
        assert_eq!(decode_hex_lenient(b"0xZZZZZZ"), 0);
    }

    #[test]
    fn test_lenient_overflow_saturates() {
        assert_eq!(decode_hex_lenient(b"123456789"), u32::MAX);
        assert_eq!(decode_hex_lenient(b"-123456789"), u32::MAX);
        // Leading zeros do not count towards overflow
        assert_eq!(decode_hex_lenient(b"0000000012345678"), 0x1234_5678);
    }

    #[test]
    fn test_strict_ok() {
        assert_eq!(decode_hex_strict(b"0000ABCD"), Ok(43981));
        assert_eq!(decode_hex_strict(b"deadBEEF"), Ok(0xDEAD_BEEF));
    }

    #[test]
    fn test_strict_rejects_length() {
        assert_eq!(
            decode_hex_strict(b"ABCD"),
            Err(DecodeError::InvalidLength { len: 4 })
        );
        assert_eq!(
            decode_hex_strict(b"0x0000ABCD"),
            Err(DecodeError::InvalidLength { len: 10 })
        );
    }

    #[test]
    fn test_strict_rejects_digit() {
        assert_eq!(
            decode_hex_strict(b"00 0ABCD"),
            Err(DecodeError::InvalidDigit {
                index: 2,
                byte: b' '
            })
        );
        assert_eq!(
            decode_hex_strict(b"+000ABCD"),
            Err(DecodeError::InvalidDigit {
                index: 0,
                byte: b'+'
            })
        );
    }

    proptest! {
        #[test]
        fn prop_both_decoders_agree_on_valid_data(code in any::<u32>(), lower in any::<bool>()) {
            let text = if lower {
                format!("{:08x}", code)
            } else {
                format!("{:08X}", code)
            };
            prop_assert_eq!(decode_hex_strict(text.as_bytes()), Ok(code));
            prop_assert_eq!(decode_hex_lenient(text.as_bytes()), code);
        }

        #[test]
        fn prop_lenient_never_panics(bytes in proptest::collection::vec(any::<u8>(), 0..32)) {
            let _ = decode_hex_lenient(&bytes);
        }

        #[test]
        fn prop_strict_rejects_non_hex(code in any::<u32>(), index in 0usize..DATA_LEN, byte in any::<u8>()) {
            prop_assume!(!byte.is_ascii_hexdigit());
            let mut text = [0u8; DATA_LEN];
            text.copy_from_slice(format!("{:08X}", code).as_bytes());
            text[index] = byte;
            prop_assert_eq!(
                decode_hex_strict(&text),
                Err(DecodeError::InvalidDigit { index, byte })
            );
        }
    }
}
