//! LEB128 variable-length integer decoding.
//!
//! The WASM binary format encodes every integer that is not part of the fixed
//! header as LEB128: seven payload bits per byte, least significant group
//! first, with the top bit flagging continuation. Section sizes, function
//! counts and most instruction immediates use the unsigned flavor; constant
//! operands and block-type indices use the signed flavor, which sign-extends
//! from bit 6 of the final byte.
//!
//! Both decoders follow a `(value, consumed)` contract instead of returning a
//! [`crate::Result`]: `consumed == 0` only happens for empty input and is the
//! "could not progress" signal callers test for. A buffer that ends while the
//! continuation bit is still set yields the partial value together with the
//! number of bytes actually read, and payload bits past position 63 are
//! discarded, so no input can make these functions fail or wrap.
//!
//! # Usage Examples
//!
//! ```rust
//! use wasmscope::{decode_sleb128, decode_uleb128};
//!
//! assert_eq!(decode_uleb128(&[0xE5, 0x8E, 0x26]), (624_485, 3));
//! assert_eq!(decode_sleb128(&[0x7F]), (-1, 1));
//! ```

/// Decode an unsigned LEB128 integer from the start of `data`.
///
/// Returns the decoded value and the number of bytes consumed. Consumption
/// stops after the first byte without the continuation bit; if the buffer
/// ends before that byte, the partial value and `data.len()` are returned,
/// and an empty buffer returns `(0, 0)`.
///
/// # Arguments
/// * `data` - The bytes to decode from
///
/// # Examples
///
/// ```rust
/// use wasmscope::decode_uleb128;
///
/// assert_eq!(decode_uleb128(&[0x00]), (0, 1));
/// assert_eq!(decode_uleb128(&[0x80, 0x01]), (128, 2));
/// ```
#[must_use]
pub fn decode_uleb128(data: &[u8]) -> (u64, usize) {
    let mut result: u64 = 0;
    let mut shift: u32 = 0;

    for (i, &byte) in data.iter().enumerate() {
        if shift < 64 {
            result |= u64::from(byte & 0x7f) << shift;
        }
        shift = shift.saturating_add(7);

        if byte & 0x80 == 0 {
            return (result, i + 1);
        }
    }

    (result, data.len())
}

/// Decode a signed LEB128 integer from the start of `data`.
///
/// Same grouping as [`decode_uleb128`], then sign-extended from bit 6 of the
/// final consumed byte, so two's-complement values round-trip exactly:
/// `0x7F` is -1 and `0x80 0x7F` is -128. Truncated and empty input behave as
/// for the unsigned decoder.
///
/// # Arguments
/// * `data` - The bytes to decode from
///
/// # Examples
///
/// ```rust
/// use wasmscope::decode_sleb128;
///
/// assert_eq!(decode_sleb128(&[0x2A]), (42, 1));
/// assert_eq!(decode_sleb128(&[0x80, 0x7F]), (-128, 2));
/// ```
#[must_use]
pub fn decode_sleb128(data: &[u8]) -> (i64, usize) {
    let mut result: u64 = 0;
    let mut shift: u32 = 0;
    let mut consumed = 0;
    let mut byte = 0u8;

    for (i, &current) in data.iter().enumerate() {
        byte = current;
        if shift < 64 {
            result |= u64::from(current & 0x7f) << shift;
        }
        shift = shift.saturating_add(7);
        consumed = i + 1;

        if current & 0x80 == 0 {
            break;
        }
    }

    // Sign extend from bit 6 of the final byte
    if shift < 64 && byte & 0x40 != 0 {
        result |= u64::MAX << shift;
    }

    #[allow(clippy::cast_possible_wrap)]
    (result as i64, consumed)
}
