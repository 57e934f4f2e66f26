//! Tiered variable-length integer encoding and decoding
//!
//! Non-negative values are written in the smallest tier whose limit exceeds them. The tier is
//! announced by a unary tag in the leading bits of the first byte:
//!
//! | bytes | tag         | payload bits                  |
//! |-------|-------------|-------------------------------|
//! | 1     | `0`         | 7                             |
//! | 2     | `10`        | 14                            |
//! | 3     | `110`       | 21                            |
//! | 4     | `1110`      | 28                            |
//! | 5     | `11110`     | 35 (`i64` only)               |
//! | 6     | `111110`    | 42 (`i64` only)               |
//! | 7     | `1111110`   | 49 (`i64` only)               |
//! | 8     | `11111110`  | 56 (`i64` only)               |
//!
//! The payload is big-endian and starts in the bits of the first byte left over by the tag.
//! Negative values, and values too large for the widest tier, are escaped: a header byte
//! (`0xff` for `i16`, `0xf0` for `i32`, `0xff` for `i64`) followed by the full value,
//! big-endian. The limits below are part of the wire format and must not be changed, even
//! where a tier could hold more than its limit admits (the 7-byte `i64` tier stops at `2^45`).
//!
//! Signed variants (`sint`, `slong`) rotate the value left by one bit before encoding and right
//! by one bit after decoding. This is a rotation, not ZigZag.

use crate::{
    util::{at_least, peek},
    Error,
};
use bytes::{Buf, BufMut};

/// Exclusive upper bounds of the non-escaped `i16` tiers.
const SHORT_LIMITS: [i16; 2] = [0x80, 0x4000];

/// Exclusive upper bounds of the non-escaped `i32` tiers.
const INT_LIMITS: [i32; 4] = [0x80, 0x4000, 0x20_0000, 0x1000_0000];

/// Exclusive upper bounds of the non-escaped `i64` tiers.
const LONG_LIMITS: [i64; 8] = [
    0x80,
    0x4000,
    0x20_0000,
    0x1000_0000,
    0x8_0000_0000,
    0x400_0000_0000,
    0x2000_0000_0000,
    0x100_0000_0000_0000,
];

const SHORT_ESCAPE: u8 = 0xff;
const INT_ESCAPE: u8 = 0xf0;
const LONG_ESCAPE: u8 = 0xff;

/// Maximum encoded length of an `i16`.
pub const MAX_SHORT_SIZE: usize = 3;

/// Maximum encoded length of an `i32`.
pub const MAX_INT_SIZE: usize = 5;

/// Maximum encoded length of an `i64`.
pub const MAX_LONG_SIZE: usize = 9;

/// Returns the tag bits that announce a tier of `len` bytes.
#[inline]
fn tag(len: usize) -> u8 {
    (0xff00u16 >> (len - 1)) as u8
}

/// Returns the tier of `value` given the limits of its width, or `None` if it must be escaped.
#[inline]
fn tier<T: Copy + PartialOrd + Default>(value: T, limits: &[T]) -> Option<usize> {
    if value < T::default() {
        return None;
    }
    limits.iter().position(|limit| value < *limit).map(|i| i + 1)
}

/// Writes the low `len` bytes of `payload`, big-endian, with the tier tag in the first byte.
#[inline]
fn put_tiered(payload: u64, len: usize, buf: &mut impl BufMut) {
    let word = (u64::from(tag(len)) << (8 * (len - 1))) | payload;
    buf.put_slice(&word.to_be_bytes()[8 - len..]);
}

/// Writes `header` followed by `value` verbatim.
#[inline]
fn put_escaped<const N: usize>(header: u8, value: [u8; N], buf: &mut impl BufMut) {
    let mut out = [0u8; MAX_LONG_SIZE];
    out[0] = header;
    out[1..=N].copy_from_slice(&value);
    buf.put_slice(&out[..=N]);
}

/// Reads a big-endian word of `len` bytes, keeping only the `header_bits` low bits of the
/// first byte.
#[inline]
fn get_word(buf: &mut impl Buf, len: usize, header_bits: usize) -> Result<u64, Error> {
    at_least(buf, len)?;
    let header = buf.get_u8();
    let mut word = u64::from(header) & ((1u64 << header_bits) - 1);
    for _ in 1..len {
        word = (word << 8) | u64::from(buf.get_u8());
    }
    Ok(word)
}

/// Calculates the number of bytes needed to encode an `i16`.
pub fn size_short(value: i16) -> usize {
    tier(value, &SHORT_LIMITS).unwrap_or(MAX_SHORT_SIZE)
}

/// Encodes an `i16`.
pub fn write_short(value: i16, buf: &mut impl BufMut) {
    match tier(value, &SHORT_LIMITS) {
        Some(len) => put_tiered(value as u64, len, buf),
        None => put_escaped(SHORT_ESCAPE, value.to_be_bytes(), buf),
    }
}

/// Decodes an `i16`.
///
/// Headers in `0xc0..0xff` are not assigned to any tier and fail with [`Error::InvalidTag`].
pub fn read_short(buf: &mut impl Buf) -> Result<i16, Error> {
    let word = match peek(buf)? {
        0x00..=0x7f => get_word(buf, 1, 7)?,
        0x80..=0xbf => get_word(buf, 2, 6)?,
        SHORT_ESCAPE => get_word(buf, MAX_SHORT_SIZE, 0)?,
        header => return Err(Error::InvalidTag(header)),
    };
    Ok(word as u16 as i16)
}

/// Calculates the number of bytes needed to encode an `i32`.
pub fn size_int(value: i32) -> usize {
    tier(value, &INT_LIMITS).unwrap_or(MAX_INT_SIZE)
}

/// Encodes an `i32`.
pub fn write_int(value: i32, buf: &mut impl BufMut) {
    match tier(value, &INT_LIMITS) {
        Some(len) => put_tiered(value as u64, len, buf),
        None => put_escaped(INT_ESCAPE, value.to_be_bytes(), buf),
    }
}

/// Decodes an `i32`.
///
/// Any header of `0xf0` or above selects the escaped form; its low bits are ignored.
pub fn read_int(buf: &mut impl Buf) -> Result<i32, Error> {
    let len = (peek(buf)?.leading_ones() as usize + 1).min(MAX_INT_SIZE);
    let header_bits = if len == MAX_INT_SIZE { 0 } else { 8 - len };
    Ok(get_word(buf, len, header_bits)? as u32 as i32)
}

/// Calculates the number of bytes needed to encode a `u32`.
///
/// # Panics
///
/// Panics if `value` exceeds `i32::MAX`.
pub fn size_uint(value: u32) -> usize {
    size_int(as_signed(value))
}

/// Encodes a `u32` with the `i32` encoder.
///
/// # Panics
///
/// Panics if `value` exceeds `i32::MAX`: such a value would decode as negative.
pub fn write_uint(value: u32, buf: &mut impl BufMut) {
    write_int(as_signed(value), buf);
}

/// Decodes a `u32` written by [`write_uint`].
///
/// Fails with [`Error::InvalidUnsigned`] if the escaped form carries a negative value.
pub fn read_uint(buf: &mut impl Buf) -> Result<u32, Error> {
    let value = read_int(buf)?;
    u32::try_from(value).map_err(|_| Error::InvalidUnsigned(value))
}

#[inline]
fn as_signed(value: u32) -> i32 {
    i32::try_from(value).expect("uint value exceeds i32::MAX")
}

/// Calculates the number of bytes needed to encode an `i64`.
pub fn size_long(value: i64) -> usize {
    tier(value, &LONG_LIMITS).unwrap_or(MAX_LONG_SIZE)
}

/// Encodes an `i64`.
pub fn write_long(value: i64, buf: &mut impl BufMut) {
    match tier(value, &LONG_LIMITS) {
        Some(len) => put_tiered(value as u64, len, buf),
        None => put_escaped(LONG_ESCAPE, value.to_be_bytes(), buf),
    }
}

/// Decodes an `i64`.
pub fn read_long(buf: &mut impl Buf) -> Result<i64, Error> {
    // `0xff` has eight leading ones and selects the escaped form, which keeps no header bits.
    let len = peek(buf)?.leading_ones() as usize + 1;
    let header_bits = 8usize.saturating_sub(len);
    Ok(get_word(buf, len, header_bits)? as i64)
}

/// A signed integer that is rotated by one bit around the varint encoding.
///
/// Rotating left moves the sign bit into the least significant bit, so small non-negative
/// values stay small. Negative values remain negative after the rotation and are escaped.
pub trait Rotate: Copy {
    /// Rotates the value left by one bit.
    fn rotate(self) -> Self;

    /// Rotates a (rotated) value right by one bit.
    fn unrotate(self) -> Self;
}

macro_rules! impl_rotate {
    ($type:ty) => {
        impl Rotate for $type {
            #[inline]
            fn rotate(self) -> Self {
                self.rotate_left(1)
            }

            #[inline]
            fn unrotate(self) -> Self {
                self.rotate_right(1)
            }
        }
    };
}
impl_rotate!(i32);
impl_rotate!(i64);

/// Calculates the number of bytes needed to encode a rotated `i32`.
pub fn size_sint(value: i32) -> usize {
    size_int(value.rotate())
}

/// Encodes a rotated `i32`.
pub fn write_sint(value: i32, buf: &mut impl BufMut) {
    write_int(value.rotate(), buf);
}

/// Decodes a rotated `i32`.
pub fn read_sint(buf: &mut impl Buf) -> Result<i32, Error> {
    Ok(read_int(buf)?.unrotate())
}

/// Calculates the number of bytes needed to encode a rotated `i64`.
pub fn size_slong(value: i64) -> usize {
    size_long(value.rotate())
}

/// Encodes a rotated `i64`.
pub fn write_slong(value: i64, buf: &mut impl BufMut) {
    write_long(value.rotate(), buf);
}

/// Decodes a rotated `i64`.
pub fn read_slong(buf: &mut impl Buf) -> Result<i64, Error> {
    Ok(read_long(buf)?.unrotate())
}
