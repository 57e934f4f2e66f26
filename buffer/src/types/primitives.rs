//! Codec implementations for Rust primitive types.
//!
//! Each primitive maps to the wire type generated table readers use for it:
//!
//! | Rust   | wire                          |
//! |--------|-------------------------------|
//! | `bool` | one byte, non-zero is true    |
//! | `u8`   | one raw byte                  |
//! | `i16`  | variable-length short         |
//! | `i32`  | variable-length int           |
//! | `i64`  | variable-length long          |
//! | `f32`  | little-endian IEEE-754 float  |
//! | `f64`  | little-endian IEEE-754 double |
//!
//! Fixed-width and rotated integers have no dedicated Rust type; call the matching
//! [`crate::ReadBuf`] and [`crate::WriteBuf`] methods directly.

use crate::{varint, EncodeSize, Error, Read, ReadBuf, Write, WriteBuf};
use bytes::{Buf, BufMut};

macro_rules! impl_primitive {
    ($type:ty, $read_method:ident, $write_method:ident, $size:expr) => {
        impl Write for $type {
            #[inline]
            fn write(&self, buf: &mut impl BufMut) {
                buf.$write_method(*self);
            }
        }

        impl Read for $type {
            #[inline]
            fn read(buf: &mut impl Buf) -> Result<Self, Error> {
                buf.$read_method()
            }
        }

        impl EncodeSize for $type {
            #[inline]
            fn encode_size(&self) -> usize {
                let size: fn($type) -> usize = $size;
                size(*self)
            }
        }
    };
}

impl_primitive!(bool, read_bool, write_bool, |_| 1);
impl_primitive!(u8, read_byte, write_byte, |_| 1);
impl_primitive!(i16, read_short, write_short, varint::size_short);
impl_primitive!(i32, read_int, write_int, varint::size_int);
impl_primitive!(i64, read_long, write_long, varint::size_long);
impl_primitive!(f32, read_float, write_float, |_| 4);
impl_primitive!(f64, read_double, write_double, |_| 8);
