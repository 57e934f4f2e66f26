//! Primitive reads and writes for any [`Buf`] or [`BufMut`].
//!
//! Both traits are implemented for every buffer type, so the same calls work on a [`ByteBuf`],
//! a [`crate::Window`], a `&[u8]` or a `Vec<u8>`. Each primitive is written with a single
//! `put_slice`, and each read checks that the whole value is present before consuming any of it.

use crate::{util::at_least, varint, ByteBuf, Error};
use bytes::{Buf, BufMut, Bytes};

/// Decodes primitives from the front of a buffer.
pub trait ReadBuf: Buf + Sized {
    /// Reads a byte as a boolean. Any non-zero value is true.
    fn read_bool(&mut self) -> Result<bool, Error> {
        Ok(self.read_byte()? != 0)
    }

    /// Reads a raw byte.
    fn read_byte(&mut self) -> Result<u8, Error> {
        at_least(self, 1)?;
        Ok(self.get_u8())
    }

    /// Reads a variable-length `i16`.
    fn read_short(&mut self) -> Result<i16, Error> {
        varint::read_short(self)
    }

    /// Reads a variable-length `i32`.
    fn read_int(&mut self) -> Result<i32, Error> {
        varint::read_int(self)
    }

    /// Reads a variable-length `i32` that must not be negative.
    fn read_uint(&mut self) -> Result<u32, Error> {
        varint::read_uint(self)
    }

    /// Reads a variable-length `i64`.
    fn read_long(&mut self) -> Result<i64, Error> {
        varint::read_long(self)
    }

    /// Reads a rotated variable-length `i32`.
    fn read_sint(&mut self) -> Result<i32, Error> {
        varint::read_sint(self)
    }

    /// Reads a rotated variable-length `i64`.
    fn read_slong(&mut self) -> Result<i64, Error> {
        varint::read_slong(self)
    }

    /// Reads a length or element count.
    fn read_size(&mut self) -> Result<usize, Error> {
        Ok(self.read_uint()? as usize)
    }

    /// Reads a little-endian `i16`.
    fn read_fshort(&mut self) -> Result<i16, Error> {
        at_least(self, 2)?;
        Ok(self.get_i16_le())
    }

    /// Reads a little-endian `i32`.
    fn read_fint(&mut self) -> Result<i32, Error> {
        at_least(self, 4)?;
        Ok(self.get_i32_le())
    }

    /// Reads a little-endian `i64`.
    fn read_flong(&mut self) -> Result<i64, Error> {
        at_least(self, 8)?;
        Ok(self.get_i64_le())
    }

    /// Reads a little-endian IEEE-754 `f32`.
    fn read_float(&mut self) -> Result<f32, Error> {
        at_least(self, 4)?;
        Ok(self.get_f32_le())
    }

    /// Reads a little-endian IEEE-754 `f64`.
    fn read_double(&mut self) -> Result<f64, Error> {
        at_least(self, 8)?;
        Ok(self.get_f64_le())
    }

    /// Reads a length-prefixed UTF-8 string into a new `String`.
    fn read_string(&mut self) -> Result<String, Error> {
        let n = self.read_size()?;
        if n == 0 {
            return Ok(String::new());
        }
        at_least(self, n)?;
        let mut bytes = vec![0; n];
        self.copy_to_slice(&mut bytes);
        String::from_utf8(bytes).map_err(|_| Error::InvalidUtf8)
    }

    /// Reads a length-prefixed byte blob.
    ///
    /// An empty blob is returned without allocating.
    fn read_bytes(&mut self) -> Result<Bytes, Error> {
        let n = self.read_size()?;
        if n == 0 {
            return Ok(Bytes::new());
        }
        at_least(self, n)?;
        Ok(self.copy_to_bytes(n))
    }

    /// Reads length-prefixed octets into a new buffer.
    fn read_octets(&mut self) -> Result<ByteBuf, Error> {
        let n = self.read_size()?;
        at_least(self, n)?;
        let mut data = vec![0; n];
        self.copy_to_slice(&mut data);
        Ok(ByteBuf::from(data))
    }

    /// Reads length-prefixed octets, appending them to `dst`.
    fn read_octets_into(&mut self, dst: &mut ByteBuf) -> Result<(), Error> {
        let n = self.read_size()?;
        at_least(self, n)?;
        dst.put_with(n, |tail| self.copy_to_slice(tail));
        Ok(())
    }

    /// Skips `n` bytes.
    fn skip(&mut self, n: usize) -> Result<(), Error> {
        at_least(self, n)?;
        self.advance(n);
        Ok(())
    }

    /// Skips a length-prefixed string, blob or octets.
    fn skip_bytes(&mut self) -> Result<(), Error> {
        let n = self.read_size()?;
        ReadBuf::skip(self, n)
    }
}

impl<B: Buf> ReadBuf for B {}

/// Encodes primitives at the end of a buffer.
pub trait WriteBuf: BufMut + Sized {
    /// Writes a boolean as `1` or `0`.
    fn write_bool(&mut self, value: bool) {
        self.put_u8(u8::from(value));
    }

    /// Writes a raw byte.
    fn write_byte(&mut self, value: u8) {
        self.put_u8(value);
    }

    /// Writes a variable-length `i16`.
    fn write_short(&mut self, value: i16) {
        varint::write_short(value, self);
    }

    /// Writes a variable-length `i32`.
    fn write_int(&mut self, value: i32) {
        varint::write_int(value, self);
    }

    /// Writes a variable-length `u32`.
    ///
    /// # Panics
    ///
    /// Panics if `value` exceeds `i32::MAX`.
    fn write_uint(&mut self, value: u32) {
        varint::write_uint(value, self);
    }

    /// Writes a variable-length `i64`.
    fn write_long(&mut self, value: i64) {
        varint::write_long(value, self);
    }

    /// Writes a rotated variable-length `i32`.
    fn write_sint(&mut self, value: i32) {
        varint::write_sint(value, self);
    }

    /// Writes a rotated variable-length `i64`.
    fn write_slong(&mut self, value: i64) {
        varint::write_slong(value, self);
    }

    /// Writes a length or element count.
    ///
    /// # Panics
    ///
    /// Panics if `value` exceeds `i32::MAX`.
    fn write_size(&mut self, value: usize) {
        let value = u32::try_from(value).expect("size exceeds u32");
        self.write_uint(value);
    }

    /// Writes a little-endian `i16`.
    fn write_fshort(&mut self, value: i16) {
        self.put_i16_le(value);
    }

    /// Writes a little-endian `i32`.
    fn write_fint(&mut self, value: i32) {
        self.put_i32_le(value);
    }

    /// Writes a little-endian `i64`.
    fn write_flong(&mut self, value: i64) {
        self.put_i64_le(value);
    }

    /// Writes a little-endian IEEE-754 `f32`.
    fn write_float(&mut self, value: f32) {
        self.put_f32_le(value);
    }

    /// Writes a little-endian IEEE-754 `f64`.
    fn write_double(&mut self, value: f64) {
        self.put_f64_le(value);
    }

    /// Writes a UTF-8 string prefixed with its length in bytes.
    fn write_string(&mut self, value: &str) {
        self.write_bytes(value.as_bytes());
    }

    /// Writes a byte blob prefixed with its length.
    fn write_bytes(&mut self, value: &[u8]) {
        self.write_size(value.len());
        if !value.is_empty() {
            self.put_slice(value);
        }
    }

    /// Writes the occupied bytes of `src` prefixed with their length.
    fn write_octets(&mut self, src: &ByteBuf) {
        self.write_bytes(src.as_slice());
    }
}

impl<B: BufMut> WriteBuf for B {}
