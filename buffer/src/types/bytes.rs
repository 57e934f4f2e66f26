//! Codec implementations for strings and byte blobs.
//!
//! All three are written as a variable-length size followed by the payload. A [`ByteBuf`]
//! contributes only its occupied bytes.

use crate::{varint, ByteBuf, EncodeSize, Error, Read, ReadBuf, Write, WriteBuf};
use bytes::{Buf, BufMut, Bytes};

#[inline]
fn prefixed_size(len: usize) -> usize {
    let len32 = u32::try_from(len).expect("length exceeds u32");
    varint::size_uint(len32) + len
}

impl Write for String {
    #[inline]
    fn write(&self, buf: &mut impl BufMut) {
        buf.write_string(self);
    }
}

impl Read for String {
    #[inline]
    fn read(buf: &mut impl Buf) -> Result<Self, Error> {
        buf.read_string()
    }
}

impl EncodeSize for String {
    #[inline]
    fn encode_size(&self) -> usize {
        prefixed_size(self.len())
    }
}

impl Write for Bytes {
    #[inline]
    fn write(&self, buf: &mut impl BufMut) {
        buf.write_bytes(self);
    }
}

impl Read for Bytes {
    #[inline]
    fn read(buf: &mut impl Buf) -> Result<Self, Error> {
        buf.read_bytes()
    }
}

impl EncodeSize for Bytes {
    #[inline]
    fn encode_size(&self) -> usize {
        prefixed_size(self.len())
    }
}

impl Write for ByteBuf {
    #[inline]
    fn write(&self, buf: &mut impl BufMut) {
        buf.write_octets(self);
    }
}

impl Read for ByteBuf {
    #[inline]
    fn read(buf: &mut impl Buf) -> Result<Self, Error> {
        buf.read_octets()
    }
}

impl EncodeSize for ByteBuf {
    #[inline]
    fn encode_size(&self) -> usize {
        prefixed_size(self.size())
    }
}
