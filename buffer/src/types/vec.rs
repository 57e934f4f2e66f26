//! Codec implementations for lists and optional values.
//!
//! A `Vec<T>` is written as its element count followed by each element. An `Option<T>` is
//! written as a boolean followed by the value when present.

use crate::{varint, EncodeSize, Error, Read, ReadBuf, Write, WriteBuf};
use bytes::{Buf, BufMut};

impl<T: Write> Write for Vec<T> {
    #[inline]
    fn write(&self, buf: &mut impl BufMut) {
        buf.write_size(self.len());
        for item in self {
            item.write(buf);
        }
    }
}

impl<T: EncodeSize> EncodeSize for Vec<T> {
    #[inline]
    fn encode_size(&self) -> usize {
        let len = u32::try_from(self.len()).expect("Vec length exceeds u32");
        varint::size_uint(len) + self.iter().map(EncodeSize::encode_size).sum::<usize>()
    }
}

impl<T: Read> Read for Vec<T> {
    #[inline]
    fn read(buf: &mut impl Buf) -> Result<Self, Error> {
        let len = buf.read_size()?;
        // Every element occupies at least one byte, so a hostile count cannot over-allocate.
        let mut vec = Vec::with_capacity(len.min(buf.remaining()));
        for _ in 0..len {
            vec.push(T::read(buf)?);
        }
        Ok(vec)
    }
}

impl<T: Write> Write for Option<T> {
    #[inline]
    fn write(&self, buf: &mut impl BufMut) {
        buf.write_bool(self.is_some());
        if let Some(inner) = self {
            inner.write(buf);
        }
    }
}

impl<T: EncodeSize> EncodeSize for Option<T> {
    #[inline]
    fn encode_size(&self) -> usize {
        match self {
            Some(inner) => 1 + inner.encode_size(),
            None => 1,
        }
    }
}

impl<T: Read> Read for Option<T> {
    #[inline]
    fn read(buf: &mut impl Buf) -> Result<Self, Error> {
        if buf.read_bool()? {
            Ok(Some(T::read(buf)?))
        } else {
            Ok(None)
        }
    }
}
