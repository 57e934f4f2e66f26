//! Read-only views over part of another buffer's storage.

use crate::{extensions::ReadBuf, Error};
use bytes::Buf;

/// A read-only view of bytes owned by a [`crate::ByteBuf`], created by
/// [`crate::ByteBuf::window`].
///
/// A window shares its source's storage and has no write or growth operations. Its cursors index
/// into the source's storage: the window starts where the source's read cursor was, and
/// [`Window::capacity`] reports the source's capacity rather than the length of the view.
#[derive(Clone, Copy, Debug)]
pub struct Window<'a> {
    data: &'a [u8],
    begin: usize,
    end: usize,
    capacity: usize,
}

impl<'a> Window<'a> {
    pub(crate) fn new(data: &'a [u8], begin: usize, end: usize, capacity: usize) -> Self {
        debug_assert!(begin <= end && end <= data.len());
        Self {
            data,
            begin,
            end,
            capacity,
        }
    }

    /// Returns the number of unread bytes.
    #[inline]
    pub fn size(&self) -> usize {
        self.end - self.begin
    }

    /// Returns true if every byte has been read.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    /// Returns true if at least one byte is unread.
    #[inline]
    pub fn is_non_empty(&self) -> bool {
        self.end > self.begin
    }

    /// Returns the capacity of the source buffer at the time the window was taken.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the read cursor, as an index into the source's storage.
    pub fn reader_index(&self) -> usize {
        self.begin
    }

    /// Moves the read cursor back to `mark`.
    ///
    /// # Panics
    ///
    /// Panics if `mark` is past the end of the window.
    pub fn rollback_read(&mut self, mark: usize) {
        assert!(mark <= self.end, "mark {mark} past end of window {}", self.end);
        self.begin = mark;
    }

    /// Returns the unread bytes.
    #[inline]
    pub fn as_slice(&self) -> &'a [u8] {
        &self.data[self.begin..self.end]
    }

    /// Checks that `n` bytes are unread.
    #[inline]
    pub fn ensure_readable(&self, n: usize) -> Result<(), Error> {
        if n > self.size() {
            return Err(Error::Truncated {
                needed: n,
                remaining: self.size(),
            });
        }
        Ok(())
    }

    /// Advances the read cursor by `n` bytes.
    pub fn skip(&mut self, n: usize) -> Result<(), Error> {
        self.ensure_readable(n)?;
        self.begin += n;
        Ok(())
    }

    /// Reads a length-prefixed string borrowed from the source's storage.
    pub fn read_str(&mut self) -> Result<&'a str, Error> {
        let n = self.read_size()?;
        self.ensure_readable(n)?;
        let data = self.data;
        let start = self.begin;
        self.begin += n;
        std::str::from_utf8(&data[start..start + n]).map_err(|_| Error::InvalidUtf8)
    }
}

impl Buf for Window<'_> {
    #[inline]
    fn remaining(&self) -> usize {
        self.size()
    }

    #[inline]
    fn chunk(&self) -> &[u8] {
        self.as_slice()
    }

    #[inline]
    fn advance(&mut self, cnt: usize) {
        assert!(
            cnt <= self.size(),
            "cannot advance past end: {cnt} > {}",
            self.size()
        );
        self.begin += cnt;
    }
}
