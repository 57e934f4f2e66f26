//! A growable byte buffer with independent read and write cursors.
//!
//! The occupied region `[begin, end)` holds the bytes written but not yet read. Writes append at
//! `end`, growing or compacting the storage first when the tail is too short; reads consume from
//! `begin` after checking the region holds enough bytes.

use crate::{extensions::ReadBuf, Error, Window};
use bytes::{buf::UninitSlice, Buf, BufMut};
use std::{
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};
use tracing::trace;

/// Capacity of the first allocation made by an empty buffer.
pub const MIN_CAPACITY: usize = 12;

/// Bytes reserved when a caller asks for writable space without saying how much.
const CHUNK_RESERVE: usize = 64;

/// Returns the capacity to grow to from `capacity` so that `needed` bytes fit.
///
/// Capacity starts at [`MIN_CAPACITY`] and grows by a factor of 1.5 (rounding down).
pub fn grow(capacity: usize, needed: usize) -> usize {
    let mut capacity = capacity.max(MIN_CAPACITY);
    while capacity < needed {
        capacity = capacity * 3 / 2;
    }
    capacity
}

/// A growable byte buffer that owns its storage.
///
/// Invariant: `begin <= end <= data.len()`, where `data.len()` is the capacity.
#[derive(Clone, Default)]
pub struct ByteBuf {
    data: Vec<u8>,
    begin: usize,
    end: usize,
}

impl ByteBuf {
    /// Creates an empty buffer that has not allocated.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty buffer with `capacity` bytes of storage.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: vec![0; capacity],
            begin: 0,
            end: 0,
        }
    }

    /// Creates a buffer over `data` whose occupied region is `[begin, end)`.
    ///
    /// # Panics
    ///
    /// Panics if `begin > end` or `end > data.len()`.
    pub fn with_range(data: Vec<u8>, begin: usize, end: usize) -> Self {
        assert!(
            begin <= end && end <= data.len(),
            "invalid range {begin}..{end} for {} bytes",
            data.len()
        );
        Self { data, begin, end }
    }

    /// Replaces the storage with `data`, all of which becomes occupied.
    pub fn replace(&mut self, data: Vec<u8>) {
        self.end = data.len();
        self.begin = 0;
        self.data = data;
    }

    /// Replaces the storage with `data`, of which `[begin, end)` becomes occupied.
    ///
    /// # Panics
    ///
    /// Panics if `begin > end` or `end > data.len()`.
    pub fn replace_range(&mut self, data: Vec<u8>, begin: usize, end: usize) {
        *self = Self::with_range(data, begin, end);
    }

    /// Returns the number of occupied bytes.
    #[inline]
    pub fn size(&self) -> usize {
        self.end - self.begin
    }

    /// Returns true if no bytes are occupied.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    /// Returns true if at least one byte is occupied.
    #[inline]
    pub fn is_non_empty(&self) -> bool {
        self.end > self.begin
    }

    /// Returns the length of the storage.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Returns the read cursor.
    #[inline]
    pub fn reader_index(&self) -> usize {
        self.begin
    }

    /// Returns the write cursor.
    #[inline]
    pub fn writer_index(&self) -> usize {
        self.end
    }

    /// Moves the read cursor back to `mark`, previously returned by [`ByteBuf::reader_index`].
    ///
    /// # Panics
    ///
    /// Panics if `mark` is past the write cursor.
    pub fn rollback_read(&mut self, mark: usize) {
        assert!(mark <= self.end, "mark {mark} past write cursor {}", self.end);
        self.begin = mark;
    }

    /// Resets both cursors, keeping the storage.
    pub fn clear(&mut self) {
        self.begin = 0;
        self.end = 0;
    }

    /// Returns the occupied bytes.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.data[self.begin..self.end]
    }

    /// Returns the entire storage, including consumed and unwritten bytes.
    pub fn array(&self) -> &[u8] {
        &self.data
    }

    /// Returns a copy of the occupied bytes.
    pub fn copy_remaining(&self) -> Vec<u8> {
        self.as_slice().to_vec()
    }

    /// Consumes the buffer and returns its occupied bytes.
    pub fn into_vec(mut self) -> Vec<u8> {
        if self.begin == 0 {
            self.data.truncate(self.end);
            return self.data;
        }
        self.copy_remaining()
    }

    /// Checks that `n` bytes are occupied.
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

    /// Makes room for `n` more bytes after the write cursor.
    ///
    /// If the storage already fits the occupied bytes plus `n`, the occupied bytes are moved to
    /// the front. Otherwise the storage is reallocated (see [`grow`]). Either way the read cursor
    /// ends up at 0.
    pub fn ensure_writable(&mut self, n: usize) {
        if self.end + n <= self.capacity() {
            return;
        }
        let size = self.size();
        let needed = size + n;
        if needed > self.capacity() {
            let capacity = grow(self.capacity(), needed);
            trace!(from = self.capacity(), to = capacity, size, "growing buffer");
            let mut data = vec![0; capacity];
            data[..size].copy_from_slice(self.as_slice());
            self.data = data;
        } else {
            trace!(reclaimed = self.begin, size, "compacting buffer");
            self.data.copy_within(self.begin..self.end, 0);
        }
        self.begin = 0;
        self.end = size;
    }

    /// Appends `n` bytes produced by `fill`, growing the storage first if needed.
    #[inline]
    pub(crate) fn put_with(&mut self, n: usize, fill: impl FnOnce(&mut [u8])) {
        self.ensure_writable(n);
        fill(&mut self.data[self.end..self.end + n]);
        self.end += n;
    }

    /// Advances the read cursor by `n` bytes.
    pub fn skip(&mut self, n: usize) -> Result<(), Error> {
        self.ensure_readable(n)?;
        self.begin += n;
        Ok(())
    }

    /// Reads a length-prefixed string without copying it.
    pub fn read_str(&mut self) -> Result<&str, Error> {
        let n = self.read_size()?;
        self.ensure_readable(n)?;
        let start = self.begin;
        self.begin += n;
        std::str::from_utf8(&self.data[start..start + n]).map_err(|_| Error::InvalidUtf8)
    }

    /// Exposes the next `n` occupied bytes as a read-only [`Window`] and advances past them.
    ///
    /// The window borrows this buffer's storage, so this buffer cannot be used again until the
    /// window is dropped.
    pub fn window(&mut self, n: usize) -> Result<Window<'_>, Error> {
        self.ensure_readable(n)?;
        let begin = self.begin;
        self.begin += n;
        let capacity = self.capacity();
        Ok(Window::new(&self.data, begin, begin + n, capacity))
    }

    /// Appends the occupied bytes of this buffer to `dst` as length-prefixed octets.
    pub fn write_to(&self, dst: &mut ByteBuf) {
        crate::extensions::WriteBuf::write_octets(dst, self);
    }
}

impl From<Vec<u8>> for ByteBuf {
    fn from(data: Vec<u8>) -> Self {
        let end = data.len();
        Self {
            data,
            begin: 0,
            end,
        }
    }
}

impl From<&[u8]> for ByteBuf {
    fn from(data: &[u8]) -> Self {
        Self::from(data.to_vec())
    }
}

impl Buf for ByteBuf {
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

// SAFETY: the storage is always initialized, `chunk_mut` only exposes bytes past the write
// cursor, and `advance_mut` refuses to move the write cursor past the storage.
unsafe impl BufMut for ByteBuf {
    #[inline]
    fn remaining_mut(&self) -> usize {
        isize::MAX as usize - self.size()
    }

    #[inline]
    unsafe fn advance_mut(&mut self, cnt: usize) {
        let end = self.end + cnt;
        assert!(end <= self.capacity(), "cannot advance past capacity");
        self.end = end;
    }

    #[inline]
    fn chunk_mut(&mut self) -> &mut UninitSlice {
        if self.end == self.capacity() {
            self.ensure_writable(CHUNK_RESERVE);
        }
        let end = self.end;
        UninitSlice::new(&mut self.data[end..])
    }

    // Every primitive is written with a single `put_slice`, so the storage grows by exactly what
    // the value needs.
    #[inline]
    fn put_slice(&mut self, src: &[u8]) {
        self.put_with(src.len(), |tail| tail.copy_from_slice(src));
    }
}

impl PartialEq for ByteBuf {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for ByteBuf {}

impl Hash for ByteBuf {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl fmt::Debug for ByteBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteBuf")
            .field("begin", &self.begin)
            .field("end", &self.end)
            .field("capacity", &self.capacity())
            .finish()
    }
}

/// Renders the occupied bytes as signed decimals, each followed by a comma (e.g. `1,-1,`).
impl fmt::Display for ByteBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.as_slice() {
            write!(f, "{},", *byte as i8)?;
        }
        Ok(())
    }
}

/// Parses the format produced by [`fmt::Display`]. Values are truncated to their low byte.
impl FromStr for ByteBuf {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let data = s
            .split(',')
            .filter(|token| !token.is_empty())
            .map(|token| {
                token
                    .trim()
                    .parse::<i32>()
                    .map(|value| value as u8)
                    .map_err(|_| Error::InvalidLiteral(token.to_string()))
            })
            .collect::<Result<Vec<u8>, Error>>()?;
        Ok(Self::from(data))
    }
}
