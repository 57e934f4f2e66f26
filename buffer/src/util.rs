//! Helpers shared by the codec implementations.

use crate::Error;
use bytes::Buf;

/// Checks that at least `needed` bytes are readable from `buf`.
#[inline]
pub fn at_least<B: Buf + ?Sized>(buf: &B, needed: usize) -> Result<(), Error> {
    let remaining = buf.remaining();
    if remaining < needed {
        return Err(Error::Truncated { needed, remaining });
    }
    Ok(())
}

/// Returns the next byte of `buf` without consuming it.
#[inline]
pub fn peek<B: Buf + ?Sized>(buf: &B) -> Result<u8, Error> {
    at_least(buf, 1)?;
    Ok(buf.chunk()[0])
}
