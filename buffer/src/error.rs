//! Error types for buffer operations

use thiserror::Error;

/// Error type for decoding.
///
/// Every variant is terminal for the value being decoded: the read cursor is left
/// wherever the failed read stopped and is not guaranteed to be usable for further
/// decoding of the same stream.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("truncated: needed {needed} bytes, {remaining} remaining")]
    Truncated { needed: usize, remaining: usize },
    #[error("invalid tag: {0:#04x}")]
    InvalidTag(u8),
    #[error("invalid unsigned: {0}")]
    InvalidUnsigned(i32),
    #[error("invalid utf-8")]
    InvalidUtf8,
    #[error("extra data found: {0} bytes")]
    ExtraData(usize),
    #[error("invalid byte literal: {0}")]
    InvalidLiteral(String),
}

impl Error {
    /// Returns true if the input ended before the value did.
    pub fn is_truncated(&self) -> bool {
        matches!(self, Error::Truncated { .. })
    }

    /// Returns true if the input violated the tag scheme or a value constraint.
    pub fn is_invalid_encoding(&self) -> bool {
        matches!(
            self,
            Error::InvalidTag(_) | Error::InvalidUnsigned(_) | Error::InvalidUtf8
        )
    }
}
