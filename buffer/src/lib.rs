//! Read and write Luban binary table data.
//!
//! # Overview
//!
//! Luban exports each configuration table as a flat binary blob. This crate provides the buffer
//! those blobs are decoded from and encoded into:
//! - [`ByteBuf`], a growable buffer with independent read and write cursors
//! - A tiered variable-length integer format (see [`varint`]) alongside fixed-width
//!   little-endian numbers and length-prefixed strings and byte blobs
//! - [`Window`], a read-only view that aliases part of a buffer without copying
//! - [`Pool`], a thread-confined store that recycles buffers
//!
//! Every primitive is available through the [`ReadBuf`] and [`WriteBuf`] extension traits,
//! which work on any [`bytes::Buf`] or [`bytes::BufMut`]. Generated table rows implement
//! [`Read`], [`Write`], and [`EncodeSize`] to get [`Encode`] and [`Decode`] for free.
//!
//! # Limits
//!
//! Lengths and element counts are written as non-negative `i32` varints, so a string, byte
//! blob, or list of `2^31` or more bytes (or elements) cannot be written: the write panics.
//! Every other write succeeds, growing the buffer as needed.
//!
//! # Supported Types
//!
//! Natively supports:
//! - Primitives: `bool`, `u8`, `i16`, `i32`, `i64`, `f32`, `f64`
//! - Blobs: `String`, [`bytes::Bytes`], and nested [`ByteBuf`]s
//! - Collections: `Vec<T>` and `Option<T>`
//!
//! # Example
//!
//! ```
//! use bytes::{Buf, BufMut};
//! use luban_buffer::{Decode, Encode, EncodeSize, Error, Read, ReadBuf, Write, WriteBuf};
//!
//! // A row of an item table
//! #[derive(Debug, Clone, PartialEq)]
//! struct Item {
//!     id: i32,
//!     name: String,
//!     tags: Vec<String>,
//!     weight: Option<f32>,
//! }
//!
//! impl Write for Item {
//!     fn write(&self, buf: &mut impl BufMut) {
//!         buf.write_int(self.id);
//!         self.name.write(buf);
//!         self.tags.write(buf);
//!         self.weight.write(buf);
//!     }
//! }
//!
//! impl Read for Item {
//!     fn read(buf: &mut impl Buf) -> Result<Self, Error> {
//!         Ok(Self {
//!             id: buf.read_int()?,
//!             name: String::read(buf)?,
//!             tags: Vec::read(buf)?,
//!             weight: Option::read(buf)?,
//!         })
//!     }
//! }
//!
//! impl EncodeSize for Item {
//!     fn encode_size(&self) -> usize {
//!         self.id.encode_size()
//!             + self.name.encode_size()
//!             + self.tags.encode_size()
//!             + self.weight.encode_size()
//!     }
//! }
//!
//! let item = Item {
//!     id: 1001,
//!     name: "sword".to_string(),
//!     tags: vec!["weapon".to_string()],
//!     weight: Some(2.5),
//! };
//! let encoded = item.encode();
//! assert_eq!(Item::decode(encoded).unwrap(), item);
//! ```

pub mod buffer;
pub mod codec;
pub mod error;
pub mod extensions;
pub mod pool;
pub mod types;
pub mod util;
pub mod varint;
pub mod window;

// Re-export main types and traits
pub use buffer::ByteBuf;
pub use codec::{Codec, Decode, Encode, EncodeSize, Read, Write};
pub use error::Error;
pub use extensions::{ReadBuf, WriteBuf};
pub use pool::{Config as PoolConfig, Pool, Pooled};
pub use window::Window;
