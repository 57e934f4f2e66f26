//! Reuse of [`ByteBuf`]s within a single thread.
//!
//! # Overview
//!
//! Loading a table decodes many short-lived buffers. A [`Pool`] keeps released buffers idle so
//! the next [`Pool::acquire`] reuses their storage instead of allocating. Released buffers are
//! cleared but keep their capacity.
//!
//! [`Pooled`] is an RAII guard whose [`Drop`] returns the buffer to its pool, so forgetting the
//! return is impossible. [`Pool::take`] and [`Pool::release`] give manual control; `release`
//! takes the buffer by value, so a released buffer cannot be used again by the caller.
//!
//! # Synchronization
//!
//! A pool is confined to the thread that created it: it is neither [`Sync`] nor shared. Threads
//! that want pooling keep their own pool.
//!
//! # Examples
//!
//! ```
//! use luban_buffer::{Pool, WriteBuf};
//!
//! let pool = Pool::default();
//! {
//!     let mut buf = pool.acquire();
//!     buf.write_int(1000);
//!     assert_eq!(buf.size(), 2);
//! }
//! assert_eq!(pool.idle(), 1);
//!
//! // The next acquire reuses the released buffer, now empty.
//! let buf = pool.acquire();
//! assert!(buf.is_empty());
//! assert_eq!(pool.idle(), 0);
//! ```

use crate::ByteBuf;
use std::{
    cell::RefCell,
    ops::{Deref, DerefMut},
};
use tracing::{debug, trace};

/// Limits on what a [`Pool`] retains.
#[derive(Clone, Debug)]
pub struct Config {
    /// Maximum number of idle buffers kept. Buffers released beyond this are dropped.
    pub max_idle: usize,

    /// Buffers whose capacity exceeds this are dropped on release instead of being kept.
    pub max_retained_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_idle: usize::MAX,
            max_retained_capacity: usize::MAX,
        }
    }
}

/// A thread-confined store of idle buffers.
pub struct Pool {
    cfg: Config,
    idle: RefCell<Vec<ByteBuf>>,
}

impl Default for Pool {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Pool {
    /// Creates an empty pool.
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            idle: RefCell::new(Vec::new()),
        }
    }

    /// Returns the number of idle buffers.
    pub fn idle(&self) -> usize {
        self.idle.borrow().len()
    }

    /// Removes an idle buffer from the pool, or creates a new empty one if none is idle.
    ///
    /// The buffer belongs to the caller until it is handed back with [`Pool::release`].
    pub fn take(&self) -> ByteBuf {
        match self.idle.borrow_mut().pop() {
            Some(buf) => {
                trace!(capacity = buf.capacity(), "reusing pooled buffer");
                buf
            }
            None => {
                trace!("pool empty, creating buffer");
                ByteBuf::new()
            }
        }
    }

    /// Acquires a buffer that returns to this pool when dropped.
    pub fn acquire(&self) -> Pooled<'_> {
        Pooled {
            pool: self,
            buf: Some(self.take()),
        }
    }

    /// Clears `buf` and keeps it for reuse, unless a [`Config`] limit says to drop it.
    pub fn release(&self, mut buf: ByteBuf) {
        buf.clear();
        if buf.capacity() > self.cfg.max_retained_capacity {
            debug!(
                capacity = buf.capacity(),
                max = self.cfg.max_retained_capacity,
                "dropping oversized buffer"
            );
            return;
        }
        let mut idle = self.idle.borrow_mut();
        if idle.len() >= self.cfg.max_idle {
            debug!(max = self.cfg.max_idle, "pool full, dropping buffer");
            return;
        }
        trace!(capacity = buf.capacity(), "releasing buffer");
        idle.push(buf);
    }
}

/// RAII guard over a buffer borrowed from a [`Pool`].
///
/// Dereferences to the [`ByteBuf`] and releases it back to the pool on drop.
pub struct Pooled<'a> {
    pool: &'a Pool,
    buf: Option<ByteBuf>,
}

impl Pooled<'_> {
    /// Keeps the buffer instead of returning it to the pool.
    pub fn into_inner(mut self) -> ByteBuf {
        self.buf.take().expect("buffer taken before drop")
    }
}

impl Deref for Pooled<'_> {
    type Target = ByteBuf;

    fn deref(&self) -> &ByteBuf {
        self.buf.as_ref().expect("buffer taken before drop")
    }
}

impl DerefMut for Pooled<'_> {
    fn deref_mut(&mut self) -> &mut ByteBuf {
        self.buf.as_mut().expect("buffer taken before drop")
    }
}

impl Drop for Pooled<'_> {
    fn drop(&mut self) {
        if let Some(buf) = self.buf.take() {
            self.pool.release(buf);
        }
    }
}
