use std::ops::{Deref, DerefMut};

use crossbeam::queue::ArrayQueue;

/// A reusable output buffer for [`Encoder::encode_into`](crate::Encoder::encode_into).
///
/// The buffer is only writable through a lease, and taking a lease
/// truncates it first. Whatever an earlier call left behind is never read,
/// only the allocation is reused. A `ScratchBuffer` has no synchronization,
/// one encode call at a time owns it through `&mut`.
#[derive(Debug, Default)]
pub struct ScratchBuffer {
    buf: Vec<u8>,
}

impl ScratchBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Output of the last successful encode, empty after a failed one.
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Resets the buffer, keeping its capacity, and hands it out for appending.
    pub(crate) fn lease(&mut self) -> Lease<'_> {
        self.buf.clear();
        Lease { buf: &mut self.buf }
    }
}

/// Exclusive, append-only access to a freshly reset [`ScratchBuffer`].
pub(crate) struct Lease<'a> {
    buf: &'a mut Vec<u8>,
}

impl<'a> Lease<'a> {
    pub(crate) fn sink(&mut self) -> &mut Vec<u8> {
        &mut *self.buf
    }

    /// Drops whatever was appended so far.
    pub(crate) fn discard(&mut self) {
        self.buf.clear();
    }

    pub(crate) fn into_slice(self) -> &'a [u8] {
        self.buf
    }
}

/// Bounded lock-free pool of [`ScratchBuffer`]s for callers encoding from
/// several threads.
///
/// `checkout` moves a buffer out of the pool, so no two calls ever share one.
#[derive(Debug)]
pub struct ScratchPool {
    idle: ArrayQueue<ScratchBuffer>,
    buffer_capacity: usize,
}

impl ScratchPool {
    /// Keeps at most `max_idle` buffers around, new ones start with
    /// `buffer_capacity` bytes.
    pub fn new(max_idle: usize, buffer_capacity: usize) -> Self {
        assert!(max_idle > 0, "required max_idle > 0");
        Self {
            idle: ArrayQueue::new(max_idle),
            buffer_capacity,
        }
    }

    /// Takes an idle buffer, or allocates one when the pool is empty.
    pub fn checkout(&self) -> PooledScratch<'_> {
        let buf = self
            .idle
            .pop()
            .unwrap_or_else(|| ScratchBuffer::with_capacity(self.buffer_capacity));
        PooledScratch { pool: self, buf }
    }

    pub fn idle(&self) -> usize {
        self.idle.len()
    }
}

/// A buffer checked out of a [`ScratchPool`], returned to it on drop.
#[derive(Debug)]
pub struct PooledScratch<'p> {
    pool: &'p ScratchPool,
    buf: ScratchBuffer,
}

impl Deref for PooledScratch<'_> {
    type Target = ScratchBuffer;

    fn deref(&self) -> &Self::Target {
        &self.buf
    }
}

impl DerefMut for PooledScratch<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.buf
    }
}

impl Drop for PooledScratch<'_> {
    fn drop(&mut self) {
        let buf = std::mem::take(&mut self.buf);
        if self.pool.idle.push(buf).is_err() {
            tracing::trace!("scratch pool full, dropping buffer");
        }
    }
}
