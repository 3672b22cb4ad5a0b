use core::fmt;
use core::ops::Range;

use tracing::{debug, error, trace};

use crate::config::{BufferConfig, OomHandler};
use crate::error::GrowBufError;
use crate::storage::{BufferState, Storage};
use crate::strategy::{GrowStrategy, Relocation, Strategy};

/// Counters describing the growth history of a `GrowBuf`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GrowStats {
    /// Capacity of the inline region the buffer started with
    pub initial_capacity: usize,
    /// Number of growth events (each one allocation)
    pub grows: usize,
    /// Heap regions freed by growth events
    pub heap_releases: usize,
}

/// A byte buffer that starts in client-provided inline storage and moves to
/// the heap, doubling its capacity, when a reservation does not fit.
///
/// Positions inside the buffer are exposed as offsets only. A growth event
/// may move the bytes, so references into the buffer cannot outlive a call
/// that may grow it; offsets stay valid.
pub struct GrowBuf<'a, S: GrowStrategy = Strategy> {
    storage: Storage<'a>,
    top: usize,
    strategy: S,
    on_exhausted: OomHandler,
    stats: GrowStats,
}

/// Smallest `capacity * 2^k` that holds `length + minfree` bytes.
fn grown_capacity(capacity: usize, length: usize, minfree: usize) -> Result<usize, GrowBufError> {
    let overflow = || GrowBufError::CapacityOverflow { length, minfree };
    let required = length.checked_add(minfree).ok_or_else(overflow)?;
    let mut new_capacity = capacity;
    while new_capacity < required {
        new_capacity = new_capacity.checked_mul(2).ok_or_else(overflow)?;
    }
    Ok(new_capacity)
}

impl<'a> GrowBuf<'a, Strategy> {
    /// Creates a buffer over the inline region with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns `GrowBufError::ZeroSizeBuffer` if `inline` is empty.
    pub fn new(inline: &'a mut [u8]) -> Result<Self, GrowBufError> {
        Self::with_config(inline, BufferConfig::default())
    }

    /// Creates a buffer over the inline region.
    ///
    /// # Errors
    ///
    /// Returns `GrowBufError::ZeroSizeBuffer` if `inline` is empty.
    pub fn with_config(inline: &'a mut [u8], config: BufferConfig) -> Result<Self, GrowBufError> {
        Self::with_strategy(inline, config.strategy, config.on_exhausted)
    }
}

impl<'a, S: GrowStrategy> GrowBuf<'a, S> {
    /// Creates a buffer with a custom growth strategy.
    ///
    /// # Errors
    ///
    /// Returns `GrowBufError::ZeroSizeBuffer` if `inline` is empty.
    pub fn with_strategy(
        inline: &'a mut [u8],
        strategy: S,
        on_exhausted: OomHandler,
    ) -> Result<Self, GrowBufError> {
        if inline.is_empty() {
            return Err(GrowBufError::ZeroSizeBuffer);
        }

        let initial_capacity = inline.len();
        Ok(Self {
            storage: Storage::Inline(inline),
            top: 0,
            strategy,
            on_exhausted,
            stats: GrowStats {
                initial_capacity,
                ..GrowStats::default()
            },
        })
    }

    /// Logical length: bytes written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.top
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.top == 0
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    /// Bytes that can be written before the next growth.
    #[must_use]
    pub fn free_space(&self) -> usize {
        self.capacity() - self.top
    }

    #[must_use]
    pub fn state(&self) -> BufferState {
        self.storage.state()
    }

    #[must_use]
    pub fn is_inline(&self) -> bool {
        self.state() == BufferState::Inline
    }

    #[must_use]
    pub fn stats(&self) -> GrowStats {
        self.stats
    }

    /// Makes sure `minfree` more bytes fit after the logical end, growing the
    /// storage if needed. Bytes already written are preserved.
    ///
    /// On failure nothing is changed and the error is returned; the caller
    /// must not assume the reservation happened.
    ///
    /// # Errors
    ///
    /// - `GrowBufError::CapacityOverflow` if the new capacity is not addressable
    /// - `GrowBufError::ResourceExhausted` if the allocator fails
    ///
    /// # Panics
    ///
    /// If the growth strategy reports success but leaves a capacity other
    /// than the one requested.
    pub fn try_ensure_capacity(&mut self, minfree: usize) -> Result<(), GrowBufError> {
        let length = self.top;
        let old_capacity = self.capacity();
        let new_capacity = grown_capacity(old_capacity, length, minfree)?;
        if new_capacity == old_capacity {
            return Ok(());
        }

        let from = self.state();
        let relocation = self.strategy.grow(&mut self.storage, length, new_capacity)?;
        assert_eq!(
            self.capacity(),
            new_capacity,
            "growth strategy left the wrong capacity"
        );

        self.stats.grows += 1;
        if relocation == Relocation::Moved {
            self.stats.heap_releases += 1;
        }
        debug!(
            length,
            minfree,
            old_capacity,
            new_capacity,
            from = ?from,
            relocation = ?relocation,
            "grew buffer"
        );
        Ok(())
    }

    /// Makes sure `minfree` more bytes fit after the logical end.
    ///
    /// Allocation failure is fatal: the configured out-of-memory handler is
    /// called once, with the buffer unchanged, and does not return.
    pub fn ensure_capacity(&mut self, minfree: usize) {
        if let Err(err) = self.try_ensure_capacity(minfree) {
            error!(
                length = self.top,
                capacity = self.capacity(),
                minfree,
                "buffer growth failed: {}",
                err
            );
            (self.on_exhausted)(&err)
        }
    }

    /// Frees the heap storage, if any. The inline region is handed back to
    /// its owner untouched.
    pub fn release(self) {
        trace!(
            state = ?self.state(),
            capacity = self.capacity(),
            "releasing buffer"
        );
    }

    /// Reserves `n` bytes at the end and returns their offset.
    ///
    /// The reserved bytes hold unspecified values until written.
    pub fn allocate(&mut self, n: usize) -> usize {
        self.ensure_capacity(n);
        let offset = self.top;
        self.top += n;
        offset
    }

    #[allow(clippy::indexing_slicing)] // capacity ensured by allocate
    pub fn push(&mut self, byte: u8) {
        let offset = self.allocate(1);
        self.storage.region_mut()[offset] = byte;
    }

    #[allow(clippy::indexing_slicing)] // capacity ensured by allocate
    pub fn extend_from_slice(&mut self, bytes: &[u8]) {
        let offset = self.allocate(bytes.len());
        self.storage.region_mut()[offset..offset + bytes.len()].copy_from_slice(bytes);
    }

    /// Appends `bytes`, or returns the growth error with nothing appended.
    ///
    /// # Errors
    ///
    /// Same as `try_ensure_capacity`.
    #[allow(clippy::indexing_slicing)] // capacity ensured above
    pub fn try_extend_from_slice(&mut self, bytes: &[u8]) -> Result<(), GrowBufError> {
        self.try_ensure_capacity(bytes.len())?;
        let start = self.top;
        self.top += bytes.len();
        self.storage.region_mut()[start..self.top].copy_from_slice(bytes);
        Ok(())
    }

    /// Removes and returns the last byte.
    pub fn pop(&mut self) -> Option<u8> {
        if self.top == 0 {
            return None;
        }
        self.top -= 1;
        self.storage.region().get(self.top).copied()
    }

    /// Moves the logical end back to `len`. No effect if `len >= self.len()`.
    pub fn truncate(&mut self, len: usize) {
        if len < self.top {
            self.top = len;
        }
    }

    /// Empties the buffer, keeping its current storage and capacity.
    pub fn clear(&mut self) {
        self.top = 0;
    }

    /// The bytes written so far.
    #[must_use]
    #[allow(clippy::indexing_slicing)] // top <= capacity
    pub fn as_slice(&self) -> &[u8] {
        &self.storage.region()[..self.top]
    }

    #[must_use]
    #[allow(clippy::indexing_slicing)] // top <= capacity
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.storage.region_mut()[..self.top]
    }

    /// Byte at `offset`, re-derived from the current storage.
    ///
    /// Returns `None` if `offset` is beyond the logical length.
    #[must_use]
    pub fn at(&self, offset: usize) -> Option<&u8> {
        self.as_slice().get(offset)
    }

    pub fn at_mut(&mut self, offset: usize) -> Option<&mut u8> {
        self.as_mut_slice().get_mut(offset)
    }

    /// Bytes in `range`, or `None` if it reaches past the logical length.
    #[must_use]
    pub fn slice(&self, range: Range<usize>) -> Option<&[u8]> {
        self.as_slice().get(range)
    }
}

impl<S: GrowStrategy> fmt::Debug for GrowBuf<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GrowBuf {{ state: {:?}, len: {:?}, capacity: {:?}, data: {:?} }}",
            self.state(),
            self.top,
            self.capacity(),
            self.as_slice()
        )
    }
}

impl<S: GrowStrategy> embedded_io::ErrorType for GrowBuf<'_, S> {
    type Error = embedded_io::ErrorKind;
}

impl<S: GrowStrategy> embedded_io::Write for GrowBuf<'_, S> {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.try_extend_from_slice(buf)
            .map_err(|_| embedded_io::ErrorKind::OutOfMemory)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl<S: GrowStrategy> fmt::Write for GrowBuf<'_, S> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.try_extend_from_slice(s.as_bytes()).map_err(|_| fmt::Error)
    }
}
