use alloc::boxed::Box;
use alloc::vec::Vec;
use core::mem;

use crate::error::GrowBufError;
use crate::storage::Storage;

/// What happened to the old storage during a growth event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relocation {
    /// Left the inline region for a fresh heap region; nothing was freed
    FromInline,
    /// Moved to a new heap region and freed the old one
    Moved,
    /// The allocator extended the heap region without moving it
    InPlace,
}

/// Replaces a storage region with a larger heap region.
///
/// # Contract
///
/// - `length <= storage.capacity() < new_capacity`
/// - On `Ok`, `storage` is `Storage::Heap` of exactly `new_capacity` bytes and
///   its first `length` bytes equal the first `length` bytes before the call.
/// - On `Err`, `storage` is left untouched.
///
/// `GrowBuf` checks the resulting capacity after every `Ok` and panics if it
/// is not `new_capacity`.
pub trait GrowStrategy {
    /// # Errors
    ///
    /// Returns `GrowBufError::ResourceExhausted` if the allocator cannot
    /// provide `new_capacity` bytes.
    fn grow(
        &mut self,
        storage: &mut Storage<'_>,
        length: usize,
        new_capacity: usize,
    ) -> Result<Relocation, GrowBufError>;
}

/// Allocates a new region, copies the bytes in use and frees the old region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyingGrowth;

/// Grows a heap region through the allocator's reallocation, which may avoid
/// the copy. Leaving inline storage always copies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReallocGrowth;

/// Growth strategy selected at configuration time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Strategy {
    #[default]
    Copying,
    Realloc,
}

fn copy_into_new_region(live: &[u8], new_capacity: usize) -> Result<Box<[u8]>, GrowBufError> {
    let mut region = Vec::new();
    region
        .try_reserve_exact(new_capacity)
        .map_err(|_| GrowBufError::ResourceExhausted {
            requested: new_capacity,
        })?;
    region.extend_from_slice(live);
    region.resize(new_capacity, 0);
    Ok(region.into_boxed_slice())
}

impl GrowStrategy for CopyingGrowth {
    #[allow(clippy::indexing_slicing)] // length <= capacity by contract
    fn grow(
        &mut self,
        storage: &mut Storage<'_>,
        length: usize,
        new_capacity: usize,
    ) -> Result<Relocation, GrowBufError> {
        let region = copy_into_new_region(&storage.region()[..length], new_capacity)?;
        let relocation = match storage {
            Storage::Inline(_) => Relocation::FromInline,
            Storage::Heap(_) => Relocation::Moved,
        };
        // Dropping the old value frees a heap region; an inline borrow just ends.
        *storage = Storage::Heap(region);
        Ok(relocation)
    }
}

impl GrowStrategy for ReallocGrowth {
    fn grow(
        &mut self,
        storage: &mut Storage<'_>,
        length: usize,
        new_capacity: usize,
    ) -> Result<Relocation, GrowBufError> {
        let Storage::Heap(heap) = storage else {
            return CopyingGrowth.grow(storage, length, new_capacity);
        };

        let mut region = Vec::from(mem::take(heap));
        let old_ptr = region.as_ptr();
        if region
            .try_reserve_exact(new_capacity.saturating_sub(region.len()))
            .is_err()
        {
            // len == capacity, so this gives back the same allocation
            *heap = region.into_boxed_slice();
            return Err(GrowBufError::ResourceExhausted {
                requested: new_capacity,
            });
        }
        region.resize(new_capacity, 0);
        let relocation = if region.as_ptr() == old_ptr {
            Relocation::InPlace
        } else {
            Relocation::Moved
        };
        *heap = region.into_boxed_slice();
        Ok(relocation)
    }
}

impl GrowStrategy for Strategy {
    fn grow(
        &mut self,
        storage: &mut Storage<'_>,
        length: usize,
        new_capacity: usize,
    ) -> Result<Relocation, GrowBufError> {
        match self {
            Strategy::Copying => CopyingGrowth.grow(storage, length, new_capacity),
            Strategy::Realloc => ReallocGrowth.grow(storage, length, new_capacity),
        }
    }
}
