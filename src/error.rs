use thiserror::Error;

/// Error types for `GrowBuf` operations
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum GrowBufError {
    /// Inline storage of zero bytes cannot grow by doubling
    #[error("Zero-size inline storage: a growable buffer needs at least one inline byte")]
    ZeroSizeBuffer,
    /// The allocator could not provide the new storage region
    #[error("Resource exhaustion: failed to allocate {requested} bytes")]
    ResourceExhausted {
        /// Capacity of the region that could not be allocated
        requested: usize,
    },
    /// `length + minfree` or the doubled capacity does not fit in `usize`
    #[error("Capacity overflow: {length} bytes in use plus {minfree} requested cannot be addressed")]
    CapacityOverflow {
        /// Bytes in use when the request was made
        length: usize,
        /// Additional bytes requested
        minfree: usize,
    },
}

impl GrowBufError {
    /// Returns `true` for errors raised while growing, which the fatal path
    /// hands to the out-of-memory handler.
    #[must_use]
    pub fn is_resource_exhaustion(&self) -> bool {
        matches!(
            self,
            GrowBufError::ResourceExhausted { .. } | GrowBufError::CapacityOverflow { .. }
        )
    }
}
