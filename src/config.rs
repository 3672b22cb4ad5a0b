use core::alloc::Layout;
use core::fmt;

use alloc::alloc::handle_alloc_error;

use crate::error::GrowBufError;
use crate::strategy::Strategy;

/// Called once when `GrowBuf::ensure_capacity` cannot grow. Must not return.
pub type OomHandler = fn(&GrowBufError) -> !;

/// Default out-of-memory handler: reports through the global allocation
/// error hook, which aborts the process unless the host overrides it.
///
/// # Panics
///
/// `handle_alloc_error` needs a valid `Layout`. For `CapacityOverflow`, and
/// for a `ResourceExhausted` request larger than `isize::MAX` bytes, no such
/// layout exists and the handler panics with the error message instead.
pub fn abort_on_exhaustion(error: &GrowBufError) -> ! {
    let requested = match *error {
        GrowBufError::ResourceExhausted { requested } => requested,
        _ => usize::MAX,
    };
    match Layout::array::<u8>(requested) {
        Ok(layout) => handle_alloc_error(layout),
        Err(_) => panic!("{}", error),
    }
}

/// Construction-time options for `GrowBuf`
#[derive(Clone, Copy)]
pub struct BufferConfig {
    pub strategy: Strategy,
    pub on_exhausted: OomHandler,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            on_exhausted: abort_on_exhaustion,
        }
    }
}

impl fmt::Debug for BufferConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferConfig")
            .field("strategy", &self.strategy)
            .finish_non_exhaustive()
    }
}

impl BufferConfig {
    #[must_use]
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    #[must_use]
    pub fn with_oom_handler(mut self, on_exhausted: OomHandler) -> Self {
        self.on_exhausted = on_exhausted;
        self
    }
}
