#![no_std]

//! `GrowBuf`: a growable byte buffer that starts in client-provided inline storage.
//!
//! The buffer writes into a small region owned by the caller (typically an
//! array embedded in the structure that holds the buffer). When a reservation
//! does not fit, the capacity doubles until it does, and the bytes in use move
//! to a heap region. From then on the buffer stays on the heap, doubling again
//! whenever it runs out of room.
//!
//! Buffer geometry: `[written bytes][free space]`
//! - `len()`: bytes written so far
//! - `capacity()`: always `initial_capacity * 2^k`
//! - `free_space()`: `capacity() - len()`
//!
//! # Offsets, not references
//!
//! A growth event may move the bytes. The buffer therefore hands out offsets,
//! and callers re-derive bytes with `at()` or `slice()` after any call that may
//! grow. The borrow checker refuses to keep a reference across such a call:
//!
//! ```
//! # use growbuf::GrowBuf;
//! let mut inline = [0u8; 4];
//! let mut buf = GrowBuf::new(&mut inline).unwrap();
//!
//! let offset = buf.allocate(2);
//! buf.as_mut_slice()[offset..offset + 2].copy_from_slice(b"hi");
//! buf.extend_from_slice(b" there"); // outgrows the inline region
//!
//! assert!(!buf.is_inline());
//! assert_eq!(buf.slice(offset..offset + 2), Some(&b"hi"[..]));
//! assert_eq!(buf.capacity(), 8);
//! ```
//!
//! # Growth strategies
//!
//! Two interchangeable strategies implement the growth step:
//! - `Strategy::Copying`: allocate a new region, copy, free the old region
//! - `Strategy::Realloc`: let the allocator extend the heap region, in place
//!   when it can
//!
//! Both give the same observable result. Custom strategies implement
//! `GrowStrategy`.
//!
//! ```
//! # use growbuf::{BufferConfig, GrowBuf, Strategy};
//! let mut inline = [0u8; 16];
//! let config = BufferConfig::default().with_strategy(Strategy::Realloc);
//! let mut buf = GrowBuf::with_config(&mut inline, config).unwrap();
//!
//! buf.extend_from_slice(&[1u8; 40]);
//! assert_eq!(buf.capacity(), 64);
//! assert_eq!(buf.stats().grows, 1);
//! ```
//!
//! # Running out of memory
//!
//! `ensure_capacity()` and the appending methods built on it treat allocation
//! failure as fatal: the configured `OomHandler` runs once and does not
//! return. The default handler goes through `handle_alloc_error`, or panics
//! when the failed size has no valid `Layout` (capacity overflow). Use
//! `try_ensure_capacity()` or `try_extend_from_slice()` to get a
//! `GrowBufError` instead; the buffer is unchanged when they fail.
//!
//! ## `no_std` Compatibility
//!
//! The crate needs only `core` and `alloc`. Enable the optional `std` feature
//! for `std::error::Error` on `GrowBufError` and std support in `embedded-io`:
//! ```toml
//! [dependencies]
//! growbuf = { version = "0.1", features = ["std"] }
//! ```

extern crate alloc;

mod config;
mod core;
mod error;
mod storage;
mod strategy;

// Re-export public types and traits
pub use crate::config::{abort_on_exhaustion, BufferConfig, OomHandler};
pub use crate::core::{GrowBuf, GrowStats};
pub use crate::error::GrowBufError;
pub use crate::storage::{BufferState, Storage};
pub use crate::strategy::{CopyingGrowth, GrowStrategy, ReallocGrowth, Relocation, Strategy};
