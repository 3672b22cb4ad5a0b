use alloc::boxed::Box;

/// Which kind of storage currently backs a `GrowBuf`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferState {
    /// Still writing into the client-provided inline region
    Inline,
    /// Outgrew the inline region; terminal for the buffer instance
    Heap,
}

/// Backing region of a `GrowBuf`.
///
/// The inline region is borrowed from the structure that embeds the buffer
/// and is never freed here. Once the buffer moves to the heap, the inline
/// borrow is dropped and there is no way back: strategies only ever replace
/// a `Storage` with `Storage::Heap`.
#[derive(Debug)]
pub enum Storage<'a> {
    Inline(&'a mut [u8]),
    Heap(Box<[u8]>),
}

impl Storage<'_> {
    #[must_use]
    pub fn state(&self) -> BufferState {
        match self {
            Storage::Inline(_) => BufferState::Inline,
            Storage::Heap(_) => BufferState::Heap,
        }
    }

    /// Total bytes in the region (the buffer's capacity).
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.region().len()
    }

    #[must_use]
    pub fn region(&self) -> &[u8] {
        match self {
            Storage::Inline(inline) => inline,
            Storage::Heap(heap) => heap,
        }
    }

    pub fn region_mut(&mut self) -> &mut [u8] {
        match self {
            Storage::Inline(inline) => inline,
            Storage::Heap(heap) => heap,
        }
    }
}
