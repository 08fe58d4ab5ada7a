use std::mem::size_of;

use crate::engine::capability::Element;

/// Cursor of one computation run over `N` buffers.
///
/// All buffers are walked in lock-step: the byte offset is shared, so every slot is
/// always positioned at the same logical element index. Only the dispatcher creates
/// and moves one; outside the crate it is an opaque parameter of
/// [`WidthChain::sweep`](crate::engine::dispatch::WidthChain::sweep).
#[derive(Debug)]
pub struct State<T, const N: usize> {
    buffers: [*mut T; N],
    offset: usize,
    element_count: usize,
}

impl<T: Element, const N: usize> State<T, N> {
    /// # Safety
    ///
    /// Every pointer in `buffers` must be valid for reads and writes of `element_count`
    /// elements for as long as the state is used.
    pub(crate) unsafe fn new(buffers: [*mut T; N], element_count: usize) -> Self {
        Self {
            buffers,
            offset: 0,
            element_count,
        }
    }

    /// Index of the next unprocessed element.
    #[inline(always)]
    pub(crate) fn index(&self) -> usize {
        self.offset / size_of::<T>()
    }

    /// Total byte length of the run; the cursor ends here.
    #[inline(always)]
    pub(crate) fn byte_len(&self) -> usize {
        self.element_count * size_of::<T>()
    }

    #[inline(always)]
    pub(crate) fn remaining_bytes(&self) -> usize {
        self.byte_len() - self.offset
    }

    #[inline(always)]
    pub(crate) fn advance(&mut self, bytes: usize) {
        debug_assert!(bytes <= self.remaining_bytes(), "cursor advanced past the end");
        self.offset += bytes;
    }

    /// Address of the current element in `slot`.
    ///
    /// # Safety
    ///
    /// The cursor must not have reached the end of the run.
    #[inline(always)]
    pub(crate) unsafe fn slot(&self, slot: usize) -> *mut T {
        self.buffers[slot].byte_add(self.offset)
    }
}
