use std::{alloc::Layout, ptr::NonNull};

use crate::allocator::{TensorAllocator, TensorAllocatorError};

/// An owned, zero-initialised byte buffer.
///
/// The memory is allocated with the given allocator and released when the storage is
/// dropped.
pub struct TensorStorage<A: TensorAllocator> {
    /// The pointer to the buffer memory which must be non-null.
    ptr: NonNull<u8>,
    /// The memory layout used for allocation.
    layout: Layout,
    /// The allocator used to allocate and free the buffer.
    alloc: A,
}

impl<A: TensorAllocator> TensorStorage<A> {
    /// Allocates a zeroed buffer of `len` bytes aligned to `align`.
    pub fn new(len: usize, align: usize, alloc: A) -> Result<Self, TensorAllocatorError> {
        let layout = Layout::from_size_align(len, align)?;
        let ptr = NonNull::new(alloc.alloc_zeroed(layout)?).ok_or(TensorAllocatorError::NullPointer)?;
        Ok(Self { ptr, layout, alloc })
    }

    /// Returns the pointer to the buffer memory.
    #[inline]
    pub fn as_ptr(&self) -> *const u8 {
        self.ptr.as_ptr()
    }

    /// Returns the mutable pointer to the buffer memory.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut u8 {
        self.ptr.as_ptr()
    }

    /// Returns the buffer as a byte slice.
    pub fn as_slice(&self) -> &[u8] {
        // SAFETY: the buffer holds `len` initialised bytes
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.layout.size()) }
    }

    /// Returns the buffer as a mutable byte slice.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        // SAFETY: the buffer holds `len` initialised bytes and we hold a unique borrow
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.layout.size()) }
    }

    /// Returns the number of bytes in the buffer.
    #[inline]
    pub fn len(&self) -> usize {
        self.layout.size()
    }

    /// Returns true if the buffer holds no bytes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.layout.size() == 0
    }

    /// Returns the memory layout of the buffer.
    #[inline]
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Returns the allocator of the buffer.
    #[inline]
    pub fn alloc(&self) -> &A {
        &self.alloc
    }
}

impl<A: TensorAllocator> Drop for TensorStorage<A> {
    fn drop(&mut self) {
        self.alloc.dealloc(self.ptr.as_ptr(), self.layout);
    }
}

impl<A: TensorAllocator> std::fmt::Debug for TensorStorage<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TensorStorage")
            .field("ptr", &self.ptr)
            .field("layout", &self.layout)
            .finish()
    }
}

// SAFETY: the storage uniquely owns its buffer
unsafe impl<A: TensorAllocator + Send> Send for TensorStorage<A> {}
unsafe impl<A: TensorAllocator + Sync> Sync for TensorStorage<A> {}
