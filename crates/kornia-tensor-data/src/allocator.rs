use std::alloc;
use std::alloc::Layout;

use thiserror::Error;

/// An error type for tensor allocator operations.
#[derive(Debug, Error, PartialEq)]
pub enum TensorAllocatorError {
    /// The requested size and alignment do not form a valid layout.
    #[error("Invalid buffer layout {0}")]
    LayoutError(#[from] core::alloc::LayoutError),

    /// The allocator returned a null pointer.
    #[error("Null pointer")]
    NullPointer,
}

/// A trait for allocating and deallocating pitch-linear buffers.
///
/// Buffers handed out by an allocator must be zero-initialised so that padding
/// bytes at the end of each row never expose stale memory.
pub trait TensorAllocator: Clone {
    /// Allocates zeroed memory for a buffer with the given layout.
    fn alloc_zeroed(&self, layout: Layout) -> Result<*mut u8, TensorAllocatorError>;

    /// Deallocates memory previously returned by [`TensorAllocator::alloc_zeroed`].
    fn dealloc(&self, ptr: *mut u8, layout: Layout);
}

/// A tensor allocator that uses the system allocator.
#[derive(Clone, Debug, Default)]
pub struct CpuAllocator;

impl TensorAllocator for CpuAllocator {
    /// Allocates zeroed memory with the given layout.
    ///
    /// Zero-sized layouts return a dangling, well-aligned pointer without calling the
    /// system allocator.
    fn alloc_zeroed(&self, layout: Layout) -> Result<*mut u8, TensorAllocatorError> {
        if layout.size() == 0 {
            // aligned and non-null, never dereferenced
            return Ok(layout.align() as *mut u8);
        }
        let ptr = unsafe { alloc::alloc_zeroed(layout) };
        if ptr.is_null() {
            Err(TensorAllocatorError::NullPointer)?
        }
        Ok(ptr)
    }

    /// Deallocates memory with the given layout.
    ///
    /// # Safety
    ///
    /// The pointer must come from [`CpuAllocator::alloc_zeroed`] with the same layout.
    #[allow(clippy::not_unsafe_ptr_arg_deref)]
    fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        if !ptr.is_null() && layout.size() != 0 {
            unsafe { alloc::dealloc(ptr, layout) }
        }
    }
}
