use std::alloc;
use std::alloc::Layout;

use crate::error::StorageError;

/// A trait for allocating and deallocating pixel memory.
///
/// # Methods
///
/// * `alloc` - Allocates zeroed memory with the given layout.
/// * `dealloc` - Deallocates memory with the given layout.
pub trait ImageAllocator: Clone {
    /// Allocates zeroed memory with the given layout.
    ///
    /// The layout is never zero-sized.
    fn alloc(&self, layout: Layout) -> Result<*mut u8, StorageError>;

    /// Deallocates memory with the given layout.
    fn dealloc(&self, ptr: *mut u8, layout: Layout);
}

/// An image allocator that uses the system allocator.
#[derive(Clone, Debug, Default)]
pub struct CpuAllocator;

impl ImageAllocator for CpuAllocator {
    fn alloc(&self, layout: Layout) -> Result<*mut u8, StorageError> {
        debug_assert!(layout.size() > 0, "zero sized pixel allocation");
        let ptr = unsafe { alloc::alloc_zeroed(layout) };
        if ptr.is_null() {
            Err(StorageError::NullPointer)?
        }
        Ok(ptr)
    }

    #[allow(clippy::not_unsafe_ptr_arg_deref)]
    fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        if !ptr.is_null() {
            unsafe { alloc::dealloc(ptr, layout) }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cpu_allocator() -> Result<(), StorageError> {
        let allocator = CpuAllocator;
        let layout = Layout::from_size_align(1024, 64).map_err(StorageError::LayoutError)?;
        let ptr = allocator.alloc(layout)?;
        let zeroed = unsafe { std::slice::from_raw_parts(ptr, 1024) };
        assert!(zeroed.iter().all(|&b| b == 0));
        allocator.dealloc(ptr, layout);
        Ok(())
    }
}
