use std::{alloc::Layout, ptr::NonNull, sync::Arc};

use crate::{
    allocator::{CpuAllocator, ImageAllocator},
    error::StorageError,
    external::ExternalImage,
    format::PixelFormat,
};

/// Alignment of the first byte of every pixel buffer.
const BUFFER_ALIGN: usize = 16;

/// Rows are padded to a multiple of this many bytes by default.
const SCANLINE_ALIGN: usize = 4;

/// The pixel memory shared by all clones of a [`SharedImage`].
struct ImageData<A: ImageAllocator> {
    /// The pointer to the pixel memory which must be non-null.
    ptr: NonNull<u8>,
    /// The memory layout used for allocation.
    layout: Layout,
    /// The allocator that owns `ptr`.
    alloc: A,
}

impl<A: ImageAllocator> Drop for ImageData<A> {
    fn drop(&mut self) {
        // SAFETY: ptr and layout were created together during allocation
        self.alloc.dealloc(self.ptr.as_ptr(), self.layout);
    }
}

/// A reference-counted pixel buffer with padded rows.
///
/// `SharedImage` plays the part of the GUI image object: it owns the pixel
/// memory and hands out a base pointer, a row stride and the dimensions
/// through [`ExternalImage`]. Cloning is a shallow copy that shares the pixels
/// and bumps a reference count; the memory is released with the last clone.
///
/// A default constructed image is a null image: no pixels, zero dimensions
/// and a null data pointer.
///
/// # Aliasing
///
/// Clones share one buffer without copy-on-write. A write through one clone is
/// visible through every other clone, and no synchronization is performed.
pub struct SharedImage<A: ImageAllocator = CpuAllocator> {
    data: Option<Arc<ImageData<A>>>,
    width: usize,
    height: usize,
    bytes_per_line: usize,
    format: PixelFormat,
}

impl SharedImage<CpuAllocator> {
    /// Allocate a zeroed image with rows padded to a 4 byte boundary.
    ///
    /// # Arguments
    ///
    /// * `width` - The width of the image in pixels.
    /// * `height` - The height of the image in pixels.
    /// * `format` - The storage format of one pixel.
    ///
    /// # Errors
    ///
    /// Returns an error if the format is [`PixelFormat::Invalid`] or the
    /// allocation fails. Zero sized dimensions produce a null image.
    pub fn new(width: usize, height: usize, format: PixelFormat) -> Result<Self, StorageError> {
        Self::new_in(width, height, format, CpuAllocator)
    }

    /// Allocate a zeroed image with an explicit row stride.
    ///
    /// # Errors
    ///
    /// Returns an error if `bytes_per_line` cannot hold a full row or breaks
    /// the alignment of `format`.
    pub fn with_bytes_per_line(
        width: usize,
        height: usize,
        bytes_per_line: usize,
        format: PixelFormat,
    ) -> Result<Self, StorageError> {
        Self::with_bytes_per_line_in(width, height, bytes_per_line, format, CpuAllocator)
    }

    /// Create an image by copying raw bytes laid out with the given stride.
    ///
    /// # Errors
    ///
    /// Returns an error if `data.len()` is not `height * bytes_per_line` or
    /// the geometry is invalid.
    pub fn from_vec(
        width: usize,
        height: usize,
        bytes_per_line: usize,
        format: PixelFormat,
        data: Vec<u8>,
    ) -> Result<Self, StorageError> {
        Self::from_vec_in(width, height, bytes_per_line, format, data, CpuAllocator)
    }
}

impl<A: ImageAllocator> SharedImage<A> {
    fn null() -> Self {
        Self {
            data: None,
            width: 0,
            height: 0,
            bytes_per_line: 0,
            format: PixelFormat::Invalid,
        }
    }

    /// Like [`SharedImage::new`] with a custom allocator.
    pub fn new_in(
        width: usize,
        height: usize,
        format: PixelFormat,
        alloc: A,
    ) -> Result<Self, StorageError> {
        let bytes_per_line = width
            .checked_mul(format.bytes_per_pixel())
            .and_then(|row| row.checked_next_multiple_of(SCANLINE_ALIGN))
            .ok_or(StorageError::SizeOverflow(width, height))?;
        Self::with_bytes_per_line_in(width, height, bytes_per_line, format, alloc)
    }

    /// Like [`SharedImage::with_bytes_per_line`] with a custom allocator.
    pub fn with_bytes_per_line_in(
        width: usize,
        height: usize,
        bytes_per_line: usize,
        format: PixelFormat,
        alloc: A,
    ) -> Result<Self, StorageError> {
        if format == PixelFormat::Invalid {
            return Err(StorageError::InvalidFormat);
        }

        let min = width
            .checked_mul(format.bytes_per_pixel())
            .ok_or(StorageError::SizeOverflow(width, height))?;
        if bytes_per_line < min {
            return Err(StorageError::StrideTooSmall {
                bytes_per_line,
                min,
            });
        }
        if bytes_per_line % format.alignment() != 0 {
            return Err(StorageError::MisalignedStride {
                bytes_per_line,
                align: format.alignment(),
            });
        }

        let len = bytes_per_line
            .checked_mul(height)
            .ok_or(StorageError::SizeOverflow(width, height))?;
        if width == 0 || height == 0 {
            return Ok(Self::null());
        }

        let layout =
            Layout::from_size_align(len, BUFFER_ALIGN).map_err(StorageError::LayoutError)?;
        let ptr = NonNull::new(alloc.alloc(layout)?).ok_or(StorageError::NullPointer)?;

        log::debug!(
            "allocated {width}x{height} {format} image with {bytes_per_line} bytes per line"
        );

        Ok(Self {
            data: Some(Arc::new(ImageData { ptr, layout, alloc })),
            width,
            height,
            bytes_per_line,
            format,
        })
    }

    /// Like [`SharedImage::from_vec`] with a custom allocator.
    pub fn from_vec_in(
        width: usize,
        height: usize,
        bytes_per_line: usize,
        format: PixelFormat,
        data: Vec<u8>,
        alloc: A,
    ) -> Result<Self, StorageError> {
        let image = Self::with_bytes_per_line_in(width, height, bytes_per_line, format, alloc)?;

        let expected = image.size_in_bytes();
        if data.len() != expected {
            return Err(StorageError::InvalidDataLength {
                expected,
                actual: data.len(),
            });
        }

        if expected > 0 {
            // SAFETY: the buffer was just allocated with `expected` bytes and
            // cannot overlap `data`
            unsafe {
                std::ptr::copy_nonoverlapping(data.as_ptr(), image.bits(), expected);
            }
        }

        Ok(image)
    }

    /// Total number of bytes of the pixel buffer, padding included.
    pub fn size_in_bytes(&self) -> usize {
        self.bytes_per_line * self.height
    }

    /// Number of handles sharing the pixel buffer, zero for a null image.
    pub fn ref_count(&self) -> usize {
        self.data.as_ref().map_or(0, Arc::strong_count)
    }

    /// Returns true if no other handle shares the pixel buffer.
    pub fn is_detached(&self) -> bool {
        self.ref_count() <= 1
    }

    /// Pointer to the first byte of row `y`.
    ///
    /// # Errors
    ///
    /// Returns an error if `y` is not a valid row.
    pub fn scan_line(&self, y: usize) -> Result<*mut u8, StorageError> {
        if y >= self.height {
            return Err(StorageError::ScanLineOutOfBounds(y, self.height));
        }
        Ok(self.bits().wrapping_add(y * self.bytes_per_line))
    }

    /// Set every byte of the buffer, padding included, to `value`.
    ///
    /// The write is visible through every clone of this image.
    pub fn fill(&mut self, value: u8) {
        let len = self.size_in_bytes();
        if len > 0 {
            // SAFETY: the buffer holds `len` bytes
            unsafe { std::ptr::write_bytes(self.bits(), value, len) };
        }
    }

    /// Copy the whole buffer, padding included, into a vector.
    pub fn to_vec(&self) -> Vec<u8> {
        let len = self.size_in_bytes();
        if len == 0 {
            return Vec::new();
        }
        // SAFETY: the buffer holds `len` initialized bytes
        unsafe { std::slice::from_raw_parts(self.bits(), len) }.to_vec()
    }

    /// Create an image with the same geometry and its own copy of the pixels.
    pub fn deep_copy(&self) -> Result<Self, StorageError> {
        let Some(data) = self.data.as_ref() else {
            return Ok(Self::null());
        };
        let copy = Self::with_bytes_per_line_in(
            self.width,
            self.height,
            self.bytes_per_line,
            self.format,
            data.alloc.clone(),
        )?;
        // SAFETY: both buffers hold `size_in_bytes` bytes and are distinct allocations
        unsafe {
            std::ptr::copy_nonoverlapping(self.bits(), copy.bits(), self.size_in_bytes());
        }
        Ok(copy)
    }
}

// SAFETY: the buffer holds `height * bytes_per_line` bytes aligned to
// BUFFER_ALIGN, the stride is validated against the format on construction
// and the Arc keeps the memory alive for every clone.
unsafe impl<A: ImageAllocator> ExternalImage for SharedImage<A> {
    #[inline]
    fn bits(&self) -> *mut u8 {
        self.data
            .as_ref()
            .map_or(std::ptr::null_mut(), |data| data.ptr.as_ptr())
    }

    #[inline]
    fn bytes_per_line(&self) -> usize {
        self.bytes_per_line
    }

    #[inline]
    fn width(&self) -> usize {
        self.width
    }

    #[inline]
    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn format(&self) -> PixelFormat {
        self.format
    }
}

impl<A: ImageAllocator> Clone for SharedImage<A> {
    /// Creates a shallow copy sharing the pixel buffer.
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            width: self.width,
            height: self.height,
            bytes_per_line: self.bytes_per_line,
            format: self.format,
        }
    }
}

impl<A: ImageAllocator> Default for SharedImage<A> {
    fn default() -> Self {
        Self::null()
    }
}

impl<A: ImageAllocator> std::fmt::Debug for SharedImage<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedImage")
            .field("bits", &self.bits())
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes_per_line", &self.bytes_per_line)
            .field("format", &self.format)
            .field("ref_count", &self.ref_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_pads_rows() -> Result<(), StorageError> {
        let image = SharedImage::new(5, 2, PixelFormat::Rgb888)?;
        assert_eq!(image.width(), 5);
        assert_eq!(image.height(), 2);
        assert_eq!(image.bytes_per_line(), 16);
        assert_eq!(image.size_in_bytes(), 32);
        assert_eq!(image.format(), PixelFormat::Rgb888);
        assert!(!image.is_null());
        assert_eq!(image.bits() as usize % BUFFER_ALIGN, 0);
        assert!(image.to_vec().iter().all(|&b| b == 0));
        Ok(())
    }

    #[test]
    fn test_default_is_null() {
        let image = SharedImage::<CpuAllocator>::default();
        assert!(image.is_null());
        assert_eq!(image.width(), 0);
        assert_eq!(image.height(), 0);
        assert_eq!(image.bytes_per_line(), 0);
        assert_eq!(image.ref_count(), 0);
        assert!(image.to_vec().is_empty());
    }

    #[test]
    fn test_zero_sized_is_null() -> Result<(), StorageError> {
        let image = SharedImage::new(0, 10, PixelFormat::Grayscale8)?;
        assert!(image.is_null());
        assert_eq!(image.height(), 0);
        Ok(())
    }

    #[test]
    fn test_invalid_format() {
        let res = SharedImage::new(2, 2, PixelFormat::Invalid);
        assert_eq!(res.unwrap_err(), StorageError::InvalidFormat);
    }

    #[test]
    fn test_stride_too_small() {
        let res = SharedImage::with_bytes_per_line(4, 3, 12, PixelFormat::Argb32);
        assert_eq!(
            res.unwrap_err(),
            StorageError::StrideTooSmall {
                bytes_per_line: 12,
                min: 16
            }
        );
    }

    #[test]
    fn test_misaligned_stride() {
        let res = SharedImage::with_bytes_per_line(2, 2, 9, PixelFormat::Grayscale16);
        assert_eq!(
            res.unwrap_err(),
            StorageError::MisalignedStride {
                bytes_per_line: 9,
                align: 2
            }
        );
    }

    #[test]
    fn test_clone_is_shallow() -> Result<(), StorageError> {
        let image = SharedImage::new(4, 3, PixelFormat::Argb32)?;
        assert_eq!(image.ref_count(), 1);
        assert!(image.is_detached());

        let alias = image.clone();
        assert_eq!(alias.bits(), image.bits());
        assert_eq!(image.ref_count(), 2);
        assert!(!image.is_detached());

        drop(alias);
        assert_eq!(image.ref_count(), 1);
        Ok(())
    }

    #[test]
    fn test_fill_visible_through_clone() -> Result<(), StorageError> {
        let mut image = SharedImage::new(3, 3, PixelFormat::Grayscale8)?;
        let alias = image.clone();
        image.fill(7);
        assert!(alias.to_vec().iter().all(|&b| b == 7));
        Ok(())
    }

    #[test]
    fn test_from_vec() -> Result<(), StorageError> {
        let data = vec![1, 2, 0, 0, 3, 4, 0, 0];
        let image = SharedImage::from_vec(2, 2, 4, PixelFormat::Grayscale8, data.clone())?;
        assert_eq!(image.to_vec(), data);

        let res = SharedImage::from_vec(2, 2, 4, PixelFormat::Grayscale8, vec![0; 7]);
        assert_eq!(
            res.unwrap_err(),
            StorageError::InvalidDataLength {
                expected: 8,
                actual: 7
            }
        );
        Ok(())
    }

    #[test]
    fn test_scan_line() -> Result<(), StorageError> {
        let image = SharedImage::with_bytes_per_line(4, 3, 16, PixelFormat::Argb32)?;
        assert_eq!(image.scan_line(0)?, image.bits());
        assert_eq!(image.scan_line(2)? as usize - image.bits() as usize, 32);
        assert_eq!(
            image.scan_line(3).unwrap_err(),
            StorageError::ScanLineOutOfBounds(3, 3)
        );
        Ok(())
    }

    #[test]
    fn test_deep_copy_detaches() -> Result<(), StorageError> {
        let mut image = SharedImage::new(2, 2, PixelFormat::Grayscale8)?;
        image.fill(3);
        let mut copy = image.deep_copy()?;
        assert_ne!(copy.bits(), image.bits());
        assert_eq!(copy.to_vec(), image.to_vec());

        copy.fill(9);
        assert!(image.to_vec().iter().all(|&b| b == 3));
        Ok(())
    }
}
