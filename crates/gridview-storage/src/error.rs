use thiserror::Error;

/// An error type for image storage operations.
#[derive(Debug, Error, PartialEq)]
pub enum StorageError {
    /// The requested buffer layout is invalid.
    #[error("Invalid image layout {0}")]
    LayoutError(core::alloc::LayoutError),

    /// The allocator returned a null pointer.
    #[error("Null pointer")]
    NullPointer,

    /// The pixel format cannot back a pixel buffer.
    #[error("Invalid pixel format")]
    InvalidFormat,

    /// The row stride cannot hold a full row of pixels.
    #[error("Bytes per line ({bytes_per_line}) is smaller than the row size ({min})")]
    StrideTooSmall {
        /// The requested number of bytes per line.
        bytes_per_line: usize,
        /// The minimum number of bytes a row needs.
        min: usize,
    },

    /// The row stride breaks the alignment of the pixel format.
    #[error("Bytes per line ({bytes_per_line}) is not a multiple of {align}")]
    MisalignedStride {
        /// The requested number of bytes per line.
        bytes_per_line: usize,
        /// The alignment required by the pixel format.
        align: usize,
    },

    /// The provided bytes do not match the image geometry.
    #[error("Data length ({actual}) does not match the image size ({expected})")]
    InvalidDataLength {
        /// Number of bytes the geometry requires.
        expected: usize,
        /// Number of bytes that were provided.
        actual: usize,
    },

    /// The image dimensions overflow the address space.
    #[error("Image size overflow: {0}x{1}")]
    SizeOverflow(usize, usize),

    /// The requested scan line does not exist.
    #[error("Scan line {0} is out of bounds ({1})")]
    ScanLineOutOfBounds(usize, usize),
}
