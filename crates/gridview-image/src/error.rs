use gridview_storage::{PixelFormat, StorageError};

/// An error type for the image module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// The pixel type cannot describe the format of the image.
    #[error("The pixel type {pixel} doesn't match the {format} format of the image")]
    PixelFormatMismatch {
        /// The storage format reported by the image.
        format: PixelFormat,
        /// Name of the requested pixel type.
        pixel: &'static str,
    },

    /// A row of pixels does not fit in the row stride.
    #[error("{columns} pixels of {pixel_size} bytes don't fit in {width_step} bytes per row")]
    RowOverflow {
        /// Number of columns of the image.
        columns: usize,
        /// Size of one pixel in bytes.
        pixel_size: usize,
        /// Byte distance between rows.
        width_step: usize,
    },

    /// The image data or the row stride is not aligned for the pixel type.
    #[error("Image data is not aligned to {0} bytes")]
    MisalignedData(usize),

    /// Error when the image sizes do not match.
    #[error("Image size mismatch: {0}x{1} vs {2}x{3}")]
    InvalidImageSize(usize, usize, usize, usize),

    /// Error from the underlying pixel storage.
    #[error(transparent)]
    Storage(#[from] StorageError),
}
