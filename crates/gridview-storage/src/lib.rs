#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Overview
//!
//! `gridview-storage` models the image object that owns pixel memory. Views in
//! `gridview-image` never allocate; they borrow from a handle implementing
//! [`ExternalImage`], of which [`SharedImage`] is the reference implementation.
//!
//! ```rust
//! use gridview_storage::{ExternalImage, PixelFormat, SharedImage};
//!
//! let image = SharedImage::new(3, 2, PixelFormat::Rgb888).unwrap();
//! // 3 * 3 = 9 bytes of pixels, padded to a 4 byte boundary
//! assert_eq!(image.bytes_per_line(), 12);
//!
//! // clones share the same pixels
//! let alias = image.clone();
//! assert_eq!(alias.bits(), image.bits());
//! ```

/// Allocator module containing the memory management utilities.
pub mod allocator;

/// Error types for the storage module.
pub mod error;

/// The external image handle contract.
pub mod external;

/// Pixel storage formats.
pub mod format;

/// Reference-counted image buffer.
pub mod image;

pub use crate::allocator::{CpuAllocator, ImageAllocator};
pub use crate::error::StorageError;
pub use crate::external::ExternalImage;
pub use crate::format::PixelFormat;
pub use crate::image::SharedImage;
