#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Overview
//!
//! [`BorrowedGridView`] treats the pixels of an image it does not own as a
//! two dimensional grid, without copying them. The view keeps a shallow copy
//! of the owning handle and caches the base pointer, the row stride and the
//! dimensions every time it is bound to a handle.
//!
//! Generic algorithms never see the view type itself; they are written
//! against the [`GenericImage`] protocol.
//!
//! ```rust
//! use gridview_image::{generic, BorrowedGridView};
//! use gridview_storage::{PixelFormat, SharedImage};
//!
//! let image = SharedImage::with_bytes_per_line(4, 3, 16, PixelFormat::Grayscale8).unwrap();
//! let mut view = BorrowedGridView::<u8>::new(image.clone());
//!
//! view[2][3] = 42;
//!
//! assert_eq!(view.size(), 12);
//! assert_eq!(generic::width_step(&view), 16);
//! assert_eq!(image.to_vec()[2 * 16 + 3], 42);
//! ```

/// Error types for the image module.
pub mod error;

/// The generic image protocol.
pub mod generic;

/// Pixel types and their storage formats.
pub mod pixel;

/// Borrowed pixel grid view.
pub mod view;

pub use crate::error::ImageError;
pub use crate::generic::GenericImage;
pub use crate::pixel::{Bgra8, Pixel, Rgb8, Rgba8, ScalarPixel};
pub use crate::view::BorrowedGridView;
pub use gridview_storage::{ExternalImage, PixelFormat, SharedImage};
