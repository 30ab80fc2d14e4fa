#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! ```rust
//! use gridview::image::{BorrowedGridView, PixelFormat, SharedImage};
//! use gridview::imgproc::core::assign_all_pixels;
//! use gridview::linalg::mat;
//!
//! let image = SharedImage::new(4, 3, PixelFormat::Grayscale8).unwrap();
//! let mut view = BorrowedGridView::<u8>::new(image);
//!
//! assign_all_pixels(&mut view, 2);
//! assert_eq!(mat(&view).sum(), 24.0);
//! ```

#[doc(inline)]
pub use gridview_storage as storage;

#[doc(inline)]
pub use gridview_image as image;

#[doc(inline)]
pub use gridview_imgproc as imgproc;

#[doc(inline)]
pub use gridview_linalg as linalg;
