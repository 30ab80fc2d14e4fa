#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! [`mat`] wraps any [`GenericImage`](gridview_image::GenericImage) into a
//! lazy matrix expression. Nothing is copied when the expression is built;
//! elements are read through the image on demand, and [`MatrixOp::to_faer`]
//! evaluates the expression into a dense `faer` matrix.
//!
//! ```rust
//! use gridview_image::{BorrowedGridView, PixelFormat, SharedImage};
//! use gridview_linalg::{mat, MatrixExp};
//!
//! let image = SharedImage::from_vec(2, 2, 4, PixelFormat::Grayscale8, vec![
//!     1, 2, 0, 0,
//!     3, 4, 0, 0,
//! ]).unwrap();
//! let view = BorrowedGridView::<u8>::new(image);
//!
//! let m = mat(&view);
//! assert_eq!(m.at(1, 0), 3);
//! assert_eq!(m.sum(), 10.0);
//! assert_eq!(m.transpose().at(0, 1), 3);
//! ```

/// Matrix expression nodes.
pub mod expr;

pub use crate::expr::{mat, Array2dToMat, MatrixExp, MatrixOp, Transpose};
