#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! Every function here is written against [`gridview_image::GenericImage`]
//! only, so it runs on borrowed views as well as on any other conforming
//! pixel grid.

/// image basic operations module.
pub mod core;

/// image flipping module.
pub mod flip;

/// operations to threshold images.
pub mod threshold;
