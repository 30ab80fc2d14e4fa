//! The generic image protocol.
//!
//! Any pixel grid exposing its dimensions, a pointer to its first pixel and
//! its row stride can be processed by the algorithms built on this protocol.
//! Conformance is checked statically through the [`GenericImage`] bound; the
//! free functions below are the surface algorithms are expected to call.

use crate::pixel::Pixel;

/// A row-major pixel grid with a possibly padded row stride.
///
/// # Safety
///
/// Implementors must guarantee that, whenever `num_rows() * num_columns() > 0`:
/// - `image_data()` points to `num_rows()` rows spaced `width_step()` bytes
///   apart, each starting with `num_columns()` initialized values of
///   `Self::Pixel`;
/// - `width_step() >= num_columns() * size_of::<Self::Pixel>()`, so that
///   distinct rows never overlap;
/// - `image_data()` and `width_step()` are aligned for `Self::Pixel`;
/// - `image_data_mut()` returns the same address and is valid for writes.
///
/// When the grid is empty, `image_data()` returns a null pointer.
pub unsafe trait GenericImage {
    /// The pixel type stored in the grid.
    type Pixel: Pixel;

    /// Number of rows of the grid.
    fn num_rows(&self) -> usize;

    /// Number of columns of the grid.
    fn num_columns(&self) -> usize;

    /// Pointer to the raw storage of the first pixel, null if the grid is empty.
    fn image_data(&self) -> *const u8;

    /// Mutable pointer to the raw storage of the first pixel, null if the grid is empty.
    fn image_data_mut(&mut self) -> *mut u8;

    /// Byte distance between the starts of two consecutive rows.
    fn width_step(&self) -> usize;

    /// Returns true if the grid has no pixels.
    fn is_empty(&self) -> bool {
        self.num_rows() == 0 || self.num_columns() == 0
    }

    /// Pointer to the first pixel of `row`.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of bounds.
    #[track_caller]
    fn row_ptr(&self, row: usize) -> *const Self::Pixel {
        assert!(
            row < self.num_rows(),
            "row {row} out of bounds ({})",
            self.num_rows()
        );
        self.image_data().wrapping_add(self.width_step() * row) as *const Self::Pixel
    }

    /// Mutable pointer to the first pixel of `row`.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of bounds.
    #[track_caller]
    fn row_ptr_mut(&mut self, row: usize) -> *mut Self::Pixel {
        assert!(
            row < self.num_rows(),
            "row {row} out of bounds ({})",
            self.num_rows()
        );
        let width_step = self.width_step();
        self.image_data_mut().wrapping_add(width_step * row) as *mut Self::Pixel
    }

    /// The pixels of `row`.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of bounds.
    #[track_caller]
    fn row_slice(&self, row: usize) -> &[Self::Pixel] {
        let ptr = self.row_ptr(row);
        if self.num_columns() == 0 {
            return &[];
        }
        // SAFETY: the row exists, so the grid is not empty and the trait
        // contract guarantees `num_columns` aligned pixels at `ptr`
        unsafe { std::slice::from_raw_parts(ptr, self.num_columns()) }
    }

    /// The pixels of `row`, mutably.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of bounds.
    #[track_caller]
    fn row_slice_mut(&mut self, row: usize) -> &mut [Self::Pixel] {
        let num_columns = self.num_columns();
        let ptr = self.row_ptr_mut(row);
        if num_columns == 0 {
            return &mut [];
        }
        // SAFETY: see `row_slice`
        unsafe { std::slice::from_raw_parts_mut(ptr, num_columns) }
    }
}

/// Number of rows of `img`.
#[inline]
pub fn num_rows<I: GenericImage + ?Sized>(img: &I) -> usize {
    img.num_rows()
}

/// Number of columns of `img`.
#[inline]
pub fn num_columns<I: GenericImage + ?Sized>(img: &I) -> usize {
    img.num_columns()
}

/// Pointer to the raw storage of the first pixel of `img`, null if it is empty.
#[inline]
pub fn image_data<I: GenericImage + ?Sized>(img: &I) -> *const u8 {
    img.image_data()
}

/// Mutable pointer to the raw storage of the first pixel of `img`, null if it is empty.
#[inline]
pub fn image_data_mut<I: GenericImage + ?Sized>(img: &mut I) -> *mut u8 {
    img.image_data_mut()
}

/// Byte distance between the starts of two consecutive rows of `img`.
#[inline]
pub fn width_step<I: GenericImage + ?Sized>(img: &I) -> usize {
    img.width_step()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A tightly packed grid over a vector, to check the provided methods.
    struct PackedGrid {
        data: Vec<u16>,
        rows: usize,
        cols: usize,
    }

    unsafe impl GenericImage for PackedGrid {
        type Pixel = u16;

        fn num_rows(&self) -> usize {
            self.rows
        }

        fn num_columns(&self) -> usize {
            self.cols
        }

        fn image_data(&self) -> *const u8 {
            if self.data.is_empty() {
                std::ptr::null()
            } else {
                self.data.as_ptr() as *const u8
            }
        }

        fn image_data_mut(&mut self) -> *mut u8 {
            if self.data.is_empty() {
                std::ptr::null_mut()
            } else {
                self.data.as_mut_ptr() as *mut u8
            }
        }

        fn width_step(&self) -> usize {
            self.cols * std::mem::size_of::<u16>()
        }
    }

    #[test]
    fn test_free_functions() {
        let mut grid = PackedGrid {
            data: vec![0, 1, 2, 3, 4, 5],
            rows: 2,
            cols: 3,
        };
        assert_eq!(num_rows(&grid), 2);
        assert_eq!(num_columns(&grid), 3);
        assert_eq!(width_step(&grid), 6);
        assert_eq!(image_data(&grid), grid.data.as_ptr() as *const u8);
        assert_eq!(image_data_mut(&mut grid), grid.data.as_mut_ptr() as *mut u8);
    }

    #[test]
    fn test_row_slices() {
        let mut grid = PackedGrid {
            data: vec![0, 1, 2, 3, 4, 5],
            rows: 2,
            cols: 3,
        };
        assert_eq!(grid.row_slice(1), &[3, 4, 5]);
        grid.row_slice_mut(0)[2] = 9;
        assert_eq!(grid.data, vec![0, 1, 9, 3, 4, 5]);
    }

    #[test]
    fn test_empty_grid() {
        let grid = PackedGrid {
            data: vec![],
            rows: 0,
            cols: 0,
        };
        assert!(grid.is_empty());
        assert!(image_data(&grid).is_null());
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_row_slice_out_of_bounds() {
        let grid = PackedGrid {
            data: vec![0; 4],
            rows: 2,
            cols: 2,
        };
        let _ = grid.row_slice(2);
    }
}
