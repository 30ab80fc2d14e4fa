use gridview_image::GenericImage;

/// Flip the image horizontally, in place.
///
/// # Example
///
/// ```
/// use gridview_image::{BorrowedGridView, PixelFormat, SharedImage};
/// use gridview_imgproc::flip::horizontal_flip;
///
/// let image = SharedImage::from_vec(3, 1, 4, PixelFormat::Grayscale8, vec![1, 2, 3, 0]).unwrap();
/// let mut view = BorrowedGridView::<u8>::new(image);
///
/// horizontal_flip(&mut view);
///
/// assert_eq!(view.row(0), &[3, 2, 1]);
/// ```
pub fn horizontal_flip<I: GenericImage>(img: &mut I) {
    for r in 0..img.num_rows() {
        img.row_slice_mut(r).reverse();
    }
}

/// Flip the image vertically, in place.
///
/// Rows are swapped as a whole; the padding at the end of each row is left
/// untouched.
///
/// # Panics
///
/// Panics if the row stride of a non-empty image is shorter than a row.
pub fn vertical_flip<I: GenericImage>(img: &mut I) {
    if img.is_empty() {
        return;
    }
    let rows = img.num_rows();
    let cols = img.num_columns();
    let row_bytes = cols * std::mem::size_of::<I::Pixel>();
    assert!(
        img.width_step() >= row_bytes,
        "row stride {} is shorter than a row of {row_bytes} bytes",
        img.width_step()
    );
    for top in 0..rows / 2 {
        let bottom = rows - 1 - top;
        let a = img.row_ptr_mut(top);
        let b = img.row_ptr_mut(bottom);
        // SAFETY: the stride holds a full row, so distinct rows never overlap
        unsafe { std::ptr::swap_nonoverlapping(a, b, cols) };
    }
}
