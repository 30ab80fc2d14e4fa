use gridview_image::{GenericImage, ImageError, ScalarPixel};

/// Set every pixel of `img` to `value`.
///
/// # Example
///
/// ```
/// use gridview_image::{BorrowedGridView, PixelFormat, SharedImage};
/// use gridview_imgproc::core::assign_all_pixels;
///
/// let image = SharedImage::new(3, 2, PixelFormat::Grayscale8).unwrap();
/// let mut view = BorrowedGridView::<u8>::new(image);
///
/// assign_all_pixels(&mut view, 7);
///
/// assert!(view.rows().all(|row| row == [7, 7, 7]));
/// ```
pub fn assign_all_pixels<I: GenericImage>(img: &mut I, value: I::Pixel) {
    for r in 0..img.num_rows() {
        img.row_slice_mut(r).fill(value);
    }
}

/// Copy the pixels of `src` into `dst`.
///
/// `src` and `dst` may be views of the same memory.
///
/// # Errors
///
/// Returns an error if the two images don't have the same size.
pub fn assign_image<S, D>(dst: &mut D, src: &S) -> Result<(), ImageError>
where
    S: GenericImage,
    D: GenericImage<Pixel = S::Pixel>,
{
    if src.num_rows() != dst.num_rows() || src.num_columns() != dst.num_columns() {
        return Err(ImageError::InvalidImageSize(
            src.num_columns(),
            src.num_rows(),
            dst.num_columns(),
            dst.num_rows(),
        ));
    }

    if src.is_empty() {
        return Ok(());
    }

    let cols = src.num_columns();
    for r in 0..src.num_rows() {
        let src_row = src.row_ptr(r);
        let dst_row = dst.row_ptr_mut(r);
        // SAFETY: both rows hold `cols` pixels; `copy` tolerates overlap
        unsafe { std::ptr::copy(src_row, dst_row, cols) };
    }

    Ok(())
}

/// Sum of all the pixels of a single channel image.
pub fn sum_pixels<I>(img: &I) -> f64
where
    I: GenericImage,
    I::Pixel: ScalarPixel,
{
    (0..img.num_rows())
        .map(|r| {
            img.row_slice(r)
                .iter()
                .map(|&p| Into::<f64>::into(p))
                .sum::<f64>()
        })
        .sum()
}

/// Mean of all the pixels of a single channel image, `None` if it is empty.
pub fn mean_pixel<I>(img: &I) -> Option<f64>
where
    I: GenericImage,
    I::Pixel: ScalarPixel,
{
    if img.is_empty() {
        return None;
    }
    Some(sum_pixels(img) / (img.num_rows() * img.num_columns()) as f64)
}

/// Compute the standard deviation and the mean of a single channel image.
///
/// Both are computed in one pass. Returns `None` for an empty image.
///
/// # Example
///
/// ```
/// use gridview_image::{BorrowedGridView, PixelFormat, SharedImage};
/// use gridview_imgproc::core::std_mean;
///
/// let image = SharedImage::from_vec(2, 2, 4, PixelFormat::Grayscale8, vec![
///     0, 2, 9, 9,
///     4, 6, 9, 9,
/// ]).unwrap();
/// let view = BorrowedGridView::<u8>::new(image);
///
/// let (std, mean) = std_mean(&view).unwrap();
///
/// assert_eq!(mean, 3.0);
/// assert_eq!(std, 5.0f64.sqrt());
/// ```
pub fn std_mean<I>(img: &I) -> Option<(f64, f64)>
where
    I: GenericImage,
    I::Pixel: ScalarPixel,
{
    if img.is_empty() {
        return None;
    }

    let (sum, sq_sum) = (0..img.num_rows())
        .flat_map(move |r| img.row_slice(r).iter())
        .fold((0f64, 0f64), |(sum, sq_sum), &p| {
            let v: f64 = p.into();
            (sum + v, sq_sum + v * v)
        });

    let n = (img.num_rows() * img.num_columns()) as f64;
    let mean = sum / n;
    let std = (sq_sum / n - mean * mean).max(0.0).sqrt();

    Some((std, mean))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridview_image::{BorrowedGridView, PixelFormat, SharedImage};

    fn gray_view(
        data: Vec<u8>,
        width: usize,
        height: usize,
    ) -> Result<BorrowedGridView<u8>, ImageError> {
        let image = SharedImage::from_vec(width, height, width, PixelFormat::Grayscale8, data)?;
        Ok(BorrowedGridView::new(image))
    }

    #[test]
    fn test_assign_all_pixels_skips_padding() -> Result<(), ImageError> {
        let image = SharedImage::with_bytes_per_line(3, 2, 4, PixelFormat::Grayscale8)?;
        let mut view = BorrowedGridView::<u8>::new(image.clone());
        assign_all_pixels(&mut view, 1);
        assert_eq!(image.to_vec(), vec![1, 1, 1, 0, 1, 1, 1, 0]);
        Ok(())
    }

    #[test]
    fn test_assign_image() -> Result<(), ImageError> {
        let src = gray_view(vec![1, 2, 3, 4, 5, 6], 3, 2)?;
        let image = SharedImage::with_bytes_per_line(3, 2, 8, PixelFormat::Grayscale8)?;
        let mut dst = BorrowedGridView::<u8>::new(image);

        assign_image(&mut dst, &src)?;
        assert_eq!(dst.row(0), &[1, 2, 3]);
        assert_eq!(dst.row(1), &[4, 5, 6]);
        Ok(())
    }

    #[test]
    fn test_assign_image_aliased() -> Result<(), ImageError> {
        let src = gray_view(vec![1, 2, 3, 4], 2, 2)?;
        let mut dst = src.clone();
        assign_image(&mut dst, &src)?;
        assert_eq!(src.row(1), &[3, 4]);
        Ok(())
    }

    #[test]
    fn test_assign_image_size_mismatch() -> Result<(), ImageError> {
        let src = gray_view(vec![0; 6], 3, 2)?;
        let mut dst = gray_view(vec![0; 6], 2, 3)?;
        let res = assign_image(&mut dst, &src);
        assert_eq!(res, Err(ImageError::InvalidImageSize(3, 2, 2, 3)));
        Ok(())
    }

    #[test]
    fn test_sum_pixels() -> Result<(), ImageError> {
        let image = SharedImage::from_vec(
            2,
            2,
            8,
            PixelFormat::Grayscale16,
            [1000u16, 2000, 0, 0, 3000, 4000, 0, 0]
                .iter()
                .flat_map(|v| v.to_ne_bytes())
                .collect(),
        )?;
        let view = BorrowedGridView::<u16>::new(image);
        approx::assert_relative_eq!(sum_pixels(&view), 10000.0);
        Ok(())
    }

    #[test]
    fn test_mean_pixel_skips_padding() -> Result<(), ImageError> {
        let image = SharedImage::from_vec(
            2,
            2,
            4,
            PixelFormat::Grayscale8,
            vec![1, 2, 200, 200, 3, 6, 200, 200],
        )?;
        let view = BorrowedGridView::<u8>::new(image);
        assert_eq!(mean_pixel(&view), Some(3.0));
        Ok(())
    }

    #[test]
    fn test_std_mean() -> Result<(), ImageError> {
        let view = gray_view(vec![2, 4, 4, 4, 5, 5, 7, 9], 4, 2)?;
        let (std, mean) = std_mean(&view).unwrap_or_default();
        approx::assert_relative_eq!(mean, 5.0);
        approx::assert_relative_eq!(std, 2.0);
        Ok(())
    }

    #[test]
    fn test_std_mean_empty() {
        let view = BorrowedGridView::<f32>::default();
        assert_eq!(std_mean(&view), None);
        assert_eq!(mean_pixel(&view), None);
        assert_eq!(sum_pixels(&view), 0.0);
    }
}
