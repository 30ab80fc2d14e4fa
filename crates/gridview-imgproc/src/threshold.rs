use num_traits::Zero;

use gridview_image::{GenericImage, ImageError};

fn threshold_with<S, D, F>(src: &S, dst: &mut D, f: F) -> Result<(), ImageError>
where
    S: GenericImage,
    D: GenericImage<Pixel = S::Pixel>,
    F: Fn(S::Pixel) -> S::Pixel,
{
    if src.num_rows() != dst.num_rows() || src.num_columns() != dst.num_columns() {
        return Err(ImageError::InvalidImageSize(
            src.num_columns(),
            src.num_rows(),
            dst.num_columns(),
            dst.num_rows(),
        ));
    }

    // pixels are moved by value so that `src` and `dst` may alias
    for r in 0..src.num_rows() {
        let src_row = src.row_ptr(r);
        let dst_row = dst.row_ptr_mut(r);
        for c in 0..src.num_columns() {
            // SAFETY: `c` is within the row on both images
            unsafe { dst_row.add(c).write(f(src_row.add(c).read())) };
        }
    }

    Ok(())
}

/// Apply a binary threshold to an image.
///
/// # Arguments
///
/// * `src` - The input image.
/// * `dst` - The output image, possibly a view of the same memory as `src`.
/// * `threshold` - The threshold value.
/// * `max_value` - The value written where the input is greater than the threshold.
///
/// # Errors
///
/// Returns an error if the two images don't have the same size.
///
/// # Example
///
/// ```
/// use gridview_image::{BorrowedGridView, PixelFormat, SharedImage};
/// use gridview_imgproc::threshold::threshold_binary;
///
/// let data = vec![100u8, 200, 0, 0, 50, 150, 0, 0];
/// let image = SharedImage::from_vec(2, 2, 4, PixelFormat::Grayscale8, data).unwrap();
/// let src = BorrowedGridView::<u8>::new(image);
///
/// let out = SharedImage::new(2, 2, PixelFormat::Grayscale8).unwrap();
/// let mut dst = BorrowedGridView::<u8>::new(out);
///
/// threshold_binary(&src, &mut dst, 100, 255).unwrap();
/// assert_eq!(dst.row(0), &[0, 255]);
/// assert_eq!(dst.row(1), &[0, 255]);
/// ```
pub fn threshold_binary<S, D>(
    src: &S,
    dst: &mut D,
    threshold: S::Pixel,
    max_value: S::Pixel,
) -> Result<(), ImageError>
where
    S: GenericImage,
    S::Pixel: PartialOrd + Zero,
    D: GenericImage<Pixel = S::Pixel>,
{
    threshold_with(src, dst, |p| {
        if p > threshold {
            max_value
        } else {
            <S::Pixel as Zero>::zero()
        }
    })
}

/// Apply an inverse binary threshold to an image.
///
/// Like [`threshold_binary`] with the two output values swapped.
///
/// # Errors
///
/// Returns an error if the two images don't have the same size.
pub fn threshold_binary_inverse<S, D>(
    src: &S,
    dst: &mut D,
    threshold: S::Pixel,
    max_value: S::Pixel,
) -> Result<(), ImageError>
where
    S: GenericImage,
    S::Pixel: PartialOrd + Zero,
    D: GenericImage<Pixel = S::Pixel>,
{
    threshold_with(src, dst, |p| {
        if p > threshold {
            <S::Pixel as Zero>::zero()
        } else {
            max_value
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridview_image::{BorrowedGridView, PixelFormat, SharedImage};

    #[test]
    fn test_threshold_binary_in_place() -> Result<(), ImageError> {
        let data = vec![100u8, 200, 50, 150, 200, 250];
        let image = SharedImage::from_vec(2, 3, 2, PixelFormat::Grayscale8, data)?;
        let src = BorrowedGridView::<u8>::new(image.clone());
        let mut dst = src.clone();

        threshold_binary(&src, &mut dst, 100, 255)?;

        assert_eq!(image.to_vec(), vec![0, 255, 0, 255, 255, 255]);
        Ok(())
    }

    #[test]
    fn test_threshold_binary_inverse_f32() -> Result<(), ImageError> {
        let data = [0.2f32, 0.8, 0.5, 0.1]
            .iter()
            .flat_map(|v| v.to_ne_bytes())
            .collect();
        let image = SharedImage::from_vec(2, 2, 8, PixelFormat::GrayscaleF32, data)?;
        let src = BorrowedGridView::<f32>::new(image);
        let mut dst =
            BorrowedGridView::<f32>::new(SharedImage::new(2, 2, PixelFormat::GrayscaleF32)?);

        threshold_binary_inverse(&src, &mut dst, 0.4, 1.0)?;

        assert_eq!(dst.row(0), &[1.0, 0.0]);
        assert_eq!(dst.row(1), &[0.0, 1.0]);
        Ok(())
    }

    #[test]
    fn test_threshold_size_mismatch() -> Result<(), ImageError> {
        let src = BorrowedGridView::<u8>::new(SharedImage::new(2, 2, PixelFormat::Grayscale8)?);
        let mut dst = BorrowedGridView::<u8>::new(SharedImage::new(3, 2, PixelFormat::Grayscale8)?);
        let res = threshold_binary(&src, &mut dst, 1, 2);
        assert_eq!(res, Err(ImageError::InvalidImageSize(2, 2, 3, 2)));
        Ok(())
    }
}
