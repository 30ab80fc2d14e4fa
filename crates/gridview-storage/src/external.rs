use crate::format::PixelFormat;

/// A handle to an image whose pixel memory is owned elsewhere.
///
/// This is the only thing a view needs from the image that owns the pixels: a
/// base pointer, a row stride, the dimensions and the pixel format. Cloning
/// the handle must be a shallow copy: the clone refers to the same pixels and
/// keeps them alive.
///
/// # Safety
///
/// Implementors must guarantee that:
/// - when `width() * height() > 0`, `bits()` is non-null and valid for reads
///   and writes of `height() * bytes_per_line()` bytes for as long as the
///   handle or any of its clones is alive;
/// - `bytes_per_line() >= width() * format().bytes_per_pixel()`;
/// - `bits()` and `bytes_per_line()` are multiples of `format().alignment()`;
/// - all five accessors are O(1) and return the same values between two
///   mutations of the handle itself.
pub unsafe trait ExternalImage: Clone {
    /// Pointer to the first byte of the first row.
    fn bits(&self) -> *mut u8;

    /// Byte distance between the starts of two consecutive rows.
    fn bytes_per_line(&self) -> usize;

    /// Width of the image in pixels.
    fn width(&self) -> usize;

    /// Height of the image in pixels.
    fn height(&self) -> usize;

    /// The storage format of one pixel.
    fn format(&self) -> PixelFormat;

    /// Whether the handle refers to no pixels at all.
    fn is_null(&self) -> bool {
        self.bits().is_null()
    }
}
