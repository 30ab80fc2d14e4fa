use gridview_storage::PixelFormat;

/// A pixel type a view can address.
///
/// `FORMATS` lists the storage formats whose in-memory layout of one pixel is
/// exactly `Self`. A view over an image of any other format is rejected by
/// [`BorrowedGridView::try_new`](crate::BorrowedGridView::try_new).
pub trait Pixel: Copy + Default + PartialEq + std::fmt::Debug + 'static {
    /// Number of channels of the pixel.
    const NUM_CHANNELS: usize;

    /// Storage formats with the same layout as this pixel.
    const FORMATS: &'static [PixelFormat];

    /// Returns true if an image stored as `format` can be viewed as `Self`.
    fn matches_format(format: PixelFormat) -> bool {
        Self::FORMATS.contains(&format)
    }
}

/// A single channel pixel that converts losslessly to `f64`.
pub trait ScalarPixel: Pixel + Into<f64> {}

/// 24-bit RGB pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(C)]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

/// 32-bit RGBA pixel with the bytes in `r, g, b, a` order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(C)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

/// 32-bit pixel with the bytes in `b, g, r, a` order.
///
/// This is how a native endian `0xAARRGGBB` word lands in memory on little
/// endian targets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(C)]
pub struct Bgra8 {
    /// Blue channel.
    pub b: u8,
    /// Green channel.
    pub g: u8,
    /// Red channel.
    pub r: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgb8 {
    /// Create a new RGB pixel.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Rgba8 {
    /// Create a new RGBA pixel.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl Bgra8 {
    /// Create a new BGRA pixel from channels in RGBA order.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { b, g, r, a }
    }
}

impl Pixel for u8 {
    const NUM_CHANNELS: usize = 1;
    const FORMATS: &'static [PixelFormat] = &[PixelFormat::Grayscale8];
}

impl Pixel for u16 {
    const NUM_CHANNELS: usize = 1;
    const FORMATS: &'static [PixelFormat] = &[PixelFormat::Grayscale16];
}

impl Pixel for f32 {
    const NUM_CHANNELS: usize = 1;
    const FORMATS: &'static [PixelFormat] = &[PixelFormat::GrayscaleF32];
}

/// Packed `0xAARRGGBB` words, independent of byte order.
impl Pixel for u32 {
    const NUM_CHANNELS: usize = 4;
    const FORMATS: &'static [PixelFormat] = &[PixelFormat::Rgb32, PixelFormat::Argb32];
}

impl Pixel for Rgb8 {
    const NUM_CHANNELS: usize = 3;
    const FORMATS: &'static [PixelFormat] = &[PixelFormat::Rgb888];
}

impl Pixel for Rgba8 {
    const NUM_CHANNELS: usize = 4;
    const FORMATS: &'static [PixelFormat] = &[PixelFormat::Rgba8888];
}

impl Pixel for Bgra8 {
    const NUM_CHANNELS: usize = 4;
    #[cfg(target_endian = "little")]
    const FORMATS: &'static [PixelFormat] = &[PixelFormat::Rgb32, PixelFormat::Argb32];
    #[cfg(target_endian = "big")]
    const FORMATS: &'static [PixelFormat] = &[];
}

impl ScalarPixel for u8 {}
impl ScalarPixel for u16 {}
impl ScalarPixel for f32 {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_sizes_match_formats() {
        fn check<P: Pixel>() {
            for format in P::FORMATS {
                assert_eq!(std::mem::size_of::<P>(), format.bytes_per_pixel());
                assert!(std::mem::align_of::<P>() <= format.alignment());
            }
        }
        check::<u8>();
        check::<u16>();
        check::<f32>();
        check::<u32>();
        check::<Rgb8>();
        check::<Rgba8>();
        check::<Bgra8>();
    }

    #[test]
    fn test_matches_format() {
        assert!(u8::matches_format(PixelFormat::Grayscale8));
        assert!(!u8::matches_format(PixelFormat::Grayscale16));
        assert!(Rgb8::matches_format(PixelFormat::Rgb888));
        assert!(u32::matches_format(PixelFormat::Argb32));
        assert!(!Rgba8::matches_format(PixelFormat::Argb32));
        assert!(!f32::matches_format(PixelFormat::Invalid));
    }

    #[cfg(target_endian = "little")]
    #[test]
    fn test_bgra_matches_argb_word() {
        let word: u32 = 0x80_10_20_30;
        let pixel: Bgra8 = unsafe { std::mem::transmute(word) };
        assert_eq!(pixel, Bgra8::new(0x10, 0x20, 0x30, 0x80));
    }
}
