/// Pixel storage format of an image buffer.
///
/// Mirrors the formats a GUI toolkit image typically reports. The format only
/// describes the memory layout of one pixel; no conversion between formats is
/// ever performed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// No pixel data, the format of a null image.
    #[default]
    Invalid,
    /// 8-bit grayscale.
    Grayscale8,
    /// 16-bit grayscale, native endian.
    Grayscale16,
    /// 32-bit float grayscale, native endian.
    GrayscaleF32,
    /// 24-bit RGB stored as `r, g, b` bytes.
    Rgb888,
    /// 32-bit `0xffRRGGBB` stored as a native endian `u32`.
    Rgb32,
    /// 32-bit `0xAARRGGBB` stored as a native endian `u32`.
    Argb32,
    /// 32-bit RGBA stored as `r, g, b, a` bytes.
    Rgba8888,
}

impl PixelFormat {
    /// Number of bytes one pixel occupies.
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Invalid => 0,
            Self::Grayscale8 => 1,
            Self::Grayscale16 => 2,
            Self::Rgb888 => 3,
            Self::GrayscaleF32 | Self::Rgb32 | Self::Argb32 | Self::Rgba8888 => 4,
        }
    }

    /// Alignment in bytes the start of every row must honor.
    pub const fn alignment(self) -> usize {
        match self {
            Self::Invalid | Self::Grayscale8 | Self::Rgb888 | Self::Rgba8888 => 1,
            Self::Grayscale16 => 2,
            Self::GrayscaleF32 | Self::Rgb32 | Self::Argb32 => 4,
        }
    }

    /// Number of channels of one pixel.
    pub const fn num_channels(self) -> usize {
        match self {
            Self::Invalid => 0,
            Self::Grayscale8 | Self::Grayscale16 | Self::GrayscaleF32 => 1,
            Self::Rgb888 | Self::Rgb32 => 3,
            Self::Argb32 | Self::Rgba8888 => 4,
        }
    }

    /// Whether the format carries an alpha channel.
    pub const fn has_alpha(self) -> bool {
        matches!(self, Self::Argb32 | Self::Rgba8888)
    }
}

impl std::fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Invalid => "Invalid",
            Self::Grayscale8 => "Grayscale8",
            Self::Grayscale16 => "Grayscale16",
            Self::GrayscaleF32 => "GrayscaleF32",
            Self::Rgb888 => "RGB888",
            Self::Rgb32 => "RGB32",
            Self::Argb32 => "ARGB32",
            Self::Rgba8888 => "RGBA8888",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::PixelFormat;

    #[test]
    fn test_bytes_per_pixel() {
        assert_eq!(PixelFormat::Invalid.bytes_per_pixel(), 0);
        assert_eq!(PixelFormat::Grayscale8.bytes_per_pixel(), 1);
        assert_eq!(PixelFormat::Grayscale16.bytes_per_pixel(), 2);
        assert_eq!(PixelFormat::Rgb888.bytes_per_pixel(), 3);
        assert_eq!(PixelFormat::Argb32.bytes_per_pixel(), 4);
    }

    #[test]
    fn test_alignment_divides_pixel_size() {
        for format in [
            PixelFormat::Grayscale8,
            PixelFormat::Grayscale16,
            PixelFormat::GrayscaleF32,
            PixelFormat::Rgb888,
            PixelFormat::Rgb32,
            PixelFormat::Argb32,
            PixelFormat::Rgba8888,
        ] {
            assert_eq!(format.bytes_per_pixel() % format.alignment(), 0);
        }
    }

    #[test]
    fn test_default_is_invalid() {
        assert_eq!(PixelFormat::default(), PixelFormat::Invalid);
        assert!(!PixelFormat::default().has_alpha());
    }
}
