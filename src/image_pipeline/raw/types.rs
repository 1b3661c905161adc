//! RAW image data types

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::raw::preamble::Preamble;

/// Preamble flag value announcing 16-bit pixels.
pub const PIXEL_TYPE_FLAG_U16: u16 = 16;

/// Storage type of a single pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelType {
    U8,
    U16,
}

impl PixelType {
    /// Maps a preamble flag to a pixel type. Only `16` selects 16-bit.
    pub fn from_flag(flag: u16) -> Self {
        if flag == PIXEL_TYPE_FLAG_U16 {
            PixelType::U16
        } else {
            PixelType::U8
        }
    }

    /// Maps a bit depth given on the command line.
    pub fn from_bit_depth(bits: u8) -> Option<Self> {
        match bits {
            8 => Some(PixelType::U8),
            16 => Some(PixelType::U16),
            _ => None,
        }
    }

    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelType::U8 => 1,
            PixelType::U16 => 2,
        }
    }

    pub fn bits_per_sample(self) -> u32 {
        self.bytes_per_pixel() as u32 * 8
    }
}

/// A single decoding parameter: either supplied by the caller or read from the
/// file preamble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Param<T> {
    Explicit(T),
    #[default]
    AutoDetect,
}

impl<T: Copy> Param<T> {
    pub fn is_auto(&self) -> bool {
        matches!(self, Param::AutoDetect)
    }

    fn or_detected(self, detected: Option<T>) -> Option<T> {
        match self {
            Param::Explicit(value) => Some(value),
            Param::AutoDetect => detected,
        }
    }
}

impl<T> From<Option<T>> for Param<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Param::AutoDetect, Param::Explicit)
    }
}

/// Where the header size is counted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum HeaderOrigin {
    /// Header size is an absolute offset, so it includes the preamble bytes.
    #[default]
    FileStart,
    /// Header size counts from the end of the 10-byte preamble.
    AfterPreamble,
}

/// Caller-supplied decoding parameters. Every `AutoDetect` field is filled
/// from the file preamble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawOverrides {
    pub width: Param<u16>,
    pub height: Param<u16>,
    pub pixel_type: Param<PixelType>,
    pub header_size: Param<u64>,
}

impl RawOverrides {
    /// All parameters read from the preamble.
    pub fn auto() -> Self {
        Self::default()
    }

    /// All parameters given, the preamble is never read.
    pub fn explicit(width: u16, height: u16, pixel_type: PixelType, header_size: u64) -> Self {
        Self {
            width: Param::Explicit(width),
            height: Param::Explicit(height),
            pixel_type: Param::Explicit(pixel_type),
            header_size: Param::Explicit(header_size),
        }
    }

    pub fn needs_preamble(&self) -> bool {
        self.width.is_auto()
            || self.height.is_auto()
            || self.pixel_type.is_auto()
            || self.header_size.is_auto()
    }

    /// Merges the overrides with a decoded preamble. Explicit values win.
    pub fn resolve(&self, preamble: Option<&Preamble>) -> Result<RawParameters> {
        let missing = |field: &str| {
            ConversionError::PreambleReadError(format!(
                "{field} set to auto-detect but no preamble was read"
            ))
        };

        Ok(RawParameters {
            width: self
                .width
                .or_detected(preamble.map(|p| p.width))
                .ok_or_else(|| missing("width"))?,
            height: self
                .height
                .or_detected(preamble.map(|p| p.height))
                .ok_or_else(|| missing("height"))?,
            pixel_type: self
                .pixel_type
                .or_detected(preamble.map(Preamble::pixel_type))
                .ok_or_else(|| missing("pixel type"))?,
            header_size: self
                .header_size
                .or_detected(preamble.map(|p| p.header_size as u64))
                .ok_or_else(|| missing("header size"))?,
        })
    }
}

/// Fully resolved parameters for decoding one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawParameters {
    pub width: u16,
    pub height: u16,
    pub pixel_type: PixelType,
    pub header_size: u64,
}

/// Pixel storage, one variant per supported bit depth
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PixelData {
    U8(Vec<u8>),
    U16(Vec<u16>),
}

impl PixelData {
    pub fn len(&self) -> usize {
        match self {
            PixelData::U8(values) => values.len(),
            PixelData::U16(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Represents a decoded single-channel RAW image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBuffer {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
    /// Row-major pixel data, `height` rows of `width` pixels
    pub pixels: PixelData,
}

impl ImageBuffer {
    /// Reinterprets a byte payload as a `height` x `width` grid.
    ///
    /// 16-bit samples are little-endian. A payload whose element count is not
    /// exactly `width * height` (a trailing partial sample counts as an extra
    /// element) is rejected with [`ConversionError::ReshapeMismatch`].
    pub fn from_payload(payload: &[u8], params: &RawParameters) -> Result<Self> {
        let width = params.width as usize;
        let height = params.height as usize;
        let expected = width * height;
        let actual = payload.len().div_ceil(params.pixel_type.bytes_per_pixel());

        if actual != expected {
            return Err(ConversionError::ReshapeMismatch {
                width,
                height,
                expected,
                actual,
            });
        }

        let pixels = match params.pixel_type {
            PixelType::U8 => PixelData::U8(payload.to_vec()),
            PixelType::U16 => PixelData::U16(
                payload
                    .chunks_exact(2)
                    .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
                    .collect(),
            ),
        };

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn pixel_type(&self) -> PixelType {
        match self.pixels {
            PixelData::U8(_) => PixelType::U8,
            PixelData::U16(_) => PixelType::U16,
        }
    }

    /// Pixel at `(row, col)` widened to 16 bits.
    pub fn get(&self, row: usize, col: usize) -> Option<u16> {
        if row >= self.height || col >= self.width {
            return None;
        }
        let index = row * self.width + col;
        match &self.pixels {
            PixelData::U8(values) => values.get(index).map(|&v| v as u16),
            PixelData::U16(values) => values.get(index).copied(),
        }
    }

    /// All pixels in row-major order, widened to 16 bits.
    pub fn values(&self) -> Box<dyn Iterator<Item = u16> + '_> {
        match &self.pixels {
            PixelData::U8(values) => Box::new(values.iter().map(|&v| v as u16)),
            PixelData::U16(values) => Box::new(values.iter().copied()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preamble() -> Preamble {
        Preamble {
            width: 4,
            height: 2,
            pixel_type_flag: 16,
            reserved: 0,
            header_size: 32,
        }
    }

    #[test]
    fn test_pixel_type_flag() {
        assert_eq!(PixelType::from_flag(16), PixelType::U16);
        assert_eq!(PixelType::from_flag(8), PixelType::U8);
        assert_eq!(PixelType::from_flag(12), PixelType::U8);
        assert_eq!(PixelType::from_bit_depth(12), None);
    }

    #[test]
    fn test_resolve_auto_uses_preamble() {
        let params = RawOverrides::auto().resolve(Some(&preamble())).unwrap();
        assert_eq!(params, RawParameters {
            width: 4,
            height: 2,
            pixel_type: PixelType::U16,
            header_size: 32,
        });
    }

    #[test]
    fn test_resolve_explicit_fields_win() {
        let overrides = RawOverrides {
            width: Param::Explicit(8),
            header_size: Param::Explicit(0),
            ..RawOverrides::auto()
        };
        assert!(overrides.needs_preamble());

        let params = overrides.resolve(Some(&preamble())).unwrap();
        assert_eq!(params.width, 8);
        assert_eq!(params.height, 2);
        assert_eq!(params.pixel_type, PixelType::U16);
        assert_eq!(params.header_size, 0);
    }

    #[test]
    fn test_resolve_auto_without_preamble_fails() {
        let result = RawOverrides::auto().resolve(None);
        assert!(matches!(result, Err(ConversionError::PreambleReadError(_))));

        let explicit = RawOverrides::explicit(1, 1, PixelType::U8, 0);
        assert!(!explicit.needs_preamble());
        assert!(explicit.resolve(None).is_ok());
    }

    #[test]
    fn test_from_payload_u16_little_endian() {
        let params = RawParameters {
            width: 2,
            height: 1,
            pixel_type: PixelType::U16,
            header_size: 0,
        };
        let image = ImageBuffer::from_payload(&[0x34, 0x12, 0xff, 0x00], &params).unwrap();
        assert_eq!(image.pixels, PixelData::U16(vec![0x1234, 0x00ff]));
        assert_eq!(image.get(0, 1), Some(0x00ff));
        assert_eq!(image.get(1, 0), None);
    }

    #[test]
    fn test_from_payload_is_row_major() {
        let params = RawParameters {
            width: 3,
            height: 2,
            pixel_type: PixelType::U8,
            header_size: 0,
        };
        let image = ImageBuffer::from_payload(&[0, 1, 2, 10, 11, 12], &params).unwrap();
        assert_eq!(image.get(0, 2), Some(2));
        assert_eq!(image.get(1, 0), Some(10));
        assert_eq!(image.values().collect::<Vec<_>>(), vec![0, 1, 2, 10, 11, 12]);
    }

    #[test]
    fn test_from_payload_mismatch() {
        let params = RawParameters {
            width: 3,
            height: 3,
            pixel_type: PixelType::U8,
            header_size: 0,
        };
        let result = ImageBuffer::from_payload(&[0u8; 8], &params);
        assert!(matches!(
            result,
            Err(ConversionError::ReshapeMismatch { expected: 9, actual: 8, .. })
        ));
    }

    #[test]
    fn test_from_payload_trailing_partial_sample_is_mismatch() {
        let params = RawParameters {
            width: 2,
            height: 1,
            pixel_type: PixelType::U16,
            header_size: 0,
        };
        let result = ImageBuffer::from_payload(&[1, 0, 2, 0, 3], &params);
        assert!(matches!(
            result,
            Err(ConversionError::ReshapeMismatch { expected: 2, actual: 3, .. })
        ));
    }
}
