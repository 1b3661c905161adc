use std::io::{Cursor, Write};
use tiff::encoder::colortype::{ColorType, Gray8, Gray16};
use tiff::encoder::compression::DeflateLevel;
use tiff::encoder::{Compression, TiffEncoder, TiffValue};
use tiff::tags::Predictor;
use tracing::debug;
use crate::image_pipeline::common::error::{Result, ConversionError};
use crate::image_pipeline::raw::types::{ImageBuffer, PixelData};
use crate::image_pipeline::tiff::types::{ConversionConfig, TiffCompression};
use crate::image_pipeline::tiff::writer::TiffWriter;

/// Writes single-channel grayscale TIFFs whose bit depth follows the pixel type.
pub struct StandardTiffWriter;

impl StandardTiffWriter {
    fn encode<C: ColorType>(
        image: &ImageBuffer,
        data: &[C::Inner],
        config: &ConversionConfig,
    ) -> Result<Vec<u8>>
    where
        [C::Inner]: TiffValue,
    {
        let mut buffer = Vec::new();

        let compression = match config.compression {
            TiffCompression::None => Compression::Uncompressed,
            TiffCompression::Lzw => Compression::Lzw,
            TiffCompression::DeflateFast => Compression::Deflate(DeflateLevel::Fast),
            TiffCompression::DeflateBalanced => Compression::Deflate(DeflateLevel::Balanced),
            TiffCompression::DeflateBest => Compression::Deflate(DeflateLevel::Best),
        };

        let mut encoder = TiffEncoder::new(Cursor::new(&mut buffer))
            .map_err(|e| ConversionError::EncodeError(e.to_string()))?
            .with_compression(compression);

        if let Some(predictor_val) = config.predictor {
            let predictor = match predictor_val {
                2 => Predictor::Horizontal,
                _ => Predictor::None,
            };
            encoder = encoder.with_predictor(predictor);
        }

        encoder
            .write_image::<C>(image.width as u32, image.height as u32, data)
            .map_err(|e| ConversionError::EncodeError(e.to_string()))?;

        Ok(buffer)
    }
}

impl TiffWriter for StandardTiffWriter {
    fn write_tiff(
        &self,
        image: &ImageBuffer,
        output: &mut dyn Write,
        config: &ConversionConfig,
    ) -> Result<()> {
        debug!(
            "Encoding TIFF image: {}x{}, {} bits",
            image.width,
            image.height,
            image.pixel_type().bits_per_sample()
        );

        let buffer = match &image.pixels {
            PixelData::U8(data) => Self::encode::<Gray8>(image, data, config)?,
            PixelData::U16(data) => Self::encode::<Gray16>(image, data, config)?,
        };

        output.write_all(&buffer).map_err(|e| ConversionError::OutputWriteError(e.to_string()))?;

        debug!("TIFF encoding complete, {} bytes", buffer.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_pipeline::raw::types::{PixelType, RawParameters};
    use tiff::decoder::{Decoder, DecodingResult};

    fn decode(bytes: Vec<u8>) -> (u32, u32, DecodingResult) {
        let mut decoder = Decoder::new(Cursor::new(bytes)).unwrap();
        let (width, height) = decoder.dimensions().unwrap();
        (width, height, decoder.read_image().unwrap())
    }

    fn sample_u16() -> ImageBuffer {
        ImageBuffer {
            width: 3,
            height: 2,
            pixels: PixelData::U16(vec![0, 1, 512, 4095, 40000, 65535]),
        }
    }

    #[test]
    fn test_u8_round_trip() {
        let params = RawParameters {
            width: 4,
            height: 2,
            pixel_type: PixelType::U8,
            header_size: 0,
        };
        let payload = [0, 10, 20, 30, 200, 210, 220, 255];
        let image = ImageBuffer::from_payload(&payload, &params).unwrap();

        let mut out = Vec::new();
        StandardTiffWriter
            .write_tiff(&image, &mut out, &ConversionConfig::default())
            .unwrap();

        let (width, height, result) = decode(out);
        assert_eq!((width, height), (4, 2));
        match result {
            DecodingResult::U8(data) => assert_eq!(data, vec![0, 10, 20, 30, 200, 210, 220, 255]),
            _ => panic!("expected 8-bit data"),
        }
    }

    #[test]
    fn test_u16_round_trip_with_compression() {
        let compressions = [
            TiffCompression::None,
            TiffCompression::Lzw,
            TiffCompression::DeflateBest,
        ];
        for compression in compressions {
            let config = ConversionConfig::builder().compression(compression).build();
            let mut out = Vec::new();
            StandardTiffWriter.write_tiff(&sample_u16(), &mut out, &config).unwrap();

            let (width, height, result) = decode(out);
            assert_eq!((width, height), (3, 2));
            match result {
                DecodingResult::U16(data) => assert_eq!(data, vec![0, 1, 512, 4095, 40000, 65535]),
                _ => panic!("expected 16-bit data for {:?}", compression),
            }
        }
    }

    #[test]
    fn test_horizontal_predictor_round_trip() {
        let config = ConversionConfig::builder()
            .compression(TiffCompression::Lzw)
            .predictor(Some(2))
            .build();
        let mut out = Vec::new();
        StandardTiffWriter.write_tiff(&sample_u16(), &mut out, &config).unwrap();

        let (_, _, result) = decode(out);
        assert!(matches!(result, DecodingResult::U16(ref data) if data[5] == 65535));
    }
}
