//! Command-line interface.
//!
//! Every decoding parameter left unset is read from the file preamble.

use std::path::PathBuf;

use clap::Parser;

use crate::image_pipeline::{
    BatchOptions, ConversionConfig, HeaderOrigin, Language, OutputMode, PixelType, RawOverrides,
    TiffCompression, conversions::RAW_EXTENSION,
};

/// Convert flat RAW sensor images to TIFF, or preview them on screen.
#[derive(Parser, Debug, Clone)]
#[command(name = "raw_tiff_rs")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// RAW file, or a folder whose .raw files are all processed.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Image width in pixels.
    #[arg(long)]
    pub width: Option<u16>,

    /// Image height in pixels.
    #[arg(long)]
    pub height: Option<u16>,

    /// Bits per pixel, 8 or 16.
    #[arg(long, value_name = "BITS", value_parser = parse_bit_depth)]
    pub bit_depth: Option<PixelType>,

    /// Bytes to skip before the pixel data.
    #[arg(long, value_name = "BYTES")]
    pub header_size: Option<u64>,

    /// Whether the header size counts from the start of the file or after the 10-byte preamble.
    #[arg(long, value_enum, default_value_t = HeaderOrigin::FileStart)]
    pub header_origin: HeaderOrigin,

    /// Show each image in a window instead of writing a TIFF.
    #[arg(long, conflicts_with = "output")]
    pub preview: bool,

    /// Output TIFF file, or an existing folder for the TIFFs. Defaults to next to each input.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// TIFF compression.
    #[arg(long, value_enum, default_value_t = TiffCompression::None)]
    pub compression: TiffCompression,

    /// TIFF predictor (2 = horizontal differencing).
    #[arg(long)]
    pub predictor: Option<u16>,

    /// Extension of the files picked up from a folder, matched case-insensitively.
    #[arg(long, value_name = "EXT", default_value = RAW_EXTENSION)]
    pub extension: String,

    /// Language of the console messages.
    #[arg(long, value_enum, default_value_t = Language::English)]
    pub lang: Language,

    /// Enable debug logging.
    #[arg(short, long)]
    pub verbose: bool,
}

fn parse_bit_depth(value: &str) -> Result<PixelType, String> {
    let bits: u8 = value
        .parse()
        .map_err(|_| format!("`{value}` is not a number"))?;
    PixelType::from_bit_depth(bits)
        .ok_or_else(|| format!("unsupported bit depth {bits}, expected 8 or 16"))
}

impl Cli {
    pub fn overrides(&self) -> RawOverrides {
        RawOverrides {
            width: self.width.into(),
            height: self.height.into(),
            pixel_type: self.bit_depth.into(),
            header_size: self.header_size.into(),
        }
    }

    pub fn batch_options(&self) -> BatchOptions {
        BatchOptions {
            overrides: self.overrides(),
            mode: if self.preview {
                OutputMode::Preview
            } else {
                OutputMode::Save
            },
            target: self.output.clone(),
            raw_extension: self.extension.clone(),
        }
    }

    pub fn conversion_config(&self) -> ConversionConfig {
        ConversionConfig::builder()
            .compression(self.compression)
            .predictor(self.predictor)
            .header_origin(self.header_origin)
            .build()
    }
}
