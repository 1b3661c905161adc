use tracing::{info, instrument};
use std::io::Write;
use std::path::Path;

use crate::image_pipeline::{
    common::error::{ConversionError, Result},
    preview::{PREVIEW_TITLE, PreviewSink, normalize_to_u8},
    raw::{FlatRawReader, ImageBuffer, RawImageReader, RawOverrides},
    tiff::{TiffWriter, StandardTiffWriter, ConversionConfig},
};

pub struct RawToTiffPipeline<R: RawImageReader, W: TiffWriter> {
    reader: R,
    writer: W,
    config: ConversionConfig,
}

impl RawToTiffPipeline<FlatRawReader, StandardTiffWriter> {
    pub fn new(config: ConversionConfig) -> Self {
        Self {
            reader: FlatRawReader::new(config.header_origin),
            writer: StandardTiffWriter,
            config,
        }
    }
}

impl<R: RawImageReader, W: TiffWriter> RawToTiffPipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, config: ConversionConfig) -> Self {
        Self {
            reader,
            writer,
            config,
        }
    }

    fn validate_dimensions(&self, width: usize, height: usize) -> Result<()> {
        if !self.config.validate_dimensions {
            return Ok(());
        }

        if width == 0 || height == 0 {
            return Err(ConversionError::InvalidDimensions(width, height));
        }

        Ok(())
    }

    /// Reads and reshapes one RAW file.
    #[instrument(skip(self, input, overrides), fields(input = %input.display()))]
    pub fn decode_file(&self, input: &Path, overrides: &RawOverrides) -> Result<ImageBuffer> {
        let raw_image = {
            let _span = tracing::info_span!("decode_raw").entered();
            self.reader.read_raw(input, overrides)?
        };

        {
            let _span = tracing::info_span!("validate_dimensions",
                width = raw_image.width,
                height = raw_image.height
            ).entered();
            self.validate_dimensions(raw_image.width, raw_image.height)?;
        }

        Ok(raw_image)
    }

    /// Encodes an already decoded image as TIFF into `output`.
    pub fn convert(&self, image: &ImageBuffer, output: &mut dyn Write) -> Result<()> {
        let _span = tracing::info_span!("encode_tiff").entered();
        self.writer.write_tiff(image, output, &self.config)
    }

    /// Decodes `input_path` and writes it as a TIFF to `output_path`.
    ///
    /// The output file is only created once decoding has succeeded, so a
    /// malformed RAW file never leaves an empty TIFF behind.
    #[instrument(skip(self, input_path, overrides, output_path))]
    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        overrides: &RawOverrides,
        output_path: Q,
    ) -> Result<()> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            "Converting file"
        );

        let raw_image = self.decode_file(input_path, overrides)?;

        let mut output_file = {
            let _span = tracing::info_span!("create_output_file").entered();
            std::fs::File::create(output_path).map_err(|e| {
                ConversionError::OutputWriteError(format!("{}: {}", output_path.display(), e))
            })?
        };

        self.convert(&raw_image, &mut output_file)?;

        info!(
            width = raw_image.width,
            height = raw_image.height,
            "Conversion complete"
        );
        Ok(())
    }

    /// Decodes `input_path` and shows it, min-max scaled, in `sink`.
    #[instrument(skip(self, input_path, overrides, sink))]
    pub fn preview_file<P: AsRef<Path>>(
        &self,
        input_path: P,
        overrides: &RawOverrides,
        sink: &dyn PreviewSink,
    ) -> Result<()> {
        let input_path = input_path.as_ref();
        info!(input = %input_path.display(), "Previewing file");

        let raw_image = self.decode_file(input_path, overrides)?;

        let _span = tracing::info_span!("render_preview").entered();
        let preview = normalize_to_u8(&raw_image);
        sink.show(PREVIEW_TITLE, &preview)
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }
}
