//! Reader for flat, uncompressed RAW files.
//!
//! The file layout is an optional 10-byte preamble, `header_size` bytes of
//! header, then a row-major pixel payload. Parameters missing from the
//! caller's overrides are taken from the preamble.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::raw::preamble::{PREAMBLE_LEN, read_preamble};
use crate::image_pipeline::raw::reader::RawImageReader;
use crate::image_pipeline::raw::types::{HeaderOrigin, ImageBuffer, RawOverrides, RawParameters};

/// RAW reader that seeks past the header and reshapes the remaining bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatRawReader {
    header_origin: HeaderOrigin,
}

impl FlatRawReader {
    pub fn new(header_origin: HeaderOrigin) -> Self {
        Self { header_origin }
    }

    /// Byte offset of the first pixel.
    pub fn payload_offset(&self, params: &RawParameters) -> Result<u64> {
        match self.header_origin {
            HeaderOrigin::FileStart => Ok(params.header_size),
            HeaderOrigin::AfterPreamble => (PREAMBLE_LEN as u64)
                .checked_add(params.header_size)
                .ok_or_else(|| {
                    ConversionError::InputReadError(format!(
                        "header offset overflows: {} + {}",
                        PREAMBLE_LEN, params.header_size
                    ))
                }),
        }
    }

    /// Resolves the decoding parameters for `input`, reading the preamble only
    /// when at least one override is left on auto-detect.
    fn resolve_parameters(
        &self,
        file: &mut File,
        overrides: &RawOverrides,
    ) -> Result<RawParameters> {
        if !overrides.needs_preamble() {
            return overrides.resolve(None);
        }
        let preamble = read_preamble(&mut *file)?;
        overrides.resolve(Some(&preamble))
    }
}

impl RawImageReader for FlatRawReader {
    fn read_raw(&self, input: &Path, overrides: &RawOverrides) -> Result<ImageBuffer> {
        let mut file = File::open(input).map_err(|e| {
            ConversionError::InputReadError(format!("{}: {}", input.display(), e))
        })?;

        let params = self.resolve_parameters(&mut file, overrides).map_err(|e| match e {
            ConversionError::PreambleReadError(msg) => {
                ConversionError::PreambleReadError(format!("{}: {}", input.display(), msg))
            }
            other => other,
        })?;

        let offset = self.payload_offset(&params)?;
        debug!(
            width = params.width,
            height = params.height,
            pixel_type = ?params.pixel_type,
            offset,
            "Decoding RAW payload"
        );

        file.seek(SeekFrom::Start(offset)).map_err(|e| {
            ConversionError::InputReadError(format!(
                "{}: seek to {}: {}",
                input.display(),
                offset,
                e
            ))
        })?;
        let mut payload = Vec::new();
        file.read_to_end(&mut payload).map_err(|e| {
            ConversionError::InputReadError(format!("{}: {}", input.display(), e))
        })?;

        debug!("Read {} payload bytes", payload.len());
        ImageBuffer::from_payload(&payload, &params)
    }
}
