//! Self-describing RAW preamble.
//!
//! Some sensors prefix the pixel payload with five little-endian `u16` words:
//! `[width, height, pixel_type_flag, reserved, header_size]`. Nothing here is
//! validated; a bogus preamble shows up later as a reshape mismatch.

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::raw::types::PixelType;

/// Size of the preamble in bytes.
pub const PREAMBLE_LEN: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preamble {
    pub width: u16,
    pub height: u16,
    pub pixel_type_flag: u16,
    pub reserved: u16,
    pub header_size: u16,
}

impl Preamble {
    pub fn pixel_type(&self) -> PixelType {
        PixelType::from_flag(self.pixel_type_flag)
    }

    /// Encodes the preamble the way it appears on disk.
    pub fn to_bytes(&self) -> [u8; PREAMBLE_LEN] {
        let mut bytes = [0u8; PREAMBLE_LEN];
        let words = [
            self.width,
            self.height,
            self.pixel_type_flag,
            self.reserved,
            self.header_size,
        ];
        for (chunk, word) in bytes.chunks_exact_mut(2).zip(words) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        bytes
    }
}

/// Reads the preamble from the current position of `reader`.
pub fn read_preamble<R: Read>(mut reader: R) -> Result<Preamble> {
    let mut bytes = [0u8; PREAMBLE_LEN];
    reader.read_exact(&mut bytes).map_err(|e| match e.kind() {
        ErrorKind::UnexpectedEof => ConversionError::PreambleReadError(format!(
            "file is shorter than {} bytes",
            PREAMBLE_LEN
        )),
        _ => ConversionError::PreambleReadError(e.to_string()),
    })?;

    let word = |i: usize| u16::from_le_bytes([bytes[2 * i], bytes[2 * i + 1]]);
    let preamble = Preamble {
        width: word(0),
        height: word(1),
        pixel_type_flag: word(2),
        reserved: word(3),
        header_size: word(4),
    };

    debug!(
        width = preamble.width,
        height = preamble.height,
        flag = preamble.pixel_type_flag,
        header_size = preamble.header_size,
        "Read RAW preamble"
    );
    Ok(preamble)
}

/// Opens `path` and reads its preamble.
///
/// Standalone entry point for callers that only need a file's geometry.
/// [`FlatRawReader`](crate::image_pipeline::raw::FlatRawReader) reads the
/// preamble through the handle it already holds instead.
pub fn read_preamble_file<P: AsRef<Path>>(path: P) -> Result<Preamble> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        ConversionError::InputReadError(format!("{}: {}", path.display(), e))
    })?;
    read_preamble(file).map_err(|e| match e {
        ConversionError::PreambleReadError(msg) => {
            ConversionError::PreambleReadError(format!("{}: {}", path.display(), msg))
        }
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    #[test]
    fn test_read_preamble_words_in_order() {
        let bytes = [0xa0, 0x0b, 0xb0, 0x09, 16, 0, 7, 0, 0x00, 0x08, 0xff];
        let preamble = read_preamble(Cursor::new(bytes)).unwrap();

        assert_eq!(preamble.width, 2976);
        assert_eq!(preamble.height, 2480);
        assert_eq!(preamble.pixel_type_flag, 16);
        assert_eq!(preamble.reserved, 7);
        assert_eq!(preamble.header_size, 2048);
        assert_eq!(preamble.pixel_type(), PixelType::U16);
    }

    #[test]
    fn test_to_bytes_matches_reader() {
        let preamble = Preamble {
            width: 640,
            height: 480,
            pixel_type_flag: 8,
            reserved: 0,
            header_size: 10,
        };
        let decoded = read_preamble(Cursor::new(preamble.to_bytes())).unwrap();
        assert_eq!(decoded, preamble);
        assert_eq!(decoded.pixel_type(), PixelType::U8);
    }

    #[test]
    fn test_short_file_is_preamble_error() {
        let result = read_preamble(Cursor::new([1u8, 2, 3, 4, 5, 6, 7, 8, 9]));
        assert!(matches!(result, Err(ConversionError::PreambleReadError(_))));
    }

    #[test]
    fn test_read_preamble_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[4, 0, 2, 0, 8, 0, 0, 0, 10, 0]).unwrap();
        file.flush().unwrap();

        let preamble = read_preamble_file(file.path()).unwrap();
        assert_eq!((preamble.width, preamble.height), (4, 2));
        assert_eq!(preamble.header_size, 10);
    }

    #[test]
    fn test_missing_file_is_input_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_preamble_file(dir.path().join("missing.raw"));
        assert!(matches!(result, Err(ConversionError::InputReadError(_))));
    }
}
