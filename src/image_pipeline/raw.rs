//! RAW image reading module
//!
//! This module decodes flat RAW files whose geometry is either given by the
//! caller or described by a short preamble at the start of the file.

mod reader;
mod flat_reader;
pub mod preamble;
pub mod types;

pub use reader::RawImageReader;
pub use flat_reader::FlatRawReader;
pub use preamble::{Preamble, PREAMBLE_LEN, read_preamble, read_preamble_file};
pub use types::{
    HeaderOrigin, ImageBuffer, Param, PixelData, PixelType, RawOverrides, RawParameters,
};
