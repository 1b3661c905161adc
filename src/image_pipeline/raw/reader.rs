use std::path::Path;

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::raw::types::{ImageBuffer, RawOverrides};

pub trait RawImageReader {
    fn read_raw(&self, input: &Path, overrides: &RawOverrides) -> Result<ImageBuffer>;
}
