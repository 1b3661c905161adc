//! Image processing pipeline module
//!
//! This module provides a structured approach to RAW to TIFF conversion,
//! with separate modules for RAW reading, TIFF writing, previewing and
//! conversion orchestration.

pub mod raw;
pub mod tiff;
pub mod preview;
pub mod conversions;
pub mod common;

pub use common::{
    ConversionError,
    Language,
    Result,
};

pub use raw::{
    FlatRawReader,
    HeaderOrigin,
    ImageBuffer,
    Param,
    PixelData,
    PixelType,
    RawImageReader,
    RawOverrides,
    RawParameters,
};

pub use self::tiff::{
    TiffCompression,
    ConversionConfig,
    ConversionConfigBuilder,
    TiffWriter,
    StandardTiffWriter,
};

pub use preview::{
    GrayPreview,
    PreviewSink,
    WindowPreview,
};

pub use conversions::{
    BatchOptions,
    BatchReport,
    OutputMode,
    PathTarget,
    PathWalker,
    RawToTiffPipeline,
    run,
};
