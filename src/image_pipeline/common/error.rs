use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Failed to read RAW preamble: {0}")]
    PreambleReadError(String),

    #[error(
        "Cannot reshape {actual} pixels into {height}x{width} (expected {expected}). \
         Check the provided dimensions and header size"
    )]
    ReshapeMismatch {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Failed to encode TIFF image: {0}")]
    EncodeError(String),

    #[error("Failed to display preview: {0}")]
    DisplayError(String),

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("Path is neither a folder nor a file: {0}")]
    InvalidPath(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConversionError>;
