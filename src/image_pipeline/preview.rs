//! Interactive preview module
//!
//! Decoded images are min-max scaled to 8 bits and shown in a window.

mod normalize;
mod viewer;

pub use normalize::{GrayPreview, normalize_to_u8};
pub use viewer::{PREVIEW_TITLE, PreviewSink, WindowPreview, gray_pixel};
