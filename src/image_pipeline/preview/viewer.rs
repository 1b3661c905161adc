use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::preview::normalize::GrayPreview;

/// Title of every preview window.
pub const PREVIEW_TITLE: &str = "Scaled RAW Image";

pub trait PreviewSink {
    /// Shows `preview` and returns once the user dismisses it.
    fn show(&self, title: &str, preview: &GrayPreview) -> Result<()>;
}

/// Blocking preview window backed by minifb.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowPreview;

#[cfg(feature = "preview")]
impl PreviewSink for WindowPreview {
    fn show(&self, title: &str, preview: &GrayPreview) -> Result<()> {
        use crate::image_pipeline::common::error::ConversionError;
        use minifb::{Key, ScaleMode, Window, WindowOptions};
        use tracing::debug;

        let framebuf: Vec<u32> = preview.data.iter().map(|&v| gray_pixel(v)).collect();

        let mut window = Window::new(
            title,
            preview.width,
            preview.height,
            WindowOptions {
                resize: true,
                scale_mode: ScaleMode::AspectRatioStretch,
                ..WindowOptions::default()
            },
        )
        .map_err(|e| ConversionError::DisplayError(e.to_string()))?;

        window.set_target_fps(30);
        debug!("Preview window open: {}x{}", preview.width, preview.height);

        while window.is_open() && !window.is_key_down(Key::Escape) {
            window
                .update_with_buffer(&framebuf, preview.width, preview.height)
                .map_err(|e| ConversionError::DisplayError(e.to_string()))?;
        }

        Ok(())
    }
}

#[cfg(not(feature = "preview"))]
impl PreviewSink for WindowPreview {
    fn show(&self, _title: &str, _preview: &GrayPreview) -> Result<()> {
        Err(crate::image_pipeline::common::error::ConversionError::DisplayError(
            "built without the `preview` feature".to_string(),
        ))
    }
}

/// Packs an 8-bit gray level into minifb's `0RGB` pixel format.
pub fn gray_pixel(value: u8) -> u32 {
    let v = value as u32;
    (v << 16) | (v << 8) | v
}
