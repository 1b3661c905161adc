//! Min-max scaling of decoded images to 8-bit display values.

use crate::image_pipeline::raw::types::ImageBuffer;

/// 8-bit grayscale image ready for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayPreview {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

/// Stretches the observed value range of `image` to `0..=255`.
///
/// Each pixel becomes `round(255 * (v - min) / (max - min))`, using the
/// image's own minimum and maximum rather than the full range of its pixel
/// type. A constant image maps to all zeros.
pub fn normalize_to_u8(image: &ImageBuffer) -> GrayPreview {
    let range = image
        .values()
        .fold(None, |acc: Option<(u16, u16)>, v| match acc {
            None => Some((v, v)),
            Some((min, max)) => Some((min.min(v), max.max(v))),
        });

    let data = match range {
        Some((min, max)) if max > min => {
            let span = (max - min) as f64;
            image
                .values()
                .map(|v| ((v - min) as f64 / span * 255.0).round() as u8)
                .collect()
        }
        _ => vec![0; image.pixels.len()],
    };

    GrayPreview {
        width: image.width,
        height: image.height,
        data,
    }
}
