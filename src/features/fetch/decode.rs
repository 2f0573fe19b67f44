//! Response body decoding
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use anyhow::{anyhow, Result};
use image::DynamicImage;

/// Turns encoded image bytes into a displayable image
pub trait ImageDecoder: Send + Sync {
    fn decode(&self, bytes: &[u8]) -> Result<DynamicImage>;
}

/// Decoder for the raster formats the `image` crate recognises (PNG, JPEG, GIF, ...)
#[derive(Debug, Clone, Copy, Default)]
pub struct RasterDecoder;

impl ImageDecoder for RasterDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<DynamicImage> {
        if bytes.is_empty() {
            return Err(anyhow!("response body is empty"));
        }
        Ok(image::load_from_memory(bytes)?)
    }
}

/// Strict UTF-8; a body with invalid sequences is a decode failure, not lossy text
pub fn decode_text(bytes: &[u8]) -> Result<String> {
    String::from_utf8(bytes.to_vec()).map_err(|e| anyhow!("response is not valid UTF-8: {e}"))
}

#[cfg(test)]
pub(crate) fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut buf = std::io::Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(image::RgbImage::new(width, height))
        .write_to(&mut buf, image::ImageFormat::Png)
        .unwrap();
    buf.into_inner()
}
