// SPDX-License-Identifier: MPL-2.0
//! Decoded, downscaled archive images.

use crate::application::port::ArchiveSource;
use crate::domain::ui::PreviewSize;
use crate::error::FetchError;
use iced::widget::image;
use image_rs::GenericImageView;
use std::sync::Arc;

/// A decoded image ready for display.
#[derive(Debug, Clone)]
pub struct Preview {
    pub handle: image::Handle,
    pub width: u32,
    pub height: u32,
}

impl Preview {
    /// Creates a preview from RGBA pixels.
    #[must_use]
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            handle: image::Handle::from_rgba(width, height, pixels),
            width,
            height,
        }
    }

    /// Memory held by the pixel buffer (RGBA, 4 bytes per pixel).
    #[must_use]
    pub fn size_bytes(&self) -> usize {
        (self.width as usize) * (self.height as usize) * 4
    }
}

/// Decodes `bytes` and shrinks the result so its longest edge fits `max_edge`.
///
/// Smaller images keep their size. Aspect ratio is preserved.
///
/// # Errors
///
/// Returns [`FetchError::Decode`] if the format is unsupported or the data
/// is corrupt.
pub fn decode_preview(bytes: &[u8], max_edge: PreviewSize) -> Result<Preview, FetchError> {
    let decoded = image_rs::load_from_memory(bytes)?;
    let (width, height) = decoded.dimensions();
    let limit = max_edge.value();

    let fitted = if width.max(height) > limit {
        decoded.thumbnail(limit, limit)
    } else {
        decoded
    };

    let rgba = fitted.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(Preview::from_rgba(width, height, rgba.into_raw()))
}

/// Downloads and decodes the image at `url`.
///
/// Decoding runs on the blocking pool. The URL is handed back so the
/// result can be matched to its tile.
pub async fn load_preview(
    source: Arc<dyn ArchiveSource>,
    url: String,
    max_edge: PreviewSize,
) -> (String, Result<Preview, FetchError>) {
    let bytes = match source.fetch_image(&url).await {
        Ok(bytes) => bytes,
        Err(err) => return (url, Err(err)),
    };

    let result = tokio::task::spawn_blocking(move || decode_preview(&bytes, max_edge))
        .await
        .unwrap_or_else(|e| Err(FetchError::Decode(format!("Decode task failed: {e}"))));

    (url, result)
}
