use std::io::Cursor;
use std::path::Path;

use bytes::Bytes;
use freshlens_core::FreshError;
use image::ImageFormat;
use tracing::debug;

use crate::MediaPayload;
use crate::mime_detect::{detect_mime_type, is_image, supported_extensions};

/// Read an image file from disk into a payload, checking its extension.
pub async fn load_image(path: &Path) -> Result<MediaPayload, FreshError> {
    let mime_type = detect_mime_type(path);
    if !is_image(mime_type) {
        return Err(FreshError::Image(format!(
            "{} is not a supported image ({})",
            path.display(),
            supported_extensions()
        )));
    }

    let data = tokio::fs::read(path)
        .await
        .map_err(|e| FreshError::Image(format!("failed to read {}: {e}", path.display())))?;

    Ok(MediaPayload {
        source: path.display().to_string(),
        mime_type: mime_type.to_string(),
        data: Bytes::from(data),
    })
}

/// Decode any supported image and re-encode it as PNG.
///
/// The model always receives `image/png`, whatever the user submitted.
pub fn to_png(payload: &MediaPayload) -> Result<Vec<u8>, FreshError> {
    let decoded = image::load_from_memory(&payload.data)
        .map_err(|e| FreshError::Image(format!("failed to decode {}: {e}", payload.source)))?;

    let mut png = Vec::new();
    decoded
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| FreshError::Image(format!("failed to encode {} as PNG: {e}", payload.source)))?;

    debug!(
        source = %payload.source,
        width = decoded.width(),
        height = decoded.height(),
        png_bytes = png.len(),
        "Normalised image to PNG"
    );
    Ok(png)
}
