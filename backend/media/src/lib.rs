use bytes::Bytes;

pub mod intake;
pub mod mime_detect;

pub use intake::{load_image, to_png};
pub use mime_detect::{detect_mime_type, is_image, supported_extensions};

/// One submitted image as read from disk.
#[derive(Debug, Clone)]
pub struct MediaPayload {
    pub source: String,
    pub mime_type: String,
    pub data: Bytes,
}
