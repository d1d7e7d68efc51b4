//! MIME type detection for submitted images.

use std::path::Path;

/// Accepted image extensions and their MIME types.
const IMAGE_TYPES: [(&str, &str); 6] = [
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("bmp", "image/bmp"),
];

/// Accepted extensions as shown to users, e.g. "jpg, jpeg, png, ...".
pub fn supported_extensions() -> String {
    IMAGE_TYPES.map(|(ext, _)| ext).join(", ")
}

/// Detect MIME type by file extension.
pub fn detect_mime_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    IMAGE_TYPES
        .iter()
        .find(|(known, _)| *known == ext)
        .map_or("application/octet-stream", |&(_, mime)| mime)
}

/// Whether a MIME type is for an image.
pub fn is_image(mime: &str) -> bool {
    mime.starts_with("image/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_common_photo_types() {
        assert_eq!(detect_mime_type(Path::new("apple.JPG")), "image/jpeg");
        assert_eq!(detect_mime_type(Path::new("a/b/kale.jpeg")), "image/jpeg");
        assert_eq!(detect_mime_type(Path::new("pear.png")), "image/png");
    }

    #[test]
    fn every_listed_extension_is_an_image() {
        let listed = supported_extensions();
        assert_eq!(listed, "jpg, jpeg, png, gif, webp, bmp");
        for ext in listed.split(", ") {
            let path = format!("produce.{ext}");
            assert!(is_image(detect_mime_type(Path::new(&path))), "{ext}");
        }
    }

    #[test]
    fn unknown_extension_is_not_an_image() {
        let mime = detect_mime_type(Path::new("notes.txt"));
        assert!(!is_image(mime));
        assert!(!is_image(detect_mime_type(Path::new("no_extension"))));
    }
}
