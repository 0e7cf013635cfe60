//! Image files picked for upload
//!
//! Stands in for the device picker: reads the file, guesses its MIME type
//! and pulls GPS coordinates out of EXIF for the "use current location"
//! action.

mod exif;

pub use self::exif::dms_to_decimal;

use crate::error::{GeoError, Result};
use geogenie_common::Coordinates;
use image::ImageFormat;
use std::path::{Path, PathBuf};

pub const DEFAULT_MIME: &str = "image/jpeg";
const DEFAULT_FILE_NAME: &str = "photo.jpg";

/// An image read into memory, ready to become a multipart part.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub path: PathBuf,
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(path: impl Into<PathBuf>, bytes: Vec<u8>) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| DEFAULT_FILE_NAME.to_string());
        let mime = guess_mime(&path, &bytes).to_string();
        Self { path, file_name, mime, bytes }
    }

    /// Reference string handed between screens.
    pub fn uri(&self) -> String {
        self.path.display().to_string()
    }
}

/// Read an image from disk.
pub async fn load_image(path: &Path) -> Result<ImageUpload> {
    if !path.is_file() {
        return Err(GeoError::FileNotFound(path.display().to_string()));
    }

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| GeoError::ImageLoad(format!("{}: {}", path.display(), e)))?;
    if bytes.is_empty() {
        return Err(GeoError::ImageLoad(format!("{} is empty", path.display())));
    }

    let upload = ImageUpload::new(path, bytes);
    tracing::debug!(file = %upload.file_name, mime = %upload.mime, size = upload.bytes.len(), "loaded image");
    Ok(upload)
}

/// Best-effort MIME type: magic bytes, then extension, then JPEG.
pub fn guess_mime(path: &Path, bytes: &[u8]) -> &'static str {
    image::guess_format(bytes)
        .or_else(|_| ImageFormat::from_path(path))
        .map(|format| format.to_mime_type())
        .unwrap_or(DEFAULT_MIME)
}

/// Coordinates embedded in the photo, if the camera recorded them.
pub fn location_from_photo(path: &Path) -> Result<Coordinates> {
    exif::extract_gps(path)
        .map(|(lat, lng)| Coordinates::new(lat, lng))
        .map_err(|e| GeoError::LocationUnavailable(format!("{}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];

    #[test]
    fn test_guess_mime_from_magic_bytes() {
        assert_eq!(guess_mime(Path::new("mislabelled.jpg"), PNG_MAGIC), "image/png");
    }

    #[test]
    fn test_guess_mime_from_extension() {
        assert_eq!(guess_mime(Path::new("shot.png"), b"garbage"), "image/png");
        assert_eq!(guess_mime(Path::new("shot.webp"), b"garbage"), "image/webp");
    }

    #[test]
    fn test_guess_mime_default_jpeg() {
        assert_eq!(guess_mime(Path::new("shot"), b"garbage"), "image/jpeg");
        assert_eq!(guess_mime(Path::new("notes.txt"), b"hello"), "image/jpeg");
    }

    #[test]
    fn test_upload_file_name() {
        let upload = ImageUpload::new("/tmp/pics/charminar.png", PNG_MAGIC.to_vec());
        assert_eq!(upload.file_name, "charminar.png");
        assert_eq!(upload.mime, "image/png");

        let upload = ImageUpload::new("/", vec![1, 2, 3]);
        assert_eq!(upload.file_name, "photo.jpg");
    }

    #[tokio::test]
    async fn test_load_image_missing() {
        let result = load_image(Path::new("/nonexistent/photo.jpg")).await;
        assert!(matches!(result, Err(GeoError::FileNotFound(_))));
    }

    #[tokio::test]
    async fn test_load_image_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.jpg");
        std::fs::write(&path, b"").unwrap();
        assert!(matches!(load_image(&path).await, Err(GeoError::ImageLoad(_))));
    }

    #[test]
    fn test_location_without_gps() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nogps.jpg");
        std::fs::write(&path, b"\xFF\xD8\xFF\xD9").unwrap();
        assert!(matches!(
            location_from_photo(&path),
            Err(GeoError::LocationUnavailable(_))
        ));
    }
}
