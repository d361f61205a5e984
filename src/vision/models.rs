// Vision models and types
// Author: kelexine (https://github.com/kelexine)

use crate::error::{Result, ScannerError};

/// Supported image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
    WebP,
    Gif,
    Heic,
    Heif,
}

impl ImageFormat {
    /// Get MIME type for this format
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
            ImageFormat::WebP => "image/webp",
            ImageFormat::Gif => "image/gif",
            ImageFormat::Heic => "image/heic",
            ImageFormat::Heif => "image/heif",
        }
    }

    /// Try to detect format from MIME type. Parameters such as `; charset=`
    /// are ignored.
    pub fn from_mime_type(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or_default().trim();
        match essence.to_lowercase().as_str() {
            "image/jpeg" | "image/jpg" | "image/pjpeg" => Some(ImageFormat::Jpeg),
            "image/png" => Some(ImageFormat::Png),
            "image/webp" => Some(ImageFormat::WebP),
            "image/gif" => Some(ImageFormat::Gif),
            "image/heic" => Some(ImageFormat::Heic),
            "image/heif" => Some(ImageFormat::Heif),
            _ => None,
        }
    }

    /// Detect format from magic bytes at start of image data
    pub fn sniff(data: &[u8]) -> Option<Self> {
        if data.starts_with(b"\xFF\xD8\xFF") {
            return Some(ImageFormat::Jpeg);
        }
        if data.starts_with(b"\x89PNG\r\n\x1a\n") {
            return Some(ImageFormat::Png);
        }
        if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
            return Some(ImageFormat::Gif);
        }
        if data.len() < 12 {
            return None;
        }
        if data.starts_with(b"RIFF") && data[8..12] == *b"WEBP" {
            Some(ImageFormat::WebP)
        } else if data[4..12] == *b"ftypheic" || data[4..12] == *b"ftypheix" {
            Some(ImageFormat::Heic)
        } else if data[4..12] == *b"ftypmif1" || data[4..12] == *b"ftypheif" {
            Some(ImageFormat::Heif)
        } else {
            None
        }
    }
}

/// Format assumed when neither the declared type nor the bytes identify one.
pub const FALLBACK_FORMAT: ImageFormat = ImageFormat::Jpeg;

/// Pick the MIME tag sent alongside the image bytes.
///
/// The declared content type wins when it names a supported format; otherwise
/// the bytes are sniffed, and JPEG is assumed as a last resort.
pub fn resolve_mime_type(declared: &str, data: &[u8]) -> &'static str {
    ImageFormat::from_mime_type(declared)
        .or_else(|| ImageFormat::sniff(data))
        .unwrap_or(FALLBACK_FORMAT)
        .mime_type()
}

/// Validation limits
pub const MAX_IMAGE_SIZE_BYTES: usize = 20 * 1024 * 1024; // 20MB (Gemini inline limit)

/// Validate image data size
pub fn validate_image_size(data_len: usize) -> Result<()> {
    if data_len > MAX_IMAGE_SIZE_BYTES {
        return Err(ScannerError::ImageTooLarge {
            size: data_len,
            max: MAX_IMAGE_SIZE_BYTES,
        });
    }
    Ok(())
}
