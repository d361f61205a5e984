//! Vision helpers for uploaded product images.
//!
//! Gemini needs every inline image tagged with a MIME type. Clients upload
//! whatever their camera produced, so this module resolves a trustworthy tag
//! from the declared content type or the leading magic bytes, and enforces the
//! inline data size limit.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod models;

pub use models::{resolve_mime_type, validate_image_size, ImageFormat};

/// Whether a declared multipart content type counts as an image upload.
///
/// Only the `image/` prefix is checked; the exact format is resolved later.
pub fn is_image_content_type(content_type: Option<&str>) -> bool {
    content_type.is_some_and(|ct| ct.starts_with("image/"))
}
