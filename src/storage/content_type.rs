//! Content type resolution
//!
//! Maps a file's extension to the MIME type used for the HTTP response.
//! Resolution is total: unknown extensions fall back to a binary type.

use std::ffi::OsStr;
use std::path::Path;

/// Extensions treated as images by the listing endpoint (lowercase).
pub const IMAGE_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "gif", "bmp", "webp"];

/// Resolve the MIME type for a file name. Case-insensitive on the
/// extension; never fails.
pub fn content_type_for(file_name: &str) -> &'static str {
    let extension = Path::new(file_name)
        .extension()
        .and_then(OsStr::to_str)
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("bmp") => "image/bmp",
        Some("webp") => "image/webp",
        Some("txt") => "text/plain",
        Some("json") => "application/json",
        Some("xml") => "application/xml",
        Some("config") => "text/plain",
        _ => "application/octet-stream",
    }
}

/// Whether a file name carries one of the recognized image extensions.
pub fn is_image_file(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .and_then(OsStr::to_str)
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}
