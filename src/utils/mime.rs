//! MIME type helpers for downloaded assets.
//!
//! The localizer only needs the reverse direction: given a response
//! `Content-Type`, pick a file extension for assets whose URL carries no
//! usable filename.

/// Map a `Content-Type` header value to a file extension.
///
/// Parameters (`; charset=...`) are ignored. Returns `None` for types the
/// archiver does not recognize.
pub fn extension_for(content_type: &str) -> Option<&'static str> {
    let base = content_type
        .split(';')
        .next()
        .unwrap_or(content_type)
        .trim()
        .to_ascii_lowercase();

    match base.as_str() {
        "text/css" => Some("css"),
        "image/png" => Some("png"),
        "image/jpeg" => Some("jpg"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        "image/avif" => Some("avif"),
        "image/svg+xml" => Some("svg"),
        "image/x-icon" | "image/vnd.microsoft.icon" => Some("ico"),
        "image/bmp" => Some("bmp"),
        _ => None,
    }
}
