use std::fs;
use std::path::Path;

use base64::{Engine as _, engine::general_purpose};

use crate::error::{ManifestError, ManifestResult};

/// MIME type for a file extension, with or without the leading dot.
pub fn mime_for_extension(extension: &str) -> &'static str {
    match extension.trim_start_matches('.').to_lowercase().as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// Format `payload` as a base64 `data:` URI.
pub fn encode_data_uri(mime: &str, payload: &[u8]) -> String {
    format!(
        "data:{mime};base64,{}",
        general_purpose::STANDARD.encode(payload)
    )
}

/// Read `path` and inline it as a data URI typed by `extension`.
pub fn inline_data_uri(path: &Path, extension: &str) -> ManifestResult<String> {
    let payload = fs::read(path).map_err(|err| ManifestError::unreadable(path, err))?;
    Ok(encode_data_uri(mime_for_extension(extension), &payload))
}
