use crate::UtilsError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::path::Path;

const DEFAULT_EXTENSION: &str = "jpg";

/// Known image mime types and the extension stored files get for them
const IMAGE_EXTENSIONS: &[(&str, &str)] = &[
    ("image/jpeg", "jpg"),
    ("image/jpg", "jpg"),
    ("image/png", "png"),
    ("image/gif", "gif"),
    ("image/webp", "webp"),
    ("image/svg+xml", "svg"),
    ("image/bmp", "bmp"),
    ("image/tiff", "tiff"),
];

/// Picks the extension for an uploaded file.
///
/// The declared content type wins when it is a known image type, then the
/// client's original filename, then `jpg`.
pub fn extension_for_upload(content_type: Option<&str>, original_name: Option<&str>) -> String {
    if let Some(ext) = content_type.and_then(extension_for_mime) {
        return ext.to_string();
    }

    original_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_else(|| DEFAULT_EXTENSION.to_string())
}

pub fn extension_for_mime(content_type: &str) -> Option<&'static str> {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    IMAGE_EXTENSIONS
        .iter()
        .find(|(mime, _)| *mime == essence)
        .map(|(_, ext)| *ext)
}

/// Content type served for a stored file, from its extension
pub fn content_type_for(filename: &str) -> String {
    mime_guess::from_path(filename)
        .first_or_octet_stream()
        .to_string()
}

pub fn encode_data_url(content_type: &str, data: &[u8]) -> String {
    format!("data:{};base64,{}", content_type, STANDARD.encode(data))
}

/// Splits a `data:{mime};base64,{payload}` URL into its content type and bytes
pub fn decode_data_url(data_url: &str) -> Result<(String, Vec<u8>), UtilsError> {
    let rest = data_url
        .strip_prefix("data:")
        .ok_or_else(|| UtilsError::InvalidDataUrl("missing 'data:' scheme".to_string()))?;

    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| UtilsError::InvalidDataUrl("missing ',' separator".to_string()))?;

    let content_type = header
        .strip_suffix(";base64")
        .ok_or_else(|| UtilsError::InvalidDataUrl("only base64 payloads are supported".to_string()))?;

    let content_type = if content_type.is_empty() {
        "application/octet-stream".to_string()
    } else {
        content_type.to_string()
    };

    let data = STANDARD
        .decode(payload)
        .map_err(|e| UtilsError::InvalidDataUrl(e.to_string()))?;

    Ok((content_type, data))
}
