use base64::Engine as _;

pub fn detect_image_mime(bytes: &[u8]) -> &'static str {
    match bytes {
        [0xFF, 0xD8, 0xFF, ..] => "image/jpeg",
        [0x89, 0x50, 0x4E, 0x47, ..] => "image/png",
        [0x52, 0x49, 0x46, 0x46, _, _, _, _, 0x57, 0x45, 0x42, 0x50, ..] => "image/webp",
        _ => {
            tracing::warn!(
                "Unrecognized image format (first 4 bytes: {:02X?}), falling back to image/png",
                &bytes[..bytes.len().min(4)]
            );
            "image/png"
        }
    }
}

/// Wrap already-encoded base64 image data as a `data:` reference.
///
/// The mime type comes from `declared` when the provider reported one,
/// otherwise it is sniffed from the decoded bytes.
pub fn data_reference(b64: &str, declared: Option<&str>) -> crate::Result<String> {
    let mime = match declared {
        Some(mime) if !mime.is_empty() => mime.to_string(),
        _ => {
            let bytes = base64::engine::general_purpose::STANDARD
                .decode(b64)
                .map_err(|e| {
                    crate::Error::AiProvider(format!("Failed to decode base64 image: {}", e))
                })?;
            detect_image_mime(&bytes).to_string()
        }
    };
    Ok(format!("data:{};base64,{}", mime, b64))
}
