//! `data:` URL helpers for inline images and files.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Decoded parts of a base64 `data:` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    pub media_type: Option<String>,
    pub base64: String,
}

impl DataUrl {
    /// Decode the payload into raw bytes.
    pub fn decode(&self) -> Option<Vec<u8>> {
        STANDARD.decode(self.base64.as_bytes()).ok()
    }
}

/// Split `data:<media type>;base64,<payload>`.
///
/// Returns `None` for anything that is not a base64 data URL.
pub fn parse_data_url(url: &str) -> Option<DataUrl> {
    let rest = url.strip_prefix("data:")?;
    let (header, payload) = rest.split_once(',')?;
    let media_type = header.strip_suffix(";base64")?;
    Some(DataUrl {
        media_type: (!media_type.is_empty()).then(|| media_type.to_string()),
        base64: payload.to_string(),
    })
}

/// Media type of a data URL, or `default` when absent or unparsable.
pub fn media_type_from_data_url(url: &str, default: &str) -> String {
    parse_data_url(url)
        .and_then(|d| d.media_type)
        .unwrap_or_else(|| default.to_string())
}

/// Base64 payload of a data URL; non data URLs are returned unchanged.
pub fn base64_from_data_url(url: &str) -> String {
    parse_data_url(url)
        .map(|d| d.base64)
        .unwrap_or_else(|| url.to_string())
}

/// Build `data:<media type>;base64,<payload>`.
pub fn to_data_url(media_type: &str, base64: &str) -> String {
    format!("data:{media_type};base64,{base64}")
}

/// Encode raw bytes as base64.
pub fn encode_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_media_type_and_payload() {
        let parsed = parse_data_url("data:image/png;base64,iVBORw0KGgo=").unwrap();
        assert_eq!(parsed.media_type.as_deref(), Some("image/png"));
        assert_eq!(parsed.base64, "iVBORw0KGgo=");
        assert_eq!(parsed.decode().unwrap()[..4], [0x89, b'P', b'N', b'G']);
    }

    #[test]
    fn non_data_urls_are_rejected() {
        assert!(parse_data_url("https://example.com/cat.png").is_none());
        assert!(parse_data_url("data:text/plain,hello").is_none());
        assert_eq!(
            media_type_from_data_url("https://example.com/cat.png", "image/jpeg"),
            "image/jpeg"
        );
    }

    #[test]
    fn missing_media_type_uses_default() {
        assert_eq!(media_type_from_data_url("data:;base64,AAAA", "image/png"), "image/png");
        assert_eq!(base64_from_data_url("data:;base64,AAAA"), "AAAA");
    }
}
