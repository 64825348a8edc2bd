//! MIME type detection utilities

/// Guess MIME by inspecting bytes (magic numbers)
pub fn guess_mime_from_bytes(bytes: &[u8]) -> Option<String> {
    infer::get(bytes).map(|k| k.mime_type().to_string())
}

/// Guess MIME by file path or URL (extension-based)
pub fn guess_mime_from_path_or_url(path_or_url: &str) -> Option<String> {
    // Query strings would otherwise hide the extension.
    let path = path_or_url
        .split(['?', '#'])
        .next()
        .unwrap_or(path_or_url);
    mime_guess::from_path(path)
        .first_raw()
        .map(|s| s.to_string())
}

/// Combined guess: prefer bytes, fall back to extension, otherwise `fallback`.
pub fn guess_mime(bytes: Option<&[u8]>, path_or_url: Option<&str>, fallback: &str) -> String {
    if let Some(b) = bytes
        && let Some(m) = guess_mime_from_bytes(b)
    {
        return m;
    }
    if let Some(p) = path_or_url
        && let Some(m) = guess_mime_from_path_or_url(p)
    {
        return m;
    }
    fallback.to_string()
}

/// Whether the media type denotes an image (`image/*`).
pub fn is_image_media_type(media_type: &str) -> bool {
    media_type.starts_with("image/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn png_magic_bytes_win_over_extension() {
        let png = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
        assert_eq!(
            guess_mime(Some(&png), Some("photo.jpg"), "application/octet-stream"),
            "image/png"
        );
    }

    #[test]
    fn url_query_does_not_hide_extension() {
        assert_eq!(
            guess_mime_from_path_or_url("https://cdn.example.com/a/cat.webp?sig=abc").as_deref(),
            Some("image/webp")
        );
    }

    #[test]
    fn unknown_falls_back() {
        assert_eq!(guess_mime(None, Some("blob"), "image/png"), "image/png");
    }
}
