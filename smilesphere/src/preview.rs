//! Client-side preview of a file chosen for upload
//!
//! When the visitor picks a file, the page shows it immediately as an
//! inline data URL without touching the server. The MIME type is
//! derived from the file name alone; the bytes are never sniffed.

use std::path::Path;

use base64::Engine;

/// MIME type for a chosen file, by extension
///
/// Unrecognized and missing extensions fall back to the generic octet
/// stream type, which the host can still render or reject as it sees
/// fit.
pub fn mime_for_name(name: &str) -> &'static str {
    let extension = Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

/// An inline preview built from a chosen file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewImage {
    name: String,
    mime: &'static str,
    data_url: String,
}

impl PreviewImage {
    /// Build a preview from the chosen file's name and contents
    pub fn from_file(name: &str, bytes: &[u8]) -> Self {
        let mime = mime_for_name(name);
        let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
        Self {
            name: name.to_string(),
            mime,
            data_url: format!("data:{};base64,{}", mime, encoded),
        }
    }

    /// The file name as chosen
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The derived MIME type
    pub fn mime(&self) -> &'static str {
        self.mime
    }

    /// The data URL to assign to the preview element
    pub fn data_url(&self) -> &str {
        &self.data_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_extensions_map_to_image_types() {
        assert_eq!(mime_for_name("selfie.png"), "image/png");
        assert_eq!(mime_for_name("selfie.jpg"), "image/jpeg");
        assert_eq!(mime_for_name("selfie.jpeg"), "image/jpeg");
        assert_eq!(mime_for_name("loop.gif"), "image/gif");
        assert_eq!(mime_for_name("modern.webp"), "image/webp");
    }

    #[test]
    fn test_extension_matching_ignores_case() {
        assert_eq!(mime_for_name("SCAN.PNG"), "image/png");
        assert_eq!(mime_for_name("photo.JpEg"), "image/jpeg");
    }

    #[test]
    fn test_unknown_and_missing_extensions_fall_back() {
        assert_eq!(mime_for_name("notes.txt"), "application/octet-stream");
        assert_eq!(mime_for_name("archive"), "application/octet-stream");
        assert_eq!(mime_for_name(".bashrc"), "application/octet-stream");
    }

    #[test]
    fn test_preview_carries_an_inline_data_url() {
        let preview = PreviewImage::from_file("dot.png", &[1, 2, 3]);
        assert_eq!(preview.name(), "dot.png");
        assert_eq!(preview.mime(), "image/png");
        assert_eq!(preview.data_url(), "data:image/png;base64,AQID");
    }

    #[test]
    fn test_empty_file_still_previews() {
        let preview = PreviewImage::from_file("blank.gif", &[]);
        assert_eq!(preview.data_url(), "data:image/gif;base64,");
    }
}
