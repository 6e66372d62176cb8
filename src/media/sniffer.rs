//! Signature sniffing over base64 payloads

use std::fmt;

/// Image media types recognised by [`sniff`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MediaType {
    Png,
    Gif,
    Svg,
    #[default]
    Jpeg,
}

impl MediaType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            MediaType::Png => "image/png",
            MediaType::Gif => "image/gif",
            MediaType::Svg => "image/svg+xml",
            MediaType::Jpeg => "image/jpeg",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// base64 of `\x89PNG\r\n`
const PNG_SIGNATURE: &str = "iVBORw0K";
/// base64 of `GIF89a`
const GIF_SIGNATURE: &str = "R0lGODlh";
const XML_SIGNATURE: &str = "<?xml";

/// Classify a base64-encoded payload by the signatures it contains.
///
/// Checked in order PNG, GIF, XML (SVG); anything else is JPEG. A heuristic,
/// so a miss yields the JPEG default rather than an error.
#[must_use]
pub fn sniff(payload: &str) -> MediaType {
    if payload.contains(PNG_SIGNATURE) {
        MediaType::Png
    } else if payload.contains(GIF_SIGNATURE) {
        MediaType::Gif
    } else if payload.contains(XML_SIGNATURE) {
        MediaType::Svg
    } else {
        MediaType::Jpeg
    }
}

/// Web font signatures, base64 of the leading magic bytes
const FONT_SIGNATURES: [(&str, &str); 4] = [
    ("d09GMg", "font/woff2"),
    ("d09GRg", "font/woff"),
    ("T1RUTw", "font/otf"),
    ("AAEAAA", "font/ttf"),
];

/// Classify a base64-encoded payload as a web font, if its leading bytes are a
/// font signature.
///
/// Stylesheets reference fonts as often as images, and a font must not be
/// declared as `image/jpeg`.
#[must_use]
pub fn sniff_font(payload: &str) -> Option<&'static str> {
    FONT_SIGNATURES
        .iter()
        .find(|(signature, _)| payload.starts_with(signature))
        .map(|(_, media_type)| *media_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine;

    #[test]
    fn recognises_png() {
        assert_eq!(sniff("iVBORw0KGgoAAAANSUhEUgAAAAEAAAAB"), MediaType::Png);
    }

    #[test]
    fn recognises_gif() {
        assert_eq!(sniff("R0lGODlhAQABAIAAAP///wAAACwAAAAAAQABAAACAkQBADs="), MediaType::Gif);
    }

    #[test]
    fn recognises_xml_marker() {
        assert_eq!(sniff("<?xml version=\"1.0\"?><svg/>"), MediaType::Svg);
    }

    #[test]
    fn png_wins_over_later_signatures() {
        assert_eq!(sniff("R0lGODlh iVBORw0K <?xml"), MediaType::Png);
    }

    #[test]
    fn everything_else_is_jpeg() {
        assert_eq!(sniff("/9j/4AAQSkZJRgABAQ"), MediaType::Jpeg);
        assert_eq!(sniff(""), MediaType::Jpeg);
    }

    #[test]
    fn real_png_header_encodes_to_signature() {
        let header = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n', 0, 0, 0, 13];
        let encoded = base64::engine::general_purpose::STANDARD.encode(header);
        assert_eq!(sniff(&encoded), MediaType::Png);
    }

    #[test]
    fn recognises_web_fonts() {
        let encode = |bytes: &[u8]| base64::engine::general_purpose::STANDARD.encode(bytes);

        assert_eq!(sniff_font(&encode(b"wOF2\x00\x01\x00\x00")), Some("font/woff2"));
        assert_eq!(sniff_font(&encode(b"wOFF\x00\x01\x00\x00")), Some("font/woff"));
        assert_eq!(sniff_font(&encode(b"OTTO\x00\x0a")), Some("font/otf"));
        assert_eq!(sniff_font(&encode(&[0, 1, 0, 0, 0, 0x0c])), Some("font/ttf"));
        assert_eq!(sniff_font("iVBORw0KGgo="), None);
    }

    #[test]
    fn display_matches_media_type() {
        assert_eq!(MediaType::Svg.to_string(), "image/svg+xml");
        assert_eq!(MediaType::default().as_str(), "image/jpeg");
    }
}
