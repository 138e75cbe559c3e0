/// SVG attribute scanner for embedded picture payloads.
///
/// Picture shapes may embed vector graphics either as raw SVG markup or as
/// a base64 data URI. This scanner classifies the payload, decodes it, and
/// extracts a fixed attribute subset by pattern search. It is deliberately
/// not an XML parse: a handful of attribute values and the `<rect>` opening
/// tags are all the verification pipeline needs.
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use memchr::{memchr, memmem};
use serde::Serialize;

/// The data-URI prefix recognized for base64-encoded SVG payloads.
pub const DATA_URI_PREFIX: &str = "data:image/svg+xml;base64,";

/// Decoded content shorter than this (after trimming) is flagged as too
/// short to be meaningful.
pub const MIN_SVG_LEN: usize = 50;

/// How many leading bytes are searched for `<svg` during classification.
const CLASSIFY_WINDOW: usize = 100;

/// Salient attributes extracted from an embedded SVG payload.
///
/// All values are the raw attribute strings from the markup, never re-typed.
/// Absent attributes stay None. `error` is set when the payload classified
/// as SVG but could not be decoded, or when the content is implausibly
/// short; extraction of the remaining fields still happens where possible.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SvgInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    pub rect_count: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rects: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

enum PayloadForm {
    Markup,
    DataUri,
}

impl SvgInfo {
    /// Scan a picture payload.
    ///
    /// Returns None when the payload is not SVG at all (raster images are
    /// skipped silently). Decode failures are reported on the `error` field
    /// of the returned SvgInfo, never propagated.
    pub fn scan(payload: &[u8]) -> Option<SvgInfo> {
        let text = match classify(payload)? {
            PayloadForm::Markup => match std::str::from_utf8(payload) {
                Ok(text) => text.to_string(),
                Err(e) => return Some(Self::decode_error(format!("invalid UTF-8: {}", e))),
            },
            PayloadForm::DataUri => {
                let encoded = &payload[DATA_URI_PREFIX.len()..];
                let bytes = match BASE64.decode(encoded) {
                    Ok(bytes) => bytes,
                    Err(e) => return Some(Self::decode_error(format!("invalid base64: {}", e))),
                };
                match String::from_utf8(bytes) {
                    Ok(text) => text,
                    Err(e) => return Some(Self::decode_error(format!("invalid UTF-8: {}", e))),
                }
            },
        };

        Some(Self::from_markup(&text))
    }

    /// Extract the attribute subset from decoded SVG markup.
    fn from_markup(text: &str) -> SvgInfo {
        let mut info = SvgInfo {
            fill: find_attr(text, "fill"),
            stroke: find_attr(text, "stroke"),
            stroke_width: find_attr(text, "stroke-width"),
            opacity: find_attr(text, "opacity"),
            width: find_attr(text, "width"),
            height: find_attr(text, "height"),
            ..SvgInfo::default()
        };

        info.rects = collect_rects(text);
        info.rect_count = info.rects.len();

        if text.trim().len() < MIN_SVG_LEN {
            info.error = Some("SVG content too short".to_string());
        }

        info
    }

    fn decode_error(message: String) -> SvgInfo {
        SvgInfo {
            error: Some(message),
            ..SvgInfo::default()
        }
    }
}

/// Decide whether a payload is SVG and in which form.
fn classify(payload: &[u8]) -> Option<PayloadForm> {
    if payload.starts_with(DATA_URI_PREFIX.as_bytes()) {
        return Some(PayloadForm::DataUri);
    }

    let start = payload
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(payload.len());
    if payload[start..].starts_with(b"<svg") {
        return Some(PayloadForm::Markup);
    }

    let window = &payload[..payload.len().min(CLASSIFY_WINDOW)];
    if memmem::find(window, b"<svg").is_some() {
        return Some(PayloadForm::Markup);
    }

    None
}

/// Find the first double-quoted value of an attribute.
///
/// A match counts only when the attribute name is preceded by whitespace or
/// a tag-opening character, so `width="…"` never matches inside
/// `stroke-width="…"`.
fn find_attr(text: &str, name: &str) -> Option<String> {
    let needle = format!("{}=\"", name);
    let bytes = text.as_bytes();

    for pos in memmem::find_iter(bytes, needle.as_bytes()) {
        if pos > 0 {
            let prev = bytes[pos - 1];
            if !prev.is_ascii_whitespace() && prev != b'<' {
                continue;
            }
        }
        let value_start = pos + needle.len();
        let value_len = memchr(b'"', &bytes[value_start..])?;
        return Some(text[value_start..value_start + value_len].to_string());
    }

    None
}

/// Collect every `<rect …>` opening tag, verbatim, up to its first `>`.
fn collect_rects(text: &str) -> Vec<String> {
    let bytes = text.as_bytes();
    let mut rects = Vec::new();

    for pos in memmem::find_iter(bytes, b"<rect") {
        // Reject longer tag names sharing the prefix
        if let Some(&next) = bytes.get(pos + 5)
            && !next.is_ascii_whitespace()
            && next != b'/'
            && next != b'>'
        {
            continue;
        }
        if let Some(end) = memchr(b'>', &bytes[pos..]) {
            rects.push(text[pos..pos + end + 1].to_string());
        }
    }

    rects
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_direct_markup() {
        let info = SvgInfo::scan(br#"<svg width="10" height="10"></svg>"#).unwrap();
        assert_eq!(info.width.as_deref(), Some("10"));
        assert_eq!(info.height.as_deref(), Some("10"));
        assert_eq!(info.fill, None);
        assert_eq!(info.rect_count, 0);
    }

    #[test]
    fn test_leading_whitespace_and_prolog() {
        let info = SvgInfo::scan(b"  \n<svg fill=\"none\"/>").unwrap();
        assert_eq!(info.fill.as_deref(), Some("none"));

        // <svg deeper in the payload, within the first 100 bytes
        let payload = br#"<?xml version="1.0" encoding="UTF-8"?><svg width="4"/>"#;
        let info = SvgInfo::scan(payload).unwrap();
        assert_eq!(info.width.as_deref(), Some("4"));
    }

    #[test]
    fn test_non_svg_is_skipped() {
        assert_eq!(SvgInfo::scan(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A]), None);
        assert_eq!(SvgInfo::scan(b""), None);
        assert_eq!(SvgInfo::scan(b"hello world, no markup here"), None);
    }

    #[test]
    fn test_base64_data_uri() {
        let markup = br##"<svg fill="#FF0000"/>"##;
        let payload = format!("{}{}", DATA_URI_PREFIX, BASE64.encode(markup));
        let info = SvgInfo::scan(payload.as_bytes()).unwrap();
        assert_eq!(info.fill.as_deref(), Some("#FF0000"));
        assert!(info.error.is_some()); // 21 chars, below the length floor
    }

    #[test]
    fn test_invalid_base64_degrades_to_error() {
        let payload = format!("{}!!!not-base64!!!", DATA_URI_PREFIX);
        let info = SvgInfo::scan(payload.as_bytes()).unwrap();
        assert!(info.error.as_deref().unwrap().contains("invalid base64"));
        assert_eq!(info.fill, None);
        assert_eq!(info.rect_count, 0);
    }

    #[test]
    fn test_short_content_flag() {
        let info = SvgInfo::scan(b"<svg/>").unwrap();
        assert_eq!(info.error.as_deref(), Some("SVG content too short"));

        let long = br#"<svg xmlns="http://www.w3.org/2000/svg"><rect x="0" y="0"/></svg>"#;
        assert!(long.len() >= MIN_SVG_LEN);
        let info = SvgInfo::scan(long).unwrap();
        assert_eq!(info.error, None);
        assert_eq!(info.rect_count, 1);
        assert_eq!(info.rects[0], r#"<rect x="0" y="0"/>"#);
    }

    #[test]
    fn test_stroke_width_does_not_shadow_width() {
        let payload =
            br##"<svg stroke-width="2" stroke="#000" opacity="0.5"><rect width="30"/></svg>"##;
        let info = SvgInfo::scan(payload).unwrap();
        assert_eq!(info.stroke_width.as_deref(), Some("2"));
        assert_eq!(info.stroke.as_deref(), Some("#000"));
        assert_eq!(info.opacity.as_deref(), Some("0.5"));
        // First real width attribute sits on the rect
        assert_eq!(info.width.as_deref(), Some("30"));
    }

    #[test]
    fn test_rect_collection() {
        let payload = br##"<svg width="100" height="50">
            <rect x="0" y="0" width="100" height="50" fill="#ffffff"/>
            <rect x="1" y="1" width="98" height="48" fill="none" stroke="#ff0000"/>
        </svg>"##;
        let info = SvgInfo::scan(payload).unwrap();
        assert_eq!(info.rect_count, 2);
        assert!(info.rects[0].contains(r##"fill="#ffffff""##));
        assert!(info.rects[1].ends_with("/>"));
        // svg-level attributes win over rect-level ones for the flat fields
        assert_eq!(info.width.as_deref(), Some("100"));
    }

    proptest! {
        /// Arbitrary binary payloads never panic and never classify unless
        /// they actually contain the marker.
        #[test]
        fn prop_scan_never_panics(payload in proptest::collection::vec(any::<u8>(), 0..512)) {
            let result = SvgInfo::scan(&payload);
            if result.is_some() {
                let has_marker = memmem::find(&payload, b"<svg").is_some()
                    || payload.starts_with(DATA_URI_PREFIX.as_bytes());
                prop_assert!(has_marker);
            }
        }
    }
}
