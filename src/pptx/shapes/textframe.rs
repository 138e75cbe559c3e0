/// Text frame, paragraph and run types for accessing text content in shapes.
use crate::pptx::error::{PptxError, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// Vertical anchoring of text within its frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAnchor {
    Top,
    Middle,
    Bottom,
    /// An anchor mode outside the plain top/middle/bottom set
    Mixed,
    /// The document does not specify an anchor
    Unknown,
}

impl VerticalAnchor {
    /// Stable string form used on both report channels.
    pub fn as_str(&self) -> &'static str {
        match self {
            VerticalAnchor::Top => "top",
            VerticalAnchor::Middle => "middle",
            VerticalAnchor::Bottom => "bottom",
            VerticalAnchor::Mixed => "mixed",
            VerticalAnchor::Unknown => "unknown",
        }
    }

    fn from_attr(value: &[u8]) -> Self {
        match value {
            b"t" => VerticalAnchor::Top,
            b"ctr" => VerticalAnchor::Middle,
            b"b" => VerticalAnchor::Bottom,
            _ => VerticalAnchor::Mixed,
        }
    }
}

/// The four text-frame insets, in EMUs.
///
/// An absent attribute stays None; the PowerPoint defaults are never
/// substituted, so the report reflects what the document actually says.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextMargins {
    pub left: Option<i64>,
    pub top: Option<i64>,
    pub right: Option<i64>,
    pub bottom: Option<i64>,
}

/// A text frame containing text content.
///
/// Found in shape objects; provides access to the frame-level attributes
/// (anchor, margins) and the paragraphs within the shape.
#[derive(Debug, Clone)]
pub struct TextFrame {
    /// Raw XML bytes of the owning shape
    xml_bytes: Vec<u8>,
}

impl TextFrame {
    /// Create a TextFrame over a shape's XML bytes.
    pub(crate) fn from_xml(xml_bytes: &[u8]) -> Self {
        Self {
            xml_bytes: xml_bytes.to_vec(),
        }
    }

    /// Get the vertical anchor, from the `anchor` attribute of `<a:bodyPr>`.
    pub fn vertical_anchor(&self) -> VerticalAnchor {
        match self.body_pr_attrs() {
            Some((anchor, _)) => anchor,
            None => VerticalAnchor::Unknown,
        }
    }

    /// Get the four insets from `<a:bodyPr>` (lIns/tIns/rIns/bIns), in EMUs.
    pub fn margins(&self) -> TextMargins {
        match self.body_pr_attrs() {
            Some((_, margins)) => margins,
            None => TextMargins::default(),
        }
    }

    /// Scan for the first bodyPr element and read its attributes.
    fn body_pr_attrs(&self) -> Option<(VerticalAnchor, TextMargins)> {
        let mut reader = Reader::from_reader(&self.xml_bytes[..]);
        reader.config_mut().trim_text(true);

        loop {
            match reader.read_event() {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) => {
                    if e.local_name().as_ref() == b"bodyPr" {
                        let mut anchor = VerticalAnchor::Unknown;
                        let mut margins = TextMargins::default();
                        for attr in e.attributes().flatten() {
                            match attr.key.as_ref() {
                                b"anchor" => anchor = VerticalAnchor::from_attr(&attr.value),
                                b"lIns" => margins.left = attr_i64(&attr.value),
                                b"tIns" => margins.top = attr_i64(&attr.value),
                                b"rIns" => margins.right = attr_i64(&attr.value),
                                b"bIns" => margins.bottom = attr_i64(&attr.value),
                                _ => {},
                            }
                        }
                        return Some((anchor, margins));
                    }
                },
                Ok(Event::Eof) => return None,
                Err(_) => return None,
                _ => {},
            }
        }
    }

    /// Get the paragraphs in this text frame, in document order.
    ///
    /// DrawingML paragraphs are `<a:p>` elements inside `<p:txBody>`.
    pub fn paragraphs(&self) -> Result<Vec<Paragraph>> {
        // No trim_text: paragraph XML must keep run text verbatim
        let mut reader = Reader::from_reader(&self.xml_bytes[..]);

        let mut paragraphs = Vec::new();
        let mut in_body = false;

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => {
                    let local = e.local_name();
                    if local.as_ref() == b"txBody" {
                        in_body = true;
                    } else if in_body && local.as_ref() == b"p" {
                        let para_xml = extract_paragraph_xml(&mut reader, e)?;
                        paragraphs.push(Paragraph::new(para_xml));
                    }
                },
                Ok(Event::End(ref e)) => {
                    if e.local_name().as_ref() == b"txBody" {
                        break;
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(PptxError::Xml(e.to_string())),
                _ => {},
            }
        }

        Ok(paragraphs)
    }
}

/// A paragraph in a text frame.
#[derive(Debug, Clone)]
pub struct Paragraph {
    /// Raw XML bytes for this paragraph
    xml_bytes: Vec<u8>,
}

impl Paragraph {
    /// Create a new Paragraph from XML bytes.
    pub fn new(xml_bytes: Vec<u8>) -> Self {
        Self { xml_bytes }
    }

    /// Get the runs of this paragraph, in document order.
    ///
    /// Only real `<a:r>` runs are returned; field elements (`<a:fld>`, e.g.
    /// slide numbers) and line breaks are not runs.
    pub fn runs(&self) -> Result<Vec<Run>> {
        // No trim_text: leading and trailing whitespace inside <a:t> is
        // real text
        let mut reader = Reader::from_reader(&self.xml_bytes[..]);

        let mut runs = Vec::new();
        let mut current: Option<Run> = None;
        let mut in_rpr = false;
        let mut in_rpr_fill = false;
        let mut in_text = false;

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                    b"r" if current.is_none() => current = Some(Run::default()),
                    b"rPr" if current.is_some() => {
                        in_rpr = true;
                        if let Some(run) = current.as_mut() {
                            run.apply_rpr_attrs(e);
                        }
                    },
                    b"solidFill" if in_rpr => in_rpr_fill = true,
                    b"srgbClr" if in_rpr_fill => {
                        if let (Some(run), Some(val)) = (current.as_mut(), attr_string(e, b"val"))
                        {
                            run.color = Some(val);
                        }
                    },
                    b"latin" if in_rpr => {
                        if let (Some(run), Some(face)) =
                            (current.as_mut(), attr_string(e, b"typeface"))
                        {
                            run.family = Some(face);
                        }
                    },
                    b"t" if current.is_some() => in_text = true,
                    _ => {},
                },
                Ok(Event::Empty(ref e)) => match e.local_name().as_ref() {
                    b"rPr" if current.is_some() => {
                        if let Some(run) = current.as_mut() {
                            run.apply_rpr_attrs(e);
                        }
                    },
                    b"srgbClr" if in_rpr_fill => {
                        if let (Some(run), Some(val)) = (current.as_mut(), attr_string(e, b"val"))
                        {
                            run.color = Some(val);
                        }
                    },
                    b"latin" if in_rpr => {
                        if let (Some(run), Some(face)) =
                            (current.as_mut(), attr_string(e, b"typeface"))
                        {
                            run.family = Some(face);
                        }
                    },
                    _ => {},
                },
                Ok(Event::Text(e)) if in_text => {
                    if let Some(run) = current.as_mut() {
                        let text = e
                            .unescape()
                            .map_err(|e| PptxError::Xml(e.to_string()))?;
                        run.text.push_str(&text);
                    }
                },
                Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                    b"r" => {
                        if let Some(run) = current.take() {
                            runs.push(run);
                        }
                    },
                    b"rPr" => in_rpr = false,
                    b"solidFill" => in_rpr_fill = false,
                    b"t" => in_text = false,
                    _ => {},
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(PptxError::Xml(e.to_string())),
                _ => {},
            }
        }

        Ok(runs)
    }
}

/// One run of text with its character properties.
///
/// Every property the document does not set stays None.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Run {
    /// Text content
    pub text: String,
    /// RGB color as raw hex (e.g. "FF0000")
    pub color: Option<String>,
    /// Font size in EMU font units (1 pt = 12700)
    pub size: Option<i64>,
    /// Bold flag
    pub bold: Option<bool>,
    /// Italic flag
    pub italic: Option<bool>,
    /// Font family name
    pub family: Option<String>,
}

impl Run {
    /// Apply the rPr element's own attributes (sz, b, i).
    fn apply_rpr_attrs(&mut self, e: &BytesStart<'_>) {
        for attr in e.attributes().flatten() {
            match attr.key.as_ref() {
                // sz is in hundredths of a point; 1 pt = 12700 EMU
                b"sz" => {
                    self.size = std::str::from_utf8(&attr.value)
                        .ok()
                        .and_then(|s| s.parse::<i64>().ok())
                        .map(|centipoints| centipoints * 127);
                },
                b"b" => self.bold = attr_bool(&attr.value),
                b"i" => self.italic = attr_bool(&attr.value),
                _ => {},
            }
        }
    }
}

fn attr_i64(value: &[u8]) -> Option<i64> {
    std::str::from_utf8(value).ok().and_then(|s| s.parse().ok())
}

fn attr_bool(value: &[u8]) -> Option<bool> {
    match value {
        b"1" | b"true" => Some(true),
        b"0" | b"false" => Some(false),
        _ => None,
    }
}

fn attr_string(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == key {
            return attr.unescape_value().ok().map(|v| v.to_string());
        }
    }
    None
}

/// Reconstruct a paragraph element whose Start event was just consumed.
fn extract_paragraph_xml(reader: &mut Reader<&[u8]>, start: &BytesStart<'_>) -> Result<Vec<u8>> {
    let mut xml = Vec::new();
    write_tag(&mut xml, start, false);

    let mut depth = 1;
    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                depth += 1;
                write_tag(&mut xml, e, false);
            },
            Ok(Event::Empty(ref e)) => write_tag(&mut xml, e, true),
            Ok(Event::Text(e)) => xml.extend_from_slice(e.as_ref()),
            Ok(Event::End(e)) => {
                xml.extend_from_slice(b"</");
                xml.extend_from_slice(e.name().as_ref());
                xml.push(b'>');

                depth -= 1;
                if depth == 0 {
                    return Ok(xml);
                }
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(PptxError::Xml(e.to_string())),
            _ => {},
        }
    }

    Err(PptxError::Xml("Unexpected end of paragraph XML".to_string()))
}

fn write_tag(xml: &mut Vec<u8>, e: &BytesStart<'_>, self_closing: bool) {
    xml.push(b'<');
    xml.extend_from_slice(e.name().as_ref());
    for attr in e.attributes().flatten() {
        xml.push(b' ');
        xml.extend_from_slice(attr.key.as_ref());
        xml.extend_from_slice(b"=\"");
        xml.extend_from_slice(&attr.value);
        xml.push(b'"');
    }
    if self_closing {
        xml.extend_from_slice(b"/>");
    } else {
        xml.push(b'>');
    }
}
