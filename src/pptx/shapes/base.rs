/// Base shape type for PowerPoint slides.
use crate::pptx::error::{PptxError, Result};
use crate::pptx::shapes::textframe::TextFrame;
use memchr::memmem;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// Shape kind classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    /// An auto shape (p:sp without the text-box flag)
    AutoShape,
    /// A picture shape (p:pic)
    Picture,
    /// A group shape (p:grpSp); the only kind with child shapes
    Group,
    /// A text box (p:sp whose cNvSpPr carries txBox="1")
    TextBox,
    /// Anything else (graphic frames, connectors, ...)
    Other,
}

impl ShapeKind {
    /// Stable string form used on both report channels.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::AutoShape => "auto-shape",
            ShapeKind::Picture => "picture",
            ShapeKind::Group => "group",
            ShapeKind::TextBox => "text-box",
            ShapeKind::Other => "other",
        }
    }
}

/// Shape geometry (position and size) in EMUs.
#[derive(Debug, Clone, Copy)]
struct ShapeGeometry {
    x: i64,
    y: i64,
    cx: i64,
    cy: i64,
}

/// A shape node on a slide.
///
/// Holds the raw XML of its element (including any nested child shapes for
/// groups) and scans it on demand. Name and geometry are cached after the
/// first scan.
#[derive(Debug, Clone)]
pub struct BaseShape {
    /// Raw XML bytes for this shape
    xml_bytes: Vec<u8>,
    /// Shape kind
    kind: ShapeKind,
    /// Shape name (cached)
    name: Option<String>,
    /// Position and size (cached)
    geometry: Option<ShapeGeometry>,
}

impl BaseShape {
    /// Create a new BaseShape from reconstructed element XML and its tag
    /// name.
    fn from_element(xml_bytes: Vec<u8>, tag: &[u8]) -> Self {
        let kind = match tag {
            b"sp" => {
                if memmem::find(&xml_bytes, br#"txBox="1""#).is_some() {
                    ShapeKind::TextBox
                } else {
                    ShapeKind::AutoShape
                }
            },
            b"pic" => ShapeKind::Picture,
            b"grpSp" => ShapeKind::Group,
            _ => ShapeKind::Other,
        };
        Self {
            xml_bytes,
            kind,
            name: None,
            geometry: None,
        }
    }

    /// Get the shape kind.
    #[inline]
    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    /// Get the shape name, from the `<p:cNvPr>` element.
    pub fn name(&mut self) -> Result<String> {
        if let Some(ref name) = self.name {
            return Ok(name.clone());
        }

        let mut reader = Reader::from_reader(&self.xml_bytes[..]);
        reader.config_mut().trim_text(true);

        loop {
            match reader.read_event() {
                Ok(Event::Empty(e)) | Ok(Event::Start(e)) => {
                    if e.local_name().as_ref() == b"cNvPr" {
                        for attr in e.attributes().flatten() {
                            if attr.key.as_ref() == b"name" {
                                let name = attr
                                    .unescape_value()
                                    .map(|v| v.to_string())
                                    .unwrap_or_default();
                                self.name = Some(name.clone());
                                return Ok(name);
                            }
                        }
                    }
                },
                Ok(Event::Eof) => break,
                Err(_) => break,
                _ => {},
            }
        }

        Ok(String::new())
    }

    /// Get the X position (left edge) in EMUs.
    pub fn left(&mut self) -> Result<i64> {
        self.ensure_geometry()?;
        Ok(self.geometry.unwrap().x)
    }

    /// Get the Y position (top edge) in EMUs.
    pub fn top(&mut self) -> Result<i64> {
        self.ensure_geometry()?;
        Ok(self.geometry.unwrap().y)
    }

    /// Get the width in EMUs.
    pub fn width(&mut self) -> Result<i64> {
        self.ensure_geometry()?;
        Ok(self.geometry.unwrap().cx)
    }

    /// Get the height in EMUs.
    pub fn height(&mut self) -> Result<i64> {
        self.ensure_geometry()?;
        Ok(self.geometry.unwrap().cy)
    }

    /// Parse and cache the shape's own `<a:xfrm>` geometry.
    ///
    /// Only the first xfrm element is read; for groups that is the group's
    /// own transform, which precedes every child. Missing offsets or
    /// extents stay 0.
    fn ensure_geometry(&mut self) -> Result<()> {
        if self.geometry.is_some() {
            return Ok(());
        }

        let mut reader = Reader::from_reader(&self.xml_bytes[..]);
        reader.config_mut().trim_text(true);

        let mut geometry = ShapeGeometry {
            x: 0,
            y: 0,
            cx: 0,
            cy: 0,
        };
        let mut in_xfrm = false;

        loop {
            match reader.read_event() {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) => {
                    match e.local_name().as_ref() {
                        b"xfrm" => in_xfrm = true,
                        b"off" if in_xfrm => {
                            for attr in e.attributes().flatten() {
                                let value = attr_i64(&attr.value);
                                match attr.key.as_ref() {
                                    b"x" => geometry.x = value,
                                    b"y" => geometry.y = value,
                                    _ => {},
                                }
                            }
                        },
                        b"ext" if in_xfrm => {
                            for attr in e.attributes().flatten() {
                                let value = attr_i64(&attr.value);
                                match attr.key.as_ref() {
                                    b"cx" => geometry.cx = value,
                                    b"cy" => geometry.cy = value,
                                    _ => {},
                                }
                            }
                        },
                        _ => {},
                    }
                },
                Ok(Event::End(ref e)) => {
                    if in_xfrm && e.local_name().as_ref() == b"xfrm" {
                        break;
                    }
                },
                Ok(Event::Eof) => break,
                Err(_) => break,
                _ => {},
            }
        }

        self.geometry = Some(geometry);
        Ok(())
    }

    /// Get the shape's solid-fill color as raw hex (e.g. "FF0000"), if any.
    ///
    /// Only a `solidFill/srgbClr` directly inside the shape's own
    /// `spPr`/`grpSpPr` counts: outline fills (`a:ln`) sit one level deeper
    /// and text fills sit in `txBody`, and neither is the shape fill. Theme
    /// colors (schemeClr) are unresolvable here and yield None.
    pub fn solid_fill_color(&self) -> Option<String> {
        let mut reader = Reader::from_reader(&self.xml_bytes[..]);
        reader.config_mut().trim_text(true);

        let mut depth = 0usize;
        let mut props_depth: Option<usize> = None;
        let mut in_fill = false;

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => {
                    depth += 1;
                    match e.local_name().as_ref() {
                        b"spPr" | b"grpSpPr" if props_depth.is_none() => {
                            props_depth = Some(depth);
                        },
                        b"solidFill" if props_depth.is_some_and(|d| depth == d + 1) => {
                            in_fill = true;
                        },
                        b"srgbClr" if in_fill => return srgb_val(e),
                        _ => {},
                    }
                },
                Ok(Event::Empty(ref e)) => {
                    if in_fill && e.local_name().as_ref() == b"srgbClr" {
                        return srgb_val(e);
                    }
                },
                Ok(Event::End(ref e)) => {
                    match e.local_name().as_ref() {
                        b"solidFill" => in_fill = false,
                        b"spPr" | b"grpSpPr" if props_depth == Some(depth) => {
                            // End of the shape's own property block; any
                            // later solidFill belongs to something else
                            return None;
                        },
                        _ => {},
                    }
                    depth = depth.saturating_sub(1);
                },
                Ok(Event::Eof) => break,
                Err(_) => break,
                _ => {},
            }
        }

        None
    }

    /// Check if this shape carries a text frame.
    pub fn has_text_frame(&self) -> bool {
        matches!(self.kind, ShapeKind::AutoShape | ShapeKind::TextBox)
            && memmem::find(&self.xml_bytes, b"txBody").is_some()
    }

    /// Get the text frame for this shape, if it has one.
    pub fn text_frame(&self) -> Option<TextFrame> {
        if self.has_text_frame() {
            Some(TextFrame::from_xml(&self.xml_bytes))
        } else {
            None
        }
    }

    /// Get the relationship ID of the embedded image, from
    /// `<a:blip r:embed="rId..."/>`. Picture shapes only.
    pub fn image_r_id(&self) -> Result<String> {
        let mut reader = Reader::from_reader(&self.xml_bytes[..]);
        reader.config_mut().trim_text(true);

        loop {
            match reader.read_event() {
                Ok(Event::Empty(e)) | Ok(Event::Start(e)) => {
                    if e.local_name().as_ref() == b"blip" {
                        for attr in e.attributes().flatten() {
                            if attr.key.local_name().as_ref() == b"embed" {
                                let rid = std::str::from_utf8(&attr.value)
                                    .map_err(|e| PptxError::Xml(e.to_string()))?;
                                return Ok(rid.to_string());
                            }
                        }
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(PptxError::Xml(e.to_string())),
                _ => {},
            }
        }

        Err(PptxError::PartNotFound(
            "Image relationship not found".to_string(),
        ))
    }

    /// Get the direct child shapes of a group, in document order.
    ///
    /// Non-group shapes have no children.
    pub fn children(&self) -> Result<Vec<BaseShape>> {
        if self.kind != ShapeKind::Group {
            return Ok(Vec::new());
        }
        // The shape's own root element is the first Start event; everything
        // at the level below it is a candidate child
        collect_shapes_impl(&self.xml_bytes, true)
    }

    /// Get raw XML bytes.
    #[inline]
    pub fn xml_bytes(&self) -> &[u8] {
        &self.xml_bytes
    }
}

/// Parse an attribute value as i64, defaulting to 0.
fn attr_i64(value: &[u8]) -> i64 {
    std::str::from_utf8(value)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0)
}

/// Read the val attribute off an srgbClr element.
fn srgb_val(e: &BytesStart<'_>) -> Option<String> {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == b"val" {
            return std::str::from_utf8(&attr.value).ok().map(str::to_string);
        }
    }
    None
}

/// Collect the shapes in a slide's `<p:spTree>`, in document order.
///
/// Each matched element is reconstructed in full (attributes, children,
/// text), so nested shapes inside a group stay inside the group's XML and
/// are not double-collected.
pub(crate) fn collect_shapes(xml: &[u8]) -> Result<Vec<BaseShape>> {
    collect_shapes_impl(xml, false)
}

fn collect_shapes_impl(xml: &[u8], skip_root: bool) -> Result<Vec<BaseShape>> {
    // No trim_text here: the extracted XML must carry text content
    // verbatim, leading and trailing whitespace included
    let mut reader = Reader::from_reader(xml);

    let mut shapes = Vec::new();
    let mut root_pending = skip_root;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                if root_pending {
                    root_pending = false;
                    continue;
                }
                let local = e.local_name();
                if is_shape_tag(local.as_ref()) {
                    let tag = local.as_ref().to_vec();
                    let shape_xml = extract_element_xml(&mut reader, e)?;
                    shapes.push(BaseShape::from_element(shape_xml, &tag));
                }
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(PptxError::Xml(e.to_string())),
            _ => {},
        }
    }

    Ok(shapes)
}

#[inline]
fn is_shape_tag(local: &[u8]) -> bool {
    matches!(
        local,
        b"sp" | b"pic" | b"grpSp" | b"graphicFrame" | b"cxnSp"
    )
}

/// Reconstruct the complete XML of the element whose Start event was just
/// consumed.
fn extract_element_xml(reader: &mut Reader<&[u8]>, start: &BytesStart<'_>) -> Result<Vec<u8>> {
    let mut xml = Vec::new();
    write_start_tag(&mut xml, start, false);

    let mut depth = 1;
    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                depth += 1;
                write_start_tag(&mut xml, e, false);
            },
            Ok(Event::Empty(ref e)) => {
                write_start_tag(&mut xml, e, true);
            },
            Ok(Event::Text(e)) => {
                xml.extend_from_slice(e.as_ref());
            },
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

    Err(PptxError::Xml("Unexpected end of shape XML".to_string()))
}

fn write_start_tag(xml: &mut Vec<u8>, e: &BytesStart<'_>, self_closing: bool) {
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
