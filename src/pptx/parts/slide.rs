/// Slide part.
///
/// Corresponds to `/ppt/slides/slideN.xml` in the package.
use crate::opc::part::Part;
use crate::pptx::error::{PptxError, Result};
use crate::pptx::shapes::BaseShape;
use crate::pptx::shapes::base::collect_shapes;
use quick_xml::Reader;
use quick_xml::events::Event;

/// A slide part.
pub struct SlidePart<'a> {
    /// The underlying OPC part
    part: &'a dyn Part,
}

impl<'a> SlidePart<'a> {
    /// Create a SlidePart from an OPC Part.
    pub fn from_part(part: &'a dyn Part) -> Result<Self> {
        Ok(Self { part })
    }

    /// Get the XML bytes of the slide.
    #[inline]
    fn xml_bytes(&self) -> &[u8] {
        self.part.blob()
    }

    /// Parse and return all top-level shapes on this slide, in document
    /// order.
    pub fn shapes(&self) -> Result<Vec<BaseShape>> {
        collect_shapes(self.xml_bytes())
    }

    /// Get the slide's background color, if it has a solid-fill background
    /// with a resolvable RGB color.
    ///
    /// Scans `<p:bg>` for a `solidFill/srgbClr` pair. Gradient, picture and
    /// pattern backgrounds, and theme (schemeClr) colors, yield None.
    pub fn background_color(&self) -> Result<Option<String>> {
        let mut reader = Reader::from_reader(self.xml_bytes());
        reader.config_mut().trim_text(true);
        let mut buf = Vec::new();

        let mut in_bg = false;
        let mut in_fill = false;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                    match e.local_name().as_ref() {
                        b"bg" => in_bg = true,
                        b"solidFill" if in_bg => in_fill = true,
                        b"srgbClr" if in_fill => {
                            for attr in e.attributes().flatten() {
                                if attr.key.as_ref() == b"val" {
                                    let val = std::str::from_utf8(&attr.value)
                                        .map_err(|e| PptxError::Xml(e.to_string()))?;
                                    return Ok(Some(val.to_string()));
                                }
                            }
                        },
                        _ => {},
                    }
                },
                Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                    b"bg" => return Ok(None),
                    b"solidFill" => in_fill = false,
                    _ => {},
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(PptxError::Xml(e.to_string())),
                _ => {},
            }
            buf.clear();
        }

        Ok(None)
    }

    /// Get the underlying OPC part.
    #[inline]
    pub fn part(&self) -> &'a dyn Part {
        self.part
    }
}
