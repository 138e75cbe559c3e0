/// Presentation part - the main part in a .pptx package.
///
/// Corresponds to `/ppt/presentation.xml` in the package.
use crate::opc::part::Part;
use crate::pptx::error::{PptxError, Result};
use quick_xml::Reader;
use quick_xml::events::Event;

/// The main presentation part.
///
/// Contains the presentation-level properties (slide size) and the ordered
/// slide references.
pub struct PresentationPart<'a> {
    /// The underlying OPC part
    part: &'a dyn Part,
}

impl<'a> PresentationPart<'a> {
    /// Create a PresentationPart from an OPC Part.
    pub fn from_part(part: &'a dyn Part) -> Result<Self> {
        Ok(Self { part })
    }

    /// Get the XML bytes of the presentation.
    #[inline]
    fn xml_bytes(&self) -> &[u8] {
        self.part.blob()
    }

    /// Get the number of slides in the presentation.
    ///
    /// Counts the `<p:sldId>` elements.
    pub fn slide_count(&self) -> Result<usize> {
        Ok(self.slide_rids()?.len())
    }

    /// Get the slide size in EMUs, from the `<p:sldSz>` element.
    ///
    /// Returns None if the slide size is not defined.
    pub fn slide_size(&self) -> Result<Option<(i64, i64)>> {
        let mut reader = Reader::from_reader(self.xml_bytes());
        reader.config_mut().trim_text(true);
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                    if e.local_name().as_ref() == b"sldSz" {
                        let mut cx = None;
                        let mut cy = None;
                        for attr in e.attributes().flatten() {
                            let value = std::str::from_utf8(&attr.value)
                                .map_err(|e| PptxError::Xml(e.to_string()))?;
                            match attr.key.as_ref() {
                                b"cx" => {
                                    cx = Some(value.parse::<i64>().map_err(|e| {
                                        PptxError::Xml(format!("Invalid slide width: {}", e))
                                    })?);
                                },
                                b"cy" => {
                                    cy = Some(value.parse::<i64>().map_err(|e| {
                                        PptxError::Xml(format!("Invalid slide height: {}", e))
                                    })?);
                                },
                                _ => {},
                            }
                        }
                        if let (Some(cx), Some(cy)) = (cx, cy) {
                            return Ok(Some((cx, cy)));
                        }
                        return Ok(None);
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(PptxError::Xml(e.to_string())),
                _ => {},
            }
            buf.clear();
        }

        Ok(None)
    }

    /// Get the relationship IDs of all slides in presentation order.
    ///
    /// The `<p:sldId>` element order inside `<p:sldIdLst>` is the deck
    /// order.
    pub fn slide_rids(&self) -> Result<Vec<String>> {
        let mut reader = Reader::from_reader(self.xml_bytes());
        reader.config_mut().trim_text(true);

        let mut rids = Vec::new();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                    if e.local_name().as_ref() == b"sldId" {
                        for attr in e.attributes().flatten() {
                            // The reference is the r:id attribute; the plain id
                            // attribute holds the slide ID number instead
                            if attr.key.local_name().as_ref() == b"id" {
                                let rid = std::str::from_utf8(&attr.value)
                                    .map_err(|e| PptxError::Xml(e.to_string()))?;
                                if rid.starts_with("rId") {
                                    rids.push(rid.to_string());
                                    break;
                                }
                            }
                        }
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(PptxError::Xml(e.to_string())),
                _ => {},
            }
            buf.clear();
        }

        Ok(rids)
    }

    /// Get the underlying OPC part.
    #[inline]
    pub fn part(&self) -> &'a dyn Part {
        self.part
    }
}
