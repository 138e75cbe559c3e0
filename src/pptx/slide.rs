/// Slide object providing access to slide content.
use crate::opc::OpcPackage;
use crate::opc::packuri::PackURI;
use crate::pptx::error::{PptxError, Result};
use crate::pptx::parts::SlidePart;
use crate::pptx::shapes::BaseShape;

/// A slide in a presentation.
///
/// Provides access to the slide's background and its top-level shapes,
/// following the python-pptx interface design.
pub struct Slide<'a> {
    /// The underlying slide part
    part: SlidePart<'a>,
    /// Reference to the OPC package (for resolving embedded media)
    package: &'a OpcPackage,
}

impl<'a> Slide<'a> {
    /// Create a new Slide with a reference to the package.
    #[inline]
    pub(crate) fn new(part: SlidePart<'a>, package: &'a OpcPackage) -> Self {
        Self { part, package }
    }

    /// Get all top-level shapes on this slide, in document order.
    pub fn shapes(&self) -> Result<Vec<BaseShape>> {
        self.part.shapes()
    }

    /// Get the number of top-level shapes on this slide.
    pub fn shape_count(&self) -> Result<usize> {
        Ok(self.shapes()?.len())
    }

    /// Get the slide's solid-fill background color, if it has one with a
    /// resolvable RGB value.
    pub fn background_color(&self) -> Result<Option<String>> {
        self.part.background_color()
    }

    /// Resolve an image relationship of this slide to the raw bytes of the
    /// embedded media part.
    ///
    /// The rId comes from a picture shape's `<a:blip r:embed>`.
    pub fn image_blob(&self, r_id: &str) -> Result<&'a [u8]> {
        let slide_part = self.part.part();
        let target_ref = slide_part.target_ref(r_id)?;

        let base_uri = slide_part.partname().base_uri();
        let target_partname =
            PackURI::from_rel_ref(base_uri, target_ref).map_err(PptxError::InvalidFormat)?;

        let media_part = self.package.get_part(&target_partname)?;
        Ok(media_part.blob())
    }

    /// Get access to the underlying slide part.
    #[inline]
    pub fn part(&self) -> &SlidePart<'a> {
        &self.part
    }
}
