/// Main presentation object - the high-level API for working with
/// presentations.
use crate::opc::OpcPackage;
use crate::opc::packuri::PackURI;
use crate::pptx::error::{PptxError, Result};
use crate::pptx::parts::{PresentationPart, SlidePart};
use crate::pptx::slide::Slide;

/// A PowerPoint presentation.
///
/// Not intended to be constructed directly; use `Package::presentation()`.
///
/// # Examples
///
/// ```rust,no_run
/// use slidescope::pptx::Package;
///
/// let pkg = Package::open("deck.pptx")?;
/// let pres = pkg.presentation()?;
///
/// if let (Some(w), Some(h)) = (pres.slide_width()?, pres.slide_height()?) {
///     println!("Slide size: {}x{} EMUs", w, h);
/// }
/// # Ok::<(), slidescope::pptx::PptxError>(())
/// ```
pub struct Presentation<'a> {
    /// The underlying presentation part
    part: PresentationPart<'a>,
    /// Reference to the OPC package for accessing related parts
    package: &'a OpcPackage,
}

impl<'a> Presentation<'a> {
    /// Create a new Presentation.
    #[inline]
    pub(crate) fn new(part: PresentationPart<'a>, package: &'a OpcPackage) -> Self {
        Self { part, package }
    }

    /// Get the number of slides in the presentation.
    pub fn slide_count(&self) -> Result<usize> {
        self.part.slide_count()
    }

    /// Get the slide width in EMUs (English Metric Units).
    ///
    /// Returns None if the slide size is not defined.
    /// 1 EMU = 1/914400 inch.
    pub fn slide_width(&self) -> Result<Option<i64>> {
        Ok(self.part.slide_size()?.map(|(w, _)| w))
    }

    /// Get the slide height in EMUs (English Metric Units).
    ///
    /// Returns None if the slide size is not defined.
    pub fn slide_height(&self) -> Result<Option<i64>> {
        Ok(self.part.slide_size()?.map(|(_, h)| h))
    }

    /// Get all slides in presentation order.
    pub fn slides(&self) -> Result<Vec<Slide<'a>>> {
        let slide_rids = self.part.slide_rids()?;
        let mut slides = Vec::with_capacity(slide_rids.len());

        let pres_part = self.part.part();

        for rid in slide_rids {
            let target_ref = pres_part.target_ref(&rid)?;

            let base_uri = pres_part.partname().base_uri();
            let target_partname =
                PackURI::from_rel_ref(base_uri, target_ref).map_err(PptxError::InvalidFormat)?;
            let related_part = self.package.get_part(&target_partname)?;

            let slide_part = SlidePart::from_part(related_part)?;
            slides.push(Slide::new(slide_part, self.package));
        }

        Ok(slides)
    }

    /// Get access to the underlying presentation part.
    #[inline]
    pub fn part(&self) -> &PresentationPart<'a> {
        &self.part
    }
}
