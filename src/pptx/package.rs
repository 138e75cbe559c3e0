/// Package implementation for PowerPoint presentations.
use crate::opc::OpcPackage;
use crate::opc::constants::content_type as ct;
use crate::pptx::error::{PptxError, Result};
use crate::pptx::parts::PresentationPart;
use crate::pptx::presentation::Presentation;
use std::io::{Read, Seek};
use std::path::Path;

/// A PowerPoint (.pptx) package.
///
/// This is the main entry point for reading PowerPoint presentations. It
/// wraps an OPC package and provides PowerPoint-specific access.
///
/// # Examples
///
/// ```rust,no_run
/// use slidescope::pptx::Package;
///
/// let pkg = Package::open("deck.pptx")?;
/// let pres = pkg.presentation()?;
/// println!("Presentation has {} slides", pres.slide_count()?);
/// # Ok::<(), slidescope::pptx::PptxError>(())
/// ```
pub struct Package {
    /// The underlying OPC package
    opc: OpcPackage,
}

impl Package {
    /// Open a .pptx package from a file path.
    ///
    /// Fails if the file is missing, is not a ZIP archive, or its main part
    /// is not a PresentationML presentation.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let opc = OpcPackage::open(path)?;
        Self::from_opc(opc)
    }

    /// Open a .pptx package from a reader.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let opc = OpcPackage::from_reader(reader)?;
        Self::from_opc(opc)
    }

    fn from_opc(opc: OpcPackage) -> Result<Self> {
        let main_part = opc
            .main_document_part()
            .map_err(|e| PptxError::PartNotFound(format!("main presentation part: {}", e)))?;

        let content_type = main_part.content_type();
        // Support both regular and macro-enabled presentations
        if content_type != ct::PML_PRESENTATION_MAIN && content_type != ct::PML_PRES_MACRO_MAIN {
            return Err(PptxError::InvalidContentType {
                expected: format!("{} or {}", ct::PML_PRESENTATION_MAIN, ct::PML_PRES_MACRO_MAIN),
                got: content_type.to_string(),
            });
        }

        Ok(Self { opc })
    }

    /// Get the main presentation.
    pub fn presentation(&self) -> Result<Presentation<'_>> {
        let main_part = self
            .opc
            .main_document_part()
            .map_err(|e| PptxError::PartNotFound(format!("main presentation part: {}", e)))?;

        let pres_part = PresentationPart::from_part(main_part)?;
        Ok(Presentation::new(pres_part, &self.opc))
    }

    /// Get the underlying OPC package.
    #[inline]
    pub fn opc_package(&self) -> &OpcPackage {
        &self.opc
    }
}
