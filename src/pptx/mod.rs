//! PowerPoint (.pptx) presentation reading support.
//!
//! This module provides a read-only document model for PresentationML
//! packages, following the python-pptx interface design:
//!
//! - [`Package`]: the overall .pptx file package
//! - [`Presentation`]: presentation-level properties (slide size, slides)
//! - [`Slide`]: one slide's background and shape tree
//! - [`shapes`]: shape, text frame, paragraph, and run types
//!
//! The model is deliberately lazy: each object holds the raw XML bytes of
//! its element and scans them with quick-xml on demand.
//!
//! # Example
//!
//! ```rust,no_run
//! use slidescope::pptx::Package;
//!
//! let pkg = Package::open("deck.pptx")?;
//! let pres = pkg.presentation()?;
//!
//! for slide in pres.slides()? {
//!     for mut shape in slide.shapes()? {
//!         let name = shape.name()?;
//!         println!("{:?}: {}", shape.kind(), name);
//!     }
//! }
//! # Ok::<(), slidescope::pptx::PptxError>(())
//! ```

pub mod error;
pub mod package;
pub mod parts;
pub mod presentation;
pub mod shapes;
pub mod slide;

pub use error::{PptxError, Result};
pub use package::Package;
pub use presentation::Presentation;
pub use shapes::{BaseShape, Paragraph, Run, ShapeKind, TextFrame, TextMargins, VerticalAnchor};
pub use slide::Slide;
