//! Slidescope - faithful structural reports for PowerPoint decks
//!
//! This library opens a .pptx presentation, walks every slide's shape tree
//! (descending into nested groups), and reports each visual element it
//! finds: geometry, solid fills, text runs with font attributes, and the
//! salient attributes of SVG payloads embedded in picture shapes.
//!
//! The intended consumer is an automated verification pipeline that diffs
//! generated decks against expected visual properties, so the output comes
//! on two structurally consistent channels: an ordered human-readable
//! transcript and a machine-readable JSON report.
//!
//! # Example - Verifying a deck
//!
//! ```no_run
//! use slidescope::pptx::Package;
//! use slidescope::verify::{verify_deck, write_report};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let path = Path::new("deck.pptx");
//! let pkg = Package::open(path)?;
//!
//! let report = verify_deck(&pkg, path)?;
//! print!("{}", report.transcript);
//!
//! let written = write_report(&report, path)?;
//! println!("Verification report saved to: {}", written.display());
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Walking shapes directly
//!
//! ```no_run
//! use slidescope::pptx::Package;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let pkg = Package::open("deck.pptx")?;
//! let pres = pkg.presentation()?;
//!
//! for slide in pres.slides()? {
//!     for mut shape in slide.shapes()? {
//!         println!("{} at ({}, {})", shape.name()?, shape.left()?, shape.top()?);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

/// Open Packaging Conventions (OPC) package reading
///
/// The ZIP container layer underneath .pptx files: parts, content types,
/// and relationships.
pub mod opc;

/// PPTX document model
///
/// Read-only access to presentations, slides, shapes, and text, following
/// the python-pptx interface design.
pub mod pptx;

/// Deck verification core
///
/// Shape-tree traversal, descriptor extraction, SVG scanning, and report
/// assembly.
pub mod verify;

// Re-export the main entry points for convenience
pub use pptx::Package;
pub use verify::{DeckReport, verify_deck, write_report};
