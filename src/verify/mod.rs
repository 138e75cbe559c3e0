//! Deck verification core.
//!
//! Walks every slide of an opened presentation in document order, builds one
//! [`ShapeDescriptor`] per shape (recursing into groups), scans embedded SVG
//! payloads on picture shapes, and assembles two structurally consistent
//! outputs: an ordered human-readable transcript and a machine-readable
//! per-slide report tree.
//!
//! Failure containment follows one rule: only failing to open the document
//! is fatal. Everything else (an unreadable image payload, an undecodable
//! SVG, an unresolvable theme color, a pathologically deep group) degrades
//! to an absent field, an error field, or a per-shape note, and the walk
//! continues.

pub mod descriptor;
pub mod error;
pub mod svg;
pub mod transcript;
pub mod units;
pub mod walker;
pub mod writer;

pub use descriptor::{MAX_GROUP_DEPTH, RunInfo, ShapeDescriptor, describe_shape};
pub use error::{Result, VerifyError};
pub use svg::SvgInfo;
pub use transcript::Transcript;
pub use units::{emu_to_inches, emu_to_points};
pub use walker::{DeckReport, SlideReport, verify_deck};
pub use writer::write_report;
