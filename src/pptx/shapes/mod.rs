/// Shape types for PowerPoint slides.
pub mod base;
pub mod textframe;

pub use base::{BaseShape, ShapeKind};
pub use textframe::{Paragraph, Run, TextFrame, TextMargins, VerticalAnchor};
