/// Part wrappers for the PresentationML package parts slidescope reads.
pub mod presentation;
pub mod slide;

pub use presentation::PresentationPart;
pub use slide::SlidePart;
