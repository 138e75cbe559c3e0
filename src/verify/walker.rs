/// Tree walker and report assembler.
///
/// Drives the whole verification: walks every slide in deck order, hands
/// each top-level shape to the descriptor builder, and collects the
/// per-slide and per-deck aggregates into a DeckReport alongside the
/// human-readable transcript.
use crate::pptx::Package;
use crate::verify::descriptor::{ShapeDescriptor, describe_shape};
use crate::verify::error::Result;
use crate::verify::transcript::Transcript;
use crate::verify::units::emu_to_inches;
use serde::Serialize;
use std::path::Path;

/// Report for one slide: 1-based position, optional solid background
/// color, and the top-level shape descriptors in document order.
#[derive(Debug, Clone, Serialize)]
pub struct SlideReport {
    pub slide_number: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    pub shapes: Vec<ShapeDescriptor>,
}

/// Report for a whole deck.
///
/// Built once per traversal and immutable afterwards. The machine-readable
/// channel is the `slides` array; `transcript` carries the parallel
/// human-readable channel.
#[derive(Debug)]
pub struct DeckReport {
    /// Input path, as given
    pub path: String,
    /// Canvas width in EMUs, if the document defines one
    pub slide_width: Option<i64>,
    /// Canvas height in EMUs, if the document defines one
    pub slide_height: Option<i64>,
    /// Per-slide reports in deck order
    pub slides: Vec<SlideReport>,
    /// The rendered human-readable transcript
    pub transcript: String,
}

impl DeckReport {
    /// Serialize the machine-readable channel: the per-slide array as
    /// pretty JSON with 2-space indentation, non-ASCII preserved.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.slides)
    }
}

/// Walk a deck and assemble its report.
///
/// Traversal is a strict single-threaded depth-first walk in document
/// order: slide order, then shape order, then child order within groups.
/// Shape-level failures are contained inside the descriptor builder; the
/// only errors surfacing here come from reading the presentation-level
/// structures themselves.
pub fn verify_deck(pkg: &Package, path: &Path) -> Result<DeckReport> {
    let pres = pkg.presentation()?;
    let mut transcript = Transcript::new();

    transcript.line(0, format!("=== PPTX Verification: {} ===", path.display()));
    transcript.blank();

    let slide_width = pres.slide_width()?;
    let slide_height = pres.slide_height()?;
    match (slide_width, slide_height) {
        (Some(w), Some(h)) => transcript.line(
            0,
            format!(
                "Slide Size: {:.1}\" x {:.1}\"",
                emu_to_inches(w),
                emu_to_inches(h)
            ),
        ),
        _ => transcript.line(0, "Slide Size: unset"),
    }

    let slides = pres.slides()?;
    transcript.line(0, format!("Number of Slides: {}", slides.len()));
    transcript.blank();

    let mut slide_reports = Vec::with_capacity(slides.len());

    for (idx, slide) in slides.iter().enumerate() {
        let slide_number = idx + 1;
        transcript.line(0, format!("=== Slide {} ===", slide_number));

        let background_color = match slide.background_color() {
            Ok(color) => color,
            Err(e) => {
                log::warn!("unreadable background on slide {}: {}", slide_number, e);
                None
            },
        };
        if let Some(color) = &background_color {
            transcript.line(0, format!("Background Color: #{}", color));
        }

        let mut shapes = match slide.shapes() {
            Ok(shapes) => shapes,
            Err(e) => {
                log::warn!("unreadable shape tree on slide {}: {}", slide_number, e);
                Vec::new()
            },
        };
        transcript.line(0, format!("Shapes: {}", shapes.len()));

        let mut descriptors = Vec::with_capacity(shapes.len());
        for shape in &mut shapes {
            descriptors.push(describe_shape(shape, slide, 0, &mut transcript));
        }
        transcript.blank();

        slide_reports.push(SlideReport {
            slide_number,
            background_color,
            shapes: descriptors,
        });
    }

    Ok(DeckReport {
        path: path.display().to_string(),
        slide_width,
        slide_height,
        slides: slide_reports,
        transcript: transcript.render(),
    })
}
