/// Shape descriptor builder.
///
/// Produces one canonical descriptor per shape and, as a side effect,
/// appends the matching transcript lines at indentation proportional to the
/// shape's nesting depth. Group shapes are descended recursively in
/// document order.
use crate::pptx::{BaseShape, Run, ShapeKind, Slide};
use crate::verify::svg::SvgInfo;
use crate::verify::transcript::Transcript;
use crate::verify::units::{emu_to_inches, emu_to_points};
use serde::Serialize;

/// Hard cap on group nesting depth.
///
/// Authoring tools keep nesting shallow in practice, but nothing in the
/// format forbids a pathological tree. A branch at the cap is recorded with
/// a note and its children are omitted; siblings continue.
pub const MAX_GROUP_DEPTH: usize = 32;

/// One text run's recorded attributes.
///
/// Every attribute the document does not set is omitted from the
/// serialized form, never replaced by a default.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunInfo {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_color: Option<String>,
    /// Font size in points
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_italic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
}

/// The canonical record produced for one shape.
///
/// Geometry and margins are in EMUs; the transcript shows the same values
/// converted to inches. Group descriptors nest their children under
/// `shapes`, mirroring the slide level.
#[derive(Debug, Clone, Serialize)]
pub struct ShapeDescriptor {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub name: String,
    pub left: i64,
    pub top: i64,
    pub width: i64,
    pub height: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical_anchor: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_margin_left: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_margin_top: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_margin_right: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_margin_bottom: Option<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub runs: Vec<RunInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub svg_info: Option<SvgInfo>,
    /// Non-fatal per-shape problem (unreadable payload, nesting cap)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub shapes: Vec<ShapeDescriptor>,
}

/// Build the descriptor for one shape, recursing into groups.
///
/// Never fails: every per-shape problem is contained as an absent field or
/// a note on the descriptor, so one malformed shape cannot invalidate the
/// rest of the report.
pub fn describe_shape(
    shape: &mut BaseShape,
    slide: &Slide<'_>,
    depth: usize,
    transcript: &mut Transcript,
) -> ShapeDescriptor {
    let kind = *shape.kind();
    let name = shape.name().unwrap_or_default();
    let left = shape.left().unwrap_or(0);
    let top = shape.top().unwrap_or(0);
    let width = shape.width().unwrap_or(0);
    let height = shape.height().unwrap_or(0);

    transcript.line(depth, format!("Shape: {}", name));
    transcript.line(
        depth,
        format!(
            "  Position: ({:.2}\", {:.2}\")",
            emu_to_inches(left),
            emu_to_inches(top)
        ),
    );
    transcript.line(
        depth,
        format!(
            "  Size: {:.2}\" x {:.2}\"",
            emu_to_inches(width),
            emu_to_inches(height)
        ),
    );

    let mut descriptor = ShapeDescriptor {
        kind: kind.as_str(),
        name,
        left,
        top,
        width,
        height,
        fill_color: None,
        vertical_anchor: None,
        text_margin_left: None,
        text_margin_top: None,
        text_margin_right: None,
        text_margin_bottom: None,
        runs: Vec::new(),
        svg_info: None,
        note: None,
        shapes: Vec::new(),
    };

    if let Some(color) = shape.solid_fill_color() {
        transcript.line(depth, format!("  Fill Color: #{}", color));
        descriptor.fill_color = Some(color);
    }

    if let Some(frame) = shape.text_frame() {
        record_text_frame(&frame, &mut descriptor, depth, transcript);
    }

    if kind == ShapeKind::Picture {
        record_picture(shape, slide, &mut descriptor, depth, transcript);
    }

    if kind == ShapeKind::Group {
        record_group(shape, slide, &mut descriptor, depth, transcript);
    }

    descriptor
}

/// Record text-frame attributes and one RunInfo per non-empty run.
fn record_text_frame(
    frame: &crate::pptx::TextFrame,
    descriptor: &mut ShapeDescriptor,
    depth: usize,
    transcript: &mut Transcript,
) {
    let anchor = frame.vertical_anchor();
    let margins = frame.margins();

    transcript.line(depth, format!("  Vertical Anchor: {}", anchor.as_str()));
    transcript.line(
        depth,
        format!(
            "  Text Margins: left={} top={} right={} bottom={}",
            margin_display(margins.left),
            margin_display(margins.top),
            margin_display(margins.right),
            margin_display(margins.bottom)
        ),
    );

    descriptor.vertical_anchor = Some(anchor.as_str());
    descriptor.text_margin_left = margins.left;
    descriptor.text_margin_top = margins.top;
    descriptor.text_margin_right = margins.right;
    descriptor.text_margin_bottom = margins.bottom;

    let paragraphs = match frame.paragraphs() {
        Ok(paragraphs) => paragraphs,
        Err(e) => {
            log::warn!("unreadable text frame on shape '{}': {}", descriptor.name, e);
            descriptor.note = Some(format!("text frame unreadable: {}", e));
            return;
        },
    };

    for paragraph in &paragraphs {
        let runs = match paragraph.runs() {
            Ok(runs) => runs,
            Err(e) => {
                log::warn!("unreadable paragraph on shape '{}': {}", descriptor.name, e);
                continue;
            },
        };
        for run in runs {
            if run.text.trim().is_empty() {
                continue;
            }
            descriptor.runs.push(record_run(run, depth, transcript));
        }
    }
}

fn record_run(run: Run, depth: usize, transcript: &mut Transcript) -> RunInfo {
    transcript.line(depth, format!("  Text: \"{}\"", run.text));

    if let Some(color) = &run.color {
        transcript.line(depth, format!("    Font Color: #{}", color));
    }
    let size = run.size.map(emu_to_points);
    match size {
        Some(points) => transcript.line(depth, format!("    Font Size: {:.1}pt", points)),
        None => transcript.line(depth, "    Font Size: default"),
    }
    transcript.line(depth, format!("    Bold: {}", flag_display(run.bold)));
    transcript.line(depth, format!("    Italic: {}", flag_display(run.italic)));
    if let Some(family) = &run.family {
        transcript.line(depth, format!("    Font Family: {}", family));
    }

    RunInfo {
        text: run.text,
        font_color: run.color,
        font_size: size,
        font_bold: run.bold,
        font_italic: run.italic,
        font_family: run.family,
    }
}

/// Scan a picture's embedded payload for SVG metadata.
///
/// Payload access failures are contained here: the shape keeps its
/// geometry record and gains a note, and traversal continues.
fn record_picture(
    shape: &BaseShape,
    slide: &Slide<'_>,
    descriptor: &mut ShapeDescriptor,
    depth: usize,
    transcript: &mut Transcript,
) {
    let payload = shape
        .image_r_id()
        .and_then(|r_id| slide.image_blob(&r_id));

    let payload = match payload {
        Ok(payload) => payload,
        Err(e) => {
            log::warn!("image payload unavailable for '{}': {}", descriptor.name, e);
            transcript.line(depth, format!("  Note: image unavailable: {}", e));
            descriptor.note = Some(format!("image unavailable: {}", e));
            return;
        },
    };

    match SvgInfo::scan(payload) {
        Some(info) => {
            record_svg_info(&info, depth, transcript);
            descriptor.svg_info = Some(info);
        },
        None => {
            log::debug!("non-SVG image payload on '{}'", descriptor.name);
        },
    }
}

fn record_svg_info(info: &SvgInfo, depth: usize, transcript: &mut Transcript) {
    transcript.line(depth, "  SVG Info:");
    let attrs = [
        ("fill", &info.fill),
        ("stroke", &info.stroke),
        ("stroke-width", &info.stroke_width),
        ("opacity", &info.opacity),
        ("width", &info.width),
        ("height", &info.height),
    ];
    for (label, value) in attrs {
        if let Some(value) = value {
            transcript.line(depth, format!("    {}: {}", label, value));
        }
    }
    transcript.line(depth, format!("    rects: {}", info.rect_count));
    for (idx, rect) in info.rects.iter().enumerate() {
        transcript.line(depth, format!("    rect[{}]: {}", idx, rect));
    }
    if let Some(error) = &info.error {
        transcript.line(depth, format!("    error: {}", error));
    }
}

/// Descend into a group's children, honoring the nesting cap.
fn record_group(
    shape: &BaseShape,
    slide: &Slide<'_>,
    descriptor: &mut ShapeDescriptor,
    depth: usize,
    transcript: &mut Transcript,
) {
    let mut children = match shape.children() {
        Ok(children) => children,
        Err(e) => {
            log::warn!("unreadable group '{}': {}", descriptor.name, e);
            transcript.line(depth, format!("  Note: group unreadable: {}", e));
            descriptor.note = Some(format!("group unreadable: {}", e));
            return;
        },
    };

    transcript.line(depth, format!("  Group with {} shapes:", children.len()));

    if depth + 1 >= MAX_GROUP_DEPTH {
        let note = format!(
            "group nesting exceeds {} levels; children omitted",
            MAX_GROUP_DEPTH
        );
        log::warn!("'{}': {}", descriptor.name, note);
        transcript.line(depth, format!("  Note: {}", note));
        descriptor.note = Some(note);
        return;
    }

    for child in &mut children {
        descriptor
            .shapes
            .push(describe_shape(child, slide, depth + 1, transcript));
    }
}

fn margin_display(value: Option<i64>) -> String {
    match value {
        Some(emu) => format!("{:.2}\"", emu_to_inches(emu)),
        None => "unset".to_string(),
    }
}

fn flag_display(value: Option<bool>) -> &'static str {
    match value {
        Some(true) => "true",
        Some(false) => "false",
        None => "unset",
    }
}
