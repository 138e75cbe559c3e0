//! End-to-end pipeline tests over an in-memory .pptx package.
use slidescope::pptx::Package;
use slidescope::verify::{verify_deck, write_report};
use std::io::{Cursor, Write};
use std::path::Path;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="xml" ContentType="application/xml"/>
    <Default Extension="svg" ContentType="image/svg+xml"/>
    <Default Extension="png" ContentType="image/png"/>
    <Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/>
    <Override PartName="/ppt/slides/slide1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/>
    <Override PartName="/ppt/slides/slide2.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/>
</Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/>
</Relationships>"#;

const PRESENTATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentation xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"
                xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
    <p:sldIdLst>
        <p:sldId id="256" r:id="rId2"/>
        <p:sldId id="257" r:id="rId3"/>
    </p:sldIdLst>
    <p:sldSz cx="12192000" cy="6858000"/>
</p:presentation>"#;

const PRESENTATION_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide1.xml"/>
    <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide2.xml"/>
</Relationships>"#;

/// Slide 1: solid background, a filled text shape, and a two-level group
/// whose deepest child is an SVG picture.
const SLIDE1: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"
       xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main"
       xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <p:cSld>
    <p:bg><p:bgPr><a:solidFill><a:srgbClr val="FFFFFF"/></a:solidFill></p:bgPr></p:bg>
    <p:spTree>
      <p:sp>
        <p:nvSpPr><p:cNvPr id="2" name="Headline"/><p:cNvSpPr/></p:nvSpPr>
        <p:spPr>
          <a:xfrm><a:off x="914400" y="457200"/><a:ext cx="4572000" cy="914400"/></a:xfrm>
          <a:solidFill><a:srgbClr val="FF0000"/></a:solidFill>
        </p:spPr>
        <p:txBody>
          <a:bodyPr anchor="ctr" lIns="91440" tIns="45720" rIns="91440" bIns="45720"/>
          <a:p>
            <a:r>
              <a:rPr lang="en-US" sz="1800" b="1">
                <a:solidFill><a:srgbClr val="00AA00"/></a:solidFill>
                <a:latin typeface="Arial"/>
              </a:rPr>
              <a:t>Quarterly Update</a:t>
            </a:r>
            <a:r><a:rPr/><a:t>   </a:t></a:r>
          </a:p>
        </p:txBody>
      </p:sp>
      <p:grpSp>
        <p:nvGrpSpPr><p:cNvPr id="3" name="Badge Group"/></p:nvGrpSpPr>
        <p:grpSpPr><a:xfrm><a:off x="1828800" y="1828800"/><a:ext cx="1828800" cy="914400"/></a:xfrm></p:grpSpPr>
        <p:sp>
          <p:nvSpPr><p:cNvPr id="4" name="Badge Back"/><p:cNvSpPr/></p:nvSpPr>
          <p:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="914400" cy="914400"/></a:xfrm></p:spPr>
        </p:sp>
        <p:grpSp>
          <p:nvGrpSpPr><p:cNvPr id="5" name="Inner Group"/></p:nvGrpSpPr>
          <p:grpSpPr><a:xfrm><a:off x="914400" y="0"/><a:ext cx="914400" cy="914400"/></a:xfrm></p:grpSpPr>
          <p:pic>
            <p:nvPicPr><p:cNvPr id="6" name="Badge Icon"/><p:cNvPicPr/></p:nvPicPr>
            <p:blipFill><a:blip r:embed="rId7"/><a:stretch><a:fillRect/></a:stretch></p:blipFill>
            <p:spPr><a:xfrm><a:off x="914400" y="0"/><a:ext cx="457200" cy="457200"/></a:xfrm></p:spPr>
          </p:pic>
        </p:grpSp>
      </p:grpSp>
    </p:spTree>
  </p:cSld>
</p:sld>"#;

const SLIDE1_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId7" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="../media/image1.svg"/>
</Relationships>"#;

/// Slide 2: a text box with an unstyled run, a raster picture, and a
/// picture whose image relationship is dangling.
const SLIDE2: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"
       xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main"
       xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <p:cSld>
    <p:spTree>
      <p:sp>
        <p:nvSpPr><p:cNvPr id="2" name="Note Box"/><p:cNvSpPr txBox="1"/></p:nvSpPr>
        <p:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="914400" cy="457200"/></a:xfrm></p:spPr>
        <p:txBody>
          <a:bodyPr/>
          <a:p><a:r><a:t>unstyled text</a:t></a:r></a:p>
        </p:txBody>
      </p:sp>
      <p:pic>
        <p:nvPicPr><p:cNvPr id="3" name="Photo"/><p:cNvPicPr/></p:nvPicPr>
        <p:blipFill><a:blip r:embed="rId4"/></p:blipFill>
        <p:spPr><a:xfrm><a:off x="914400" y="914400"/><a:ext cx="1828800" cy="1828800"/></a:xfrm></p:spPr>
      </p:pic>
      <p:pic>
        <p:nvPicPr><p:cNvPr id="4" name="Ghost"/><p:cNvPicPr/></p:nvPicPr>
        <p:blipFill><a:blip r:embed="rId99"/></p:blipFill>
        <p:spPr><a:xfrm><a:off x="0" y="914400"/><a:ext cx="457200" cy="457200"/></a:xfrm></p:spPr>
      </p:pic>
    </p:spTree>
  </p:cSld>
</p:sld>"#;

const SLIDE2_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId4" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="../media/image2.png"/>
</Relationships>"#;

const BADGE_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="50" fill="#ffffff">
<rect x="1" y="1" width="98" height="48" fill="none" stroke="#ff0000" stroke-width="2"/>
</svg>"##;

const PNG_BYTES: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

fn build_test_deck() -> Vec<u8> {
    let mut zip_data = Vec::new();
    {
        let cursor = Cursor::new(&mut zip_data);
        let mut writer = ZipWriter::new(cursor);
        let options = SimpleFileOptions::default();

        let text_members = [
            ("[Content_Types].xml", CONTENT_TYPES),
            ("_rels/.rels", ROOT_RELS),
            ("ppt/presentation.xml", PRESENTATION),
            ("ppt/_rels/presentation.xml.rels", PRESENTATION_RELS),
            ("ppt/slides/slide1.xml", SLIDE1),
            ("ppt/slides/_rels/slide1.xml.rels", SLIDE1_RELS),
            ("ppt/slides/slide2.xml", SLIDE2),
            ("ppt/slides/_rels/slide2.xml.rels", SLIDE2_RELS),
            ("ppt/media/image1.svg", BADGE_SVG),
        ];
        for (name, content) in text_members {
            writer.start_file(name, options).unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }

        writer.start_file("ppt/media/image2.png", options).unwrap();
        writer.write_all(PNG_BYTES).unwrap();

        writer.finish().unwrap();
    }
    zip_data
}

fn open_test_deck() -> Package {
    Package::from_reader(Cursor::new(build_test_deck())).unwrap()
}

#[test]
fn test_deck_headers_and_slide_order() {
    let pkg = open_test_deck();
    let report = verify_deck(&pkg, Path::new("deck.pptx")).unwrap();

    assert_eq!(report.slide_width, Some(12_192_000));
    assert_eq!(report.slide_height, Some(6_858_000));
    assert_eq!(report.slides.len(), 2);
    assert_eq!(report.slides[0].slide_number, 1);
    assert_eq!(report.slides[1].slide_number, 2);
    assert_eq!(report.slides[0].background_color.as_deref(), Some("FFFFFF"));
    assert_eq!(report.slides[1].background_color, None);

    let lines: Vec<&str> = report.transcript.lines().collect();
    assert_eq!(lines[0], "=== PPTX Verification: deck.pptx ===");
    assert!(lines.contains(&"Slide Size: 13.3\" x 7.5\""));
    assert!(lines.contains(&"Number of Slides: 2"));
    assert!(lines.contains(&"=== Slide 1 ==="));
    assert!(lines.contains(&"Background Color: #FFFFFF"));
    assert!(lines.contains(&"=== Slide 2 ==="));
}

#[test]
fn test_shape_descriptors_and_text_runs() {
    let pkg = open_test_deck();
    let report = verify_deck(&pkg, Path::new("deck.pptx")).unwrap();

    let headline = &report.slides[0].shapes[0];
    assert_eq!(headline.kind, "auto-shape");
    assert_eq!(headline.name, "Headline");
    assert_eq!(headline.left, 914_400);
    assert_eq!(headline.fill_color.as_deref(), Some("FF0000"));
    assert_eq!(headline.vertical_anchor, Some("middle"));
    assert_eq!(headline.text_margin_left, Some(91_440));

    // The whitespace-only run is dropped; the styled run survives intact
    assert_eq!(headline.runs.len(), 1);
    let run = &headline.runs[0];
    assert_eq!(run.text, "Quarterly Update");
    assert_eq!(run.font_color.as_deref(), Some("00AA00"));
    assert_eq!(run.font_size, Some(18.0));
    assert_eq!(run.font_bold, Some(true));
    assert_eq!(run.font_family.as_deref(), Some("Arial"));

    assert!(report.transcript.contains("  Text: \"Quarterly Update\""));
    assert!(report.transcript.contains("    Font Size: 18.0pt"));
    assert!(report.transcript.contains("    Bold: true"));
}

#[test]
fn test_group_recursion_depth_three() {
    let pkg = open_test_deck();
    let report = verify_deck(&pkg, Path::new("deck.pptx")).unwrap();

    let group = &report.slides[0].shapes[1];
    assert_eq!(group.kind, "group");
    assert_eq!(group.name, "Badge Group");
    assert_eq!(group.shapes.len(), 2);

    assert_eq!(group.shapes[0].name, "Badge Back");
    assert!(group.shapes[0].shapes.is_empty());

    let inner = &group.shapes[1];
    assert_eq!(inner.kind, "group");
    assert_eq!(inner.shapes.len(), 1);
    assert_eq!(inner.shapes[0].kind, "picture");
    assert_eq!(inner.shapes[0].name, "Badge Icon");

    // Transcript indentation follows the nesting depth
    assert!(report.transcript.contains("\n  Group with 2 shapes:"));
    assert!(report.transcript.contains("\n  Shape: Badge Back"));
    assert!(report.transcript.contains("\n    Group with 1 shapes:"));
    assert!(report.transcript.contains("\n    Shape: Badge Icon"));
}

#[test]
fn test_embedded_svg_metadata() {
    let pkg = open_test_deck();
    let report = verify_deck(&pkg, Path::new("deck.pptx")).unwrap();

    let icon = &report.slides[0].shapes[1].shapes[1].shapes[0];
    let svg = icon.svg_info.as_ref().unwrap();
    assert_eq!(svg.fill.as_deref(), Some("#ffffff"));
    assert_eq!(svg.width.as_deref(), Some("100"));
    assert_eq!(svg.height.as_deref(), Some("50"));
    // First occurrences anywhere in the markup: the rect carries the stroke
    assert_eq!(svg.stroke.as_deref(), Some("#ff0000"));
    assert_eq!(svg.stroke_width.as_deref(), Some("2"));
    assert_eq!(svg.rect_count, 1);
    assert!(svg.rects[0].contains("stroke-width=\"2\""));
    assert_eq!(svg.error, None);

    // Raster payloads are silently skipped
    let photo = &report.slides[1].shapes[1];
    assert_eq!(photo.kind, "picture");
    assert!(photo.svg_info.is_none());
    assert!(photo.note.is_none());

    // A dangling image relationship degrades to a note
    let ghost = &report.slides[1].shapes[2];
    assert!(ghost.note.as_deref().unwrap().contains("image unavailable"));
}

#[test]
fn test_missing_fields_stay_absent_in_json() {
    let pkg = open_test_deck();
    let report = verify_deck(&pkg, Path::new("deck.pptx")).unwrap();

    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

    let note_box = &json[1]["shapes"][0];
    assert_eq!(note_box["type"], "text-box");
    assert_eq!(note_box["vertical_anchor"], "unknown");

    let run = &note_box["runs"][0];
    assert_eq!(run["text"], "unstyled text");
    let keys = run.as_object().unwrap();
    assert!(!keys.contains_key("font_size"));
    assert!(!keys.contains_key("font_color"));
    assert!(!keys.contains_key("font_bold"));

    // Unset margins are omitted, not zeroed
    let obj = note_box.as_object().unwrap();
    assert!(!obj.contains_key("text_margin_left"));
    assert!(!obj.contains_key("fill_color"));
}

#[test]
fn test_json_shape_counts_match_transcript() {
    let pkg = open_test_deck();
    let report = verify_deck(&pkg, Path::new("deck.pptx")).unwrap();

    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    let counted: Vec<usize> = report
        .transcript
        .lines()
        .filter_map(|line| line.strip_prefix("Shapes: "))
        .map(|n| n.parse().unwrap())
        .collect();

    let slides = json.as_array().unwrap();
    assert_eq!(counted.len(), slides.len());
    for (slide, count) in slides.iter().zip(counted) {
        assert_eq!(slide["shapes"].as_array().unwrap().len(), count);
    }
}

#[test]
fn test_verification_is_idempotent() {
    let pkg = open_test_deck();
    let first = verify_deck(&pkg, Path::new("deck.pptx")).unwrap();
    let second = verify_deck(&pkg, Path::new("deck.pptx")).unwrap();

    assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
    assert_eq!(first.transcript, second.transcript);
}

#[test]
fn test_report_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let deck_path = dir.path().join("generated.pptx");
    std::fs::write(&deck_path, build_test_deck()).unwrap();

    let pkg = Package::open(&deck_path).unwrap();
    let report = verify_deck(&pkg, &deck_path).unwrap();
    let written = write_report(&report, &deck_path).unwrap();

    assert_eq!(written, dir.path().join("generated.verification.json"));

    let parsed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&written).unwrap()).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 2);
    assert_eq!(parsed[0]["shapes"][0]["name"], "Headline");
}

#[test]
fn test_recursion_cap_contains_deep_nesting() {
    // 40 nested groups, an sp at the bottom, and a normal sibling shape
    let mut tree = String::new();
    for i in 0..40 {
        tree.push_str(&format!(
            r#"<p:grpSp><p:nvGrpSpPr><p:cNvPr id="{}" name="Level {}"/></p:nvGrpSpPr><p:grpSpPr/>"#,
            i + 10,
            i
        ));
    }
    tree.push_str(r#"<p:sp><p:nvSpPr><p:cNvPr id="99" name="Bottom"/></p:nvSpPr><p:spPr/></p:sp>"#);
    for _ in 0..40 {
        tree.push_str("</p:grpSp>");
    }
    let slide = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"
       xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main">
  <p:cSld><p:spTree>{}
    <p:sp><p:nvSpPr><p:cNvPr id="7" name="Survivor"/></p:nvSpPr><p:spPr/></p:sp>
  </p:spTree></p:cSld>
</p:sld>"#,
        tree
    );

    let mut zip_data = Vec::new();
    {
        let cursor = Cursor::new(&mut zip_data);
        let mut writer = ZipWriter::new(cursor);
        let options = SimpleFileOptions::default();
        let members = [
            ("[Content_Types].xml", CONTENT_TYPES),
            ("_rels/.rels", ROOT_RELS),
            (
                "ppt/presentation.xml",
                r#"<?xml version="1.0"?>
<p:presentation xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"
                xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
    <p:sldIdLst><p:sldId id="256" r:id="rId2"/></p:sldIdLst>
    <p:sldSz cx="12192000" cy="6858000"/>
</p:presentation>"#,
            ),
            (
                "ppt/_rels/presentation.xml.rels",
                r#"<?xml version="1.0"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide1.xml"/>
</Relationships>"#,
            ),
            ("ppt/slides/slide1.xml", slide.as_str()),
        ];
        for (name, content) in members {
            writer.start_file(name, options).unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap();
    }

    let pkg = Package::from_reader(Cursor::new(zip_data)).unwrap();
    let report = verify_deck(&pkg, Path::new("deep.pptx")).unwrap();

    // The sibling after the pathological branch is still reported
    assert_eq!(report.slides[0].shapes.len(), 2);
    assert_eq!(report.slides[0].shapes[1].name, "Survivor");

    // Descend to the capped branch: it carries a note and no children
    let mut node = &report.slides[0].shapes[0];
    let mut levels = 1;
    while let Some(child) = node.shapes.first() {
        node = child;
        levels += 1;
    }
    assert!(node.note.as_deref().unwrap().contains("nesting exceeds"));
    assert!(node.shapes.is_empty());
    assert!(levels < 40);
    assert!(report.transcript.contains("nesting exceeds"));
}

#[test]
fn test_open_rejects_non_presentation() {
    let mut zip_data = Vec::new();
    {
        let cursor = Cursor::new(&mut zip_data);
        let mut writer = ZipWriter::new(cursor);
        let options = SimpleFileOptions::default();
        writer.start_file("[Content_Types].xml", options).unwrap();
        writer
            .write_all(br#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/></Types>"#)
            .unwrap();
        writer.start_file("_rels/.rels", options).unwrap();
        writer
            .write_all(br#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"/>"#)
            .unwrap();
        writer.finish().unwrap();
    }

    assert!(Package::from_reader(Cursor::new(zip_data)).is_err());
}
