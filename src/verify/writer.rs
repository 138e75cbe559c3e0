/// Report writer.
///
/// Persists the machine-readable channel next to the input deck.
use crate::verify::error::Result;
use crate::verify::walker::DeckReport;
use std::path::{Path, PathBuf};

/// Write the JSON verification report for a deck.
///
/// The report lands at the input path with its extension replaced by
/// `.verification.json` (e.g. `deck.pptx` -> `deck.verification.json`).
/// Returns the written path.
pub fn write_report(report: &DeckReport, input_path: &Path) -> Result<PathBuf> {
    let report_path = input_path.with_extension("verification.json");
    let json = report.to_json()?;
    std::fs::write(&report_path, json)?;
    Ok(report_path)
}
