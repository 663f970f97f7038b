//! One-page PDF summary of a check-in.

mod encoding;
mod pdf;

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::info;

use crate::checkin::CheckinOutcome;

pub use pdf::generate_report;

/// File name offered for the generated report.
pub const DEFAULT_REPORT_FILE: &str = "CoachLite_Report.pdf";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to build PDF: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

/// Everything the report page shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportData {
    pub trait_score: f64,
    pub harmony_ratio: f64,
    pub stage: String,
    /// Multi-line trait breakdown
    pub trait_summary: String,
}

impl ReportData {
    pub fn from_outcome(outcome: &CheckinOutcome) -> Self {
        Self {
            trait_score: outcome.record.trait_score(),
            harmony_ratio: outcome.record.harmony_ratio(),
            stage: outcome.record.auto_stage().to_string(),
            trait_summary: outcome.breakdown.clone(),
        }
    }
}

/// Render the report and write it to `target_path` atomically.
pub fn write_report(data: &ReportData, target_path: &Path) -> Result<(), ReportError> {
    let bytes = generate_report(data)?;

    let parent = match target_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let mut temp = NamedTempFile::new_in(parent)?;
    temp.write_all(&bytes)?;
    temp.flush()?;
    temp.persist(target_path).map_err(|e| e.error)?;

    info!("Wrote report to {:?} ({} bytes)", target_path, bytes.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_report_creates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("reports").join(DEFAULT_REPORT_FILE);
        let data = ReportData {
            trait_score: 40.0,
            harmony_ratio: 100.0,
            stage: "Stage 4 — Initiative vs. Guilt".to_string(),
            trait_summary: "line one\nline two".to_string(),
        };

        write_report(&data, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }
}
