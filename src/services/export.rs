//! Delimited-text export of the daily table and the summary record.
//! Header rows are the serde field names of [`DailyResult`] and [`PeriodSummary`].

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{AnalysisError, Result};
use crate::models::analysis::{AnalysisReport, DailyResult, PeriodSummary};

pub const DAILY_FILE_NAME: &str = "daily.csv";
pub const SUMMARY_FILE_NAME: &str = "summary.csv";

fn to_csv<T: Serialize>(rows: impl IntoIterator<Item = T>) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    for row in rows {
        wtr.serialize(row)?;
    }
    let bytes = wtr.into_inner().map_err(|e| AnalysisError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| AnalysisError::Export(e.to_string()))
}

pub fn daily_csv(days: &[DailyResult]) -> Result<String> {
    to_csv(days)
}

pub fn summary_csv(summary: &PeriodSummary) -> Result<String> {
    to_csv(std::iter::once(summary))
}

/// Writes `daily.csv` and `summary.csv` into `dir`, creating it if needed.
pub fn write_report(dir: &Path, report: &AnalysisReport) -> Result<(PathBuf, PathBuf)> {
    fs::create_dir_all(dir).map_err(|e| AnalysisError::Export(format!("{}: {}", dir.display(), e)))?;

    let daily_path = dir.join(DAILY_FILE_NAME);
    let summary_path = dir.join(SUMMARY_FILE_NAME);
    for (path, body) in [
        (&daily_path, daily_csv(&report.daily)?),
        (&summary_path, summary_csv(&report.summary)?),
    ] {
        fs::write(path, body).map_err(|e| AnalysisError::Export(format!("{}: {}", path.display(), e)))?;
        tracing::info!("Wrote {}", path.display());
    }
    Ok((daily_path, summary_path))
}
