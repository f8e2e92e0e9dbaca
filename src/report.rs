//! Re-derive article counts from saved reporting API responses
//!
//! Responses are stored one file per day, named `YYYY-MM-DD.json`. Each file is
//! aggregated independently into a [`DailyReport`].

use crate::config::ReportKind;
use crate::metrics_core::{
    ArticleDownloads, ArticleViews, DownloadAggregator, GaResponse, MetricsError,
    PageViewAggregator,
};
use chrono::NaiveDate;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum ReportError {
    Io(std::io::Error),
    Serialization(serde_json::Error),
    Metrics(MetricsError),
}

impl From<std::io::Error> for ReportError {
    fn from(err: std::io::Error) -> Self {
        ReportError::Io(err)
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        ReportError::Serialization(err)
    }
}

impl From<MetricsError> for ReportError {
    fn from(err: MetricsError) -> Self {
        ReportError::Metrics(err)
    }
}

impl std::fmt::Display for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportError::Io(e) => write!(f, "IO error: {}", e),
            ReportError::Serialization(e) => write!(f, "Serialization error: {}", e),
            ReportError::Metrics(e) => write!(f, "Metrics error: {}", e),
        }
    }
}

impl std::error::Error for ReportError {}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportCounts {
    Views(ArticleViews),
    Downloads(ArticleDownloads),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyReport {
    pub source: String,
    /// Parsed from the file stem; `None` when the name is not a date
    pub date: Option<NaiveDate>,
    #[serde(flatten)]
    pub counts: ReportCounts,
}

pub fn date_from_path(path: &Path) -> Option<NaiveDate> {
    let stem = path.file_stem()?.to_str()?;
    NaiveDate::parse_from_str(stem, "%Y-%m-%d").ok()
}

/// Load a saved response from disk
pub fn load_response(path: &Path) -> Result<GaResponse, ReportError> {
    let json = fs::read_to_string(path)?;
    let response = GaResponse::from_json(&json)?;
    log::debug!("Loaded {} rows from {}", response.rows.len(), path.display());
    Ok(response)
}

pub fn aggregate_response(
    response: &GaResponse,
    kind: ReportKind,
) -> Result<ReportCounts, MetricsError> {
    let observations = response.observations()?;
    match kind {
        ReportKind::Views => {
            let mut aggregator = PageViewAggregator::new();
            aggregator.ingest_all(&observations)?;
            Ok(ReportCounts::Views(aggregator.finish()))
        }
        ReportKind::Downloads => {
            let mut aggregator = DownloadAggregator::new();
            for observation in &observations {
                aggregator.ingest(observation)?;
            }
            Ok(ReportCounts::Downloads(aggregator.finish()))
        }
    }
}

pub fn reprocess_file(path: &Path, kind: ReportKind) -> Result<DailyReport, ReportError> {
    let response = load_response(path)?;
    let counts = aggregate_response(&response, kind)?;
    Ok(DailyReport {
        source: path.display().to_string(),
        date: date_from_path(path),
        counts,
    })
}

/// The file itself, or every `*.json` file in the directory sorted by name
pub fn response_files(path: &Path) -> Result<Vec<PathBuf>, ReportError> {
    if !path.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(path)? {
        let file = entry?.path();
        if file.is_file() && file.extension().map_or(false, |ext| ext == "json") {
            files.push(file);
        }
    }
    files.sort();
    Ok(files)
}
