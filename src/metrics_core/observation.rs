//! Raw reporting API rows normalized into `(label, count)` observations

use super::error::MetricsError;
use serde::Deserialize;

/// One row of a reporting API result: a page path or event label plus its count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub label: String,
    pub count: u64,
}

impl Observation {
    pub fn new(label: impl Into<String>, count: u64) -> Self {
        Self {
            label: label.into(),
            count,
        }
    }

    /// Build an observation from the string count the API delivers
    pub fn from_raw(label: impl Into<String>, raw_count: &str) -> Result<Self, MetricsError> {
        let label = label.into();
        match raw_count.trim().parse::<u64>() {
            Ok(count) => Ok(Self { label, count }),
            Err(_) => Err(MetricsError::MalformedCount {
                label,
                raw: raw_count.to_string(),
            }),
        }
    }
}

/// `[label, count]` pair exactly as it appears in a response body
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawRow(pub String, pub String);

/// The subset of a saved reporting API response this crate reads
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GaResponse {
    /// Absent when the query matched nothing
    #[serde(default)]
    pub rows: Vec<RawRow>,
}

impl GaResponse {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse every row, failing the whole batch on the first malformed count
    pub fn observations(&self) -> Result<Vec<Observation>, MetricsError> {
        self.rows
            .iter()
            .map(|RawRow(label, count)| Observation::from_raw(label.as_str(), count))
            .collect()
    }
}
