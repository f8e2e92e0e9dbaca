//! PDF download counts from event labels
//!
//! Labels look like `<identifier>::pdf-article-download`; the identifier is
//! taken as is, with no classification.

use super::error::MetricsError;
use super::observation::Observation;
use std::collections::BTreeMap;

pub const LABEL_DELIMITER: &str = "::";

/// Identifier → downloads
pub type ArticleDownloads = BTreeMap<String, u64>;

pub fn label_identifier(label: &str) -> &str {
    label.split(LABEL_DELIMITER).next().unwrap_or(label)
}

#[derive(Debug, Default)]
pub struct DownloadAggregator {
    downloads: ArticleDownloads,
}

impl DownloadAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ingest(&mut self, observation: &Observation) -> Result<(), MetricsError> {
        let article = label_identifier(&observation.label);
        self.add(article.to_string(), observation.count)
    }

    /// On `CountOverflow` the aggregator should be discarded
    pub fn merge(&mut self, other: DownloadAggregator) -> Result<(), MetricsError> {
        for (article, count) in other.downloads {
            self.add(article, count)?;
        }
        Ok(())
    }

    fn add(&mut self, article: String, count: u64) -> Result<(), MetricsError> {
        let total = self.downloads.entry(article.clone()).or_insert(0);
        *total = total
            .checked_add(count)
            .ok_or(MetricsError::CountOverflow { article })?;
        Ok(())
    }

    pub fn finish(self) -> ArticleDownloads {
        log::info!("Aggregated downloads for {} articles", self.downloads.len());
        self.downloads
    }
}

/// Aggregate `(label, count)` event rows as delivered by the reporting API
pub fn event_counts<I, L, C>(rows: I) -> Result<ArticleDownloads, MetricsError>
where
    I: IntoIterator<Item = (L, C)>,
    L: Into<String>,
    C: AsRef<str>,
{
    let mut aggregator = DownloadAggregator::new();
    for (label, count) in rows {
        aggregator.ingest(&Observation::from_raw(label, count.as_ref())?)?;
    }
    Ok(aggregator.finish())
}
