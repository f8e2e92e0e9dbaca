//! Article usage counts from web analytics reporting rows
//!
//! Page paths are classified into an article identifier and a content type,
//! then folded into per-article `{full, abstract, digest}` counts. Download
//! events are summed per article.

pub mod config;
pub mod metrics_core;
pub mod report;

pub use metrics_core::{
    classify, event_counts, path_counts, to_compact, to_expanded, ArticleDownloads, ArticleViews,
    ContentType, MetricsError, Observation, UnrecognizedPath, ViewCounts,
};
