//! Metrics Core - Path Classification and Count Aggregation
//!
//! Reduces raw reporting API rows into per-article usage counts.
//!
//! # Architecture
//!
//! ```text
//! GaResponse rows → Observation (label, count)
//!     ↓
//! classify (PATH_RULES, first match wins) → (compact id, ContentType)
//!     ↓
//! to_expanded (e12345 → 10.7554/eLife.12345)
//!     ↓
//! PageViewAggregator → ArticleViews { full, abstract, digest }
//!
//! event labels → DownloadAggregator → ArticleDownloads
//! ```

pub mod classifier;
pub mod downloads;
pub mod error;
pub mod identifier;
pub mod observation;
pub mod views;

pub use classifier::{classify, select_rule, ClassifiedPath, ContentType, PathRule, PATH_RULES};
pub use downloads::{event_counts, ArticleDownloads, DownloadAggregator};
pub use error::{MetricsError, UnrecognizedPath, UnrecognizedReason};
pub use identifier::{to_compact, to_expanded};
pub use observation::{GaResponse, Observation, RawRow};
pub use views::{path_counts, ArticleViews, PageViewAggregator, ViewCounts};
