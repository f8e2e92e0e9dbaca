//! Per-article page view aggregation, bucketed by content type

use super::classifier::{classify, ContentType};
use super::error::MetricsError;
use super::identifier::to_expanded;
use super::observation::Observation;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ViewCounts {
    pub full: u64,
    pub r#abstract: u64,
    pub digest: u64,
}

impl ViewCounts {
    pub fn get(&self, content_type: ContentType) -> u64 {
        match content_type {
            ContentType::Full => self.full,
            ContentType::Abstract => self.r#abstract,
            ContentType::Digest => self.digest,
        }
    }

    /// Add `count` to one bucket; `None` (and no change) if the bucket would overflow
    pub fn checked_increment(&mut self, content_type: ContentType, count: u64) -> Option<u64> {
        let bucket = match content_type {
            ContentType::Full => &mut self.full,
            ContentType::Abstract => &mut self.r#abstract,
            ContentType::Digest => &mut self.digest,
        };
        *bucket = bucket.checked_add(count)?;
        Some(*bucket)
    }

    /// Sum of all three buckets, saturating at `u64::MAX`
    pub fn total(&self) -> u64 {
        ContentType::all()
            .iter()
            .fold(0u64, |sum, t| sum.saturating_add(self.get(*t)))
    }

    /// Bucket-wise addition; `None` if any bucket would overflow
    pub fn checked_add(&self, other: &ViewCounts) -> Option<ViewCounts> {
        Some(ViewCounts {
            full: self.full.checked_add(other.full)?,
            r#abstract: self.r#abstract.checked_add(other.r#abstract)?,
            digest: self.digest.checked_add(other.digest)?,
        })
    }
}

/// Expanded article identifier → view counts
pub type ArticleViews = BTreeMap<String, ViewCounts>;

/// Folds page path observations into per-article view counts
///
/// One aggregator covers one batch. Partial aggregators built over disjoint
/// shards of a batch can be combined with [`PageViewAggregator::merge`].
#[derive(Debug, Default)]
pub struct PageViewAggregator {
    articles: ArticleViews,
    /// Observations folded in per article
    matched: BTreeMap<String, usize>,
    skipped: usize,
}

impl PageViewAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one observation in
    ///
    /// Unrecognized paths are logged and skipped. A classified identifier that
    /// cannot be expanded, or a count that overflows its bucket, is returned
    /// as an error.
    pub fn ingest(&mut self, observation: &Observation) -> Result<(), MetricsError> {
        let classified = match classify(&observation.label) {
            Ok(classified) => classified,
            Err(unrecognized) => {
                log::warn!(
                    "Skipping unhandled path {:?} ({})",
                    observation.label,
                    unrecognized.reason
                );
                self.skipped += 1;
                return Ok(());
            }
        };

        let article = to_expanded(&classified.article)?;

        log::debug!(
            "{} -> {} {} +{} (rule {})",
            observation.label,
            article,
            classified.content_type.as_str(),
            observation.count,
            classified.rule
        );

        self.articles
            .entry(article.clone())
            .or_default()
            .checked_increment(classified.content_type, observation.count)
            .ok_or_else(|| MetricsError::CountOverflow {
                article: article.clone(),
            })?;
        *self.matched.entry(article).or_insert(0) += 1;
        Ok(())
    }

    pub fn ingest_all<'a, I>(&mut self, observations: I) -> Result<(), MetricsError>
    where
        I: IntoIterator<Item = &'a Observation>,
    {
        for observation in observations {
            self.ingest(observation)?;
        }
        Ok(())
    }

    /// Combine with an aggregator built over another shard of the same batch
    ///
    /// On `CountOverflow` the articles merged before the failing one are
    /// already folded in, so the aggregator should be discarded.
    pub fn merge(&mut self, other: PageViewAggregator) -> Result<(), MetricsError> {
        for (article, counts) in other.articles {
            let current = self.articles.entry(article.clone()).or_default();
            *current = current
                .checked_add(&counts)
                .ok_or_else(|| MetricsError::CountOverflow {
                    article: article.clone(),
                })?;
        }
        for (article, matched) in other.matched {
            *self.matched.entry(article).or_insert(0) += matched;
        }
        self.skipped += other.skipped;
        Ok(())
    }

    /// Rows dropped as unrecognized so far
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Number of observations that matched `article` (expanded form)
    pub fn matched(&self, article: &str) -> usize {
        self.matched.get(article).copied().unwrap_or(0)
    }

    pub fn finish(self) -> ArticleViews {
        log::info!(
            "Aggregated page views for {} articles ({} rows skipped)",
            self.articles.len(),
            self.skipped
        );
        self.articles
    }
}

/// Aggregate `(path, count)` rows as delivered by the reporting API
pub fn path_counts<I, L, C>(rows: I) -> Result<ArticleViews, MetricsError>
where
    I: IntoIterator<Item = (L, C)>,
    L: Into<String>,
    C: AsRef<str>,
{
    let mut aggregator = PageViewAggregator::new();
    for (label, count) in rows {
        let observation = Observation::from_raw(label, count.as_ref())?;
        aggregator.ingest(&observation)?;
    }
    Ok(aggregator.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(path: &str, count: u64) -> Observation {
        Observation::new(path, count)
    }

    #[test]
    fn test_view_counts_increment_and_total() {
        let mut counts = ViewCounts::default();
        assert_eq!(counts.checked_increment(ContentType::Full, 3), Some(3));
        assert_eq!(counts.checked_increment(ContentType::Digest, 2), Some(2));
        assert_eq!(counts.checked_increment(ContentType::Full, 1), Some(4));

        assert_eq!(counts.full, 4);
        assert_eq!(counts.r#abstract, 0);
        assert_eq!(counts.digest, 2);
        assert_eq!(counts.total(), 6);
    }

    #[test]
    fn test_view_counts_merge_is_commutative() {
        let a = ViewCounts { full: 1, r#abstract: 2, digest: 3 };
        let b = ViewCounts { full: 10, r#abstract: 0, digest: 5 };
        assert_eq!(a.checked_add(&b), b.checked_add(&a));
        assert_eq!(
            a.checked_add(&b),
            Some(ViewCounts { full: 11, r#abstract: 2, digest: 8 })
        );
    }

    #[test]
    fn test_view_counts_overflow_leaves_bucket_unchanged() {
        let mut counts = ViewCounts { full: u64::MAX, r#abstract: 0, digest: 0 };
        assert_eq!(counts.checked_increment(ContentType::Full, 1), None);
        assert_eq!(counts.full, u64::MAX);
        assert_eq!(counts.checked_increment(ContentType::Digest, 1), Some(1));
        assert_eq!(counts.total(), u64::MAX);

        let one = ViewCounts { full: 1, r#abstract: 0, digest: 0 };
        assert_eq!(counts.checked_add(&one), None);
    }

    #[test]
    fn test_count_overflow_is_fatal() {
        let max = u64::MAX.to_string();
        let result = path_counts(vec![
            ("/content/10/e12345", max.as_str()),
            ("/content/10/e12345.full", "1"),
        ]);
        assert_eq!(
            result,
            Err(MetricsError::CountOverflow {
                article: "10.7554/eLife.12345".to_string()
            })
        );

        // Different buckets of the same article do not overflow each other
        let views = path_counts(vec![
            ("/content/10/e12345", max.as_str()),
            ("/content/10/e12345.abstract", "1"),
        ])
        .unwrap();
        assert_eq!(views["10.7554/eLife.12345"].full, u64::MAX);
        assert_eq!(views["10.7554/eLife.12345"].r#abstract, 1);
    }

    #[test]
    fn test_merge_overflow_is_fatal() {
        let mut first = PageViewAggregator::new();
        first.ingest(&obs("/content/10/e12345.short", u64::MAX)).unwrap();
        let mut second = PageViewAggregator::new();
        second.ingest(&obs("/content/10/e12345.abstract", 2)).unwrap();

        assert!(matches!(
            first.merge(second),
            Err(MetricsError::CountOverflow { ref article }) if article == "10.7554/eLife.12345"
        ));
    }

    #[test]
    fn test_bare_path_combines_with_full() {
        let views = path_counts(vec![
            ("/content/10/e12345.full", "4"),
            ("/content/10/e12345.abstract", "2"),
            ("/content/10/e12345", "1"),
        ])
        .unwrap();

        assert_eq!(views.len(), 1);
        assert_eq!(
            views["10.7554/eLife.12345"],
            ViewCounts { full: 5, r#abstract: 2, digest: 0 }
        );
    }

    #[test]
    fn test_unrecognized_rows_are_skipped() {
        let mut aggregator = PageViewAggregator::new();
        aggregator
            .ingest_all(&[
                obs("/content/weird/unmatched/path", 5),
                obs("/content/10/e12345.pdf", 9),
                obs("/content/10/e12345", 1),
            ])
            .unwrap();

        assert_eq!(aggregator.skipped(), 2);
        let views = aggregator.finish();
        assert_eq!(views.len(), 1);
        assert_eq!(views["10.7554/eLife.12345"].total(), 1);
    }

    #[test]
    fn test_matched_rows_tracked_per_article() {
        let mut aggregator = PageViewAggregator::new();
        aggregator
            .ingest_all(&[
                obs("/content/10/e12345", 0),
                obs("/content/10/e12345.short", 3),
                obs("/content/3/e00011/abstract-2", 1),
            ])
            .unwrap();

        assert_eq!(aggregator.matched("10.7554/eLife.12345"), 2);
        assert_eq!(aggregator.matched("10.7554/eLife.00011"), 1);
        assert_eq!(aggregator.matched("10.7554/eLife.55555"), 0);
    }

    #[test]
    fn test_zero_count_row_still_creates_record() {
        let views = path_counts(vec![("/content/10/e12345.abstract", "0")]).unwrap();
        assert_eq!(views["10.7554/eLife.12345"], ViewCounts::default());
    }

    #[test]
    fn test_malformed_identifier_is_fatal() {
        let mut aggregator = PageViewAggregator::new();
        let result = aggregator.ingest(&obs("/content/10/not-an-article", 1));
        assert!(matches!(
            result,
            Err(MetricsError::MalformedIdentifier { ref input, .. }) if input == "not-an-article"
        ));
    }

    #[test]
    fn test_malformed_count_is_fatal() {
        let result = path_counts(vec![("/content/10/e12345", "4"), ("/content/10/e12345", "x")]);
        assert!(matches!(result, Err(MetricsError::MalformedCount { .. })));
    }

    #[test]
    fn test_merge_shards() {
        let rows = vec![
            obs("/content/10/e12345.full", 4),
            obs("/content/10/e12345.abstract", 2),
            obs("/content/elife/early/2020/01/01/10.7554/eLife.99999/abstract-2", 3),
            obs("/content/weird/unmatched/path", 5),
            obs("/content/10/e12345", 1),
        ];

        let mut whole = PageViewAggregator::new();
        whole.ingest_all(&rows).unwrap();

        let (left, right) = rows.split_at(2);
        let mut first = PageViewAggregator::new();
        first.ingest_all(left).unwrap();
        let mut second = PageViewAggregator::new();
        second.ingest_all(right).unwrap();
        second.merge(first).unwrap();

        assert_eq!(second.skipped(), whole.skipped());
        assert_eq!(second.matched("10.7554/eLife.12345"), 3);
        assert_eq!(second.finish(), whole.finish());
    }
}
