//! Page path classification
//!
//! Maps an observed page path to a compact article identifier and the content
//! type the view represents. Paths are matched against [`PATH_RULES`] in order;
//! the first rule whose prefix matches decides how many leading segments are
//! discarded and whether the remaining text embeds an expanded identifier.
//!
//! ```text
//! /content/10/e12345.abstract                         → (e12345, Abstract)
//! /content/elife/10/e12345                            → (e12345, Full)
//! /content/early/2012/10/15/10.7554/eLife.00011       → (e00011, Full)
//! /content/elife/early/2020/01/01/10.7554/eLife.99999/abstract-2 → (e99999, Digest)
//! ```

use super::error::{UnrecognizedPath, UnrecognizedReason};
use super::identifier::{self, strip_prefix_ignore_case};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    Full,
    Abstract,
    Digest,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Full => "full",
            ContentType::Abstract => "abstract",
            ContentType::Digest => "digest",
        }
    }

    /// Map a path suffix to its content type
    ///
    /// `abstract-2` is the digest rendering, not a second abstract.
    pub fn from_suffix(suffix: Option<&str>) -> Option<Self> {
        match suffix {
            None | Some("full") => Some(ContentType::Full),
            Some("abstract") | Some("short") | Some("abstract-1") => {
                Some(ContentType::Abstract)
            }
            Some("abstract-2") => Some(ContentType::Digest),
            Some(_) => None,
        }
    }

    pub fn all() -> [ContentType; 3] {
        [ContentType::Full, ContentType::Abstract, ContentType::Digest]
    }
}

/// What to do with the text left after the leading segments are dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normalization {
    /// Already starts with a compact identifier
    None,
    /// Starts with an expanded identifier that must be reduced to compact form
    ExpandedToCompact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathRule {
    pub name: &'static str,
    /// Lowercase path prefix; empty matches everything
    pub prefix: &'static str,
    /// Number of `/` separators consumed before the article token
    pub segments: usize,
    pub normalization: Normalization,
}

impl PathRule {
    pub fn matches(&self, path: &str) -> bool {
        strip_prefix_ignore_case(path, self.prefix).is_some()
    }

    /// Everything after the consumed segments
    fn tail<'a>(&self, path: &'a str) -> &'a str {
        path.splitn(self.segments + 1, '/').last().unwrap_or(path)
    }
}

/// Ordered most specific first. The last rule always matches.
pub static PATH_RULES: [PathRule; 4] = [
    // /content/early/yyyy/mm/dd/<doi>
    PathRule {
        name: "poa-early",
        prefix: "/content/early/",
        segments: 6,
        normalization: Normalization::ExpandedToCompact,
    },
    // /content/elife/early/yyyy/mm/dd/<doi>
    PathRule {
        name: "poa-elife-early",
        prefix: "/content/elife/early/",
        segments: 7,
        normalization: Normalization::ExpandedToCompact,
    },
    // /content/elife/<volume>/<id>, linked from PDFs
    PathRule {
        name: "elife-volume",
        prefix: "/content/elife/",
        segments: 4,
        normalization: Normalization::None,
    },
    // /content/<volume>/<id>
    PathRule {
        name: "default",
        prefix: "",
        segments: 3,
        normalization: Normalization::None,
    },
];

pub fn select_rule(path: &str) -> &'static PathRule {
    PATH_RULES
        .iter()
        .find(|rule| rule.matches(path))
        .unwrap_or(&PATH_RULES[PATH_RULES.len() - 1])
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedPath {
    /// Lowercased compact identifier
    pub article: String,
    pub content_type: ContentType,
    pub rule: &'static str,
}

/// Classify a page path
///
/// Only an unknown suffix, or an early path without an embedded identifier,
/// fails. A token that merely looks nothing like an identifier is returned as
/// is and left for identifier normalization to reject.
pub fn classify(path: &str) -> Result<ClassifiedPath, UnrecognizedPath> {
    let rule = select_rule(path);
    let tail = rule.tail(path);

    let token = match rule.normalization {
        Normalization::None => tail.to_lowercase(),
        Normalization::ExpandedToCompact => compact_early_tail(tail)
            .ok_or_else(|| {
                UnrecognizedPath::new(
                    path,
                    UnrecognizedReason::UnrecognizedEarlyIdentifier(tail.to_string()),
                )
            })?
            .to_lowercase(),
    };

    let (article, suffix) = match token.find(|c: char| c == '.' || c == '/') {
        Some(idx) => (&token[..idx], Some(&token[idx + 1..])),
        None => (token.as_str(), None),
    };

    let content_type = ContentType::from_suffix(suffix).ok_or_else(|| {
        UnrecognizedPath::new(
            path,
            UnrecognizedReason::UnknownSuffix(suffix.unwrap_or_default().to_string()),
        )
    })?;

    Ok(ClassifiedPath {
        article: article.to_string(),
        content_type,
        rule: rule.name,
    })
}

/// `10.7554/eLife.99999/abstract-2` → `e99999/abstract-2`
fn compact_early_tail(tail: &str) -> Option<String> {
    let (expanded, remainder) = identifier::split_expanded_prefix(tail)?;
    let compact = identifier::to_compact(&expanded).ok()?;
    Some(format!("{}{}", compact, remainder))
}
