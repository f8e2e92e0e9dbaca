//! Error taxonomy for path classification and count aggregation

use std::fmt;

/// Why a path was not recognised as article content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnrecognizedReason {
    /// The trailing token carried a suffix outside the known content shapes
    UnknownSuffix(String),
    /// An early/POA path did not embed a well-formed expanded identifier
    UnrecognizedEarlyIdentifier(String),
}

impl fmt::Display for UnrecognizedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnrecognizedReason::UnknownSuffix(suffix) => write!(f, "unknown suffix {:?}", suffix),
            UnrecognizedReason::UnrecognizedEarlyIdentifier(text) => {
                write!(f, "no expanded identifier in early path segment {:?}", text)
            }
        }
    }
}

/// Expected, non-fatal classification failure. Callers log it and drop the row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnrecognizedPath {
    pub path: String,
    pub reason: UnrecognizedReason,
}

impl UnrecognizedPath {
    pub fn new(path: &str, reason: UnrecognizedReason) -> Self {
        Self {
            path: path.to_string(),
            reason,
        }
    }
}

impl fmt::Display for UnrecognizedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognized path {:?}: {}", self.path, self.reason)
    }
}

impl std::error::Error for UnrecognizedPath {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetricsError {
    UnrecognizedPath(UnrecognizedPath),
    /// Identifier outside the compact or expanded domain
    MalformedIdentifier { input: String, expected: &'static str },
    /// Count value that is not a non-negative integer
    MalformedCount { label: String, raw: String },
    /// Folding a count into `article` would exceed `u64::MAX`
    CountOverflow { article: String },
}

impl From<UnrecognizedPath> for MetricsError {
    fn from(err: UnrecognizedPath) -> Self {
        MetricsError::UnrecognizedPath(err)
    }
}

impl fmt::Display for MetricsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricsError::UnrecognizedPath(e) => write!(f, "{}", e),
            MetricsError::MalformedIdentifier { input, expected } => {
                write!(f, "Malformed identifier {:?}: expected {}", input, expected)
            }
            MetricsError::MalformedCount { label, raw } => {
                write!(f, "Malformed count {:?} for {:?}", raw, label)
            }
            MetricsError::CountOverflow { article } => {
                write!(f, "Count overflow for {:?}", article)
            }
        }
    }
}

impl std::error::Error for MetricsError {}
