//! Reprocess configuration from environment variables

use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Views,
    Downloads,
}

impl ReportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::Views => "views",
            ReportKind::Downloads => "downloads",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "views" => Some(ReportKind::Views),
            "downloads" => Some(ReportKind::Downloads),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    MissingVariable(String),
    InvalidValue(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingVariable(var) => {
                write!(f, "{} is not set; point it at a saved response file or directory", var)
            }
            ConfigError::InvalidValue(msg) => write!(f, "Invalid reprocess setting: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Configuration for the reprocess binary
#[derive(Debug, Clone)]
pub struct ReprocessConfig {
    /// Saved response file, or a directory of `*.json` responses
    pub response_path: PathBuf,

    pub kind: ReportKind,

    pub pretty: bool,
}

impl ReprocessConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `GA_RESPONSE_PATH` (required)
    /// - `REPORT_KIND` (default: views)
    /// - `PRETTY_OUTPUT` (default: false)
    pub fn from_env() -> Result<Self, ConfigError> {
        let response_path = env::var("GA_RESPONSE_PATH")
            .map_err(|_| ConfigError::MissingVariable("GA_RESPONSE_PATH".to_string()))?;

        let kind = match env::var("REPORT_KIND") {
            Ok(raw) => ReportKind::from_str(&raw).ok_or_else(|| {
                ConfigError::InvalidValue(format!(
                    "REPORT_KIND must be 'views' or 'downloads', got '{}'",
                    raw
                ))
            })?,
            Err(_) => ReportKind::Views,
        };

        let pretty = match env::var("PRETTY_OUTPUT") {
            Ok(raw) => raw.trim().parse::<bool>().map_err(|_| {
                ConfigError::InvalidValue(format!(
                    "PRETTY_OUTPUT must be true or false, got '{}'",
                    raw
                ))
            })?,
            Err(_) => false,
        };

        Ok(Self {
            response_path: response_path.into(),
            kind,
            pretty,
        })
    }
}
