//! Reprocess Binary - Re-derive article counts from saved responses
//!
//! Reads one saved reporting API response, or a directory of daily
//! `YYYY-MM-DD.json` responses, and writes one JSON line per file to stdout.
//!
//! ## Usage
//!
//! ```bash
//! GA_RESPONSE_PATH=output/views cargo run --release --bin reprocess
//! ```
//!
//! ## Environment Variables
//!
//! - GA_RESPONSE_PATH - Response file or directory (required)
//! - REPORT_KIND - `views` (page paths) or `downloads` (event labels) (default: views)
//! - PRETTY_OUTPUT - Pretty-print each report (default: false)
//! - RUST_LOG - Logging level (optional, default: info)

use ga_metrics::config::ReprocessConfig;
use ga_metrics::report::{reprocess_file, response_files};
use std::io::Write;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let config = ReprocessConfig::from_env()?;

    log::info!("🚀 Starting reprocess");
    log::info!("   Responses: {}", config.response_path.display());
    log::info!("   Report kind: {}", config.kind.as_str());

    let files = response_files(&config.response_path)?;
    if files.is_empty() {
        log::warn!("No response files found in {}", config.response_path.display());
        return Ok(());
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    for file in &files {
        let report = match reprocess_file(file, config.kind) {
            Ok(report) => report,
            Err(e) => {
                log::error!("❌ Failed to reprocess {}: {}", file.display(), e);
                return Err(e.into());
            }
        };

        let json = if config.pretty {
            serde_json::to_string_pretty(&report)?
        } else {
            serde_json::to_string(&report)?
        };
        writeln!(out, "{}", json)?;
    }

    out.flush()?;
    log::info!("✅ Reprocessed {} files", files.len());
    Ok(())
}
