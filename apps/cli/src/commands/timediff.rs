//! `fmap timediff`: evaluate timestamps against a time window.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use filemap_match::TimeWindow;
use std::process::ExitCode;

use crate::config::FilemapConfig;

/// Parse an RFC 3339 timestamp or a count of unix seconds.
fn parse_timestamp(input: &str) -> Result<DateTime<Utc>> {
    if let Ok(seconds) = input.parse::<i64>() {
        return DateTime::from_timestamp(seconds, 0)
            .with_context(|| format!("Unix timestamp out of range: {input}"));
    }

    DateTime::parse_from_rfc3339(input)
        .map(|ts| ts.with_timezone(&Utc))
        .with_context(|| format!("Invalid timestamp: {input}"))
}

/// Execute timediff command
pub fn execute(
    config: &FilemapConfig,
    future: Option<u64>,
    past: Option<u64>,
    timestamps: &[String],
) -> Result<ExitCode> {
    let window = TimeWindow::from_config(&config.timediff_with(future, past))?;
    let now = Utc::now();

    for input in timestamps {
        let timestamp = parse_timestamp(input)?;
        let verdict =
            if window.evaluate_at(timestamp, now).is_match() { "match" } else { "no-match" };
        println!("{input}\t{verdict}");
    }

    Ok(ExitCode::SUCCESS)
}
