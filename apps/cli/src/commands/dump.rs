//! `fmap dump`: print the parsed table.

use anyhow::{Context, Result};
use filemap_core::FileMap;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::config::FilemapConfig;

/// Execute dump command
pub fn execute(config: &FilemapConfig, file: Option<PathBuf>, json: bool) -> Result<ExitCode> {
    let cache = config.cache_for(file)?;
    let path = cache.path.clone();
    let map = FileMap::open_with(cache)
        .with_context(|| format!("Failed to load {}", path.display()))?;

    let entries = map.entries();
    if json {
        let object: serde_json::Map<String, serde_json::Value> =
            entries.into_iter().map(|(k, v)| (k, serde_json::Value::String(v))).collect();
        println!("{}", serde_json::to_string_pretty(&object)?);
    } else {
        for (key, value) in entries {
            println!("{key}: {value}");
        }
    }

    Ok(ExitCode::SUCCESS)
}
