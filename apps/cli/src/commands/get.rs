//! `fmap get`: key lookups.

use anyhow::{Context, Result};
use filemap_core::FileMap;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::config::FilemapConfig;

/// Execute get command
pub fn execute(
    config: &FilemapConfig,
    file: Option<PathBuf>,
    keys: &[String],
    json: bool,
) -> Result<ExitCode> {
    let cache = config.cache_for(file)?;
    let path = cache.path.clone();
    let map = FileMap::open_with(cache)
        .with_context(|| format!("Failed to load {}", path.display()))?;

    let results: Vec<(&str, Option<String>)> =
        keys.iter().map(|key| (key.as_str(), map.get(key))).collect();
    let missing = results.iter().filter(|(_, value)| value.is_none()).count();

    if json {
        let object: serde_json::Map<String, serde_json::Value> = results
            .iter()
            .map(|(key, value)| {
                let value =
                    value.clone().map_or(serde_json::Value::Null, serde_json::Value::String);
                ((*key).to_string(), value)
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&object)?);
    } else {
        for (key, value) in &results {
            match value {
                Some(value) => println!("{value}"),
                None => eprintln!("key not found: {key}"),
            }
        }
    }

    Ok(if missing == 0 { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
