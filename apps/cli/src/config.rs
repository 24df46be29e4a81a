//! CLI configuration loading.

use anyhow::{Context, Result};
use filemap_core::CacheConfig;
use filemap_match::TimeDiffConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Contents of the `--config` TOML file.
///
/// ```toml
/// [cache]
/// path = "hosts.map"
/// max_line_bytes = 4095
/// advisory_lock = true
///
/// [timediff]
/// future = 300
/// past = 86400
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilemapConfig {
    /// Backing file settings
    #[serde(default)]
    pub cache: Option<CacheConfig>,

    /// Time-window offsets
    #[serde(default)]
    pub timediff: Option<TimeDiffConfig>,
}

impl FilemapConfig {
    /// Load configuration from a TOML file.
    ///
    /// A relative cache path is resolved against the configuration file's
    /// directory.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file {}", path.display()))?;

        let mut config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse configuration file {}", path.display()))?;

        if let Some(cache) = config.cache.as_mut()
            && cache.path.is_relative()
            && let Some(parent) = path.parent()
        {
            cache.path = parent.join(&cache.path);
        }

        Ok(config)
    }

    /// Cache settings for `file`, falling back to the configured cache.
    ///
    /// Loader settings from `[cache]` are kept when only the path is
    /// overridden.
    pub fn cache_for(&self, file: Option<PathBuf>) -> Result<CacheConfig> {
        match (file, &self.cache) {
            (Some(file), Some(cache)) => Ok(CacheConfig { path: file, ..cache.clone() }),
            (Some(file), None) => Ok(CacheConfig::new(file)),
            (None, Some(cache)) => Ok(cache.clone()),
            (None, None) => {
                anyhow::bail!("No backing file given. Pass --file or set [cache].path in --config.")
            }
        }
    }

    /// Time-window offsets with command-line overrides applied.
    pub fn timediff_with(&self, future: Option<u64>, past: Option<u64>) -> TimeDiffConfig {
        let base = self.timediff.unwrap_or_default();
        TimeDiffConfig {
            future: future.unwrap_or(base.future),
            past: past.unwrap_or(base.past),
        }
    }
}
