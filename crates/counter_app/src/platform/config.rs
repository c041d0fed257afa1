use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use counter_engine::{SequenceSettings, SiteParams};
use serde::Deserialize;

use super::logging::LogSettings;

pub(crate) const DEFAULT_CONFIG_FILE: &str = "counter_widget.ron";

#[derive(Debug, thiserror::Error)]
pub(crate) enum ConfigError {
    #[error("failed to read widget config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse widget config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

/// Where the count comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub(crate) enum FetchMode {
    #[default]
    Live,
    Simulated { delay_ms: u64, count: u64 },
    /// Answers after a random delay in `0..=max_delay_ms`.
    Jittered { max_delay_ms: u64, count: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct WidgetConfig {
    pub site: SiteParams,
    #[serde(default)]
    pub fetch_mode: FetchMode,
    #[serde(default)]
    pub minimum_display_ms: Option<u64>,
    #[serde(default)]
    pub settle_delay_ms: Option<u64>,
    #[serde(default = "default_page_has_counter")]
    pub page_has_counter: bool,
    #[serde(default)]
    pub log: LogSettings,
}

fn default_page_has_counter() -> bool {
    true
}

impl WidgetConfig {
    pub fn sequence_settings(&self) -> SequenceSettings {
        let defaults = SequenceSettings::default();
        SequenceSettings {
            minimum_display: self
                .minimum_display_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.minimum_display),
            settle_delay: self
                .settle_delay_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.settle_delay),
        }
    }
}

pub(crate) fn load_config(path: &Path) -> Result<WidgetConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    ron::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
