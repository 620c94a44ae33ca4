//! Configuration loading and parsing

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use wavelane_core::memory::{DEFAULT_CLIENT_WIDTH, DEFAULT_TICK_WIDTH};
use wavelane_core::UpdaterConfig;

/// Main application configuration (loaded from a TOML file)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub replay: ReplayConfig,
    #[serde(default)]
    pub updater: UpdaterConfig,
    #[serde(default)]
    pub viewport: ViewportConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReplayConfig {
    pub trace: Option<PathBuf>,
    #[serde(default)]
    pub signals: Vec<String>,
    #[serde(default = "default_buffer_len")]
    pub buffer_len: usize,
    pub output: Option<PathBuf>,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            trace: None,
            signals: Vec::new(),
            buffer_len: default_buffer_len(),
            output: None,
        }
    }
}

fn default_buffer_len() -> usize {
    50
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ViewportConfig {
    #[serde(default = "default_client_width")]
    pub client_width: u32,
    #[serde(default = "default_tick_width")]
    pub tick_width: u32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            client_width: default_client_width(),
            tick_width: default_tick_width(),
        }
    }
}

fn default_client_width() -> u32 {
    DEFAULT_CLIENT_WIDTH
}

fn default_tick_width() -> u32 {
    DEFAULT_TICK_WIDTH
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate(&config).with_context(|| format!("Invalid config file: {:?}", path))?;
    Ok(config)
}

/// Reject settings the replay loop cannot work with
pub fn validate(config: &AppConfig) -> Result<()> {
    if config.replay.buffer_len == 0 {
        bail!("replay.buffer_len must be at least 1");
    }
    if config.viewport.tick_width == 0 {
        bail!("viewport.tick_width must be at least 1");
    }
    Ok(())
}
