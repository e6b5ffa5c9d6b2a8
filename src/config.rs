use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::logic::field_sync::InvalidInputPolicy;
use crate::Tab;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub rate_url: String,
    pub rate_pointer: String,
    pub request_timeout_secs: u64,
    pub connectivity_probe_secs: u64,
    pub probe_timeout_secs: u64,
    pub invalid_input: InvalidInputPolicy,
    pub cache_path: Option<PathBuf>,
    pub default_tab: Tab,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rate_url: default_rate_url(),
            rate_pointer: default_rate_pointer(),
            request_timeout_secs: 10,
            connectivity_probe_secs: 15,
            probe_timeout_secs: 3,
            invalid_input: InvalidInputPolicy::default(),
            cache_path: None,
            default_tab: Tab::default(),
        }
    }
}

fn default_rate_url() -> String {
    "https://open.er-api.com/v6/latest/USD".to_string()
}

fn default_rate_pointer() -> String {
    "/rates/IDR".to_string()
}

impl Config {
    /// Parse a YAML document; missing keys take their defaults
    pub fn from_yaml(text: &str) -> Result<Self> {
        // An empty file deserializes to unit, not to an empty mapping
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(text).context("Invalid config file")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_yaml(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if self.rate_url.trim().is_empty() {
            bail!("rate_url must not be empty");
        }
        if !self.rate_pointer.is_empty() && !self.rate_pointer.starts_with('/') {
            bail!("rate_pointer must be a JSON pointer starting with '/'");
        }
        if self.request_timeout_secs == 0 {
            bail!("request_timeout_secs must be greater than zero");
        }
        if self.connectivity_probe_secs == 0 {
            bail!("connectivity_probe_secs must be greater than zero");
        }
        if self.probe_timeout_secs == 0 {
            bail!("probe_timeout_secs must be greater than zero");
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn probe_interval(&self) -> Duration {
        Duration::from_secs(self.connectivity_probe_secs)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }
}

/// Locate the config file
///
/// An explicit path must exist. Otherwise `<config_dir>/balibuddy/config.yaml`
/// is preferred over `./config.yaml`; `Ok(None)` means run on defaults.
pub fn get_config_path(cli_path: Option<String>) -> Result<Option<PathBuf>> {
    if let Some(path) = cli_path {
        let p = PathBuf::from(&path);
        if p.exists() {
            return Ok(Some(p));
        } else {
            bail!("Config file not found at specified path: {}", path);
        }
    }

    if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join("balibuddy").join("config.yaml");
        if config_path.exists() {
            return Ok(Some(config_path));
        }
    }

    let local_config = PathBuf::from("config.yaml");
    if local_config.exists() {
        return Ok(Some(local_config));
    }

    Ok(None)
}
