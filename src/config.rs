use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use serde::Deserialize;

use crate::http::connection::DEFAULT_READ_BUFFER_SIZE;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:4221";

/// Runtime configuration, read once at startup and never changed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Address the listener binds to
    pub listen_addr: String,
    /// Base directory for `/files`; file routes answer 404 without one
    pub directory: Option<PathBuf>,
    /// Size of the single read performed per connection
    pub read_buffer_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            directory: None,
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
        }
    }
}

impl Config {
    /// Loads configuration from the process environment.
    ///
    /// `LISTEN`, `FILES_DIR` and `READ_BUFFER_SIZE` override the defaults.
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::load`] but with an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            listen_addr: lookup("LISTEN").unwrap_or(defaults.listen_addr),
            directory: lookup("FILES_DIR")
                .filter(|dir| !dir.is_empty())
                .map(PathBuf::from),
            read_buffer_size: lookup("READ_BUFFER_SIZE")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.read_buffer_size),
        }
    }

    /// Loads configuration from a YAML file. Missing keys take defaults.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Semantic checks that serde cannot express.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.listen_addr.trim().is_empty() {
            bail!("listen_addr must not be empty");
        }
        if self.read_buffer_size == 0 {
            bail!("read_buffer_size must be greater than zero");
        }
        if let Some(dir) = &self.directory {
            if !dir.is_dir() {
                bail!("directory {} does not exist or is not a directory", dir.display());
            }
        }
        Ok(())
    }
}
