//! Client configuration.
//!
//! Values are layered in this order, later sources winning:
//!
//! 1. built-in defaults,
//! 2. a JSON file at `$KINO_CONFIG_PATH` or `<config_dir>/kino/config.json`,
//! 3. `KINO_API_URL`, `KINO_VIEWER_ID` and `KINO_PROGRESS_INTERVAL_SECS`
//!    from the environment (a `.env` file in the working directory is
//!    loaded first when present).

use std::path::{Path, PathBuf};
use std::time::Duration;

use kino_core::ReporterConfig;
use kino_model::ViewerId;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

pub const CONFIG_PATH_ENV: &str = "KINO_CONFIG_PATH";
pub const API_URL_ENV: &str = "KINO_API_URL";
pub const VIEWER_ID_ENV: &str = "KINO_VIEWER_ID";
pub const PROGRESS_INTERVAL_ENV: &str = "KINO_PROGRESS_INTERVAL_SECS";

const DEFAULT_API_URL: &str = "http://localhost:3000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write config file {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid value `{value}` for {key}")]
    InvalidValue { key: &'static str, value: String },
    #[error("no viewer id configured; set KINO_VIEWER_ID or pass --viewer")]
    MissingViewer,
    #[error("no config directory available on this platform")]
    NoConfigDir,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the remote API, e.g. `https://api.example.com`
    pub api_url: String,
    /// Viewer the client acts on behalf of
    pub viewer_id: Option<String>,
    /// Seconds between progress reports while playing
    pub progress_interval_secs: u64,
    /// Page size used by `browse` when none is given
    pub page_size: usize,
    pub request_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            viewer_id: None,
            progress_interval_secs: 30,
            page_size: kino_core::query::DEFAULT_PAGE_SIZE,
            request_timeout_secs: 30,
        }
    }
}

impl ClientConfig {
    /// Load configuration from `.env`, the config file and the process
    /// environment.
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!(path = %path.display(), "loaded .env");
        }

        let path = std::env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .or_else(Self::default_path);

        let mut config = match path {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// `<config_dir>/kino/config.json`, when the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("kino").join("config.json"))
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        let config = serde_json::from_str(&content).map_err(|source| {
            ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            }
        })?;
        info!(path = %path.display(), "loaded client config");
        Ok(config)
    }

    /// Apply environment-style overrides. `lookup` returns the value of a
    /// variable, or `None` when it is unset.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(API_URL_ENV).filter(|v| !v.trim().is_empty())
        {
            self.api_url = url;
        }
        if let Some(viewer) =
            lookup(VIEWER_ID_ENV).filter(|v| !v.trim().is_empty())
        {
            self.viewer_id = Some(viewer);
        }
        if let Some(raw) = lookup(PROGRESS_INTERVAL_ENV) {
            self.progress_interval_secs =
                raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                    key: PROGRESS_INTERVAL_ENV,
                    value: raw.clone(),
                })?;
        }
        Ok(())
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| write_err(std::io::Error::other(e)))?;
        std::fs::write(path, content).map_err(write_err)
    }

    /// Save to [`ClientConfig::default_path`].
    pub fn save_default(&self) -> Result<PathBuf, ConfigError> {
        let path = Self::default_path().ok_or(ConfigError::NoConfigDir)?;
        self.save(&path)?;
        Ok(path)
    }

    pub fn viewer(&self) -> Result<ViewerId, ConfigError> {
        let raw = self.viewer_id.as_deref().ok_or(ConfigError::MissingViewer)?;
        ViewerId::new(raw).map_err(|_| ConfigError::InvalidValue {
            key: VIEWER_ID_ENV,
            value: raw.to_string(),
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Reporter settings derived from this config.
    pub fn reporter_config(&self) -> ReporterConfig {
        ReporterConfig::with_interval(Duration::from_secs(
            self.progress_interval_secs,
        ))
    }
}
