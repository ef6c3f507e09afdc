/*
[INPUT]:  Optional YAML configuration file + TRACKIT_* environment variables
[OUTPUT]: Parsed and validated board configuration
[POS]:    Configuration layer - API endpoint, sync cadence, session storage
[UPDATE]: When adding new configuration options
*/

use anyhow::{Context, Result, bail};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use trackit_client::{ClientConfig, DEFAULT_BASE_URL};

const ENV_PREFIX: &str = "TRACKIT";
const APP_DIR: &str = "trackit";
const CONFIG_FILE_NAME: &str = "config.yaml";

/// Top-level configuration for the board client
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct BoardConfig {
    pub api: ApiConfig,
    pub sync: SyncConfig,
    pub session: SessionConfig,
}

/// Remote API connection settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the TrackIt backend (routes live under `/api`)
    pub base_url: String,
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

/// Polling cadence
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SyncConfig {
    pub poll_interval_secs: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 30,
        }
    }
}

/// Where the signed-in session is persisted
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Defaults to the platform config directory (`<config_dir>/trackit`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

impl BoardConfig {
    /// Default location of the config file, if the platform has a config directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE_NAME))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, the default path is used when present.
    /// `TRACKIT_<SECTION>__<KEY>` environment variables override file values.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        match path {
            Some(path) => {
                builder = builder.add_source(File::from(path).format(FileFormat::Yaml).required(true));
            }
            None => {
                if let Some(default) = Self::default_path() {
                    builder = builder
                        .add_source(File::from(default).format(FileFormat::Yaml).required(false));
                }
            }
        }
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = builder
            .build()
            .context("read configuration sources")?
            .try_deserialize()
            .context("parse configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a YAML document directly, without environment overrides
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content).context("parse YAML configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let base_url = self.api.base_url.trim();
        if base_url.is_empty() {
            bail!("api.base_url must not be empty");
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            bail!("api.base_url must be an http(s) URL, got {base_url}");
        }
        if self.api.timeout_secs == 0 {
            bail!("api.timeout_secs must be greater than zero");
        }
        if self.sync.poll_interval_secs == 0 {
            bail!("sync.poll_interval_secs must be greater than zero");
        }
        Ok(())
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("serialize configuration")
    }

    /// Write the configuration as YAML, creating parent directories
    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create config directory {}", parent.display()))?;
        }
        std::fs::write(path, self.to_yaml()?)
            .with_context(|| format!("write config file {}", path.display()))
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            timeout: Duration::from_secs(self.api.timeout_secs),
            connect_timeout: Duration::from_secs(self.api.connect_timeout_secs),
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.sync.poll_interval_secs)
    }

    /// Session directory, falling back to `./.trackit-config` when no platform dir exists
    pub fn session_dir(&self) -> PathBuf {
        self.session
            .dir
            .clone()
            .or_else(|| dirs::config_dir().map(|dir| dir.join(APP_DIR)))
            .unwrap_or_else(|| PathBuf::from(".trackit-config"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = BoardConfig::from_yaml("{}").unwrap();
        assert_eq!(config, BoardConfig::default());
        assert_eq!(config.poll_interval(), Duration::from_secs(30));
        assert_eq!(config.client_config().timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_partial_document_merges_with_defaults() {
        let config = BoardConfig::from_yaml(
            "api:\n  base_url: https://trackit.example.com\nsync:\n  poll_interval_secs: 5\n",
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://trackit.example.com");
        assert_eq!(config.api.connect_timeout_secs, 10);
        assert_eq!(config.poll_interval(), Duration::from_secs(5));
    }

    #[test]
    fn test_zero_poll_interval_is_rejected() {
        let err = BoardConfig::from_yaml("sync:\n  poll_interval_secs: 0\n").unwrap_err();
        assert!(err.to_string().contains("poll_interval_secs"));
    }

    #[test]
    fn test_non_http_base_url_is_rejected() {
        assert!(BoardConfig::from_yaml("api:\n  base_url: ftp://host\n").is_err());
    }

    #[test]
    fn test_write_then_load_file() {
        let dir = std::env::temp_dir().join(format!("trackit-config-{}", Uuid::new_v4()));
        let path = dir.join("config.yaml");

        let mut config = BoardConfig::default();
        config.api.base_url = "http://127.0.0.1:9000".to_string();
        config.session.dir = Some(dir.join("session"));
        config.write_to(&path).unwrap();

        let loaded = BoardConfig::load(Some(&path)).unwrap();
        assert_eq!(loaded.api.base_url, "http://127.0.0.1:9000");
        assert_eq!(loaded.session_dir(), dir.join("session"));

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let path = std::env::temp_dir().join(format!("missing-{}.yaml", Uuid::new_v4()));
        assert!(BoardConfig::load(Some(&path)).is_err());
    }
}
