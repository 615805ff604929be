//! Configuration management with layered hierarchy

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("'{0}' is not configured (set it in the config file or via the environment)")]
    Missing(&'static str),

    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Connection settings for a Dradis server
///
/// On disk the keys are `dradis_url`, `api_key`, `verify` and
/// `timeout_secs`, the same JSON layout older client configs used.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Base URL of the server, before `/pro/api` (e.g. `https://dradis.example.com`)
    #[serde(rename = "dradis_url", skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// API token shown on the user's profile page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Check TLS certificates (default: true)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verify: Option<bool>,

    /// Request timeout in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Build a configuration directly
    pub fn new(url: impl Into<String>, api_key: impl Into<String>, verify: bool) -> Self {
        Self {
            url: Some(url.into()),
            api_key: Some(api_key.into()),
            verify: Some(verify),
            timeout_secs: None,
        }
    }

    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/dradis/config.yaml)
        if let Some(global) = Self::global_config() {
            config.merge(global);
        }

        // 3. Environment variables
        config.merge(Self::from_env());

        config
    }

    /// Load configuration, letting an explicit file override the global one.
    /// Environment variables still take precedence over both.
    pub fn load_with(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::load());
        };

        let mut config = Self::global_config().unwrap_or_default();
        config.merge(Self::load_from_path(path)?);
        config.merge(Self::from_env());
        Ok(config)
    }

    /// Read a single config file. `.yaml`/`.yml` files are parsed as YAML,
    /// anything else as JSON.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let is_yaml = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yaml") | Some("yml")
        );
        let parsed = if is_yaml {
            serde_yml::from_str::<Config>(&contents).map_err(|e| e.to_string())
        } else {
            serde_json::from_str::<Config>(&contents).map_err(|e| e.to_string())
        };

        parsed.map_err(|message| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Settings taken from `DRADIS_URL`, `DRADIS_API_KEY`, `DRADIS_VERIFY`
    /// and `DRADIS_TIMEOUT`
    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// [`from_env`](Self::from_env) over an arbitrary variable lookup.
    /// Unparseable values are skipped with a warning.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Config {
            url: lookup("DRADIS_URL"),
            api_key: lookup("DRADIS_API_KEY"),
            ..Default::default()
        };
        if let Some(verify) = lookup("DRADIS_VERIFY") {
            config.verify = parse_bool(&verify);
            if config.verify.is_none() {
                tracing::warn!(value = %verify, "ignoring DRADIS_VERIFY: expected true or false");
            }
        }
        if let Some(timeout) = lookup("DRADIS_TIMEOUT") {
            config.timeout_secs = timeout.trim().parse().ok();
            if config.timeout_secs.is_none() {
                tracing::warn!(value = %timeout, "ignoring DRADIS_TIMEOUT: expected whole seconds");
            }
        }
        config
    }

    /// The global config file, if present. A malformed file is skipped
    /// with a warning.
    fn global_config() -> Option<Self> {
        let path = Self::global_config_path()?;
        if !path.exists() {
            return None;
        }
        match Self::load_from_path(&path) {
            Ok(global) => Some(global),
            Err(e) => {
                tracing::warn!("ignoring global config: {}", e);
                None
            }
        }
    }

    /// Get the path to the global config file
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "dradis")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    pub fn merge(&mut self, other: Config) {
        if other.url.is_some() {
            self.url = other.url;
        }
        if other.api_key.is_some() {
            self.api_key = other.api_key;
        }
        if other.verify.is_some() {
            self.verify = other.verify;
        }
        if other.timeout_secs.is_some() {
            self.timeout_secs = other.timeout_secs;
        }
    }

    /// Base URL without a trailing slash
    pub fn url(&self) -> Result<&str, ConfigError> {
        match self.url.as_deref().map(|u| u.trim().trim_end_matches('/')) {
            Some(url) if !url.is_empty() => Ok(url),
            _ => Err(ConfigError::Missing("dradis_url")),
        }
    }

    pub fn api_key(&self) -> Result<&str, ConfigError> {
        match self.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(ConfigError::Missing("api_key")),
        }
    }

    pub fn verify(&self) -> bool {
        self.verify.unwrap_or(true)
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)
    }

    /// Check that everything needed to reach a server is present
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.url()?;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                key: "dradis_url",
                value: url.to_string(),
            });
        }
        self.api_key()?;
        if self.timeout_secs == Some(0) {
            return Err(ConfigError::Invalid {
                key: "timeout_secs",
                value: "0".to_string(),
            });
        }
        Ok(())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"dradis_url": "https://dradis.local/", "api_key": "abc", "verify": false}}"#
        )
        .unwrap();

        let config = Config::load_from_path(file.path()).unwrap();
        assert_eq!(config.url().unwrap(), "https://dradis.local");
        assert_eq!(config.api_key().unwrap(), "abc");
        assert!(!config.verify());
        assert_eq!(config.timeout_secs(), DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_load_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "dradis_url: https://dradis.local").unwrap();
        writeln!(file, "api_key: xyz").unwrap();
        writeln!(file, "timeout_secs: 5").unwrap();

        let config = Config::load_from_path(file.path()).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("xyz"));
        assert!(config.verify());
        assert_eq!(config.timeout_secs(), 5);
    }

    #[test]
    fn test_load_malformed_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, "{{not json").unwrap();
        assert!(matches!(
            Config::load_from_path(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_merge_prefers_other() {
        let mut base = Config::new("https://a", "key-a", true);
        base.merge(Config {
            api_key: Some("key-b".to_string()),
            ..Default::default()
        });
        assert_eq!(base.url.as_deref(), Some("https://a"));
        assert_eq!(base.api_key.as_deref(), Some("key-b"));
        assert!(base.verify());
    }

    #[test]
    fn test_validate_requires_url_and_key() {
        assert!(matches!(
            Config::default().validate(),
            Err(ConfigError::Missing("dradis_url"))
        ));
        assert!(matches!(
            Config::new("https://a", "  ", true).validate(),
            Err(ConfigError::Missing("api_key"))
        ));
        assert!(matches!(
            Config::new("dradis.local", "k", true).validate(),
            Err(ConfigError::Invalid { .. })
        ));
        assert!(Config::new("https://a/", "k", true).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::new("https://a", "k", true);
        config.timeout_secs = Some(0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { key: "timeout_secs", .. })
        ));
    }

    #[test]
    fn test_from_vars() {
        let config = Config::from_vars(|name| match name {
            "DRADIS_URL" => Some("https://env.local".to_string()),
            "DRADIS_VERIFY" => Some("off".to_string()),
            "DRADIS_TIMEOUT" => Some("5".to_string()),
            _ => None,
        });
        assert_eq!(config.url.as_deref(), Some("https://env.local"));
        assert_eq!(config.api_key, None);
        assert!(!config.verify());
        assert_eq!(config.timeout_secs(), 5);
    }

    #[test]
    fn test_from_vars_skips_unparseable_values() {
        let config = Config::from_vars(|name| match name {
            "DRADIS_VERIFY" => Some("maybe".to_string()),
            "DRADIS_TIMEOUT" => Some("soon".to_string()),
            _ => None,
        });
        assert_eq!(config.verify, None);
        assert_eq!(config.timeout_secs, None);
        assert_eq!(config.timeout_secs(), DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("FALSE"), Some(false));
        assert_eq!(parse_bool(" yes "), Some(true));
        assert_eq!(parse_bool("maybe"), None);
    }
}
