//! Configuration for the `daikin` tool.
//!
//! A single flat file (TOML, or YAML for `.yaml`/`.yml` paths) layered
//! under `DAIKIN_*` environment variables, translated into the explicit
//! `daikin_core::DiscoveryConfig` and `daikin_api::TransportConfig` values.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml, Yaml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use daikin_api::TransportConfig;
use daikin_core::DiscoveryConfig;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Config struct ───────────────────────────────────────────────────

/// Everything the tool can read from file or environment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Fixed device address; skips discovery when set.
    pub address: Option<String>,

    /// Restrict discovery to this interface.
    pub interface: Option<String>,

    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    #[serde(default = "default_poll_count")]
    pub poll_count: u32,

    /// HTTP request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            address: None,
            interface: None,
            poll_interval_ms: default_poll_interval_ms(),
            poll_count: default_poll_count(),
            timeout: default_timeout(),
        }
    }
}

fn default_poll_interval_ms() -> u64 {
    1000
}
fn default_poll_count() -> u32 {
    1
}
fn default_timeout() -> u64 {
    10
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_ms == 0 && self.poll_count > 0 {
            return Err(ConfigError::Validation {
                field: "poll_interval_ms".into(),
                reason: "must be positive when polling".into(),
            });
        }
        if self.timeout == 0 {
            return Err(ConfigError::Validation {
                field: "timeout".into(),
                reason: "must be at least one second".into(),
            });
        }
        if self.address.as_deref().is_some_and(str::is_empty) {
            return Err(ConfigError::Validation {
                field: "address".into(),
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }

    pub fn discovery_config(&self) -> DiscoveryConfig {
        DiscoveryConfig {
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            poll_count: self.poll_count,
            interface: self.interface.clone(),
            address: self.address.clone(),
            ..DiscoveryConfig::default()
        }
    }

    pub fn transport_config(&self) -> TransportConfig {
        TransportConfig::with_timeout(Duration::from_secs(self.timeout))
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the default config file path via platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("org", "daikin", "daikin").map_or_else(
        || PathBuf::from("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}

// ── Config loading ──────────────────────────────────────────────────

/// Layer defaults, the config file and `DAIKIN_*` variables.
///
/// A missing file is not an error; a malformed one is.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = path.map_or_else(config_path, Path::to_path_buf);

    let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
    figment = if is_yaml(&path) {
        figment.merge(Yaml::file(&path))
    } else {
        figment.merge(Toml::file(&path))
    };
    figment = figment.merge(Env::prefixed("DAIKIN_"));

    let config: Config = figment.extract()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use figment::Jail;

    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        Jail::expect_with(|_jail| {
            let config = load_config(Some(Path::new("absent.toml"))).map_err(|e| e.to_string())?;
            assert_eq!(config, Config::default());
            Ok(())
        });
    }

    #[test]
    fn toml_file_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "daikin.toml",
                r#"
                    interface = "eth0"
                    poll_interval_ms = 250
                    poll_count = 4
                "#,
            )?;
            let config = load_config(Some(Path::new("daikin.toml"))).map_err(|e| e.to_string())?;
            assert_eq!(config.interface.as_deref(), Some("eth0"));
            assert_eq!(config.poll_count, 4);

            let discovery = config.discovery_config();
            assert_eq!(discovery.poll_interval, Duration::from_millis(250));
            assert_eq!(discovery.device_port, 30050);
            Ok(())
        });
    }

    #[test]
    fn yaml_file_is_accepted() {
        Jail::expect_with(|jail| {
            jail.create_file("config.yaml", "address: 192.168.1.40\n")?;
            let config = load_config(Some(Path::new("config.yaml"))).map_err(|e| e.to_string())?;
            assert_eq!(config.address.as_deref(), Some("192.168.1.40"));
            assert_eq!(config.discovery_config().effective_poll_count(), 0);
            Ok(())
        });
    }

    #[test]
    fn environment_wins_over_file() {
        Jail::expect_with(|jail| {
            jail.create_file("daikin.toml", "timeout = 5\npoll_count = 2\n")?;
            jail.set_env("DAIKIN_TIMEOUT", "30");
            jail.set_env("DAIKIN_POLL_INTERVAL_MS", "500");
            let config = load_config(Some(Path::new("daikin.toml"))).map_err(|e| e.to_string())?;
            assert_eq!(config.timeout, 30);
            assert_eq!(config.poll_count, 2);
            assert_eq!(config.poll_interval_ms, 500);
            assert_eq!(config.transport_config().timeout, Duration::from_secs(30));
            Ok(())
        });
    }

    #[test]
    fn zero_timeout_is_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file("daikin.toml", "timeout = 0\n")?;
            let err = load_config(Some(Path::new("daikin.toml"))).unwrap_err();
            assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "timeout"));
            Ok(())
        });
    }

    #[test]
    fn malformed_file_is_an_error() {
        Jail::expect_with(|jail| {
            jail.create_file("daikin.toml", "poll_count = \"many\"\n")?;
            let err = load_config(Some(Path::new("daikin.toml"))).unwrap_err();
            assert!(matches!(err, ConfigError::Figment(_)));
            Ok(())
        });
    }
}
