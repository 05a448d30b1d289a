//! Configuration management for Skycast
//!
//! Every setting has a built-in default, so the config file is optional.
//! Command-line flags (and their environment variables) override whatever
//! is loaded here.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ConfigError, Result};

/// Default AT Protocol service
pub const BLUESKY_SOCIAL_URL: &str = "https://bsky.social/";

/// Default Nitter mirror
pub const NITTER_URL: &str = "https://nitter.net/";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub bluesky: BlueskyConfig,
    pub nitter: NitterConfig,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlueskyConfig {
    pub api: String,
}

impl Default for BlueskyConfig {
    fn default() -> Self {
        Self {
            api: BLUESKY_SOCIAL_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NitterConfig {
    pub api: String,
    /// Substring that marks a link back to the mirror inside an item body.
    /// Falls back to the host of `api` when unset.
    pub mirror_host: Option<String>,
}

impl Default for NitterConfig {
    fn default() -> Self {
        Self {
            api: NITTER_URL.to_string(),
            mirror_host: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: concat!("skycast/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Build the HTTP client shared by every request of one command run
    pub fn build_client(&self) -> Result<reqwest::Client> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout())
            .user_agent(&self.user_agent)
            .build()?;
        Ok(client)
    }
}

impl Config {
    /// Load configuration from the default location
    ///
    /// A missing file is not an error; the defaults are returned instead.
    pub fn load() -> Result<Self> {
        match resolve_config_path() {
            Some(path) if path.exists() => Self::load_from_path(&path),
            Some(path) => {
                tracing::debug!("No config file at {}, using defaults", path.display());
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::ParseError)?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}

/// Resolve the configuration file path following the XDG Base Directory layout
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("SKYCAST_CONFIG") {
        return Some(PathBuf::from(shellexpand::tilde(&path).to_string()));
    }

    dirs::config_dir().map(|dir| dir.join("skycast").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.bluesky.api, "https://bsky.social/");
        assert_eq!(config.nitter.api, "https://nitter.net/");
        assert_eq!(config.nitter.mirror_host, None);
        assert_eq!(config.http.timeout(), Duration::from_secs(30));
        assert!(config.http.user_agent.starts_with("skycast/"));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
[nitter]
mirror_host = "nitter.example"

[http]
timeout_secs = 5
"#,
        )
        .unwrap();

        assert_eq!(config.bluesky.api, BLUESKY_SOCIAL_URL);
        assert_eq!(config.nitter.api, NITTER_URL);
        assert_eq!(config.nitter.mirror_host.as_deref(), Some("nitter.example"));
        assert_eq!(config.http.timeout_secs, 5);
        assert_eq!(config.http.user_agent, HttpConfig::default().user_agent);
    }

    #[test]
    fn test_load_from_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[bluesky]\napi = \"https://pds.example.com\"\n").unwrap();

        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config.bluesky.api, "https://pds.example.com");
    }

    #[test]
    fn test_load_from_path_rejects_malformed_toml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[bluesky\napi = ").unwrap();

        let result = Config::load_from_path(&path);
        assert!(matches!(
            result,
            Err(crate::SkycastError::Config(ConfigError::ParseError(_)))
        ));
    }

    #[test]
    #[serial]
    fn test_load_uses_env_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("custom.toml");
        fs::write(&path, "[nitter]\napi = \"https://mirror.example\"\n").unwrap();

        std::env::set_var("SKYCAST_CONFIG", &path);
        let config = Config::load();
        std::env::remove_var("SKYCAST_CONFIG");

        assert_eq!(config.unwrap().nitter.api, "https://mirror.example");
    }

    #[test]
    #[serial]
    fn test_load_missing_file_returns_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("does-not-exist.toml");

        std::env::set_var("SKYCAST_CONFIG", &path);
        let config = Config::load();
        std::env::remove_var("SKYCAST_CONFIG");

        assert_eq!(config.unwrap(), Config::default());
    }

    #[test]
    fn test_build_client() {
        assert!(HttpConfig::default().build_client().is_ok());
    }
}
