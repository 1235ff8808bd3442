//! RON configuration for the terminal front end.
//!
//! Every field has a default, so a missing file or a partial file is fine.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use market_engine::ApiSettings;
use market_logging::LogDestination;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogTarget {
    Terminal,
    File,
    Both,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_base_url: String,
    /// Location opened on startup, e.g. `/search?nav=new`.
    pub start_location: String,
    /// Directory for client-local state such as the cart.
    pub store_dir: PathBuf,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_response_bytes: u64,
    pub log_target: LogTarget,
    pub log_file: PathBuf,
    /// Clock tick driving auction countdowns.
    pub tick_millis: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        let api = ApiSettings::default();
        Self {
            api_base_url: api.base_url,
            start_location: "/".to_string(),
            store_dir: PathBuf::from(".marketfront"),
            connect_timeout_secs: api.connect_timeout.as_secs(),
            request_timeout_secs: api.request_timeout.as_secs(),
            max_response_bytes: api.max_bytes,
            log_target: LogTarget::File,
            log_file: PathBuf::from("marketfront.log"),
            tick_millis: 1_000,
        }
    }
}

impl AppConfig {
    /// Loads `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(err) => {
                return Err(err).with_context(|| format!("reading config {}", path.display()))
            }
        };
        ron::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn api_settings(&self) -> ApiSettings {
        ApiSettings {
            base_url: self.api_base_url.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_bytes: self.max_response_bytes,
        }
    }

    pub fn log_destination(&self) -> LogDestination {
        match self.log_target {
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::File => LogDestination::File(self.log_file.clone()),
            LogTarget::Both => LogDestination::Both(self.log_file.clone()),
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_millis.max(100))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let config = AppConfig::load(&temp.path().join("absent.ron")).unwrap();

        assert_eq!(config, AppConfig::default());
        assert_eq!(config.api_settings().request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn partial_file_overrides_named_fields() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("marketfront.ron");
        fs::write(
            &path,
            r#"(api_base_url: "https://shop.example/api/", log_target: Both, tick_millis: 10)"#,
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.api_base_url, "https://shop.example/api/");
        assert_eq!(config.start_location, "/");
        assert_eq!(
            config.log_destination(),
            LogDestination::Both(PathBuf::from("marketfront.log"))
        );
        assert_eq!(config.tick_interval(), Duration::from_millis(100));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("marketfront.ron");
        fs::write(&path, "(api_base_url: 42").unwrap();

        let err = AppConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("parsing config"));
    }
}
