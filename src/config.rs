use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;

/// Configuration for watching a live page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatcherConfig {
    /// Quiet period after the last DOM change before a context is emitted
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// How often the WebDriver host re-reads the page source to detect changes
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,
}

/// Default value for debounce_ms
fn default_debounce_ms() -> u64 {
    1000
}

/// Default value for poll_interval_ms
fn default_poll_interval_ms() -> u64 {
    500
}

/// Default value for webdriver_url
fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            poll_interval_ms: default_poll_interval_ms(),
            webdriver_url: default_webdriver_url(),
        }
    }
}

impl WatcherConfig {
    /// Load configuration from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, Box<dyn Error>> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Override the WebDriver URL with the `WEBDRIVER_URL` environment variable if set
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
            if !webdriver_url.is_empty() {
                self.webdriver_url = webdriver_url;
            }
        }
        self
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = WatcherConfig::default();
        assert_eq!(config.debounce(), Duration::from_millis(1000));
        assert_eq!(config.poll_interval(), Duration::from_millis(500));
        assert_eq!(config.webdriver_url, "http://localhost:4444");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = WatcherConfig::from_json(r#"{ "debounce_ms": 250 }"#).unwrap();
        assert_eq!(config.debounce_ms, 250);
        assert_eq!(config.poll_interval_ms, 500);
        assert_eq!(config.webdriver_url, "http://localhost:4444");
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "webdriver_url": "http://localhost:9515" }}"#).unwrap();

        let config = WatcherConfig::from_file(file.path()).unwrap();
        assert_eq!(config.webdriver_url, "http://localhost:9515");
        assert_eq!(config.debounce_ms, 1000);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(WatcherConfig::from_json("{ nope").is_err());
    }
}
