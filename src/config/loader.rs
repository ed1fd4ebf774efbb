//! Configuration structures and loading logic.

use crate::config::browser::BrowserKind;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub options: OptionsConfig,

    #[serde(default)]
    pub browser: BrowserConfig,
}

/// Download and scraping options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsConfig {
    /// Base directory for downloads. Each profile gets its own subfolder.
    #[serde(default = "default_download_directory")]
    pub download_directory: PathBuf,

    /// File receiving the timestamped event log.
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,

    /// Endpoint serving additional profile pages as HTML fragments.
    #[serde(default = "default_pagination_endpoint")]
    pub pagination_endpoint: String,

    /// Number of posts visited concurrently.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Page load timeout for each browser navigation.
    #[serde(default = "default_navigation_timeout")]
    pub navigation_timeout_secs: u64,

    /// Upper bound on pagination requests per run.
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,

    /// Random delay range `[min, max]` in milliseconds between pagination requests.
    #[serde(default)]
    pub page_delay_ms: [u64; 2],

    /// User agent sent with pagination and download requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Whether to show progress bars.
    #[serde(default = "default_true")]
    pub show_progress: bool,
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            download_directory: default_download_directory(),
            log_file: default_log_file(),
            pagination_endpoint: default_pagination_endpoint(),
            batch_size: default_batch_size(),
            navigation_timeout_secs: default_navigation_timeout(),
            max_pages: default_max_pages(),
            page_delay_ms: [0, 0],
            user_agent: default_user_agent(),
            show_progress: true,
        }
    }
}

/// Browser launch configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Which browser to drive.
    #[serde(default)]
    pub kind: BrowserKind,

    /// Explicit executable path, overriding the per-browser lookup.
    #[serde(default)]
    pub executable: Option<PathBuf>,

    /// Run without a visible window.
    #[serde(default = "default_true")]
    pub headless: bool,

    /// Extra command-line arguments passed to the browser.
    #[serde(default)]
    pub args: Vec<String>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            kind: BrowserKind::default(),
            executable: None,
            headless: true,
            args: Vec::new(),
        }
    }
}

fn default_download_directory() -> PathBuf {
    PathBuf::from("downloads")
}

fn default_log_file() -> PathBuf {
    PathBuf::from("fapello-downloader.log")
}

fn default_pagination_endpoint() -> String {
    "https://fapello.com/ajax/model".to_string()
}

fn default_batch_size() -> usize {
    5
}

fn default_navigation_timeout() -> u64 {
    60
}

fn default_max_pages() -> u32 {
    1000
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36".to_string()
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!("Configuration file not found: {}", path.display()))
            } else {
                Error::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Navigation timeout as a `Duration`.
    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_secs(self.options.navigation_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.options.batch_size, 5);
        assert_eq!(config.navigation_timeout(), Duration::from_secs(60));
        assert_eq!(config.options.download_directory, PathBuf::from("downloads"));
        assert_eq!(
            config.options.pagination_endpoint,
            "https://fapello.com/ajax/model"
        );
        assert!(config.browser.headless);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [options]
            batch_size = 3
            page_delay_ms = [100, 200]

            [browser]
            kind = "brave"
            headless = false
            "#,
        )
        .unwrap();

        assert_eq!(config.options.batch_size, 3);
        assert_eq!(config.options.page_delay_ms, [100, 200]);
        assert_eq!(config.options.max_pages, 1000);
        assert_eq!(config.browser.kind, BrowserKind::Brave);
        assert!(!config.browser.headless);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/fapello.toml")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
