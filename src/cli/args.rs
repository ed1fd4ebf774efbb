//! Command-line argument definitions using clap.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::{BrowserKind, Config};

/// Fapello profile downloader CLI.
#[derive(Parser, Debug)]
#[command(
    name = "fapello-downloader",
    version,
    about = "Download images and videos from a Fapello profile",
    long_about = "Loads a profile page in a Chromium-family browser, follows its pagination, \
                  visits every post and downloads the images and videos it finds.\n\n\
                  The profile URL must look like https://fapello.com/<profile>/."
)]
pub struct Args {
    /// Profile base URL. Asked interactively when omitted.
    pub url: Option<String>,

    /// Browser to drive. Asked interactively when omitted.
    #[arg(short, long, value_enum)]
    pub browser: Option<BrowserArg>,

    /// Path to the browser executable.
    #[arg(long = "browser-path", env = "FAPELLO_BROWSER_PATH")]
    pub browser_path: Option<PathBuf>,

    /// Base directory for downloads.
    #[arg(short = 'd', long = "directory")]
    pub download_directory: Option<PathBuf>,

    /// Path to configuration file.
    #[arg(short, long, default_value = "fapello.toml")]
    pub config: PathBuf,

    /// Number of posts visited concurrently.
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Page load timeout in seconds.
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Maximum number of pagination requests.
    #[arg(long)]
    pub max_pages: Option<u32>,

    /// File receiving the event log.
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Show the browser window.
    #[arg(long)]
    pub headful: bool,

    /// Hide progress bars.
    #[arg(long, short)]
    pub quiet: bool,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

/// CLI browser argument.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum BrowserArg {
    Brave,
    Chrome,
    Chromium,
    Edge,
}

impl From<BrowserArg> for BrowserKind {
    fn from(arg: BrowserArg) -> Self {
        match arg {
            BrowserArg::Brave => BrowserKind::Brave,
            BrowserArg::Chrome => BrowserKind::Chrome,
            BrowserArg::Chromium => BrowserKind::Chromium,
            BrowserArg::Edge => BrowserKind::Edge,
        }
    }
}

impl Args {
    /// Merge CLI arguments into an existing config, overriding where specified.
    ///
    /// `url` and `browser` are left for the caller, which may prompt for them.
    pub fn merge_into_config(&self, config: &mut Config) {
        if let Some(browser) = self.browser {
            config.browser.kind = browser.into();
        }

        if let Some(path) = &self.browser_path {
            config.browser.executable = Some(path.clone());
        }

        if let Some(dir) = &self.download_directory {
            config.options.download_directory = dir.clone();
        }

        if let Some(batch_size) = self.batch_size {
            config.options.batch_size = batch_size;
        }

        if let Some(timeout) = self.timeout {
            config.options.navigation_timeout_secs = timeout;
        }

        if let Some(max_pages) = self.max_pages {
            config.options.max_pages = max_pages;
        }

        if let Some(log_file) = &self.log_file {
            config.options.log_file = log_file.clone();
        }

        // Boolean flags (only override if set to non-default)
        if self.headful {
            config.browser.headless = false;
        }

        if self.quiet {
            config.options.show_progress = false;
        }
    }
}
