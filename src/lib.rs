//! Fapello Downloader - download every image and video of a Fapello profile.
//!
//! # Features
//!
//! - Strict profile URL validation
//! - Bounded pagination through the profile's AJAX endpoint
//! - Post discovery and media extraction from rendered pages
//! - Batched concurrent post visits in a Chromium-family browser
//! - Streaming downloads into a per-profile folder
//! - Timestamped event log
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use fapello_downloader::{browser::ChromiumBrowser, events::FileEventLog, Config, FapelloClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let client = FapelloClient::new(&config)?;
//!     let log = FileEventLog::open(Path::new("fapello-downloader.log"))?;
//!     let browser = ChromiumBrowser::launch(&config.browser).await?;
//!
//!     let stats = fapello_downloader::download::run(
//!         &config,
//!         &browser,
//!         &client,
//!         &log,
//!         "https://fapello.com/someuser/",
//!     )
//!     .await?;
//!     println!("{} files downloaded", stats.total_downloaded());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod browser;
pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod events;
pub mod fs;
pub mod media;
pub mod output;
pub mod scrape;

// Re-exports for convenience
pub use api::FapelloClient;
pub use config::{validate_base_url, Config};
pub use download::{run, RunStats};
pub use error::{Error, Result};
pub use media::{MediaItem, MediaKind};
