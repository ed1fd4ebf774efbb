//! Browser abstraction.
//!
//! Defines the `Browser` and `Tab` traits the pipeline drives, so the
//! orchestration does not depend on a specific automation binding. The
//! Chromium implementation lives in [`chromium`].

pub mod chromium;
#[cfg(test)]
pub mod fake;

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;

pub use chromium::ChromiumBrowser;

/// A running browser that can open isolated tabs.
#[async_trait]
pub trait Browser: Send + Sync {
    /// Open a new tab on `about:blank`.
    async fn open_tab(&self) -> Result<Box<dyn Tab>>;

    /// Shut the browser down.
    async fn close(&self) -> Result<()>;
}

/// A single browser tab.
#[async_trait]
pub trait Tab: Send + Sync {
    /// Navigate to `url` and wait for the load event, failing after `timeout`.
    async fn navigate(&mut self, url: &str, timeout: Duration) -> Result<()>;

    /// Rendered HTML of the current page.
    async fn content(&self) -> Result<String>;

    /// Current URL after redirects.
    async fn url(&self) -> Result<String>;

    /// Close this tab.
    async fn close(self: Box<Self>) -> Result<()>;
}
