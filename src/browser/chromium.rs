//! Chromium-family browser driven over CDP with chromiumoxide.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::browser::{Browser, Tab};
use crate::config::BrowserConfig;
use crate::error::{Error, Result};

/// Resolve the executable to launch for `config`.
pub fn resolve_executable(config: &BrowserConfig) -> Result<PathBuf> {
    if let Some(path) = &config.executable {
        if path.exists() {
            return Ok(path.clone());
        }
        return Err(Error::Browser(format!(
            "Configured {} executable not found: {}",
            config.kind,
            path.display()
        )));
    }

    config.kind.find_executable().ok_or_else(|| {
        Error::Browser(format!(
            "{} not found. Install it or set [browser] executable in the config file.",
            config.kind
        ))
    })
}

/// A launched Chromium-family browser.
pub struct ChromiumBrowser {
    browser: Mutex<Option<CdpBrowser>>,
    handler: Mutex<Option<JoinHandle<()>>>,
}

impl ChromiumBrowser {
    /// Launch the browser described by `config`.
    pub async fn launch(config: &BrowserConfig) -> Result<Self> {
        let executable = resolve_executable(config)?;
        tracing::debug!("Launching {} from {}", config.kind, executable.display());

        let mut builder = CdpConfig::builder()
            .chrome_executable(executable)
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions");

        if !config.headless {
            builder = builder.with_head();
        }

        for arg in &config.args {
            builder = builder.arg(arg.as_str());
        }

        let cdp_config = builder
            .build()
            .map_err(|e| Error::Browser(format!("Failed to build browser config: {}", e)))?;

        let (browser, mut handler) = CdpBrowser::launch(cdp_config)
            .await
            .map_err(|e| Error::Browser(format!("Failed to launch {}: {}", config.kind, e)))?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("Browser handler error: {}", e);
                }
            }
        });

        Ok(Self {
            browser: Mutex::new(Some(browser)),
            handler: Mutex::new(Some(handler)),
        })
    }
}

#[async_trait]
impl Browser for ChromiumBrowser {
    async fn open_tab(&self) -> Result<Box<dyn Tab>> {
        let guard = self.browser.lock().await;
        let browser = guard
            .as_ref()
            .ok_or_else(|| Error::Browser("Browser already closed".into()))?;

        let page = browser.new_page("about:blank").await?;
        Ok(Box::new(ChromiumTab { page }))
    }

    async fn close(&self) -> Result<()> {
        let browser = self.browser.lock().await.take();
        let result = match browser {
            Some(mut browser) => {
                let closed = browser.close().await.map(|_| ());
                let _ = browser.wait().await;
                closed.map_err(Error::from)
            }
            None => Ok(()),
        };

        if let Some(handler) = self.handler.lock().await.take() {
            handler.abort();
        }

        result
    }
}

/// One Chromium page.
pub struct ChromiumTab {
    page: Page,
}

#[async_trait]
impl Tab for ChromiumTab {
    async fn navigate(&mut self, url: &str, timeout: Duration) -> Result<()> {
        // goto resolves once the load event fired
        match tokio::time::timeout(timeout, self.page.goto(url)).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => Err(Error::Browser(format!("Navigation to {} failed: {}", url, e))),
            Err(_) => Err(Error::NavigationTimeout {
                url: url.to_string(),
                seconds: timeout.as_secs(),
            }),
        }
    }

    async fn content(&self) -> Result<String> {
        Ok(self.page.content().await?)
    }

    async fn url(&self) -> Result<String> {
        Ok(self.page.url().await?.unwrap_or_default())
    }

    async fn close(self: Box<Self>) -> Result<()> {
        let ChromiumTab { page } = *self;
        page.close().await?;
        Ok(())
    }
}
