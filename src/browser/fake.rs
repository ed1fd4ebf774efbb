//! Scripted in-process browser for tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::browser::{Browser, Tab};
use crate::error::{Error, Result};

/// How a scripted URL behaves when navigated to.
#[derive(Debug, Clone)]
pub enum FakePage {
    Html(String),
    /// Served after a delay.
    Slow(Duration, String),
    /// Navigation fails with this message.
    Fail(String),
    /// Navigation never completes.
    Hang,
}

/// Tab activity, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabEvent {
    Started(String),
    Settled(String),
}

#[derive(Default)]
struct Shared {
    log: Mutex<Vec<TabEvent>>,
    open_tabs: AtomicUsize,
}

#[derive(Default)]
pub struct FakeBrowser {
    pages: HashMap<String, FakePage>,
    shared: Arc<Shared>,
    fail_open: bool,
    closes: AtomicUsize,
}

impl FakeBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, page: FakePage) -> Self {
        self.pages.insert(url.to_string(), page);
        self
    }

    /// Make every `open_tab` call fail.
    pub fn failing_tabs(mut self) -> Self {
        self.fail_open = true;
        self
    }

    pub fn log(&self) -> Vec<TabEvent> {
        self.shared.log.lock().unwrap().clone()
    }

    pub fn open_tabs(&self) -> usize {
        self.shared.open_tabs.load(Ordering::SeqCst)
    }

    pub fn close_count(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Browser for FakeBrowser {
    async fn open_tab(&self) -> Result<Box<dyn Tab>> {
        if self.fail_open {
            return Err(Error::Browser("cannot open tab".into()));
        }
        self.shared.open_tabs.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeTab {
            pages: self.pages.clone(),
            shared: Arc::clone(&self.shared),
            current: None,
            html: String::new(),
        }))
    }

    async fn close(&self) -> Result<()> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

struct FakeTab {
    pages: HashMap<String, FakePage>,
    shared: Arc<Shared>,
    current: Option<String>,
    html: String,
}

#[async_trait]
impl Tab for FakeTab {
    async fn navigate(&mut self, url: &str, timeout: Duration) -> Result<()> {
        self.shared
            .log
            .lock()
            .unwrap()
            .push(TabEvent::Started(url.to_string()));
        self.current = Some(url.to_string());

        match self.pages.get(url).cloned() {
            Some(FakePage::Html(html)) => {
                self.html = html;
                Ok(())
            }
            Some(FakePage::Slow(delay, html)) => {
                tokio::time::sleep(delay).await;
                self.html = html;
                Ok(())
            }
            Some(FakePage::Fail(message)) => Err(Error::Browser(message)),
            Some(FakePage::Hang) => {
                let _ = tokio::time::timeout(timeout, std::future::pending::<()>()).await;
                Err(Error::NavigationTimeout {
                    url: url.to_string(),
                    seconds: timeout.as_secs(),
                })
            }
            None => Err(Error::Browser(format!("no such page: {}", url))),
        }
    }

    async fn content(&self) -> Result<String> {
        Ok(self.html.clone())
    }

    async fn url(&self) -> Result<String> {
        Ok(self.current.clone().unwrap_or_default())
    }

    async fn close(self: Box<Self>) -> Result<()> {
        self.shared.open_tabs.fetch_sub(1, Ordering::SeqCst);
        if let Some(url) = &self.current {
            self.shared
                .log
                .lock()
                .unwrap()
                .push(TabEvent::Settled(url.clone()));
        }
        Ok(())
    }
}
