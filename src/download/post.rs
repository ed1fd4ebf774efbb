//! Post page visiting.

use std::path::Path;
use std::time::Duration;

use indicatif::MultiProgress;

use crate::api::FapelloClient;
use crate::browser::{Browser, Tab};
use crate::download::media::download_to_file;
use crate::download::state::PostOutcome;
use crate::error::Result;
use crate::events::{Event, EventSink};
use crate::media::MediaItem;
use crate::scrape::{HtmlDocument, PageInspector};

/// Load `url` in a fresh tab and capture its rendered HTML.
///
/// The tab is closed whether or not navigation succeeded.
pub async fn load_page(browser: &dyn Browser, url: &str, timeout: Duration) -> Result<HtmlDocument> {
    let mut tab = browser.open_tab().await?;

    let result = render(&mut *tab, url, timeout).await;

    if let Err(e) = tab.close().await {
        tracing::debug!("Failed to close tab for {}: {}", url, e);
    }

    result
}

async fn render(tab: &mut dyn Tab, url: &str, timeout: Duration) -> Result<HtmlDocument> {
    tab.navigate(url, timeout).await?;

    let html = tab.content().await?;
    let final_url = match tab.url().await {
        Ok(final_url) if final_url.starts_with("http") => final_url,
        _ => url.to_string(),
    };

    HtmlDocument::new(&final_url, html)
}

/// Load a post in an isolated tab and list the media it shows.
pub async fn visit_post(
    browser: &dyn Browser,
    link: &str,
    timeout: Duration,
) -> Result<Vec<MediaItem>> {
    let document = load_page(browser, link, timeout).await?;
    Ok(document.extract_media_links())
}

/// Everything a post visit needs besides the link itself.
pub struct PostContext<'a> {
    pub browser: &'a dyn Browser,
    pub client: &'a FapelloClient,
    pub folder: &'a Path,
    pub timeout: Duration,
    /// Progress display shared by every post; `None` draws nothing.
    pub progress: Option<&'a MultiProgress>,
    pub sink: &'a dyn EventSink,
}

/// Visit a post and download its media one file after another.
///
/// A failed visit counts as a post with no media.
pub async fn process_post(ctx: &PostContext<'_>, link: &str) -> PostOutcome {
    let items = match visit_post(ctx.browser, link, ctx.timeout).await {
        Ok(items) => items,
        Err(e) => {
            ctx.sink.record(Event::PostVisitFailed {
                link: link.to_string(),
                error: e.to_string(),
            });
            return PostOutcome::failed_visit();
        }
    };

    ctx.sink.record(Event::MediaFound {
        link: link.to_string(),
        count: items.len(),
    });

    let mut outcome = PostOutcome {
        visited: true,
        media_found: items.len() as u64,
        ..Default::default()
    };

    for item in &items {
        if download_to_file(ctx.client, item, ctx.folder, ctx.progress, ctx.sink).await {
            outcome.record_download(item.kind);
        } else {
            outcome.failed_downloads += 1;
        }
    }

    outcome
}
