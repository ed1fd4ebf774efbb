//! Pagination of profile content into the seed document.

use std::fmt;
use std::time::Duration;

use rand::Rng;
use tokio::time::sleep;

use crate::api::{FapelloClient, PageFetch};
use crate::config::{Config, Profile};
use crate::events::{Event, EventSink};
use crate::scrape::document::PageInspector;

/// First page requested; page 1 is the seed document itself.
pub const FIRST_PAGE: u32 = 2;

/// Why pagination stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// Server returned an empty page or 404.
    EndOfData,
    /// Server returned a status that does not mean "no more pages".
    UnexpectedStatus(u16),
    /// The request itself failed.
    RequestFailed(String),
    /// The request ceiling was reached.
    PageLimit(u32),
}

impl StopReason {
    /// Whether the server cleanly signalled the end of the content.
    pub fn is_clean(&self) -> bool {
        matches!(self, StopReason::EndOfData)
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::EndOfData => write!(f, "no more pages"),
            StopReason::UnexpectedStatus(code) => write!(f, "unexpected HTTP status {}", code),
            StopReason::RequestFailed(e) => write!(f, "request failed: {}", e),
            StopReason::PageLimit(limit) => write!(f, "request limit of {} reached", limit),
        }
    }
}

/// Pagination settings.
#[derive(Debug, Clone, Copy)]
pub struct PaginationOptions {
    /// Maximum number of requests.
    pub max_pages: u32,
    /// Random delay range in milliseconds before each request after the first.
    pub delay_ms: [u64; 2],
}

impl From<&Config> for PaginationOptions {
    fn from(config: &Config) -> Self {
        Self {
            max_pages: config.options.max_pages,
            delay_ms: config.options.page_delay_ms,
        }
    }
}

/// Summary of a pagination pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationOutcome {
    pub pages_appended: u32,
    pub requests: u32,
    pub stop: StopReason,
}

/// Append every available page after the seed page to `document`.
///
/// Requests are strictly sequential. Every stop condition ends pagination at
/// the last appended page; none of them is an error.
pub async fn paginate<D: PageInspector>(
    client: &FapelloClient,
    document: &mut D,
    profile: &Profile,
    options: PaginationOptions,
    sink: &dyn EventSink,
) -> PaginationOutcome {
    let mut page = FIRST_PAGE;
    let mut requests = 0u32;
    let mut pages_appended = 0u32;

    let stop = loop {
        if requests >= options.max_pages {
            break StopReason::PageLimit(options.max_pages);
        }

        if requests > 0 {
            delay(options.delay_ms).await;
        }

        requests += 1;
        match client.fetch_page(profile, page).await {
            Ok(PageFetch::Fragment(html)) => {
                document.append_fragment(&html);
                sink.record(Event::PageAppended {
                    page,
                    bytes: html.len(),
                });
                pages_appended += 1;
                page += 1;
            }
            Ok(PageFetch::Empty) | Ok(PageFetch::Status(404)) => break StopReason::EndOfData,
            Ok(PageFetch::Status(code)) => break StopReason::UnexpectedStatus(code),
            Err(e) => break StopReason::RequestFailed(e.to_string()),
        }
    };

    sink.record(Event::PaginationStopped {
        pages: pages_appended,
        reason: stop.clone(),
    });

    PaginationOutcome {
        pages_appended,
        requests,
        stop,
    }
}

async fn delay([min, max]: [u64; 2]) {
    if max == 0 {
        return;
    }
    let delay_ms = rand::thread_rng().gen_range(min..=max);
    sleep(Duration::from_millis(delay_ms)).await;
}
