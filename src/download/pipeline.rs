//! Profile download pipeline.
//!
//! Validates the base URL, renders the profile page, paginates, extracts post
//! links and processes posts in sequential batches. The browser is closed
//! exactly once at the end, whatever happened before.

use futures::future::join_all;
use indicatif::{MultiProgress, ProgressBar};

use crate::api::FapelloClient;
use crate::browser::Browser;
use crate::config::{parse_profile, Config};
use crate::download::post::{load_page, process_post, PostContext};
use crate::download::state::{PostOutcome, RunStats};
use crate::error::Result;
use crate::events::{Event, EventSink};
use crate::fs::paths::{ensure_dir, get_profile_folder};
use crate::output::create_item_bar;
use crate::scrape::{extract_post_links, paginate, PaginationOptions};

/// Download every post of the profile at `base_url`, then close `browser`.
pub async fn run(
    config: &Config,
    browser: &dyn Browser,
    client: &FapelloClient,
    sink: &dyn EventSink,
    base_url: &str,
) -> Result<RunStats> {
    let result = download_profile(config, browser, client, sink, base_url).await;

    tracing::debug!("Closing browser");
    if let Err(e) = browser.close().await {
        tracing::warn!("Failed to close browser: {}", e);
    }

    match &result {
        Ok(_) => sink.record(Event::RunFinished),
        Err(e) => sink.record(Event::RunFailed {
            error: e.to_string(),
        }),
    }

    result
}

async fn download_profile(
    config: &Config,
    browser: &dyn Browser,
    client: &FapelloClient,
    sink: &dyn EventSink,
    base_url: &str,
) -> Result<RunStats> {
    let profile = parse_profile(base_url)?;
    sink.record(Event::RunStarted {
        base_url: base_url.to_string(),
    });

    let folder = get_profile_folder(config, &profile)?;
    ensure_dir(&folder)?;

    let mut stats = RunStats::new(profile.as_str());

    tracing::info!("Loading profile page {}", base_url);
    let mut document = load_page(browser, base_url, config.navigation_timeout()).await?;

    let pagination = paginate(
        client,
        &mut document,
        &profile,
        PaginationOptions::from(config),
        sink,
    )
    .await;
    stats.pages_fetched = pagination.pages_appended;

    let links = extract_post_links(&document, base_url)?;
    stats.links_found = links.len() as u64;
    sink.record(Event::LinksDiscovered {
        links: links.clone(),
    });

    let bars = config.options.show_progress.then(MultiProgress::new);
    let ctx = PostContext {
        browser,
        client,
        folder: &folder,
        timeout: config.navigation_timeout(),
        progress: bars.as_ref(),
        sink,
    };

    for outcome in visit_in_batches(&ctx, &links, config.options.batch_size).await {
        stats.add_post(&outcome);
    }

    Ok(stats)
}

/// Process `links` in groups of `batch_size`.
///
/// Posts within a batch run concurrently; a batch starts only after every
/// post of the previous one has settled. Outcomes are returned in link order.
pub async fn visit_in_batches(
    ctx: &PostContext<'_>,
    links: &[String],
    batch_size: usize,
) -> Vec<PostOutcome> {
    let progress = match ctx.progress {
        Some(bars) => bars.add(create_item_bar(links.len() as u64, "Posts")),
        None => ProgressBar::hidden(),
    };
    let mut outcomes = Vec::with_capacity(links.len());

    for (index, batch) in links.chunks(batch_size.max(1)).enumerate() {
        ctx.sink.record(Event::BatchStarted {
            index,
            size: batch.len(),
        });

        let results = join_all(batch.iter().map(|link| process_post(ctx, link))).await;

        progress.inc(batch.len() as u64);
        outcomes.extend(results);
    }

    progress.finish_and_clear();
    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::browser::fake::{FakeBrowser, FakePage, TabEvent};
    use crate::error::Error;
    use crate::events::MemoryEventLog;
    use indicatif::ProgressDrawTarget;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const BASE: &str = "https://fapello.com/someuser/";

    fn test_config(server: &MockServer, dir: &std::path::Path) -> Config {
        let mut config = Config::default();
        config.options.pagination_endpoint = format!("{}/ajax/model", server.uri());
        config.options.download_directory = dir.to_path_buf();
        config.options.show_progress = false;
        config
    }

    fn post_link(n: usize) -> String {
        format!("{}{}/", BASE, n)
    }

    fn profile_html(posts: std::ops::Range<usize>) -> String {
        posts
            .map(|n| format!(r#"<a href="{}">post {}</a>"#, post_link(n), n))
            .collect()
    }

    #[tokio::test]
    async fn test_batches_run_in_sequential_groups() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(&server, dir.path());
        let client = FapelloClient::new(&config).unwrap();
        let sink = MemoryEventLog::new();

        let mut browser = FakeBrowser::new();
        let links: Vec<String> = (1..=12).map(post_link).collect();
        for (i, link) in links.iter().enumerate() {
            // Vary delays so completion order differs from start order
            let delay = Duration::from_millis(5 + ((i * 7) % 5) as u64 * 4);
            browser = browser.with_page(link, FakePage::Slow(delay, String::new()));
        }

        let bars = MultiProgress::with_draw_target(ProgressDrawTarget::hidden());
        let ctx = PostContext {
            browser: &browser,
            client: &client,
            folder: dir.path(),
            timeout: Duration::from_secs(5),
            progress: Some(&bars),
            sink: &sink,
        };

        let outcomes = visit_in_batches(&ctx, &links, 5).await;
        assert_eq!(outcomes.len(), 12);
        assert!(outcomes.iter().all(|o| o.visited));

        let batch_sizes: Vec<usize> = sink
            .events()
            .into_iter()
            .filter_map(|e| match e {
                Event::BatchStarted { size, .. } => Some(size),
                _ => None,
            })
            .collect();
        assert_eq!(batch_sizes, vec![5, 5, 2]);

        let log = browser.log();
        let position = |event: &TabEvent| log.iter().position(|e| e == event).unwrap();

        // Every post of a group starts before any post of that group settles
        for group in links.chunks(5) {
            let last_start = group
                .iter()
                .map(|l| position(&TabEvent::Started(l.clone())))
                .max()
                .unwrap();
            let first_settle = group
                .iter()
                .map(|l| position(&TabEvent::Settled(l.clone())))
                .min()
                .unwrap();
            assert!(last_start < first_settle);
        }

        // No post of group k+1 starts before every post of group k settled
        for (k, group) in links.chunks(5).enumerate().skip(1) {
            let first_start = group
                .iter()
                .map(|l| position(&TabEvent::Started(l.clone())))
                .min()
                .unwrap();
            for previous in &links[(k - 1) * 5..k * 5] {
                assert!(position(&TabEvent::Settled(previous.clone())) < first_start);
            }
        }
    }

    #[tokio::test]
    async fn test_full_run_downloads_media() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ajax/model/someuser/page-2/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(profile_html(3..4)))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/ajax/model/someuser/page-3/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(""))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/media/a.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_string("A"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/media/b.mp4"))
            .respond_with(ResponseTemplate::new(200).set_body_string("B"))
            .mount(&server)
            .await;

        let media = server.uri();
        let browser = FakeBrowser::new()
            .with_page(BASE, FakePage::Html(profile_html(1..3)))
            .with_page(
                &post_link(1),
                FakePage::Html(format!(
                    r#"<a href="/content/x/1/"><img src="{}/media/a.jpg"></a>"#,
                    media
                )),
            )
            .with_page(&post_link(2), FakePage::Fail("boom".into()))
            .with_page(
                &post_link(3),
                FakePage::Html(format!(
                    r#"<video><source src="{}/media/b.mp4" type="video/mp4"></video>"#,
                    media
                )),
            );

        let dir = tempfile::tempdir().unwrap();
        let config = test_config(&server, dir.path());
        let client = FapelloClient::new(&config).unwrap();
        let sink = MemoryEventLog::new();

        let stats = run(&config, &browser, &client, &sink, BASE).await.unwrap();

        assert_eq!(stats.profile, "someuser");
        assert_eq!(stats.pages_fetched, 1);
        assert_eq!(stats.links_found, 3);
        assert_eq!(stats.posts_visited, 2);
        assert_eq!(stats.posts_failed, 1);
        assert_eq!(stats.pic_count, 1);
        assert_eq!(stats.vid_count, 1);

        let folder = dir.path().join("someuser");
        assert_eq!(std::fs::read_to_string(folder.join("a.jpg")).unwrap(), "A");
        assert_eq!(std::fs::read_to_string(folder.join("b.mp4")).unwrap(), "B");

        assert_eq!(browser.close_count(), 1);
        assert_eq!(browser.open_tabs(), 0);
        assert!(sink.events().contains(&Event::LinksDiscovered {
            links: vec![post_link(1), post_link(2), post_link(3)],
        }));
        assert_eq!(sink.events().last(), Some(&Event::RunFinished));
    }

    #[tokio::test]
    async fn test_browser_closed_once_when_pipeline_fails() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(&server, dir.path());
        let client = FapelloClient::new(&config).unwrap();
        let sink = MemoryEventLog::new();
        let browser = FakeBrowser::new().failing_tabs();

        let err = run(&config, &browser, &client, &sink, BASE).await.unwrap_err();

        assert!(matches!(err, Error::Browser(_)));
        assert_eq!(browser.close_count(), 1);
        assert!(matches!(sink.events().last(), Some(Event::RunFailed { .. })));
    }

    #[tokio::test]
    async fn test_invalid_base_url_aborts_before_browsing() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(&server, dir.path());
        let client = FapelloClient::new(&config).unwrap();
        let sink = MemoryEventLog::new();
        let browser = FakeBrowser::new();

        let err = run(&config, &browser, &client, &sink, "https://fapello.com/a/b/")
            .await
            .unwrap_err();

        assert!(matches!(err, Error::InvalidBaseUrl(_)));
        assert!(browser.log().is_empty());
        assert_eq!(browser.close_count(), 1);
        assert!(server.received_requests().await.unwrap().is_empty());
    }
}
