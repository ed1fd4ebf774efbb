//! In-memory HTML document assembled from a seed page and appended fragments.

use std::sync::OnceLock;

use scraper::{Html, Selector};
use url::Url;

use crate::error::Result;
use crate::media::{MediaItem, MediaKind};

/// Read and append access to a rendered page.
///
/// The pipeline only talks to pages through this trait, so it does not depend
/// on a particular browser binding.
pub trait PageInspector {
    /// Append an HTML fragment after the existing content.
    fn append_fragment(&mut self, html: &str);

    /// Resolved `href` of every anchor, in document order.
    fn links(&self) -> Vec<String>;

    /// Images linked under `/content/` and mp4 video sources, in document order.
    fn extract_media_links(&self) -> Vec<MediaItem>;
}

struct Selectors {
    anchor: Selector,
    content_image: Selector,
    mp4_source: Selector,
}

fn selectors() -> &'static Selectors {
    static SELECTORS: OnceLock<Selectors> = OnceLock::new();
    SELECTORS.get_or_init(|| Selectors {
        anchor: Selector::parse("a[href]").unwrap(),
        content_image: Selector::parse(r#"a[href*="/content/"] img"#).unwrap(),
        mp4_source: Selector::parse(r#"video source[type="video/mp4"]"#).unwrap(),
    })
}

/// Parsed HTML held as source text.
///
/// `scraper::Html` is not `Send`, so parsing happens on each query and the
/// document can live across await points.
#[derive(Debug, Clone)]
pub struct HtmlDocument {
    url: Url,
    seed: String,
    fragments: Vec<String>,
}

impl HtmlDocument {
    /// Create a document for the page at `url`.
    pub fn new(url: &str, html: impl Into<String>) -> Result<Self> {
        Ok(Self {
            url: Url::parse(url)?,
            seed: html.into(),
            fragments: Vec::new(),
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Number of fragments appended so far.
    pub fn fragment_count(&self) -> usize {
        self.fragments.len()
    }

    fn resolve(&self, reference: &str) -> Option<String> {
        let reference = reference.trim();
        if reference.is_empty() {
            return None;
        }
        self.url.join(reference).ok().map(String::from)
    }

    /// Run `f` over the seed document, then every fragment in append order.
    fn for_each_tree<F: FnMut(&Html)>(&self, mut f: F) {
        f(&Html::parse_document(&self.seed));
        for fragment in &self.fragments {
            f(&Html::parse_fragment(fragment));
        }
    }
}

impl PageInspector for HtmlDocument {
    fn append_fragment(&mut self, html: &str) {
        self.fragments.push(html.to_string());
    }

    fn links(&self) -> Vec<String> {
        let sel = selectors();
        let mut links = Vec::new();

        self.for_each_tree(|tree| {
            links.extend(
                tree.select(&sel.anchor)
                    .filter_map(|a| a.value().attr("href"))
                    .filter_map(|href| self.resolve(href)),
            );
        });

        links
    }

    fn extract_media_links(&self) -> Vec<MediaItem> {
        let sel = selectors();
        let mut items = Vec::new();

        self.for_each_tree(|tree| {
            let images = tree
                .select(&sel.content_image)
                .filter_map(|img| img.value().attr("src"))
                .filter_map(|src| self.resolve(src))
                .map(|url| MediaItem::new(MediaKind::Image, url));
            items.extend(images);

            let videos = tree
                .select(&sel.mp4_source)
                .filter_map(|source| source.value().attr("src"))
                .filter_map(|src| self.resolve(src))
                .map(|url| MediaItem::new(MediaKind::Video, url));
            items.extend(videos);
        });

        items
    }
}
