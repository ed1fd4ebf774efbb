//! Post link discovery.

use regex::Regex;

use crate::config::parse_profile;
use crate::error::Result;
use crate::scrape::document::PageInspector;

/// Pattern matching post links under `base`: the escaped base URL followed by digits and `/`.
pub fn post_link_pattern(base: &str) -> Result<Regex> {
    Ok(Regex::new(&format!(r"^{}\d+/", regex::escape(base)))?)
}

/// Collect post links from `document` in document order.
///
/// Fails before scanning when `base` is not a profile URL. Duplicates are kept.
pub fn extract_post_links<D: PageInspector + ?Sized>(document: &D, base: &str) -> Result<Vec<String>> {
    parse_profile(base)?;
    let pattern = post_link_pattern(base)?;

    Ok(document
        .links()
        .into_iter()
        .filter(|link| pattern.is_match(link))
        .collect())
}
