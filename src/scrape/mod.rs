//! Scraping module.
//!
//! Provides:
//! - The in-memory page document and the `PageInspector` trait
//! - Pagination of profile content
//! - Post link extraction

pub mod document;
pub mod links;
pub mod paginator;

pub use document::{HtmlDocument, PageInspector};
pub use links::{extract_post_links, post_link_pattern};
pub use paginator::{paginate, PaginationOptions, PaginationOutcome, StopReason};
