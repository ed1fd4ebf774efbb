//! HTTP API module.
//!
//! This module provides the HTTP client used for pagination requests and
//! media downloads.

pub mod client;

pub use client::{FapelloClient, PageFetch};
