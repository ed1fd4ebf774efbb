//! Download module for content downloading.
//!
//! This module provides:
//! - Run statistics
//! - Media file downloading
//! - Post visiting
//! - The batched profile pipeline

pub mod media;
pub mod pipeline;
pub mod post;
pub mod state;

pub use media::{download_media, download_to_file};
pub use pipeline::{run, visit_in_batches};
pub use post::{load_page, process_post, visit_post, PostContext};
pub use state::{PostOutcome, RunStats};
