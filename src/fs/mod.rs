//! Filesystem module.
//!
//! Provides:
//! - Profile folder and download path management
//! - Filename sanitization

pub mod naming;
pub mod paths;

pub use naming::{sanitize_filename, sanitize_path_component};
pub use paths::{ensure_dir, get_download_path, get_profile_folder};
