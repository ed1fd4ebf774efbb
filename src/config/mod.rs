//! Configuration module for the fapello-downloader.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - Browser selection
//! - Base URL and configuration validation

pub mod browser;
pub mod loader;
pub mod validation;

pub use browser::BrowserKind;
pub use loader::{BrowserConfig, Config, OptionsConfig};
pub use validation::{parse_profile, validate_base_url, validate_config, Profile};
