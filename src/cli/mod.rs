//! Command-line interface.

pub mod args;
pub mod prompt;

pub use args::{Args, BrowserArg};
pub use prompt::{prompt_browser, prompt_url};
