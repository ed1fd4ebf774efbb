//! Browser selection and executable lookup.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Supported Chromium-family browsers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrowserKind {
    Brave,
    /// Google Chrome (default).
    #[default]
    Chrome,
    Chromium,
    Edge,
}

impl BrowserKind {
    /// All kinds in menu order.
    pub const ALL: [BrowserKind; 4] = [
        BrowserKind::Brave,
        BrowserKind::Chrome,
        BrowserKind::Chromium,
        BrowserKind::Edge,
    ];

    /// Map a 1-based menu choice to a browser, falling back to the default.
    pub fn from_menu_choice(choice: &str) -> Self {
        choice
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| Self::ALL.get(i).copied())
            .unwrap_or_default()
    }

    /// Well-known install locations for the current platform.
    fn install_paths(&self) -> &'static [&'static str] {
        if cfg!(target_os = "windows") {
            match self {
                BrowserKind::Brave => {
                    &[r"C:\Program Files\BraveSoftware\Brave-Browser\Application\brave.exe"]
                }
                BrowserKind::Chrome => &[
                    r"C:\Program Files\Google\Chrome\Application\chrome.exe",
                    r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
                ],
                BrowserKind::Chromium => &[r"C:\Program Files\Chromium\Application\chrome.exe"],
                BrowserKind::Edge => &[
                    r"C:\Program Files\Microsoft\Edge\Application\msedge.exe",
                    r"C:\Program Files (x86)\Microsoft\Edge\Application\msedge.exe",
                ],
            }
        } else if cfg!(target_os = "macos") {
            match self {
                BrowserKind::Brave => {
                    &["/Applications/Brave Browser.app/Contents/MacOS/Brave Browser"]
                }
                BrowserKind::Chrome => {
                    &["/Applications/Google Chrome.app/Contents/MacOS/Google Chrome"]
                }
                BrowserKind::Chromium => &["/Applications/Chromium.app/Contents/MacOS/Chromium"],
                BrowserKind::Edge => {
                    &["/Applications/Microsoft Edge.app/Contents/MacOS/Microsoft Edge"]
                }
            }
        } else {
            match self {
                BrowserKind::Brave => &["/usr/bin/brave-browser", "/opt/brave.com/brave/brave"],
                BrowserKind::Chrome => &["/usr/bin/google-chrome", "/opt/google/chrome/chrome"],
                BrowserKind::Chromium => &["/usr/bin/chromium", "/usr/bin/chromium-browser"],
                BrowserKind::Edge => &["/usr/bin/microsoft-edge", "/opt/microsoft/msedge/msedge"],
            }
        }
    }

    /// Binary names searched on `PATH`.
    fn binary_names(&self) -> &'static [&'static str] {
        match self {
            BrowserKind::Brave => &["brave-browser", "brave"],
            BrowserKind::Chrome => &["google-chrome", "google-chrome-stable", "chrome"],
            BrowserKind::Chromium => &["chromium", "chromium-browser"],
            BrowserKind::Edge => &["microsoft-edge", "msedge"],
        }
    }

    /// Locate the executable for this browser.
    pub fn find_executable(&self) -> Option<PathBuf> {
        for path in self.install_paths() {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        self.binary_names()
            .iter()
            .find_map(|name| which::which(name).ok())
    }
}

impl fmt::Display for BrowserKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BrowserKind::Brave => write!(f, "Brave"),
            BrowserKind::Chrome => write!(f, "Chrome"),
            BrowserKind::Chromium => write!(f, "Chromium"),
            BrowserKind::Edge => write!(f, "Edge"),
        }
    }
}

impl FromStr for BrowserKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "brave" => Ok(BrowserKind::Brave),
            "chrome" => Ok(BrowserKind::Chrome),
            "chromium" => Ok(BrowserKind::Chromium),
            "edge" => Ok(BrowserKind::Edge),
            _ => Err(format!("Unknown browser: {}", s)),
        }
    }
}
