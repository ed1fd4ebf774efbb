//! Run event log.
//!
//! The pipeline reports everything worth keeping (failures, discovered links,
//! completed downloads) through an [`EventSink`]. [`FileEventLog`] appends
//! timestamped lines to a file and mirrors each event to `tracing`;
//! [`MemoryEventLog`] keeps events in memory for inspection.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{SecondsFormat, Utc};

use crate::error::Result;
use crate::scrape::StopReason;

/// Something that happened during a run.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    RunStarted { base_url: String },
    PageAppended { page: u32, bytes: usize },
    PaginationStopped { pages: u32, reason: StopReason },
    LinksDiscovered { links: Vec<String> },
    BatchStarted { index: usize, size: usize },
    PostVisitFailed { link: String, error: String },
    MediaFound { link: String, count: usize },
    Downloaded { url: String, path: PathBuf, bytes: u64 },
    DownloadFailed { url: String, error: String },
    RunFinished,
    RunFailed { error: String },
}

impl Event {
    /// Whether this event reports a failure.
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Event::PostVisitFailed { .. } | Event::DownloadFailed { .. } | Event::RunFailed { .. }
        )
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::RunStarted { base_url } => write!(f, "Starting run for {}", base_url),
            Event::PageAppended { page, bytes } => {
                write!(f, "Appended page {} ({} bytes)", page, bytes)
            }
            Event::PaginationStopped { pages, reason } => {
                write!(f, "Pagination stopped after {} extra page(s): {}", pages, reason)
            }
            Event::LinksDiscovered { links } => {
                write!(f, "Discovered {} post link(s)", links.len())?;
                for link in links {
                    write!(f, "\n  {}", link)?;
                }
                Ok(())
            }
            Event::BatchStarted { index, size } => {
                write!(f, "Starting batch {} ({} post(s))", index + 1, size)
            }
            Event::PostVisitFailed { link, error } => {
                write!(f, "Failed to visit {}: {}", link, error)
            }
            Event::MediaFound { link, count } => {
                write!(f, "Found {} media item(s) on {}", count, link)
            }
            Event::Downloaded { url, path, bytes } => {
                write!(f, "Downloaded {} -> {} ({} bytes)", url, path.display(), bytes)
            }
            Event::DownloadFailed { url, error } => {
                write!(f, "Failed to download {}: {}", url, error)
            }
            Event::RunFinished => write!(f, "Run finished"),
            Event::RunFailed { error } => write!(f, "Run failed: {}", error),
        }
    }
}

/// Destination for run events.
pub trait EventSink: Send + Sync {
    fn record(&self, event: Event);
}

fn trace_event(event: &Event) {
    match event {
        Event::PostVisitFailed { .. } | Event::DownloadFailed { .. } => {
            tracing::warn!("{}", event)
        }
        Event::RunFailed { .. } => tracing::error!("{}", event),
        Event::PaginationStopped { reason, .. } if !reason.is_clean() => {
            tracing::warn!("{}", event)
        }
        Event::PageAppended { .. } | Event::Downloaded { .. } | Event::MediaFound { .. } => {
            tracing::debug!("{}", event)
        }
        Event::LinksDiscovered { links } => {
            tracing::info!("Discovered {} post link(s)", links.len())
        }
        _ => tracing::info!("{}", event),
    }
}

/// Appends one timestamped line per event to a log file.
///
/// `record` writes synchronously under a mutex. Each event is one short
/// append, so post tasks block the executor only for that single write.
pub struct FileEventLog {
    path: PathBuf,
    file: Mutex<File>,
}

impl FileEventLog {
    /// Open `path` for appending, creating it if needed.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            path: path.to_path_buf(),
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EventSink for FileEventLog {
    fn record(&self, event: Event) {
        trace_event(&event);

        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        let line = format!("[{}] {}\n", timestamp, event);

        let mut file = match self.file.lock() {
            Ok(file) => file,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(e) = file.write_all(line.as_bytes()) {
            tracing::warn!("Failed to write to {}: {}", self.path.display(), e);
        }
    }
}

/// Keeps events in memory.
#[derive(Debug, Default)]
pub struct MemoryEventLog {
    events: Mutex<Vec<Event>>,
}

impl MemoryEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded events.
    pub fn events(&self) -> Vec<Event> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Recorded failure events.
    pub fn failures(&self) -> Vec<Event> {
        self.events().into_iter().filter(Event::is_failure).collect()
    }
}

impl EventSink for MemoryEventLog {
    fn record(&self, event: Event) {
        trace_event(&event);
        match self.events.lock() {
            Ok(mut events) => events.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_log_appends_timestamped_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("run.log");

        let log = FileEventLog::open(&path).unwrap();
        log.record(Event::RunStarted {
            base_url: "https://fapello.com/someuser/".into(),
        });
        log.record(Event::DownloadFailed {
            url: "https://cdn.example/a.jpg".into(),
            error: "HTTP 500".into(),
        });
        drop(log);

        // Reopening appends rather than truncates
        let log = FileEventLog::open(&path).unwrap();
        log.record(Event::RunFinished);

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with('['));
        assert!(lines[0].ends_with("Starting run for https://fapello.com/someuser/"));
        assert!(lines[1].contains("Failed to download https://cdn.example/a.jpg: HTTP 500"));
        assert!(lines[2].ends_with("Run finished"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_file_log_concurrent_tasks_write_whole_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.log");
        let log = std::sync::Arc::new(FileEventLog::open(&path).unwrap());

        let tasks: Vec<_> = (0..8)
            .map(|task| {
                let log = std::sync::Arc::clone(&log);
                tokio::spawn(async move {
                    for n in 0..25 {
                        log.record(Event::MediaFound {
                            link: format!("https://fapello.com/someuser/{}/", task * 100 + n),
                            count: n,
                        });
                    }
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap();
        }

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 200);
        assert!(lines
            .iter()
            .all(|line| line.starts_with('[') && line.contains("https://fapello.com/someuser/")));
    }

    #[test]
    fn test_links_discovered_dumps_every_link() {
        let event = Event::LinksDiscovered {
            links: vec!["https://x/u/1/".into(), "https://x/u/2/".into()],
        };
        let text = event.to_string();
        assert!(text.starts_with("Discovered 2 post link(s)"));
        assert!(text.contains("\n  https://x/u/1/"));
        assert!(text.contains("\n  https://x/u/2/"));
    }

    #[test]
    fn test_memory_log_failures() {
        let log = MemoryEventLog::new();
        log.record(Event::RunFinished);
        log.record(Event::PostVisitFailed {
            link: "https://x/u/1/".into(),
            error: "timeout".into(),
        });

        assert_eq!(log.events().len(), 2);
        assert_eq!(log.failures().len(), 1);
    }
}
