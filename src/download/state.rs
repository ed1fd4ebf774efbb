//! Download statistics.

use crate::media::MediaKind;

/// Result of processing one post.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PostOutcome {
    /// Whether the post page could be visited.
    pub visited: bool,
    pub media_found: u64,
    pub pics_downloaded: u64,
    pub vids_downloaded: u64,
    pub failed_downloads: u64,
}

impl PostOutcome {
    /// Outcome of a post whose visit failed.
    pub fn failed_visit() -> Self {
        Self::default()
    }

    /// Count one successful download of `kind`.
    pub fn record_download(&mut self, kind: MediaKind) {
        match kind {
            MediaKind::Image => self.pics_downloaded += 1,
            MediaKind::Video => self.vids_downloaded += 1,
        }
    }
}

/// Statistics for a whole run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunStats {
    pub profile: String,
    pub pages_fetched: u32,
    pub links_found: u64,
    pub posts_visited: u64,
    pub posts_failed: u64,
    pub media_found: u64,
    pub pic_count: u64,
    pub vid_count: u64,
    pub failed_downloads: u64,
}

impl RunStats {
    pub fn new(profile: impl Into<String>) -> Self {
        Self {
            profile: profile.into(),
            ..Default::default()
        }
    }

    /// Fold one post's outcome into the totals.
    pub fn add_post(&mut self, outcome: &PostOutcome) {
        if outcome.visited {
            self.posts_visited += 1;
        } else {
            self.posts_failed += 1;
        }
        self.media_found += outcome.media_found;
        self.pic_count += outcome.pics_downloaded;
        self.vid_count += outcome.vids_downloaded;
        self.failed_downloads += outcome.failed_downloads;
    }

    /// Get total downloaded count.
    pub fn total_downloaded(&self) -> u64 {
        self.pic_count + self.vid_count
    }
}
