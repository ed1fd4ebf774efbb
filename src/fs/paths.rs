//! Path and directory management.

use std::path::{Path, PathBuf};

use crate::config::{Config, Profile};
use crate::error::{Error, Result};
use crate::fs::naming::{sanitize_filename, sanitize_path_component};
use crate::media::MediaItem;

/// Get the download folder for a profile.
pub fn get_profile_folder(config: &Config, profile: &Profile) -> Result<PathBuf> {
    let folder = sanitize_path_component(profile.as_str())?;
    Ok(config.options.download_directory.join(folder))
}

/// Get the destination path for a media item inside `folder`.
pub fn get_download_path(folder: &Path, item: &MediaItem) -> Result<PathBuf> {
    let name = item
        .file_name()
        .ok_or_else(|| Error::InvalidFilename(format!("No file name in URL: {}", item.url)))?;
    Ok(folder.join(sanitize_filename(&name)?))
}

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}
