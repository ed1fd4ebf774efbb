//! Filename sanitization for media files and profile folders.

use crate::error::{Error, Result};

/// Longest file name most filesystems accept, in bytes.
const MAX_NAME_BYTES: usize = 255;

fn replace_reserved(name: &str, replace_separators: bool) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' if replace_separators => '_',
            ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

fn check_common(name: &str) -> Result<()> {
    if name == "." || name.contains("..") {
        return Err(Error::InvalidFilename(format!(
            "Path traversal detected: '{}'",
            name
        )));
    }

    if name.contains('\0') {
        return Err(Error::InvalidFilename(format!(
            "Null bytes not allowed: '{}'",
            name
        )));
    }

    Ok(())
}

/// Truncate to `MAX_NAME_BYTES`, keeping the extension when there is one.
fn truncate_name(name: String) -> String {
    if name.len() <= MAX_NAME_BYTES {
        return name;
    }

    let (stem, ext) = match name.rfind('.') {
        Some(pos) if name.len() - pos <= 16 => name.split_at(pos),
        _ => (name.as_str(), ""),
    };

    let mut cut = MAX_NAME_BYTES - ext.len();
    while !stem.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}{}", &stem[..cut], ext)
}

/// Turn the last segment of a media URL into a safe file name.
///
/// Path separators and traversal are rejected, reserved characters replaced.
pub fn sanitize_filename(name: &str) -> Result<String> {
    check_common(name)?;

    if name.contains('/') || name.contains('\\') {
        return Err(Error::InvalidFilename(format!(
            "Path separators not allowed in filename: '{}'",
            name
        )));
    }

    // Windows drops trailing dots and spaces silently
    let sanitized = replace_reserved(name, false)
        .trim_end_matches(['.', ' '])
        .to_string();

    if sanitized.trim().is_empty() {
        return Err(Error::InvalidFilename(
            "Filename cannot be empty or whitespace-only".to_string(),
        ));
    }

    Ok(truncate_name(sanitized))
}

/// Sanitize a profile identifier for use as a folder name.
///
/// Separators are replaced rather than rejected.
pub fn sanitize_path_component(name: &str) -> Result<String> {
    check_common(name)?;

    let sanitized = replace_reserved(name, true);
    if sanitized.trim().is_empty() {
        return Err(Error::InvalidFilename(
            "Path component cannot be empty or whitespace-only".to_string(),
        ));
    }

    Ok(sanitized)
}
