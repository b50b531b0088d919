//! Destination path resolution.

use std::path::{Path, PathBuf};

/// File name used when the URL path yields nothing usable.
pub const DEFAULT_FILENAME: &str = "download.zip";

/// Returns `destination` unchanged, or, when it is an existing directory, a file
/// inside it named after the last URL path segment.
pub fn resolve_destination(url: &str, destination: &Path) -> PathBuf {
    if destination.is_dir() {
        let name = filename_from_url(url).unwrap_or_else(|| DEFAULT_FILENAME.to_string());
        destination.join(name)
    } else {
        destination.to_path_buf()
    }
}

/// Last non-empty path segment of `url`, if it is a safe single file name.
pub fn filename_from_url(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let segment = parsed.path().split('/').filter(|s| !s.is_empty()).last()?;
    if segment == "." || segment == ".." || segment.contains(['\\', '\0']) {
        return None;
    }
    Some(segment.to_string())
}
