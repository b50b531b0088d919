//! Candidate discovery: direct `.json` children of the folder, in listing order.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use super::ExtractError;

/// Lists entries directly inside `folder` whose name ends in `.json`, skipping `exclude`.
///
/// Order is whatever the OS listing yields. Entries that fail to enumerate are
/// logged and dropped; a failure to open the listing itself is fatal.
pub(crate) fn json_candidates(
    folder: &Path,
    exclude: &OsStr,
) -> Result<Vec<PathBuf>, ExtractError> {
    let entries = fs::read_dir(folder).map_err(|source| ExtractError::ReadFolder {
        path: folder.to_path_buf(),
        source,
    })?;

    let mut out = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!("skipping unreadable entry in {}: {}", folder.display(), e);
                continue;
            }
        };
        let name = entry.file_name();
        if name == exclude {
            tracing::debug!("skipping previous output {}", entry.path().display());
            continue;
        }
        if is_json_name(&name) {
            out.push(entry.path());
        }
    }
    Ok(out)
}

/// Case-sensitive `.json` suffix test on the raw file name.
pub(crate) fn is_json_name(name: &OsStr) -> bool {
    name.to_string_lossy().ends_with(".json")
}
