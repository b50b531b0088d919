//! Extraction pass: scan a folder for waypoint sources and write one aggregated file.
//!
//! Files are read one at a time. A bad file is reported through the event sink
//! and recorded in the report; it never aborts the pass. The output is written
//! even when nothing was extracted (an empty array).

mod error;
mod scan;

pub use error::{ExtractError, FileError};

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

use crate::config::ExtractConfig;
use crate::event::{Event, EventSink};
use crate::waypoint::{SourceRecord, Waypoint};

/// A candidate file that produced no waypoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: FileError,
}

/// Outcome of a completed extraction pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractReport {
    pub output_path: PathBuf,
    /// Waypoints in listing order, exactly as written.
    pub waypoints: Vec<Waypoint>,
    pub failures: Vec<FileFailure>,
    /// Number of `.json` candidates examined (output file excluded).
    pub files_scanned: usize,
}

impl ExtractReport {
    /// Number of waypoints written.
    pub fn count(&self) -> usize {
        self.waypoints.len()
    }
}

/// Runs one extraction pass over `folder` and writes `<folder>/<output_filename>`.
///
/// Returns [`ExtractError::InvalidFolder`] without touching the filesystem when
/// `folder` is not an existing directory. Any previous output is overwritten.
pub fn extract(
    folder: &Path,
    cfg: &ExtractConfig,
    sink: &mut dyn EventSink,
) -> Result<ExtractReport, ExtractError> {
    if !folder.is_dir() {
        tracing::warn!("extract: invalid folder {}", folder.display());
        return Err(ExtractError::InvalidFolder {
            path: folder.to_path_buf(),
        });
    }

    sink.emit(Event::ExtractionStarted {
        folder: folder.to_path_buf(),
    });
    tracing::info!("extracting waypoints from {}", folder.display());

    let candidates = scan::json_candidates(folder, cfg.output_name())?;
    let files_scanned = candidates.len();

    let mut waypoints = Vec::new();
    let mut failures = Vec::new();
    for path in candidates {
        let file = display_name(&path);
        match read_waypoint(&path, cfg) {
            Ok(wp) => {
                tracing::debug!("extracted {:?} from {}", wp.name, path.display());
                waypoints.push(wp);
                sink.emit(Event::WaypointExtracted { file });
            }
            Err(error) => {
                tracing::warn!("skipping {}: {}", path.display(), error);
                sink.emit(Event::FileRejected {
                    file,
                    error: error.clone(),
                });
                failures.push(FileFailure { path, error });
            }
        }
    }

    let output_path = folder.join(cfg.output_name());
    write_output(&output_path, &waypoints).map_err(|source| {
        tracing::error!("writing {} failed: {}", output_path.display(), source);
        ExtractError::OutputWrite {
            path: output_path.clone(),
            source,
        }
    })?;

    tracing::info!(
        "wrote {} waypoint(s) to {} ({} file(s) skipped)",
        waypoints.len(),
        output_path.display(),
        failures.len()
    );
    sink.emit(Event::OutputSaved {
        path: output_path.clone(),
        count: waypoints.len(),
    });

    Ok(ExtractReport {
        output_path,
        waypoints,
        failures,
        files_scanned,
    })
}

/// Reads one candidate. The file handle is closed before returning on every path.
fn read_waypoint(path: &Path, cfg: &ExtractConfig) -> Result<Waypoint, FileError> {
    let file = File::open(path).map_err(|e| FileError::read(&e))?;
    let value: Value =
        serde_json::from_reader(BufReader::new(file)).map_err(|e| FileError::from_json(&e))?;
    let record = SourceRecord::from_value(&value)?;
    Ok(record.to_waypoint(&cfg.name_prefix, cfg.color))
}

/// Writes `waypoints` as a JSON array indented with four spaces, truncating any existing file.
fn write_output(path: &Path, waypoints: &[Waypoint]) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut writer, formatter);
    waypoints.serialize(&mut ser).map_err(io::Error::from)?;
    writer.flush()
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
