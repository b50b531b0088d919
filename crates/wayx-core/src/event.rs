//! Status events emitted by extraction and download runs.
//!
//! Core operations never print. They push [`Event`]s into an [`EventSink`]
//! supplied by the caller (a terminal, a GUI log pane, a test vector) and the
//! caller renders them with [`Event::render`] in whatever language it chose.

use std::path::PathBuf;
use std::sync::mpsc;

use crate::extract::FileError;
use crate::locale::Messages;

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// An extraction pass started on `folder`.
    ExtractionStarted { folder: PathBuf },
    /// A source file produced a waypoint.
    WaypointExtracted { file: String },
    /// A source file was skipped; the batch continues.
    FileRejected { file: String, error: FileError },
    /// The aggregated output was written.
    OutputSaved { path: PathBuf, count: usize },
    /// The URL passed the reachability probe and the transfer is starting.
    DownloadStarted { url: String, destination: PathBuf },
    /// The transfer finished and the destination file was closed.
    DownloadCompleted { path: PathBuf, bytes: u64 },
}

impl Event {
    /// One log line for this event.
    pub fn render(&self, m: &Messages) -> String {
        match self {
            Event::ExtractionStarted { .. } => m.waypoint_extraction.to_string(),
            Event::WaypointExtracted { file } => format!("{} {}", m.extracted_from, file),
            Event::FileRejected { file, error } => {
                format!("{} {}: {}", m.error_reading, file, error)
            }
            Event::OutputSaved { path, .. } => {
                format!("{} {}", m.waypoints_saved, path.display())
            }
            Event::DownloadStarted { url, .. } => format!("{} {}", m.download_started, url),
            Event::DownloadCompleted { path, .. } => {
                format!("{} {}", m.download_complete, path.display())
            }
        }
    }

    /// True for events that report a problem.
    pub fn is_error(&self) -> bool {
        matches!(self, Event::FileRejected { .. })
    }
}

/// Receiver of status events.
pub trait EventSink {
    fn emit(&mut self, event: Event);
}

impl EventSink for Vec<Event> {
    fn emit(&mut self, event: Event) {
        self.push(event);
    }
}

/// Forwards events to another thread (e.g. a UI loop polling the receiver).
/// A dropped receiver is not an error for the producer.
impl EventSink for mpsc::Sender<Event> {
    fn emit(&mut self, event: Event) {
        if self.send(event).is_err() {
            tracing::debug!("event receiver dropped");
        }
    }
}

/// Discards events after logging them at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&mut self, event: Event) {
        tracing::debug!(?event, "event");
    }
}
