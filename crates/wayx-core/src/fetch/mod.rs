//! Single-file HTTP(S) download with a reachability pre-check.
//!
//! Uses the curl crate (libcurl), synchronously on the calling thread:
//! a HEAD probe that must return 200, then a streamed GET written to disk.
//! No retries, no resume; a failed attempt is simply reported.

mod headers;
mod probe;
mod target;
mod transfer;

pub use headers::ResponseHead;
pub use target::{filename_from_url, resolve_destination, DEFAULT_FILENAME};

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use curl::easy::Easy;
use thiserror::Error;

use crate::config::FetchConfig;
use crate::event::{Event, EventSink};
use crate::locale::Messages;

/// Why a URL was judged not accessible.
#[derive(Debug, Error)]
pub enum UnreachableReason {
    #[error("HTTP {0}")]
    Status(u32),
    #[error("{0}")]
    Transport(#[from] curl::Error),
}

#[derive(Debug, Error)]
pub enum FetchError {
    /// Blank URL; nothing was attempted.
    #[error("no URL given")]
    EmptyUrl,
    /// HEAD (or GET) failed or returned an unexpected status. The destination was not touched.
    #[error("{url} is not accessible: {reason}")]
    Unreachable {
        url: String,
        #[source]
        reason: UnreachableReason,
    },
    /// The response is empty or, under the strict policy, of unknown length. Nothing was written.
    #[error("{url}: {}", size_detail(.content_length))]
    UnknownOrZeroSize {
        url: String,
        content_length: Option<u64>,
    },
    /// The connection failed after body bytes were written. The destination holds a partial file.
    #[error("transfer to {} interrupted after {bytes_written} bytes: {source}", .path.display())]
    Interrupted {
        path: PathBuf,
        bytes_written: u64,
        #[source]
        source: curl::Error,
    },
    /// Creating or writing the destination failed.
    #[error("cannot write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

fn size_detail(content_length: &Option<u64>) -> &'static str {
    match content_length {
        Some(0) => "empty response (Content-Length: 0)",
        Some(_) => "no body received",
        None => "size unknown (no Content-Length)",
    }
}

impl FetchError {
    /// Localized explanation followed by the diagnostic detail.
    pub fn user_message(&self, m: &Messages) -> String {
        match self {
            FetchError::EmptyUrl => m.invalid_url.to_string(),
            FetchError::Unreachable { url, reason } => {
                format!("{} ({}: {})", m.file_not_accessible, url, reason)
            }
            FetchError::UnknownOrZeroSize {
                url,
                content_length,
            } => format!("{} ({}: {})", m.unknown_size, url, size_detail(content_length)),
            FetchError::Interrupted {
                path,
                bytes_written,
                source,
            } => format!(
                "{} {} ({} bytes: {})",
                m.download_interrupted,
                path.display(),
                bytes_written,
                source
            ),
            FetchError::Write { path, source } => {
                format!("{} {}: {}", m.download_write_failed, path.display(), source)
            }
        }
    }
}

/// A completed download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutcome {
    pub path: PathBuf,
    pub bytes_written: u64,
    /// Length advertised by the server, if any.
    pub content_length: Option<u64>,
}

/// Common handle options for both requests.
fn configure(easy: &mut Easy, url: &str, cfg: &FetchConfig) -> Result<(), curl::Error> {
    easy.url(url)?;
    easy.useragent(concat!("wayx/", env!("CARGO_PKG_VERSION")))?;
    easy.follow_location(cfg.follow_redirects)?;
    easy.max_redirections(cfg.max_redirections)?;
    if let Some(secs) = cfg.connect_timeout_secs {
        easy.connect_timeout(Duration::from_secs(secs))?;
    }
    Ok(())
}

/// Downloads `url` to `destination`, overwriting any existing file.
///
/// If `destination` is an existing directory the file name is derived from the URL.
/// The HEAD probe runs first; when it fails, no GET is issued and the filesystem
/// is left untouched.
pub fn download(
    url: &str,
    destination: &Path,
    cfg: &FetchConfig,
    sink: &mut dyn EventSink,
) -> Result<FetchOutcome, FetchError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(FetchError::EmptyUrl);
    }

    probe::probe(url, cfg).map_err(|reason| {
        tracing::warn!("{} not accessible: {}", url, reason);
        FetchError::Unreachable {
            url: url.to_string(),
            reason,
        }
    })?;

    let path = resolve_destination(url, destination);
    tracing::info!("downloading {} -> {}", url, path.display());
    sink.emit(Event::DownloadStarted {
        url: url.to_string(),
        destination: path.clone(),
    });

    let done = transfer::get_to_file(url, &path, cfg).map_err(|e| {
        tracing::warn!("download of {} failed: {}", url, e);
        e
    })?;

    tracing::info!("downloaded {} bytes to {}", done.bytes, path.display());
    sink.emit(Event::DownloadCompleted {
        path: path.clone(),
        bytes: done.bytes,
    });

    Ok(FetchOutcome {
        path,
        bytes_written: done.bytes,
        content_length: done.content_length,
    })
}
