//! Streamed GET into the destination file.
//!
//! The destination is opened on the first admitted body chunk, so a response
//! rejected on status or size never creates or truncates it.

use std::cell::{Cell, RefCell};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use curl::easy::Easy;

use super::headers::ResponseHead;
use super::{configure, FetchError, UnreachableReason};
use crate::config::FetchConfig;

/// Bytes written and the advertised length of a finished transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Transferred {
    pub bytes: u64,
    pub content_length: Option<u64>,
}

/// Reason the write callback stopped the transfer.
enum Abort {
    Status(u32),
    Size(Option<u64>),
    Write(io::Error),
}

/// Decides whether a response body may be written, based on its head.
fn admit(head: &ResponseHead, allow_unknown_size: bool) -> Result<(), Abort> {
    if let Some(code) = head.status {
        if !head.is_success() {
            return Err(Abort::Status(code));
        }
    }
    match head.content_length {
        Some(0) => Err(Abort::Size(Some(0))),
        None if !allow_unknown_size => Err(Abort::Size(None)),
        _ => Ok(()),
    }
}

/// GETs `url` and streams the body into `dest` in chunks of at most `cfg.chunk_size` bytes.
/// Existing files are overwritten. The written length is not checked against `Content-Length`.
pub(crate) fn get_to_file(
    url: &str,
    dest: &Path,
    cfg: &FetchConfig,
) -> Result<Transferred, FetchError> {
    let head = RefCell::new(ResponseHead::default());
    let out: RefCell<Option<File>> = RefCell::new(None);
    let written = Cell::new(0u64);
    let abort: RefCell<Option<Abort>> = RefCell::new(None);
    let not_accessible = |reason: UnreachableReason| FetchError::Unreachable {
        url: url.to_string(),
        reason,
    };

    let mut easy = Easy::new();
    configure(&mut easy, url, cfg).map_err(|e| not_accessible(e.into()))?;
    easy.buffer_size(cfg.chunk_size).map_err(|e| not_accessible(e.into()))?;

    let performed = {
        let mut transfer = easy.transfer();
        transfer
            .header_function(|data| {
                head.borrow_mut().feed(data);
                true
            })
            .map_err(|e| not_accessible(e.into()))?;
        transfer
            .write_function(|data| {
                let mut slot = out.borrow_mut();
                if slot.is_none() {
                    if let Err(reason) = admit(&head.borrow(), cfg.allow_unknown_size) {
                        *abort.borrow_mut() = Some(reason);
                        return Ok(0);
                    }
                    match File::create(dest) {
                        Ok(f) => *slot = Some(f),
                        Err(e) => {
                            *abort.borrow_mut() = Some(Abort::Write(e));
                            return Ok(0);
                        }
                    }
                }
                if let Some(f) = slot.as_mut() {
                    if let Err(e) = f.write_all(data) {
                        *abort.borrow_mut() = Some(Abort::Write(e));
                        return Ok(0);
                    }
                }
                written.set(written.get() + data.len() as u64);
                Ok(data.len())
            })
            .map_err(|e| not_accessible(e.into()))?;
        transfer.perform()
    };

    let head = head.into_inner();
    let file = out.into_inner();

    if let Some(reason) = abort.into_inner() {
        drop(file);
        return Err(match reason {
            Abort::Status(code) => not_accessible(UnreachableReason::Status(code)),
            Abort::Size(content_length) => FetchError::UnknownOrZeroSize {
                url: url.to_string(),
                content_length,
            },
            Abort::Write(source) => FetchError::Write {
                path: dest.to_path_buf(),
                source,
            },
        });
    }
    if let Err(source) = performed {
        if file.is_some() {
            let bytes_written = written.get();
            tracing::warn!("{}: transfer broke after {} bytes: {}", url, bytes_written, source);
            return Err(FetchError::Interrupted {
                path: dest.to_path_buf(),
                bytes_written,
                source,
            });
        }
        return Err(not_accessible(source.into()));
    }

    let code = easy.response_code().map_err(|e| not_accessible(e.into()))?;
    let Some(mut file) = file else {
        // No body arrived at all: nothing was created.
        if !(200..300).contains(&code) {
            return Err(not_accessible(UnreachableReason::Status(code)));
        }
        return Err(FetchError::UnknownOrZeroSize {
            url: url.to_string(),
            content_length: head.content_length,
        });
    };

    file.flush()
        .and_then(|()| file.sync_all())
        .map_err(|source| FetchError::Write {
            path: dest.to_path_buf(),
            source,
        })?;

    let bytes = written.get();
    if let Some(expected) = head.content_length {
        if expected != bytes {
            tracing::warn!("{}: wrote {} of {} advertised bytes", url, bytes, expected);
        }
    }
    Ok(Transferred {
        bytes,
        content_length: head.content_length,
    })
}
