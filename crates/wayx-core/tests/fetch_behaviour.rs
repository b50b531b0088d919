//! Integration tests: download against a local HTTP server.

mod common;

use common::http_server::{self, LengthMode, ServerOptions};
use std::fs;
use tempfile::tempdir;
use wayx_core::config::FetchConfig;
use wayx_core::event::Event;
use wayx_core::fetch::{download, FetchError, UnreachableReason};

fn body() -> Vec<u8> {
    (0u8..251).cycle().take(100 * 1024).collect()
}

#[test]
fn download_streams_body_to_destination() {
    let body = body();
    let server = http_server::start(body.clone(), ServerOptions::default());
    let dir = tempdir().unwrap();
    let dest = dir.path().join("pack.zip");
    let mut events: Vec<Event> = Vec::new();

    let outcome = download(&server.url, &dest, &FetchConfig::default(), &mut events).unwrap();

    assert_eq!(outcome.path, dest);
    assert_eq!(outcome.bytes_written, body.len() as u64);
    assert_eq!(outcome.content_length, Some(body.len() as u64));
    assert_eq!(fs::read(&dest).unwrap(), body);
    assert_eq!(server.methods(), vec!["HEAD", "GET"]);
    assert!(matches!(events.first(), Some(Event::DownloadStarted { .. })));
    assert!(matches!(
        events.last(),
        Some(Event::DownloadCompleted { bytes, .. }) if *bytes == body.len() as u64
    ));
}

#[test]
fn download_overwrites_existing_file() {
    let server = http_server::start(b"fresh".to_vec(), ServerOptions::default());
    let dir = tempdir().unwrap();
    let dest = dir.path().join("pack.zip");
    fs::write(&dest, vec![b'x'; 4096]).unwrap();

    download(&server.url, &dest, &FetchConfig::default(), &mut Vec::new()).unwrap();

    assert_eq!(fs::read(&dest).unwrap(), b"fresh");
}

#[test]
fn directory_destination_uses_url_file_name() {
    let server = http_server::start(b"zipdata".to_vec(), ServerOptions::default());
    let dir = tempdir().unwrap();
    let url = format!("{}files/markers.zip", server.url);

    let outcome = download(&url, dir.path(), &FetchConfig::default(), &mut Vec::new()).unwrap();

    assert_eq!(outcome.path, dir.path().join("markers.zip"));
    assert_eq!(fs::read(&outcome.path).unwrap(), b"zipdata");
}

#[test]
fn head_404_skips_get_and_leaves_destination_untouched() {
    let server = http_server::start(
        body(),
        ServerOptions {
            head_status: 404,
            ..Default::default()
        },
    );
    let dir = tempdir().unwrap();
    let dest = dir.path().join("keep.zip");
    fs::write(&dest, b"previous").unwrap();
    let mut events: Vec<Event> = Vec::new();

    let err = download(&server.url, &dest, &FetchConfig::default(), &mut events).unwrap_err();

    assert!(matches!(
        err,
        FetchError::Unreachable {
            reason: UnreachableReason::Status(404),
            ..
        }
    ));
    assert_eq!(server.methods(), vec!["HEAD"]);
    assert_eq!(fs::read(&dest).unwrap(), b"previous");
    assert!(events.is_empty());
}

#[test]
fn head_404_does_not_create_destination() {
    let server = http_server::start(
        body(),
        ServerOptions {
            head_status: 404,
            ..Default::default()
        },
    );
    let dir = tempdir().unwrap();
    let dest = dir.path().join("new.zip");

    assert!(download(&server.url, &dest, &FetchConfig::default(), &mut Vec::new()).is_err());
    assert!(!dest.exists());
}

#[test]
fn connection_refused_is_unreachable() {
    let dir = tempdir().unwrap();
    let dest = dir.path().join("x.zip");
    let err = download(
        &http_server::closed_port_url(),
        &dest,
        &FetchConfig::default(),
        &mut Vec::new(),
    )
    .unwrap_err();

    assert!(matches!(
        err,
        FetchError::Unreachable {
            reason: UnreachableReason::Transport(_),
            ..
        }
    ));
    assert!(!dest.exists());
}

#[test]
fn missing_content_length_is_rejected_by_default() {
    let server = http_server::start(
        body(),
        ServerOptions {
            length: LengthMode::Omit,
            ..Default::default()
        },
    );
    let dir = tempdir().unwrap();
    let dest = dir.path().join("pack.zip");

    let err = download(&server.url, &dest, &FetchConfig::default(), &mut Vec::new()).unwrap_err();

    assert!(matches!(
        err,
        FetchError::UnknownOrZeroSize {
            content_length: None,
            ..
        }
    ));
    assert!(!dest.exists());
}

#[test]
fn missing_content_length_streams_to_close_when_allowed() {
    let body = body();
    let server = http_server::start(
        body.clone(),
        ServerOptions {
            length: LengthMode::Omit,
            ..Default::default()
        },
    );
    let dir = tempdir().unwrap();
    let dest = dir.path().join("pack.zip");
    let cfg = FetchConfig {
        allow_unknown_size: true,
        ..Default::default()
    };

    let outcome = download(&server.url, &dest, &cfg, &mut Vec::new()).unwrap();

    assert_eq!(outcome.content_length, None);
    assert_eq!(outcome.bytes_written, body.len() as u64);
    assert_eq!(fs::read(&dest).unwrap(), body);
}

#[test]
fn zero_content_length_is_rejected_even_when_unknown_size_allowed() {
    let server = http_server::start(
        Vec::new(),
        ServerOptions {
            length: LengthMode::Zero,
            ..Default::default()
        },
    );
    let dir = tempdir().unwrap();
    let dest = dir.path().join("pack.zip");
    fs::write(&dest, b"previous").unwrap();
    let cfg = FetchConfig {
        allow_unknown_size: true,
        ..Default::default()
    };

    let err = download(&server.url, &dest, &cfg, &mut Vec::new()).unwrap_err();

    assert!(matches!(
        err,
        FetchError::UnknownOrZeroSize {
            content_length: Some(0),
            ..
        }
    ));
    assert_eq!(fs::read(&dest).unwrap(), b"previous");
}

#[test]
fn get_error_status_after_good_head_writes_nothing() {
    let server = http_server::start(
        body(),
        ServerOptions {
            get_status: 500,
            ..Default::default()
        },
    );
    let dir = tempdir().unwrap();
    let dest = dir.path().join("pack.zip");

    let err = download(&server.url, &dest, &FetchConfig::default(), &mut Vec::new()).unwrap_err();

    assert!(matches!(
        err,
        FetchError::Unreachable {
            reason: UnreachableReason::Status(500),
            ..
        }
    ));
    assert_eq!(server.methods(), vec!["HEAD", "GET"]);
    assert!(!dest.exists());
}

#[test]
fn unwritable_destination_is_write_error() {
    let server = http_server::start(body(), ServerOptions::default());
    let dir = tempdir().unwrap();
    let dest = dir.path().join("missing").join("pack.zip");

    let err = download(&server.url, &dest, &FetchConfig::default(), &mut Vec::new()).unwrap_err();

    match err {
        FetchError::Write { path, .. } => assert_eq!(path, dest),
        other => panic!("expected Write, got {other:?}"),
    }
}

#[test]
fn connection_closed_mid_body_is_interrupted_not_unreachable() {
    let body = body();
    let server = http_server::start(
        body.clone(),
        ServerOptions {
            length: LengthMode::Truncated,
            ..Default::default()
        },
    );
    let dir = tempdir().unwrap();
    let dest = dir.path().join("pack.zip");
    fs::write(&dest, b"previous-good-content").unwrap();

    let err = download(&server.url, &dest, &FetchConfig::default(), &mut Vec::new()).unwrap_err();

    match err {
        FetchError::Interrupted {
            path,
            bytes_written,
            ..
        } => {
            assert_eq!(path, dest);
            assert!(bytes_written > 0);
            assert!(bytes_written < body.len() as u64);
            assert_eq!(fs::read(&dest).unwrap().len() as u64, bytes_written);
        }
        other => panic!("expected Interrupted, got {other:?}"),
    }
}
