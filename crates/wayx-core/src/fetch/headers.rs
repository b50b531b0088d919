//! Incremental parsing of HTTP response header lines as libcurl delivers them.

use std::str;

/// Status and length of the most recent response seen on a transfer.
///
/// A new status line (e.g. after a redirect hop) resets the previous values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseHead {
    pub status: Option<u32>,
    /// `Content-Length`, if present and numeric.
    pub content_length: Option<u64>,
}

impl ResponseHead {
    /// Feeds one raw header line (status line included).
    pub(crate) fn feed(&mut self, raw: &[u8]) {
        if let Ok(line) = str::from_utf8(raw) {
            self.feed_line(line);
        }
    }

    fn feed_line(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }
        if line.starts_with("HTTP/") {
            *self = ResponseHead {
                status: parse_status(line),
                content_length: None,
            };
            return;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-length") {
                self.content_length = value.trim().parse::<u64>().ok();
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.status, Some(code) if (200..300).contains(&code))
    }
}

/// "HTTP/1.1 200 OK" / "HTTP/2 404" -> code.
fn parse_status(line: &str) -> Option<u32> {
    line.split_whitespace().nth(1)?.parse().ok()
}
