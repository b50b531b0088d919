//! Minimal HTTP/1.1 server for download integration tests.
//!
//! Serves one static body on every path, with configurable HEAD/GET statuses and
//! `Content-Length` behaviour. Records the method of every request it receives.

use std::io::{Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthMode {
    /// Accurate `Content-Length`.
    Exact,
    /// No `Content-Length`; the body is terminated by closing the connection.
    Omit,
    /// `Content-Length: 0` and no body.
    Zero,
    /// Accurate `Content-Length`, but the connection closes after the first half of the body.
    Truncated,
}

#[derive(Debug, Clone, Copy)]
pub struct ServerOptions {
    pub head_status: u16,
    pub get_status: u16,
    pub length: LengthMode,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            head_status: 200,
            get_status: 200,
            length: LengthMode::Exact,
        }
    }
}

pub struct TestServer {
    /// Base URL ending in `/`.
    pub url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl TestServer {
    /// Methods of all requests received so far, in arrival order.
    pub fn methods(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// Starts a server in a background thread serving `body`. The server runs until the process exits.
pub fn start(body: Vec<u8>, opts: ServerOptions) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let body = Arc::new(body);
    let requests = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&requests);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let body = Arc::clone(&body);
            let log = Arc::clone(&log);
            thread::spawn(move || handle(stream, &body, opts, &log));
        }
    });
    TestServer {
        url: format!("http://127.0.0.1:{}/", port),
        requests,
    }
}

/// A URL on a port with nothing listening.
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/gone.zip", port)
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Status",
    }
}

fn handle(mut stream: TcpStream, body: &[u8], opts: ServerOptions, log: &Mutex<Vec<String>>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let request = String::from_utf8_lossy(&buf[..n]);
    let method = request
        .split_whitespace()
        .next()
        .unwrap_or("")
        .to_ascii_uppercase();
    log.lock().unwrap().push(method.clone());

    let is_head = method == "HEAD";
    let status = if is_head { opts.head_status } else { opts.get_status };
    let (length_header, payload): (String, &[u8]) = if status != 200 {
        (format!("Content-Length: {}\r\n", 9), &b"not found"[..])
    } else {
        match opts.length {
            LengthMode::Exact => (format!("Content-Length: {}\r\n", body.len()), body),
            LengthMode::Omit => (String::new(), body),
            LengthMode::Zero => ("Content-Length: 0\r\n".to_string(), &[][..]),
            LengthMode::Truncated => (
                format!("Content-Length: {}\r\n", body.len()),
                &body[..body.len() / 2],
            ),
        }
    };
    let response = format!(
        "HTTP/1.1 {} {}\r\n{}Connection: close\r\n\r\n",
        status,
        reason(status),
        length_header
    );
    let _ = stream.write_all(response.as_bytes());
    if !is_head {
        let _ = stream.write_all(payload);
    }
    let _ = stream.flush();
    let _ = stream.shutdown(Shutdown::Write);
}
