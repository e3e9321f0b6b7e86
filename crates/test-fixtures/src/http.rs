//! One-connection-per-response HTTP responder on `127.0.0.1`.
//!
//! Each accepted connection gets the next canned response, then the
//! connection is closed. The thread exits after the last response.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::JoinHandle;

/// A response to replay verbatim.
#[derive(Debug, Clone)]
pub struct CannedResponse {
    pub status: u16,
    pub content_type: String,
    pub body: String,
}

impl CannedResponse {
    pub fn json(status: u16, body: serde_json::Value) -> Self {
        Self {
            status,
            content_type: "application/json".to_string(),
            body: body.to_string(),
        }
    }

    pub fn html(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: "text/html; charset=utf-8".to_string(),
            body: body.to_string(),
        }
    }
}

/// What the client sent.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn json_body(&self) -> serde_json::Value {
        serde_json::from_str(&self.body)
            .unwrap_or_else(|e| panic!("request body is not JSON ({e}): {}", self.body))
    }
}

pub struct CannedServer {
    addr: SocketAddr,
    requests: Receiver<RecordedRequest>,
    _handle: JoinHandle<()>,
}

impl CannedServer {
    /// Bind an ephemeral port and serve `responses` in order.
    pub fn start(responses: Vec<CannedResponse>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind canned server");
        let addr = listener.local_addr().expect("canned server address");
        let (tx, rx) = mpsc::channel();
        let handle = std::thread::spawn(move || serve(listener, responses, tx));
        Self {
            addr,
            requests: rx,
            _handle: handle,
        }
    }

    /// Base URL, e.g. `http://127.0.0.1:54321`.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.try_iter().collect()
    }

    /// An address nothing listens on, for connection-refused tests.
    pub fn unused_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind probe listener");
        let addr = listener.local_addr().expect("probe address");
        drop(listener);
        format!("http://{addr}")
    }
}

fn serve(listener: TcpListener, responses: Vec<CannedResponse>, tx: Sender<RecordedRequest>) {
    for response in responses {
        let Ok((stream, _)) = listener.accept() else {
            return;
        };
        if handle_connection(stream, &response, &tx).is_err() {
            return;
        }
    }
}

fn handle_connection(
    stream: TcpStream,
    response: &CannedResponse,
    tx: &Sender<RecordedRequest>,
) -> std::io::Result<()> {
    let mut reader = BufReader::new(stream.try_clone()?);

    let mut request_line = String::new();
    reader.read_line(&mut request_line)?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let path = parts.next().unwrap_or_default().to_string();

    let mut headers = Vec::new();
    let mut content_length = 0usize;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            let (name, value) = (name.trim().to_string(), value.trim().to_string());
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.parse().unwrap_or(0);
            }
            headers.push((name, value));
        }
    }

    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body)?;

    // Record before answering so the client observes it once it has a response.
    let _ = tx.send(RecordedRequest {
        method,
        path,
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    });

    let mut stream = stream;
    write!(
        stream,
        "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        response.status,
        reason_phrase(response.status),
        response.content_type,
        response.body.len(),
        response.body
    )?;
    stream.flush()
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        504 => "Gateway Timeout",
        _ => "Status",
    }
}
