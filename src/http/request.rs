//! Minimal HTTP/1.1 request-head parsing.
//!
//! # Responsibilities
//! - Read bytes until the end of the request head (bounded)
//! - Extract method and path from the request line
//!
//! Headers beyond the request line are read off the socket but ignored;
//! request bodies are never expected (the service is GET-only).

use thiserror::Error;
use tokio::io::AsyncReadExt;

/// Upper bound on the request head; anything larger is rejected.
pub const MAX_HEAD_BYTES: usize = 8 * 1024;

/// Error type for request parsing.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Peer closed the connection before a complete head arrived.
    #[error("connection closed mid-request")]
    Truncated,

    /// Request line did not look like `METHOD target HTTP/x.y`.
    #[error("malformed request line")]
    Malformed,

    /// Head exceeded [`MAX_HEAD_BYTES`].
    #[error("request head too large")]
    TooLarge,
}

/// The parts of a request the servers route on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestHead {
    pub method: String,
    /// Request path with any query string stripped.
    pub path: String,
}

/// Read one request head from the stream.
pub async fn read_head<S>(stream: &mut S) -> Result<RequestHead, RequestError>
where
    S: tokio::io::AsyncRead + Unpin,
{
    let mut buf: Vec<u8> = Vec::with_capacity(1024);
    let mut chunk = [0u8; 1024];

    loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            return Err(RequestError::Truncated);
        }
        buf.extend_from_slice(&chunk[..n]);

        if head_complete(&buf) {
            break;
        }
        if buf.len() > MAX_HEAD_BYTES {
            return Err(RequestError::TooLarge);
        }
    }

    parse_request_line(&buf)
}

fn head_complete(buf: &[u8]) -> bool {
    buf.windows(4).any(|w| w == b"\r\n\r\n")
}

fn parse_request_line(buf: &[u8]) -> Result<RequestHead, RequestError> {
    let head = std::str::from_utf8(buf).map_err(|_| RequestError::Malformed)?;
    let line = head.lines().next().ok_or(RequestError::Malformed)?;

    let mut parts = line.split_whitespace();
    let method = parts.next().ok_or(RequestError::Malformed)?;
    let target = parts.next().ok_or(RequestError::Malformed)?;
    let version = parts.next().ok_or(RequestError::Malformed)?;
    if !version.starts_with("HTTP/") {
        return Err(RequestError::Malformed);
    }

    let path = target.split('?').next().unwrap_or(target);

    Ok(RequestHead {
        method: method.to_string(),
        path: path.to_string(),
    })
}
