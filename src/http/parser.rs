use crate::http::request::{Method, Request};
use std::collections::HashMap;

const LINE_TERMINATOR: &str = "\r\n";
const HEADERS_END: &[u8] = b"\r\n\r\n";

/// Reasons a buffer could not be turned into a request.
///
/// Any of these means there is no request line to answer against, so the
/// connection is closed without a response.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty request")]
    Empty,
    #[error("malformed request line: {0:?}")]
    RequestLine(String),
    #[error("request target must start with '/': {0:?}")]
    Target(String),
    #[error("request head is not valid UTF-8")]
    Encoding,
}

/// Parses one request out of a buffer filled by a single read.
///
/// The grammar is deliberately small:
///
/// ```text
/// request      = request-line *( CRLF header-line ) [ CRLF CRLF body ]
/// request-line = method SP target SP version [ SP ignored ]
/// header-line  = name ":" value      ; lines without ':' are skipped
/// ```
///
/// The request line and headers must be valid UTF-8; the body may hold any
/// bytes.
///
/// The body is whatever follows the first blank line, taken verbatim. It is
/// not checked against `Content-Length`, so a request spread over several
/// packets arrives truncated.
pub fn parse_http_request(buf: &[u8]) -> Result<Request, ParseError> {
    if buf.is_empty() {
        return Err(ParseError::Empty);
    }

    let headers_end = find_headers_end(buf);
    let head = std::str::from_utf8(&buf[..headers_end.unwrap_or(buf.len())])
        .map_err(|_| ParseError::Encoding)?;

    let mut lines = head.split(LINE_TERMINATOR);

    // Request line
    let request_line = lines.next().ok_or(ParseError::Empty)?;
    let (method, target, version) = parse_request_line(request_line)?;

    // Headers
    let headers = parse_headers(lines);

    // Body
    let body = match headers_end {
        Some(end) if method != Method::GET => buf[end + HEADERS_END.len()..].to_vec(),
        _ => Vec::new(),
    };

    Ok(Request {
        method,
        target,
        version,
        headers,
        body,
    })
}

fn parse_request_line(line: &str) -> Result<(Method, String, String), ParseError> {
    let parts: Vec<&str> = line.split(' ').collect();
    if parts.len() < 3 {
        return Err(ParseError::RequestLine(line.to_string()));
    }

    let target = parts[1];
    if !target.starts_with('/') {
        return Err(ParseError::Target(target.to_string()));
    }

    Ok((Method::from(parts[0]), target.to_string(), parts[2].to_string()))
}

fn parse_headers<'a>(lines: impl Iterator<Item = &'a str>) -> HashMap<String, String> {
    let mut headers = HashMap::new();

    for line in lines {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };

        headers.insert(key.trim().to_string(), value.trim().to_string());
    }

    headers
}

fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(HEADERS_END.len())
        .position(|w| w == HEADERS_END)
}
