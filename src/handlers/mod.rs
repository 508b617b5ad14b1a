//! Request handlers.
//!
//! Each handler turns a request into a complete response. None of them can
//! fail past this point: every error becomes a status code.

pub mod files;

use crate::http::encoding;
use crate::http::request::Request;
use crate::http::response::{Response, ResponseBuilder, StatusCode};

/// `GET /`
pub fn root() -> Response {
    Response::status(StatusCode::Ok)
}

/// `GET /echo/<text>`: the subpath comes back as the body, gzip-compressed
/// when the client accepts it.
pub fn echo(req: &Request, text: &str) -> Response {
    let builder = ResponseBuilder::new(StatusCode::Ok).header("Content-Type", "text/plain");
    let encoding = encoding::negotiate(req.header("Accept-Encoding"));

    match encoding.encode(text.as_bytes()) {
        Ok(body) => {
            let builder = match encoding.header_value() {
                Some(content_encoding) => builder.header("Content-Encoding", content_encoding),
                None => builder,
            };
            builder.body(body).build()
        }
        Err(e) => {
            tracing::warn!(error = %e, "Compression failed, sending identity body");
            builder.body(text).build()
        }
    }
}

/// `GET /user-agent`
pub fn user_agent(req: &Request) -> Response {
    Response::ok(req.user_agent())
}
