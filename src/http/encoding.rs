//! Content-encoding negotiation.
//!
//! Only `gzip` is recognised. The `Accept-Encoding` value is split on commas
//! and each token is trimmed and compared case-sensitively; quality values
//! are not interpreted, so `gzip;q=0` does not match.

use std::io::{self, Write};

use flate2::Compression;
use flate2::write::GzEncoder;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Identity,
    Gzip,
}

impl Encoding {
    /// Value for the `Content-Encoding` header, if any is needed.
    pub fn header_value(&self) -> Option<&'static str> {
        match self {
            Encoding::Identity => None,
            Encoding::Gzip => Some("gzip"),
        }
    }

    pub fn encode(&self, body: &[u8]) -> io::Result<Vec<u8>> {
        match self {
            Encoding::Identity => Ok(body.to_vec()),
            Encoding::Gzip => gzip(body),
        }
    }
}

/// Picks the response encoding for an `Accept-Encoding` header value.
pub fn negotiate(accept_encoding: Option<&str>) -> Encoding {
    let accepts_gzip = accept_encoding
        .map(|value| value.split(',').any(|token| token.trim() == "gzip"))
        .unwrap_or(false);

    if accepts_gzip {
        Encoding::Gzip
    } else {
        Encoding::Identity
    }
}

/// Compresses `body` into a complete gzip member.
pub fn gzip(body: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(body)?;
    encoder.finish()
}
