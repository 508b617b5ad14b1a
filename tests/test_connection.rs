//! Connection state machine tests over an in-memory duplex stream.

use std::io;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::task::{Context, Poll};

use rawserve::http::connection::{Connection, ConnectionState};
use rawserve::http::router::Router;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, ReadBuf, duplex};

mod common;
use common::RawResponse;

/// Runs one connection against `request` and returns what the client saw.
async fn exchange(router: Arc<Router>, request: &[u8]) -> Vec<u8> {
    let (mut client, server) = duplex(64 * 1024);
    client.write_all(request).await.unwrap();

    let mut conn = Connection::new(server, router);
    conn.run().await.unwrap();
    assert!(matches!(conn.state(), ConnectionState::Closed));
    drop(conn);

    let mut out = Vec::new();
    client.read_to_end(&mut out).await.unwrap();
    out
}

#[tokio::test]
async fn test_root_response_bytes() {
    let out = exchange(Arc::new(Router::default()), b"GET / HTTP/1.1\r\nHost: localhost\r\n\r\n").await;

    assert_eq!(
        out,
        b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 0\r\n\r\n".to_vec()
    );
}

#[tokio::test]
async fn test_echo_response_bytes() {
    let out = exchange(Arc::new(Router::default()), b"GET /echo/hello HTTP/1.1\r\n\r\n").await;

    assert_eq!(
        out,
        b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 5\r\n\r\nhello".to_vec()
    );
}

#[tokio::test]
async fn test_method_not_allowed() {
    let out = exchange(Arc::new(Router::default()), b"PATCH / HTTP/1.1\r\n\r\n").await;

    let resp = RawResponse::parse(&out);
    assert_eq!(resp.status_line, "HTTP/1.1 405 Method Not Allowed");
}

#[tokio::test]
async fn test_malformed_request_gets_no_response() {
    let requests: [&[u8]; 3] = [b"GARBAGE\r\n\r\n", b"GET\r\n", b"GET * HTTP/1.1\r\n\r\n"];
    for request in requests {
        let out = exchange(Arc::new(Router::default()), request).await;
        assert!(out.is_empty(), "unexpected response to {:?}", request);
    }
}

#[tokio::test]
async fn test_client_closing_without_data() {
    let (client, server) = duplex(1024);
    drop(client);

    let mut conn = Connection::new(server, Arc::new(Router::default()));
    conn.run().await.unwrap();
    assert!(matches!(conn.state(), ConnectionState::Closed));
}

/// A transport whose reads always fail and whose writes are only counted.
struct ResetStream {
    written: Arc<AtomicUsize>,
}

impl AsyncRead for ResetStream {
    fn poll_read(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        _buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        Poll::Ready(Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset")))
    }
}

impl AsyncWrite for ResetStream {
    fn poll_write(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        self.written.fetch_add(buf.len(), Ordering::SeqCst);
        Poll::Ready(Ok(buf.len()))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}

#[tokio::test]
async fn test_read_failure_aborts_without_response() {
    let written = Arc::new(AtomicUsize::new(0));
    let stream = ResetStream {
        written: written.clone(),
    };

    let mut conn = Connection::new(stream, Arc::new(Router::default()));
    let err = conn.run().await.unwrap_err();

    assert!(format!("{:#}", err).starts_with("failed to read request"));
    assert!(err.downcast_ref::<io::Error>().is_some());
    assert!(matches!(conn.state(), ConnectionState::Closed));
    assert_eq!(written.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_non_utf8_request_line_gets_no_response() {
    let out = exchange(Arc::new(Router::default()), b"GET /echo/\xff HTTP/1.1\r\n\r\n").await;

    assert!(out.is_empty());
}

#[tokio::test]
async fn test_upload_through_connection() {
    let (router, dir) = common::router_with_files("conn-upload");

    let out = exchange(
        router.clone(),
        b"POST /files/note.txt HTTP/1.1\r\nContent-Length: 6\r\n\r\nabc123",
    )
    .await;
    assert_eq!(RawResponse::parse(&out).status(), 201);
    assert_eq!(std::fs::read(dir.join("note.txt")).unwrap(), b"abc123");

    let out = exchange(router, b"GET /files/note.txt HTTP/1.1\r\n\r\n").await;
    let resp = RawResponse::parse(&out);
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.header("Content-Type"), Some("application/octet-stream"));
    assert_eq!(resp.body, b"abc123".to_vec());
}

#[tokio::test]
async fn test_single_bounded_read_truncates_body() {
    let (router, dir) = common::router_with_files("conn-truncate");

    let head = b"POST /files/big HTTP/1.1\r\n\r\n";
    let mut request = head.to_vec();
    request.extend(std::iter::repeat_n(b'x', 200));

    let (mut client, server) = duplex(64 * 1024);
    client.write_all(&request).await.unwrap();

    let mut conn = Connection::new(server, router).with_read_buffer_size(128);
    conn.run().await.unwrap();

    let stored = std::fs::read(dir.join("big")).unwrap();
    assert!(!stored.is_empty());
    assert!(stored.len() < 200);
    assert!(stored.iter().all(|b| *b == b'x'));
}
