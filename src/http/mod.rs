//! HTTP protocol implementation.
//!
//! A deliberately small HTTP/1.1 subset: one request per connection, read in
//! a single bounded read, answered with a hand-serialized response.
//!
//! # Architecture
//!
//! - **`connection`**: The per-connection state machine
//! - **`parser`**: Parses a raw byte buffer into a `Request`
//! - **`request`**: HTTP request representation
//! - **`router`**: Splits the target and selects a handler
//! - **`encoding`**: `Accept-Encoding` negotiation and gzip
//! - **`response`**: HTTP response representation with builder pattern
//! - **`writer`**: Serializes and writes HTTP responses to the client
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← One bounded read
//!        └──────┬──────┘
//!               │ Request parsed        (empty read / malformed → Closed)
//!               ▼
//!        ┌─────────────┐
//!        │   Parsed    │ ← Route to a handler
//!        └──────┬──────┘
//!               │ Response built
//!               ▼
//!        ┌─────────────┐
//!        │   Routed    │ ← Write response, shut down stream
//!        └──────┬──────┘
//!               ▼
//!        ┌─────────────┐
//!        │  Responded  │ → Closed
//!        └─────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use rawserve::http::connection::Connection;
//! use rawserve::http::router::Router;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let listener = TcpListener::bind("127.0.0.1:4221").await?;
//!     let router = Arc::new(Router::default());
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let router = router.clone();
//!         tokio::spawn(async move {
//!             let mut conn = Connection::new(socket, router);
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod connection;
pub mod encoding;
pub mod parser;
pub mod request;
pub mod response;
pub mod router;
pub mod writer;
