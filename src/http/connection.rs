use std::sync::Arc;

use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::http::parser::parse_http_request;
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::router::Router;
use crate::http::writer::ResponseWriter;

/// Default size of the single read a connection performs.
pub const DEFAULT_READ_BUFFER_SIZE: usize = 1024;

/// One client connection, handling exactly one request.
pub struct Connection<S> {
    stream: S,
    router: Arc<Router>,
    read_buffer_size: usize,
    state: ConnectionState,
}

#[derive(Debug)]
pub enum ConnectionState {
    Reading,
    Parsed(Request),
    Routed(Response),
    Responded,
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, router: Arc<Router>) -> Self {
        Self {
            stream,
            router,
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
            state: ConnectionState::Reading,
        }
    }

    pub fn with_read_buffer_size(mut self, size: usize) -> Self {
        self.read_buffer_size = size;
        self
    }

    pub fn state(&self) -> &ConnectionState {
        &self.state
    }

    /// Drives the connection to `Closed`.
    ///
    /// Read and write failures are returned after the connection is closed.
    /// An empty read or an unparseable request closes the connection
    /// without sending anything and is not an error.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            let state = std::mem::replace(&mut self.state, ConnectionState::Closed);

            self.state = match state {
                ConnectionState::Reading => match self.read_request().await {
                    Ok(Some(req)) => ConnectionState::Parsed(req),
                    Ok(None) => ConnectionState::Closed,
                    Err(e) => return Err(e.context("failed to read request")),
                },

                ConnectionState::Parsed(req) => {
                    let response = self.router.dispatch(&req).await;
                    tracing::debug!(
                        method = %req.method,
                        target = %req.target,
                        status = response.status.as_u16(),
                        "Request handled"
                    );
                    ConnectionState::Routed(response)
                }

                ConnectionState::Routed(response) => {
                    let writer = ResponseWriter::new(&response);
                    let written = writer.write_to_stream(&mut self.stream).await;
                    self.close().await;
                    written.map_err(|e| e.context("failed to write response"))?;
                    ConnectionState::Responded
                }

                ConnectionState::Responded => ConnectionState::Closed,

                ConnectionState::Closed => break,
            };
        }

        Ok(())
    }

    /// Performs the one bounded read and parses whatever arrived.
    async fn read_request(&mut self) -> anyhow::Result<Option<Request>> {
        let mut buffer = BytesMut::with_capacity(self.read_buffer_size);
        let n = self.stream.read_buf(&mut buffer).await?;

        if n == 0 {
            tracing::debug!("Client closed connection before sending data");
            return Ok(None);
        }

        match parse_http_request(&buffer[..n]) {
            Ok(req) => Ok(Some(req)),
            Err(e) => {
                tracing::warn!(error = %e, bytes = n, "Invalid request, closing connection");
                Ok(None)
            }
        }
    }

    async fn close(&mut self) {
        if let Err(e) = self.stream.shutdown().await {
            tracing::debug!(error = %e, "Shutdown after response failed");
        }
    }
}
