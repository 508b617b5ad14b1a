//! `GET /files/<name>` and `POST /files/<name>`.

use crate::http::response::{Response, ResponseBuilder, StatusCode};
use crate::store::{FileStore, StoreError};

const OCTET_STREAM: &str = "application/octet-stream";

/// Serves a stored file as an octet stream.
pub async fn read(store: Option<&FileStore>, name: &str) -> Response {
    let Some(store) = store else {
        tracing::warn!(file = name, "File requested but no directory is configured");
        return Response::not_found();
    };

    match store.read(name).await {
        Ok(contents) => ResponseBuilder::new(StatusCode::Ok)
            .header("Content-Type", OCTET_STREAM)
            .body(contents)
            .build(),
        Err(e) => error_response(name, e),
    }
}

/// Stores the request body under `name`, replacing any existing file.
pub async fn write(store: Option<&FileStore>, name: &str, body: &[u8]) -> Response {
    let Some(store) = store else {
        tracing::warn!(file = name, "Upload attempted but no directory is configured");
        return Response::not_found();
    };

    match store.write(name, body).await {
        Ok(()) => {
            tracing::debug!(file = name, bytes = body.len(), "File stored");
            Response::status(StatusCode::Created)
        }
        Err(e) => error_response(name, e),
    }
}

fn error_response(name: &str, err: StoreError) -> Response {
    match err {
        StoreError::Forbidden(_) => {
            tracing::warn!(file = name, "Rejected path outside the base directory");
            Response::status(StatusCode::Forbidden)
        }
        StoreError::NotFound(e) => {
            tracing::debug!(file = name, error = %e, "File not found");
            Response::not_found()
        }
        StoreError::WriteFailed(e) => {
            tracing::error!(file = name, error = %e, "Error writing file");
            Response::internal_error()
        }
    }
}
