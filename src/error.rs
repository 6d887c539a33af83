//! Error Types
//!
//! Two layers of failures exist in the service:
//! - **`IndexError`**: raised while scanning the collection. These never abort
//!   the process; the affected directory or document degrades to empty.
//! - **`ApiError`**: returned by HTTP handlers and rendered as a JSON body.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Endpoints listed in every 404 body.
pub const AVAILABLE_ENDPOINTS: [&str; 5] = [
    "GET /?term=<term>&doc_name=<doc_name>",
    "GET /?term=<term>",
    "GET /health",
    "GET /stats",
    "GET /documents",
];

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Failures encountered while loading the document collection.
///
/// Cloneable so the cached outcome of the single load pass can be handed to
/// every caller of `CollectionIndex::load`.
#[derive(Error, Debug, Clone)]
pub enum IndexError {
    #[error("Documents directory not found: {}", path.display())]
    DirectoryNotFound { path: PathBuf },

    #[error("Failed to list documents directory {}: {source}", path.display())]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: Arc<std::io::Error>,
    },

    #[error("Failed to read document {}: {source}", path.display())]
    DocumentRead {
        path: PathBuf,
        #[source]
        source: Arc<std::io::Error>,
    },
}

impl IndexError {
    pub fn document_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::DocumentRead {
            path: path.into(),
            source: Arc::new(source),
        }
    }

    pub fn directory_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::DirectoryRead {
            path: path.into(),
            source: Arc::new(source),
        }
    }
}

/// Errors surfaced to HTTP callers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// A required query parameter is missing or empty.
    #[error("{0}")]
    Validation(String),

    #[error("Endpoint not found")]
    NotFound,

    /// Anything unexpected. The message is logged, never sent to the caller.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Validation(message) => json!({ "error": message }),
            ApiError::NotFound => json!({
                "error": "Endpoint not found",
                "available_endpoints": AVAILABLE_ENDPOINTS,
            }),
            ApiError::Internal(detail) => {
                tracing::error!("Internal error while handling request: {}", detail);
                json!({ "error": INTERNAL_ERROR_MESSAGE })
            }
        };

        (status, Json(body)).into_response()
    }
}
