use super::cache::SharedResponseCache;
use super::handlers::*;
use crate::error::ApiError;
use crate::index::collection::CollectionIndex;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Router, routing::get};
use std::any::Any;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

/// Builds the HTTP API around a shared index and response cache.
///
/// Unknown routes answer 404 with the list of endpoints; a panicking handler
/// answers an opaque 500.
pub fn create_router(index: Arc<CollectionIndex>, cache: SharedResponseCache) -> Router {
    Router::new()
        .route("/", get(handle_term_frequency))
        .route("/health", get(handle_health))
        .route("/stats", get(handle_stats))
        .route("/documents", get(handle_documents))
        .fallback(handle_not_found)
        .layer(Extension(index))
        .layer(Extension(cache))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
}

pub(crate) fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };

    ApiError::Internal(detail).into_response()
}
