use super::cache::{SharedResponseCache, cache_key};
use super::types::{DocumentsResponse, FrequencyResponse, HealthResponse, StatsResponse};
use crate::error::ApiError;
use crate::index::collection::CollectionIndex;
use axum::extract::Query;
use axum::{Extension, Json};
use std::sync::Arc;

/// First non-empty value for `name`. Repeated parameters: first one wins.
fn first_param<'a>(pairs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
        .filter(|value| !value.is_empty())
}

pub async fn handle_term_frequency(
    Query(pairs): Query<Vec<(String, String)>>,
    Extension(index): Extension<Arc<CollectionIndex>>,
    Extension(cache): Extension<SharedResponseCache>,
) -> Result<Json<FrequencyResponse>, ApiError> {
    let Some(term) = first_param(&pairs, "term") else {
        return Err(ApiError::Validation("Parameter \"term\" is required".to_string()));
    };

    let key = cache_key(&pairs);
    if let Some(cached) = cache.get(&key) {
        tracing::debug!("Cache hit for query '{}'", key);
        return Ok(Json(cached));
    }

    let response = match first_param(&pairs, "doc_name") {
        Some(doc_name) => {
            let frequency = index.term_frequency_in_document(doc_name, term).await;
            FrequencyResponse::document(frequency, term, doc_name)
        }
        None => {
            let frequency = index.term_frequency(term).await;
            FrequencyResponse::global(frequency, term)
        }
    };

    cache.insert(key, response.clone());
    Ok(Json(response))
}

pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        message: "API is running".to_string(),
    })
}

pub async fn handle_stats(
    Extension(index): Extension<Arc<CollectionIndex>>,
) -> Json<StatsResponse> {
    Json(index.stats().await.into())
}

pub async fn handle_documents(
    Extension(index): Extension<Arc<CollectionIndex>>,
) -> Json<DocumentsResponse> {
    let documents = index.document_names().await;
    Json(DocumentsResponse {
        total_count: documents.len(),
        documents,
    })
}

pub async fn handle_not_found() -> ApiError {
    ApiError::NotFound
}
