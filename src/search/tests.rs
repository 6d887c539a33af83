//! Search Module Tests
//!
//! Validates text normalization and the HTTP API served on top of the index.
//!
//! ## Test Scopes
//! - **Tokenizer**: Ensures text is lowercased, accent-stripped and split on word boundaries.
//! - **Query Route**: Parameter validation, global vs per-document scope, response shapes.
//! - **Service Routes**: Health, stats, documents listing and the 404 fallback.
//! - **Cache & Failures**: Response caching and the opaque 500 for panicking handlers.

#[cfg(test)]
mod tests {
    use crate::index::collection::CollectionIndex;
    use crate::search::cache::{
        NoResponseCache, ResponseCache, SharedResponseCache, TtlResponseCache, cache_key,
    };
    use crate::search::router::{create_router, handle_panic};
    use crate::search::tokenizer::{fold_query_term, normalize};
    use crate::search::types::FrequencyResponse;
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::get;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use std::sync::Arc;
    use tempfile::TempDir;
    use tower::ServiceExt;
    use tower_http::catch_panic::CatchPanicLayer;

    // ============================================================
    // TOKENIZER TESTS - normalize
    // ============================================================

    #[test]
    fn test_normalize_strips_accents() {
        assert_eq!(normalize("Canción"), vec!["cancion"]);
    }

    #[test]
    fn test_normalize_punctuation_and_numbers() {
        assert_eq!(normalize("Hello, World! 2022"), vec!["hello", "world", "2022"]);
    }

    #[test]
    fn test_normalize_empty_and_whitespace() {
        assert!(normalize("").is_empty());
        assert!(normalize("   \t\n  ").is_empty());
    }

    #[test]
    fn test_normalize_keeps_duplicates_in_order() {
        assert_eq!(normalize("casa auto casa"), vec!["casa", "auto", "casa"]);
    }

    #[test]
    fn test_normalize_single_characters_are_tokens() {
        assert_eq!(normalize("a 1 y b"), vec!["a", "1", "y", "b"]);
    }

    #[test]
    fn test_normalize_folds_latin_diacritics() {
        assert_eq!(
            normalize("ÁÉÍÓÚ ñandú Über Książka"),
            vec!["aeiou", "nandu", "uber", "ksiazka"]
        );
    }

    #[test]
    fn test_normalize_splits_on_separators() {
        assert_eq!(
            normalize("well-known C++ and C#"),
            vec!["well", "known", "c", "and", "c"]
        );
    }

    #[test]
    fn test_normalize_drops_runs_glued_to_other_word_chars() {
        // No word boundary between an ASCII letter and a remaining
        // non-ASCII word character or an underscore.
        assert!(normalize("straße").is_empty());
        assert!(normalize("foo_bar").is_empty());
        assert!(normalize("программировании").is_empty());
    }

    #[test]
    fn test_normalize_is_deterministic() {
        let text = "El niño comió 3 manzanas, ¡qué rico!";
        assert_eq!(normalize(text), normalize(text));
        assert_eq!(
            normalize(text),
            vec!["el", "nino", "comio", "3", "manzanas", "que", "rico"]
        );
    }

    // ============================================================
    // TOKENIZER TESTS - fold_query_term
    // ============================================================

    #[test]
    fn test_fold_query_term_lowercases_only() {
        assert_eq!(fold_query_term("CASA"), "casa");
        // Accents are kept on the query side.
        assert_eq!(fold_query_term("Canción"), "canción");
    }

    // ============================================================
    // HTTP HELPERS
    // ============================================================

    fn fixture() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "Casa, casa.").unwrap();
        std::fs::write(dir.path().join("b.txt"), "casa AUTO auto; auto").unwrap();
        dir
    }

    fn app_with_cache(
        dir: &TempDir,
        cache: SharedResponseCache,
    ) -> (Router, Arc<CollectionIndex>) {
        let index = CollectionIndex::new(dir.path());
        (create_router(index.clone(), cache), index)
    }

    fn app(dir: &TempDir) -> Router {
        app_with_cache(dir, Arc::new(NoResponseCache)).0
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap();
        (status, body)
    }

    // ============================================================
    // QUERY ROUTE
    // ============================================================

    #[tokio::test]
    async fn test_global_frequency() {
        let dir = fixture();
        let (status, body) = get_json(app(&dir), "/?term=casa").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"frecuencia": 3, "term": "casa", "scope": "global"})
        );
    }

    #[tokio::test]
    async fn test_document_frequency() {
        let dir = fixture();
        let (status, body) = get_json(app(&dir), "/?term=casa&doc_name=a.txt").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"frecuencia": 2, "term": "casa", "document": "a.txt"})
        );
        assert!(body.get("scope").is_none());
    }

    #[tokio::test]
    async fn test_term_is_echoed_as_given() {
        let dir = fixture();
        let (_, body) = get_json(app(&dir), "/?term=AUTO").await;

        assert_eq!(body["frecuencia"], 3);
        assert_eq!(body["term"], "AUTO");
    }

    #[tokio::test]
    async fn test_unknown_document_and_term_return_zero() {
        let dir = fixture();

        let (status, body) =
            get_json(app(&dir), "/?term=casa&doc_name=doc_not_loaded.txt").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["frecuencia"], 0);
        assert_eq!(body["document"], "doc_not_loaded.txt");

        let (status, body) = get_json(app(&dir), "/?term=nonexistent_term_xyz").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["frecuencia"], 0);
    }

    #[tokio::test]
    async fn test_accented_query_returns_zero() {
        // Documented current behavior: query terms are not accent-stripped.
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("song.txt"), "Canción").unwrap();

        let (_, body) = get_json(app(&dir), "/?term=Canci%C3%B3n").await;
        assert_eq!(body["frecuencia"], 0);
        assert_eq!(body["term"], "Canción");

        let (_, body) = get_json(app(&dir), "/?term=cancion").await;
        assert_eq!(body["frecuencia"], 1);
    }

    #[tokio::test]
    async fn test_missing_term_is_bad_request() {
        let dir = fixture();

        for uri in ["/", "/?doc_name=a.txt", "/?term=", "/?other=casa"] {
            let (status, body) = get_json(app(&dir), uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "uri: {}", uri);
            assert!(body["error"].as_str().unwrap().contains("term"));
        }
    }

    #[tokio::test]
    async fn test_empty_doc_name_means_global() {
        let dir = fixture();
        let (_, body) = get_json(app(&dir), "/?term=casa&doc_name=").await;

        assert_eq!(body["scope"], "global");
        assert_eq!(body["frecuencia"], 3);
    }

    #[tokio::test]
    async fn test_first_query_triggers_single_load() {
        let dir = fixture();
        let (app, index) = app_with_cache(&dir, Arc::new(NoResponseCache));
        assert_eq!(index.scan_count(), 0);

        let (_, body) = get_json(app.clone(), "/?term=casa").await;
        assert_eq!(body["frecuencia"], 3);
        get_json(app, "/stats").await;

        assert_eq!(index.scan_count(), 1);
    }

    // ============================================================
    // SERVICE ROUTES
    // ============================================================

    #[tokio::test]
    async fn test_health() {
        let dir = fixture();
        let (status, body) = get_json(app(&dir), "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn test_stats() {
        let dir = fixture();
        let (status, body) = get_json(app(&dir), "/stats").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "total_documents": 2,
                "total_unique_terms": 2,
                "total_terms": 6,
                "documents": ["a.txt", "b.txt"],
            })
        );
    }

    #[tokio::test]
    async fn test_documents() {
        let dir = fixture();
        let (status, body) = get_json(app(&dir), "/documents").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"documents": ["a.txt", "b.txt"], "total_count": 2}));
    }

    #[tokio::test]
    async fn test_unknown_route_lists_endpoints() {
        let dir = fixture();
        let (status, body) = get_json(app(&dir), "/does/not/exist").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].is_string());
        assert_eq!(body["available_endpoints"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_missing_collection_still_serves() {
        let dir = tempfile::tempdir().unwrap();
        let index = CollectionIndex::new(dir.path().join("coleccion_2022"));
        let app = create_router(index.clone(), Arc::new(NoResponseCache));

        assert!(index.load().await.is_err());

        let (status, _) = get_json(app.clone(), "/health").await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = get_json(app.clone(), "/stats").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_documents"], 0);
        assert_eq!(body["total_unique_terms"], 0);
        assert_eq!(body["total_terms"], 0);

        let (status, body) = get_json(app, "/?term=casa").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["frecuencia"], 0);
    }

    // ============================================================
    // CACHE & FAILURES
    // ============================================================

    #[tokio::test]
    async fn test_successful_queries_are_cached() {
        let dir = fixture();
        let cache = Arc::new(TtlResponseCache::new(std::time::Duration::from_secs(60)));
        let (app, _) = app_with_cache(&dir, cache.clone());

        let (_, first) = get_json(app.clone(), "/?term=casa&doc_name=b.txt").await;
        let key = cache_key(&[
            ("doc_name".to_string(), "b.txt".to_string()),
            ("term".to_string(), "casa".to_string()),
        ]);
        assert_eq!(
            cache.get(&key),
            Some(FrequencyResponse::document(1, "casa", "b.txt"))
        );

        // Same parameters in another order hit the same entry.
        let (_, second) = get_json(app.clone(), "/?doc_name=b.txt&term=casa").await;
        assert_eq!(first, second);

        // Validation failures are never stored.
        get_json(app, "/?doc_name=b.txt").await;
        assert!(cache.get("doc_name=b.txt").is_none());
    }

    #[tokio::test]
    async fn test_cached_and_uncached_bodies_match() {
        let dir = fixture();
        let cache = Arc::new(TtlResponseCache::new(std::time::Duration::from_secs(60)));
        let (cached, _) = app_with_cache(&dir, cache);
        let uncached = app(&dir);

        for uri in ["/?term=auto", "/?term=auto", "/?term=casa&doc_name=a.txt"] {
            let (_, a) = get_json(cached.clone(), uri).await;
            let (_, b) = get_json(uncached.clone(), uri).await;
            assert_eq!(a, b, "uri: {}", uri);
        }
    }

    #[tokio::test]
    async fn test_encoded_separators_do_not_share_cache_entries() {
        let dir = fixture();
        let cache = Arc::new(TtlResponseCache::new(std::time::Duration::from_secs(60)));
        let (app, _) = app_with_cache(&dir, cache);

        let (_, split) = get_json(app.clone(), "/?term=auto&z=1").await;
        assert_eq!(split["term"], "auto");
        assert_eq!(split["frecuencia"], 3);

        // Decodes to the single term "auto&z=1", which must not reuse the entry above.
        let (status, packed) = get_json(app, "/?term=auto%26z%3D1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(packed["term"], "auto&z=1");
        assert_eq!(packed["frecuencia"], 0);
    }

    #[tokio::test]
    async fn test_panicking_handler_is_opaque_500() {
        async fn boom() -> &'static str {
            panic!("secret internal detail")
        }

        let app = Router::new()
            .route("/boom", get(boom))
            .layer(CatchPanicLayer::custom(handle_panic));

        let (status, body) = get_json(app, "/boom").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Internal server error"}));
    }
}
