//! Response Cache
//!
//! Short-lived cache in front of the term-frequency route. Identical query
//! strings (same parameters, any order) are answered from the cache until
//! the entry expires. The index never changes after loading, so a cached
//! body is always identical to a fresh one.

use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;

use super::types::FrequencyResponse;

pub const DEFAULT_TTL: Duration = Duration::from_secs(60);
const MAX_ENTRIES: u64 = 10_000;

pub type SharedResponseCache = Arc<dyn ResponseCache>;

pub trait ResponseCache: Send + Sync {
    fn get(&self, key: &str) -> Option<FrequencyResponse>;
    fn insert(&self, key: String, response: FrequencyResponse);
}

/// Builds the configured cache. `None` disables caching.
pub fn response_cache(ttl: Option<Duration>) -> SharedResponseCache {
    match ttl {
        Some(ttl) if !ttl.is_zero() => Arc::new(TtlResponseCache::new(ttl)),
        _ => Arc::new(NoResponseCache),
    }
}

/// Cache key for a query string: decoded pairs sorted, then re-encoded so a
/// `&` or `=` inside a value cannot alias another query.
pub fn cache_key(pairs: &[(String, String)]) -> String {
    let mut sorted: Vec<&(String, String)> = pairs.iter().collect();
    sorted.sort();
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(sorted)
        .finish()
}

#[derive(Debug, Clone)]
pub struct TtlResponseCache {
    cache: Cache<String, FrequencyResponse>,
}

impl TtlResponseCache {
    pub fn new(ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(MAX_ENTRIES)
            .time_to_live(ttl)
            .build();
        Self { cache }
    }
}

impl ResponseCache for TtlResponseCache {
    fn get(&self, key: &str) -> Option<FrequencyResponse> {
        self.cache.get(key)
    }

    fn insert(&self, key: String, response: FrequencyResponse) {
        self.cache.insert(key, response);
    }
}

/// Pass-through used when caching is disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoResponseCache;

impl ResponseCache for NoResponseCache {
    fn get(&self, _key: &str) -> Option<FrequencyResponse> {
        None
    }

    fn insert(&self, _key: String, _response: FrequencyResponse) {}
}
