//! Storage behind automatic persisted queries.

use async_graphql::extensions::apollo_persisted_queries::CacheStorage;
use async_graphql::parser::types::ExecutableDocument;
use moka::sync::Cache;

/// Hash-to-document entries kept by the persisted query extension.
pub const PERSISTED_QUERY_CAPACITY: u64 = 100;

/// Bounded, shared map from a query's SHA-256 hash to its text.
#[derive(Clone)]
pub struct PersistedQueryCache {
    inner: Cache<String, ExecutableDocument>,
}

impl PersistedQueryCache {
    pub fn new(capacity: u64) -> Self {
        Self {
            inner: Cache::new(capacity),
        }
    }
}

impl Default for PersistedQueryCache {
    fn default() -> Self {
        Self::new(PERSISTED_QUERY_CAPACITY)
    }
}

#[async_trait::async_trait]
impl CacheStorage for PersistedQueryCache {
    async fn get(&self, key: String) -> Option<ExecutableDocument> {
        self.inner.get(&key)
    }

    async fn set(&self, key: String, query: ExecutableDocument) {
        self.inner.insert(key, query);
    }
}
