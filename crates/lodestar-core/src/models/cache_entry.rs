use chrono::{DateTime, Utc};

/// A memoized value owned by the query cache.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    pub key: String,
    pub value: V,
    pub created_at: DateTime<Utc>,
}

impl<V> CacheEntry<V> {
    pub fn new(key: String, value: V) -> Self {
        Self {
            key,
            value,
            created_at: Utc::now(),
        }
    }
}
