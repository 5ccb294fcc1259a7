use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::models::Product;
use crate::services::catalog::{CatalogClient, CatalogError};

/// In-process catalog cache
///
/// Products are fetched once per TTL window and shared as `Arc<Vec<Product>>`
/// so every ranking request works on in-memory data.
pub struct CatalogCache {
    cache: moka::future::Cache<String, Arc<Vec<Product>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl CatalogCache {
    pub fn new(max_entries: u64, ttl_secs: u64) -> Self {
        let cache = moka::future::CacheBuilder::new(max_entries)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self {
            cache,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub async fn get(&self, key: &str) -> Option<Arc<Vec<Product>>> {
        let value = self.cache.get(key).await;
        match value {
            Some(_) => self.hits.fetch_add(1, Ordering::Relaxed),
            None => self.misses.fetch_add(1, Ordering::Relaxed),
        };
        value
    }

    pub async fn insert(&self, key: &str, products: Vec<Product>) -> Arc<Vec<Product>> {
        let products = Arc::new(products);
        self.cache.insert(key.to_string(), products.clone()).await;
        products
    }

    /// Catalog from cache, fetching from upstream on a miss.
    ///
    /// Concurrent misses for the same source wait on a single upstream fetch.
    pub async fn get_or_fetch(
        &self,
        client: &CatalogClient,
    ) -> Result<Arc<Vec<Product>>, CatalogError> {
        let key = CacheKey::catalog(client.base_url());

        if self.cache.contains_key(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            tracing::trace!("Catalog cache hit: {}", key);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            tracing::trace!("Catalog cache miss: {}", key);
        }

        self.cache
            .try_get_with(key, async { client.fetch_products().await.map(Arc::new) })
            .await
            .map_err(CatalogError::Shared)
    }

    pub async fn invalidate(&self, key: &str) {
        self.cache.invalidate(key).await;
    }

    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
        tracing::debug!("Invalidated catalog cache");
    }

    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;

        CacheStats {
            entries: self.cache.entry_count(),
            hit_count: hits,
            miss_count: misses,
            hit_rate: if total == 0 {
                0.0
            } else {
                hits as f64 / total as f64
            },
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub entries: u64,
    pub hit_count: u64,
    pub miss_count: u64,
    pub hit_rate: f64,
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Build a cache key for a catalog source
    pub fn catalog(base_url: &str) -> String {
        format!("catalog:{}", base_url.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_builder() {
        assert_eq!(
            CacheKey::catalog("http://catalog.test/"),
            "catalog:http://catalog.test"
        );
    }

    #[tokio::test]
    async fn test_cache_insert_get() {
        let cache = CatalogCache::new(4, 60);
        assert!(cache.get("k").await.is_none());

        cache
            .insert("k", vec![Product::new("1", "Blocks", &["Building"], None)])
            .await;
        let products = cache.get("k").await.unwrap();
        assert_eq!(products.len(), 1);

        let stats = cache.stats();
        assert_eq!(stats.hit_count, 1);
        assert_eq!(stats.miss_count, 1);
        assert_eq!(stats.hit_rate, 0.5);

        cache.invalidate("k").await;
        assert!(cache.get("k").await.is_none());
    }

    #[tokio::test]
    async fn test_get_or_fetch_hits_upstream_once() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/products")
            .with_status(200)
            .with_body(r#"[{"id":"1","name":"Blocks","categories":["Building"]}]"#)
            .expect(1)
            .create_async()
            .await;

        let client = CatalogClient::new(server.url(), 5).unwrap();
        let cache = CatalogCache::new(4, 60);

        let first = cache.get_or_fetch(&client).await.unwrap();
        let second = cache.get_or_fetch(&client).await.unwrap();

        mock.assert_async().await;
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_concurrent_misses_share_one_fetch() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/products")
            .with_status(200)
            .with_body(r#"[{"id":"1","name":"Blocks","categories":["Building"]}]"#)
            .expect(1)
            .create_async()
            .await;

        let client = CatalogClient::new(server.url(), 5).unwrap();
        let cache = CatalogCache::new(4, 60);

        let (a, b, c) = tokio::join!(
            cache.get_or_fetch(&client),
            cache.get_or_fetch(&client),
            cache.get_or_fetch(&client)
        );

        mock.assert_async().await;
        let a = a.unwrap();
        assert!(Arc::ptr_eq(&a, &b.unwrap()));
        assert!(Arc::ptr_eq(&a, &c.unwrap()));
    }

    #[tokio::test]
    async fn test_failed_fetch_is_not_cached() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/products")
            .with_status(503)
            .expect(2)
            .create_async()
            .await;

        let client = CatalogClient::new(server.url(), 5).unwrap();
        let cache = CatalogCache::new(4, 60);

        let err = cache.get_or_fetch(&client).await.unwrap_err();
        assert!(err.to_string().contains("503"));
        assert!(cache.get_or_fetch(&client).await.is_err());

        mock.assert_async().await;
        assert_eq!(cache.stats().miss_count, 2);
    }
}
