//! Single-slot catalog cache with stale fallback

use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use crate::domain::ProductCard;

/// The one cached catalog page
#[derive(Debug, Clone)]
struct CacheEntry {
    items: Vec<ProductCard>,
    /// Page size the entry was fetched with
    limit: usize,
    /// `None` when `now + ttl` overflows, i.e. never expires
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn covers(&self, limit: usize) -> bool {
        self.limit >= limit
    }

    fn is_fresh_at(&self, now: Instant) -> bool {
        self.expires_at.is_none_or(|expires_at| now < expires_at)
    }

    fn first(&self, limit: usize) -> Vec<ProductCard> {
        self.items.iter().take(limit).cloned().collect()
    }
}

/// Holds at most one catalog page
///
/// A successful fetch replaces the slot wholesale. Reads for a page size
/// larger than the stored one never hit. A zero TTL disables freshness, but
/// the slot is still available as a stale fallback.
#[derive(Debug)]
pub struct CatalogCache {
    ttl: Duration,
    slot: RwLock<Option<CacheEntry>>,
}

impl CatalogCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: RwLock::new(None),
        }
    }

    /// Fresh items for `limit`, if any
    pub async fn get_cached_products(&self, limit: usize) -> Option<Vec<ProductCard>> {
        self.cached_products_at(limit, Instant::now()).await
    }

    /// Items for `limit` regardless of age
    pub async fn get_stale_products(&self, limit: usize) -> Option<Vec<ProductCard>> {
        let slot = self.slot.read().await;

        slot.as_ref()
            .filter(|entry| entry.covers(limit))
            .map(|entry| entry.first(limit))
    }

    /// Replaces the slot with `items` fetched for `limit`
    pub async fn set_cache(&self, items: Vec<ProductCard>, limit: usize) {
        let entry = CacheEntry {
            items,
            limit,
            expires_at: Instant::now().checked_add(self.ttl),
        };

        *self.slot.write().await = Some(entry);
    }

    async fn cached_products_at(&self, limit: usize, now: Instant) -> Option<Vec<ProductCard>> {
        if self.ttl.is_zero() {
            return None;
        }

        let slot = self.slot.read().await;

        slot.as_ref()
            .filter(|entry| entry.covers(limit) && entry.is_fresh_at(now))
            .map(|entry| entry.first(limit))
    }
}
