use std::{
    collections::HashMap,
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
    time::Duration,
};

use log::{debug, warn};
use tokio::time::Instant;

use crate::{config::DEFAULT_CACHE_TTL, models::Quote};

#[derive(Clone, Debug)]
struct CacheEntry {
    quote: Quote,
    stored_at: Instant,
}

/// Time-bounded in-memory quote store. Entries older than the TTL stay in
/// the map but are not returned by [`QuoteCache::get`].
#[derive(Debug)]
pub struct QuoteCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl Default for QuoteCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL)
    }
}

impl QuoteCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the cached quote only while it is still fresh.
    pub fn get(&self, symbol: &str) -> Option<Quote> {
        let entries = self.read();
        let entry = entries.get(symbol)?;

        if entry.stored_at.elapsed() < self.ttl {
            Some(entry.quote.clone())
        } else {
            debug!("Cached quote for {} is stale", symbol);
            None
        }
    }

    pub fn put(&self, symbol: &str, quote: Quote) {
        self.write().insert(
            symbol.to_string(),
            CacheEntry {
                quote,
                stored_at: Instant::now(),
            },
        );
    }

    /// Number of stored entries, stale ones included.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.read().unwrap_or_else(|poisoned| {
            warn!("Quote cache lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.write().unwrap_or_else(|poisoned| {
            warn!("Quote cache lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }
}
