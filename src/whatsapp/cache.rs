use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use super::model::{CacheStats, ValidationResult};
use crate::phone::PhoneNumber;

#[derive(Debug)]
struct CacheEntry {
    result: ValidationResult,
    inserted_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.inserted_at) > ttl
    }
}

/// Successful validations keyed by normalized number. Expired entries are evicted on read.
#[derive(Debug)]
pub(crate) struct ValidationCache {
    map: RwLock<HashMap<PhoneNumber, CacheEntry>>,
    ttl: Duration,
}

impl ValidationCache {
    pub(crate) fn new(ttl: Duration) -> Self {
        Self {
            map: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    pub(crate) fn ttl(&self) -> Duration {
        self.ttl
    }

    pub(crate) async fn get(&self, key: &PhoneNumber) -> Option<ValidationResult> {
        let now = Instant::now();
        {
            let guard = self.map.read().await;
            match guard.get(key) {
                None => return None,
                Some(entry) if !entry.is_expired(now, self.ttl) => {
                    return Some(entry.result.clone());
                }
                Some(_) => {}
            }
        }

        // Expired: evict, unless a fresh result was stored in the meantime.
        let mut guard = self.map.write().await;
        match guard.get(key) {
            Some(entry) if entry.is_expired(now, self.ttl) => {
                guard.remove(key);
                None
            }
            Some(entry) => Some(entry.result.clone()),
            None => None,
        }
    }

    pub(crate) async fn put(&self, key: PhoneNumber, result: ValidationResult) {
        let entry = CacheEntry {
            result,
            inserted_at: Instant::now(),
        };
        self.map.write().await.insert(key, entry);
    }

    pub(crate) async fn clear(&self) {
        self.map.write().await.clear();
    }

    pub(crate) async fn stats(&self) -> CacheStats {
        let now = Instant::now();
        let guard = self.map.read().await;
        let total = guard.len();
        let valid = guard
            .values()
            .filter(|entry| !entry.is_expired(now, self.ttl))
            .count();
        CacheStats {
            total,
            valid,
            expired: total - valid,
        }
    }
}
