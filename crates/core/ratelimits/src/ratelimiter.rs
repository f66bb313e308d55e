use std::collections::hash_map::DefaultHasher;
use std::hash::Hasher;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use dashmap::DashMap;
use serde::Serialize;

pub trait RequestKind {
    type R<'a>;
}

pub trait RatelimitResolver<R>: Send + Sync {
    /// Bucket a request counts against, and optionally the resource it targets
    fn resolve_bucket<'a>(&self, request: &'a R) -> (&'a str, Option<&'a str>);
    /// Requests allowed per window in a bucket
    fn resolve_bucket_limit(&self, bucket: &str) -> u32;
}

#[derive(Clone)]
pub struct RatelimitStorage<K: RequestKind> {
    pub resolver: Arc<dyn for<'a> RatelimitResolver<K::R<'a>>>,
    pub map: Arc<DashMap<u64, Entry>>,
    pub window: Duration,
}

impl<K: RequestKind> RatelimitStorage<K> {
    pub fn new<R: for<'a> RatelimitResolver<K::R<'a>> + 'static>(
        resolver: R,
        window: Duration,
    ) -> Self {
        Self {
            resolver: Arc::new(resolver),
            map: Arc::new(DashMap::new()),
            window,
        }
    }
}

/// Ratelimit Bucket
#[derive(Clone, Copy, Debug)]
pub struct Entry {
    used: u32,
    reset: u128,
}

/// Milliseconds since the Unix epoch
fn now() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
}

impl Entry {
    /// Fresh bucket for a window starting now
    pub fn new(window: Duration) -> Entry {
        Entry {
            used: 0,
            reset: now() + window.as_millis(),
        }
    }

    /// Deduct one unit from the bucket, starting a new window if the old one ran out
    pub fn deduct(&mut self, window: Duration) {
        if now() > self.reset {
            self.used = 1;
            self.reset = now() + window.as_millis();
        } else {
            self.used += 1;
        }
    }

    /// Get remaining units in the bucket
    pub fn get_remaining(&self, limit: u32) -> u32 {
        if now() > self.reset {
            limit
        } else {
            limit.saturating_sub(self.used)
        }
    }

    /// Get how long bucket has until reset
    pub fn left_until_reset(&self) -> u128 {
        self.reset.saturating_sub(now())
    }
}

/// Ratelimit Guard
#[derive(Serialize, Clone, Copy, Debug)]
pub struct Ratelimiter {
    pub key: u64,
    pub limit: u32,
    pub remaining: u32,
    pub reset: u128,
}

impl Ratelimiter {
    /// Take one unit from the bucket `identifier` holds for the target
    ///
    /// Fails without deducting when the bucket is empty.
    pub fn from(
        map: &DashMap<u64, Entry>,
        identifier: &str,
        limit: u32,
        window: Duration,
        (bucket, resource): (&str, Option<&str>),
    ) -> Result<Ratelimiter, Ratelimiter> {
        let mut key = DefaultHasher::new();
        key.write(identifier.as_bytes());
        key.write(bucket.as_bytes());

        if let Some(id) = resource {
            key.write(id.as_bytes());
        }

        let key = key.finish();

        // Holding the shard lock keeps check and deduct together
        let mut entry = map.entry(key).or_insert_with(|| Entry::new(window));

        let remaining = entry.get_remaining(limit);
        let mut ratelimiter = Ratelimiter {
            key,
            limit,
            remaining,
            reset: entry.left_until_reset(),
        };

        if remaining == 0 {
            return Err(ratelimiter);
        }

        entry.deduct(window);
        ratelimiter.remaining -= 1;
        ratelimiter.reset = entry.left_until_reset();

        Ok(ratelimiter)
    }
}
