//! In-process cache of `/api/token-info` answers.

use dashmap::DashMap;
use explorer_tokens_types::cache_key::TokenInfoKey;
use explorer_tokens_types::token::TokenInfo;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct Entry {
    content: Option<TokenInfo>,
    expires_at: Instant,
}

/// TTL cache keyed by [`TokenInfoKey`].
///
/// Misses ("no such token") are cached too. Clones share the same entries.
#[derive(Debug, Clone)]
pub struct ResponseCache {
    ttl: Duration,
    entries: Arc<DashMap<TokenInfoKey, Entry>>,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Arc::new(DashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// `Some(content)` for a live entry, `None` when absent or expired.
    pub fn get(&self, key: &TokenInfoKey) -> Option<Option<TokenInfo>> {
        let entry = self.entries.get(key)?;
        if Instant::now() < entry.expires_at {
            return Some(entry.content.clone());
        }
        drop(entry);
        self.entries.remove_if(key, |_, entry| Instant::now() >= entry.expires_at);
        None
    }

    pub fn insert(&self, key: TokenInfoKey, content: Option<TokenInfo>) {
        if self.ttl.is_zero() {
            return;
        }
        self.entries.insert(
            key,
            Entry {
                content,
                expires_at: Instant::now() + self.ttl,
            },
        );
    }

    /// Drops every expired entry.
    pub fn purge_expired(&self) {
        let now = Instant::now();
        self.entries.retain(|_, entry| now < entry.expires_at);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
