//! # Session Proof Cache
//!
//! In-memory cache of servers this account has already been validated against,
//! keyed by server identity hash. A repeat connection whose server presents the
//! same public key can skip the external session service.
//!
//! ## Features
//! - **Thread-safe**: `Arc<Mutex<>>` interior, cheap to clone and share
//! - **TTL-based expiration**: entries expire after a configurable duration
//! - **Memory-bounded**: oldest entry is evicted once capacity is exceeded
//!
//! ## Usage
//! ```ignore
//! use blockwire::transport::session_cache::SessionCache;
//! use std::time::Duration;
//!
//! let cache = SessionCache::new(64, Duration::from_secs(600));
//! cache.insert(identity_hash.clone(), proof).await;
//! if let Some(proof) = cache.get(&identity_hash).await {
//!     // compare proof.server_public_key with the key the server just sent
//! }
//! ```

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use futures::future::BoxFuture;
use futures::FutureExt;
use tokio::sync::Mutex;
use tracing::{debug, trace};

use crate::config::SessionConfig;
use crate::protocol::session::{CachedSessionProof, SessionProofStore};

/// A cached proof with metadata
#[derive(Clone, Debug)]
struct ProofEntry {
    proof: Arc<CachedSessionProof>,
    created_at: SystemTime,
    ttl: Duration,
}

impl ProofEntry {
    fn is_expired(&self) -> bool {
        match self.created_at.elapsed() {
            Ok(elapsed) => elapsed > self.ttl,
            Err(_) => true, // clock went backwards
        }
    }
}

/// Thread-safe in-memory proof cache
#[derive(Clone)]
pub struct SessionCache {
    max_entries: usize,
    default_ttl: Duration,
    inner: Arc<Mutex<SessionCacheInner>>,
}

struct SessionCacheInner {
    proofs: HashMap<String, ProofEntry>,
    total_inserts: u64,
    hits: u64,
    misses: u64,
}

impl SessionCache {
    /// Create a new cache
    ///
    /// # Arguments
    /// * `max_entries` - Maximum number of servers to remember
    /// * `default_ttl` - How long a validation stays trusted
    pub fn new(max_entries: usize, default_ttl: Duration) -> Self {
        Self {
            max_entries,
            default_ttl,
            inner: Arc::new(Mutex::new(SessionCacheInner {
                proofs: HashMap::with_capacity(max_entries),
                total_inserts: 0,
                hits: 0,
                misses: 0,
            })),
        }
    }

    /// Cache sized and timed from [`SessionConfig`].
    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(config.cache_capacity, config.cache_ttl)
    }

    /// Remember a validated server
    pub async fn insert<S: Into<String>>(&self, server_identity: S, proof: CachedSessionProof) {
        let mut inner = self.inner.lock().await;

        let entry = ProofEntry {
            proof: Arc::new(proof),
            created_at: SystemTime::now(),
            ttl: self.default_ttl,
        };

        self.evict_expired(&mut inner);

        inner.proofs.insert(server_identity.into(), entry);
        inner.total_inserts += 1;

        if inner.proofs.len() > self.max_entries {
            self.evict_oldest(&mut inner);
        }

        trace!(proof_count = inner.proofs.len(), "Session proof stored");
    }

    /// Look up a server, dropping the entry if it has expired
    pub async fn get(&self, server_identity: &str) -> Option<Arc<CachedSessionProof>> {
        let mut inner = self.inner.lock().await;

        if let Some(entry) = inner.proofs.get(server_identity) {
            if !entry.is_expired() {
                let proof = entry.proof.clone();
                inner.hits += 1;
                trace!("Session proof cache hit");
                return Some(proof);
            }
        }

        inner.proofs.remove(server_identity);
        inner.misses += 1;
        trace!("Session proof cache miss or expired");
        None
    }

    /// Forget every server
    pub async fn clear(&self) {
        let mut inner = self.inner.lock().await;
        let count = inner.proofs.len();
        inner.proofs.clear();
        debug!(cleared_count = count, "Session proof cache cleared");
    }

    /// Get current cache statistics
    pub async fn stats(&self) -> SessionCacheStats {
        let inner = self.inner.lock().await;
        SessionCacheStats {
            total_entries: inner.proofs.len(),
            max_entries: self.max_entries,
            expired_count: inner.proofs.values().filter(|e| e.is_expired()).count(),
            total_inserts: inner.total_inserts,
            hits: inner.hits,
            misses: inner.misses,
        }
    }

    fn evict_expired(&self, inner: &mut SessionCacheInner) {
        let before = inner.proofs.len();
        inner.proofs.retain(|_, entry| !entry.is_expired());
        let after = inner.proofs.len();

        if before != after {
            debug!(
                removed_count = before - after,
                remaining_count = after,
                "Expired session proofs evicted"
            );
        }
    }

    fn evict_oldest(&self, inner: &mut SessionCacheInner) {
        if let Some(oldest_key) = inner
            .proofs
            .iter()
            .min_by_key(|(_, entry)| entry.created_at)
            .map(|(k, _)| k.clone())
        {
            inner.proofs.remove(&oldest_key);
            debug!("Oldest session proof evicted to make room");
        }
    }
}

impl SessionProofStore for SessionCache {
    fn lookup<'a>(&'a self, server_identity: &'a str) -> BoxFuture<'a, Option<CachedSessionProof>> {
        async move { self.get(server_identity).await.map(|p| (*p).clone()) }.boxed()
    }

    fn store<'a>(
        &'a self,
        server_identity: &'a str,
        proof: CachedSessionProof,
    ) -> BoxFuture<'a, ()> {
        async move { self.insert(server_identity, proof).await }.boxed()
    }
}

/// Statistics about the proof cache
#[derive(Debug, Clone, Copy)]
pub struct SessionCacheStats {
    pub total_entries: usize,
    pub max_entries: usize,
    /// Expired but not yet evicted
    pub expired_count: usize,
    pub total_inserts: u64,
    pub hits: u64,
    pub misses: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proof(key: u8) -> CachedSessionProof {
        CachedSessionProof {
            username: "Steve".into(),
            server_public_key: vec![key; 4],
            validated_at: 0,
        }
    }

    #[tokio::test]
    #[allow(clippy::unwrap_used)]
    async fn test_store_and_lookup() {
        let cache = SessionCache::new(10, Duration::from_secs(60));
        cache.store("abc", proof(1)).await;
        let found = cache.lookup("abc").await.unwrap();
        assert_eq!(found.server_public_key, vec![1; 4]);
        assert_eq!(cache.stats().await.hits, 1);
    }

    #[tokio::test]
    async fn test_missing_server() {
        let cache = SessionCache::new(10, Duration::from_secs(60));
        assert!(cache.lookup("nope").await.is_none());
        assert_eq!(cache.stats().await.misses, 1);
    }

    #[tokio::test]
    async fn test_expired_entry_is_dropped() {
        let cache = SessionCache::new(10, Duration::from_millis(1));
        cache.insert("abc", proof(1)).await;
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(cache.get("abc").await.is_none());
        assert_eq!(cache.stats().await.total_entries, 0);
    }

    #[tokio::test]
    async fn test_capacity_eviction() {
        let cache = SessionCache::new(3, Duration::from_secs(60));
        for i in 0..5u8 {
            cache.insert(format!("server-{i}"), proof(i)).await;
        }
        let stats = cache.stats().await;
        assert_eq!(stats.total_entries, 3);
        assert_eq!(stats.total_inserts, 5);
    }

    #[tokio::test]
    async fn test_clear() {
        let cache = SessionCache::new(10, Duration::from_secs(60));
        cache.insert("abc", proof(1)).await;
        cache.clear().await;
        assert!(cache.get("abc").await.is_none());
    }
}
