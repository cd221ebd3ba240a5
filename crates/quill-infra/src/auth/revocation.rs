//! In-memory token revocation store.
//!
//! Logout places the token's `jti` here until the token would have
//! expired on its own, so only that one token dies while the user's
//! other sessions keep working. Entries are pruned lazily on lookup.
//! Note: revocations are lost on process restart.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::ports::TokenRevocationStore;

/// Revoked token ids with their expiry, behind an async RwLock.
pub struct InMemoryRevocationStore {
    revoked: RwLock<HashMap<Uuid, Instant>>,
}

impl InMemoryRevocationStore {
    pub fn new() -> Self {
        Self {
            revoked: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryRevocationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenRevocationStore for InMemoryRevocationStore {
    async fn revoke(&self, jti: Uuid, ttl: Duration) {
        let expires_at = Instant::now() + ttl;
        let mut revoked = self.revoked.write().await;
        revoked.insert(jti, expires_at);

        // Drop entries whose token has expired anyway.
        let now = Instant::now();
        revoked.retain(|_, exp| *exp > now);
    }

    async fn is_revoked(&self, jti: Uuid) -> bool {
        let revoked = self.revoked.read().await;
        match revoked.get(&jti) {
            Some(expires_at) => *expires_at > Instant::now(),
            None => false,
        }
    }
}
