//! In-memory store for pending anti-forgery state tokens.
//!
//! Each `/authorize` call stores one token under an opaque session id
//! carried in a cookie; the matching `/callback` consumes it exactly
//! once. Entries expire after ten minutes and a background task purges
//! leftovers, so an abandoned flow never accumulates state.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;
use tokio::sync::RwLock;

/// Pending state lifetime: 10 minutes, matching the provider's
/// authorization code lifetime.
const STATE_LIFETIME: Duration = Duration::from_secs(600);
/// Cleanup interval: 5 minutes.
const CLEANUP_INTERVAL: Duration = Duration::from_secs(300);

/// An anti-forgery token awaiting its one callback.
struct PendingState {
    state: String,
    created_at: Instant,
}

impl PendingState {
    fn is_expired(&self) -> bool {
        self.created_at.elapsed() > STATE_LIFETIME
    }
}

/// In-memory session-keyed state store.
#[derive(Clone, Default)]
pub struct StateStore {
    pending: Arc<RwLock<HashMap<String, PendingState>>>,
}

impl StateStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a fresh anti-forgery token: 32 bytes from the OS RNG,
    /// URL-safe base64 without padding.
    #[must_use]
    pub fn generate_state() -> String {
        let mut bytes = [0u8; 32];
        rand::rngs::OsRng.fill_bytes(&mut bytes);
        URL_SAFE_NO_PAD.encode(bytes)
    }

    /// Store a state token under a new opaque session id.
    ///
    /// Returns the session id to set as a cookie.
    pub async fn insert(&self, state: String) -> String {
        let session_id = uuid::Uuid::new_v4().simple().to_string();

        self.pending
            .write()
            .await
            .insert(session_id.clone(), PendingState { state, created_at: Instant::now() });

        session_id
    }

    /// Consume the state token for a session (one-time use).
    ///
    /// Returns `None` when the session is unknown or the entry expired.
    pub async fn consume(&self, session_id: &str) -> Option<String> {
        let mut pending = self.pending.write().await;
        let entry = pending.remove(session_id)?;

        if entry.is_expired() {
            return None;
        }

        Some(entry.state)
    }

    /// Start the background cleanup task for expired entries.
    pub fn start_cleanup_task(self: Arc<Self>) {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(CLEANUP_INTERVAL);
            loop {
                interval.tick().await;
                self.cleanup_expired().await;
            }
        });
    }

    async fn cleanup_expired(&self) {
        let mut pending = self.pending.write().await;
        let before = pending.len();
        pending.retain(|_, entry| !entry.is_expired());
        let removed = before - pending.len();
        if removed > 0 {
            tracing::debug!(count = removed, "Cleaned up expired state tokens");
        }
    }
}

impl std::fmt::Debug for StateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateStore").finish()
    }
}
