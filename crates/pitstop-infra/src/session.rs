//! In-memory session store with TTL eviction.
//!
//! Sessions are process-lifetime state: losing them on restart only
//! means a user re-enters `/start`. The TTL bounds memory for users who
//! abandon a flow mid-step; an expired entry reads as a fresh idle
//! session. `sweep` physically removes expired entries and is driven by
//! a background task in the server.

use std::time::{Duration, Instant};

use dashmap::DashMap;

use pitstop_core::session::SessionStore;
use pitstop_types::session::Session;

/// Default retention for an untouched session.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(30 * 60);

struct SessionEntry {
    session: Session,
    touched: Instant,
}

/// DashMap-backed implementation of `SessionStore`.
///
/// Concurrent access across distinct user ids is lock-free per shard;
/// the dialog service serializes turns per user on top of this.
pub struct InMemorySessionStore {
    entries: DashMap<String, SessionEntry>,
    ttl: Duration,
}

impl InMemorySessionStore {
    /// Create a store with the given TTL.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Remove expired entries. Returns how many were evicted.
    pub fn sweep(&self) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| entry.touched.elapsed() < self.ttl);
        before - self.entries.len()
    }

    /// Number of live (possibly expired, not yet swept) entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_TTL)
    }
}

impl SessionStore for InMemorySessionStore {
    async fn get(&self, user_id: &str) -> Session {
        match self.entries.get(user_id) {
            Some(entry) if entry.touched.elapsed() < self.ttl => entry.session.clone(),
            _ => Session::default(),
        }
    }

    async fn put(&self, user_id: &str, session: Session) {
        self.entries.insert(
            user_id.to_string(),
            SessionEntry {
                session,
                touched: Instant::now(),
            },
        );
    }
}
