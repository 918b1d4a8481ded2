//! SessionStore trait definition.
//!
//! Maps a messenger user id to that user's conversational session.
//! Implementations live in pitstop-infra (e.g. `InMemorySessionStore`).
//! The contract is deliberately infallible: a durable backing store is a
//! valid swap, but it must absorb its own failures and must preserve
//! per-user isolation.

use std::sync::Arc;

use pitstop_types::session::Session;

/// Per-user session storage.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait SessionStore: Send + Sync {
    /// Fetch the session for a user, or a default idle session when
    /// absent. A read never mutates the store.
    fn get(&self, user_id: &str) -> impl std::future::Future<Output = Session> + Send;

    /// Overwrite the session for a user.
    fn put(
        &self,
        user_id: &str,
        session: Session,
    ) -> impl std::future::Future<Output = ()> + Send;
}

impl<T: SessionStore> SessionStore for Arc<T> {
    fn get(&self, user_id: &str) -> impl std::future::Future<Output = Session> + Send {
        T::get(self, user_id)
    }

    fn put(
        &self,
        user_id: &str,
        session: Session,
    ) -> impl std::future::Future<Output = ()> + Send {
        T::put(self, user_id, session)
    }
}
