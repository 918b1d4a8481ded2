//! Dialog service orchestrating session storage, persistence, and delivery.
//!
//! `DialogService` is generic over the session store, the diagnostic
//! repository, and the message gateway to keep clean layering
//! (pitstop-core never depends on pitstop-infra). One inbound event
//! produces at most one session mutation, at most one repository write,
//! and at most one outbound message.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use pitstop_types::session::Session;
use pitstop_types::wire::Reply;

use crate::gateway::MessageGateway;
use crate::repository::diagnostic::DiagnosticRepository;
use crate::session::SessionStore;

use super::event::Event;
use super::texts;
use super::transition::transition;

/// Orchestrates one conversation turn per inbound webhook event.
pub struct DialogService<S, R, G>
where
    S: SessionStore,
    R: DiagnosticRepository,
    G: MessageGateway,
{
    sessions: S,
    diagnostics: R,
    gateway: G,
    /// Per-user turn locks: concurrent events for the same user are
    /// serialized so the get/transition/put sequence never interleaves.
    /// Distinct users proceed concurrently on separate entries.
    turn_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl<S, R, G> DialogService<S, R, G>
where
    S: SessionStore,
    R: DiagnosticRepository,
    G: MessageGateway,
{
    /// Create a new dialog service over the given ports.
    pub fn new(sessions: S, diagnostics: R, gateway: G) -> Self {
        Self {
            sessions,
            diagnostics,
            gateway,
            turn_locks: DashMap::new(),
        }
    }

    /// Handle one inbound event for a user.
    ///
    /// Never fails outward: validation problems re-prompt the user,
    /// repository failures park the session behind a retry prompt, and
    /// gateway failures are logged and swallowed.
    pub async fn handle_update(&self, chat_id: i64, sender_id: i64, event: Event) {
        let user_id = sender_id.to_string();
        let lock = self
            .turn_locks
            .entry(user_id.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let _guard = lock.lock().await;

        let session = self.sessions.get(&user_id).await;
        let turn = transition(&session, &event);

        if let Some(draft) = turn.write {
            // Park the session before attempting the write so a crash or
            // delivery failure after a successful insert never loses it.
            self.sessions.put(&user_id, turn.session).await;
            match self.diagnostics.save(&draft).await {
                Ok(diagnostic) => {
                    debug!(user_id = %user_id, id = diagnostic.id, "diagnostic saved");
                    self.sessions.put(&user_id, Session::default()).await;
                    self.deliver(chat_id, &texts::completion_summary(&diagnostic))
                        .await;
                }
                Err(e) => {
                    warn!(user_id = %user_id, error = %e, "diagnostic save failed");
                    self.deliver(chat_id, &texts::save_failed()).await;
                }
            }
            return;
        }

        if turn.session != session {
            self.sessions.put(&user_id, turn.session).await;
        }
        if let Some(reply) = turn.reply {
            self.deliver(chat_id, &reply).await;
        }
    }

    /// Fire-and-forget delivery; failures are observable but non-fatal.
    async fn deliver(&self, chat_id: i64, reply: &Reply) {
        if let Err(e) = self.gateway.send(chat_id, reply).await {
            warn!(chat_id, error = %e, "outbound message delivery failed");
        }
    }
}
