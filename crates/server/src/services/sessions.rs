//! In-memory session registry.
//!
//! Maps opaque session tokens to the identity that logged in with them.
//! Sessions live until logout or process restart; there is no expiry.

use std::collections::HashMap;

use tokio::sync::RwLock;
use tracing::instrument;

use shipment_tracker_core::SessionToken;

use crate::models::{Identity, Session};

/// Registry of live sessions.
///
/// All access goes through an async `RwLock`, so concurrent requests may
/// create, look up and revoke sessions safely. Each service instance owns its
/// own registry; nothing is process-global.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<SessionToken, Session>>,
}

impl SessionRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new session for `identity` under a freshly generated token.
    #[instrument(skip_all, fields(role = %identity.role))]
    pub async fn create(&self, identity: Identity) -> Session {
        let mut sessions = self.sessions.write().await;

        // UUID v4 collisions are practically impossible, but never overwrite a live session.
        let mut token = SessionToken::generate();
        while sessions.contains_key(&token) {
            token = SessionToken::generate();
        }

        let session = Session { token, identity };
        sessions.insert(session.token.clone(), session.clone());
        tracing::debug!(active = sessions.len(), "Session created");
        session
    }

    /// Look up the session registered under `token`.
    pub async fn get(&self, token: &SessionToken) -> Option<Session> {
        self.sessions.read().await.get(token).cloned()
    }

    /// Revoke the session registered under `token`.
    ///
    /// Returns whether a session was removed; revoking an unknown token is a no-op.
    pub async fn delete(&self, token: &SessionToken) -> bool {
        self.sessions.write().await.remove(token).is_some()
    }

    /// Number of live sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Whether no sessions are live.
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}
