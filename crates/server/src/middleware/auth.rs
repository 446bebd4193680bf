//! Authentication extractors.
//!
//! Handlers declare their session requirement in their signature:
//!
//! ```rust,ignore
//! async fn search(RequireSession(session): RequireSession) -> Result<Json<Value>> {
//!     session.require(Permission::Track)?;
//!     // ...
//! }
//! ```

use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::Span;

use shipment_tracker_core::Permission;

use crate::error::AppError;
use crate::models::Session;
use crate::state::AppState;

/// Extractor that requires a valid session.
///
/// Rejects with `401 {"error": "Unauthorized"}` when the `session_id` cookie
/// is missing or names an unknown session.
pub struct RequireSession(pub Session);

impl RequireSession {
    /// Check that the session's identity holds `permission`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Forbidden` if the permission is missing.
    pub fn require(&self, permission: Permission) -> Result<(), AppError> {
        if self.0.identity.has_permission(permission) {
            Ok(())
        } else {
            tracing::warn!(
                role = %self.0.identity.role,
                permission = %permission,
                "Permission denied"
            );
            Err(AppError::Forbidden)
        }
    }
}

impl FromRequestParts<AppState> for RequireSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = state.auth().require_session(&parts.headers).await?;
        record_role(&session);
        Ok(Self(session))
    }
}

/// Extractor that optionally gets the current session.
///
/// Unlike `RequireSession`, this never rejects the request.
pub struct OptionalSession(pub Option<Session>);

impl FromRequestParts<AppState> for OptionalSession {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = state.auth().resolve_session(&parts.headers).await;
        if let Some(session) = &session {
            record_role(session);
        }
        Ok(Self(session))
    }
}

/// Add the caller's role to the request span.
fn record_role(session: &Session) {
    Span::current().record("role", session.identity.role.as_str());
}
