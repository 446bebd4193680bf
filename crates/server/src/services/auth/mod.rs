//! Authentication service.
//!
//! Validates demo logins against the fixed role catalog, issues and revokes
//! sessions, and resolves the session attached to an inbound request.

mod error;

pub use error::AuthError;

use axum::http::HeaderMap;
use tracing::instrument;

use shipment_tracker_core::{Email, Role, SessionToken};

use crate::middleware::session::{CookieDirective, extract_session_token};
use crate::models::{Identity, Session};
use crate::services::sessions::SessionRegistry;

/// The single password accepted for every demo account.
pub const DEMO_PASSWORD: &str = "demo";

/// Authentication service.
///
/// Borrows the service's session registry for the duration of a request.
pub struct AuthService<'a> {
    sessions: &'a SessionRegistry,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(sessions: &'a SessionRegistry) -> Self {
        Self { sessions }
    }

    /// Log in with email, password and role.
    ///
    /// On success the session is registered and returned together with the
    /// directive that binds the client to it.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the password is not the demo
    /// secret, whatever the other fields contain.
    /// Returns `AuthError::InvalidPayload` if the email is empty or the role is
    /// not in the catalog.
    #[instrument(skip(self, password))]
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        role: &str,
    ) -> Result<(Session, CookieDirective), AuthError> {
        if password != DEMO_PASSWORD {
            tracing::warn!("Login rejected: invalid password");
            return Err(AuthError::InvalidCredentials);
        }

        let email = Email::parse(email).map_err(|e| {
            tracing::warn!(error = %e, "Login rejected: invalid email");
            AuthError::InvalidPayload(e.to_string())
        })?;
        let role = role.parse::<Role>().map_err(|e| {
            tracing::warn!(error = %e, "Login rejected: unknown role");
            AuthError::InvalidPayload(e.to_string())
        })?;

        let session = self.sessions.create(Identity::new(email, role)).await;
        tracing::info!(role = %role, "User logged in");

        let directive = CookieDirective::Set(session.token.clone());
        Ok((session, directive))
    }

    /// Log out the session bound to `token`, if any.
    ///
    /// Idempotent: an absent or unknown token is not an error. Always returns
    /// the directive that clears the client's cookie.
    pub async fn logout(&self, token: Option<&SessionToken>) -> CookieDirective {
        if let Some(token) = token {
            if self.sessions.delete(token).await {
                tracing::info!("User logged out");
            }
        }
        CookieDirective::Clear
    }

    /// Resolve the session referenced by the request's cookies.
    ///
    /// Returns `None` when the cookie is missing or names an unknown session.
    pub async fn resolve_session(&self, headers: &HeaderMap) -> Option<Session> {
        let token = extract_session_token(headers)?;
        self.sessions.get(&token).await
    }

    /// Like [`Self::resolve_session`], but absence is an error.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Unauthenticated` if no valid session is attached.
    pub async fn require_session(&self, headers: &HeaderMap) -> Result<Session, AuthError> {
        self.resolve_session(headers)
            .await
            .ok_or(AuthError::Unauthenticated)
    }
}
