//! Authentication error types.

use thiserror::Error;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Login payload is missing a field or names an unknown role.
    #[error("invalid login payload: {0}")]
    InvalidPayload(String),

    /// Password does not match the demo secret.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// No valid session accompanies the request.
    #[error("not authenticated")]
    Unauthenticated,
}
