//! Session cookie handling.
//!
//! The session token travels only in the `session_id` cookie. Reading it is a
//! pure function over request headers; writing it is expressed as a
//! [`CookieDirective`] that handlers attach to their response.

use std::convert::Infallible;

use axum::{
    http::{HeaderMap, HeaderValue, header},
    response::{IntoResponseParts, ResponseParts},
};

use shipment_tracker_core::SessionToken;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "session_id";

/// Extract the session token from the request's `Cookie` headers.
///
/// Returns `None` when no `session_id` cookie is present or its value is empty.
/// Quoted cookie values are unquoted. When the cookie appears more than once,
/// the last occurrence wins.
#[must_use]
pub fn extract_session_token(headers: &HeaderMap) -> Option<SessionToken> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|raw| raw.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .rfind(|(name, _)| name.trim() == SESSION_COOKIE_NAME)
        .map(|(_, value)| value.trim().trim_matches('"'))
        .filter(|value| !value.is_empty())
        .map(SessionToken::from_client)
}

/// Instruction to set or clear the session cookie on a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CookieDirective {
    /// Bind the client to the given session.
    Set(SessionToken),
    /// Remove the session cookie from the client.
    Clear,
}

impl CookieDirective {
    /// Render the `Set-Cookie` header value.
    #[must_use]
    pub fn header_string(&self) -> String {
        match self {
            // No Expires/Max-Age: the cookie lives for the browser session.
            Self::Set(token) => {
                format!("{SESSION_COOKIE_NAME}={token}; Path=/; HttpOnly; SameSite=Lax")
            }
            Self::Clear => {
                format!("{SESSION_COOKIE_NAME}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax")
            }
        }
    }
}

impl IntoResponseParts for CookieDirective {
    type Error = Infallible;

    fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        match HeaderValue::from_str(&self.header_string()) {
            Ok(value) => {
                res.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(e) => tracing::error!(error = %e, "Session cookie is not a valid header value"),
        }
        Ok(res)
    }
}
