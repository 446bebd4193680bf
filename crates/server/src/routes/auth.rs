//! Login, logout and current-identity handlers.

use axum::{Json, body::Bytes, extract::State, http::HeaderMap, response::IntoResponse};
use serde::Serialize;

use crate::error::Result;
use crate::middleware::{CookieDirective, OptionalSession, extract_session_token};
use crate::models::Identity;
use crate::routes::OkResponse;
use crate::routes::body::{parse_object, text_field};
use crate::state::AppState;

/// Response for a successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: Identity,
}

/// Response for `GET /api/me`.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<Identity>,
}

/// Log in with `{email, password, role}` and bind the session cookie.
///
/// # Errors
///
/// Returns 400 for a malformed body or invalid payload, 401 for a wrong password.
pub async fn login(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(CookieDirective, Json<LoginResponse>)> {
    let body = parse_object(&body)?;

    let (session, directive) = state
        .auth()
        .login(
            &text_field(&body, "email"),
            &text_field(&body, "password"),
            &text_field(&body, "role"),
        )
        .await?;

    Ok((
        directive,
        Json(LoginResponse {
            user: session.identity,
        }),
    ))
}

/// Revoke the caller's session, if any, and clear the cookie.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let token = extract_session_token(&headers);
    let directive = state.auth().logout(token.as_ref()).await;

    (directive, Json(OkResponse::new()))
}

/// Report whether the caller is logged in, and as whom.
pub async fn me(OptionalSession(session): OptionalSession) -> Json<MeResponse> {
    Json(MeResponse {
        authenticated: session.is_some(),
        user: session.map(|s| s.identity),
    })
}
