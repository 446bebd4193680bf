//! Notification preference handlers.
//!
//! Preferences are scoped to the caller's email and role. Reading them needs
//! only a session; changing them needs the `notifications` permission.

use axum::{Json, body::Bytes, extract::State};
use serde::Serialize;

use shipment_tracker_core::{NotificationPreference, Permission};

use crate::error::Result;
use crate::middleware::RequireSession;
use crate::routes::body::{JsonObject, flag_field, parse_object};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct PreferencesResponse {
    pub preferences: NotificationPreference,
}

#[derive(Debug, Serialize)]
pub struct UpdatePreferencesResponse {
    pub ok: bool,
    pub preferences: NotificationPreference,
}

/// Get the caller's notification preferences.
///
/// # Errors
///
/// Returns 401 without a session, 500 if the store cannot be read.
pub async fn get_preferences(
    RequireSession(session): RequireSession,
    State(state): State<AppState>,
) -> Result<Json<PreferencesResponse>> {
    let identity = &session.identity;
    let preferences = state
        .preferences()
        .get(&identity.email, identity.role)
        .await?;

    Ok(Json(PreferencesResponse { preferences }))
}

/// Replace the caller's notification preferences with `{email, push}`.
///
/// # Errors
///
/// Returns 401 without a session, 403 without the `notifications`
/// permission, 400 for a malformed body and 500 if the store cannot be written.
pub async fn put_preferences(
    session: RequireSession,
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<UpdatePreferencesResponse>> {
    session.require(Permission::Notifications)?;
    let body = parse_object(&body)?;

    let RequireSession(session) = session;
    let identity = &session.identity;
    let preferences = state
        .preferences()
        .set(&identity.email, identity.role, preference_from_body(&body))
        .await?;
    tracing::info!(
        role = %identity.role,
        email = preferences.email_enabled,
        push = preferences.push_enabled,
        "Notification preferences updated"
    );

    Ok(Json(UpdatePreferencesResponse {
        ok: true,
        preferences,
    }))
}

/// Read the flags from a request body. `emailEnabled`/`pushEnabled` are
/// accepted as aliases when the short names are absent.
fn preference_from_body(body: &JsonObject) -> NotificationPreference {
    let flag = |short: &str, long: &str| {
        if body.contains_key(short) {
            flag_field(body, short)
        } else {
            flag_field(body, long)
        }
    };

    NotificationPreference::new(flag("email", "emailEnabled"), flag("push", "pushEnabled"))
}
