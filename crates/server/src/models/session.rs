//! Session-related types.
//!
//! Types held by the session registry for authenticated requests.

use serde::Serialize;

use shipment_tracker_core::{Email, Permission, PermissionSet, PreferenceKey, Role, SessionToken};

/// Authenticated user identity.
///
/// Built from the role catalog at login and never modified afterwards.
/// Serialized as `{email, role, roleLabel, permissions}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Email as entered at login (case preserved).
    pub email: Email,
    /// Role chosen at login.
    pub role: Role,
    /// Display label of the role.
    pub role_label: &'static str,
    /// Permissions derived from the role.
    pub permissions: PermissionSet,
}

impl Identity {
    /// Build the identity for `email` logging in as `role`.
    #[must_use]
    pub fn new(email: Email, role: Role) -> Self {
        Self {
            email,
            role,
            role_label: role.label(),
            permissions: role.permissions(),
        }
    }

    /// Whether the identity holds `permission`.
    #[must_use]
    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }

    /// Key under which this identity's notification preferences are stored.
    #[must_use]
    pub fn preference_key(&self) -> PreferenceKey {
        PreferenceKey::new(&self.email, self.role)
    }
}

/// Server-side session binding a token to an identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Token carried in the `session_id` cookie.
    pub token: SessionToken,
    /// Who is logged in.
    pub identity: Identity,
}
