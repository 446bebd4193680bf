//! Notification preference types.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::email::Email;
use super::role::Role;

/// Per-user, per-role notification settings.
///
/// Serialized as `{"email": bool, "push": bool}` both on the wire and in the
/// preference document. Missing flags deserialize as `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NotificationPreference {
    /// Send shipment updates by email.
    #[serde(rename = "email", default)]
    pub email_enabled: bool,
    /// Send shipment updates as push notifications.
    #[serde(rename = "push", default)]
    pub push_enabled: bool,
}

impl NotificationPreference {
    /// Create a preference from its two flags.
    #[must_use]
    pub const fn new(email_enabled: bool, push_enabled: bool) -> Self {
        Self {
            email_enabled,
            push_enabled,
        }
    }
}

/// Composite key scoping a preference to one email under one role.
///
/// Rendered as `"<lowercase-email>::<role>"`, so the same address logged in
/// under two roles keeps two independent preference records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PreferenceKey(String);

impl PreferenceKey {
    /// Build the key for `email` under `role`.
    #[must_use]
    pub fn new(email: &Email, role: Role) -> Self {
        Self(format!("{}::{}", email.normalized(), role.as_str()))
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PreferenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
