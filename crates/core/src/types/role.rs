//! Roles and the permissions they grant.
//!
//! Permissions are never assigned individually: every [`Role`] maps to a fixed
//! [`PermissionSet`] through [`Role::permissions`].

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Capability gating access to an API operation.
///
/// Ordering follows declaration order so permission sets serialize stably as
/// `["track", "notifications", "admin"]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    /// Search shipments.
    Track,
    /// Change notification preferences.
    Notifications,
    /// Administrative access.
    Admin,
}

impl Permission {
    /// Wire name of the permission.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Track => "track",
            Self::Notifications => "notifications",
            Self::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set of permissions held by an identity.
pub type PermissionSet = BTreeSet<Permission>;

/// Error returned when a string does not name a known role.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid role: {0}")]
pub struct ParseRoleError(pub String);

/// Demo user role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Cargo owner: tracks shipments and manages notifications.
    Shipper,
    /// Forwarding agent: same capabilities as a shipper.
    FreightForwarder,
    /// Read-only tracking access.
    Viewer,
    /// Everything, including administrative access.
    Admin,
}

impl Role {
    /// Every role in the catalog.
    pub const ALL: [Self; 4] = [
        Self::Shipper,
        Self::FreightForwarder,
        Self::Viewer,
        Self::Admin,
    ];

    /// Wire name of the role, as used in login payloads and storage keys.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Shipper => "shipper",
            Self::FreightForwarder => "freight_forwarder",
            Self::Viewer => "viewer",
            Self::Admin => "admin",
        }
    }

    /// Human-readable label shown in the UI.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Shipper => "Shipper",
            Self::FreightForwarder => "Freight Forwarder",
            Self::Viewer => "Viewer",
            Self::Admin => "Admin",
        }
    }

    /// Permissions granted by this role.
    #[must_use]
    pub fn permissions(self) -> PermissionSet {
        let granted: &[Permission] = match self {
            Self::Shipper | Self::FreightForwarder => {
                &[Permission::Track, Permission::Notifications]
            }
            Self::Viewer => &[Permission::Track],
            Self::Admin => &[
                Permission::Track,
                Permission::Notifications,
                Permission::Admin,
            ],
        };
        granted.iter().copied().collect()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shipper" => Ok(Self::Shipper),
            "freight_forwarder" => Ok(Self::FreightForwarder),
            "viewer" => Ok(Self::Viewer),
            "admin" => Ok(Self::Admin),
            _ => Err(ParseRoleError(s.to_owned())),
        }
    }
}
