//! Core types for the shipment tracker.
//!
//! This module provides type-safe wrappers for the tracker's domain concepts.

pub mod email;
pub mod preference;
pub mod role;
pub mod shipment;
pub mod token;

pub use email::{Email, EmailError};
pub use preference::{NotificationPreference, PreferenceKey};
pub use role::{ParseRoleError, Permission, PermissionSet, Role};
pub use shipment::{ParseSearchKindError, SearchKind, Shipment, ShipmentEvent};
pub use token::SessionToken;
