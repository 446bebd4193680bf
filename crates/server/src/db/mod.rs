//! Persistence and lookup tables for the tracker.
//!
//! # Stores
//!
//! - `preferences` - Notification preferences, one JSON document on disk
//!   mapping `"<lowercase-email>::<role>"` to `{email, push}`
//! - `shipments` - Read-only shipment directory loaded once at startup
//!
//! Both are owned by [`crate::state::AppState`]; neither is process-global.

pub mod preferences;
pub mod seed;
pub mod shipments;

use thiserror::Error;

pub use preferences::PreferenceStore;
pub use shipments::ShipmentDirectory;

/// Errors from the tracker's storage layer.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Reading or writing a backing file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A document could not be serialized or deserialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
