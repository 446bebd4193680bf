//! Business logic services for the tracker.
//!
//! # Services
//!
//! - `auth` - Demo login, logout and session resolution
//! - `sessions` - In-memory session registry

pub mod auth;
pub mod sessions;

pub use auth::{AuthError, AuthService};
pub use sessions::SessionRegistry;
