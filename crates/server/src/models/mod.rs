//! Domain models for the tracker service.

pub mod session;

pub use session::{Identity, Session};
