//! Shipment Tracker Core - Shared types library.
//!
//! This crate provides the domain types used by the tracker service and its
//! test suites:
//! - `server` - HTTP API for login, shipment search and notification settings
//! - `integration-tests` - End-to-end tests against a running server
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no HTTP, no
//! filesystem access. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Emails, roles and permissions, session tokens, shipments and
//!   notification preferences

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
