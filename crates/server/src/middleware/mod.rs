//! HTTP middleware stack for the tracker.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layers (hub per request, HTTP context)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Security headers (nosniff, frame denial, no-store on API responses)
//!
//! Session resolution is not a layer: handlers opt in through the
//! [`RequireSession`] and [`OptionalSession`] extractors.

pub mod auth;
pub mod request_id;
pub mod security_headers;
pub mod session;

pub use auth::{OptionalSession, RequireSession};
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session::{CookieDirective, extract_session_token};
