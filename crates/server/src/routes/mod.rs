//! HTTP route handlers for the tracker.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (preference storage usable)
//!
//! # Session
//! POST /api/login              - Log in with {email, password, role}
//! POST /api/logout             - Log out (idempotent)
//! GET  /api/me                 - Current identity, if any
//!
//! # Tracking (requires auth)
//! GET  /api/shipments/search   - Find by ?type=container|bl|booking&value=
//!
//! # Notifications (requires auth)
//! GET  /api/notifications      - Read preferences
//! PUT  /api/notifications      - Replace preferences (needs `notifications`)
//! ```
//!
//! Any other method or path under `/api` answers `404 {"error": "Not found"}`.
//! Other paths are served from the static directory when one is configured.

pub mod auth;
pub mod body;
pub mod notifications;
pub mod shipments;

use std::path::Path;

use axum::{
    Router,
    extract::State,
    handler::HandlerWithoutStateExt,
    http::StatusCode,
    routing::{any, get, post},
};
use serde::Serialize;
use tower_http::services::ServeDir;

use crate::error::AppError;
use crate::state::AppState;

/// Bare acknowledgement body, `{"ok": true}`.
#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    #[must_use]
    pub const fn new() -> Self {
        Self { ok: true }
    }
}

impl Default for OkResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Create the JSON API router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/api/login", post(auth::login).fallback(not_found))
        .route("/api/logout", post(auth::logout).fallback(not_found))
        .route("/api/me", get(auth::me).fallback(not_found))
        .route(
            "/api/shipments/search",
            get(shipments::search).fallback(not_found),
        )
        .route(
            "/api/notifications",
            get(notifications::get_preferences)
                .put(notifications::put_preferences)
                .fallback(not_found),
        )
        .route("/api/{*rest}", any(not_found))
}

/// Create all routes for the tracker.
///
/// `static_dir`, when given, is served for every path the API does not claim.
pub fn routes(static_dir: Option<&Path>) -> Router<AppState> {
    let router = Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(api_routes());

    match static_dir {
        Some(dir) => router.fallback_service(
            ServeDir::new(dir)
                .call_fallback_on_method_not_allowed(true)
                .not_found_service(not_found.into_service()),
        ),
        None => router.fallback(not_found),
    }
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 if the preference document cannot be created or reached.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.preferences().ensure_ready().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Preference storage not ready");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

async fn not_found() -> AppError {
    AppError::NotFound
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{
        body::{Body, to_bytes},
        http::{Method, Request, header},
    };
    use serde_json::{Value, json};
    use tempfile::TempDir;
    use tower::ServiceExt;

    use crate::config::TrackerConfig;
    use crate::db::{PreferenceStore, ShipmentDirectory};

    use super::*;

    struct TestApp {
        router: Router,
        _dir: TempDir,
    }

    impl TestApp {
        async fn new() -> Self {
            Self::with_static(false).await
        }

        async fn with_static(serve_static: bool) -> Self {
            let dir = TempDir::new().unwrap();
            let mut config = TrackerConfig::from_lookup(|_| None).unwrap();
            config.data_dir = dir.path().join("data");
            if serve_static {
                let public = dir.path().join("public");
                std::fs::create_dir_all(&public).unwrap();
                std::fs::write(public.join("index.html"), "<h1>tracker</h1>").unwrap();
                config.static_dir = Some(public);
            }

            let preferences = PreferenceStore::open(config.preferences_path())
                .await
                .unwrap();
            let state = AppState::from_parts(config, preferences, ShipmentDirectory::demo().unwrap());

            Self {
                router: crate::app(state),
                _dir: dir,
            }
        }

        async fn send(
            &self,
            method: Method,
            uri: &str,
            cookie: Option<&str>,
            body: Option<&str>,
        ) -> (StatusCode, axum::http::HeaderMap, Value) {
            let mut request = Request::builder().method(method).uri(uri);
            if let Some(cookie) = cookie {
                request = request.header(header::COOKIE, cookie);
            }
            let body = body.map_or_else(Body::empty, |b| Body::from(b.to_string()));

            let response = self
                .router
                .clone()
                .oneshot(request.body(body).unwrap())
                .await
                .unwrap();
            let status = response.status();
            let headers = response.headers().clone();
            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
            (status, headers, json)
        }

        /// Log in and return the `Cookie` header value for the new session.
        async fn login(&self, role: &str) -> String {
            let body = json!({ "email": "Ops@Example.com", "password": "demo", "role": role });
            let (status, headers, _) = self
                .send(Method::POST, "/api/login", None, Some(&body.to_string()))
                .await;
            assert_eq!(status, StatusCode::OK);

            let set_cookie = headers[header::SET_COOKIE].to_str().unwrap();
            set_cookie.split(';').next().unwrap().to_string()
        }
    }

    #[tokio::test]
    async fn test_health() {
        let app = TestApp::new().await;
        let response = app
            .router
            .clone()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let (status, _, _) = app.send(Method::GET, "/health/ready", None, None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_login_sets_session_cookie() {
        let app = TestApp::new().await;
        let body = json!({ "email": " Ops@Example.com ", "password": "demo", "role": "freight_forwarder" });

        let (status, headers, json) = app
            .send(Method::POST, "/api/login", None, Some(&body.to_string()))
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            json!({ "user": {
                "email": "Ops@Example.com",
                "role": "freight_forwarder",
                "roleLabel": "Freight Forwarder",
                "permissions": ["track", "notifications"],
            }})
        );
        let cookie = headers[header::SET_COOKIE].to_str().unwrap();
        assert!(cookie.starts_with("session_id="));
        assert!(cookie.ends_with("; Path=/; HttpOnly; SameSite=Lax"));
        assert_eq!(headers[header::CACHE_CONTROL], "no-store");
    }

    #[tokio::test]
    async fn test_login_long_email() {
        let app = TestApp::new().await;
        let email = format!("{}@example.com", "a".repeat(250));
        let body = json!({ "email": email, "password": "demo", "role": "viewer" });

        let (status, _, json) = app
            .send(Method::POST, "/api/login", None, Some(&body.to_string()))
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["user"]["email"], email.as_str());
    }

    #[tokio::test]
    async fn test_login_failures() {
        let app = TestApp::new().await;
        let cases = [
            (
                r#"{"email":"a@b.c","password":"nope","role":"viewer"}"#,
                StatusCode::UNAUTHORIZED,
                "Invalid password",
            ),
            (
                r#"{"email":"","password":"demo","role":"viewer"}"#,
                StatusCode::BAD_REQUEST,
                "Invalid login payload",
            ),
            (
                r#"{"email":"a@b.c","password":"demo","role":"captain"}"#,
                StatusCode::BAD_REQUEST,
                "Invalid login payload",
            ),
            ("{not json", StatusCode::BAD_REQUEST, "Invalid JSON"),
            ("[]", StatusCode::BAD_REQUEST, "Invalid JSON"),
        ];

        for (body, status, message) in cases {
            let (got_status, headers, json) =
                app.send(Method::POST, "/api/login", None, Some(body)).await;
            assert_eq!(got_status, status, "body: {body}");
            assert_eq!(json, json!({ "error": message }));
            assert!(headers.get(header::SET_COOKIE).is_none());
        }
    }

    #[tokio::test]
    async fn test_me_reflects_session() {
        let app = TestApp::new().await;

        let (status, _, json) = app.send(Method::GET, "/api/me", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, json!({ "authenticated": false }));

        let cookie = app.login("viewer").await;
        let (_, _, json) = app.send(Method::GET, "/api/me", Some(&cookie), None).await;
        assert_eq!(json["authenticated"], true);
        assert_eq!(json["user"]["role"], "viewer");
        assert_eq!(json["user"]["permissions"], json!(["track"]));

        let (_, _, json) = app
            .send(Method::GET, "/api/me", Some("session_id=forged"), None)
            .await;
        assert_eq!(json, json!({ "authenticated": false }));
    }

    #[tokio::test]
    async fn test_logout_revokes_session() {
        let app = TestApp::new().await;
        let cookie = app.login("shipper").await;

        let (status, headers, json) = app
            .send(Method::POST, "/api/logout", Some(&cookie), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, json!({ "ok": true }));
        assert_eq!(
            headers[header::SET_COOKIE],
            "session_id=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax"
        );

        let (_, _, json) = app.send(Method::GET, "/api/me", Some(&cookie), None).await;
        assert_eq!(json["authenticated"], false);

        let (status, _, _) = app
            .send(Method::POST, "/api/logout", Some(&cookie), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        let (status, _, _) = app.send(Method::POST, "/api/logout", None, None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_search_requires_session() {
        let app = TestApp::new().await;
        let (status, _, json) = app
            .send(
                Method::GET,
                "/api/shipments/search?type=container&value=MSCU1234567",
                None,
                None,
            )
            .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json, json!({ "error": "Unauthorized" }));
    }

    #[tokio::test]
    async fn test_search_by_booking() {
        let app = TestApp::new().await;
        let cookie = app.login("viewer").await;

        let (status, _, json) = app
            .send(
                Method::GET,
                "/api/shipments/search?type=booking&value=BK-2026-1001",
                Some(&cookie),
                None,
            )
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["found"], true);
        assert_eq!(json["shipment"]["currentPort"], "Antwerp");
        assert_eq!(json["shipment"]["eta"], "2026-02-24T09:30:00Z");
        let events: Vec<&str> = json["shipment"]["events"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["name"].as_str().unwrap())
            .collect();
        assert_eq!(
            events,
            [
                "Booking Confirmation",
                "Gate In Full",
                "Vessel Departure",
                "Transshipment"
            ]
        );
    }

    #[tokio::test]
    async fn test_search_normalizes_value() {
        let app = TestApp::new().await;
        let cookie = app.login("shipper").await;

        let (status, _, json) = app
            .send(
                Method::GET,
                "/api/shipments/search?type=container&value=%20%20msc%20u1234567%20",
                Some(&cookie),
                None,
            )
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["shipment"]["containerNumber"], "MSCU1234567");
    }

    #[tokio::test]
    async fn test_search_not_found_and_bad_params() {
        let app = TestApp::new().await;
        let cookie = app.login("viewer").await;

        let (status, _, json) = app
            .send(
                Method::GET,
                "/api/shipments/search?type=bl&value=BL-000000",
                Some(&cookie),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, json!({ "found": false }));

        for query in [
            "type=vessel&value=MSC",
            "type=container&value=%20%20",
            "type=container",
            "value=MSCU1234567",
            "",
        ] {
            let (status, _, json) = app
                .send(
                    Method::GET,
                    &format!("/api/shipments/search?{query}"),
                    Some(&cookie),
                    None,
                )
                .await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "query: {query}");
            assert_eq!(json, json!({ "error": "Invalid search parameters" }));
        }
    }

    #[tokio::test]
    async fn test_notifications_round_trip() {
        let app = TestApp::new().await;
        let cookie = app.login("shipper").await;

        let (status, _, json) = app
            .send(Method::GET, "/api/notifications", Some(&cookie), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, json!({ "preferences": { "email": false, "push": false } }));

        let (status, _, json) = app
            .send(
                Method::PUT,
                "/api/notifications",
                Some(&cookie),
                Some(r#"{"email": true, "push": "no"}"#),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            json!({ "ok": true, "preferences": { "email": true, "push": true } })
        );

        let (_, _, json) = app
            .send(Method::GET, "/api/notifications", Some(&cookie), None)
            .await;
        assert_eq!(json, json!({ "preferences": { "email": true, "push": true } }));
    }

    #[tokio::test]
    async fn test_notifications_are_scoped_by_role() {
        let app = TestApp::new().await;
        let shipper = app.login("shipper").await;
        let admin = app.login("admin").await;

        app.send(
            Method::PUT,
            "/api/notifications",
            Some(&shipper),
            Some(r#"{"email": true, "push": false}"#),
        )
        .await;

        let (_, _, json) = app
            .send(Method::GET, "/api/notifications", Some(&admin), None)
            .await;
        assert_eq!(json, json!({ "preferences": { "email": false, "push": false } }));
    }

    #[tokio::test]
    async fn test_viewer_cannot_update_notifications() {
        let app = TestApp::new().await;
        let cookie = app.login("viewer").await;

        let (status, _, json) = app
            .send(Method::GET, "/api/notifications", Some(&cookie), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["preferences"]["email"], false);

        let (status, _, json) = app
            .send(
                Method::PUT,
                "/api/notifications",
                Some(&cookie),
                Some(r#"{"email": true}"#),
            )
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(json, json!({ "error": "Forbidden" }));
    }

    #[tokio::test]
    async fn test_update_notifications_errors() {
        let app = TestApp::new().await;

        let (status, _, _) = app
            .send(Method::PUT, "/api/notifications", None, Some("{}"))
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let cookie = app.login("admin").await;
        let (status, _, json) = app
            .send(Method::PUT, "/api/notifications", Some(&cookie), Some("{oops"))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json, json!({ "error": "Invalid JSON" }));

        let (status, _, json) = app
            .send(Method::PUT, "/api/notifications", Some(&cookie), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["preferences"], json!({ "email": false, "push": false }));
    }

    #[tokio::test]
    async fn test_unknown_routes_and_methods_are_json_404() {
        let app = TestApp::new().await;
        let cases = [
            (Method::GET, "/api/unknown"),
            (Method::POST, "/api/me"),
            (Method::GET, "/api/login"),
            (Method::DELETE, "/api/notifications"),
            (Method::PUT, "/api/logout"),
            (Method::GET, "/index.html"),
        ];

        for (method, uri) in cases {
            let (status, _, json) = app.send(method.clone(), uri, None, None).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{method} {uri}");
            assert_eq!(json, json!({ "error": "Not found" }));
        }
    }

    #[tokio::test]
    async fn test_static_files_are_served_outside_api() {
        let app = TestApp::with_static(true).await;

        let response = app
            .router
            .clone()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"<h1>tracker</h1>");

        let (status, _, json) = app.send(Method::GET, "/missing.css", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json, json!({ "error": "Not found" }));

        let (status, _, json) = app.send(Method::GET, "/api/nope", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json, json!({ "error": "Not found" }));
    }

    #[tokio::test]
    async fn test_request_id_and_security_headers() {
        let app = TestApp::new().await;
        let (_, headers, _) = app.send(Method::GET, "/api/me", None, None).await;

        assert!(headers.contains_key("x-request-id"));
        assert_eq!(headers[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
        assert_eq!(headers[header::X_FRAME_OPTIONS], "DENY");
    }
}
