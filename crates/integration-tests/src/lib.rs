//! Integration tests for the shipment tracker.
//!
//! Each test boots the real application router on an ephemeral port with its
//! own data directory, then drives it over HTTP with a cookie-holding client.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shipment-tracker-integration-tests
//! ```

use std::net::SocketAddr;

use reqwest::{Client, Response};
use serde_json::{Value, json};
use tempfile::TempDir;
use tokio::task::JoinHandle;

use shipment_tracker::config::TrackerConfig;
use shipment_tracker::state::AppState;

/// Password accepted for every demo account.
pub const DEMO_PASSWORD: &str = "demo";

/// A tracker instance listening on `127.0.0.1` with an isolated data directory.
pub struct TestServer {
    addr: SocketAddr,
    data_dir: TempDir,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a server with the built-in demo dataset.
    ///
    /// # Panics
    ///
    /// Panics if the server cannot be started.
    pub async fn start() -> Self {
        let data_dir = TempDir::new().expect("Failed to create data directory");
        let vars = [
            ("TRACKER_HOST", "127.0.0.1".to_string()),
            ("PORT", "0".to_string()),
            (
                "TRACKER_DATA_DIR",
                data_dir.path().to_string_lossy().into_owned(),
            ),
        ];
        let config = TrackerConfig::from_lookup(|key| {
            vars.iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| value.clone())
        })
        .expect("Failed to build configuration");

        let state = AppState::new(config.clone())
            .await
            .expect("Failed to initialize application state");
        let listener = tokio::net::TcpListener::bind(config.socket_addr())
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("Listener has no address");

        let app = shipment_tracker::app(state);
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server error");
        });

        Self {
            addr,
            data_dir,
            handle,
        }
    }

    /// Absolute URL for `path` on this server.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// Contents of the preference document on disk.
    ///
    /// # Panics
    ///
    /// Panics if the document is missing or not JSON.
    pub async fn preference_document(&self) -> Value {
        let path = self.data_dir.path().join("notification_prefs.json");
        let raw = tokio::fs::read_to_string(path)
            .await
            .expect("Failed to read preference document");
        serde_json::from_str(&raw).expect("Preference document is not JSON")
    }

    /// A fresh client with its own cookie jar.
    ///
    /// # Panics
    ///
    /// Panics if the client cannot be built.
    #[must_use]
    pub fn client(&self) -> Client {
        Client::builder()
            .cookie_store(true)
            .build()
            .expect("Failed to create HTTP client")
    }

    /// A client already logged in as `role`.
    ///
    /// # Panics
    ///
    /// Panics if the login is rejected.
    pub async fn login_as(&self, email: &str, role: &str) -> Client {
        let client = self.client();
        let resp = self.login(&client, email, DEMO_PASSWORD, role).await;
        assert!(resp.status().is_success(), "login as {role} failed");
        client
    }

    /// Post a login request with `client`.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be sent.
    pub async fn login(&self, client: &Client, email: &str, password: &str, role: &str) -> Response {
        client
            .post(self.url("/api/login"))
            .json(&json!({ "email": email, "password": password, "role": role }))
            .send()
            .await
            .expect("Failed to send login request")
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Read a response body as JSON.
///
/// # Panics
///
/// Panics if the body is not JSON.
pub async fn json_body(resp: Response) -> Value {
    resp.json().await.expect("Response body is not JSON")
}
