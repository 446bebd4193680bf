//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::TrackerConfig;
use crate::db::{PreferenceStore, RepositoryError, ShipmentDirectory};
use crate::services::{AuthService, SessionRegistry};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Every instance owns its own session registry,
/// so separate instances (one per test, say) never share sessions.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: TrackerConfig,
    sessions: SessionRegistry,
    preferences: PreferenceStore,
    shipments: ShipmentDirectory,
}

impl AppState {
    /// Build state from configuration, opening the preference store and
    /// loading the shipment dataset.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the preference store cannot be initialized
    /// or the configured shipment dataset cannot be loaded.
    pub async fn new(config: TrackerConfig) -> Result<Self, RepositoryError> {
        let preferences = PreferenceStore::open(config.preferences_path()).await?;
        let shipments = ShipmentDirectory::load(config.shipments_file.as_deref()).await?;

        Ok(Self::from_parts(config, preferences, shipments))
    }

    /// Assemble state from already-built components.
    #[must_use]
    pub fn from_parts(
        config: TrackerConfig,
        preferences: PreferenceStore,
        shipments: ShipmentDirectory,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                sessions: SessionRegistry::new(),
                preferences,
                shipments,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &TrackerConfig {
        &self.inner.config
    }

    /// Authentication service bound to this state's registry.
    #[must_use]
    pub fn auth(&self) -> AuthService<'_> {
        AuthService::new(&self.inner.sessions)
    }

    #[must_use]
    pub fn preferences(&self) -> &PreferenceStore {
        &self.inner.preferences
    }

    #[must_use]
    pub fn shipments(&self) -> &ShipmentDirectory {
        &self.inner.shipments
    }
}
