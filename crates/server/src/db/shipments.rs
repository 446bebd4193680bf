//! Read-only shipment directory.

use std::path::Path;

use tracing::instrument;

use shipment_tracker_core::{SearchKind, Shipment};

use super::{RepositoryError, seed};

/// Immutable set of shipments, searchable by identifier.
#[derive(Debug, Clone, Default)]
pub struct ShipmentDirectory {
    shipments: Vec<Shipment>,
}

impl ShipmentDirectory {
    #[must_use]
    pub const fn new(shipments: Vec<Shipment>) -> Self {
        Self { shipments }
    }

    /// Directory holding the built-in demo dataset.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Serialization` if the embedded dataset is malformed.
    pub fn demo() -> Result<Self, RepositoryError> {
        Ok(Self::new(seed::demo_shipments()?))
    }

    /// Load a directory from a JSON array of shipments on disk.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the file cannot be read or parsed.
    pub async fn from_file(path: &Path) -> Result<Self, RepositoryError> {
        let raw = tokio::fs::read(path).await?;
        let shipments: Vec<Shipment> = serde_json::from_slice(&raw)?;
        tracing::info!(path = %path.display(), count = shipments.len(), "Loaded shipment dataset");
        Ok(Self::new(shipments))
    }

    /// Load from `path` when given, the demo dataset otherwise.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the dataset cannot be loaded.
    pub async fn load(path: Option<&Path>) -> Result<Self, RepositoryError> {
        match path {
            Some(path) => Self::from_file(path).await,
            None => Self::demo(),
        }
    }

    /// Find the first shipment whose `kind` identifier matches `value`.
    ///
    /// Matching ignores case and whitespace on both the query and the stored
    /// identifier.
    #[instrument(skip(self))]
    pub fn find_by(&self, kind: SearchKind, value: &str) -> Option<&Shipment> {
        let needle = normalize_query(value);
        if needle.is_empty() {
            return None;
        }

        self.shipments
            .iter()
            .find(|shipment| normalize_query(shipment.identifier(kind)) == needle)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.shipments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shipments.is_empty()
    }
}

/// Uppercase the query and drop every whitespace character.
#[must_use]
pub fn normalize_query(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}
