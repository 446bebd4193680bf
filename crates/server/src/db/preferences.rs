//! Notification preference store.
//!
//! Preferences live in a single JSON document. Every operation loads the whole
//! document, reads or replaces one entry and, for writes, saves the whole
//! document back. The load-modify-save cycle runs under one mutex so that
//! concurrent writers never interleave; the save itself goes through a
//! temporary file and a rename so readers never observe a torn document.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tokio::sync::Mutex;
use tracing::instrument;

use shipment_tracker_core::{Email, NotificationPreference, PreferenceKey, Role};

use super::RepositoryError;

/// In-memory form of the preference document.
type PreferenceDocument = Map<String, Value>;

/// File-backed store of notification preferences.
#[derive(Debug)]
pub struct PreferenceStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl PreferenceStore {
    /// Open the store at `path`, creating an empty document if none exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Io` if the directory or file cannot be created.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, RepositoryError> {
        let store = Self {
            path: path.into(),
            lock: Mutex::new(()),
        };
        store.ensure_storage().await?;
        tracing::debug!(path = %store.path.display(), "Preference store ready");
        Ok(store)
    }

    /// Path of the backing document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the preferences stored for `email` under `role`.
    ///
    /// Returns the all-disabled default if nothing is stored, or if the stored
    /// entry is malformed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Io` if the document cannot be read.
    #[instrument(skip_all, fields(role = %role))]
    pub async fn get(
        &self,
        email: &Email,
        role: Role,
    ) -> Result<NotificationPreference, RepositoryError> {
        let key = PreferenceKey::new(email, role);

        let _guard = self.lock.lock().await;
        let document = self.load().await?;

        Ok(decode_entry(&key, document.get(key.as_str())))
    }

    /// Store `preference` for `email` under `role`, replacing any previous value.
    ///
    /// Entries for other keys are preserved verbatim.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the document cannot be read, serialized or
    /// written.
    #[instrument(skip_all, fields(role = %role))]
    pub async fn set(
        &self,
        email: &Email,
        role: Role,
        preference: NotificationPreference,
    ) -> Result<NotificationPreference, RepositoryError> {
        let key = PreferenceKey::new(email, role);

        let _guard = self.lock.lock().await;
        let mut document = self.load().await?;
        document.insert(key.to_string(), serde_json::to_value(preference)?);
        self.save(&document).await?;

        tracing::debug!(entries = document.len(), "Preferences saved");
        Ok(preference)
    }

    /// Check that the backing document exists or can be created.
    ///
    /// Runs under the store lock so a recreated empty document can never
    /// overwrite a concurrent save.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Io` if the storage is not usable.
    pub async fn ensure_ready(&self) -> Result<(), RepositoryError> {
        let _guard = self.lock.lock().await;
        self.ensure_storage().await
    }

    /// Create the parent directory and an empty document if missing.
    async fn ensure_storage(&self) -> Result<(), RepositoryError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        if !tokio::fs::try_exists(&self.path).await? {
            tokio::fs::write(&self.path, b"{}").await?;
        }

        Ok(())
    }

    /// Load the whole document. Unparseable content reads as empty.
    async fn load(&self) -> Result<PreferenceDocument, RepositoryError> {
        self.ensure_storage().await?;
        let raw = tokio::fs::read(&self.path).await?;

        match serde_json::from_slice::<PreferenceDocument>(&raw) {
            Ok(document) => Ok(document),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Preference document is corrupt, treating as empty"
                );
                Ok(PreferenceDocument::new())
            }
        }
    }

    /// Replace the document on disk via write-to-temp and rename.
    async fn save(&self, document: &PreferenceDocument) -> Result<(), RepositoryError> {
        self.ensure_storage().await?;

        let body = serde_json::to_vec_pretty(document)?;
        let temp_path = temp_path(&self.path);

        if let Err(e) = tokio::fs::write(&temp_path, &body).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(e.into());
        }
        tokio::fs::rename(&temp_path, &self.path).await?;

        Ok(())
    }
}

/// Decode one document entry, falling back to the default when absent or malformed.
fn decode_entry(key: &PreferenceKey, entry: Option<&Value>) -> NotificationPreference {
    let Some(value) = entry else {
        return NotificationPreference::default();
    };

    serde_json::from_value(value.clone()).unwrap_or_else(|e| {
        tracing::warn!(key = %key, error = %e, "Malformed preference entry, using defaults");
        NotificationPreference::default()
    })
}

fn temp_path(final_path: &Path) -> PathBuf {
    let mut temp = final_path.as_os_str().to_owned();
    temp.push(".tmp");
    PathBuf::from(temp)
}
