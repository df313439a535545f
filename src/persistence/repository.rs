//! Loading and saving the area collection snapshot.

use tracing::{debug, info, warn};

use super::key_value::KeyValueStore;
use crate::error::{EngineError, EngineResult};
use crate::models::AreaCollection;

/// The key the snapshot is stored under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "areas";

/// Serializes the area collection to and from a [`KeyValueStore`].
///
/// Both directions are fail-soft: a missing or unreadable snapshot loads as
/// an empty collection, and a failed save is logged and dropped. The
/// in-memory collection stays authoritative either way.
#[derive(Debug, Clone)]
pub struct AreaRepository<S> {
    backend: S,
    key: String,
}

impl<S: KeyValueStore> AreaRepository<S> {
    /// Creates a repository using [`DEFAULT_STORAGE_KEY`].
    pub fn new(backend: S) -> Self {
        Self::with_key(backend, DEFAULT_STORAGE_KEY)
    }

    /// Creates a repository storing the snapshot under `key`.
    pub fn with_key(backend: S, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    /// The key the snapshot is stored under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The underlying backend.
    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Loads the stored snapshot, or an empty collection if there is none, it
    /// cannot be read, or it breaks the collection invariants (see
    /// [`AreaCollection::validate`]).
    pub fn load(&self) -> AreaCollection {
        let raw = match self.backend.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %self.key, "No stored areas, starting empty");
                return AreaCollection::new();
            }
            Err(err) => {
                warn!(key = %self.key, error = %err, "Failed to read stored areas");
                return AreaCollection::new();
            }
        };

        let parsed = serde_json::from_str::<AreaCollection>(&raw)
            .map_err(|e| EngineError::Serialization {
                message: e.to_string(),
            })
            .and_then(|areas| areas.validate().map(|()| areas));

        match parsed {
            Ok(areas) => {
                info!(
                    key = %self.key,
                    areas = areas.len(),
                    employees = areas.employee_count(),
                    "Loaded stored areas"
                );
                areas
            }
            Err(err) => {
                warn!(key = %self.key, error = %err, "Stored areas are malformed, starting empty");
                AreaCollection::new()
            }
        }
    }

    /// Stores a full snapshot of `areas`. Failures are logged, never returned.
    pub fn save(&mut self, areas: &AreaCollection) {
        if let Err(err) = self.try_save(areas) {
            warn!(key = %self.key, error = %err, "Failed to save areas");
        }
    }

    fn try_save(&mut self, areas: &AreaCollection) -> EngineResult<()> {
        let raw = serde_json::to_string(areas).map_err(|e| EngineError::Serialization {
            message: e.to_string(),
        })?;
        self.backend.set(&self.key, &raw)?;
        debug!(key = %self.key, bytes = raw.len(), "Saved areas");
        Ok(())
    }
}
