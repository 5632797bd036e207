//! Core ItineraryStore implementation

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt itinerary file {path}: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// File-backed itinerary cache
///
/// Holds at most one itinerary at a time: a session copy cleared on demand
/// and a durable copy that survives `clear`.
pub struct ItineraryStore {
    base_path: PathBuf,
}

impl ItineraryStore {
    /// Open or create a store at the given directory
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let base_path = path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path)?;
        debug!(?base_path, "Opened itinerary store");
        Ok(Self { base_path })
    }

    /// Path of the session copy
    pub fn session_path(&self) -> PathBuf {
        self.base_path.join(crate::SESSION_FILE)
    }

    /// Path of the durable copy
    pub fn last_path(&self) -> PathBuf {
        self.base_path.join(crate::LAST_FILE)
    }

    /// Save an itinerary, writing both the session and the durable copy
    pub fn save(&self, itinerary: &Value) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(itinerary)?;
        fs::write(self.session_path(), &content)?;
        fs::write(self.last_path(), &content)?;
        info!(path = %self.session_path().display(), "Saved itinerary");
        Ok(())
    }

    /// Load the session copy, `None` if absent
    pub fn load_session(&self) -> Result<Option<Value>, StoreError> {
        self.load_file(&self.session_path())
    }

    /// Load the durable copy, `None` if absent
    pub fn load_last(&self) -> Result<Option<Value>, StoreError> {
        self.load_file(&self.last_path())
    }

    /// Load the session copy, falling back to the durable copy
    pub fn load(&self) -> Result<Option<Value>, StoreError> {
        match self.load_session()? {
            Some(value) => Ok(Some(value)),
            None => self.load_last(),
        }
    }

    fn load_file(&self, path: &Path) -> Result<Option<Value>, StoreError> {
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)?;
        let value = serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Some(value))
    }

    /// Remove the session copy, leaving the durable copy untouched
    pub fn clear(&self) -> Result<(), StoreError> {
        let path = self.session_path();
        if path.exists() {
            fs::remove_file(&path)?;
            info!(path = %path.display(), "Cleared session itinerary");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn sample() -> Value {
        json!({
            "success": true,
            "itinerary_data": { "destination": "大理市", "total_days": 3 },
            "ai_enhanced_features": []
        })
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp = TempDir::new().unwrap();
        let store = ItineraryStore::open(temp.path().join("store")).unwrap();

        store.save(&sample()).unwrap();

        let session = store.load_session().unwrap().unwrap();
        let last = store.load_last().unwrap().unwrap();
        assert_eq!(session, sample());
        assert_eq!(last, sample());
    }

    #[test]
    fn test_load_missing_is_none() {
        let temp = TempDir::new().unwrap();
        let store = ItineraryStore::open(temp.path()).unwrap();

        assert!(store.load_session().unwrap().is_none());
        assert!(store.load_last().unwrap().is_none());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_clear_keeps_durable_copy() {
        let temp = TempDir::new().unwrap();
        let store = ItineraryStore::open(temp.path()).unwrap();

        store.save(&sample()).unwrap();
        store.clear().unwrap();

        assert!(store.load_session().unwrap().is_none());
        assert_eq!(store.load_last().unwrap(), Some(sample()));
        // load() falls back to the durable copy
        assert_eq!(store.load().unwrap(), Some(sample()));
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let store = ItineraryStore::open(temp.path()).unwrap();

        std::fs::write(store.session_path(), "not json {").unwrap();

        let err = store.load_session().unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
    }
}
