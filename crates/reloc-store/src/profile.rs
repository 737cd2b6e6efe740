//! One JSON document per storage key inside a profile directory.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::StoreError;

/// Bearer token for the signed-in session.
pub const AUTH_TOKEN_KEY: &str = "nhs_auth_token";
/// Serialized current-user record.
pub const USER_KEY: &str = "user";
/// Saved vendor snapshots.
pub const FAVORITES_KEY: &str = "justrelocation_favorites";
/// Travel search preferences.
pub const TRAVEL_PREFERENCES_KEY: &str = "travel_preferences";

/// Key-value store over a directory of JSON files.
///
/// Reads are forgiving: a missing or unparseable document behaves as absent
/// (with a warning for the latter), so a corrupted file never takes the
/// application down. Writes and deletes surface their I/O errors.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    dir: PathBuf,
}

impl ProfileStore {
    /// Opens (creating if needed) the profile directory.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| StoreError::Io {
            path: dir.display().to_string(),
            source: e,
        })?;
        Ok(Self { dir })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Reads and deserializes the document stored under `key`.
    ///
    /// Missing documents return `Ok(None)`. Unparseable documents also return
    /// `Ok(None)` after logging a warning, matching the forgiving reads the
    /// product has always had for these keys.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] for I/O failures other than the file being
    /// absent.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let path = self.path_for(key);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StoreError::Io {
                    path: path.display().to_string(),
                    source: e,
                })
            }
        };

        match serde_json::from_str(&content) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::warn!(key, error = %e, "ignoring unparseable profile document");
                Ok(None)
            }
        }
    }

    /// Serializes `value` and writes it under `key`, replacing any previous
    /// document.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Serialize`] if `value` cannot be serialized or
    /// [`StoreError::Io`] if the write fails.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let path = self.path_for(key);
        let content = serde_json::to_string_pretty(value)?;
        std::fs::write(&path, content).map_err(|e| StoreError::Io {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// Deletes the document under `key`. Deleting an absent key is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] for I/O failures other than the file being
    /// absent.
    pub fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Io {
                path: path.display().to_string(),
                source: e,
            }),
        }
    }
}
