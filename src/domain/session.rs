//! File-backed session persistence.
//!
//! Stands in for the browser's durable key-value storage: exactly two values
//! (token and role label) are held, written only by the login operation and
//! removed only by logout. All other code reads the in-memory copy.

use std::fs;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Role;

/// An authenticated session: an opaque token plus the role it was issued for.
///
/// No expiry handling, no refresh; the server is trusted to reject stale
/// tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub role: Role,
}

/// Errors from reading or writing the session file.
#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Malformed session file: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Persists the session at a fixed path.
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the persisted session, if any.
    ///
    /// A missing file is the logged-out state, not an error.
    pub fn load(&self) -> Result<Option<Session>, SessionStoreError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Persist the session. Called only from the login operation.
    pub fn save(&self, session: &Session) -> Result<(), SessionStoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(session)?)?;
        Ok(())
    }

    /// Remove the persisted session. Called only from the logout operation.
    pub fn clear(&self) -> Result<(), SessionStoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_load_clear_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));

        assert!(store.load().unwrap().is_none());

        let session = Session {
            token: "tok-123".into(),
            role: Role::PharmacyOwner,
        };
        store.save(&session).unwrap();
        assert_eq!(store.load().unwrap(), Some(session));

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());

        // Clearing an already-empty store is fine.
        store.clear().unwrap();
    }

    #[test]
    fn malformed_file_is_an_error_not_a_panic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "not json").unwrap();

        let store = SessionStore::new(path);
        assert!(matches!(
            store.load(),
            Err(SessionStoreError::Malformed(_))
        ));
    }
}
