//! Credential persistence.
//!
//! The credential lives in a small TOML file under three keys
//! (`localpro_token`, `localpro_user_id`, `localpro_user_email`). A file with
//! any key missing or blank counts as logged out.

use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use serde::{Deserialize, Serialize};
use shared::models::Credential;
use thiserror::Error;

/// Errors raised while reading or writing the stored session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The session file exists but could not be read.
    #[error("failed to read session file {path}: {source}")]
    Read {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The session file or its directory could not be written or removed.
    #[error("failed to write session file {path}: {source}")]
    Write {
        /// File or directory that was being written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The session file is not valid TOML.
    #[error("session file {path} is malformed: {source}")]
    Parse {
        /// File that failed to parse.
        path: PathBuf,
        /// Parser error.
        #[source]
        source: toml::de::Error,
    },

    /// The credential could not be encoded as TOML.
    #[error("failed to encode session: {0}")]
    Encode(#[from] toml::ser::Error),
}

/// Lock `slot`, recovering the value if a previous holder panicked.
fn lock(slot: &Mutex<Option<Credential>>) -> MutexGuard<'_, Option<Credential>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Durable storage for the signed-in credential.
pub trait CredentialStore: fmt::Debug + Send + Sync {
    /// Stored credential, or `None` when logged out.
    ///
    /// # Errors
    /// Returns [`SessionError`] when the storage exists but cannot be read.
    fn load(&self) -> Result<Option<Credential>, SessionError>;

    /// Persist `credential`, replacing any stored one.
    ///
    /// # Errors
    /// Returns [`SessionError`] when the credential cannot be written.
    fn save(&self, credential: &Credential) -> Result<(), SessionError>;

    /// Forget the stored credential. Clearing an empty store succeeds.
    ///
    /// # Errors
    /// Returns [`SessionError`] when existing storage cannot be removed.
    fn clear(&self) -> Result<(), SessionError>;
}

/// On-disk layout of the session file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredSession {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    localpro_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    localpro_user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    localpro_user_email: Option<String>,
}

impl StoredSession {
    fn into_credential(self) -> Option<Credential> {
        let present = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
        Some(Credential::new(
            present(self.localpro_token)?,
            present(self.localpro_user_id)?,
            present(self.localpro_user_email)?,
        ))
    }
}

impl From<&Credential> for StoredSession {
    fn from(credential: &Credential) -> Self {
        Self {
            localpro_token: Some(credential.access_token.clone()),
            localpro_user_id: Some(credential.user_id.clone()),
            localpro_user_email: Some(credential.user_email.clone()),
        }
    }
}

/// Session file readable only by the current user.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    /// Store backed by the file at `path`. Nothing is touched until the
    /// first load or save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the session file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_parent(&self) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| SessionError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        Ok(())
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<Option<Credential>, SessionError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(SessionError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        let stored: StoredSession =
            toml::from_str(&contents).map_err(|source| SessionError::Parse {
                path: self.path.clone(),
                source,
            })?;
        Ok(stored.into_credential())
    }

    fn save(&self, credential: &Credential) -> Result<(), SessionError> {
        self.ensure_parent()?;
        let contents = toml::to_string(&StoredSession::from(credential))?;
        let write_err = |source| SessionError::Write {
            path: self.path.clone(),
            source,
        };
        fs::write(&self.path, contents).map_err(write_err)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))
                .map_err(write_err)?;
        }
        tracing::debug!(path = %self.path.display(), "session saved");
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "session removed");
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(SessionError::Write {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

/// Process-local store, used when nothing should touch the disk.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    credential: Mutex<Option<Credential>>,
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Result<Option<Credential>, SessionError> {
        Ok(lock(&self.credential).clone())
    }

    fn save(&self, credential: &Credential) -> Result<(), SessionError> {
        *lock(&self.credential) = Some(credential.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        *lock(&self.credential) = None;
        Ok(())
    }
}

/// Credential context shared by everything that talks to the API.
///
/// Built once at start-up from a [`CredentialStore`]; clones share state.
#[derive(Debug, Clone)]
pub struct Session {
    store: Arc<dyn CredentialStore>,
    current: Arc<Mutex<Option<Credential>>>,
}

impl Session {
    /// Read the stored credential, if any, and wrap the store.
    ///
    /// # Errors
    /// Propagates [`SessionError`] from the store.
    pub fn load(store: Arc<dyn CredentialStore>) -> Result<Self, SessionError> {
        let current = store.load()?;
        Ok(Self {
            store,
            current: Arc::new(Mutex::new(current)),
        })
    }

    /// A logged-out session backed by memory only.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            store: Arc::new(MemoryCredentialStore::default()),
            current: Arc::new(Mutex::new(None)),
        }
    }

    /// The signed-in credential, if any.
    #[must_use]
    pub fn credential(&self) -> Option<Credential> {
        lock(&self.current).clone()
    }

    /// Whether a credential is held.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.credential().is_some()
    }

    /// Persist `credential` and make it current.
    ///
    /// # Errors
    /// Returns [`SessionError`] when the store rejects the write. The
    /// credential is still current for this process in that case.
    pub fn store_credential(&self, credential: Credential) -> Result<(), SessionError> {
        let saved = self.store.save(&credential);
        *lock(&self.current) = Some(credential);
        saved
    }

    /// Log out: drop the current credential and clear the store.
    ///
    /// # Errors
    /// Returns [`SessionError`] when the store cannot be cleared.
    pub fn clear(&self) -> Result<(), SessionError> {
        *lock(&self.current) = None;
        self.store.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn credential() -> Credential {
        Credential::new("token-123", "42", "jane@x.com")
    }

    #[test]
    fn file_store_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = FileCredentialStore::new(dir.path().join("nested").join("session.toml"));

        assert_eq!(store.load().unwrap(), None);
        store.save(&credential()).unwrap();
        assert_eq!(store.load().unwrap(), Some(credential()));

        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("localpro_token = \"token-123\""));
        assert!(raw.contains("localpro_user_id = \"42\""));
        assert!(raw.contains("localpro_user_email = \"jane@x.com\""));
    }

    #[cfg(unix)]
    #[test]
    fn file_store_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let store = FileCredentialStore::new(dir.path().join("session.toml"));
        store.save(&credential()).unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn missing_key_counts_as_logged_out() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.toml");
        fs::write(
            &path,
            "localpro_token = \"token-123\"\nlocalpro_user_email = \"jane@x.com\"\n",
        )
        .unwrap();
        assert_eq!(FileCredentialStore::new(&path).load().unwrap(), None);

        fs::write(
            &path,
            "localpro_token = \"\"\nlocalpro_user_id = \"42\"\nlocalpro_user_email = \"jane@x.com\"\n",
        )
        .unwrap();
        assert_eq!(FileCredentialStore::new(&path).load().unwrap(), None);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.toml");
        fs::write(&path, "localpro_token = [").unwrap();

        let err = FileCredentialStore::new(&path).load().unwrap_err();
        assert!(matches!(err, SessionError::Parse { .. }));
    }

    #[test]
    fn clear_removes_file_and_tolerates_absence() {
        let dir = TempDir::new().unwrap();
        let store = FileCredentialStore::new(dir.path().join("session.toml"));
        store.save(&credential()).unwrap();

        store.clear().unwrap();
        assert!(!store.path().exists());
        store.clear().unwrap();
    }

    #[test]
    fn session_loads_and_clears() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(FileCredentialStore::new(dir.path().join("session.toml")));
        store.save(&credential()).unwrap();

        let session = Session::load(store.clone()).unwrap();
        assert!(session.is_authenticated());
        assert_eq!(session.credential(), Some(credential()));

        let clone = session.clone();
        clone.clear().unwrap();
        assert!(!session.is_authenticated());
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn store_credential_persists() {
        let store = Arc::new(MemoryCredentialStore::default());
        let session = Session::load(store.clone()).unwrap();
        assert!(!session.is_authenticated());

        session.store_credential(credential()).unwrap();
        assert_eq!(session.credential(), Some(credential()));
        assert_eq!(store.load().unwrap(), Some(credential()));
    }

    #[test]
    fn poisoned_memory_store_still_saves_and_clears() {
        let store = Arc::new(MemoryCredentialStore::default());
        let holder = Arc::clone(&store);
        let poisoned = std::thread::spawn(move || {
            let _guard = holder.credential.lock().unwrap();
            panic!("poison the lock");
        })
        .join();
        assert!(poisoned.is_err());
        assert!(store.credential.is_poisoned());

        store.save(&credential()).unwrap();
        assert_eq!(store.load().unwrap(), Some(credential()));
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn poisoned_session_still_tracks_credential() {
        let session = Session::in_memory();
        let current = Arc::clone(&session.current);
        let _ = std::thread::spawn(move || {
            let _guard = current.lock().unwrap();
            panic!("poison the lock");
        })
        .join();

        session.store_credential(credential()).unwrap();
        assert_eq!(session.credential(), Some(credential()));
        session.clear().unwrap();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn in_memory_session_starts_logged_out() {
        let session = Session::in_memory();
        assert_eq!(session.credential(), None);
    }
}
