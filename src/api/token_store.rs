//! Persistent storage for the session auth token.
//!
//! The token is read on every outbound request and written only by the
//! login flow. Writes are last-write-wins; there is no locking beyond what
//! each backend needs to be `Sync`.

use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use tracing::{debug, warn};

use super::error::{ApiError, Result};

/// The keyring service name for Taiga tokens.
const KEYRING_SERVICE: &str = "taiga-api";

/// The keyring entry holding the session token.
const KEYRING_USER: &str = "auth-token";

/// Storage for the session token.
pub trait TokenStore: Send + Sync + fmt::Debug {
    /// Load the current token, if one is stored.
    fn load(&self) -> Option<String>;

    /// Store a token, replacing any previous one.
    fn store(&self, token: &str) -> Result<()>;

    /// Remove the stored token. Removing a missing token is not an error.
    fn clear(&self) -> Result<()>;

    /// Check whether a token is stored.
    fn has_token(&self) -> bool {
        self.load().is_some()
    }
}

/// Build the `Authorization` header value for a session token.
pub fn bearer_header(token: &str) -> String {
    format!("Bearer {}", token)
}

/// Token store backed by the OS keyring.
#[derive(Debug, Clone)]
pub struct KeyringTokenStore {
    service: String,
    user: String,
}

impl KeyringTokenStore {
    /// Create a store using the default service name.
    pub fn new() -> Self {
        Self::with_service(KEYRING_SERVICE)
    }

    /// Create a store under a custom keyring service (e.g. per-instance).
    pub fn with_service(service: &str) -> Self {
        Self {
            service: service.to_string(),
            user: KEYRING_USER.to_string(),
        }
    }

    fn entry(&self) -> Result<keyring::Entry> {
        keyring::Entry::new(&self.service, &self.user)
            .map_err(|e| ApiError::TokenStore(format!("failed to access keyring: {}", e)))
    }
}

impl Default for KeyringTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenStore for KeyringTokenStore {
    fn load(&self) -> Option<String> {
        let entry = self.entry().ok()?;
        entry.get_password().ok().filter(|t| !t.is_empty())
    }

    fn store(&self, token: &str) -> Result<()> {
        self.entry()?
            .set_password(token)
            .map_err(|e| ApiError::TokenStore(format!("failed to store token: {}", e)))?;
        debug!(service = %self.service, "Stored auth token in keyring");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match self.entry()?.delete_password() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(ApiError::TokenStore(format!("failed to delete token: {}", e))),
        }
    }
}

/// Token store backed by a plain file with owner-only permissions.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Create a store at an explicit path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default token file: `<local data dir>/taiga/token`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|d| d.join("taiga").join("token"))
    }

    /// The path of the token file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<String> {
        fs::read_to_string(&self.path)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    fn store(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ApiError::TokenStore(format!("mkdir {}: {}", parent.display(), e))
            })?;
        }
        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options
            .open(&self.path)
            .map_err(|e| ApiError::TokenStore(format!("open {}: {}", self.path.display(), e)))?;

        // The mode above only applies to new files.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Err(e) = file.set_permissions(fs::Permissions::from_mode(0o600)) {
                warn!("failed to chmod 0600 {}: {}", self.path.display(), e);
            }
        }

        file.write_all(token.as_bytes())
            .map_err(|e| ApiError::TokenStore(format!("write {}: {}", self.path.display(), e)))?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(|e| {
                ApiError::TokenStore(format!("failed to delete {}: {}", self.path.display(), e))
            })?;
        }
        Ok(())
    }
}

/// In-process token store, used by tests and short-lived sessions.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds a token.
    pub fn with_token(token: &str) -> Self {
        Self {
            token: RwLock::new(Some(token.to_string())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.read().ok()?.clone()
    }

    fn store(&self, token: &str) -> Result<()> {
        let mut guard = self
            .token
            .write()
            .map_err(|_| ApiError::TokenStore("token lock poisoned".to_string()))?;
        *guard = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut guard = self
            .token
            .write()
            .map_err(|_| ApiError::TokenStore("token lock poisoned".to_string()))?;
        *guard = None;
        Ok(())
    }
}
