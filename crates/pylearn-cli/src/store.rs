//! File-backed token persistence.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use pylearn_core::error::StoreError;
use pylearn_core::{AccessToken, RefreshToken, TokenPair, TokenSnapshot, TokenStore};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Stored token data.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredTokens {
    access: Option<String>,
    refresh: Option<String>,
}

/// Token store backed by a JSON file in the user's data directory.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Create a store at an explicit path.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Create a store at the platform default location.
    pub fn default_path() -> anyhow::Result<Self> {
        let dirs =
            ProjectDirs::from("", "", "pylearn").context("Could not determine config directory")?;

        let data_dir = dirs.data_dir();
        fs::create_dir_all(data_dir).context("Failed to create data directory")?;

        Ok(Self::new(data_dir.join("tokens.json")))
    }

    fn load(&self) -> Result<StoredTokens, StoreError> {
        if !self.path.exists() {
            return Ok(StoredTokens::default());
        }

        let json = fs::read_to_string(&self.path)?;
        serde_json::from_str(&json).map_err(|e| StoreError::Corrupt {
            message: e.to_string(),
        })
    }

    fn persist(&self, stored: &StoredTokens) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(stored).map_err(|e| StoreError::Corrupt {
            message: e.to_string(),
        })?;

        fs::write(&self.path, &json)?;

        // Set restrictive permissions (Unix only)
        #[cfg(unix)]
        {
            let mut perms = fs::metadata(&self.path)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&self.path, perms)?;
        }

        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn read(&self) -> pylearn_core::Result<TokenSnapshot> {
        let stored = self.load()?;
        Ok(TokenSnapshot {
            access: stored.access.map(AccessToken::new),
            refresh: stored.refresh.map(RefreshToken::new),
        })
    }

    fn save(&self, pair: &TokenPair) -> pylearn_core::Result<()> {
        self.persist(&StoredTokens {
            access: Some(pair.access.as_str().to_string()),
            refresh: Some(pair.refresh.as_str().to_string()),
        })?;
        Ok(())
    }

    fn save_access(&self, token: &AccessToken) -> pylearn_core::Result<()> {
        let mut stored = self.load()?;
        stored.access = Some(token.as_str().to_string());
        self.persist(&stored)?;
        Ok(())
    }

    fn clear(&self) -> pylearn_core::Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(StoreError::from)?;
        }
        Ok(())
    }
}
