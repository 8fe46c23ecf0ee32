//! Main Vault API
//!
//! This module provides the primary interface for interacting with
//! a credvault store.

use std::path::{Path, PathBuf};
use log::debug;
use rusqlite::Connection;
use crate::error::{VaultError, Result};
use crate::config::VaultConfig;
use crate::database::{Database, Credential, StoreProperties};
use crate::database::{queries, schema};
use crate::password;
use crate::utils::{generate_uuid, parse_timestamp};
use crate::STORE_VERSION;
use super::auth::{AuthListener, ListenerId, Session};

/// Main vault interface
pub struct Vault {
    /// Path to the vault folder
    pub(crate) folder: PathBuf,
    /// Active configuration
    pub(crate) config: VaultConfig,
    /// Database connection
    pub(crate) db: Option<Database>,
    /// Signed-in user and their sealing key
    pub(crate) session: Option<Session>,
    /// Auth state subscribers
    pub(crate) listeners: Vec<(ListenerId, AuthListener)>,
    /// Next listener ID to hand out
    pub(crate) next_listener_id: u64,
    /// Cached credentials of the signed-in user (decrypted, newest first)
    pub(crate) credentials_cache: Option<Vec<Credential>>,
}

impl Vault {
    /// Open a vault from a folder using the default configuration
    pub fn open(folder: &Path) -> Result<Self> {
        Self::open_with_config(folder, VaultConfig::default())
    }

    /// Open a vault from a folder
    ///
    /// The folder should contain the configured database file.
    pub fn open_with_config(folder: &Path, config: VaultConfig) -> Result<Self> {
        let config = config.validated()?;
        let db_path = folder.join(&config.database_filename);

        if !db_path.exists() {
            return Err(VaultError::DatabaseNotFound(
                db_path.to_string_lossy().to_string()
            ));
        }

        let db = Database::open(&db_path)?;

        let props = queries::get_properties(db.connection()?)?
            .ok_or_else(|| VaultError::DatabaseError("Properties not found".to_string()))?;
        if !schema::is_version_compatible(&props.version) {
            return Err(VaultError::InvalidVersion(props.version));
        }

        Ok(Self::with_database(folder, config, db))
    }

    /// Create a new vault in the specified folder using the default configuration
    pub fn create(folder: &Path) -> Result<Self> {
        Self::create_with_config(folder, VaultConfig::default())
    }

    /// Create a new vault in the specified folder
    pub fn create_with_config(folder: &Path, config: VaultConfig) -> Result<Self> {
        let config = config.validated()?;
        std::fs::create_dir_all(folder)?;

        let db_path = folder.join(&config.database_filename);
        let db = Database::create(&db_path)?;

        let store_id = generate_uuid();
        queries::set_properties(db.connection()?, &store_id, STORE_VERSION)?;
        debug!("Initialized store {} (version {})", store_id, STORE_VERSION);

        Ok(Self::with_database(folder, config, db))
    }

    /// Open the vault in `folder`, creating it first if it does not exist
    pub fn open_or_create(folder: &Path) -> Result<Self> {
        let config = VaultConfig::default();
        if folder.join(&config.database_filename).exists() {
            Self::open_with_config(folder, config)
        } else {
            Self::create_with_config(folder, config)
        }
    }

    fn with_database(folder: &Path, config: VaultConfig, db: Database) -> Self {
        Self {
            folder: folder.to_path_buf(),
            config,
            db: Some(db),
            session: None,
            listeners: Vec::new(),
            next_listener_id: 0,
            credentials_cache: None,
        }
    }

    /// Close the vault, signing out first
    pub fn close(&mut self) {
        self.sign_out();
        if let Some(mut db) = self.db.take() {
            db.close();
        }
    }

    /// Clear all caches
    pub(crate) fn clear_caches(&mut self) {
        self.credentials_cache = None;
    }

    /// Get the vault folder path
    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// Get the active configuration
    pub fn config(&self) -> &VaultConfig {
        &self.config
    }

    /// Get the database path
    pub fn database_path(&self) -> PathBuf {
        self.folder.join(&self.config.database_filename)
    }

    /// Get a reference to the database
    pub fn database(&self) -> Result<&Database> {
        self.db.as_ref().ok_or_else(|| VaultError::DatabaseError("Database not open".to_string()))
    }

    pub(crate) fn connection(&self) -> Result<&Connection> {
        self.database()?.connection()
    }

    /// Get store properties
    pub fn get_properties(&self) -> Result<StoreProperties> {
        let raw = queries::get_properties(self.connection()?)?
            .ok_or_else(|| VaultError::DatabaseError("Properties not found".to_string()))?;

        Ok(StoreProperties {
            store_id: raw.store_id,
            version: raw.version,
            created_at: raw.create_timestamp.as_deref().and_then(parse_timestamp),
        })
    }

    /// Generate a password with the configured generator policy
    pub fn generate_password(&self) -> Result<String> {
        password::generate(&self.config.generator)
    }
}

impl Drop for Vault {
    fn drop(&mut self) {
        self.close();
    }
}
