//! Error types for credvault

use thiserror::Error;

/// Main error type for vault operations
#[derive(Error, Debug)]
pub enum VaultError {
    /// Password generation requested with no character class enabled
    #[error("Invalid generator policy: {0}")]
    InvalidPolicy(String),

    /// Database file not found at the specified path
    #[error("Database not found: {0}")]
    DatabaseNotFound(String),

    /// Database operation failed
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Store was written by a newer schema version
    #[error("Invalid store version: {0}")]
    InvalidVersion(String),

    /// Operation needs a signed-in user
    #[error("Not signed in")]
    NotSignedIn,

    /// Unknown email or wrong password
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Sign-up with an email that already has an account
    #[error("Email already in use: {0}")]
    EmailAlreadyInUse(String),

    /// Malformed email address
    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    /// Account password too short
    #[error("Password should be at least {0} characters")]
    WeakPassword(usize),

    /// Credential not found in the signed-in user's collection
    #[error("Credential not found: {0}")]
    CredentialNotFound(String),

    /// Sealing a secret failed
    #[error("Encryption error: {0}")]
    EncryptionError(String),

    /// Opening a sealed secret failed
    #[error("Decryption error: {0}")]
    DecryptionError(String),

    /// Configuration could not be read or parsed
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<rusqlite::Error> for VaultError {
    fn from(err: rusqlite::Error) -> Self {
        VaultError::DatabaseError(err.to_string())
    }
}

impl From<serde_json::Error> for VaultError {
    fn from(err: serde_json::Error) -> Self {
        VaultError::ConfigError(err.to_string())
    }
}

/// Result type alias for vault operations
pub type Result<T> = std::result::Result<T, VaultError>;
