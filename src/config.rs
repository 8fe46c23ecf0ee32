//! Vault configuration
//!
//! Loaded from JSON with camelCase keys. Every key is optional.
//!
//! ```json
//! {
//!   "databaseFilename": "credvault.db",
//!   "keyDerivationRounds": 1000,
//!   "minAccountPasswordLength": 6,
//!   "generator": { "length": 16, "includeSymbols": true }
//! }
//! ```

use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VaultError};
use crate::password::GeneratorPolicy;
use crate::{ACCOUNT_PASSWORD_MIN_LENGTH, DATABASE_FILENAME, KEY_ROUNDS_DEFAULT};

/// Vault settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VaultConfig {
    /// Database file name inside the vault folder
    pub database_filename: String,
    /// Key derivation rounds for newly created accounts
    pub key_derivation_rounds: u32,
    /// Minimum account password length at sign-up
    pub min_account_password_length: usize,
    /// Default generator policy
    pub generator: GeneratorPolicy,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            database_filename: DATABASE_FILENAME.to_string(),
            key_derivation_rounds: KEY_ROUNDS_DEFAULT,
            min_account_password_length: ACCOUNT_PASSWORD_MIN_LENGTH,
            generator: GeneratorPolicy::default(),
        }
    }
}

impl VaultConfig {
    /// Parse a JSON configuration and validate it
    pub fn from_json(json: &str) -> Result<Self> {
        let config: VaultConfig = serde_json::from_str(json)?;
        config.validated()
    }

    /// Read and parse a JSON configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Clamp out-of-range values, rejecting ones that cannot be repaired.
    ///
    /// The generator length is brought into 8..=32 and zero key rounds become 1;
    /// a database filename must be a plain, non-empty file name.
    pub fn validated(mut self) -> Result<Self> {
        let filename = self.database_filename.trim();
        if filename.is_empty() || filename.contains(['/', '\\']) || filename == "." || filename == ".." {
            return Err(VaultError::ConfigError(format!(
                "Invalid database filename: {:?}",
                self.database_filename
            )));
        }

        let requested = self.generator.length;
        if self.generator.clamp_length() {
            warn!(
                "Generator length {} out of range, using {}",
                requested, self.generator.length
            );
        }

        if self.key_derivation_rounds == 0 {
            warn!("keyDerivationRounds must be at least 1, using 1");
            self.key_derivation_rounds = 1;
        }

        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default() {
        let config = VaultConfig::default();
        assert_eq!(config.database_filename, "credvault.db");
        assert_eq!(config.key_derivation_rounds, 1000);
        assert_eq!(config.min_account_password_length, 6);
        assert_eq!(config.generator, GeneratorPolicy::default());
    }

    #[test]
    fn test_empty_json_is_default() {
        assert_eq!(VaultConfig::from_json("{}").unwrap(), VaultConfig::default());
    }

    #[test]
    fn test_partial_json() {
        let config = VaultConfig::from_json(
            r#"{"keyDerivationRounds": 50, "generator": {"length": 16, "includeSymbols": true}}"#,
        ).unwrap();
        assert_eq!(config.key_derivation_rounds, 50);
        assert_eq!(config.generator.length, 16);
        assert!(config.generator.include_symbols);
        assert!(config.generator.include_lowercase);
        assert_eq!(config.database_filename, "credvault.db");
    }

    #[test]
    fn test_clamps_generator_length() {
        let config = VaultConfig::from_json(r#"{"generator": {"length": 100}}"#).unwrap();
        assert_eq!(config.generator.length, 32);

        let config = VaultConfig::from_json(r#"{"generator": {"length": 2}}"#).unwrap();
        assert_eq!(config.generator.length, 8);
    }

    #[test]
    fn test_zero_rounds_become_one() {
        let config = VaultConfig::from_json(r#"{"keyDerivationRounds": 0}"#).unwrap();
        assert_eq!(config.key_derivation_rounds, 1);
    }

    #[test]
    fn test_rejects_bad_filename() {
        assert!(matches!(
            VaultConfig::from_json(r#"{"databaseFilename": ""}"#),
            Err(VaultError::ConfigError(_))
        ));
        assert!(matches!(
            VaultConfig::from_json(r#"{"databaseFilename": "../escape.db"}"#),
            Err(VaultError::ConfigError(_))
        ));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(VaultConfig::from_json("{"), Err(VaultError::ConfigError(_))));
        assert!(matches!(
            VaultConfig::from_json(r#"{"keyDerivationRounds": "many"}"#),
            Err(VaultError::ConfigError(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("vault.json");
        std::fs::write(&path, r#"{"databaseFilename": "mine.db"}"#).unwrap();

        let config = VaultConfig::from_file(&path).unwrap();
        assert_eq!(config.database_filename, "mine.db");
    }

    #[test]
    fn test_from_missing_file() {
        let result = VaultConfig::from_file(Path::new("/nonexistent/vault.json"));
        assert!(matches!(result, Err(VaultError::IoError(_))));
    }
}
