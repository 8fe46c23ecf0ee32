//! # credvault
//!
//! A password manager library: per-user credential storage with sealed
//! secrets, plus a password generator and strength estimator.
//!
//! ## Features
//!
//! - Random password generation from a character-class policy
//! - Heuristic strength scoring (Weak / Fair / Good / Strong)
//! - Password policy validation
//! - Local email + password accounts with auth state listeners
//! - Per-user credential store (SQLite) with AES-256 sealed passwords and notes
//!
//! ## Example
//!
//! ```no_run
//! use credvault::{Vault, CredentialFormData, GeneratorPolicy};
//! use std::path::Path;
//!
//! let mut vault = Vault::open_or_create(Path::new("/path/to/vault")).unwrap();
//! vault.sign_in("jane@example.com", "correct horse").unwrap();
//!
//! let password = credvault::generate(&GeneratorPolicy::default()).unwrap();
//! vault.add_credential(&CredentialFormData {
//!     site: "example.com".to_string(),
//!     username: "jane".to_string(),
//!     password,
//!     ..Default::default()
//! }).unwrap();
//!
//! for credential in vault.get_credentials().unwrap() {
//!     println!("{}: {}", credential.site, credential.username);
//! }
//! ```

pub mod password;
pub mod crypto;
pub mod database;
pub mod business;
pub mod config;
pub mod utils;
pub mod error;

// Re-export main types
pub use error::{VaultError, Result};
pub use password::{
    generate, generate_with_rng, score, validate, CharacterClass, GeneratorPolicy,
    PasswordViolation, StrengthLabel, StrengthResult, ValidationResult,
};
pub use database::models::{Credential, CredentialFormData, CredentialPatch, User, CREDENTIAL_CATEGORIES};
pub use business::{Vault, ListenerId};
pub use business::search::{filter_credentials, CategoryFilter};
pub use config::VaultConfig;

/// Store schema version
pub const STORE_VERSION: &str = "1";

/// Default database filename inside the vault folder
pub const DATABASE_FILENAME: &str = "credvault.db";

/// Smallest generator length offered to users
pub const GENERATOR_MIN_LENGTH: usize = 8;

/// Largest generator length offered to users
pub const GENERATOR_MAX_LENGTH: usize = 32;

/// Default generator length
pub const GENERATOR_DEFAULT_LENGTH: usize = 12;

/// Minimum length accepted by the password validator
pub const VALIDATION_MIN_LENGTH: usize = 8;

/// Minimum account password length for sign-up
pub const ACCOUNT_PASSWORD_MIN_LENGTH: usize = 6;

/// Default number of key derivation rounds for new accounts
pub const KEY_ROUNDS_DEFAULT: u32 = 1000;

/// Credential document ID length
pub const CREDENTIAL_ID_LENGTH: usize = 20;

/// Per-user salt length
pub const SALT_LENGTH: usize = 16;

/// Category assigned when none is stored
pub const DEFAULT_CATEGORY: &str = "Other";
