//! Data models for vault entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::DEFAULT_CATEGORY;

/// Categories offered when editing a credential
pub const CREDENTIAL_CATEGORIES: &[&str] = &[
    "Social Media",
    "Work",
    "Banking",
    "Shopping",
    "Entertainment",
    "Education",
    "Other",
];

/// Store metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreProperties {
    /// Unique store identifier (32 chars)
    pub store_id: String,
    /// Store schema version
    pub version: String,
    /// Creation timestamp
    pub created_at: Option<DateTime<Utc>>,
}

/// Signed-up account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Opaque user ID (32 chars)
    pub user_id: String,
    /// Normalized (trimmed, lowercase) email
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub last_sign_in: Option<DateTime<Utc>>,
}

/// Stored credential (decrypted)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Document ID (20 chars)
    pub id: String,
    pub site: String,
    pub username: String,
    pub password: String,
    /// Never empty; missing categories read back as "Other"
    pub category: String,
    pub notes: String,
    /// Set by the store on creation
    pub created_at: DateTime<Utc>,
    /// Set by the store on every write
    pub updated_at: DateTime<Utc>,
}

impl Credential {
    /// Edit buffer pre-filled from this credential
    pub fn to_form_data(&self) -> CredentialFormData {
        CredentialFormData {
            site: self.site.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            category: self.category.clone(),
            notes: self.notes.clone(),
        }
    }
}

/// Input for creating or fully replacing a credential
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialFormData {
    pub site: String,
    pub username: String,
    pub password: String,
    pub category: String,
    pub notes: String,
}

impl Default for CredentialFormData {
    fn default() -> Self {
        Self {
            site: String::new(),
            username: String::new(),
            password: String::new(),
            category: DEFAULT_CATEGORY.to_string(),
            notes: String::new(),
        }
    }
}

/// Partial update: `None` fields keep their stored value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialPatch {
    pub site: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub category: Option<String>,
    pub notes: Option<String>,
}

impl CredentialPatch {
    /// Check if the patch changes nothing
    pub fn is_empty(&self) -> bool {
        self.site.is_none()
            && self.username.is_none()
            && self.password.is_none()
            && self.category.is_none()
            && self.notes.is_none()
    }
}

impl From<CredentialFormData> for CredentialPatch {
    fn from(data: CredentialFormData) -> Self {
        Self {
            site: Some(data.site),
            username: Some(data.username),
            password: Some(data.password),
            category: Some(data.category),
            notes: Some(data.notes),
        }
    }
}

impl From<&CredentialFormData> for CredentialPatch {
    fn from(data: &CredentialFormData) -> Self {
        data.clone().into()
    }
}

/// Check if a category is one of [`CREDENTIAL_CATEGORIES`]
pub fn is_known_category(category: &str) -> bool {
    CREDENTIAL_CATEGORIES.contains(&category)
}
