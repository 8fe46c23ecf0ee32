//! Credential operations
//!
//! Every operation works on the signed-in user's collection only.

use chrono::Utc;
use log::{debug, error};
use crate::error::{VaultError, Result};
use crate::crypto::{self, KEY_LENGTH};
use crate::database::{Credential, CredentialFormData, CredentialPatch};
use crate::database::queries::{self, NewRawCredential, RawCredential, RawCredentialPatch};
use crate::utils::{generate_credential_id, parse_timestamp};
use crate::DEFAULT_CATEGORY;
use super::vault::Vault;

fn seal_secret(plaintext: &str, key: &[u8; KEY_LENGTH]) -> Result<Vec<u8>> {
    crypto::seal(plaintext, key).map_err(VaultError::EncryptionError)
}

fn open_secret(sealed: &[u8], key: &[u8; KEY_LENGTH]) -> Result<String> {
    if sealed.is_empty() {
        return Ok(String::new());
    }
    crypto::open(sealed, key).map_err(VaultError::DecryptionError)
}

fn unseal_credential(raw: RawCredential, key: &[u8; KEY_LENGTH]) -> Result<Credential> {
    let category = if raw.category.is_empty() {
        DEFAULT_CATEGORY.to_string()
    } else {
        raw.category
    };

    Ok(Credential {
        password: open_secret(&raw.password_sealed, key)?,
        notes: open_secret(&raw.notes_sealed, key)?,
        id: raw.credential_id,
        site: raw.site,
        username: raw.username,
        category,
        created_at: raw.create_timestamp
            .as_deref()
            .and_then(parse_timestamp)
            .unwrap_or_else(Utc::now),
        updated_at: raw.change_timestamp
            .as_deref()
            .and_then(parse_timestamp)
            .unwrap_or_else(Utc::now),
    })
}

impl Vault {
    /// Get all credentials of the signed-in user, newest first
    pub fn get_credentials(&mut self) -> Result<Vec<Credential>> {
        self.load_credentials_if_needed()?;
        Ok(self.credentials_cache.as_deref().unwrap_or_default().to_vec())
    }

    /// Get a credential by ID
    ///
    /// Served from the cached list when one is loaded; otherwise only the
    /// requested row is read and opened.
    pub fn get_credential(&mut self, credential_id: &str) -> Result<Option<Credential>> {
        let session = self.ensure_signed_in()?;

        if let Some(cache) = &self.credentials_cache {
            return Ok(cache.iter().find(|c| c.id == credential_id).cloned());
        }

        queries::get_credential_raw(self.connection()?, &session.user.user_id, credential_id)
            .inspect_err(|e| error!("Error fetching credential: {}", e))?
            .map(|raw| unseal_credential(raw, &session.key))
            .transpose()
    }

    /// Number of credentials of the signed-in user
    pub fn credential_count(&self) -> Result<usize> {
        let session = self.ensure_signed_in()?;
        queries::count_credentials(self.connection()?, &session.user.user_id)
    }

    /// Load credentials from database if not cached
    pub(crate) fn load_credentials_if_needed(&mut self) -> Result<()> {
        if self.credentials_cache.is_some() {
            return Ok(());
        }

        let session = self.ensure_signed_in()?;
        let conn = self.connection()?;

        let raw_credentials = queries::get_credentials_raw(conn, &session.user.user_id)
            .inspect_err(|e| error!("Error fetching credentials: {}", e))?;

        let credentials = raw_credentials
            .into_iter()
            .map(|raw| unseal_credential(raw, &session.key))
            .collect::<Result<Vec<_>>>()
            .inspect_err(|e| error!("Error fetching credentials: {}", e))?;

        debug!("Loaded {} credentials for {}", credentials.len(), session.user.user_id);
        self.credentials_cache = Some(credentials);
        Ok(())
    }

    /// Create a new credential; returns its generated ID
    pub fn add_credential(&mut self, data: &CredentialFormData) -> Result<String> {
        let session = self.ensure_signed_in()?;

        let credential = NewRawCredential {
            credential_id: generate_credential_id(),
            site: data.site.clone(),
            username: data.username.clone(),
            password_sealed: seal_secret(&data.password, &session.key)?,
            category: data.category.clone(),
            notes_sealed: seal_secret(&data.notes, &session.key)?,
        };

        queries::create_credential(self.connection()?, &session.user.user_id, &credential)
            .inspect_err(|e| error!("Error adding credential: {}", e))?;

        debug!("Added credential {}", credential.credential_id);
        self.credentials_cache = None;
        Ok(credential.credential_id)
    }

    /// Merge the supplied fields into a credential
    ///
    /// Fields left as `None` keep their stored value; the update time always advances.
    pub fn update_credential(&mut self, credential_id: &str, patch: &CredentialPatch) -> Result<()> {
        let session = self.ensure_signed_in()?;

        let raw_patch = RawCredentialPatch {
            site: patch.site.clone(),
            username: patch.username.clone(),
            password_sealed: patch.password
                .as_deref()
                .map(|p| seal_secret(p, &session.key))
                .transpose()?,
            category: patch.category.clone(),
            notes_sealed: patch.notes
                .as_deref()
                .map(|n| seal_secret(n, &session.key))
                .transpose()?,
        };

        let rows = queries::update_credential(self.connection()?, &session.user.user_id, credential_id, &raw_patch)
            .inspect_err(|e| error!("Error updating credential: {}", e))?;

        if rows == 0 {
            error!("Error updating credential: {} not found", credential_id);
            return Err(VaultError::CredentialNotFound(credential_id.to_string()));
        }

        self.credentials_cache = None;
        Ok(())
    }

    /// Delete a credential; deleting an unknown ID succeeds
    pub fn delete_credential(&mut self, credential_id: &str) -> Result<()> {
        let session = self.ensure_signed_in()?;

        let rows = queries::delete_credential(self.connection()?, &session.user.user_id, credential_id)
            .inspect_err(|e| error!("Error deleting credential: {}", e))?;

        if rows == 0 {
            debug!("Delete of absent credential {}", credential_id);
        }

        self.credentials_cache = None;
        Ok(())
    }
}
