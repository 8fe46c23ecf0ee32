//! SQL query operations for database access
//!
//! This module provides low-level query functions working on sealed bytes.
//! For business-level operations, use the Vault API.

use rusqlite::{Connection, OptionalExtension, params};
use crate::error::Result;
use crate::utils::now_timestamp;

// ============================================================================
// Properties queries
// ============================================================================

/// Get store properties
pub fn get_properties(conn: &Connection) -> Result<Option<RawProperties>> {
    let result = conn.query_row(
        "SELECT store_id, version, create_timestamp FROM vault_properties LIMIT 1",
        [],
        |row| {
            Ok(RawProperties {
                store_id: row.get(0)?,
                version: row.get(1)?,
                create_timestamp: row.get(2)?,
            })
        },
    ).optional()?;
    Ok(result)
}

/// Set properties (insert new row)
pub fn set_properties(conn: &Connection, store_id: &str, version: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO vault_properties (store_id, version, create_timestamp) VALUES (?, ?, ?)",
        params![store_id, version, now_timestamp()],
    )?;
    Ok(())
}

// ============================================================================
// Users queries
// ============================================================================

/// Insert a new account row
pub fn create_user(conn: &Connection, user: &RawUser) -> Result<()> {
    conn.execute(
        "INSERT INTO vault_users (user_id, email, salt, key_rounds, verifier, create_timestamp, last_sign_in)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
        params![
            user.user_id,
            user.email,
            user.salt,
            user.key_rounds,
            user.verifier,
            user.create_timestamp,
            user.last_sign_in,
        ],
    )?;
    Ok(())
}

/// Look up an account by normalized email
pub fn get_user_by_email(conn: &Connection, email: &str) -> Result<Option<RawUser>> {
    let result = conn.query_row(
        "SELECT user_id, email, salt, key_rounds, verifier, create_timestamp, last_sign_in
         FROM vault_users WHERE email = ?",
        params![email],
        |row| {
            Ok(RawUser {
                user_id: row.get(0)?,
                email: row.get(1)?,
                salt: row.get(2)?,
                key_rounds: row.get(3)?,
                verifier: row.get(4)?,
                create_timestamp: row.get(5)?,
                last_sign_in: row.get(6)?,
            })
        },
    ).optional()?;
    Ok(result)
}

/// Check if an email already has an account
pub fn email_exists(conn: &Connection, email: &str) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM vault_users WHERE email = ?",
        params![email],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// Record a successful sign-in
pub fn update_last_sign_in(conn: &Connection, user_id: &str, timestamp: &str) -> Result<()> {
    conn.execute(
        "UPDATE vault_users SET last_sign_in = ? WHERE user_id = ?",
        params![timestamp, user_id],
    )?;
    Ok(())
}

// ============================================================================
// Credentials queries
// ============================================================================

/// Get all credentials of a user, newest first (sealed)
pub fn get_credentials_raw(conn: &Connection, user_id: &str) -> Result<Vec<RawCredential>> {
    let mut stmt = conn.prepare(
        "SELECT credential_id, COALESCE(site, ''), COALESCE(username, ''), password,
                COALESCE(category, ''), notes, create_timestamp, change_timestamp
         FROM vault_credentials WHERE user_id = ?
         ORDER BY create_timestamp DESC, rowid DESC"
    )?;

    let credentials = stmt.query_map(params![user_id], map_raw_credential)?;

    credentials.collect::<std::result::Result<Vec<_>, _>>().map_err(Into::into)
}

/// Get a single credential of a user (sealed)
pub fn get_credential_raw(conn: &Connection, user_id: &str, credential_id: &str) -> Result<Option<RawCredential>> {
    let result = conn.query_row(
        "SELECT credential_id, COALESCE(site, ''), COALESCE(username, ''), password,
                COALESCE(category, ''), notes, create_timestamp, change_timestamp
         FROM vault_credentials WHERE user_id = ? AND credential_id = ?",
        params![user_id, credential_id],
        map_raw_credential,
    ).optional()?;
    Ok(result)
}

fn map_raw_credential(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawCredential> {
    Ok(RawCredential {
        credential_id: row.get(0)?,
        site: row.get(1)?,
        username: row.get(2)?,
        password_sealed: row.get::<_, Option<Vec<u8>>>(3)?.unwrap_or_default(),
        category: row.get(4)?,
        notes_sealed: row.get::<_, Option<Vec<u8>>>(5)?.unwrap_or_default(),
        create_timestamp: row.get(6)?,
        change_timestamp: row.get(7)?,
    })
}

/// Insert a new credential; both timestamps are set to now
pub fn create_credential(conn: &Connection, user_id: &str, credential: &NewRawCredential) -> Result<()> {
    let now = now_timestamp();
    conn.execute(
        "INSERT INTO vault_credentials
         (user_id, credential_id, site, username, password, category, notes, create_timestamp, change_timestamp)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        params![
            user_id,
            credential.credential_id,
            credential.site,
            credential.username,
            credential.password_sealed,
            credential.category,
            credential.notes_sealed,
            now,
            now,
        ],
    )?;
    Ok(())
}

/// Merge the supplied columns into a credential and bump its change time.
///
/// Returns the number of rows touched (0 when the credential does not exist).
pub fn update_credential(
    conn: &Connection,
    user_id: &str,
    credential_id: &str,
    patch: &RawCredentialPatch,
) -> Result<usize> {
    let rows = conn.execute(
        "UPDATE vault_credentials SET
            site = COALESCE(?, site),
            username = COALESCE(?, username),
            password = COALESCE(?, password),
            category = COALESCE(?, category),
            notes = COALESCE(?, notes),
            change_timestamp = ?
         WHERE user_id = ? AND credential_id = ?",
        params![
            patch.site,
            patch.username,
            patch.password_sealed,
            patch.category,
            patch.notes_sealed,
            now_timestamp(),
            user_id,
            credential_id,
        ],
    )?;
    Ok(rows)
}

/// Delete a credential; returns the number of rows removed
pub fn delete_credential(conn: &Connection, user_id: &str, credential_id: &str) -> Result<usize> {
    let rows = conn.execute(
        "DELETE FROM vault_credentials WHERE user_id = ? AND credential_id = ?",
        params![user_id, credential_id],
    )?;
    Ok(rows)
}

/// Count credentials of a user
pub fn count_credentials(conn: &Connection, user_id: &str) -> Result<usize> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM vault_credentials WHERE user_id = ?",
        params![user_id],
        |row| row.get(0),
    )?;
    Ok(count as usize)
}

// ============================================================================
// Raw data structures (before decryption)
// ============================================================================

/// Raw properties data from database
#[derive(Debug, Clone)]
pub struct RawProperties {
    pub store_id: String,
    pub version: String,
    pub create_timestamp: Option<String>,
}

/// Raw account row
#[derive(Debug, Clone)]
pub struct RawUser {
    pub user_id: String,
    /// Normalized email
    pub email: String,
    /// Per-user key derivation salt
    pub salt: String,
    /// Key derivation rounds used at sign-up
    pub key_rounds: u32,
    /// Random token sealed with the account key
    pub verifier: Vec<u8>,
    pub create_timestamp: Option<String>,
    pub last_sign_in: Option<String>,
}

/// Raw credential data from database (before decryption)
#[derive(Debug, Clone)]
pub struct RawCredential {
    pub credential_id: String,
    pub site: String,
    pub username: String,
    /// AES-256 sealed password
    pub password_sealed: Vec<u8>,
    pub category: String,
    /// AES-256 sealed notes
    pub notes_sealed: Vec<u8>,
    pub create_timestamp: Option<String>,
    pub change_timestamp: Option<String>,
}

/// Credential ready for insertion
#[derive(Debug, Clone)]
pub struct NewRawCredential {
    pub credential_id: String,
    pub site: String,
    pub username: String,
    pub password_sealed: Vec<u8>,
    pub category: String,
    pub notes_sealed: Vec<u8>,
}

/// Column values for a partial update; `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct RawCredentialPatch {
    pub site: Option<String>,
    pub username: Option<String>,
    pub password_sealed: Option<Vec<u8>>,
    pub category: Option<String>,
    pub notes_sealed: Option<Vec<u8>>,
}
