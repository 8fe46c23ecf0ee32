//! ID generation utilities

use rand::Rng;

/// Characters used for ID generation
const ID_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Generate a random alphanumeric string ID of specified length
pub fn generate_id(length: usize) -> String {
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..ID_CHARS.len());
            ID_CHARS[idx] as char
        })
        .collect()
}

/// Generate a credential document ID (20 characters)
pub fn generate_credential_id() -> String {
    generate_id(crate::CREDENTIAL_ID_LENGTH)
}

/// Generate a per-user salt (16 characters)
pub fn generate_salt() -> String {
    generate_id(crate::SALT_LENGTH)
}

/// Generate a user or store ID (32 characters, UUID-like)
pub fn generate_uuid() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
