//! Key derivation for sealing
//!
//! The key is the hex MD5 digest of `salt || password`, re-hashed with the
//! salt for the requested number of rounds. The 32 hex characters are used
//! directly as the 32 key bytes.

use super::md5::md5_hex;

/// Key length for AES-256 (32 bytes = 256 bits)
pub const KEY_LENGTH: usize = 32;

/// Derive a sealing key from an account password.
///
/// `rounds` below 1 is treated as 1.
pub fn derive_key(password: &str, salt: &str, rounds: u32) -> [u8; KEY_LENGTH] {
    let mut digest = md5_hex(&format!("{}{}", salt, password));
    for _ in 1..rounds.max(1) {
        digest = md5_hex(&format!("{}{}", salt, digest));
    }

    let mut key = [0u8; KEY_LENGTH];
    key.copy_from_slice(&digest.as_bytes()[..KEY_LENGTH]);
    key
}
