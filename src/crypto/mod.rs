//! Sealing of stored secrets
//!
//! Credential passwords and notes are stored as AES-256-CBC ciphertext with
//! PKCS7 padding, a random IV per value and an MD5 digest of the plaintext
//! for integrity. Keys are derived per user from the account password.

mod cipher;
mod md5;
mod key;

pub use cipher::{seal, open, IV_SIZE};
pub use md5::md5_hex;
pub use key::{derive_key, KEY_LENGTH};
