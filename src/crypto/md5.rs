//! MD5 digests for integrity checks and key stretching

use md5::{Md5, Digest};

/// Calculate MD5 hash of input string and return as lowercase hex string (32 chars)
///
/// # Example
///
/// ```
/// use credvault::crypto::md5_hex;
///
/// assert_eq!(md5_hex(""), "d41d8cd98f00b204e9800998ecf8427e");
/// ```
pub fn md5_hex(input: &str) -> String {
    let digest = Md5::digest(input.as_bytes());
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}
