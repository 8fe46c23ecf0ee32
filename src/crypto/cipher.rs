//! AES-256-CBC sealing and opening
//!
//! Sealed layout: `IV (16 bytes) || AES-256-CBC(md5_hex(plaintext) || plaintext)`.

use aes::Aes256;
use cbc::{Encryptor, Decryptor};
use cbc::cipher::{BlockModeEncrypt, BlockModeDecrypt, KeyIvInit};
use block_padding::Pkcs7;
use rand::Rng;

use super::key::KEY_LENGTH;
use super::md5::md5_hex;

/// IV size for AES-CBC (16 bytes = 128 bits)
pub const IV_SIZE: usize = 16;

const BLOCK_SIZE: usize = 16;

/// MD5 hex string length
const MD5_HEX_LENGTH: usize = 32;

type Aes256CbcEnc = Encryptor<Aes256>;
type Aes256CbcDec = Decryptor<Aes256>;

/// Seal a plaintext with a fresh random IV
pub fn seal(plaintext: &str, key: &[u8; KEY_LENGTH]) -> Result<Vec<u8>, String> {
    let mut iv = [0u8; IV_SIZE];
    rand::rng().fill(&mut iv);
    seal_with_iv(plaintext, key, &iv)
}

fn seal_with_iv(plaintext: &str, key: &[u8; KEY_LENGTH], iv: &[u8; IV_SIZE]) -> Result<Vec<u8>, String> {
    let full_text = format!("{}{}", md5_hex(plaintext), plaintext);
    let data = full_text.as_bytes();

    let padded_len = ((data.len() / BLOCK_SIZE) + 1) * BLOCK_SIZE;
    let mut buffer = vec![0u8; padded_len];
    buffer[..data.len()].copy_from_slice(data);

    let encryptor = Aes256CbcEnc::new(key.into(), iv.into());
    let encrypted = encryptor
        .encrypt_padded::<Pkcs7>(&mut buffer, data.len())
        .map_err(|e| format!("Encryption failed: {:?}", e))?;

    let mut sealed = Vec::with_capacity(IV_SIZE + encrypted.len());
    sealed.extend_from_slice(iv);
    sealed.extend_from_slice(encrypted);
    Ok(sealed)
}

/// Open a sealed value, verifying its integrity digest.
///
/// Fails on truncated input, a wrong key, or tampered ciphertext.
pub fn open(sealed: &[u8], key: &[u8; KEY_LENGTH]) -> Result<String, String> {
    if sealed.len() < IV_SIZE + BLOCK_SIZE {
        return Err("Sealed value too short".to_string());
    }

    let (iv, ciphertext) = sealed.split_at(IV_SIZE);
    let mut iv_bytes = [0u8; IV_SIZE];
    iv_bytes.copy_from_slice(iv);

    let mut buffer = ciphertext.to_vec();
    let decryptor = Aes256CbcDec::new(key.into(), (&iv_bytes).into());
    let decrypted = decryptor
        .decrypt_padded::<Pkcs7>(&mut buffer)
        .map_err(|e| format!("Decryption failed: {:?}", e))?;

    let full_text = String::from_utf8(decrypted.to_vec())
        .map_err(|e| format!("Invalid UTF-8: {}", e))?;

    if full_text.len() < MD5_HEX_LENGTH || !full_text.is_char_boundary(MD5_HEX_LENGTH) {
        return Err("Decrypted text too short".to_string());
    }

    let (checksum, plaintext) = full_text.split_at(MD5_HEX_LENGTH);
    if checksum != md5_hex(plaintext) {
        return Err("MD5 checksum mismatch".to_string());
    }

    Ok(plaintext.to_string())
}
