//! Random password generation
//!
//! Each character is drawn independently and uniformly from the union of the
//! enabled character classes. Class coverage is not guaranteed: a policy with
//! every class enabled may still yield a password of a single class.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::charset::CharacterClass;
use crate::error::{Result, VaultError};
use crate::{GENERATOR_DEFAULT_LENGTH, GENERATOR_MAX_LENGTH, GENERATOR_MIN_LENGTH};

/// Options for password generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorPolicy {
    /// Password length
    pub length: usize,
    /// Include uppercase letters (A-Z)
    pub include_uppercase: bool,
    /// Include lowercase letters (a-z)
    pub include_lowercase: bool,
    /// Include digits (0-9)
    pub include_numbers: bool,
    /// Include symbols (!@#$%...)
    pub include_symbols: bool,
}

impl Default for GeneratorPolicy {
    fn default() -> Self {
        Self {
            length: GENERATOR_DEFAULT_LENGTH,
            include_uppercase: true,
            include_lowercase: true,
            include_numbers: true,
            include_symbols: false,
        }
    }
}

impl GeneratorPolicy {
    /// Check whether a class is enabled by this policy
    pub fn includes(&self, class: CharacterClass) -> bool {
        match class {
            CharacterClass::Lowercase => self.include_lowercase,
            CharacterClass::Uppercase => self.include_uppercase,
            CharacterClass::Digit => self.include_numbers,
            CharacterClass::Symbol => self.include_symbols,
        }
    }

    /// Enabled classes, always in lowercase, uppercase, digit, symbol order
    pub fn enabled_classes(&self) -> Vec<CharacterClass> {
        CharacterClass::ALL
            .into_iter()
            .filter(|class| self.includes(*class))
            .collect()
    }

    /// Eligible character set for this policy (may be empty)
    pub fn charset(&self) -> String {
        self.enabled_classes()
            .into_iter()
            .map(CharacterClass::chars)
            .collect()
    }

    /// Check that at least one class is enabled
    pub fn is_valid(&self) -> bool {
        !self.enabled_classes().is_empty()
    }

    /// Bring `length` into the range offered to users
    pub fn clamp_length(&mut self) -> bool {
        let clamped = self.length.clamp(GENERATOR_MIN_LENGTH, GENERATOR_MAX_LENGTH);
        let changed = clamped != self.length;
        self.length = clamped;
        changed
    }
}

/// Generate a random password with the thread-local generator.
///
/// # Errors
/// Returns [`VaultError::InvalidPolicy`] if the policy enables no character class.
///
/// # Example
/// ```
/// use credvault::{generate, GeneratorPolicy};
///
/// let password = generate(&GeneratorPolicy::default()).unwrap();
/// assert_eq!(password.chars().count(), 12);
/// ```
pub fn generate(policy: &GeneratorPolicy) -> Result<String> {
    generate_with_rng(policy, &mut rand::rng())
}

/// Generate a random password drawing from the supplied random source
pub fn generate_with_rng<R: Rng>(policy: &GeneratorPolicy, rng: &mut R) -> Result<String> {
    let chars: Vec<char> = policy.charset().chars().collect();

    if chars.is_empty() {
        return Err(VaultError::InvalidPolicy(
            "At least one character type must be selected".to_string(),
        ));
    }

    let mut password = String::with_capacity(policy.length);
    for _ in 0..policy.length {
        let idx = rng.random_range(0..chars.len());
        password.push(chars[idx]);
    }

    Ok(password)
}
