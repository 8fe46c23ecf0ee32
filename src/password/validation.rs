//! Password policy validation
//!
//! Checks length, lowercase, uppercase and digit presence. Symbols are not
//! required here even though the strength scorer rewards them.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::charset::CharacterClass;
use crate::VALIDATION_MIN_LENGTH;

/// A single policy violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PasswordViolation {
    TooShort,
    MissingLowercase,
    MissingUppercase,
    MissingDigit,
}

impl PasswordViolation {
    /// Human-readable message
    pub fn message(self) -> &'static str {
        match self {
            PasswordViolation::TooShort => "Password must be at least 8 characters long",
            PasswordViolation::MissingLowercase => "Password must contain at least one lowercase letter",
            PasswordViolation::MissingUppercase => "Password must contain at least one uppercase letter",
            PasswordViolation::MissingDigit => "Password must contain at least one number",
        }
    }
}

impl fmt::Display for PasswordViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Outcome of [`validate`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    /// Violations in check order: length, lowercase, uppercase, digit
    pub errors: Vec<PasswordViolation>,
}

impl ValidationResult {
    /// Violation messages in order
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}

/// Validate a password, collecting every violation
pub fn validate(password: &str) -> ValidationResult {
    let mut errors = Vec::new();

    if password.encode_utf16().count() < VALIDATION_MIN_LENGTH {
        errors.push(PasswordViolation::TooShort);
    }
    if !CharacterClass::Lowercase.present_in(password) {
        errors.push(PasswordViolation::MissingLowercase);
    }
    if !CharacterClass::Uppercase.present_in(password) {
        errors.push(PasswordViolation::MissingUppercase);
    }
    if !CharacterClass::Digit.present_in(password) {
        errors.push(PasswordViolation::MissingDigit);
    }

    ValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}
