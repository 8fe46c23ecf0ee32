//! Character classes used by the generator and the scorer

use serde::{Deserialize, Serialize};

const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";
const SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

/// A fixed, named set of characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterClass {
    Lowercase,
    Uppercase,
    Digit,
    Symbol,
}

impl CharacterClass {
    /// All classes in charset concatenation order
    pub const ALL: [CharacterClass; 4] = [
        CharacterClass::Lowercase,
        CharacterClass::Uppercase,
        CharacterClass::Digit,
        CharacterClass::Symbol,
    ];

    /// Characters belonging to this class
    pub fn chars(self) -> &'static str {
        match self {
            CharacterClass::Lowercase => LOWERCASE,
            CharacterClass::Uppercase => UPPERCASE,
            CharacterClass::Digit => DIGITS,
            CharacterClass::Symbol => SYMBOLS,
        }
    }

    /// Check if `c` is one of this class's generator characters
    pub fn contains(self, c: char) -> bool {
        self.chars().contains(c)
    }

    /// Classify a character the way the strength scorer does.
    ///
    /// Anything outside `[a-zA-Z0-9]`, including non-ASCII, is a symbol.
    pub fn of(c: char) -> CharacterClass {
        if c.is_ascii_lowercase() {
            CharacterClass::Lowercase
        } else if c.is_ascii_uppercase() {
            CharacterClass::Uppercase
        } else if c.is_ascii_digit() {
            CharacterClass::Digit
        } else {
            CharacterClass::Symbol
        }
    }

    /// Check if any character of `text` falls in this class
    pub fn present_in(self, text: &str) -> bool {
        text.chars().any(|c| CharacterClass::of(c) == self)
    }
}
