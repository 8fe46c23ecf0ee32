//! Heuristic password strength scoring
//!
//! Not an entropy estimate: one point per length threshold reached
//! (8, 12, 16) and one per character class present.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::charset::CharacterClass;

const LENGTH_THRESHOLDS: [usize; 3] = [8, 12, 16];

/// Coarse strength label
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StrengthLabel {
    Weak,
    Fair,
    Good,
    Strong,
}

impl StrengthLabel {
    /// Map a score to its label
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=2 => StrengthLabel::Weak,
            3..=4 => StrengthLabel::Fair,
            5..=6 => StrengthLabel::Good,
            _ => StrengthLabel::Strong,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StrengthLabel::Weak => "Weak",
            StrengthLabel::Fair => "Fair",
            StrengthLabel::Good => "Good",
            StrengthLabel::Strong => "Strong",
        }
    }
}

impl fmt::Display for StrengthLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Score and label for a password
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrengthResult {
    /// Score in 0..=7
    pub score: u8,
    pub label: StrengthLabel,
}

/// Score a password.
///
/// Length is counted in UTF-16 code units, so characters outside the
/// Basic Multilingual Plane count twice.
///
/// # Example
/// ```
/// use credvault::{score, StrengthLabel};
///
/// let result = score("Aa1!aaaaaaaa");
/// assert_eq!(result.score, 6);
/// assert_eq!(result.label, StrengthLabel::Good);
/// ```
pub fn score(password: &str) -> StrengthResult {
    let length = password.encode_utf16().count();

    let length_points = LENGTH_THRESHOLDS
        .iter()
        .filter(|threshold| length >= **threshold)
        .count();

    let class_points = CharacterClass::ALL
        .iter()
        .filter(|class| class.present_in(password))
        .count();

    let score = (length_points + class_points) as u8;

    StrengthResult {
        score,
        label: StrengthLabel::from_score(score),
    }
}
