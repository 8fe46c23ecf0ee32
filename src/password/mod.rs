//! Password generation, strength scoring and validation
//!
//! Everything here is a pure function of its input: no I/O, no shared state.

mod charset;
mod generator;
mod strength;
mod validation;

pub use charset::CharacterClass;
pub use generator::{generate, generate_with_rng, GeneratorPolicy};
pub use strength::{score, StrengthLabel, StrengthResult};
pub use validation::{validate, PasswordViolation, ValidationResult};

#[cfg(test)]
mod tests;
