//! Randomized property tests for the password module

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::*;
use crate::error::VaultError;

fn random_policy<R: Rng>(rng: &mut R) -> GeneratorPolicy {
    GeneratorPolicy {
        length: rng.random_range(0..64),
        include_uppercase: rng.random_bool(0.5),
        include_lowercase: rng.random_bool(0.5),
        include_numbers: rng.random_bool(0.5),
        include_symbols: rng.random_bool(0.5),
    }
}

/// Every generated character comes from an enabled class, and the length is exact
#[test]
fn test_generated_chars_respect_policy() {
    let mut rng = rand::rng();

    for i in 0..500 {
        let policy = random_policy(&mut rng);
        let result = generate(&policy);

        if !policy.is_valid() {
            assert!(
                matches!(result, Err(VaultError::InvalidPolicy(_))),
                "Empty policy must fail, iteration {}", i
            );
            continue;
        }

        let password = result.unwrap();
        assert_eq!(password.chars().count(), policy.length, "Length mismatch at iteration {}", i);
        assert!(
            password.chars().all(|c| policy.includes(CharacterClass::of(c))),
            "Character outside enabled classes at iteration {}: {}", i, password
        );
    }
}

/// Every eligible character is drawn, each at roughly the same rate
#[test]
fn test_generation_covers_whole_charset() {
    let policy = GeneratorPolicy {
        length: 32,
        include_uppercase: true,
        include_lowercase: true,
        include_numbers: true,
        include_symbols: true,
    };
    let charset: Vec<char> = policy.charset().chars().collect();
    let mut rng = StdRng::seed_from_u64(0x5eed);

    let mut counts: HashMap<char, usize> = HashMap::new();
    let rounds = 1000;
    for _ in 0..rounds {
        for c in generate_with_rng(&policy, &mut rng).unwrap().chars() {
            *counts.entry(c).or_default() += 1;
        }
    }

    let expected = (rounds * policy.length) as f64 / charset.len() as f64;
    for c in &charset {
        let count = counts.get(c).copied().unwrap_or(0);
        assert!(count > 0, "Character {:?} never generated", c);
        assert!(
            (count as f64) > expected * 0.7 && (count as f64) < expected * 1.3,
            "Character {:?} drawn {} times, expected about {:.0}", c, count, expected
        );
    }
    assert_eq!(counts.len(), charset.len());
}

/// The last character of each single-class charset is reachable
#[test]
fn test_generation_reaches_last_char_of_each_class() {
    let mut rng = StdRng::seed_from_u64(7);

    for class in CharacterClass::ALL {
        let policy = GeneratorPolicy {
            length: 2000,
            include_uppercase: class == CharacterClass::Uppercase,
            include_lowercase: class == CharacterClass::Lowercase,
            include_numbers: class == CharacterClass::Digit,
            include_symbols: class == CharacterClass::Symbol,
        };
        let last = class.chars().chars().last().unwrap();
        let password = generate_with_rng(&policy, &mut rng).unwrap();
        assert!(password.contains(last), "{:?} never produced {:?}", class, last);
    }
}

/// The eligible set does not depend on the order flags are assigned in
#[test]
fn test_charset_independent_of_assignment_order() {
    let mut forward = GeneratorPolicy { length: 12, ..Default::default() };
    forward.include_lowercase = true;
    forward.include_uppercase = false;
    forward.include_numbers = true;
    forward.include_symbols = true;

    let mut backward = GeneratorPolicy { length: 12, ..Default::default() };
    backward.include_symbols = true;
    backward.include_numbers = true;
    backward.include_uppercase = false;
    backward.include_lowercase = true;

    assert_eq!(forward.charset(), backward.charset());
    assert_eq!(forward.charset(), forward.charset());
}

/// Scores stay in range and agree with their label
#[test]
fn test_score_range_and_label() {
    let mut rng = rand::rng();
    let policy = GeneratorPolicy {
        length: 0,
        include_uppercase: true,
        include_lowercase: true,
        include_numbers: true,
        include_symbols: true,
    };

    for _ in 0..300 {
        let policy = GeneratorPolicy { length: rng.random_range(0..40), ..policy.clone() };
        let password = generate(&policy).unwrap();
        let result = score(&password);

        assert!(result.score <= 7);
        assert_eq!(result.label, StrengthLabel::from_score(result.score));
        assert_eq!(result, score(&password));
    }
}

/// A password accepted by the validator always scores at least Fair
#[test]
fn test_valid_passwords_are_not_weak() {
    let mut rng = rand::rng();

    for _ in 0..300 {
        let policy = random_policy(&mut rng);
        let Ok(password) = generate(&policy) else { continue };

        let validation = validate(&password);
        assert_eq!(validation.is_valid, validation.errors.is_empty());
        if validation.is_valid {
            // length>=8, lower, upper, digit
            assert!(score(&password).score >= 4);
        }
    }
}

/// Validation and scoring are total over arbitrary input
#[test]
fn test_total_over_arbitrary_strings() {
    let samples = ["", " ", "\n\t", "🔐🔐🔐🔐🔐🔐🔐🔐", "Ünïcödé123", "a".repeat(10_000).as_str()]
        .map(str::to_string);

    for sample in samples {
        let result = score(&sample);
        assert!(result.score <= 7);
        let validation = validate(&sample);
        assert!(validation.errors.len() <= 4);
    }
}
