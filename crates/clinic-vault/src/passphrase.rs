// SPDX-FileCopyrightText: 2026 Clinic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Master passphrase strength rules.

use serde::Serialize;
use strum::Display;

/// Minimum passphrase length, in characters.
pub const MIN_PASSPHRASE_LEN: usize = 12;

/// A single failed strength rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PassphraseViolation {
    #[strum(to_string = "must be at least 12 characters long")]
    TooShort,
    #[strum(to_string = "must contain an uppercase letter")]
    MissingUppercase,
    #[strum(to_string = "must contain a lowercase letter")]
    MissingLowercase,
    #[strum(to_string = "must contain a digit")]
    MissingDigit,
    #[strum(to_string = "must contain a symbol")]
    MissingSymbol,
}

/// Result of [`validate_passphrase_strength`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PassphraseReport {
    pub valid: bool,
    /// Every failed rule, in the order the rules are checked.
    pub violations: Vec<PassphraseViolation>,
}

/// Check a passphrase against every rule and report all failures.
///
/// Symbols are any non-alphanumeric, non-whitespace character.
pub fn validate_passphrase_strength(passphrase: &str) -> PassphraseReport {
    let mut violations = Vec::new();

    if passphrase.chars().count() < MIN_PASSPHRASE_LEN {
        violations.push(PassphraseViolation::TooShort);
    }
    if !passphrase.chars().any(char::is_uppercase) {
        violations.push(PassphraseViolation::MissingUppercase);
    }
    if !passphrase.chars().any(char::is_lowercase) {
        violations.push(PassphraseViolation::MissingLowercase);
    }
    if !passphrase.chars().any(|c| c.is_ascii_digit()) {
        violations.push(PassphraseViolation::MissingDigit);
    }
    if !passphrase
        .chars()
        .any(|c| !c.is_alphanumeric() && !c.is_whitespace())
    {
        violations.push(PassphraseViolation::MissingSymbol);
    }

    PassphraseReport {
        valid: violations.is_empty(),
        violations,
    }
}
