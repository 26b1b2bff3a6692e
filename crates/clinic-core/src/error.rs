// SPDX-FileCopyrightText: 2026 Clinic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Clinic credential vault and PII scrubber.

use thiserror::Error;

/// The primary error type used across the vault, configuration, and CLI crates.
///
/// None of these variants are retried internally: cryptographic failures are
/// deterministic, so a retry would fail the same way.
#[derive(Debug, Error)]
pub enum ClinicError {
    /// Configuration errors (invalid TOML, bad KDF parameters, empty context).
    #[error("configuration error: {0}")]
    Config(String),

    /// The cipher primitive failed while sealing a secret.
    #[error("encryption failed: {0}")]
    Encryption(String),

    /// Authentication or decoding failed while opening a sealed secret.
    ///
    /// Covers tampering, a wrong passphrase, a wrong salt or IV, and corrupted
    /// records alike. The caller decides which of those it suspects.
    #[error("decryption failed: {0}")]
    Decryption(String),

    /// A sealed record failed structural validation before any cryptography ran.
    #[error("malformed sealed record: {field}: {reason}")]
    MalformedRecord { field: &'static str, reason: String },

    /// The master passphrase could not be obtained.
    #[error("master passphrase unavailable: {0}")]
    Passphrase(String),

    /// Internal or unexpected errors (RNG failure, task join failure).
    #[error("internal error: {0}")]
    Internal(String),
}

impl ClinicError {
    /// Whether the stored credential is unusable and must be entered again.
    ///
    /// Callers surface these as "credential unavailable / re-entry required"
    /// and never fall back to a cached or default secret.
    pub fn requires_reentry(&self) -> bool {
        matches!(
            self,
            ClinicError::Decryption(_) | ClinicError::MalformedRecord { .. }
        )
    }

    /// Shorthand for a [`ClinicError::MalformedRecord`].
    pub fn malformed(field: &'static str, reason: impl Into<String>) -> Self {
        ClinicError::MalformedRecord {
            field,
            reason: reason.into(),
        }
    }
}
