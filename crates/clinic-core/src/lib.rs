// SPDX-FileCopyrightText: 2026 Clinic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Clinic credential vault and PII scrubber.
//!
//! This crate provides the error taxonomy shared by the vault, configuration,
//! security, and CLI crates.

pub mod error;

pub use error::ClinicError;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clinic_error_has_all_variants() {
        let _config = ClinicError::Config("test".into());
        let _encryption = ClinicError::Encryption("test".into());
        let _decryption = ClinicError::Decryption("test".into());
        let _malformed = ClinicError::malformed("iv", "expected 16 bytes");
        let _passphrase = ClinicError::Passphrase("test".into());
        let _internal = ClinicError::Internal("test".into());
    }

    #[test]
    fn only_open_failures_require_reentry() {
        assert!(ClinicError::Decryption("tag mismatch".into()).requires_reentry());
        assert!(ClinicError::malformed("authTag", "bad hex").requires_reentry());

        assert!(!ClinicError::Encryption("cipher".into()).requires_reentry());
        assert!(!ClinicError::Config("bad".into()).requires_reentry());
        assert!(!ClinicError::Passphrase("missing".into()).requires_reentry());
        assert!(!ClinicError::Internal("join".into()).requires_reentry());
    }

    #[test]
    fn malformed_record_display_names_the_field() {
        let err = ClinicError::malformed("salt", "expected 32 bytes, got 4");
        assert_eq!(
            err.to_string(),
            "malformed sealed record: salt: expected 32 bytes, got 4"
        );
    }
}
