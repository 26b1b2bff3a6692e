// SPDX-FileCopyrightText: 2026 Clinic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Stateless helpers: random identifiers and content checksums.

use clinic_core::ClinicError;
use ring::rand::{SecureRandom, SystemRandom};
use sha2::{Digest, Sha256};

/// Upper bound on token size, to keep a typo from allocating gigabytes.
pub const MAX_TOKEN_BYTES: usize = 1024;

/// Generate `byte_len` bytes from the system CSPRNG, hex-encoded.
///
/// Used for identifiers that must be unguessable, such as webhook path
/// segments. The result is `2 * byte_len` characters long.
pub fn generate_secure_token(byte_len: usize) -> Result<String, ClinicError> {
    if byte_len == 0 || byte_len > MAX_TOKEN_BYTES {
        return Err(ClinicError::Config(format!(
            "token length must be between 1 and {MAX_TOKEN_BYTES} bytes, got {byte_len}"
        )));
    }

    let rng = SystemRandom::new();
    let mut bytes = vec![0u8; byte_len];
    rng.fill(&mut bytes)
        .map_err(|_| ClinicError::Internal("failed to generate random token".to_string()))?;
    Ok(hex::encode(bytes))
}

/// SHA-256 of `data`, hex-encoded. For dedup and integrity of non-secret content.
pub fn checksum(data: &str) -> String {
    hex::encode(Sha256::digest(data.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_has_two_hex_chars_per_byte() {
        let token = generate_secure_token(32).unwrap();
        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn tokens_are_unique() {
        let a = generate_secure_token(16).unwrap();
        let b = generate_secure_token(16).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn token_length_bounds() {
        assert!(generate_secure_token(0).is_err());
        assert!(generate_secure_token(MAX_TOKEN_BYTES + 1).is_err());
        assert!(generate_secure_token(MAX_TOKEN_BYTES).is_ok());
    }

    #[test]
    fn checksum_matches_known_digests() {
        assert_eq!(
            checksum(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(
            checksum("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn checksum_is_deterministic() {
        let doc = "Clinic opening hours: Mon-Fri 9am-5pm";
        assert_eq!(checksum(doc), checksum(doc));
        assert_ne!(checksum(doc), checksum("Clinic opening hours: Mon-Fri 9am-6pm"));
    }
}
