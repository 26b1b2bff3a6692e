// SPDX-FileCopyrightText: 2026 Clinic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Passphrase key derivation.
//!
//! Every sealed record carries its own 256-bit salt; the working key is
//! derived from (master passphrase, record salt) on each call and lives only
//! in [`Zeroizing`] memory for the duration of that call.

use std::num::NonZeroU32;

use clinic_config::model::{KdfAlgorithm, VaultConfig};
use clinic_config::validation::{MIN_ARGON2_MEMORY_COST, MIN_PBKDF2_ITERATIONS};
use clinic_core::ClinicError;
use ring::pbkdf2;
use ring::rand::{SecureRandom, SystemRandom};
use zeroize::Zeroizing;

/// Salt length in bytes (256 bits).
pub const SALT_LEN: usize = 32;

/// Derived key length in bytes (AES-256).
pub const KEY_LEN: usize = 32;

const DEFAULT_PBKDF2_ITERATIONS: NonZeroU32 = match NonZeroU32::new(MIN_PBKDF2_ITERATIONS) {
    Some(n) => n,
    None => panic!("PBKDF2 iteration floor must be non-zero"),
};

/// Key derivation parameters. Sealing and opening must use identical values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KdfParams {
    /// PBKDF2-HMAC-SHA512.
    Pbkdf2Sha512 { iterations: NonZeroU32 },
    /// Argon2id, version 0x13.
    Argon2id {
        memory_cost: u32,
        iterations: u32,
        parallelism: u32,
    },
}

impl Default for KdfParams {
    fn default() -> Self {
        KdfParams::Pbkdf2Sha512 {
            iterations: DEFAULT_PBKDF2_ITERATIONS,
        }
    }
}

impl KdfParams {
    /// PBKDF2-HMAC-SHA512 with the given iteration count (at least 100000).
    pub fn pbkdf2(iterations: u32) -> Result<Self, ClinicError> {
        if iterations < MIN_PBKDF2_ITERATIONS {
            return Err(ClinicError::Config(format!(
                "PBKDF2 iterations must be at least {MIN_PBKDF2_ITERATIONS}, got {iterations}"
            )));
        }
        let iterations = NonZeroU32::new(iterations)
            .ok_or_else(|| ClinicError::Config("PBKDF2 iterations must be non-zero".into()))?;
        Ok(KdfParams::Pbkdf2Sha512 { iterations })
    }

    /// Argon2id with OWASP-style floors (32 MiB, 2 passes, 1 lane).
    pub fn argon2id(memory_cost: u32, iterations: u32, parallelism: u32) -> Result<Self, ClinicError> {
        if memory_cost < MIN_ARGON2_MEMORY_COST || iterations < 2 || parallelism < 1 {
            return Err(ClinicError::Config(format!(
                "Argon2id parameters too weak (memory_cost={memory_cost}, iterations={iterations}, parallelism={parallelism})"
            )));
        }
        if u64::from(memory_cost) < 8 * u64::from(parallelism) {
            return Err(ClinicError::Config(format!(
                "Argon2id memory_cost ({memory_cost}) must be at least 8 * parallelism ({parallelism})"
            )));
        }
        Ok(KdfParams::Argon2id {
            memory_cost,
            iterations,
            parallelism,
        })
    }

    /// Build parameters from the `[vault]` config section.
    pub fn from_config(config: &VaultConfig) -> Result<Self, ClinicError> {
        match config.kdf {
            KdfAlgorithm::Pbkdf2Sha512 => Self::pbkdf2(config.pbkdf2_iterations),
            KdfAlgorithm::Argon2id => Self::argon2id(
                config.argon2_memory_cost,
                config.argon2_iterations,
                config.argon2_parallelism,
            ),
        }
    }

    /// Short algorithm name for log fields.
    pub fn algorithm_name(&self) -> &'static str {
        match self {
            KdfParams::Pbkdf2Sha512 { .. } => "pbkdf2-sha512",
            KdfParams::Argon2id { .. } => "argon2id",
        }
    }
}

/// Derive a 32-byte key from `passphrase` and `salt`.
///
/// Deterministic for identical inputs; intentionally slow.
pub fn derive_key(
    passphrase: &[u8],
    salt: &[u8],
    params: &KdfParams,
) -> Result<Zeroizing<[u8; KEY_LEN]>, ClinicError> {
    let mut output = Zeroizing::new([0u8; KEY_LEN]);

    match *params {
        KdfParams::Pbkdf2Sha512 { iterations } => {
            pbkdf2::derive(
                pbkdf2::PBKDF2_HMAC_SHA512,
                iterations,
                salt,
                passphrase,
                output.as_mut(),
            );
        }
        KdfParams::Argon2id {
            memory_cost,
            iterations,
            parallelism,
        } => {
            let argon_params = argon2::Params::new(memory_cost, iterations, parallelism, Some(KEY_LEN))
                .map_err(|e| ClinicError::Config(format!("invalid Argon2id parameters: {e}")))?;
            argon2::Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, argon_params)
                .hash_password_into(passphrase, salt, output.as_mut())
                .map_err(|e| ClinicError::Internal(format!("Argon2id key derivation failed: {e}")))?;
        }
    }

    Ok(output)
}

/// Derive a key with the default parameters and return it hex-encoded.
///
/// For callers that need raw key material outside seal/open, e.g. comparing
/// derivations before and after a passphrase change.
pub fn derive_passphrase_key(passphrase: &str, salt: &[u8]) -> Result<Zeroizing<String>, ClinicError> {
    let key = derive_key(passphrase.as_bytes(), salt, &KdfParams::default())?;
    Ok(Zeroizing::new(hex::encode(key.as_ref())))
}

/// Generate a random 32-byte salt from the system CSPRNG.
pub fn generate_salt() -> Result<[u8; SALT_LEN], ClinicError> {
    let rng = SystemRandom::new();
    let mut salt = [0u8; SALT_LEN];
    rng.fill(&mut salt)
        .map_err(|_| ClinicError::Internal("failed to generate random salt".to_string()))?;
    Ok(salt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_key_produces_consistent_output() {
        let salt = [1u8; SALT_LEN];
        let params = KdfParams::default();

        let key1 = derive_key(b"test passphrase", &salt, &params).unwrap();
        let key2 = derive_key(b"test passphrase", &salt, &params).unwrap();

        assert_eq!(*key1, *key2);
    }

    #[test]
    fn different_passphrase_or_salt_changes_key() {
        let params = KdfParams::default();
        let base = derive_key(b"passphrase one", &[2u8; SALT_LEN], &params).unwrap();
        let other_pass = derive_key(b"passphrase two", &[2u8; SALT_LEN], &params).unwrap();
        let other_salt = derive_key(b"passphrase one", &[3u8; SALT_LEN], &params).unwrap();

        assert_ne!(*base, *other_pass);
        assert_ne!(*base, *other_salt);
    }

    #[test]
    fn pbkdf2_matches_known_sha512_vector() {
        // PBKDF2-HMAC-SHA512("password", "salt", 1 iteration), first 32 bytes.
        let mut out = [0u8; KEY_LEN];
        pbkdf2::derive(
            pbkdf2::PBKDF2_HMAC_SHA512,
            NonZeroU32::MIN,
            b"salt",
            b"password",
            &mut out,
        );
        assert_eq!(
            hex::encode(out),
            "867f70cf1ade02cff3752599a3a53dc4af34c7a669815ae5d513554e1c8cf252"
        );
    }

    #[test]
    fn argon2id_derivation_differs_from_pbkdf2() {
        let salt = [9u8; SALT_LEN];
        let argon = KdfParams::argon2id(MIN_ARGON2_MEMORY_COST, 2, 1).unwrap();

        let a = derive_key(b"same passphrase", &salt, &argon).unwrap();
        let p = derive_key(b"same passphrase", &salt, &KdfParams::default()).unwrap();

        assert_ne!(*a, *p);
    }

    #[test]
    fn weak_parameters_are_rejected() {
        assert!(KdfParams::pbkdf2(99_999).is_err());
        assert!(KdfParams::pbkdf2(100_000).is_ok());
        assert!(KdfParams::argon2id(1024, 3, 1).is_err());
        assert!(KdfParams::argon2id(MIN_ARGON2_MEMORY_COST, 1, 1).is_err());
        assert!(KdfParams::argon2id(MIN_ARGON2_MEMORY_COST, 2, 0).is_err());
        assert!(KdfParams::argon2id(MIN_ARGON2_MEMORY_COST, 2, 5000).is_err());
        assert!(KdfParams::argon2id(MIN_ARGON2_MEMORY_COST, 2, 4096).is_ok());
    }

    #[test]
    fn from_config_follows_selected_algorithm() {
        let mut config = VaultConfig::default();
        assert_eq!(KdfParams::from_config(&config).unwrap(), KdfParams::default());

        config.kdf = KdfAlgorithm::Argon2id;
        let params = KdfParams::from_config(&config).unwrap();
        assert_eq!(params.algorithm_name(), "argon2id");
    }

    #[test]
    fn derive_passphrase_key_is_64_hex_chars() {
        let key = derive_passphrase_key("Str0ng!Passphrase", &[7u8; SALT_LEN]).unwrap();
        assert_eq!(key.len(), 64);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));

        let again = derive_passphrase_key("Str0ng!Passphrase", &[7u8; SALT_LEN]).unwrap();
        assert_eq!(*key, *again);
    }

    #[test]
    fn generate_salt_produces_random_values() {
        assert_ne!(generate_salt().unwrap(), generate_salt().unwrap());
    }
}
