// SPDX-FileCopyrightText: 2026 Clinic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Low-level AES-256-GCM seal/open with a 128-bit IV and a detached tag.
//!
//! Every call to [`seal`] draws a fresh IV from the system CSPRNG. The
//! associated data is authenticated but not encrypted; opening with a
//! different associated data fails exactly like tampering does.

#![allow(deprecated)] // generic-array 0.14 `from_slice`

use aes_gcm::aead::consts::U16;
use aes_gcm::aead::generic_array::GenericArray;
use aes_gcm::aead::{AeadInPlace, KeyInit};
use aes_gcm::aes::Aes256;
use aes_gcm::AesGcm;
use clinic_core::ClinicError;
use ring::rand::{SecureRandom, SystemRandom};

use crate::kdf::KEY_LEN;

/// IV length in bytes (128 bits).
pub const IV_LEN: usize = 16;

/// Authentication tag length in bytes (128 bits).
pub const TAG_LEN: usize = 16;

/// AES-256-GCM instantiated with a 16-byte nonce.
type Aes256Gcm128 = AesGcm<Aes256, U16>;

/// Output of [`seal`]: ciphertext (same length as the plaintext), IV, and tag.
#[derive(Debug)]
pub struct Sealed {
    pub ciphertext: Vec<u8>,
    pub iv: [u8; IV_LEN],
    pub tag: [u8; TAG_LEN],
}

/// Encrypt `plaintext` under `key` with a fresh random IV, binding `aad`.
pub fn seal(key: &[u8; KEY_LEN], plaintext: &[u8], aad: &[u8]) -> Result<Sealed, ClinicError> {
    let iv = generate_iv()?;
    seal_with_iv(key, &iv, plaintext, aad)
}

/// Encrypt with a caller-chosen IV. Only [`seal`] and tests call this.
pub(crate) fn seal_with_iv(
    key: &[u8; KEY_LEN],
    iv: &[u8; IV_LEN],
    plaintext: &[u8],
    aad: &[u8],
) -> Result<Sealed, ClinicError> {
    let cipher = Aes256Gcm128::new_from_slice(key)
        .map_err(|_| ClinicError::Encryption("failed to create AES-256-GCM key".to_string()))?;

    let mut buffer = plaintext.to_vec();
    let tag = cipher
        .encrypt_in_place_detached(GenericArray::from_slice(iv), aad, &mut buffer)
        .map_err(|_| ClinicError::Encryption("AES-256-GCM encryption failed".to_string()))?;

    let mut tag_bytes = [0u8; TAG_LEN];
    tag_bytes.copy_from_slice(tag.as_slice());

    Ok(Sealed {
        ciphertext: buffer,
        iv: *iv,
        tag: tag_bytes,
    })
}

/// Decrypt and authenticate. Returns plaintext only if the tag verifies.
pub fn open(
    key: &[u8; KEY_LEN],
    iv: &[u8; IV_LEN],
    tag: &[u8; TAG_LEN],
    ciphertext: &[u8],
    aad: &[u8],
) -> Result<Vec<u8>, ClinicError> {
    let cipher = Aes256Gcm128::new_from_slice(key)
        .map_err(|_| ClinicError::Decryption("failed to create AES-256-GCM key".to_string()))?;

    let mut buffer = ciphertext.to_vec();
    cipher
        .decrypt_in_place_detached(
            GenericArray::from_slice(iv),
            aad,
            &mut buffer,
            GenericArray::from_slice(tag),
        )
        .map_err(|_| {
            ClinicError::Decryption(
                "authentication tag mismatch: wrong passphrase, wrong context, or tampered record"
                    .to_string(),
            )
        })?;

    Ok(buffer)
}

/// Generate a random 16-byte IV.
pub fn generate_iv() -> Result<[u8; IV_LEN], ClinicError> {
    let rng = SystemRandom::new();
    let mut iv = [0u8; IV_LEN];
    rng.fill(&mut iv)
        .map_err(|_| ClinicError::Encryption("failed to generate random IV".to_string()))?;
    Ok(iv)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: [u8; KEY_LEN] = [0x42; KEY_LEN];
    const AAD: &[u8] = b"clinic-test-context";

    #[test]
    fn seal_open_roundtrip() {
        let plaintext = b"cliniko api key value";

        let sealed = seal(&KEY, plaintext, AAD).unwrap();
        let decrypted = open(&KEY, &sealed.iv, &sealed.tag, &sealed.ciphertext, AAD).unwrap();

        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn ciphertext_length_matches_plaintext() {
        let sealed = seal(&KEY, b"hello", AAD).unwrap();
        // GCM is a stream mode; the tag travels separately.
        assert_eq!(sealed.ciphertext.len(), 5);
    }

    #[test]
    fn seal_uses_fresh_iv_each_call() {
        let a = seal(&KEY, b"same input twice", AAD).unwrap();
        let b = seal(&KEY, b"same input twice", AAD).unwrap();

        assert_ne!(a.iv, b.iv);
        assert_ne!(a.ciphertext, b.ciphertext);
    }

    #[test]
    fn fixed_iv_is_deterministic() {
        let iv = [7u8; IV_LEN];
        let a = seal_with_iv(&KEY, &iv, b"payload", AAD).unwrap();
        let b = seal_with_iv(&KEY, &iv, b"payload", AAD).unwrap();

        assert_eq!(a.ciphertext, b.ciphertext);
        assert_eq!(a.tag, b.tag);
    }

    #[test]
    fn open_with_wrong_key_fails() {
        let sealed = seal(&KEY, b"secret data", AAD).unwrap();
        let result = open(&[0x24; KEY_LEN], &sealed.iv, &sealed.tag, &sealed.ciphertext, AAD);

        assert!(matches!(result, Err(ClinicError::Decryption(_))));
    }

    #[test]
    fn open_with_wrong_aad_fails() {
        let sealed = seal(&KEY, b"secret data", AAD).unwrap();
        let result = open(&KEY, &sealed.iv, &sealed.tag, &sealed.ciphertext, b"other-context");

        assert!(matches!(result, Err(ClinicError::Decryption(_))));
    }

    #[test]
    fn tampered_tag_fails_decryption() {
        let mut sealed = seal(&KEY, b"do not tamper", AAD).unwrap();
        sealed.tag[TAG_LEN - 1] ^= 0x80;

        let result = open(&KEY, &sealed.iv, &sealed.tag, &sealed.ciphertext, AAD);
        assert!(matches!(result, Err(ClinicError::Decryption(_))));
    }

    #[test]
    fn empty_plaintext_still_authenticates() {
        let sealed = seal(&KEY, b"", AAD).unwrap();
        assert!(sealed.ciphertext.is_empty());

        let opened = open(&KEY, &sealed.iv, &sealed.tag, &sealed.ciphertext, AAD).unwrap();
        assert!(opened.is_empty());

        let mut bad_tag = sealed.tag;
        bad_tag[0] ^= 1;
        assert!(open(&KEY, &sealed.iv, &bad_tag, &sealed.ciphertext, AAD).is_err());
    }
}
