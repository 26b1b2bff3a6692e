// SPDX-FileCopyrightText: 2026 Clinic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The credential vault: seal secrets into self-describing records and open them again.
//!
//! The vault holds only the master passphrase, the KDF parameters, and the
//! associated-data context. Each seal draws a fresh salt and IV; each open
//! re-derives the key from the salt stored in that record. No derived key
//! outlives the call that produced it, so concurrent calls cannot interfere.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use clinic_config::model::{DEFAULT_VAULT_CONTEXT, VaultConfig};
use clinic_core::ClinicError;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};

use crate::cipher;
use crate::kdf::{self, KdfParams, SALT_LEN};
use crate::sealed::SealedSecret;

/// Seals and opens secrets under a master passphrase.
///
/// Debug output intentionally omits the passphrase.
pub struct CredentialVault {
    passphrase: SecretString,
    kdf: KdfParams,
    context: String,
}

impl std::fmt::Debug for CredentialVault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialVault")
            .field("passphrase", &"[REDACTED]")
            .field("kdf", &self.kdf)
            .field("context", &self.context)
            .finish()
    }
}

impl CredentialVault {
    /// Create a vault. Fails on an empty passphrase or empty context.
    pub fn new(
        passphrase: SecretString,
        kdf: KdfParams,
        context: impl Into<String>,
    ) -> Result<Self, ClinicError> {
        if passphrase.expose_secret().is_empty() {
            return Err(ClinicError::Config(
                "master passphrase must not be empty".to_string(),
            ));
        }
        let context = context.into();
        if context.trim().is_empty() {
            return Err(ClinicError::Config(
                "vault context must not be empty".to_string(),
            ));
        }

        Ok(Self {
            passphrase,
            kdf,
            context,
        })
    }

    /// Create a vault from the `[vault]` config section.
    pub fn from_config(passphrase: SecretString, config: &VaultConfig) -> Result<Self, ClinicError> {
        Self::new(passphrase, KdfParams::from_config(config)?, config.context.clone())
    }

    /// Create a vault with PBKDF2-HMAC-SHA512 (100000 iterations) and the default context.
    pub fn with_defaults(passphrase: SecretString) -> Result<Self, ClinicError> {
        Self::new(passphrase, KdfParams::default(), DEFAULT_VAULT_CONTEXT)
    }

    /// The associated-data context bound into every record.
    pub fn context(&self) -> &str {
        &self.context
    }

    /// The KDF parameters used for every derivation.
    pub fn kdf(&self) -> &KdfParams {
        &self.kdf
    }

    /// Encrypt a secret under a fresh salt and a fresh IV.
    pub fn seal(&self, plaintext: &str) -> Result<SealedSecret, ClinicError> {
        let salt = kdf::generate_salt().map_err(|e| ClinicError::Encryption(e.to_string()))?;
        self.seal_with_salt(plaintext, &salt)
    }

    /// Encrypt a secret reusing an existing salt. The IV is still fresh.
    pub fn seal_with_salt(
        &self,
        plaintext: &str,
        salt: &[u8; SALT_LEN],
    ) -> Result<SealedSecret, ClinicError> {
        let key = kdf::derive_key(self.passphrase.expose_secret().as_bytes(), salt, &self.kdf)
            .map_err(|e| ClinicError::Encryption(e.to_string()))?;

        let sealed = cipher::seal(&key, plaintext.as_bytes(), self.context.as_bytes())?;

        debug!(
            kdf = self.kdf.algorithm_name(),
            ciphertext_len = sealed.ciphertext.len(),
            "secret sealed"
        );
        Ok(SealedSecret::from_parts(
            &sealed.ciphertext,
            &sealed.iv,
            &sealed.tag,
            salt,
        ))
    }

    /// Replace a record wholesale with a new plaintext, keeping its salt.
    ///
    /// The previous record is validated first; it is never patched in place.
    pub fn reseal(&self, plaintext: &str, previous: &SealedSecret) -> Result<SealedSecret, ClinicError> {
        let salt = previous.salt_bytes()?;
        self.seal_with_salt(plaintext, &salt)
    }

    /// Authenticate and decrypt a record.
    ///
    /// The key is derived from this record's own salt on every call. Any
    /// structural problem yields `MalformedRecord`; any authentication problem
    /// yields `Decryption`. Plaintext is returned only after the tag verifies.
    pub fn open(&self, sealed: &SealedSecret) -> Result<SecretString, ClinicError> {
        let decoded = sealed.decode()?;

        let key = kdf::derive_key(
            self.passphrase.expose_secret().as_bytes(),
            &decoded.salt,
            &self.kdf,
        )
        .map_err(|e| ClinicError::Decryption(e.to_string()))?;

        let plaintext = cipher::open(
            &key,
            &decoded.iv,
            &decoded.tag,
            &decoded.ciphertext,
            self.context.as_bytes(),
        )
        .inspect_err(|_| {
            warn!(
                kdf = self.kdf.algorithm_name(),
                "sealed secret failed authentication"
            );
        })?;

        let value = String::from_utf8(plaintext).map_err(|_| {
            ClinicError::Decryption("decrypted value is not valid UTF-8".to_string())
        })?;

        debug!(kdf = self.kdf.algorithm_name(), "secret opened");
        Ok(SecretString::from(value))
    }
}

/// Mask a secret value for display: `"sk_l...wxyz"` format.
///
/// Shows up to 4 leading and 4 trailing characters. Values shorter than 10
/// characters are fully masked as `"****"`.
pub fn mask_secret(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() < 10 {
        return "****".to_string();
    }
    let prefix: String = chars[..4].iter().collect();
    let suffix: String = chars[chars.len() - 4..].iter().collect();
    format!("{prefix}...{suffix}")
}

/// HTTP Basic `Authorization` header value for a booking-system API key.
///
/// Cliniko-style APIs take the key as the username with an empty password:
/// `Basic base64("<key>:")`.
pub fn basic_auth_header(api_key: &SecretString) -> SecretString {
    let encoded = STANDARD.encode(format!("{}:", api_key.expose_secret()));
    SecretString::from(format!("Basic {encoded}"))
}
