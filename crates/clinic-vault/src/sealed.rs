// SPDX-FileCopyrightText: 2026 Clinic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The at-rest representation of an encrypted secret.
//!
//! A [`SealedSecret`] is four hex strings that must be stored and replaced
//! together. Storage layers treat it as opaque: either the JSON object
//! (`ciphertext`, `iv`, `authTag`, `salt`) or the compact single-string form
//! produced by `Display`.

use std::fmt;
use std::str::FromStr;

use clinic_core::ClinicError;
use serde::{Deserialize, Serialize};

use crate::cipher::{IV_LEN, TAG_LEN};
use crate::kdf::SALT_LEN;

const COMPACT_VERSION: &str = "v1";

/// An encrypted secret plus everything needed to open it except the passphrase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SealedSecret {
    /// Hex ciphertext, same byte length as the plaintext.
    pub ciphertext: String,
    /// Hex 128-bit IV, unique per seal.
    pub iv: String,
    /// Hex 128-bit GCM authentication tag.
    pub auth_tag: String,
    /// Hex 256-bit KDF salt.
    pub salt: String,
}

/// A structurally valid record decoded to raw bytes.
#[derive(Debug)]
pub(crate) struct DecodedSecret {
    pub ciphertext: Vec<u8>,
    pub iv: [u8; IV_LEN],
    pub tag: [u8; TAG_LEN],
    pub salt: [u8; SALT_LEN],
}

impl SealedSecret {
    pub(crate) fn from_parts(
        ciphertext: &[u8],
        iv: &[u8; IV_LEN],
        tag: &[u8; TAG_LEN],
        salt: &[u8; SALT_LEN],
    ) -> Self {
        Self {
            ciphertext: hex::encode(ciphertext),
            iv: hex::encode(iv),
            auth_tag: hex::encode(tag),
            salt: hex::encode(salt),
        }
    }

    /// Check hex encoding and fixed field lengths without any cryptography.
    pub fn validate(&self) -> Result<(), ClinicError> {
        self.decode().map(|_| ())
    }

    pub(crate) fn decode(&self) -> Result<DecodedSecret, ClinicError> {
        let ciphertext = hex::decode(&self.ciphertext)
            .map_err(|e| ClinicError::malformed("ciphertext", format!("invalid hex: {e}")))?;

        Ok(DecodedSecret {
            ciphertext,
            iv: decode_fixed::<IV_LEN>("iv", &self.iv)?,
            tag: decode_fixed::<TAG_LEN>("authTag", &self.auth_tag)?,
            salt: decode_fixed::<SALT_LEN>("salt", &self.salt)?,
        })
    }

    /// The decoded salt, for re-sealing under the same key context.
    pub fn salt_bytes(&self) -> Result<[u8; SALT_LEN], ClinicError> {
        decode_fixed::<SALT_LEN>("salt", &self.salt)
    }
}

fn decode_fixed<const N: usize>(field: &'static str, value: &str) -> Result<[u8; N], ClinicError> {
    if value.is_empty() {
        return Err(ClinicError::malformed(field, "missing"));
    }
    let bytes = hex::decode(value)
        .map_err(|e| ClinicError::malformed(field, format!("invalid hex: {e}")))?;
    let len = bytes.len();
    bytes
        .try_into()
        .map_err(|_| ClinicError::malformed(field, format!("expected {N} bytes, got {len}")))
}

/// Compact form: `v1.<salt>.<iv>.<authTag>.<ciphertext>`.
impl fmt::Display for SealedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{COMPACT_VERSION}.{}.{}.{}.{}",
            self.salt, self.iv, self.auth_tag, self.ciphertext
        )
    }
}

impl FromStr for SealedSecret {
    type Err = ClinicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split('.').collect();
        let [version, salt, iv, auth_tag, ciphertext] = parts.as_slice() else {
            return Err(ClinicError::malformed(
                "record",
                format!("expected 5 dot-separated parts, got {}", parts.len()),
            ));
        };
        if *version != COMPACT_VERSION {
            return Err(ClinicError::malformed(
                "record",
                format!("unsupported version `{version}`"),
            ));
        }

        let sealed = SealedSecret {
            ciphertext: ciphertext.to_string(),
            iv: iv.to_string(),
            auth_tag: auth_tag.to_string(),
            salt: salt.to_string(),
        };
        sealed.validate()?;
        Ok(sealed)
    }
}
