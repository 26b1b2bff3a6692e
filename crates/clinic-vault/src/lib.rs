// SPDX-FileCopyrightText: 2026 Clinic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! AES-256-GCM credential vault for clinic booking-system API keys.
//!
//! Secrets are sealed into self-describing [`SealedSecret`] records
//! (ciphertext, 128-bit IV, 128-bit tag, 256-bit salt). The working key is
//! derived per record from the master passphrase and the record's salt via
//! PBKDF2-HMAC-SHA512 or Argon2id, and is never stored.

pub mod blocking;
pub mod cipher;
pub mod kdf;
pub mod passphrase;
pub mod prompt;
pub mod sealed;
pub mod token;
pub mod vault;

pub use blocking::{open_blocking, seal_blocking};
pub use kdf::{derive_passphrase_key, KdfParams};
pub use passphrase::{validate_passphrase_strength, PassphraseReport, PassphraseViolation};
pub use prompt::get_master_passphrase;
pub use sealed::SealedSecret;
pub use token::{checksum, generate_secure_token};
pub use vault::{basic_auth_header, mask_secret, CredentialVault};
