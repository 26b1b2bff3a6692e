// SPDX-FileCopyrightText: 2026 Clinic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Clinic vault and scrubber.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Default associated-data context bound into every sealed record.
pub const DEFAULT_VAULT_CONTEXT: &str = "clinic-credential-vault/v1";

/// Top-level Clinic configuration.
///
/// The master passphrase is deliberately absent: it comes from
/// `CLINIC_MASTER_KEY` or a TTY prompt and is never part of a config file.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ClinicConfig {
    /// Credential vault settings.
    #[serde(default)]
    pub vault: VaultConfig,

    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Key derivation function used to turn the master passphrase into a key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum KdfAlgorithm {
    /// PBKDF2 with HMAC-SHA512.
    #[default]
    #[serde(rename = "pbkdf2-sha512")]
    Pbkdf2Sha512,
    /// Argon2id (memory-hard).
    #[serde(rename = "argon2id")]
    Argon2id,
}

/// Credential vault configuration.
///
/// Records sealed under one KDF setting can only be opened under the same
/// setting, so changing these values strands existing records.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct VaultConfig {
    /// Which KDF derives per-record keys (default: pbkdf2-sha512).
    #[serde(default)]
    pub kdf: KdfAlgorithm,

    /// PBKDF2 iteration count (default and minimum: 100000).
    #[serde(default = "default_pbkdf2_iterations")]
    pub pbkdf2_iterations: u32,

    /// Argon2id memory cost in KiB (default: 65536 = 64 MiB).
    #[serde(default = "default_argon2_memory_cost")]
    pub argon2_memory_cost: u32,

    /// Argon2id iteration count (default: 3).
    #[serde(default = "default_argon2_iterations")]
    pub argon2_iterations: u32,

    /// Argon2id parallelism lanes (default: 4).
    #[serde(default = "default_argon2_parallelism")]
    pub argon2_parallelism: u32,

    /// Associated data authenticated with every ciphertext.
    #[serde(default = "default_context")]
    pub context: String,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            kdf: KdfAlgorithm::default(),
            pbkdf2_iterations: default_pbkdf2_iterations(),
            argon2_memory_cost: default_argon2_memory_cost(),
            argon2_iterations: default_argon2_iterations(),
            argon2_parallelism: default_argon2_parallelism(),
            context: default_context(),
        }
    }
}

fn default_pbkdf2_iterations() -> u32 {
    100_000
}

fn default_argon2_memory_cost() -> u32 {
    65536
}

fn default_argon2_iterations() -> u32 {
    3
}

fn default_argon2_parallelism() -> u32 {
    4
}

fn default_context() -> String {
    DEFAULT_VAULT_CONTEXT.to_string()
}

/// Log output configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
