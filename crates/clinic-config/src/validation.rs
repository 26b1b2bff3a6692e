// SPDX-FileCopyrightText: 2026 Clinic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as KDF cost floors and the vault context string.

use crate::diagnostic::ConfigError;
use crate::model::{ClinicConfig, KdfAlgorithm};

/// Lowest PBKDF2-HMAC-SHA512 iteration count the vault accepts.
pub const MIN_PBKDF2_ITERATIONS: u32 = 100_000;

/// Lowest Argon2id memory cost in KiB (32 MiB).
pub const MIN_ARGON2_MEMORY_COST: u32 = 32768;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &ClinicConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let vault = &config.vault;

    if vault.pbkdf2_iterations < MIN_PBKDF2_ITERATIONS {
        errors.push(ConfigError::Validation {
            message: format!(
                "vault.pbkdf2_iterations must be at least {MIN_PBKDF2_ITERATIONS}, got {}",
                vault.pbkdf2_iterations
            ),
        });
    }

    // Argon2 floors only matter when Argon2 is the active KDF.
    if vault.kdf == KdfAlgorithm::Argon2id {
        if vault.argon2_memory_cost < MIN_ARGON2_MEMORY_COST {
            errors.push(ConfigError::Validation {
                message: format!(
                    "vault.argon2_memory_cost must be at least {MIN_ARGON2_MEMORY_COST} (32 MiB), got {}",
                    vault.argon2_memory_cost
                ),
            });
        }

        if vault.argon2_iterations < 2 {
            errors.push(ConfigError::Validation {
                message: format!(
                    "vault.argon2_iterations must be at least 2, got {}",
                    vault.argon2_iterations
                ),
            });
        }

        if vault.argon2_parallelism < 1 {
            errors.push(ConfigError::Validation {
                message: format!(
                    "vault.argon2_parallelism must be at least 1, got {}",
                    vault.argon2_parallelism
                ),
            });
        }

        // Argon2 needs at least 8 KiB of memory per lane.
        if u64::from(vault.argon2_memory_cost) < 8 * u64::from(vault.argon2_parallelism) {
            errors.push(ConfigError::Validation {
                message: format!(
                    "vault.argon2_memory_cost ({}) must be at least 8 * argon2_parallelism ({})",
                    vault.argon2_memory_cost, vault.argon2_parallelism
                ),
            });
        }
    }

    if vault.context.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "vault.context must not be empty".to_string(),
        });
    }

    let level = config.logging.level.trim().to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "logging.level `{}` is not one of: {}",
                config.logging.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
