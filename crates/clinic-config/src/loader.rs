// SPDX-FileCopyrightText: 2026 Clinic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./clinic.toml` > `~/.config/clinic/clinic.toml` > `/etc/clinic/clinic.toml`
//! with environment variable overrides via `CLINIC_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::ClinicConfig;

/// Env var holding the master passphrase. Never routed into the config tree.
pub const MASTER_KEY_ENV_VAR: &str = "CLINIC_MASTER_KEY";

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/clinic/clinic.toml` (system-wide)
/// 3. `~/.config/clinic/clinic.toml` (user XDG config)
/// 4. `./clinic.toml` (local directory)
/// 5. `CLINIC_*` environment variables
pub fn load_config() -> Result<ClinicConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<ClinicConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ClinicConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<ClinicConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ClinicConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading (exposed for diagnostic use).
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(ClinicConfig::default()))
        .merge(Toml::file("/etc/clinic/clinic.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("clinic/clinic.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("clinic.toml"))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `CLINIC_VAULT_PBKDF2_ITERATIONS` must map to
/// `vault.pbkdf2_iterations`, not `vault.pbkdf2.iterations`.
/// `CLINIC_MASTER_KEY` is dropped so the passphrase never enters the config.
fn env_provider() -> Env {
    Env::prefixed("CLINIC_")
        .ignore(&["master_key"])
        .map(|key| {
            // Keys arrive with their original case (`VAULT_PBKDF2_ITERATIONS`).
            let key = key.as_str().to_ascii_lowercase();
            key.replacen("vault_", "vault.", 1)
                .replacen("logging_", "logging.", 1)
                .into()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn master_key_env_var_matches_ignored_key() {
        let stripped = MASTER_KEY_ENV_VAR
            .strip_prefix("CLINIC_")
            .map(str::to_ascii_lowercase);
        assert_eq!(stripped.as_deref(), Some("master_key"));
    }

    #[test]
    fn string_overrides_defaults() {
        let config = load_config_from_str("[logging]\nlevel = \"debug\"\n").unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.vault.pbkdf2_iterations, 100_000);
    }
}
