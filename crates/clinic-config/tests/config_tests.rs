// SPDX-FileCopyrightText: 2026 Clinic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Clinic configuration system.

use clinic_config::diagnostic::ConfigError;
use clinic_config::{load_and_validate_str, load_config, load_config_from_str, KdfAlgorithm};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_clinic_config() {
    let toml = r#"
[vault]
kdf = "argon2id"
pbkdf2_iterations = 210000
argon2_memory_cost = 65536
argon2_iterations = 3
argon2_parallelism = 2
context = "clinic-dashboard/booking-keys"

[logging]
level = "debug"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.vault.kdf, KdfAlgorithm::Argon2id);
    assert_eq!(config.vault.pbkdf2_iterations, 210_000);
    assert_eq!(config.vault.argon2_parallelism, 2);
    assert_eq!(config.vault.context, "clinic-dashboard/booking-keys");
    assert_eq!(config.logging.level, "debug");
}

/// Empty TOML yields the compiled defaults.
#[test]
fn empty_toml_uses_defaults() {
    let config = load_and_validate_str("").expect("defaults should validate");
    assert_eq!(config.vault.kdf, KdfAlgorithm::Pbkdf2Sha512);
    assert_eq!(config.vault.pbkdf2_iterations, 100_000);
    assert_eq!(config.logging.level, "info");
}

/// Unknown field in [vault] produces an UnknownKey diagnostic with a suggestion.
#[test]
fn unknown_vault_key_suggests_correction() {
    let toml = r#"
[vault]
contxt = "x"
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject unknown field");
    assert!(errors.iter().any(|e| matches!(
        e,
        ConfigError::UnknownKey { key, suggestion: Some(s), .. }
            if key == "contxt" && s == "context"
    )));
}

/// An unrecognized KDF name is reported, not silently defaulted.
#[test]
fn unknown_kdf_name_is_rejected() {
    let toml = r#"
[vault]
kdf = "md5"
"#;

    let errors = load_and_validate_str(toml).expect_err("md5 is not a KDF option");
    assert!(!errors.is_empty());
}

/// Wrong value type is reported as a type error.
#[test]
fn wrong_type_for_iterations() {
    let toml = r#"
[vault]
pbkdf2_iterations = "lots"
"#;

    let errors = load_and_validate_str(toml).expect_err("string is not a u32");
    assert!(errors
        .iter()
        .any(|e| matches!(e, ConfigError::InvalidType { .. } | ConfigError::Other(_))));
}

/// Semantic validation runs after deserialization succeeds.
#[test]
fn weak_kdf_settings_fail_validation() {
    let toml = r#"
[vault]
pbkdf2_iterations = 1000
"#;

    let errors = load_and_validate_str(toml).expect_err("1000 iterations is too weak");
    assert!(errors.iter().any(
        |e| matches!(e, ConfigError::Validation { message } if message.contains("pbkdf2_iterations"))
    ));
}

/// Environment overrides use the explicit section mapping and skip the master key.
#[test]
fn env_overrides_and_master_key_is_ignored() {
    figment::Jail::expect_with(|jail| {
        jail.create_file("clinic.toml", "[logging]\nlevel = \"warn\"\n")?;
        jail.set_env("CLINIC_VAULT_PBKDF2_ITERATIONS", "250000");
        jail.set_env("CLINIC_LOGGING_LEVEL", "error");
        jail.set_env("CLINIC_MASTER_KEY", "Correct-Horse-Battery-9");

        let config = load_config()?;
        assert_eq!(config.vault.pbkdf2_iterations, 250_000);
        assert_eq!(config.logging.level, "error");
        Ok(())
    });
}

/// A local clinic.toml is picked up from the working directory.
#[test]
fn local_file_is_loaded() {
    figment::Jail::expect_with(|jail| {
        jail.create_file(
            "clinic.toml",
            "[vault]\nkdf = \"argon2id\"\ncontext = \"local\"\n",
        )?;

        let config = load_config()?;
        assert_eq!(config.vault.kdf, KdfAlgorithm::Argon2id);
        assert_eq!(config.vault.context, "local");
        Ok(())
    });
}
