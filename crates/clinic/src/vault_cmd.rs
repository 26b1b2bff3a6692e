// SPDX-FileCopyrightText: 2026 Clinic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `clinic seal`, `clinic open` and `clinic check-passphrase`.

use std::io::Write;
use std::sync::Arc;

use clinic_config::ClinicConfig;
use clinic_core::ClinicError;
use clinic_vault::{
    get_master_passphrase, mask_secret, open_blocking, seal_blocking,
    validate_passphrase_strength, CredentialVault, SealedSecret,
};
use secrecy::{ExposeSecret, SecretString};
use tracing::info;

use crate::logging::KnownValues;
use crate::write_failed;

/// Acquire the master passphrase and build the vault from `[vault]` config.
fn unlock(
    config: &ClinicConfig,
    known_values: &KnownValues,
) -> Result<Arc<CredentialVault>, ClinicError> {
    let passphrase = get_master_passphrase()?;
    known_values.add(passphrase.expose_secret());
    let vault = CredentialVault::from_config(passphrase, &config.vault)?;
    Ok(Arc::new(vault))
}

pub async fn seal(
    config: &ClinicConfig,
    known_values: &KnownValues,
    secret: String,
    compact: bool,
    out: &mut impl Write,
) -> Result<(), ClinicError> {
    let vault = unlock(config, known_values)?;
    seal_with(vault, known_values, secret, compact, out).await
}

async fn seal_with(
    vault: Arc<CredentialVault>,
    known_values: &KnownValues,
    secret: String,
    compact: bool,
    out: &mut impl Write,
) -> Result<(), ClinicError> {
    known_values.add(&secret);
    let sealed = seal_blocking(vault, SecretString::from(secret)).await?;

    if compact {
        writeln!(out, "{sealed}").map_err(write_failed)?;
    } else {
        let json = serde_json::to_string_pretty(&sealed)
            .map_err(|e| ClinicError::Internal(format!("failed to serialize record: {e}")))?;
        writeln!(out, "{json}").map_err(write_failed)?;
    }
    info!("sealed record written");
    Ok(())
}

pub async fn open(
    config: &ClinicConfig,
    known_values: &KnownValues,
    record: &str,
    reveal: bool,
    out: &mut impl Write,
) -> Result<(), ClinicError> {
    // Parse before prompting so a bad record fails fast.
    let sealed = parse_record(record)?;
    let vault = unlock(config, known_values)?;
    open_with(vault, known_values, sealed, reveal, out).await
}

async fn open_with(
    vault: Arc<CredentialVault>,
    known_values: &KnownValues,
    sealed: SealedSecret,
    reveal: bool,
    out: &mut impl Write,
) -> Result<(), ClinicError> {
    let plaintext = open_blocking(vault, sealed).await?;
    known_values.add(plaintext.expose_secret());

    let shown = if reveal {
        plaintext.expose_secret().to_string()
    } else {
        mask_secret(plaintext.expose_secret())
    };
    writeln!(out, "{shown}").map_err(write_failed)
}

/// Accept either the JSON object or the compact `v1.` form.
fn parse_record(input: &str) -> Result<SealedSecret, ClinicError> {
    let input = input.trim();
    if input.starts_with('{') {
        serde_json::from_str(input).map_err(|e| ClinicError::malformed("record", e.to_string()))
    } else {
        input.parse()
    }
}

pub fn check_passphrase(
    known_values: &KnownValues,
    json: bool,
    out: &mut impl Write,
) -> Result<(), ClinicError> {
    let passphrase = get_master_passphrase()?;
    known_values.add(passphrase.expose_secret());
    write_report(passphrase.expose_secret(), json, out)
}

fn write_report(passphrase: &str, json: bool, out: &mut impl Write) -> Result<(), ClinicError> {
    let report = validate_passphrase_strength(passphrase);

    if json {
        let rendered = serde_json::to_string_pretty(&report)
            .map_err(|e| ClinicError::Internal(format!("failed to serialize report: {e}")))?;
        writeln!(out, "{rendered}").map_err(write_failed)?;
    } else if report.valid {
        writeln!(out, "passphrase ok").map_err(write_failed)?;
    } else {
        writeln!(out, "passphrase is too weak:").map_err(write_failed)?;
        for violation in &report.violations {
            writeln!(out, "  - {violation}").map_err(write_failed)?;
        }
    }

    if report.valid {
        Ok(())
    } else {
        Err(ClinicError::Passphrase(format!(
            "{} strength rule(s) failed",
            report.violations.len()
        )))
    }
}
