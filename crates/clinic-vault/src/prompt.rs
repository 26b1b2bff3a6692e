// SPDX-FileCopyrightText: 2026 Clinic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Master passphrase acquisition via the CLINIC_MASTER_KEY environment variable or a TTY prompt.

use clinic_config::MASTER_KEY_ENV_VAR;
use clinic_core::ClinicError;
use secrecy::SecretString;

/// Get the master passphrase from the environment or an interactive prompt.
///
/// Priority:
/// 1. `CLINIC_MASTER_KEY` (for containers and service managers)
/// 2. Interactive TTY prompt via `rpassword` (for human operators)
pub fn get_master_passphrase() -> Result<SecretString, ClinicError> {
    if let Some(key) = passphrase_from_env() {
        return Ok(key);
    }

    if std::io::IsTerminal::is_terminal(&std::io::stdin()) {
        eprint!("Master passphrase: ");
        let passphrase = rpassword::read_password()
            .map_err(|e| ClinicError::Passphrase(format!("failed to read passphrase: {e}")))?;
        if passphrase.is_empty() {
            return Err(ClinicError::Passphrase("empty passphrase not allowed".to_string()));
        }
        return Ok(SecretString::from(passphrase));
    }

    Err(ClinicError::Passphrase(format!(
        "no passphrase provided; set {MASTER_KEY_ENV_VAR} or run interactively"
    )))
}

fn passphrase_from_env() -> Option<SecretString> {
    std::env::var(MASTER_KEY_ENV_VAR)
        .ok()
        .filter(|key| !key.is_empty())
        .map(SecretString::from)
}
