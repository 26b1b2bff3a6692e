// SPDX-FileCopyrightText: 2026 Clinic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Run seal/open on tokio's blocking pool.
//!
//! Key derivation takes tens to hundreds of milliseconds, which
//! would stall an async executor thread. These helpers move the whole call
//! onto the blocking pool; the call still completes or fails as one unit.
//! No timeout is applied here; wrap the future in `tokio::time::timeout`
//! if the caller has a request budget.

use std::sync::Arc;

use clinic_core::ClinicError;
use secrecy::{ExposeSecret, SecretString};
use tokio::task;

use crate::sealed::SealedSecret;
use crate::vault::CredentialVault;

/// Seal `plaintext` without blocking the async runtime.
pub async fn seal_blocking(
    vault: Arc<CredentialVault>,
    plaintext: SecretString,
) -> Result<SealedSecret, ClinicError> {
    task::spawn_blocking(move || vault.seal(plaintext.expose_secret()))
        .await
        .map_err(|e| ClinicError::Internal(format!("seal task failed: {e}")))?
}

/// Open `sealed` without blocking the async runtime.
pub async fn open_blocking(
    vault: Arc<CredentialVault>,
    sealed: SealedSecret,
) -> Result<SecretString, ClinicError> {
    task::spawn_blocking(move || vault.open(&sealed))
        .await
        .map_err(|e| ClinicError::Internal(format!("open task failed: {e}")))?
}
