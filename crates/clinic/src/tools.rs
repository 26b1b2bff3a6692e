// SPDX-FileCopyrightText: 2026 Clinic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `clinic token` and `clinic checksum`.

use std::io::Write;

use clinic_core::ClinicError;
use clinic_vault::{checksum as sha256_hex, generate_secure_token};

use crate::write_failed;

pub fn token(bytes: usize, out: &mut impl Write) -> Result<(), ClinicError> {
    let token = generate_secure_token(bytes)?;
    writeln!(out, "{token}").map_err(write_failed)
}

pub fn checksum(data: &str, out: &mut impl Write) -> Result<(), ClinicError> {
    writeln!(out, "{}", sha256_hex(data)).map_err(write_failed)
}
