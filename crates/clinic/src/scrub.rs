// SPDX-FileCopyrightText: 2026 Clinic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `clinic scrub`, `clinic scan` and `clinic session-id`.

use std::collections::BTreeMap;
use std::io::Write;

use clinic_core::ClinicError;
use clinic_security::{
    contains_pii, generate_anonymous_session_id, redact_pii, scan_pii, PiiCategory, PiiFinding,
};
use serde::Serialize;
use tracing::debug;

use crate::write_failed;

/// What `clinic scan` prints. Spans only, never the matched text.
#[derive(Debug, Serialize)]
struct ScanReport {
    contains_pii: bool,
    counts: BTreeMap<PiiCategory, usize>,
    findings: Vec<PiiFinding>,
}

fn build_report(text: &str) -> ScanReport {
    let findings = scan_pii(text);
    let mut counts = BTreeMap::new();
    for finding in &findings {
        *counts.entry(finding.category).or_insert(0) += 1;
    }
    ScanReport {
        contains_pii: contains_pii(text),
        counts,
        findings,
    }
}

pub fn scrub(text: &str, out: &mut impl Write) -> Result<(), ClinicError> {
    let redacted = redact_pii(text);
    debug!(
        input_len = text.len(),
        output_len = redacted.len(),
        "text scrubbed"
    );
    out.write_all(redacted.as_bytes()).map_err(write_failed)
}

pub fn scan(text: &str, out: &mut impl Write) -> Result<(), ClinicError> {
    let report = build_report(text);
    debug!(findings = report.findings.len(), "text scanned");
    let json = serde_json::to_string_pretty(&report)
        .map_err(|e| ClinicError::Internal(format!("failed to serialize scan report: {e}")))?;
    writeln!(out, "{json}").map_err(write_failed)
}

pub fn session_id(out: &mut impl Write) -> Result<(), ClinicError> {
    writeln!(out, "{}", generate_anonymous_session_id()).map_err(write_failed)
}
