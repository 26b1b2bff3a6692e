// SPDX-FileCopyrightText: 2026 Clinic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! PII scrubbing for conversation text and secret redaction for log output.
//!
//! [`pii`] is called on any conversation text before it is persisted or
//! exported. [`redact`] wraps the log writer so neither credentials nor PII
//! reach stderr.

pub mod pii;
pub mod redact;

pub use pii::{
    contains_pii, generate_anonymous_session_id, redact_pii, scan_pii, PiiCategory, PiiFinding,
};
pub use redact::{redact_for_log, redact_secrets, RedactingWriter, REDACTED};
