// SPDX-FileCopyrightText: 2026 Clinic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tracing setup. Every log line passes through the redacting writer.

use std::sync::{Arc, RwLock};

use clinic_security::RedactingWriter;
use tracing_subscriber::EnvFilter;

/// Runtime secrets the log writer must never print.
#[derive(Clone, Default)]
pub struct KnownValues(Arc<RwLock<Vec<String>>>);

impl KnownValues {
    /// Register a value for exact-match redaction.
    pub fn add(&self, value: &str) {
        RedactingWriter::<std::io::Stderr>::add_known_value(&self.0, value.to_string());
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> Vec<String> {
        self.0.read().map(|v| v.clone()).unwrap_or_default()
    }
}

/// Build the filter: `RUST_LOG` wins, otherwise the configured level for the
/// clinic crates and `warn` for everything else.
fn build_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "clinic={log_level},clinic_vault={log_level},clinic_config={log_level},warn"
        ))
    })
}

/// Install the global subscriber writing redacted lines to stderr.
pub fn init_tracing(log_level: &str, known_values: KnownValues) {
    let values = known_values.0;
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(log_level))
        .with_target(true)
        .with_thread_names(false)
        .with_ansi(false)
        .with_writer(move || RedactingWriter::new(std::io::stderr(), values.clone()))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_values_are_shared_between_clones() {
        let values = KnownValues::default();
        let writer_side = values.clone();
        values.add("MS0xMjM0NTY3ODkw");
        values.add("MS0xMjM0NTY3ODkw");
        assert_eq!(writer_side.snapshot(), vec!["MS0xMjM0NTY3ODkw".to_string()]);
    }

    #[test]
    #[serial_test::serial]
    fn filter_uses_configured_level_without_rust_log() {
        // SAFETY: test-only env mutation, serialized with #[serial].
        unsafe { std::env::remove_var("RUST_LOG") };
        let filter = build_filter("debug");
        assert!(filter.to_string().contains("clinic_vault=debug"));
    }
}
