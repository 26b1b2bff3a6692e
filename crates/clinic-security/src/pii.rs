// SPDX-FileCopyrightText: 2026 Clinic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pattern-based PII detection and redaction for conversation text.
//!
//! Four categories are recognized: email addresses, phone numbers,
//! name-shaped word pairs and street addresses. Every category is matched
//! against the original text, and where spans overlap the earlier category
//! in that order wins. Surviving spans are replaced with a fixed placeholder.
//!
//! This is a best-effort heuristic, not a guarantee of exhaustive PII
//! removal. Known false negatives: international phone formats other than
//! the North American shapes, single-word or lowercase names, addresses
//! without a recognized street suffix. Known false positives: any pair of
//! capitalized words ("Thank You", "New Patient").
//!
//! [`redact_pii`] replaces exactly the spans [`scan_pii`] reports, and
//! [`contains_pii`] is true exactly when that set is non-empty.

use std::sync::LazyLock;

use regex::{Match, Regex};
use serde::Serialize;
use strum::Display;
use uuid::Uuid;

/// Street suffixes that end an address.
const STREET_SUFFIXES: &[&str] = &[
    "Street", "St", "Avenue", "Ave", "Road", "Rd", "Boulevard", "Blvd", "Lane", "Ln", "Drive",
    "Dr", "Court", "Ct", "Way", "Place", "Pl", "Terrace", "Close", "Crescent",
];

/// A category of personally identifiable information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PiiCategory {
    Email,
    Phone,
    Name,
    Address,
}

impl PiiCategory {
    /// The fixed token that replaces a match of this category.
    pub fn placeholder(self) -> &'static str {
        match self {
            Self::Email => "[EMAIL]",
            Self::Phone => "[PHONE]",
            Self::Name => "[NAME]",
            Self::Address => "[ADDRESS]",
        }
    }
}

/// A PII match in the scanned text, as a byte span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PiiFinding {
    pub category: PiiCategory,
    pub start: usize,
    pub end: usize,
}

impl PiiFinding {
    fn overlaps(&self, other: &PiiFinding) -> bool {
        self.start < other.end && other.start < self.end
    }
}

struct PiiPattern {
    category: PiiCategory,
    regex: Regex,
    /// Rejects matches the regex alone cannot rule out.
    accept: fn(&str, &Match<'_>) -> bool,
}

impl PiiPattern {
    fn matches<'h>(&'h self, haystack: &'h str) -> impl Iterator<Item = Match<'h>> + 'h {
        self.regex
            .find_iter(haystack)
            .filter(move |m| (self.accept)(haystack, m))
    }
}

fn accept_all(_: &str, _: &Match<'_>) -> bool {
    true
}

/// A capitalized pair is not a name when it is part of a street address:
/// either its second word is a street suffix ("Main Street") or it overlaps
/// an address span ("42 Oak Tree Lane", "100 Old Mill Creek Farm Road").
fn accept_name(haystack: &str, m: &Match<'_>) -> bool {
    let second = m.as_str().split_whitespace().nth(1).unwrap_or_default();
    if STREET_SUFFIXES.contains(&second) {
        return false;
    }
    !ADDRESS
        .find_iter(haystack)
        .any(|a| a.start() < m.end() && m.start() < a.end())
}

static ADDRESS: LazyLock<Regex> = LazyLock::new(|| {
    let suffixes = STREET_SUFFIXES.join("|");
    Regex::new(&format!(
        r"\b\d{{1,5}}\s+(?:[A-Za-z]+\.?\s+){{0,4}}(?:{suffixes})\b\.?"
    ))
    .expect("valid regex")
});

/// Patterns in precedence order.
static PII_PATTERNS: LazyLock<Vec<PiiPattern>> = LazyLock::new(|| {
    vec![
        PiiPattern {
            category: PiiCategory::Email,
            regex: Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}")
                .expect("valid regex"),
            accept: accept_all,
        },
        PiiPattern {
            category: PiiCategory::Phone,
            // 555-123-4567, (555) 123-4567, 555.123.4567, +1 555 123 4567
            regex: Regex::new(r"(?:\+?1[-.\s]?)?(?:\(\d{3}\)|\b\d{3})[-.\s]?\d{3}[-.\s]?\d{4}\b")
                .expect("valid regex"),
            accept: accept_all,
        },
        PiiPattern {
            category: PiiCategory::Name,
            regex: Regex::new(r"\b[A-Z][a-z]+\s+[A-Z][a-z]+\b").expect("valid regex"),
            accept: accept_name,
        },
        PiiPattern {
            category: PiiCategory::Address,
            regex: ADDRESS.clone(),
            accept: accept_all,
        },
    ]
});

/// Replace every recognized PII span with its category placeholder.
///
/// Replaces exactly the spans [`scan_pii`] reports. An email or phone
/// number shadows any name or address pattern overlapping it, so the local
/// part of an email address is never misread as a name.
pub fn redact_pii(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for finding in scan_pii(text) {
        out.push_str(&text[last..finding.start]);
        out.push_str(finding.category.placeholder());
        last = finding.end;
    }
    out.push_str(&text[last..]);
    out
}

/// Whether `text` contains anything [`redact_pii`] would replace.
///
/// Short-circuits on the first match. Cheap gate before redaction.
pub fn contains_pii(text: &str) -> bool {
    // A match is either kept or shadowed by an earlier category's kept match.
    PII_PATTERNS
        .iter()
        .any(|pattern| pattern.matches(text).next().is_some())
}

/// The PII spans in `text` that [`redact_pii`] replaces, sorted by start
/// offset and never overlapping.
///
/// Useful for logging category counts without logging the matched text
/// itself.
pub fn scan_pii(text: &str) -> Vec<PiiFinding> {
    let mut kept: Vec<PiiFinding> = Vec::new();
    for pattern in PII_PATTERNS.iter() {
        let found: Vec<PiiFinding> = pattern
            .matches(text)
            .map(|m| PiiFinding {
                category: pattern.category,
                start: m.start(),
                end: m.end(),
            })
            .filter(|f| !kept.iter().any(|k| k.overlaps(f)))
            .collect();
        kept.extend(found);
    }
    kept.sort_by_key(|f| f.start);
    kept
}

/// A random session identifier with no link to any user attribute.
pub fn generate_anonymous_session_id() -> String {
    format!("anon_{}", Uuid::new_v4().simple())
}
