//! Audit trail recording.
//!
//! Every report records when it was produced, against which rule set, and a
//! short fingerprint of the document it describes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::rules::RuleSet;

/// Characters of normalized text fed into the document fingerprint
pub const HASH_INPUT_CHARS: usize = 2000;

/// Hex characters kept from the digest
pub const HASH_HEX_LEN: usize = 16;

/// Source of "now" for audit timestamps
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to one instant (for reproducible reports)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Provenance of a single analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrail {
    /// e.g. "2026-10-19T14:03:07.120934Z"
    pub timestamp_utc: String,
    pub ruleset_version: String,
    pub jurisdiction: String,
    /// First 16 hex chars of sha256(first 2000 chars of normalized text)
    pub document_hash16: String,
}

/// Build the audit trail for an analysis of `normalized`
pub fn record(rules: &RuleSet, normalized: &str, clock: &dyn Clock) -> AuditTrail {
    AuditTrail {
        timestamp_utc: format_timestamp(clock.now()),
        ruleset_version: rules.analyzer_metadata.version.clone(),
        jurisdiction: rules.analyzer_metadata.jurisdiction.clone(),
        document_hash16: document_hash16(normalized),
    }
}

/// ISO-8601 UTC timestamp with microseconds and a trailing `Z`
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
}

/// Compact document fingerprint (traceability, not security)
pub fn document_hash16(normalized: &str) -> String {
    let prefix_end = normalized
        .char_indices()
        .nth(HASH_INPUT_CHARS)
        .map(|(i, _)| i)
        .unwrap_or(normalized.len());

    let mut hasher = Sha256::new();
    hasher.update(normalized[..prefix_end].as_bytes());
    let digest = hasher.finalize();
    hex::encode(&digest[..HASH_HEX_LEN / 2])
}
