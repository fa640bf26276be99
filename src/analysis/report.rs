//! Flag and report types.
//!
//! The serialized shape of [`Report`] is what downstream tooling consumes;
//! field names and order must not change.

use serde::{Deserialize, Serialize};

use super::audit::AuditTrail;
use super::severity::{ProceduralStatus, Severity, SeverityCounts};

/// One educational flag (a single pattern match)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flag {
    pub severity: Severity,
    /// Human-readable grouping label
    pub category: String,
    /// Bounded quote (at most 25 words, plus marker if cut)
    pub quote: String,
    pub explanation: String,
    pub source_citation: String,
    pub suggestion: String,
    /// Stable identifier of the triggering rule
    pub rule_id: String,
}

/// Document classification. Only `unknown` exists today.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    #[default]
    Unknown,
}

/// Result of one `analyze` call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub document_type: DocumentType,
    pub total_flags: SeverityCounts,
    pub procedural_status: ProceduralStatus,
    pub flags: Vec<Flag>,
    pub audit_trail: AuditTrail,
    pub disclaimer: String,
}

impl Report {
    /// Flags produced by a given rule
    pub fn flags_for_rule<'a>(&'a self, rule_id: &'a str) -> impl Iterator<Item = &'a Flag> + 'a {
        self.flags.iter().filter(move |f| f.rule_id == rule_id)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
