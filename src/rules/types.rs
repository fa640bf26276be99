//! Rule set data types
//!
//! These types mirror the rules.json schema.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A complete rule set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    /// Category name -> ordered regex patterns
    #[serde(default)]
    pub patterns: BTreeMap<String, Vec<String>>,

    /// Citation key -> citation metadata
    #[serde(default)]
    pub citations: BTreeMap<String, Citation>,

    /// Version and jurisdiction of this rule set
    pub analyzer_metadata: AnalyzerMetadata,

    /// Compliance text copied into every report
    pub compliance_safeguards: ComplianceSafeguards,
}

impl RuleSet {
    /// Patterns configured for a category (empty if the category is absent)
    pub fn patterns_for(&self, category: &str) -> &[String] {
        self.patterns
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Citation source text for a key
    pub fn citation_source(&self, key: &str) -> Option<&str> {
        self.citations.get(key).map(|c| c.source.as_str())
    }

    /// Total number of configured patterns across all categories
    pub fn pattern_count(&self) -> usize {
        self.patterns.values().map(Vec::len).sum()
    }
}

/// Citation metadata. Only `source` is used; other fields are kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    pub source: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Citation {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            extra: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerMetadata {
    pub version: String,
    pub jurisdiction: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComplianceSafeguards {
    /// Disclaimer that must accompany every report
    pub disclaimer_required: String,
}
