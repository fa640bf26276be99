//! Pattern scanning per category.
//!
//! Each known category carries a scan policy:
//! - **Guardrail**: presence check. The first matching pattern yields one
//!   flag for the whole document and the category stops there.
//! - **Evidentiary**: enumeration. Every non-overlapping match of every
//!   pattern yields its own flag with a local context quote.
//!
//! All patterns are compiled case-insensitively, once, at engine
//! construction.

use regex::{Regex, RegexBuilder};

use super::quote::{context_quote, truncate_words, MAX_QUOTE_WORDS};
use super::report::Flag;
use super::severity::Severity;
use crate::rules::{RuleSet, RuleSetError};

/// How a category's patterns are evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanPolicy {
    Guardrail,
    Evidentiary,
}

/// Where a category's flags take their citation from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CitationSource {
    /// Fixed text owned by the analyzer
    Fixed(&'static str),
    /// `citations.<key>.source` from the rule set
    RuleSet(&'static str),
}

/// A category the analyzer knows how to turn into flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryRule {
    /// Key under `patterns` in the rule set
    pub key: &'static str,
    pub policy: ScanPolicy,
    pub severity: Severity,
    pub label: &'static str,
    pub rule_id: &'static str,
    pub explanation: &'static str,
    pub suggestion: &'static str,
    pub citation: CitationSource,
}

pub const OUT_OF_JURISDICTION: CategoryRule = CategoryRule {
    key: "out_of_jurisdiction",
    policy: ScanPolicy::Guardrail,
    severity: Severity::Red,
    label: "Jurisdiction",
    rule_id: "out_of_jurisdiction",
    explanation: "Non-Ontario jurisdiction content detected. This analyzer is Ontario-only.",
    suggestion: "Remove non-Ontario material or analyze separately with correct jurisdiction.",
    citation: CitationSource::Fixed("Jurisdiction guardrail (project policy)"),
};

pub const HEARSAY: CategoryRule = CategoryRule {
    key: "hearsay",
    policy: ScanPolicy::Evidentiary,
    severity: Severity::Orange,
    label: "Evidence quality",
    rule_id: "evidence_hearsay",
    explanation: "Potential hearsay phrasing. Educational note: uncorroborated hearsay often has lower weight.",
    suggestion: "Identify the original source and look for a direct record or sworn statement.",
    citation: CitationSource::RuleSet("hearsay_general"),
};

/// Known categories in processing order
pub const CATEGORY_RULES: &[CategoryRule] = &[OUT_OF_JURISDICTION, HEARSAY];

/// Look up a known category by its rule set key
pub fn find_rule(key: &str) -> Option<&'static CategoryRule> {
    CATEGORY_RULES.iter().find(|r| r.key == key)
}

/// A match located by the scanner (byte offsets into normalized text)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawMatch {
    pub start: usize,
    pub end: usize,
    pub category: &'static str,
}

/// A known category with its patterns compiled and citation resolved
#[derive(Debug, Clone)]
pub struct CompiledCategory {
    rule: &'static CategoryRule,
    citation: String,
    regexes: Vec<Regex>,
}

impl CompiledCategory {
    /// Compile a category from the rule set.
    ///
    /// Returns `Ok(None)` when the rule set configures no patterns for it.
    pub fn compile(
        rule: &'static CategoryRule,
        rules: &RuleSet,
    ) -> Result<Option<Self>, RuleSetError> {
        let patterns = rules.patterns_for(rule.key);
        if patterns.is_empty() {
            return Ok(None);
        }

        let regexes = patterns
            .iter()
            .enumerate()
            .map(|(index, pattern)| {
                RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .build()
                    .map_err(|source| RuleSetError::InvalidPattern {
                        category: rule.key.to_string(),
                        index,
                        pattern: pattern.clone(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let citation = match rule.citation {
            CitationSource::Fixed(text) => text.to_string(),
            CitationSource::RuleSet(key) => rules
                .citation_source(key)
                .ok_or_else(|| RuleSetError::MissingCitation {
                    category: rule.key.to_string(),
                    key: key.to_string(),
                })?
                .to_string(),
        };

        Ok(Some(Self {
            rule,
            citation,
            regexes,
        }))
    }

    pub fn rule(&self) -> &'static CategoryRule {
        self.rule
    }

    pub fn pattern_count(&self) -> usize {
        self.regexes.len()
    }

    /// Locate matches in normalized text according to the category policy
    pub fn scan(&self, text: &str) -> Vec<RawMatch> {
        let category = self.rule.key;
        match self.rule.policy {
            ScanPolicy::Guardrail => self
                .regexes
                .iter()
                .find_map(|re| re.find(text))
                .map(|m| RawMatch {
                    start: m.start(),
                    end: m.end(),
                    category,
                })
                .into_iter()
                .collect(),
            ScanPolicy::Evidentiary => self
                .regexes
                .iter()
                .flat_map(|re| re.find_iter(text))
                .map(|m| RawMatch {
                    start: m.start(),
                    end: m.end(),
                    category,
                })
                .collect(),
        }
    }

    /// Build the flag for a match
    pub fn to_flag(&self, text: &str, m: &RawMatch) -> Flag {
        let quote = match self.rule.policy {
            // The whole document is the subject of a guardrail flag
            ScanPolicy::Guardrail => truncate_words(text, MAX_QUOTE_WORDS),
            ScanPolicy::Evidentiary => context_quote(text, m.start, m.end),
        };

        Flag {
            severity: self.rule.severity,
            category: self.rule.label.to_string(),
            quote,
            explanation: self.rule.explanation.to_string(),
            source_citation: self.citation.clone(),
            suggestion: self.rule.suggestion.to_string(),
            rule_id: self.rule.rule_id.to_string(),
        }
    }

    /// Scan and build flags in one pass
    pub fn flags(&self, text: &str) -> Vec<Flag> {
        self.scan(text)
            .iter()
            .map(|m| self.to_flag(text, m))
            .collect()
    }
}
