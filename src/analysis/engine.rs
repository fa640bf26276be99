//! The analysis engine.
//!
//! Built once from a rule set; `analyze` is then a pure function of the
//! document text (plus the clock for the audit timestamp).

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::audit::{self, Clock, SystemClock};
use super::normalize::normalize;
use super::report::{DocumentType, Flag, Report};
use super::scanner::{find_rule, CompiledCategory, CATEGORY_RULES};
use super::severity::aggregate;
use crate::rules::{RuleSet, RuleSetError};

/// Pattern-based educational flag analyzer
#[derive(Clone)]
pub struct Analyzer {
    rules: Arc<RuleSet>,
    categories: Vec<CompiledCategory>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Analyzer")
            .field("ruleset_version", &self.rules.analyzer_metadata.version)
            .field("categories", &self.categories)
            .finish()
    }
}

impl Analyzer {
    /// Build an analyzer using the wall clock
    pub fn new(rules: RuleSet) -> Result<Self, RuleSetError> {
        Self::with_clock(rules, Arc::new(SystemClock))
    }

    /// Build an analyzer with an explicit clock
    pub fn with_clock(rules: RuleSet, clock: Arc<dyn Clock>) -> Result<Self, RuleSetError> {
        for key in rules.patterns.keys() {
            if find_rule(key).is_none() {
                warn!(category = %key, "Ignoring unknown pattern category");
            }
        }

        let mut categories = Vec::new();
        for rule in CATEGORY_RULES {
            if let Some(compiled) = CompiledCategory::compile(rule, &rules)? {
                categories.push(compiled);
            }
        }

        info!(
            version = %rules.analyzer_metadata.version,
            jurisdiction = %rules.analyzer_metadata.jurisdiction,
            patterns = categories.iter().map(CompiledCategory::pattern_count).sum::<usize>(),
            "Rule set compiled"
        );

        Ok(Self {
            rules: Arc::new(rules),
            categories,
            clock,
        })
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Categories that will be scanned, in processing order
    pub fn active_categories(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.categories.iter().map(|c| c.rule().key)
    }

    /// Analyze a document and produce a report
    pub fn analyze(&self, document_text: &str) -> Report {
        let text = normalize(document_text);

        let flags: Vec<Flag> = self
            .categories
            .iter()
            .flat_map(|category| category.flags(&text))
            .collect();

        let (total_flags, procedural_status) = aggregate(&flags);
        let audit_trail = audit::record(&self.rules, &text, self.clock.as_ref());

        debug!(
            red = total_flags.red,
            orange = total_flags.orange,
            yellow = total_flags.yellow,
            hash = %audit_trail.document_hash16,
            "Analysis complete"
        );

        Report {
            document_type: DocumentType::Unknown,
            total_flags,
            procedural_status,
            flags,
            audit_trail,
            disclaimer: self.rules.compliance_safeguards.disclaimer_required.clone(),
        }
    }
}
