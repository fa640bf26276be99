//! Rule set model and loading.
//!
//! A rule set is plain configuration: categorized regex lists, citation
//! metadata, analyzer metadata and the compliance disclaimer. It is loaded
//! once by the caller and handed to the [`Analyzer`](crate::Analyzer), which
//! never mutates it.
//!
//! # Example
//!
//! ```ignore
//! use cyfsa_analyzer::rules::RuleSet;
//!
//! let rules = RuleSet::from_file(Path::new("analyzer/rules.json"))?;
//! println!("{} ({})", rules.analyzer_metadata.version, rules.analyzer_metadata.jurisdiction);
//! ```

pub mod load;
pub mod types;

pub use load::{RuleFormat, RuleSetError, REQUIRED_KEYS};
pub use types::{AnalyzerMetadata, Citation, ComplianceSafeguards, RuleSet};
