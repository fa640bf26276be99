//! Document analysis engine.
//!
//! Turns a document into a report of educational flags:
//! 1. normalize whitespace
//! 2. scan each known category (guardrail or evidentiary policy)
//! 3. build bounded quotes for each match
//! 4. tally severities into a procedural status
//! 5. record an audit trail (timestamp, rule set version, fingerprint)
//!
//! Nothing here decides legal validity, authenticity or outcome. Flags are
//! pattern matches for human review.
//!
//! # Example
//!
//! ```ignore
//! use cyfsa_analyzer::{Analyzer, RuleSet};
//!
//! let analyzer = Analyzer::new(RuleSet::from_file(path)?)?;
//! let report = analyzer.analyze("I heard that he said the child was alone.");
//! println!("{}", report.to_json_pretty()?);
//! ```

pub mod audit;
pub mod engine;
pub mod normalize;
pub mod quote;
pub mod report;
pub mod scanner;
pub mod severity;

pub use audit::{document_hash16, AuditTrail, Clock, FixedClock, SystemClock};
pub use engine::Analyzer;
pub use normalize::normalize;
pub use quote::{context_quote, truncate_words, MAX_QUOTE_WORDS, TRUNCATION_MARKER};
pub use report::{DocumentType, Flag, Report};
pub use scanner::{CategoryRule, CompiledCategory, RawMatch, ScanPolicy, CATEGORY_RULES};
pub use severity::{aggregate, ProceduralStatus, Severity, SeverityCounts};
