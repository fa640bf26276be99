//! cyfsa-analyzer - Educational pattern flags for CYFSA documents
//!
//! Scans plain-text documents for configured patterns and emits a
//! non-authoritative report of educational flags. It never decides legal
//! validity, authenticity or outcome; every report says so.
//!
//! # Architecture
//!
//! - A rule set is loaded once and compiled into an immutable [`Analyzer`]
//! - `Analyzer::analyze` is a pure function of the document text
//! - Reports carry an audit trail (timestamp, rule set version, fingerprint)
//!
//! # Modules
//!
//! - `rules`: Rule set model, loading and configuration errors
//! - `analysis`: Normalizer, scanner, quotes, severities, audit, reports
//! - `config`: Rule set path discovery for the CLI
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Analyze a document
//! cyfsa-analyzer analyze --input case.txt
//!
//! # Analyze many documents as JSON lines
//! cyfsa-analyzer batch "cases/**/*.txt"
//!
//! # Check a rule set
//! cyfsa-analyzer rules --rules analyzer/rules.json
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod rules;

// Re-export main types at crate root for convenience
pub use analysis::{
    Analyzer, AuditTrail, Clock, DocumentType, FixedClock, Flag, ProceduralStatus, Report,
    Severity, SeverityCounts, SystemClock,
};
pub use rules::{RuleSet, RuleSetError};
