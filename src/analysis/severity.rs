//! Severity levels and procedural status aggregation.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::report::Flag;

/// Concern level of a flag, highest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Red,
    Orange,
    Yellow,
}

impl Severity {
    /// All severities in display order
    pub const ALL: [Severity; 3] = [Severity::Red, Severity::Orange, Severity::Yellow];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Red => "RED",
            Severity::Orange => "ORANGE",
            Severity::Yellow => "YELLOW",
        }
    }

    /// Whether flags of this severity mark a document as procedurally unclear
    pub fn escalates(&self) -> bool {
        matches!(self, Severity::Red | Severity::Orange)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flag tally per severity; every level is always present
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    #[serde(rename = "RED")]
    pub red: usize,
    #[serde(rename = "ORANGE")]
    pub orange: usize,
    #[serde(rename = "YELLOW")]
    pub yellow: usize,
}

impl SeverityCounts {
    pub fn record(&mut self, severity: Severity) {
        match severity {
            Severity::Red => self.red += 1,
            Severity::Orange => self.orange += 1,
            Severity::Yellow => self.yellow += 1,
        }
    }

    pub fn get(&self, severity: Severity) -> usize {
        match severity {
            Severity::Red => self.red,
            Severity::Orange => self.orange,
            Severity::Yellow => self.yellow,
        }
    }

    pub fn total(&self) -> usize {
        self.red + self.orange + self.yellow
    }
}

/// Overall document status. Neither value is a legal conclusion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProceduralStatus {
    #[serde(rename = "No pattern-based flags detected (NOT a legal conclusion)")]
    NoFlags,
    #[serde(rename = "Procedurally unclear (educational flags present)")]
    Unclear,
}

impl ProceduralStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProceduralStatus::NoFlags => "No pattern-based flags detected (NOT a legal conclusion)",
            ProceduralStatus::Unclear => "Procedurally unclear (educational flags present)",
        }
    }

    /// Status for a tally: only RED and ORANGE escalate, YELLOW is informational
    pub fn from_counts(counts: &SeverityCounts) -> Self {
        let escalated = Severity::ALL
            .iter()
            .any(|s| s.escalates() && counts.get(*s) > 0);

        if escalated {
            ProceduralStatus::Unclear
        } else {
            ProceduralStatus::NoFlags
        }
    }
}

impl fmt::Display for ProceduralStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tally flags and derive the procedural status
pub fn aggregate(flags: &[Flag]) -> (SeverityCounts, ProceduralStatus) {
    let mut counts = SeverityCounts::default();
    for flag in flags {
        counts.record(flag.severity);
    }
    (counts, ProceduralStatus::from_counts(&counts))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flag(severity: Severity) -> Flag {
        Flag {
            severity,
            category: "Test".to_string(),
            quote: "quote".to_string(),
            explanation: "explanation".to_string(),
            source_citation: "citation".to_string(),
            suggestion: "suggestion".to_string(),
            rule_id: "test_rule".to_string(),
        }
    }

    #[test]
    fn test_empty_aggregate() {
        let (counts, status) = aggregate(&[]);
        assert_eq!(counts, SeverityCounts::default());
        assert_eq!(status, ProceduralStatus::NoFlags);
    }

    #[test]
    fn test_yellow_only_stays_no_flags() {
        let flags = vec![flag(Severity::Yellow), flag(Severity::Yellow)];
        let (counts, status) = aggregate(&flags);
        assert_eq!(counts.yellow, 2);
        assert_eq!(status, ProceduralStatus::NoFlags);
    }

    #[test]
    fn test_red_or_orange_escalates() {
        let (_, status) = aggregate(&[flag(Severity::Orange)]);
        assert_eq!(status, ProceduralStatus::Unclear);

        let (counts, status) = aggregate(&[flag(Severity::Red), flag(Severity::Yellow)]);
        assert_eq!(status, ProceduralStatus::Unclear);
        assert_eq!(counts.total(), 2);
        assert_eq!(counts.get(Severity::Red), 1);
    }

    #[test]
    fn test_status_tracks_escalating_severities() {
        for severity in Severity::ALL {
            let mut counts = SeverityCounts::default();
            counts.record(severity);
            let expected = if severity.escalates() {
                ProceduralStatus::Unclear
            } else {
                ProceduralStatus::NoFlags
            };
            assert_eq!(ProceduralStatus::from_counts(&counts), expected, "{}", severity);
        }
        assert!(!Severity::Yellow.escalates());
    }

    #[test]
    fn test_counts_serialize_all_keys_in_order() {
        let json = serde_json::to_string(&SeverityCounts::default()).unwrap();
        assert_eq!(json, r#"{"RED":0,"ORANGE":0,"YELLOW":0}"#);
    }

    #[test]
    fn test_severity_serialization_and_order() {
        assert_eq!(serde_json::to_string(&Severity::Orange).unwrap(), r#""ORANGE""#);
        assert!(Severity::Red < Severity::Orange && Severity::Orange < Severity::Yellow);
        assert!(Severity::ALL.iter().filter(|s| s.escalates()).count() == 2);
    }

    #[test]
    fn test_status_strings_disclaim_legal_conclusion() {
        assert!(ProceduralStatus::NoFlags.as_str().contains("NOT a legal conclusion"));
        assert!(ProceduralStatus::Unclear.as_str().contains("educational"));
        let json = serde_json::to_string(&ProceduralStatus::Unclear).unwrap();
        assert_eq!(json, format!("\"{}\"", ProceduralStatus::Unclear));
    }
}
