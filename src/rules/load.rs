//! Rule set loading and configuration errors.
//!
//! Sources are parsed into a generic JSON value first so that a missing
//! top-level key is reported by name before the typed schema is applied.

use std::path::{Path, PathBuf};

use thiserror::Error;

use super::types::RuleSet;

/// Top-level keys every rule set must define
pub const REQUIRED_KEYS: [&str; 2] = ["analyzer_metadata", "compliance_safeguards"];

/// On-disk format of a rule set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleFormat {
    Json,
    Yaml,
}

impl RuleFormat {
    /// Pick a format from the file extension (JSON unless .yaml/.yml)
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                RuleFormat::Yaml
            }
            _ => RuleFormat::Json,
        }
    }
}

/// Fatal rule set problems, raised at load or engine construction time
#[derive(Debug, Error)]
pub enum RuleSetError {
    #[error("Failed to read rule set file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse rule set JSON: {0}")]
    Json(#[source] serde_json::Error),

    #[error("Failed to parse rule set YAML: {0}")]
    Yaml(#[source] serde_yaml::Error),

    #[error("Rule set must be an object with top-level keys")]
    NotAnObject,

    #[error("Rule set is missing required key '{0}'")]
    MissingKey(&'static str),

    #[error("Rule set does not match the expected schema: {0}")]
    Schema(#[source] serde_json::Error),

    #[error("Invalid pattern #{index} in category '{category}' ({pattern}): {source}")]
    InvalidPattern {
        category: String,
        index: usize,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Category '{category}' has patterns but citation '{key}' is missing")]
    MissingCitation { category: String, key: String },
}

impl RuleSet {
    /// Load a rule set from a file (format chosen by extension)
    pub fn from_file(path: &Path) -> Result<Self, RuleSetError> {
        let content = std::fs::read_to_string(path).map_err(|source| RuleSetError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let rules = Self::from_str_with_format(&content, RuleFormat::from_path(path))?;
        tracing::debug!(path = %path.display(), "Loaded rule set");
        Ok(rules)
    }

    /// Parse a rule set from JSON content
    pub fn from_json_str(content: &str) -> Result<Self, RuleSetError> {
        Self::from_str_with_format(content, RuleFormat::Json)
    }

    /// Parse a rule set from YAML content
    pub fn from_yaml_str(content: &str) -> Result<Self, RuleSetError> {
        Self::from_str_with_format(content, RuleFormat::Yaml)
    }

    /// Parse a rule set from content in the given format
    pub fn from_str_with_format(content: &str, format: RuleFormat) -> Result<Self, RuleSetError> {
        let value: serde_json::Value = match format {
            RuleFormat::Json => serde_json::from_str(content).map_err(RuleSetError::Json)?,
            RuleFormat::Yaml => serde_yaml::from_str(content).map_err(RuleSetError::Yaml)?,
        };

        Self::from_value(value)
    }

    /// Build a rule set from an already-parsed document
    pub fn from_value(value: serde_json::Value) -> Result<Self, RuleSetError> {
        let object = value.as_object().ok_or(RuleSetError::NotAnObject)?;

        for key in REQUIRED_KEYS {
            if !object.contains_key(key) {
                return Err(RuleSetError::MissingKey(key));
            }
        }

        serde_json::from_value(value).map_err(RuleSetError::Schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{
        "analyzer_metadata": {"version": "2.1", "jurisdiction": "Ontario"},
        "compliance_safeguards": {"disclaimer_required": "Educational only."}
    }"#;

    #[test]
    fn test_minimal_json_defaults_optional_sections() {
        let rules = RuleSet::from_json_str(MINIMAL).unwrap();
        assert!(rules.patterns.is_empty());
        assert!(rules.citations.is_empty());
        assert_eq!(rules.analyzer_metadata.jurisdiction, "Ontario");
    }

    #[test]
    fn test_missing_required_key_is_named() {
        let err = RuleSet::from_json_str(
            r#"{"analyzer_metadata": {"version": "1", "jurisdiction": "Ontario"}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, RuleSetError::MissingKey("compliance_safeguards")));
        assert!(err.to_string().contains("compliance_safeguards"));
    }

    #[test]
    fn test_non_object_rejected() {
        let err = RuleSet::from_json_str("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, RuleSetError::NotAnObject));
    }

    #[test]
    fn test_unparsable_json() {
        let err = RuleSet::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, RuleSetError::Json(_)));
    }

    #[test]
    fn test_yaml_rule_set() {
        let yaml = r#"
patterns:
  hearsay:
    - '\bI heard that\b'
citations:
  hearsay_general:
    source: "Evidence Act"
analyzer_metadata:
  version: "2.1"
  jurisdiction: Ontario
compliance_safeguards:
  disclaimer_required: "Educational only."
"#;
        let rules = RuleSet::from_yaml_str(yaml).unwrap();
        assert_eq!(rules.patterns_for("hearsay"), [r"\bI heard that\b".to_string()]);
        assert_eq!(rules.citation_source("hearsay_general"), Some("Evidence Act"));
    }

    #[test]
    fn test_schema_error_for_bad_pattern_list() {
        let json = r#"{
            "patterns": {"hearsay": "not a list"},
            "analyzer_metadata": {"version": "2.1", "jurisdiction": "Ontario"},
            "compliance_safeguards": {"disclaimer_required": "x"}
        }"#;
        let err = RuleSet::from_json_str(json).unwrap_err();
        assert!(matches!(err, RuleSetError::Schema(_)));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(RuleFormat::from_path(Path::new("rules.yaml")), RuleFormat::Yaml);
        assert_eq!(RuleFormat::from_path(Path::new("rules.YML")), RuleFormat::Yaml);
        assert_eq!(RuleFormat::from_path(Path::new("rules.json")), RuleFormat::Json);
        assert_eq!(RuleFormat::from_path(Path::new("rules")), RuleFormat::Json);
    }
}
