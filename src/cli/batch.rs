//! Batch analysis: many documents, one JSON line each.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, warn};

use super::{load_analyzer, read_document, write_output};
use crate::analysis::{Analyzer, Report};

/// One line of batch output
#[derive(Debug, Serialize)]
pub struct BatchEntry<'a> {
    pub source: String,
    pub report: &'a Report,
}

/// Expand file paths and glob patterns into a sorted, deduplicated file list
pub fn expand_inputs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = BTreeSet::new();

    for pattern in patterns {
        let mut matched = false;
        for entry in glob::glob(pattern).with_context(|| format!("Invalid glob pattern: {}", pattern))? {
            let path = entry.with_context(|| format!("Failed to read match for: {}", pattern))?;
            if path.is_file() {
                files.insert(path);
                matched = true;
            }
        }

        if !matched {
            warn!(pattern = %pattern, "No files matched");
        }
    }

    Ok(files.into_iter().collect())
}

/// Analyze each file and render one JSON line per document
pub fn analyze_files(analyzer: &Analyzer, files: &[PathBuf]) -> Result<Vec<String>> {
    files
        .iter()
        .map(|path| {
            let text = read_document(path)?;
            let report = analyzer.analyze(&text);
            let entry = BatchEntry {
                source: path.display().to_string(),
                report: &report,
            };
            serde_json::to_string(&entry).context("Failed to serialize report")
        })
        .collect()
}

/// Execute the `batch` command
pub fn run_batch(
    rules_override: Option<&Path>,
    patterns: &[String],
    output: Option<PathBuf>,
) -> Result<()> {
    let analyzer = load_analyzer(rules_override)?;
    let files = expand_inputs(patterns)?;
    info!(files = files.len(), "Analyzing batch");

    let lines = analyze_files(&analyzer, &files)?;
    if lines.is_empty() {
        anyhow::bail!("No input files matched: {}", patterns.join(", "));
    }

    write_output(output.as_deref(), &lines.join("\n"))
}
