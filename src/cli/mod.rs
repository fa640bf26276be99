//! Command-line interface for cyfsa-analyzer.
//!
//! Provides commands for analyzing documents, batch analysis, checking a
//! rule set and showing the resolved configuration. Reports go to stdout as
//! JSON; logs go to stderr.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::analysis::{scanner, Analyzer, Report};
use crate::config;
use crate::rules::RuleSet;

pub mod batch;

/// Sample document analyzed by `demo`
pub const DEMO_TEXT: &str =
    "Neighbour reported child was unsupervised. Parent allegedly has substance abuse issues.";

/// cyfsa-analyzer - Educational pattern flags for CYFSA documents (Ontario)
///
/// Output is educational only and never a legal conclusion.
#[derive(Parser, Debug)]
#[command(name = "cyfsa-analyzer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Rule set file (JSON or YAML); overrides CYFSA_RULES and config file
    #[arg(short, long, global = true)]
    pub rules: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze one document and print its report
    Analyze {
        /// Input file (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Read input from stdin
        #[arg(long, conflicts_with = "input")]
        stdin: bool,

        /// Print compact single-line JSON
        #[arg(long)]
        compact: bool,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Analyze every file matching the given glob patterns (JSON lines)
    Batch {
        /// File paths or glob patterns (e.g. "cases/**/*.txt")
        #[arg(required = true)]
        patterns: Vec<String>,

        /// Write JSON lines to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Analyze a built-in sample document
    Demo,

    /// Validate the rule set and summarize it
    Rules,

    /// Show resolved configuration (debug)
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        let rules_override = self.rules.as_deref();

        match self.command {
            Commands::Analyze {
                input,
                stdin,
                compact,
                output,
            } => analyze_document(rules_override, input, stdin, compact, output),
            Commands::Batch { patterns, output } => {
                batch::run_batch(rules_override, &patterns, output)
            }
            Commands::Demo => run_demo(rules_override),
            Commands::Rules => show_rules(rules_override),
            Commands::Config => show_config(rules_override),
        }
    }
}

/// Load the rule set and build an analyzer
pub fn load_analyzer(rules_override: Option<&Path>) -> Result<Analyzer> {
    let path = config::rules_path(rules_override)?;
    let rules = RuleSet::from_file(&path)
        .with_context(|| format!("Failed to load rule set: {}", path.display()))?;

    Analyzer::new(rules).with_context(|| format!("Invalid rule set: {}", path.display()))
}

/// Read a document, replacing invalid UTF-8 instead of failing
pub fn read_document(path: &Path) -> Result<String> {
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read input file: {}", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn read_stdin() -> Result<String> {
    let mut bytes = Vec::new();
    io::stdin()
        .read_to_end(&mut bytes)
        .context("Failed to read from stdin")?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Pretty unless `--compact` or `output.pretty: false`; config errors propagate
fn output_pretty(compact: bool) -> Result<bool> {
    if compact {
        return Ok(false);
    }
    Ok(config::config()?.pretty)
}

fn render_report(report: &Report, pretty: bool) -> Result<String> {
    let json = if pretty {
        report.to_json_pretty()
    } else {
        report.to_json()
    };
    json.context("Failed to serialize report")
}

/// Write text to a file, or stdout when no path is given
pub fn write_output(output: Option<&Path>, text: &str) -> Result<()> {
    match output {
        Some(path) => fs::write(path, format!("{}\n", text))
            .with_context(|| format!("Failed to write output file: {}", path.display())),
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", text).context("Failed to write to stdout")
        }
    }
}

fn analyze_document(
    rules_override: Option<&Path>,
    input: Option<PathBuf>,
    stdin: bool,
    compact: bool,
    output: Option<PathBuf>,
) -> Result<()> {
    let analyzer = load_analyzer(rules_override)?;

    let text = match input {
        Some(ref path) if !stdin => read_document(path)?,
        _ => read_stdin()?,
    };

    let report = analyzer.analyze(&text);
    let pretty = output_pretty(compact)?;

    write_output(output.as_deref(), &render_report(&report, pretty)?)
}

fn run_demo(rules_override: Option<&Path>) -> Result<()> {
    let analyzer = load_analyzer(rules_override)?;
    let report = analyzer.analyze(DEMO_TEXT);
    write_output(None, &render_report(&report, output_pretty(false)?)?)
}

/// Summary printed by `rules`
#[derive(Debug, Serialize)]
struct RulesSummary<'a> {
    path: String,
    version: &'a str,
    jurisdiction: &'a str,
    categories: Vec<CategorySummary<'a>>,
}

#[derive(Debug, Serialize)]
struct CategorySummary<'a> {
    name: &'a str,
    patterns: usize,
    recognized: bool,
}

fn summarize_rules<'a>(path: &Path, rules: &'a RuleSet) -> RulesSummary<'a> {
    RulesSummary {
        path: path.display().to_string(),
        version: &rules.analyzer_metadata.version,
        jurisdiction: &rules.analyzer_metadata.jurisdiction,
        categories: rules
            .patterns
            .iter()
            .map(|(name, patterns)| CategorySummary {
                name,
                patterns: patterns.len(),
                recognized: scanner::find_rule(name).is_some(),
            })
            .collect(),
    }
}

fn show_rules(rules_override: Option<&Path>) -> Result<()> {
    let path = config::rules_path(rules_override)?;
    let analyzer = load_analyzer(Some(path.as_path()))?;
    let summary = summarize_rules(&path, analyzer.rules());

    let json = serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?;
    write_output(None, &json)
}

fn render_config(config: &config::ResolvedConfig, rules_path: &Path) -> String {
    let config_file = config
        .config_file
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(none)".to_string());

    format!(
        "Configuration:\n  Config file: {}\n  Rules:       {}\n  Pretty JSON: {}",
        config_file,
        rules_path.display(),
        config.pretty
    )
}

fn show_config(rules_override: Option<&Path>) -> Result<()> {
    let config = config::config()?;
    let rules_path = config::rules_path(rules_override)?;
    write_output(None, &render_config(config, &rules_path))
}
