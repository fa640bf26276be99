//! Configuration for the analyzer CLI.
//!
//! Rule set sources (highest priority first):
//! 1. `--rules` flag (handled by the CLI)
//! 2. Environment variable (CYFSA_RULES)
//! 3. Config file (.cyfsa/config.yaml)
//! 4. Defaults (./analyzer/rules.json, then ~/.cyfsa/rules.json)
//!
//! Config file discovery:
//! - Searches current directory and parents for .cyfsa/config.yaml
//! - Paths in config file are relative to the project root (parent of .cyfsa/)

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Environment variable overriding the rule set path
pub const RULES_ENV: &str = "CYFSA_RULES";

/// Rule set path used when nothing else is configured
pub const DEFAULT_RULES_PATH: &str = "analyzer/rules.json";

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    /// Rule set path (relative to project root)
    #[serde(default)]
    pub rules: Option<String>,
    #[serde(default)]
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub pretty: Option<bool>,
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Rule set to load
    pub rules_path: PathBuf,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
    /// Pretty-print single reports
    pub pretty: bool,
}

/// Find config file by searching a directory and its parents
fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        let config_path = current.join(".cyfsa").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to the config file's project root
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

/// Default rule set location when nothing is configured
fn default_rules_path(cwd: &Path) -> PathBuf {
    let local = cwd.join(DEFAULT_RULES_PATH);
    if local.exists() {
        return local;
    }

    dirs::home_dir()
        .map(|home| home.join(".cyfsa").join("rules.json"))
        .unwrap_or(local)
}

/// Resolve configuration starting from `cwd`, with an optional env override
fn resolve_config(cwd: &Path, env_rules: Option<String>) -> Result<ResolvedConfig> {
    let config_file = find_config_file(cwd);

    let (file_rules, pretty) = if let Some(ref config_path) = config_file {
        let config = load_config_file(config_path)?;

        // Base directory is the parent of .cyfsa/ (i.e., grandparent of config.yaml)
        let base_dir = config_path
            .parent()
            .and_then(|p| p.parent())
            .unwrap_or(Path::new("."));

        let rules = config.rules.as_deref().map(|r| resolve_path(base_dir, r));
        let pretty = config.output.and_then(|o| o.pretty).unwrap_or(true);
        (rules, pretty)
    } else {
        (None, true)
    };

    let rules_path = env_rules
        .map(PathBuf::from)
        .or(file_rules)
        .unwrap_or_else(|| default_rules_path(cwd));

    Ok(ResolvedConfig {
        rules_path,
        config_file,
        pretty,
    })
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    resolve_config(&cwd, std::env::var(RULES_ENV).ok())
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| e.to_string()));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Rule set path: explicit override first, then resolved configuration
pub fn rules_path(override_path: Option<&Path>) -> Result<PathBuf> {
    match override_path {
        Some(path) => Ok(path.to_path_buf()),
        None => Ok(config()?.rules_path.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_config(root: &Path, body: &str) -> PathBuf {
        let dir = root.join(".cyfsa");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.yaml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "{}", body).unwrap();
        path
    }

    #[test]
    fn test_config_file_parsing() {
        let temp = TempDir::new().unwrap();
        let path = write_config(
            temp.path(),
            r#"
version: "1.0"
rules: rules/ontario.yaml
output:
  pretty: false
"#,
        );

        let config = load_config_file(&path).unwrap();
        assert_eq!(config.rules, Some("rules/ontario.yaml".to_string()));
        assert_eq!(config.output.unwrap().pretty, Some(false));
    }

    #[test]
    fn test_config_file_without_version() {
        let temp = TempDir::new().unwrap();
        let path = write_config(temp.path(), "rules: custom/rules.json");

        let config = load_config_file(&path).unwrap();
        assert_eq!(config.rules, Some("custom/rules.json".to_string()));
        assert!(config.output.is_none());
    }

    #[test]
    fn test_config_file_found_from_subdirectory() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), "version: \"1.0\"\nrules: custom/rules.json");
        let nested = temp.path().join("docs").join("cases");
        std::fs::create_dir_all(&nested).unwrap();

        let config = resolve_config(&nested, None).unwrap();
        assert_eq!(config.rules_path, temp.path().join("custom/rules.json"));
        assert!(config.config_file.is_some());
        assert!(config.pretty);
    }

    #[test]
    fn test_env_overrides_config_file() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), "version: \"1.0\"\nrules: custom/rules.json");

        let config = resolve_config(temp.path(), Some("/etc/cyfsa/rules.json".to_string())).unwrap();
        assert_eq!(config.rules_path, PathBuf::from("/etc/cyfsa/rules.json"));
    }

    #[test]
    fn test_default_prefers_local_rules_file() {
        let temp = TempDir::new().unwrap();
        let local = temp.path().join(DEFAULT_RULES_PATH);
        std::fs::create_dir_all(local.parent().unwrap()).unwrap();
        std::fs::write(&local, "{}").unwrap();

        let config = resolve_config(temp.path(), None).unwrap();
        assert_eq!(config.rules_path, local);
    }

    #[test]
    fn test_invalid_config_file_errors() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), "rules: [unterminated");
        assert!(resolve_config(temp.path(), None).is_err());
    }

    #[test]
    fn test_resolve_relative_path() {
        let base = PathBuf::from("/home/user/project");

        assert_eq!(
            resolve_path(&base, "./rules.json"),
            PathBuf::from("/home/user/project/./rules.json")
        );
        assert_eq!(
            resolve_path(&base, "/absolute/rules.json"),
            PathBuf::from("/absolute/rules.json")
        );
    }

    #[test]
    fn test_rules_path_override_wins() {
        let path = rules_path(Some(Path::new("explicit.json"))).unwrap();
        assert_eq!(path, PathBuf::from("explicit.json"));
    }
}
