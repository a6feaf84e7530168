//! Configuration loading for convention-linter
//!
//! Loads configuration from a `.convention-lint.toml` file, found by walking
//! up from the checked path or given explicitly on the command line.

use crate::error::ConfigError;
use crate::models::Severity;
use crate::rules;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CONFIG_FILE_NAME: &str = ".convention-lint.toml";

/// Directories that are never worth linting
pub const DEFAULT_EXCLUDES: &[&str] = &[
    ".git",
    "target",
    "build",
    "out",
    ".gradle",
    ".idea",
    "node_modules",
];

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub enable: Vec<String>,

    #[serde(default)]
    pub disable: Vec<String>,

    #[serde(default)]
    pub exclude: Vec<String>,

    #[serde(default)]
    pub rules: HashMap<String, RuleConfig>,
}

#[derive(Debug, Deserialize, Serialize, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct RuleConfig {
    /// Overrides the rule's default severity
    pub severity: Option<Severity>,

    // line-length specific
    pub max_line_length: Option<usize>,
}

/// Find the config file starting from a path and walking up
pub fn find_config_file(start_path: &Path) -> Option<PathBuf> {
    let mut current = if start_path.is_file() {
        start_path.parent()?
    } else {
        start_path
    };

    loop {
        let candidate = current.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }

        current = current.parent()?;
    }
}

/// Load configuration from a file
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: Config = toml::from_str(&content).map_err(|source| ConfigError::Toml {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Resolve `ALL` and apply a disable list to it
fn expand_enable(enable: &[String], disable: &[String]) -> Vec<String> {
    if enable.iter().any(|id| id == "ALL") {
        rules::get_all_rule_ids()
            .into_iter()
            .filter(|r| !disable.contains(r))
            .collect()
    } else {
        enable
            .iter()
            .filter(|r| !disable.contains(r))
            .cloned()
            .collect()
    }
}

/// Merge command line arguments with config file settings.
/// Command line arguments take precedence.
///
/// Returns the rules to enable (`None` means all) and the exclude patterns.
pub fn merge_config(
    config: Option<&Config>,
    cli_enable: &[String],
    cli_disable: &[String],
    cli_skip: &[String],
) -> (Option<Vec<String>>, Vec<String>) {
    let mut enable = None;
    let mut exclude = vec![];
    let cli_given = !cli_enable.is_empty() || !cli_disable.is_empty();

    // Start with config file settings
    if let Some(cfg) = config {
        if !cli_given {
            if !cfg.enable.is_empty() {
                enable = Some(expand_enable(&cfg.enable, &cfg.disable));
            } else if !cfg.disable.is_empty() {
                enable = Some(expand_enable(&["ALL".to_string()], &cfg.disable));
            }
        }

        exclude.extend(cfg.exclude.iter().cloned());
    }

    // Apply CLI overrides
    if !cli_enable.is_empty() {
        enable = Some(expand_enable(cli_enable, cli_disable));
    } else if !cli_disable.is_empty() {
        enable = Some(expand_enable(&["ALL".to_string()], cli_disable));
    }

    exclude.extend(cli_skip.iter().cloned());

    for default in DEFAULT_EXCLUDES {
        if !exclude.iter().any(|e| e == default) {
            exclude.push((*default).to_string());
        }
    }

    (enable, exclude)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_file() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&config_path, "exclude = [\"generated\"]").unwrap();

        // From the same directory
        assert_eq!(find_config_file(dir.path()), Some(config_path.clone()));

        // From a subdirectory
        let subdir = dir.path().join("src").join("main");
        fs::create_dir_all(&subdir).unwrap();
        assert_eq!(find_config_file(&subdir), Some(config_path));
    }

    #[test]
    fn test_load_config() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        let content = r#"
enable = ["no-wildcard-import", "final-field"]
exclude = ["generated"]

[rules.line-length]
max_line_length = 100

[rules.final-field]
severity = "error"
"#;
        fs::write(&config_path, content).unwrap();

        let config = load_config(&config_path).unwrap();
        assert_eq!(config.enable, vec!["no-wildcard-import", "final-field"]);
        assert_eq!(config.exclude, vec!["generated"]);
        assert_eq!(config.rules["line-length"].max_line_length, Some(100));
        assert_eq!(config.rules["final-field"].severity, Some(Severity::Error));
    }

    #[test]
    fn test_load_config_rejects_unknown_rule_option() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&config_path, "[rules.line-length]\nmax = 3\n").unwrap();

        let err = load_config(&config_path).unwrap_err();
        assert!(matches!(err, ConfigError::Toml { .. }));
    }

    #[test]
    fn test_load_missing_config() {
        let dir = TempDir::new().unwrap();
        let err = load_config(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_merge_config() {
        let config = Config {
            enable: vec!["final-field".to_string()],
            exclude: vec!["custom_dir".to_string()],
            ..Default::default()
        };

        // CLI overrides config
        let (enable, exclude) = merge_config(
            Some(&config),
            &["type-naming".to_string()],
            &[],
            &["skip_me".to_string()],
        );

        assert_eq!(enable, Some(vec!["type-naming".to_string()]));
        assert!(exclude.contains(&"custom_dir".to_string()));
        assert!(exclude.contains(&"skip_me".to_string()));
        assert!(exclude.contains(&".git".to_string())); // Default added
    }

    #[test]
    fn test_merge_config_all_with_disable() {
        let config = Config {
            enable: vec!["ALL".to_string()],
            disable: vec!["line-length".to_string()],
            ..Default::default()
        };

        let (enable, _) = merge_config(Some(&config), &[], &[], &[]);
        let enable = enable.unwrap();
        assert_eq!(enable.len(), rules::get_all_rule_ids().len() - 1);
        assert!(!enable.contains(&"line-length".to_string()));
    }

    #[test]
    fn test_merge_config_disable_only() {
        let (enable, _) = merge_config(None, &[], &["final-field".to_string()], &[]);
        let enable = enable.unwrap();
        assert!(!enable.contains(&"final-field".to_string()));
        assert!(enable.contains(&"no-wildcard-import".to_string()));
    }

    #[test]
    fn test_merge_without_settings_enables_all() {
        let (enable, exclude) = merge_config(None, &[], &[], &[]);
        assert_eq!(enable, None);
        assert_eq!(exclude.len(), DEFAULT_EXCLUDES.len());
    }
}
