//! Configuration management for pivot.
//!
//! Loads configuration from ${PIVOT_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub mod paths {
    //! Path resolution for pivot configuration and data directories.
    //!
    //! PIVOT_HOME resolution order:
    //! 1. PIVOT_HOME environment variable (if set)
    //! 2. ~/.config/pivot (default)

    use std::path::PathBuf;

    /// Returns the pivot home directory.
    ///
    /// Checks PIVOT_HOME env var first, falls back to ~/.config/pivot
    pub fn pivot_home() -> PathBuf {
        if let Ok(home) = std::env::var("PIVOT_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("pivot"))
            .expect("Could not determine home directory")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        pivot_home().join("config.toml")
    }

    /// Returns the directory where log files are written.
    pub fn logs_dir() -> PathBuf {
        pivot_home().join("logs")
    }
}

/// Returns the default config template with comments.
///
/// This is embedded from default_config.toml at compile time.
/// To update, edit default_config.toml directly.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

/// Merges user config values into the default template.
///
/// This ensures new comments/sections from the template are always present,
/// while preserving user's customized values.
fn merge_with_template(user_config: &str) -> Result<String> {
    use toml_edit::DocumentMut;

    // Parse the template as the base
    let mut doc: DocumentMut = default_config_template()
        .parse()
        .context("Failed to parse default config template")?;

    // Parse user's existing config
    let user_doc: DocumentMut = user_config.parse().context("Failed to parse user config")?;

    // Overlay user values onto template
    merge_items(doc.as_table_mut(), user_doc.as_table());

    Ok(doc.to_string())
}

/// Recursively merges items from source table into target table.
fn merge_items(target: &mut toml_edit::Table, source: &toml_edit::Table) {
    use toml_edit::Item;

    for (key, value) in source.iter() {
        match value {
            Item::Value(v) => {
                // Scalar value: override in target
                target[key] = Item::Value(v.clone());
            }
            Item::Table(src_table) => {
                // Nested table: recursively merge
                if let Some(Item::Table(target_table)) = target.get_mut(key) {
                    merge_items(target_table, src_table);
                } else {
                    // Target doesn't have this table, copy it
                    target[key] = Item::Table(src_table.clone());
                }
            }
            Item::ArrayOfTables(src_arr) => {
                // Array of tables: replace entirely with user's version
                target[key] = Item::ArrayOfTables(src_arr.clone());
            }
            Item::None => {}
        }
    }
}

/// Backend API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the career-advice backend.
    pub base_url: String,
}

impl ApiConfig {
    pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// File logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Whether to write logs to `<pivot-home>/logs/pivot.log`.
    pub enabled: bool,
    /// Log level filter (trace, debug, info, warn, error).
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "info".to_string(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend API settings.
    pub api: ApiConfig,
    /// File logging settings.
    pub log: LogConfig,
}

impl Config {
    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Saves only the api.base_url field to the config file.
    ///
    /// Creates the file if it doesn't exist.
    /// Preserves existing fields and comments using toml_edit.
    pub fn save_base_url(base_url: &str) -> Result<()> {
        Self::save_base_url_to(&paths::config_path(), base_url)
    }

    /// Saves only the api.base_url field to a specific config file path.
    ///
    /// Creates the file with default template if it doesn't exist.
    /// If file exists, merges user values into the latest template.
    pub fn save_base_url_to(path: &Path, base_url: &str) -> Result<()> {
        use toml_edit::{DocumentMut, value};

        // Start from template, merge user values if file exists
        let contents = if path.exists() {
            let user_config = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            merge_with_template(&user_config)?
        } else {
            default_config_template().to_string()
        };

        // Parse as editable document
        let mut doc: DocumentMut = contents
            .parse()
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        // Update base_url field
        doc["api"]["base_url"] = value(base_url);

        Self::write_config(path, &doc.to_string())
    }

    /// Creates a default config file at the given path.
    /// Returns an error if the file already exists.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    /// Writes config content to a file, creating parent directories as needed.
    /// Uses atomic write (temp file + rename) to prevent corruption.
    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    /// Config loading: missing file returns defaults.
    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("nonexistent.toml");

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.api.base_url, ApiConfig::DEFAULT_BASE_URL);
        assert!(!config.log.enabled);
    }

    /// Config loading: partial config merges with defaults.
    #[test]
    fn test_load_partial_config_merges_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(&config_path, "[api]\nbase_url = \"http://example.test:9000\"\n").unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.api.base_url, "http://example.test:9000");
        assert_eq!(config.log.level, "info");
    }

    /// Config loading: unknown ini-style garbage is a parse error, not a panic.
    #[test]
    fn test_load_malformed_config_errors() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(&config_path, "api = [not toml").unwrap();

        let result = Config::load_from(&config_path);
        assert!(result.is_err());
    }

    /// Config init: creates file with template, creates parent dirs.
    #[test]
    fn test_init_creates_config_with_template() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("subdir").join("config.toml");

        Config::init(&config_path).unwrap();

        assert!(config_path.exists());
        let contents = fs::read_to_string(&config_path).unwrap();
        assert!(contents.contains("http://127.0.0.1:5000"));
        assert!(contents.contains("[log]"));
    }

    /// Config init: fails if file exists (no silent overwrite).
    #[test]
    fn test_init_fails_if_exists() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(&config_path, "").unwrap();

        let result = Config::init(&config_path);
        assert!(result.is_err());
    }

    /// Save: creates file from template when missing.
    #[test]
    fn test_save_base_url_creates_from_template() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        Config::save_base_url_to(&config_path, "http://localhost:8080").unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8080");

        // Template comments survive the write
        let contents = fs::read_to_string(&config_path).unwrap();
        assert!(contents.contains("# Pivot configuration"));
    }

    /// Save: preserves other user values when updating one key.
    #[test]
    fn test_save_base_url_preserves_other_values() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(&config_path, "[log]\nenabled = true\nlevel = \"debug\"\n").unwrap();

        Config::save_base_url_to(&config_path, "http://localhost:8080").unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8080");
        assert!(config.log.enabled);
        assert_eq!(config.log.level, "debug");
    }

    /// Save: repeated saves keep the file well-formed.
    #[test]
    fn test_save_base_url_is_idempotent() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        Config::save_base_url_to(&config_path, "http://one.test").unwrap();
        Config::save_base_url_to(&config_path, "http://two.test").unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.api.base_url, "http://two.test");
    }

    /// Template parses into the same defaults as Config::default().
    #[test]
    fn test_template_matches_defaults() {
        let config: Config = toml::from_str(default_config_template()).unwrap();
        assert_eq!(config.api.base_url, ApiConfig::DEFAULT_BASE_URL);
        assert!(!config.log.enabled);
        assert_eq!(config.log.level, "info");
    }
}
