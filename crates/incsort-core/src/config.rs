use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{IncsortError, Result};
use crate::formatter::{FileFilter, DEFAULT_EXCLUDES, DEFAULT_EXTENSIONS};

const CONFIG_FILE: &str = "config.toml";

/// Keys accepted by `get`/`set`, in listing order
pub const CONFIG_KEYS: &[&str] = &["files.extensions", "files.exclude"];

/// Default config template with rich comments
const DEFAULT_CONFIG_TEMPLATE: &str = r#"# incsort configuration file
# Location: ~/.incsort/config.toml

[files]
# File extensions to sort (case-insensitive, without the dot)
# Default: ["h", "c", "cpp", "hpp"]
# Example: extensions = ["h", "c", "cpp", "hpp", "cc", "hh"]
extensions = ["h", "c", "cpp", "hpp"]

# Glob patterns for file or directory names skipped while walking
# Default: [".git", "build", "target", "node_modules"]
# Example: exclude = [".git", "build", "third_party*"]
exclude = [".git", "build", "target", "node_modules"]
"#;

/// Global configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub files: FilesConfig,
}

/// File selection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilesConfig {
    /// Extensions to sort
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Name patterns to skip
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,
}

fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect()
}

fn default_exclude() -> Vec<String> {
    DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect()
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            exclude: default_exclude(),
        }
    }
}

impl Config {
    /// Load config from base directory
    pub fn load(base_dir: &Path) -> Result<Self> {
        let path = base_dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content).map_err(|e| IncsortError::ConfigParse {
            path: path.clone(),
            message: e.to_string(),
        })?;

        Ok(config)
    }

    /// Save config to base directory
    pub fn save(&self, base_dir: &Path) -> Result<()> {
        let path = base_dir.join(CONFIG_FILE);
        fs::create_dir_all(base_dir)?;

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Get config file path
    pub fn path(base_dir: &Path) -> PathBuf {
        base_dir.join(CONFIG_FILE)
    }

    /// Initialize config with default template (rich comments)
    pub fn init(base_dir: &Path) -> Result<PathBuf> {
        let path = base_dir.join(CONFIG_FILE);
        fs::create_dir_all(base_dir)?;

        if !path.exists() {
            fs::write(&path, DEFAULT_CONFIG_TEMPLATE)?;
        }

        Ok(path)
    }

    /// Get a config value by dot-notation key
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "files.extensions" => &self.files.extensions,
            "files.exclude" => &self.files.exclude,
            _ => return None,
        };
        Some(format!("{:?}", value))
    }

    /// Set a config value by dot-notation key
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "files.extensions" => {
                self.files.extensions = parse_string_list(value)
                    .into_iter()
                    .map(|e| e.trim_start_matches('.').to_string())
                    .collect();
                Ok(())
            }
            "files.exclude" => {
                let patterns = parse_string_list(value);
                for p in &patterns {
                    glob::Pattern::new(p)?;
                }
                self.files.exclude = patterns;
                Ok(())
            }
            _ => Err(IncsortError::ConfigKeyNotFound {
                key: key.to_string(),
            }),
        }
    }

    /// List all config keys with their current values
    pub fn list(&self) -> Vec<(String, String)> {
        CONFIG_KEYS
            .iter()
            .filter_map(|key| self.get(key).map(|value| (key.to_string(), value)))
            .collect()
    }

    /// Build the file filter, adding extra exclude patterns from the command line
    pub fn to_file_filter(&self, extra_exclude: &[String]) -> Result<FileFilter> {
        let mut exclude = self.files.exclude.clone();
        exclude.extend(extra_exclude.iter().cloned());
        FileFilter::new(&self.files.extensions, &exclude)
    }
}

/// Parse a comma-separated or JSON-like list string
fn parse_string_list(value: &str) -> Vec<String> {
    let trimmed = value.trim();

    // ["a", "b"]
    let inner = if trimmed.starts_with('[') && trimmed.ends_with(']') {
        &trimmed[1..trimmed.len() - 1]
    } else {
        trimmed
    };

    inner
        .split(',')
        .map(|s| s.trim().trim_matches('"').trim_matches('\'').to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_string_list_comma() {
        let result = parse_string_list("h,cpp");
        assert_eq!(result, vec!["h", "cpp"]);
    }

    #[test]
    fn test_parse_string_list_json() {
        let result = parse_string_list(r#"["h", "cpp"]"#);
        assert_eq!(result, vec!["h", "cpp"]);
    }

    #[test]
    fn test_parse_string_list_empty() {
        assert!(parse_string_list("[]").is_empty());
    }

    #[test]
    fn test_config_get_set() {
        let mut config = Config::default();

        config.set("files.extensions", ".h,.cc").unwrap();
        assert_eq!(config.files.extensions, vec!["h", "cc"]);

        let value = config.get("files.extensions").unwrap();
        assert!(value.contains("cc"));
    }

    #[test]
    fn test_list_covers_every_key() {
        let config = Config::default();
        let listed: Vec<String> = config.list().into_iter().map(|(k, _)| k).collect();
        assert_eq!(listed, CONFIG_KEYS);
        assert_eq!(config.get("files.nope"), None);
    }

    #[test]
    fn test_config_set_unknown_key() {
        let mut config = Config::default();
        let err = config.set("files.nope", "x").unwrap_err();
        assert!(matches!(err, IncsortError::ConfigKeyNotFound { .. }));
    }

    #[test]
    fn test_config_set_rejects_bad_glob() {
        let mut config = Config::default();
        let err = config.set("files.exclude", "a[,b").unwrap_err();
        assert!(matches!(err, IncsortError::InvalidPattern(_)));
        assert_eq!(config.files.exclude, default_exclude());
    }

    #[test]
    fn test_load_missing_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = Config::load(tmp.path()).unwrap();
        assert_eq!(config.files.extensions, vec!["h", "c", "cpp", "hpp"]);
    }

    #[test]
    fn test_init_template_loads_as_default() {
        let tmp = TempDir::new().unwrap();
        let path = Config::init(tmp.path()).unwrap();
        assert!(path.exists());

        let config = Config::load(tmp.path()).unwrap();
        assert_eq!(config.files.extensions, default_extensions());
        assert_eq!(config.files.exclude, default_exclude());
    }

    #[test]
    fn test_save_and_load() {
        let tmp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.files.exclude = vec!["vendor".to_string()];
        config.save(tmp.path()).unwrap();

        let loaded = Config::load(tmp.path()).unwrap();
        assert_eq!(loaded.files.exclude, vec!["vendor"]);
        assert_eq!(loaded.files.extensions, default_extensions());
    }

    #[test]
    fn test_load_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        fs::write(Config::path(tmp.path()), "[files\nextensions = 1").unwrap();
        let err = Config::load(tmp.path()).unwrap_err();
        assert!(matches!(err, IncsortError::ConfigParse { .. }));
    }

    #[test]
    fn test_to_file_filter() {
        let config = Config::default();
        let filter = config.to_file_filter(&["vendor".to_string()]).unwrap();
        assert!(filter.is_excluded("vendor"));
        assert!(filter.is_excluded(".git"));
        assert!(filter.is_target(Path::new("a.hpp")));
    }
}
