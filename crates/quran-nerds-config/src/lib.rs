use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// Text editions used when composing a verse block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditionsConfig {
    pub arabic: String,
    pub english: String,
    pub bangla: String,
}

impl Default for EditionsConfig {
    fn default() -> Self {
        Self {
            arabic: "ar.asad".to_string(),
            english: "en.asad".to_string(),
            bangla: "bn.bengali".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Directory of stored note bodies.
    pub notes_path: PathBuf,
    /// Directory mirroring the verse provider documents.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
    #[serde(default = "default_reciter_edition")]
    pub reciter_edition: String,
    #[serde(default = "default_excerpt_length")]
    pub excerpt_length: usize,
    #[serde(default)]
    pub editions: EditionsConfig,
}

fn default_data_dir() -> PathBuf {
    let data_dir = shellexpand::tilde("~/.local/share/quran-nerds");
    PathBuf::from(data_dir.as_ref())
}

fn default_fetch_timeout_secs() -> u64 {
    10
}

fn default_reciter_edition() -> String {
    "ar.alafasy".to_string()
}

fn default_excerpt_length() -> usize {
    200
}

impl Config {
    pub fn new(notes_path: impl Into<PathBuf>) -> Self {
        Self {
            notes_path: notes_path.into(),
            data_dir: default_data_dir(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            reciter_edition: default_reciter_edition(),
            excerpt_length: default_excerpt_length(),
            editions: EditionsConfig::default(),
        }
    }

    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the loaded paths
        config.notes_path = Self::expand_path(&config.notes_path).unwrap_or(config.notes_path);
        config.data_dir = Self::expand_path(&config.data_dir).unwrap_or(config.data_dir);

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/quran-nerds");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/quran-nerds/config.toml"));
    }

    #[test]
    fn test_minimal_config_gets_defaults() {
        let config: Config = toml::from_str(r#"notes_path = "/srv/notes""#).unwrap();

        assert_eq!(config.notes_path, PathBuf::from("/srv/notes"));
        assert_eq!(config.fetch_timeout(), Duration::from_secs(10));
        assert_eq!(config.reciter_edition, "ar.alafasy");
        assert_eq!(config.editions, EditionsConfig::default());
        assert_eq!(config.excerpt_length, 200);
    }

    #[test]
    fn test_partial_editions_table() {
        let config_content = r#"
notes_path = "/srv/notes"

[editions]
bangla = "bn.hoque"
"#;
        let config: Config = toml::from_str(config_content).unwrap();

        assert_eq!(config.editions.arabic, "ar.asad");
        assert_eq!(config.editions.english, "en.asad");
        assert_eq!(config.editions.bangla, "bn.hoque");
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let expanded = Config::expand_path(&PathBuf::from("~/test/path")).unwrap();

        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().contains("test/path"));
    }

    #[test]
    fn test_expand_path_with_env_var() {
        unsafe {
            env::set_var("QURAN_NERDS_TEST_VAR", "/test/env/path");
        }

        let path = PathBuf::from("$QURAN_NERDS_TEST_VAR/subdir");
        let expanded = Config::expand_path(&path).unwrap();
        assert_eq!(expanded, PathBuf::from("/test/env/path/subdir"));

        unsafe {
            env::remove_var("QURAN_NERDS_TEST_VAR");
        }
    }

    #[test]
    fn test_expand_path_with_absolute_path() {
        let path = PathBuf::from("/absolute/path");
        assert_eq!(Config::expand_path(&path).unwrap(), path);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_load_config_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "notes_path = ").unwrap();

        let result = Config::load_from_path(&config_file);

        assert!(matches!(result, Err(ConfigError::ConfigParseError { .. })));
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested").join("config.toml");
        let mut test_config = Config::new("/tmp/test-notes");
        test_config.data_dir = PathBuf::from("/tmp/test-mirror");
        test_config.fetch_timeout_secs = 3;
        test_config.editions.english = "en.sahih".to_string();

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
    }

    #[test]
    fn test_paths_expanded_on_load() {
        unsafe {
            env::set_var("QURAN_NERDS_ROOT", "/custom");
        }
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(
            &config_file,
            r#"
notes_path = "$QURAN_NERDS_ROOT/notes"
data_dir = "$QURAN_NERDS_ROOT/mirror"
"#,
        )
        .unwrap();

        let config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(config.notes_path, PathBuf::from("/custom/notes"));
        assert_eq!(config.data_dir, PathBuf::from("/custom/mirror"));

        unsafe {
            env::remove_var("QURAN_NERDS_ROOT");
        }
    }
}
