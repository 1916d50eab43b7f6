use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

fn default_currency() -> String {
    "$".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    /// Label printed next to amounts.
    #[serde(default = "default_currency")]
    pub currency: String,
    pub data_path: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            currency: default_currency(),
            data_path: None,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    /// Like [`AppConfig::load`], but a missing config file yields the
    /// defaults. A file that exists and fails to parse is still an error.
    pub fn load_or_default() -> Result<Self> {
        Self::load_or_default_from_path(Self::default_config_path()?)
    }

    pub fn load_or_default_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        if !path.as_ref().exists() {
            debug!("No config at {}, using defaults", path.as_ref().display());
            return Ok(Self::default());
        }
        Self::load_from_path(path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "fintrack", "fintrack")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn default_data_path(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.data_path {
            return Ok(PathBuf::from(custom_path));
        }
        let proj_dirs = ProjectDirs::from("dev", "fintrack", "fintrack")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
currency: "EUR"
data_path: "/tmp/fintrack-data"
"#;
        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.currency, "EUR");
        assert_eq!(config.data_path.as_deref(), Some("/tmp/fintrack-data"));
        assert_eq!(
            config.default_data_path().unwrap(),
            PathBuf::from("/tmp/fintrack-data")
        );
    }

    #[test]
    fn test_config_defaults() {
        let config: AppConfig = serde_yaml::from_str("data_path: ~\n").unwrap();
        assert_eq!(config.currency, "$");
        assert!(config.data_path.is_none());

        let config = AppConfig::default();
        assert_eq!(config.currency, "$");
    }

    #[test]
    fn test_load_from_missing_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load_from_path(dir.path().join("missing.yaml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_load_or_default_only_tolerates_missing_file() {
        let dir = tempfile::tempdir().unwrap();

        let config = AppConfig::load_or_default_from_path(dir.path().join("missing.yaml")).unwrap();
        assert_eq!(config.currency, "$");

        let path = dir.path().join("config.yaml");
        fs::write(&path, "currency: [unclosed\n").unwrap();
        let err = AppConfig::load_or_default_from_path(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));

        fs::write(&path, "currency: EUR\n").unwrap();
        let config = AppConfig::load_or_default_from_path(&path).unwrap();
        assert_eq!(config.currency, "EUR");
    }
}
