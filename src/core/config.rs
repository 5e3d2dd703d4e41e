use crate::processing::filter::MissingEffectPolicy;
use crate::storage::optimizer::StoreSettings;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub paths: PathsConfig,
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(default)]
    pub store: StoreSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Comma separated mutation extract
    pub source: PathBuf,
    /// SQLite file that is replaced on every run
    pub store: PathBuf,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Handling of rows with an empty `effect` cell ("retain" or "drop")
    #[serde(default)]
    pub missing_effect: MissingEffectPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            paths: PathsConfig {
                source: crate::core::paths::default_source_path(),
                store: crate::core::paths::default_store_path(),
            },
            filter: FilterConfig::default(),
            store: StoreSettings::default(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), crate::CcleError> {
        if self.paths.source.as_os_str().is_empty() {
            return Err(crate::CcleError::Config("source path is empty".to_string()));
        }
        if self.paths.store.as_os_str().is_empty() {
            return Err(crate::CcleError::Config("store path is empty".to_string()));
        }
        if self.paths.source == self.paths.store {
            return Err(crate::CcleError::Config(
                "source and store paths must differ".to_string(),
            ));
        }
        self.store.validate()
    }
}

pub fn default_config() -> Config {
    Config::default()
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, crate::CcleError> {
    let contents = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)
        .map_err(|e| crate::CcleError::Config(format!("Failed to parse config: {}", e)))?;
    config.validate()?;
    Ok(config)
}

pub fn save_config<P: AsRef<Path>>(path: P, config: &Config) -> Result<(), crate::CcleError> {
    let contents = toml::to_string_pretty(config)
        .map_err(|e| crate::CcleError::Config(format!("Failed to serialize config: {}", e)))?;
    std::fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_default_paths() {
        let config = Config::default();
        assert_eq!(config.paths.source, PathBuf::from("db/mutations_all_latest.csv"));
        assert_eq!(config.paths.store, PathBuf::from("db/ccle.db"));
        assert_eq!(config.filter.missing_effect, MissingEffectPolicy::Retain);
        assert_eq!(config.store.synchronous, "OFF");
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ccle-db.toml");

        let mut config = Config::default();
        config.filter.missing_effect = MissingEffectPolicy::Drop;
        config.store.journal_mode = "WAL".to_string();
        save_config(&path, &config).unwrap();

        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [paths]
            source = "extract.csv"
            store = "out.db"
            "#,
        )
        .unwrap();

        assert_eq!(config.paths.source, PathBuf::from("extract.csv"));
        assert_eq!(config.filter, FilterConfig::default());
        assert_eq!(config.store, StoreSettings::default());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(
            &path,
            "[paths]\nsource = \"a.csv\"\nstore = \"a.csv\"\n",
        )
        .unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, crate::CcleError::Config(_)));

        std::fs::write(&path, "[paths]\nsource = 3\n").unwrap();
        assert!(matches!(load_config(&path).unwrap_err(), crate::CcleError::Config(_)));
    }

    #[test]
    fn test_unknown_policy_rejected() {
        let parsed: Result<Config, _> = toml::from_str(
            "[paths]\nsource = \"a.csv\"\nstore = \"b.db\"\n[filter]\nmissing_effect = \"maybe\"\n",
        );
        assert!(parsed.is_err());
    }
}
