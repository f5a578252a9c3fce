use serde::{Deserialize, Serialize};

use std::{env, fs, path::Path};

pub const DEFAULT_PORT: u16 = 3001;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Storage {
    #[default]
    Postgres,
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub storage: Storage,
    #[serde(default)]
    pub database_dsn: Option<String>,
}

const fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            storage: Storage::default(),
            database_dsn: None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        source: serde_yaml::Error,
    },

    #[error("invalid value for {name}: {value}")]
    InvalidVar { name: &'static str, value: String },

    #[error("database dsn is required for postgres storage (set PG_DSN or database_dsn)")]
    MissingDsn,
}

impl Config {
    /// A postgres config without a DSN cannot be used.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.storage == Storage::Postgres && self.database_dsn.is_none() {
            return Err(ConfigError::MissingDsn);
        }
        Ok(self)
    }
}

fn read_file(path: &str) -> Result<Config, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_string(),
        source,
    })?;
    serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_string(),
        source,
    })
}

/// Overlays `PORT`, `STORAGE` and `PG_DSN` on top of `config`. `lookup` is
/// `std::env::var` outside of tests.
fn apply_overrides(
    mut config: Config,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Config, ConfigError> {
    if let Some(value) = lookup("PORT") {
        config.port = value
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidVar { name: "PORT", value })?;
    }

    if let Some(value) = lookup("STORAGE") {
        config.storage = match value.to_lowercase().as_str() {
            "postgres" => Storage::Postgres,
            "memory" => Storage::Memory,
            _ => return Err(ConfigError::InvalidVar { name: "STORAGE", value }),
        };
    }

    if let Some(dsn) = lookup("PG_DSN") {
        config.database_dsn = Some(dsn);
    }

    Ok(config)
}

fn load_file() -> Result<Option<Config>, ConfigError> {
    // Retrieve env variable
    let config_path = env::var("NOTES_API_CONFIG").unwrap_or_else(|_| "config.yaml".to_string());

    // Try env path
    if Path::new(&config_path).exists() {
        return read_file(&config_path).map(Some);
    }

    // Fallback to config.yaml
    if Path::new("config.yaml").exists() {
        tracing::warn!(
            "Config file '{}' not found, falling back to 'config.yaml'",
            config_path
        );
        return read_file("config.yaml").map(Some);
    }

    // Fallback to config.example.yaml
    if Path::new("config.example.yaml").exists() {
        tracing::warn!(
            "Config file '{}' and 'config.yaml' not found, falling back to 'config.example.yaml'\
             \n This file should not be used and should be replaced with actual data",
            config_path
        );
        return read_file("config.example.yaml").map(Some);
    }

    Ok(None)
}

/// Reads the first config file found, then lets environment variables
/// override individual values.
pub fn load_config() -> Result<Config, ConfigError> {
    let config = load_file()?.unwrap_or_else(|| {
        tracing::info!("No config file found, loading configuration from environment variables");
        Config::default()
    });

    apply_overrides(config, |name| env::var(name).ok())?.validate()
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::{collections::HashMap, io::Write};

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn parses_full_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "port: 8080\nstorage: postgres\ndatabase_dsn: host=localhost user=notes"
        )
        .unwrap();

        let config = read_file(file.path().to_str().unwrap()).unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.storage, Storage::Postgres);
        assert_eq!(
            config.database_dsn.as_deref(),
            Some("host=localhost user=notes")
        );
    }

    #[test]
    fn applies_defaults() {
        let config: Config = serde_yaml::from_str("storage: memory").unwrap();

        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.storage, Storage::Memory);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn postgres_without_dsn_is_rejected() {
        let config: Config = serde_yaml::from_str("port: 1234").unwrap();

        assert!(matches!(config.validate(), Err(ConfigError::MissingDsn)));
    }

    #[test]
    fn unknown_storage_fails_to_parse() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "storage: mongo").unwrap();

        let err = read_file(file.path().to_str().unwrap()).unwrap_err();

        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = read_file("/nonexistent/notes-api.yaml").unwrap_err();

        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn env_overrides_file_values() {
        let file: Config = serde_yaml::from_str(
            "port: 3001\nstorage: postgres\ndatabase_dsn: host=localhost",
        )
        .unwrap();

        let config = apply_overrides(file, vars(&[("STORAGE", "memory"), ("PORT", "9000")]))
            .unwrap()
            .validate()
            .unwrap();

        assert_eq!(config.storage, Storage::Memory);
        assert_eq!(config.port, 9000);
        assert_eq!(config.database_dsn.as_deref(), Some("host=localhost"));
    }

    #[test]
    fn env_alone_builds_config() {
        let config = apply_overrides(Config::default(), vars(&[("PG_DSN", "host=db")]))
            .unwrap()
            .validate()
            .unwrap();

        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.storage, Storage::Postgres);
        assert_eq!(config.database_dsn.as_deref(), Some("host=db"));
    }

    #[test]
    fn unset_vars_leave_file_untouched() {
        let file: Config = serde_yaml::from_str("port: 8080\nstorage: memory").unwrap();

        let config = apply_overrides(file.clone(), vars(&[])).unwrap();

        assert_eq!(config, file);
    }

    #[test]
    fn invalid_env_values_are_rejected() {
        let err = apply_overrides(Config::default(), vars(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidVar { name: "PORT", .. }));

        let err = apply_overrides(Config::default(), vars(&[("STORAGE", "mongo")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidVar { name: "STORAGE", .. }));
    }
}
