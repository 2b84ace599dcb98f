use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "https://api.platform.opentargets.org/api/v4/graphql";
pub const DEFAULT_GENE_ID: &str = "ENSG00000139618";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

/// Runtime settings resolved from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_url: String,
    pub export_dir: PathBuf,
    pub request_timeout: Duration,
    pub default_gene_id: String,
    pub log_file: PathBuf,
    pub debug: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            export_dir: PathBuf::from("./exports"),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            default_gene_id: DEFAULT_GENE_ID.to_string(),
            log_file: PathBuf::from("essentiality-map.log"),
            debug: false,
        }
    }
}

impl AppConfig {
    /// Build from any key lookup; unset or blank keys fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let request_timeout = match get("REQUEST_TIMEOUT_SECS") {
            Some(value) => {
                let secs = value
                    .trim()
                    .parse::<u64>()
                    .ok()
                    .filter(|secs| *secs > 0)
                    .ok_or(ConfigError::InvalidValue {
                        name: "REQUEST_TIMEOUT_SECS",
                        value,
                    })?;
                Duration::from_secs(secs)
            }
            None => defaults.request_timeout,
        };

        Ok(Self {
            api_url: get("ESSENTIALITY_API_URL").unwrap_or(defaults.api_url),
            export_dir: get("EXPORT_DIR").map_or(defaults.export_dir, PathBuf::from),
            request_timeout,
            default_gene_id: get("DEFAULT_GENE_ID").unwrap_or(defaults.default_gene_id),
            log_file: get("LOG_FILE").map_or(defaults.log_file, PathBuf::from),
            debug: get("DEBUG").is_some_and(|value| value.trim() != "0"),
        })
    }
}

/// Initializes the application configuration from `.env` and the process environment
pub fn init_app_config() -> Result<AppConfig, ConfigError> {
    // Load environment variables from .env file
    dotenv().ok();

    AppConfig::from_lookup(|key| env::var(key).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_set() {
        assert_eq!(AppConfig::from_lookup(lookup(&[])), Ok(AppConfig::default()));
    }

    #[test]
    fn reads_overrides() -> Result<(), ConfigError> {
        let config = AppConfig::from_lookup(lookup(&[
            ("ESSENTIALITY_API_URL", "http://localhost:4000/graphql"),
            ("EXPORT_DIR", "/tmp/out"),
            ("REQUEST_TIMEOUT_SECS", "5"),
            ("DEFAULT_GENE_ID", "ENSG00000141510"),
        ]))?;

        assert_eq!(config.api_url, "http://localhost:4000/graphql");
        assert_eq!(config.export_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.default_gene_id, "ENSG00000141510");
        assert!(!config.debug);
        Ok(())
    }

    #[test]
    fn blank_values_fall_back_to_defaults() -> Result<(), ConfigError> {
        let config = AppConfig::from_lookup(lookup(&[("EXPORT_DIR", "  ")]))?;
        assert_eq!(config.export_dir, PathBuf::from("./exports"));
        Ok(())
    }

    #[test]
    fn rejects_bad_timeout() {
        for value in ["abc", "0"] {
            let result = AppConfig::from_lookup(lookup(&[("REQUEST_TIMEOUT_SECS", value)]));
            assert_eq!(
                result,
                Err(ConfigError::InvalidValue {
                    name: "REQUEST_TIMEOUT_SECS",
                    value: value.to_string(),
                })
            );
        }
    }
}
