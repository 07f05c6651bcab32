// config.rs
// Configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

pub const DEFAULT_PASSWORD: &str = "123456";

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding one file per storage key.
    pub data_dir: PathBuf,
    /// Slot for the debt collection document.
    pub debts_key: String,
    /// Slot for the overridable password.
    pub password_key: String,
    /// Password used while the password slot is empty.
    pub default_password: String,
    /// `tracing_subscriber::EnvFilter` directive.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            debts_key: "debts".to_string(),
            password_key: "appPassword".to_string(),
            default_password: DEFAULT_PASSWORD.to_string(),
            log_filter: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present).
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `DEBTBOOK_DATA_DIR` | Storage directory | `./data` |
    /// | `DEBTBOOK_DEBTS_KEY` | Debt collection slot | `debts` |
    /// | `DEBTBOOK_PASSWORD_KEY` | Password slot | `appPassword` |
    /// | `DEBTBOOK_DEFAULT_PASSWORD` | Password when the slot is empty | `123456` |
    /// | `DEBTBOOK_LOG` | Log filter | `info` |
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let data_dir = lookup("DEBTBOOK_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);

        let debts_key = lookup("DEBTBOOK_DEBTS_KEY").unwrap_or(defaults.debts_key);
        if !valid_key(&debts_key) {
            return Err(ConfigError::InvalidKey("DEBTBOOK_DEBTS_KEY"));
        }

        let password_key = lookup("DEBTBOOK_PASSWORD_KEY").unwrap_or(defaults.password_key);
        if !valid_key(&password_key) {
            return Err(ConfigError::InvalidKey("DEBTBOOK_PASSWORD_KEY"));
        }
        if password_key == debts_key {
            return Err(ConfigError::SharedKey);
        }

        let default_password =
            lookup("DEBTBOOK_DEFAULT_PASSWORD").unwrap_or(defaults.default_password);
        if default_password.is_empty() {
            return Err(ConfigError::EmptyDefaultPassword);
        }

        let log_filter = lookup("DEBTBOOK_LOG").unwrap_or(defaults.log_filter);

        Ok(Self {
            data_dir,
            debts_key,
            password_key,
            default_password,
            log_filter,
        })
    }
}

// Keys become file names under `data_dir`.
fn valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be non-empty and use only [A-Za-z0-9_-]")]
    InvalidKey(&'static str),

    #[error("debt and password slots must use different keys")]
    SharedKey,

    #[error("DEBTBOOK_DEFAULT_PASSWORD must not be empty")]
    EmptyDefaultPassword,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert_eq!(config.debts_key, "debts");
        assert_eq!(config.password_key, "appPassword");
        assert_eq!(config.default_password, "123456");
    }

    #[test]
    fn overrides_are_read() {
        let config = Config::from_lookup(lookup_from(&[
            ("DEBTBOOK_DATA_DIR", "/tmp/ledger"),
            ("DEBTBOOK_DEBTS_KEY", "ledger"),
            ("DEBTBOOK_DEFAULT_PASSWORD", "hunter2"),
        ]))
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/ledger"));
        assert_eq!(config.debts_key, "ledger");
        assert_eq!(config.default_password, "hunter2");
    }

    #[test]
    fn rejects_path_like_keys() {
        let err = Config::from_lookup(lookup_from(&[("DEBTBOOK_DEBTS_KEY", "../debts")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidKey("DEBTBOOK_DEBTS_KEY")));
    }

    #[test]
    fn rejects_shared_slot() {
        let err = Config::from_lookup(lookup_from(&[("DEBTBOOK_PASSWORD_KEY", "debts")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::SharedKey));
    }
}
