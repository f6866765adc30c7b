//! Connection configuration. Environment variables only, no config
//! files, no persisted state.

use std::fmt;

pub const URL_VAR: &str = "SUPABASE_URL";
pub const KEY_VAR: &str = "SUPABASE_ANON_KEY";

#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Project base URL, no trailing slash.
    pub base_url: String,
    pub api_key: String,
}

#[derive(Debug)]
pub enum ConfigError {
    /// The variable is unset or empty after trimming.
    Missing(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing(var) => write!(f, "missing {var} environment variable"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl StoreConfig {
    /// Resolve from the environment. Values are trimmed; empty counts as
    /// missing.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: require(URL_VAR)?.trim_end_matches('/').to_string(),
            api_key: require(KEY_VAR)?,
        })
    }
}

fn require(var: &'static str) -> Result<String, ConfigError> {
    match std::env::var(var) {
        Ok(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                Err(ConfigError::Missing(var))
            } else {
                Ok(trimmed.to_string())
            }
        }
        Err(_) => Err(ConfigError::Missing(var)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test so the fixed env var names are never raced by a
    // parallel test in this module.
    #[test]
    fn from_env_resolution() {
        std::env::remove_var(URL_VAR);
        std::env::remove_var(KEY_VAR);
        assert!(matches!(StoreConfig::from_env(), Err(ConfigError::Missing(URL_VAR))));

        std::env::set_var(URL_VAR, "https://example.supabase.co/");
        std::env::set_var(KEY_VAR, "   ");
        assert!(matches!(StoreConfig::from_env(), Err(ConfigError::Missing(KEY_VAR))));

        std::env::set_var(KEY_VAR, "  anon_key  ");
        let config = StoreConfig::from_env().unwrap();
        assert_eq!(config.base_url, "https://example.supabase.co");
        assert_eq!(config.api_key, "anon_key");

        std::env::remove_var(URL_VAR);
        std::env::remove_var(KEY_VAR);
    }
}
