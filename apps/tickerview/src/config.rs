use std::env;
use thiserror::Error;

pub const API_KEY_VAR: &str = "AlphaVantageKey";

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{0} environment variable not found")]
    MissingVar(&'static str),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
}

impl Config {
    /// Reads the configuration from the process environment. Call
    /// `dotenv().ok()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingVar(API_KEY_VAR))?;

        Ok(Config { api_key })
    }

    /// First characters of the key, for log lines.
    pub fn masked_key(&self) -> String {
        format!("{}...", self.api_key.chars().take(4).collect::<String>())
    }
}
