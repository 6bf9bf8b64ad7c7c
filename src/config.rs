use std::env;
use thiserror::Error;

pub const DEFAULT_MODEL: &str = "claude-haiku-4-5-20251001";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_MARKET: &str = "Canada";
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: String,
    pub model: String,
    pub bind_addr: String,
    pub supported_market: String,
    pub llm_timeout_secs: u64,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    MissingVar(&'static str),

    #[error("environment variable {var} has invalid value {value:?}")]
    InvalidVar { var: &'static str, value: String },
}

impl AppConfig {
    /// Reads the process environment once at startup.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key =
            env::var("ANTHROPIC_API_KEY").map_err(|_| ConfigError::MissingVar("ANTHROPIC_API_KEY"))?;

        let llm_timeout_secs = match env::var("LLM_TIMEOUT_SECS") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidVar {
                var: "LLM_TIMEOUT_SECS",
                value: raw,
            })?,
            Err(_) => DEFAULT_LLM_TIMEOUT_SECS,
        };

        Ok(Self {
            api_key,
            model: env::var("ANTHROPIC_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
            supported_market: env::var("SUPPORTED_MARKET")
                .unwrap_or_else(|_| DEFAULT_MARKET.to_string()),
            llm_timeout_secs,
        })
    }
}
