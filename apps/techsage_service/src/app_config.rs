use std::{str::FromStr, time::Duration};
use techsage_llm::{gemini, LLMClientConfig, ModelPreference};

use crate::app_error::ConfigError;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: String,
    pub host: String,
    pub port: u16,
    pub request_timeout: Duration,
    pub session_idle: Duration,
    pub llm: LLMClientConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`; unset or blank keys take defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let environment = get("APP_ENVIRONMENT").unwrap_or_else(|| "dev".to_string());
        let host = get("APP_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_or(get("APP_PORT"), "APP_PORT", 8000u16)?;
        let request_timeout =
            Duration::from_secs(parse_or(get("REQUEST_TIMEOUT_SECS"), "REQUEST_TIMEOUT_SECS", 200u64)?);
        let session_idle =
            Duration::from_secs(parse_or(get("SESSION_IDLE_SECS"), "SESSION_IDLE_SECS", 3600u64)?);
        let llm_timeout =
            Duration::from_secs(parse_or(get("LLM_TIMEOUT_SECS"), "LLM_TIMEOUT_SECS", 180u64)?);
        let base_url =
            get("GEMINI_API_BASE_URL").unwrap_or_else(|| gemini::DEFAULT_BASE_URL.to_string());

        let model_preference = match get("MODEL_PREFERENCES") {
            Some(raw) => {
                let preference = ModelPreference::new(raw.split(','));
                if preference.terms().is_empty() {
                    return Err(ConfigError::Invalid(
                        "MODEL_PREFERENCES must name at least one model term".to_string(),
                    ));
                }
                preference
            }
            None => ModelPreference::default(),
        };

        if request_timeout.is_zero() || llm_timeout.is_zero() || session_idle.is_zero() {
            return Err(ConfigError::Invalid("timeouts must be positive".to_string()));
        }

        Ok(Self {
            environment,
            host,
            port,
            request_timeout,
            session_idle,
            llm: LLMClientConfig {
                base_url,
                timeout: llm_timeout,
                model_preference,
            },
        })
    }

    pub fn is_dev(&self) -> bool {
        self.environment == "dev"
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: FromStr>(value: Option<String>, key: &str, default: T) -> Result<T, ConfigError> {
    match value {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("{} has invalid value '{}'", key, raw))),
        None => Ok(default),
    }
}
