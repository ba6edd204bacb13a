//! Runtime configuration
//!
//! Built once at startup and injected into the controller. Nothing below
//! `main` reads the process environment.

use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_API_HOST: &str = "numbersapi.p.rapidapi.com";
pub const DEFAULT_BASE_URL: &str = "https://numbersapi.p.rapidapi.com";
pub const DEFAULT_PROMPT_TEXT: &str = "Select a date and see a fun fact!";
pub const DEFAULT_LOADING_TEXT: &str = "Fetching a fact...";
pub const DEFAULT_ERROR_TEXT: &str = "Error fetching fact.";

/// What the display shows when a fetch fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Show the configured error text
    #[default]
    Message,
    /// Show nothing
    Blank,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown error policy '{0}' (expected 'message' or 'blank')")]
    UnknownErrorPolicy(String),
}

impl FromStr for ErrorPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "message" | "error" => Ok(Self::Message),
            "blank" | "empty" | "silent" => Ok(Self::Blank),
            other => Err(ConfigError::UnknownErrorPolicy(other.to_string())),
        }
    }
}

/// Configuration for the fact lookup and its display strings
#[derive(Debug, Clone)]
pub struct FactConfig {
    /// `RapidAPI` key; absence is tolerated and simply fails authentication
    pub api_key: Option<String>,
    pub api_host: String,
    pub base_url: String,
    pub error_policy: ErrorPolicy,
    pub prompt_text: String,
    pub loading_text: String,
    pub error_text: String,
}

impl Default for FactConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_host: DEFAULT_API_HOST.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            error_policy: ErrorPolicy::default(),
            prompt_text: DEFAULT_PROMPT_TEXT.to_string(),
            loading_text: DEFAULT_LOADING_TEXT.to_string(),
            error_text: DEFAULT_ERROR_TEXT.to_string(),
        }
    }
}

impl FactConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the environment in production)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let error_policy = match lookup("DATEFACT_ERROR_POLICY") {
            Some(raw) => raw.parse()?,
            None => defaults.error_policy,
        };

        Ok(Self {
            api_key: lookup("DATEFACT_API_KEY")
                .or_else(|| lookup("EXPO_PUBLIC_KEY"))
                .filter(|k| !k.is_empty()),
            api_host: lookup("DATEFACT_API_HOST").unwrap_or(defaults.api_host),
            base_url: lookup("DATEFACT_BASE_URL").unwrap_or(defaults.base_url),
            error_policy,
            prompt_text: defaults.prompt_text,
            loading_text: defaults.loading_text,
            error_text: defaults.error_text,
        })
    }

    #[allow(dead_code)] // Builder helpers used by tests and embedders
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    #[allow(dead_code)]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    #[allow(dead_code)]
    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }
}
