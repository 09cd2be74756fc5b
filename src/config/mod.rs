//! Configuration handling for the application.
//!
//! Everything is read from environment variables with sensible development
//! defaults, so the service starts with no configuration at all (it then runs
//! in degraded mode: without a generative credential every enrichment
//! operation answers with its fixed fallback).

use std::env;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Environment variable names. Keeping them public lets tests and deployment
/// tooling refer to them directly.
pub const ENV_BIND_ADDR: &str = "BIND_ADDR";
pub const ENV_ANTHROPIC_API_KEY: &str = "ANTHROPIC_API_KEY";
pub const ENV_ANTHROPIC_MODEL: &str = "ANTHROPIC_MODEL";
pub const ENV_BIAS_MODE: &str = "BIAS_MODE";

/// Default development values used when environment variables are absent.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_ANTHROPIC_MODEL: &str = "claude-sonnet-4-6";

/// Which bias strategy a deployment runs. The generative (flagged-span) mode
/// is canonical; the lexical heuristic is the legacy/alternate mode. The two
/// are never mixed within one deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BiasMode {
    #[default]
    Generative,
    Heuristic,
}

impl BiasMode {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.to_ascii_lowercase().as_str() {
            "generative" => Ok(Self::Generative),
            "heuristic" => Ok(Self::Heuristic),
            other => Err(ConfigError::InvalidValue {
                field: ENV_BIAS_MODE,
                reason: format!("expected 'generative' or 'heuristic', got '{}'", other),
            }),
        }
    }
}

/// Application runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    bind_addr: String,
    anthropic_api_key: Option<String>,
    anthropic_model: String,
    bias_mode: BiasMode,
}

impl Config {
    /// Create a new config explicitly.
    pub fn new(
        bind_addr: impl Into<String>,
        anthropic_api_key: Option<String>,
        anthropic_model: impl Into<String>,
        bias_mode: BiasMode,
    ) -> Self {
        Self {
            bind_addr: bind_addr.into(),
            anthropic_api_key,
            anthropic_model: anthropic_model.into(),
            bias_mode,
        }
    }

    /// Load from environment variables, falling back to development defaults.
    ///
    /// An absent `ANTHROPIC_API_KEY` is not an error: it puts the service in
    /// degraded mode, which is a supported deployment. A blank key is treated
    /// as absent. `BIAS_MODE` must parse when present.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = env::var(ENV_BIND_ADDR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let anthropic_api_key = env::var(ENV_ANTHROPIC_API_KEY)
            .ok()
            .filter(|key| !key.trim().is_empty());
        let anthropic_model = env::var(ENV_ANTHROPIC_MODEL)
            .unwrap_or_else(|_| DEFAULT_ANTHROPIC_MODEL.to_string());
        let bias_mode = match env::var(ENV_BIAS_MODE) {
            Ok(value) => BiasMode::parse(&value)?,
            Err(_) => BiasMode::default(),
        };
        Ok(Self {
            bind_addr,
            anthropic_api_key,
            anthropic_model,
            bias_mode,
        })
    }

    /// TCP bind address (host:port) for the HTTP server.
    pub fn bind_addr(&self) -> &str {
        &self.bind_addr
    }
    /// Credential for the generative service; `None` means degraded mode.
    pub fn anthropic_api_key(&self) -> Option<&str> {
        self.anthropic_api_key.as_deref()
    }
    /// Model identifier passed to the generative service.
    pub fn anthropic_model(&self) -> &str {
        &self.anthropic_model
    }
    /// Configured bias strategy.
    pub fn bias_mode(&self) -> BiasMode {
        self.bias_mode
    }
}

/// Errors that can occur while building a configuration.
#[derive(Debug)]
pub enum ConfigError {
    InvalidValue { field: &'static str, reason: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl Error for ConfigError {}
