// ABOUTME: Environment configuration for the flow service deployment
// ABOUTME: Parses per-flow backends, remote service, LLM provider, CORS and live analysis settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration management for production deployment

use std::collections::BTreeMap;
use std::env;
use std::fmt;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use fitness_ai_core::constants::flow_keys;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::llm;

/// Default HTTP port
pub const DEFAULT_HTTP_PORT: u16 = 8081;

/// Default remote flow service (the reference `FastAPI` app listens on 8000)
pub const DEFAULT_REMOTE_BASE_URL: &str = "http://localhost:8000";

/// Default remote call timeout
pub const DEFAULT_REMOTE_TIMEOUT_SECS: u64 = 30;

/// Default whole-request timeout for inbound HTTP requests
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

/// Default live analysis capture interval
pub const DEFAULT_LIVE_INTERVAL_SECS: u64 = 5;

/// Header carrying the authenticated user id, set by the upstream auth proxy
pub const DEFAULT_SESSION_USER_HEADER: &str = "x-authenticated-user";

/// Header carrying the authenticated user email
pub const DEFAULT_SESSION_EMAIL_HEADER: &str = "x-authenticated-email";

/// Environment type for security and other configurations
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Testing => "testing",
        })
    }
}

/// Which generation strategy a flow uses
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Render the flow's prompt template and call the generative-text provider
    Prompt,
    /// POST the input to the remote flow service
    Http,
}

impl BackendKind {
    /// Parse `prompt` or `http`
    ///
    /// # Errors
    ///
    /// Returns an error for any other value
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "prompt" | "template" => Ok(Self::Prompt),
            "http" | "remote" => Ok(Self::Http),
            other => bail!("Unknown flow backend '{other}' (expected prompt or http)"),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Prompt => "prompt",
            Self::Http => "http",
        })
    }
}

/// What a flow does when its backend fails at the transport level
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransportFailurePolicy {
    /// Log and answer with the flow's fixed fallback output
    #[default]
    Fallback,
    /// Surface the transport error to the caller
    Propagate,
}

impl TransportFailurePolicy {
    /// Parse `fallback` or `propagate`
    ///
    /// # Errors
    ///
    /// Returns an error for any other value
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "fallback" => Ok(Self::Fallback),
            "propagate" | "error" => Ok(Self::Propagate),
            other => bail!("Unknown transport failure policy '{other}'"),
        }
    }
}

impl fmt::Display for TransportFailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Fallback => "fallback",
            Self::Propagate => "propagate",
        })
    }
}

/// Which generative-text provider prompt-backed flows call
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum LlmProviderKind {
    /// Google Gemini
    #[default]
    Gemini,
    /// Any `OpenAI`-compatible server (Ollama, vLLM, ...)
    OpenAiCompatible,
}

impl LlmProviderKind {
    /// Parse from string with fallback to Gemini
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "local" | "ollama" | "vllm" | "openai" | "openai_compatible" => {
                Self::OpenAiCompatible
            }
            _ => Self::Gemini,
        }
    }
}

/// Per-flow strategy selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowSettings {
    /// Generation strategy
    pub backend: BackendKind,
    /// Behaviour on transport failure
    pub on_transport_failure: TransportFailurePolicy,
}

impl FlowSettings {
    /// Strategy used when no `FLOW_<KEY>_BACKEND` override is set
    ///
    /// The chat-style flows have always been served by the remote service;
    /// the others render local prompt templates.
    #[must_use]
    pub fn default_for(key: &str) -> Self {
        let backend = match key {
            flow_keys::MOTIVATIONAL_UPDATE | flow_keys::SMART_ASSISTANT => BackendKind::Http,
            _ => BackendKind::Prompt,
        };
        Self {
            backend,
            on_transport_failure: TransportFailurePolicy::Fallback,
        }
    }

    fn from_env(key: &str) -> Result<Self> {
        let defaults = Self::default_for(key);
        let prefix = env_prefix(key);

        let backend = match env::var(format!("{prefix}_BACKEND")) {
            Ok(value) => BackendKind::parse(&value)
                .with_context(|| format!("Invalid {prefix}_BACKEND value"))?,
            Err(_) => defaults.backend,
        };
        let on_transport_failure = match env::var(format!("{prefix}_ON_TRANSPORT_FAILURE")) {
            Ok(value) => TransportFailurePolicy::parse(&value)
                .with_context(|| format!("Invalid {prefix}_ON_TRANSPORT_FAILURE value"))?,
            Err(_) => defaults.on_transport_failure,
        };

        Ok(Self {
            backend,
            on_transport_failure,
        })
    }
}

/// `diet-plan` -> `FLOW_DIET_PLAN`
#[must_use]
pub fn env_prefix(key: &str) -> String {
    format!("FLOW_{}", key.to_uppercase().replace('-', "_"))
}

/// Remote flow service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteServiceConfig {
    /// Base URL; flow paths are appended to it
    pub base_url: String,
    /// Per-call timeout in seconds
    pub timeout_secs: u64,
}

impl RemoteServiceConfig {
    /// Per-call timeout
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Generative-text provider settings
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Selected provider
    pub provider: LlmProviderKind,
    /// Gemini API key
    #[serde(skip_serializing)]
    pub gemini_api_key: Option<String>,
    /// Gemini model
    pub gemini_model: String,
    /// Gemini API root override
    pub gemini_base_url: Option<String>,
    /// `OpenAI`-compatible base URL
    pub local_base_url: String,
    /// `OpenAI`-compatible model
    pub local_model: String,
    /// `OpenAI`-compatible API key
    #[serde(skip_serializing)]
    pub local_api_key: Option<String>,
    /// Whether the `OpenAI`-compatible model accepts images
    pub local_vision: bool,
    /// Sampling temperature for every prompt-backed call (provider default otherwise)
    pub temperature: Option<f32>,
}

impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("provider", &self.provider)
            .field("gemini_model", &self.gemini_model)
            .field("gemini_api_key", &self.gemini_api_key.as_ref().map(|_| "[REDACTED]"))
            .field("local_base_url", &self.local_base_url)
            .field("local_model", &self.local_model)
            .field("local_vision", &self.local_vision)
            .field("temperature", &self.temperature)
            .finish_non_exhaustive()
    }
}

/// Session header settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Header holding the authenticated user id
    pub user_header: String,
    /// Header holding the authenticated user email
    pub email_header: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            user_header: DEFAULT_SESSION_USER_HEADER.to_owned(),
            email_header: DEFAULT_SESSION_EMAIL_HEADER.to_owned(),
        }
    }
}

/// Complete server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP port
    pub http_port: u16,
    /// Bind address
    pub host: String,
    /// Deployment environment
    pub environment: Environment,
    /// Allowed CORS origins (`*` for any)
    pub cors_origins: Vec<String>,
    /// Inbound request timeout in seconds
    pub request_timeout_secs: u64,
    /// Remote flow service
    pub remote: RemoteServiceConfig,
    /// Generative-text provider
    pub llm: LlmConfig,
    /// Per-flow strategy, keyed by flow key
    pub flows: BTreeMap<String, FlowSettings>,
    /// Live analysis capture interval in seconds
    pub live_interval_secs: u64,
    /// Session headers
    pub session: SessionConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error when a variable is present but unparsable, or when
    /// the resulting configuration fails [`ServerConfig::validate`]
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        if let Err(e) = dotenvy::dotenv() {
            warn!("No .env file found or failed to load: {}", e);
        }

        let mut flows = BTreeMap::new();
        for key in flow_keys::ALL {
            flows.insert(key.to_owned(), FlowSettings::from_env(key)?);
        }

        let config = Self {
            http_port: env_var_or("HTTP_PORT", &DEFAULT_HTTP_PORT.to_string())
                .parse()
                .context("Invalid HTTP_PORT value")?,
            host: env_var_or("HOST", "0.0.0.0"),
            environment: Environment::from_str_or_default(&env_var_or(
                "ENVIRONMENT",
                "development",
            )),
            cors_origins: parse_origins(&env_var_or("CORS_ALLOWED_ORIGINS", "*")),
            request_timeout_secs: env_var_or(
                "REQUEST_TIMEOUT_SECS",
                &DEFAULT_REQUEST_TIMEOUT_SECS.to_string(),
            )
            .parse()
            .context("Invalid REQUEST_TIMEOUT_SECS value")?,
            remote: RemoteServiceConfig {
                base_url: env_var_or("REMOTE_API_BASE_URL", DEFAULT_REMOTE_BASE_URL)
                    .trim_end_matches('/')
                    .to_owned(),
                timeout_secs: env_var_or(
                    "REMOTE_API_TIMEOUT_SECS",
                    &DEFAULT_REMOTE_TIMEOUT_SECS.to_string(),
                )
                .parse()
                .context("Invalid REMOTE_API_TIMEOUT_SECS value")?,
            },
            llm: LlmConfig {
                provider: LlmProviderKind::from_str_or_default(&env_var_or(
                    "LLM_PROVIDER",
                    "gemini",
                )),
                gemini_api_key: non_empty_var("GEMINI_API_KEY"),
                gemini_model: env_var_or("GEMINI_MODEL", llm::GEMINI_DEFAULT_MODEL),
                gemini_base_url: non_empty_var("GEMINI_BASE_URL"),
                local_base_url: env_var_or("LOCAL_LLM_BASE_URL", llm::LOCAL_DEFAULT_BASE_URL),
                local_model: env_var_or("LOCAL_LLM_MODEL", llm::LOCAL_DEFAULT_MODEL),
                local_api_key: non_empty_var("LOCAL_LLM_API_KEY"),
                local_vision: env_var_or("LOCAL_LLM_VISION", "false")
                    .parse()
                    .context("Invalid LOCAL_LLM_VISION value (expected true or false)")?,
                temperature: non_empty_var("LLM_TEMPERATURE")
                    .map(|value| value.parse::<f32>())
                    .transpose()
                    .context("Invalid LLM_TEMPERATURE value")?,
            },
            flows,
            live_interval_secs: env_var_or(
                "LIVE_ANALYSIS_INTERVAL_SECS",
                &DEFAULT_LIVE_INTERVAL_SECS.to_string(),
            )
            .parse()
            .context("Invalid LIVE_ANALYSIS_INTERVAL_SECS value")?,
            session: SessionConfig {
                user_header: env_var_or("SESSION_USER_HEADER", DEFAULT_SESSION_USER_HEADER)
                    .to_lowercase(),
                email_header: env_var_or("SESSION_EMAIL_HEADER", DEFAULT_SESSION_EMAIL_HEADER)
                    .to_lowercase(),
            },
        };

        config.validate()?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Configuration with every default and no secrets, for tests and tooling
    #[must_use]
    pub fn defaults() -> Self {
        Self {
            http_port: DEFAULT_HTTP_PORT,
            host: "127.0.0.1".to_owned(),
            environment: Environment::Testing,
            cors_origins: vec!["*".to_owned()],
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            remote: RemoteServiceConfig {
                base_url: DEFAULT_REMOTE_BASE_URL.to_owned(),
                timeout_secs: DEFAULT_REMOTE_TIMEOUT_SECS,
            },
            llm: LlmConfig {
                provider: LlmProviderKind::Gemini,
                gemini_api_key: None,
                gemini_model: llm::GEMINI_DEFAULT_MODEL.to_owned(),
                gemini_base_url: None,
                local_base_url: llm::LOCAL_DEFAULT_BASE_URL.to_owned(),
                local_model: llm::LOCAL_DEFAULT_MODEL.to_owned(),
                local_api_key: None,
                local_vision: false,
                temperature: None,
            },
            flows: flow_keys::ALL
                .iter()
                .map(|key| ((*key).to_owned(), FlowSettings::default_for(key)))
                .collect(),
            live_interval_secs: DEFAULT_LIVE_INTERVAL_SECS,
            session: SessionConfig::default(),
        }
    }

    /// Settings for one flow, falling back to its defaults
    #[must_use]
    pub fn flow(&self, key: &str) -> FlowSettings {
        self.flows
            .get(key)
            .copied()
            .unwrap_or_else(|| FlowSettings::default_for(key))
    }

    /// Whether any flow is configured for the prompt backend
    #[must_use]
    pub fn uses_prompt_backend(&self) -> bool {
        self.flows
            .values()
            .any(|settings| settings.backend == BackendKind::Prompt)
    }

    /// Inbound request timeout
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Live analysis capture interval
    #[must_use]
    pub const fn live_interval(&self) -> Duration {
        Duration::from_secs(self.live_interval_secs)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid setting
    pub fn validate(&self) -> Result<()> {
        if self.http_port == 0 {
            bail!("HTTP_PORT cannot be 0");
        }
        if self.live_interval_secs == 0 {
            bail!("LIVE_ANALYSIS_INTERVAL_SECS must be at least 1");
        }
        if self.remote.timeout_secs == 0 {
            bail!("REMOTE_API_TIMEOUT_SECS must be at least 1");
        }
        if self.request_timeout_secs == 0 {
            bail!("REQUEST_TIMEOUT_SECS must be at least 1");
        }
        // Remote calls must time out first so the fallback can still answer
        if self.request_timeout_secs <= self.remote.timeout_secs {
            bail!(
                "REQUEST_TIMEOUT_SECS ({}) must exceed REMOTE_API_TIMEOUT_SECS ({})",
                self.request_timeout_secs,
                self.remote.timeout_secs
            );
        }
        if let Some(temperature) = self.llm.temperature {
            if !(0.0..=2.0).contains(&temperature) {
                bail!("LLM_TEMPERATURE must be between 0.0 and 2.0, got {temperature}");
            }
        }
        if !self.remote.base_url.starts_with("http://")
            && !self.remote.base_url.starts_with("https://")
        {
            bail!(
                "REMOTE_API_BASE_URL must be an http(s) URL, got '{}'",
                self.remote.base_url
            );
        }
        if self.session.user_header.trim().is_empty() {
            bail!("SESSION_USER_HEADER cannot be empty");
        }

        if self.uses_prompt_backend()
            && self.llm.provider == LlmProviderKind::Gemini
            && self.llm.gemini_api_key.is_none()
        {
            if self.environment.is_production() {
                bail!("GEMINI_API_KEY is required when any flow uses the prompt backend");
            }
            warn!("GEMINI_API_KEY not set; prompt-backed flows will fail until it is provided");
        }

        if self.environment.is_production() && self.cors_origins.iter().any(|o| o == "*") {
            warn!("CORS_ALLOWED_ORIGINS is '*' in production");
        }

        Ok(())
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        let flows = self
            .flows
            .iter()
            .map(|(key, settings)| {
                format!(
                    "\n   - {key}: {} ({})",
                    settings.backend, settings.on_transport_failure
                )
            })
            .collect::<String>();

        format!(
            "Fitness AI Server Configuration:\n\
             - HTTP: {}:{}\n\
             - Environment: {}\n\
             - Remote Service: {} (timeout {}s)\n\
             - LLM Provider: {:?} ({})\n\
             - Gemini API Key: {}\n\
             - CORS Origins: {}\n\
             - Live Analysis Interval: {}s\n\
             - Session Header: {}\n\
             - Flows:{flows}",
            self.host,
            self.http_port,
            self.environment,
            self.remote.base_url,
            self.remote.timeout_secs,
            self.llm.provider,
            match self.llm.provider {
                LlmProviderKind::Gemini => &self.llm.gemini_model,
                LlmProviderKind::OpenAiCompatible => &self.llm.local_model,
            },
            if self.llm.gemini_api_key.is_some() {
                "Configured"
            } else {
                "Missing"
            },
            self.cors_origins.join(", "),
            self.live_interval_secs,
            self.session.user_header,
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Parse comma-separated CORS origins
fn parse_origins(origins_str: &str) -> Vec<String> {
    if origins_str.trim() == "*" {
        vec!["*".to_owned()]
    } else {
        origins_str
            .split(',')
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    const FLOW_VARS: [&str; 2] = [
        "FLOW_DIET_PLAN_BACKEND",
        "FLOW_DIET_PLAN_ON_TRANSPORT_FAILURE",
    ];

    fn clear_flow_vars() {
        for var in FLOW_VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_parse_origins() {
        assert_eq!(parse_origins("*"), vec!["*"]);
        assert_eq!(
            parse_origins("http://localhost:3000, https://app.example.com,"),
            vec!["http://localhost:3000", "https://app.example.com"]
        );
    }

    #[test]
    fn test_env_prefix() {
        assert_eq!(env_prefix("diet-plan"), "FLOW_DIET_PLAN");
        assert_eq!(env_prefix("workout-feedback"), "FLOW_WORKOUT_FEEDBACK");
    }

    #[test]
    fn test_default_backends() {
        let config = ServerConfig::defaults();
        assert_eq!(config.flow("diet-plan").backend, BackendKind::Prompt);
        assert_eq!(config.flow("smart-assistant").backend, BackendKind::Http);
        assert_eq!(
            config.flow("motivational-update").on_transport_failure,
            TransportFailurePolicy::Fallback
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_flow_settings_from_env() {
        clear_flow_vars();
        env::set_var("FLOW_DIET_PLAN_BACKEND", "http");
        env::set_var("FLOW_DIET_PLAN_ON_TRANSPORT_FAILURE", "propagate");

        let settings = FlowSettings::from_env("diet-plan").unwrap();
        assert_eq!(settings.backend, BackendKind::Http);
        assert_eq!(
            settings.on_transport_failure,
            TransportFailurePolicy::Propagate
        );

        env::set_var("FLOW_DIET_PLAN_BACKEND", "carrier-pigeon");
        assert!(FlowSettings::from_env("diet-plan").is_err());
        clear_flow_vars();
    }

    #[test]
    fn test_validation_rejects_zero_interval_and_bad_url() {
        let mut config = ServerConfig::defaults();
        config.live_interval_secs = 0;
        assert!(config.validate().is_err());

        let mut config = ServerConfig::defaults();
        config.remote.base_url = "localhost:8000".to_owned();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_summary_hides_secrets() {
        let mut config = ServerConfig::defaults();
        config.llm.gemini_api_key = Some("super-secret".to_owned());
        let summary = config.summary();
        assert!(!summary.contains("super-secret"));
        assert!(summary.contains("Gemini API Key: Configured"));
        assert!(summary.contains("diet-plan: prompt (fallback)"));
    }
}
