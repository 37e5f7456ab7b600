// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Handles environment variables, LLM parameters, and pipeline tuning
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Nutrition Gateway Project

//! Environment-based configuration management for production deployment

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use tracing::warn;

use crate::errors::{AppError, AppResult};

/// Default HTTP port
const DEFAULT_HTTP_PORT: u16 = 8081;

/// Default bound on the number of foods accepted in one request
const DEFAULT_MAX_FOODS: usize = 10;

/// Default total invocation attempts against the upstream model
const DEFAULT_RETRY_ATTEMPTS: u32 = 3;

/// Default constant delay between invocation attempts, in seconds
const DEFAULT_RETRY_DELAY_SECS: u64 = 2;

/// Default token ceiling for nutrition extraction completions
const DEFAULT_MAX_TOKENS: u32 = 700;

/// Default HTTP timeout for upstream model calls, in seconds
const DEFAULT_LLM_TIMEOUT_SECS: u64 = 40;

/// Strongly typed log level configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages (default)
    #[default]
    Info,
    /// Debug detail
    Debug,
    /// Full trace output
    Trace,
}

impl LogLevel {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// Environment type for deployment-specific behavior
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development (default)
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Test runs
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
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// LLM provider selection
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LlmProviderType {
    /// Groq provider - LPU-accelerated inference for Llama models (default)
    #[default]
    Groq,
    /// Local LLM provider - `OpenAI`-compatible endpoint (Ollama, vLLM, `LocalAI`)
    Local,
}

impl LlmProviderType {
    /// Environment variable name for LLM provider selection
    pub const ENV_VAR: &'static str = "NUTRITION_LLM_PROVIDER";

    /// Parse from string with fallback to default
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "local" | "ollama" | "vllm" | "localai" => Self::Local,
            _ => Self::Groq,
        }
    }

    /// Load from environment variable
    #[must_use]
    pub fn from_env() -> Self {
        env::var(Self::ENV_VAR)
            .map(|s| Self::from_str_or_default(&s))
            .unwrap_or_default()
    }
}

impl std::fmt::Display for LlmProviderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Groq => write!(f, "groq"),
            Self::Local => write!(f, "local"),
        }
    }
}

/// Upstream model configuration
///
/// Temperature is pinned to 0 and the token ceiling is fixed so the model's
/// output stays schema-stable and bounded in latency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Which provider backs the pipeline
    pub provider: LlmProviderType,
    /// Model override; the provider's default model is used when unset
    pub model: Option<String>,
    /// Sampling temperature for nutrition extraction
    pub temperature: f32,
    /// Token ceiling for nutrition extraction completions
    pub max_tokens: u32,
    /// HTTP timeout for a single upstream call
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: LlmProviderType::Groq,
            model: None,
            temperature: 0.0,
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout_secs: DEFAULT_LLM_TIMEOUT_SECS,
        }
    }
}

/// Retry policy for upstream model invocations
///
/// The delay is constant between attempts; there is no exponential backoff,
/// jitter, or circuit breaker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total invocation attempts (initial call included)
    pub max_attempts: u32,
    /// Constant delay between attempts, in seconds
    pub delay_secs: u64,
}

impl RetryConfig {
    /// Delay between attempts as a [`Duration`]
    #[must_use]
    pub const fn delay(&self) -> Duration {
        Duration::from_secs(self.delay_secs)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_RETRY_ATTEMPTS,
            delay_secs: DEFAULT_RETRY_DELAY_SECS,
        }
    }
}

/// Pipeline-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NutritionConfig {
    /// Maximum number of foods accepted in a single request
    pub max_foods: usize,
    /// Retry policy for upstream invocations
    pub retry: RetryConfig,
}

impl Default for NutritionConfig {
    fn default() -> Self {
        Self {
            max_foods: DEFAULT_MAX_FOODS,
            retry: RetryConfig::default(),
        }
    }
}

/// Complete server configuration loaded from the environment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP port to listen on
    pub http_port: u16,
    /// Log verbosity
    pub log_level: LogLevel,
    /// Deployment environment
    pub environment: Environment,
    /// Comma-separated allowed CORS origins; "*" allows any
    pub cors_allowed_origins: String,
    /// Upstream model configuration
    pub llm: LlmConfig,
    /// Pipeline configuration
    pub nutrition: NutritionConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// A `.env` file is loaded first when present, matching the original
    /// deployment workflow.
    ///
    /// # Errors
    ///
    /// Returns an error if a set environment variable fails to parse or a
    /// value is out of range.
    pub fn from_env() -> AppResult<Self> {
        if let Err(e) = dotenvy::dotenv() {
            warn!("No .env file found or failed to load: {}", e);
        }

        let config = Self {
            http_port: parse_env_or("HTTP_PORT", DEFAULT_HTTP_PORT)
                .map_err(|e| AppError::config(e.to_string()))?,
            log_level: LogLevel::from_str_or_default(
                &env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
            ),
            environment: Environment::from_str_or_default(
                &env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            ),
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| "*".into()),
            llm: LlmConfig {
                provider: LlmProviderType::from_env(),
                model: env::var("NUTRITION_LLM_MODEL").ok().filter(|m| !m.is_empty()),
                temperature: parse_env_or("NUTRITION_LLM_TEMPERATURE", 0.0_f32)
                    .map_err(|e| AppError::config(e.to_string()))?,
                max_tokens: parse_env_or("NUTRITION_LLM_MAX_TOKENS", DEFAULT_MAX_TOKENS)
                    .map_err(|e| AppError::config(e.to_string()))?,
                timeout_secs: parse_env_or("NUTRITION_LLM_TIMEOUT", DEFAULT_LLM_TIMEOUT_SECS)
                    .map_err(|e| AppError::config(e.to_string()))?,
            },
            nutrition: NutritionConfig {
                max_foods: parse_env_or("NUTRITION_MAX_FOODS", DEFAULT_MAX_FOODS)
                    .map_err(|e| AppError::config(e.to_string()))?,
                retry: RetryConfig {
                    max_attempts: parse_env_or("NUTRITION_RETRY_ATTEMPTS", DEFAULT_RETRY_ATTEMPTS)
                        .map_err(|e| AppError::config(e.to_string()))?,
                    delay_secs: parse_env_or("NUTRITION_RETRY_DELAY", DEFAULT_RETRY_DELAY_SECS)
                        .map_err(|e| AppError::config(e.to_string()))?,
                },
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the loaded configuration
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` when a value is out of its acceptable range.
    pub fn validate(&self) -> AppResult<()> {
        if self.nutrition.max_foods == 0 {
            return Err(AppError::config(
                "NUTRITION_MAX_FOODS must be at least 1",
            ));
        }
        if self.nutrition.retry.max_attempts == 0 {
            return Err(AppError::config(
                "NUTRITION_RETRY_ATTEMPTS must be at least 1",
            ));
        }
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(AppError::config(
                "NUTRITION_LLM_TEMPERATURE must be between 0.0 and 2.0",
            ));
        }
        Ok(())
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "port={} env={} provider={} model={} max_foods={} retry={}x{}s",
            self.http_port,
            self.environment,
            self.llm.provider,
            self.llm.model.as_deref().unwrap_or("(provider default)"),
            self.nutrition.max_foods,
            self.nutrition.retry.max_attempts,
            self.nutrition.retry.delay_secs,
        )
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: DEFAULT_HTTP_PORT,
            log_level: LogLevel::default(),
            environment: Environment::default(),
            cors_allowed_origins: "*".into(),
            llm: LlmConfig::default(),
            nutrition: NutritionConfig::default(),
        }
    }
}

/// Parse an environment variable, falling back to a default when unset
fn parse_env_or<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("Invalid {key} value: {raw}")),
        Err(_) => Ok(default),
    }
}
