// ABOUTME: Unified LLM provider selector for runtime provider switching
// ABOUTME: Abstracts over Groq and local providers based on configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Nutrition Gateway Project

//! # LLM Provider Selector
//!
//! This module provides a unified interface over the concrete providers so
//! the rest of the gateway does not care which backend is configured.
//!
//! ## Configuration
//!
//! Set the `NUTRITION_LLM_PROVIDER` environment variable:
//! - `groq` (default): Groq's cloud inference (requires `GROQ_API_KEY`)
//! - `local`/`ollama`/`vllm`/`localai`: any `OpenAI`-compatible local server

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use super::{ChatRequest, ChatResponse, GroqProvider, LlmProvider, OpenAiCompatibleProvider};
use crate::config::{LlmConfig, LlmProviderType};
use crate::errors::AppError;

/// Unified chat provider that wraps Groq or a local LLM
///
/// This enum provides a consistent interface regardless of which underlying
/// provider is configured.
pub enum ChatProvider {
    /// Groq provider for fast, cost-effective inference
    Groq(GroqProvider),
    /// Local LLM provider via `OpenAI`-compatible API (Ollama, vLLM, `LocalAI`)
    Local(OpenAiCompatibleProvider),
}

impl ChatProvider {
    /// Create a provider from the loaded server configuration
    ///
    /// Credentials still come from the environment (`GROQ_API_KEY`,
    /// `LOCAL_LLM_*`); everything else is taken from the config struct.
    ///
    /// # Errors
    ///
    /// Returns an error if the required API key environment variable is
    /// missing for the selected provider.
    pub fn from_config(config: &LlmConfig) -> Result<Self, AppError> {
        info!(
            "Initializing LLM provider: {} (set {} to change)",
            config.provider,
            LlmProviderType::ENV_VAR
        );

        let provider = match config.provider {
            LlmProviderType::Groq => Self::Groq(GroqProvider::from_env_with_timeout(
                Duration::from_secs(config.timeout_secs),
            )?),
            LlmProviderType::Local => Self::Local(OpenAiCompatibleProvider::from_env()?),
        };

        info!(
            "Provider {} initialized with model: {}",
            provider.display_name(),
            config
                .model
                .as_deref()
                .unwrap_or_else(|| provider.default_model())
        );

        Ok(provider)
    }

    /// Get the provider type
    #[must_use]
    pub const fn provider_type(&self) -> LlmProviderType {
        match self {
            Self::Groq(_) => LlmProviderType::Groq,
            Self::Local(_) => LlmProviderType::Local,
        }
    }
}

impl fmt::Debug for ChatProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Groq(_) => f.debug_tuple("ChatProvider::Groq").finish(),
            Self::Local(_) => f.debug_tuple("ChatProvider::Local").finish(),
        }
    }
}

// Delegate the LlmProvider trait to the underlying provider
#[async_trait]
impl LlmProvider for ChatProvider {
    fn name(&self) -> &'static str {
        match self {
            Self::Groq(p) => p.name(),
            Self::Local(p) => p.name(),
        }
    }

    fn display_name(&self) -> &'static str {
        match self {
            Self::Groq(p) => p.display_name(),
            Self::Local(p) => p.display_name(),
        }
    }

    fn default_model(&self) -> &str {
        match self {
            Self::Groq(p) => p.default_model(),
            Self::Local(p) => p.default_model(),
        }
    }

    fn available_models(&self) -> &'static [&'static str] {
        match self {
            Self::Groq(p) => p.available_models(),
            Self::Local(p) => p.available_models(),
        }
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        match self {
            Self::Groq(p) => p.complete(request).await,
            Self::Local(p) => p.complete(request).await,
        }
    }

    async fn health_check(&self) -> Result<bool, AppError> {
        match self {
            Self::Groq(p) => p.health_check().await,
            Self::Local(p) => p.health_check().await,
        }
    }
}
