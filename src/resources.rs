// ABOUTME: Shared server state handed to route handlers
// ABOUTME: Bundles configuration, the LLM provider, and the nutrition pipeline
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Nutrition Gateway Project

//! Server resources
//!
//! Everything route handlers need, constructed once at startup and shared
//! behind an `Arc`. Read-only after initialization - request handling never
//! mutates it, so no locks are required.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::llm::LlmProvider;
use crate::nutrition::NutritionPipeline;

/// Shared, read-only server state
pub struct ServerResources {
    /// Loaded configuration
    pub config: ServerConfig,
    /// The upstream model capability (also used directly by coach chat)
    pub provider: Arc<dyn LlmProvider>,
    /// The nutrition extraction pipeline
    pub pipeline: NutritionPipeline,
}

impl ServerResources {
    /// Assemble server resources from configuration and a provider
    #[must_use]
    pub fn new(config: ServerConfig, provider: Arc<dyn LlmProvider>) -> Self {
        let pipeline = NutritionPipeline::new(
            Arc::clone(&provider),
            config.llm.clone(),
            config.nutrition.clone(),
        );

        Self {
            config,
            provider,
            pipeline,
        }
    }
}
