// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Handles environment configs, LLM parameters, and pipeline tuning
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Nutrition Gateway Project

//! Configuration module for the Nutrition Gateway
//!
//! All tunable behavior lives here: the HTTP port, logging verbosity, the
//! upstream model selection and hyperparameters, and the pipeline's retry
//! and input-bound policy. Configuration is read once at startup; pipeline
//! logic never consults ambient environment state.

/// Environment and server configuration
pub mod environment;

pub use environment::{
    Environment, LlmConfig, LlmProviderType, LogLevel, NutritionConfig, RetryConfig, ServerConfig,
};
