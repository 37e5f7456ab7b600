// ABOUTME: Main library entry point for the Nutrition Gateway API
// ABOUTME: Exposes the nutrition extraction pipeline, LLM providers, and REST routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Nutrition Gateway Project

#![deny(unsafe_code)]

//! # Nutrition Gateway
//!
//! An LLM-backed nutrition extraction and aggregation API. Free-form food
//! descriptions (typed text, voice-derived transcripts, or image-derived food
//! lists) are turned into validated, normalized, and aggregated nutrition
//! records. A conversational fitness-coaching endpoint is exposed alongside.
//!
//! All food recognition and nutrition estimation is delegated to an upstream
//! language model (Groq by default, any OpenAI-compatible local server as an
//! alternative). The gateway's own logic is limited to prompt construction,
//! defensive response parsing and repair, bounded retry, quantity resolution,
//! and numeric aggregation.
//!
//! ## Architecture
//!
//! - **llm**: Provider abstraction for chat completion (Groq, local servers)
//! - **nutrition**: The extraction pipeline - parsing, normalization,
//!   quantity extraction, aggregation, orchestration
//! - **models**: Wire-level nutrition data structures
//! - **routes**: Thin axum handlers for the REST surface
//! - **config**: Environment-based configuration
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use nutrition_gateway::config::environment::ServerConfig;
//! use nutrition_gateway::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Nutrition Gateway configured on port {}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Configuration management from environment variables
pub mod config;

/// Unified error handling with standard error codes and `HTTP` responses
pub mod errors;

/// LLM provider abstraction layer (Groq, OpenAI-compatible local servers)
pub mod llm;

/// Logging configuration and structured logging setup
pub mod logging;

/// HTTP middleware (CORS)
pub mod middleware;

/// Nutrition data models (`FoodItem`, `NutritionRecord`, totals)
pub mod models;

/// Nutrition extraction and aggregation pipeline
pub mod nutrition;

/// Shared server state handed to route handlers
pub mod resources;

/// `HTTP` routes for the REST surface
pub mod routes;
