// ABOUTME: Health check route handlers for service monitoring and status endpoints
// ABOUTME: Provides system health, upstream readiness, and the root status banner
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Nutrition Gateway Project

//! Health check routes for service monitoring
//!
//! Provides health and readiness endpoints for monitoring and load balancer
//! health checks, plus the root status banner. Readiness probes the upstream
//! model provider, since the gateway is useless without it.

use axum::{extract::State, routing::get, Json, Router};
use std::sync::Arc;

use crate::llm::LlmProvider;
use crate::resources::ServerResources;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/", get(Self::root))
            .route("/health", get(Self::health))
            .route("/ready", get(Self::ready))
            .with_state(resources)
    }

    /// Root status banner
    async fn root() -> Json<serde_json::Value> {
        Json(serde_json::json!({
            "status": "Nutrition API running"
        }))
    }

    /// Liveness: the process is up
    async fn health() -> Json<serde_json::Value> {
        Json(serde_json::json!({
            "status": "healthy",
            "timestamp": chrono::Utc::now().to_rfc3339()
        }))
    }

    /// Readiness: the upstream model provider answers
    async fn ready(State(resources): State<Arc<ServerResources>>) -> Json<serde_json::Value> {
        let upstream = resources
            .provider
            .health_check()
            .await
            .unwrap_or(false);
        let status = if upstream { "ready" } else { "degraded" };

        Json(serde_json::json!({
            "status": status,
            "upstream": upstream,
            "provider": resources.provider.name(),
            "timestamp": chrono::Utc::now().to_rfc3339()
        }))
    }
}
