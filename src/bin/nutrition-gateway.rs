// ABOUTME: Server binary for the Nutrition Gateway API
// ABOUTME: Loads configuration, initializes logging, and serves the REST surface
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Nutrition Gateway Project

//! # Nutrition Gateway Server Binary
//!
//! Starts the LLM-backed nutrition extraction API with environment-based
//! configuration and structured logging.

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use nutrition_gateway::{
    config::environment::ServerConfig,
    llm::{ChatProvider, LlmProvider},
    logging,
    middleware::setup_cors,
    resources::ServerResources,
    routes,
};

#[derive(Parser)]
#[command(name = "nutrition-gateway")]
#[command(about = "Nutrition Gateway - LLM-backed nutrition extraction API")]
struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration from environment
    let mut config = ServerConfig::from_env()?;

    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    // Initialize production logging
    logging::init_from_env()?;

    info!("Starting Nutrition Gateway");
    info!("{}", config.summary());

    // Initialize the upstream model provider
    let provider: Arc<dyn LlmProvider> = Arc::new(ChatProvider::from_config(&config.llm)?);

    // Request timeout covering the worst-case pipeline invocation: every
    // retry attempt at the full model timeout, plus the constant delays.
    let attempts = u64::from(config.nutrition.retry.max_attempts);
    let request_budget = Duration::from_secs(
        config.llm.timeout_secs * attempts
            + config.nutrition.retry.delay_secs * attempts.saturating_sub(1)
            + 5,
    );

    let cors = setup_cors(&config);
    let port = config.http_port;
    let resources = Arc::new(ServerResources::new(config, provider));

    let app = routes::router(resources)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(request_budget))
        .layer(cors);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;
    info!("Nutrition Gateway listening on port {}", port);

    axum::serve(listener, app).await?;

    Ok(())
}
