// ABOUTME: Fitness coach chat route handler
// ABOUTME: Maps caller-side conversation history onto the provider role vocabulary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Nutrition Gateway Project

//! Coach chat route
//!
//! A single-turn coaching endpoint. The caller supplies the message plus any
//! prior conversation and optional nutrition-history context; nothing is
//! persisted here. Caller-side role names are mapped onto the provider's
//! role vocabulary before forwarding.

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::errors::AppError;
use crate::llm::{coach_system_prompt, ChatMessage, ChatRequest, LlmProvider, MessageRole};
use crate::resources::ServerResources;

/// Sampling temperature for coach replies (conversational, not extractive)
const COACH_TEMPERATURE: f32 = 0.7;

/// Token ceiling for coach replies
const COACH_MAX_TOKENS: u32 = 600;

// ============================================================================
// Request/Response Types
// ============================================================================

/// One prior message as the caller recorded it
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HistoryMessage {
    /// Caller-side role label ("user", "assistant", "ai", "bot", ...)
    pub role: String,
    /// Message content
    pub content: String,
}

/// Request to the coach chat endpoint
#[derive(Debug, Deserialize, Serialize)]
pub struct CoachChatRequest {
    /// The user's message
    pub message: String,
    /// Prior conversation, oldest first
    #[serde(default)]
    pub history: Vec<HistoryMessage>,
    /// Optional food-history context supplied by the caller
    #[serde(default)]
    pub nutrition_context: Option<String>,
}

/// Coach reply
#[derive(Debug, Deserialize, Serialize)]
pub struct CoachChatResponse {
    /// Free-text coaching reply
    pub reply: String,
}

// ============================================================================
// Coach Chat Routes
// ============================================================================

/// Coach chat routes handler
pub struct CoachChatRoutes;

impl CoachChatRoutes {
    /// Create the coach chat route
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/coach-chat", post(Self::coach_chat))
            .with_state(resources)
    }

    /// Generate a coaching reply
    async fn coach_chat(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<CoachChatRequest>,
    ) -> Result<Json<CoachChatResponse>, AppError> {
        if request.message.trim().is_empty() {
            return Err(AppError::invalid_input("Message cannot be empty"));
        }

        let messages = build_messages(&request);
        debug!(
            history = request.history.len(),
            "Forwarding coach chat to provider"
        );

        let chat_request = ChatRequest::new(messages)
            .with_temperature(COACH_TEMPERATURE)
            .with_max_tokens(COACH_MAX_TOKENS);

        let response = resources.provider.complete(&chat_request).await?;

        Ok(Json(CoachChatResponse {
            reply: response.content.trim().to_owned(),
        }))
    }
}

/// Assemble the provider message list from the request
///
/// System prompt first, then an optional context note, then the mapped
/// history, then the new user message.
fn build_messages(request: &CoachChatRequest) -> Vec<ChatMessage> {
    let mut messages = vec![ChatMessage::system(coach_system_prompt())];

    if let Some(context) = request
        .nutrition_context
        .as_deref()
        .filter(|c| !c.trim().is_empty())
    {
        messages.push(ChatMessage::system(format!(
            "The user's recent food log:\n{context}"
        )));
    }

    for entry in &request.history {
        messages.push(ChatMessage::new(
            MessageRole::from_client_label(&entry.role),
            entry.content.clone(),
        ));
    }

    messages.push(ChatMessage::user(request.message.clone()));
    messages
}
