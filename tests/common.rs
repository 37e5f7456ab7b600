// ABOUTME: Shared fixtures for integration tests
// ABOUTME: Scripted stub LlmProvider and server-resource builders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Nutrition Gateway Project

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use nutrition_gateway::config::{NutritionConfig, RetryConfig, ServerConfig};
use nutrition_gateway::errors::AppError;
use nutrition_gateway::llm::{ChatRequest, ChatResponse, LlmProvider};
use nutrition_gateway::resources::ServerResources;

/// One scripted provider turn
#[derive(Debug, Clone)]
pub enum StubTurn {
    /// Return this text as the completion content
    Reply(String),
    /// Fail the call with a transient-style error
    Fail,
}

/// Deterministic stand-in for the upstream model
///
/// Pops scripted turns in order and counts invocation attempts so tests can
/// assert exactly how many calls the retry policy made.
pub struct StubLlmProvider {
    script: Mutex<VecDeque<StubTurn>>,
    attempts: AtomicUsize,
}

impl StubLlmProvider {
    pub fn new(turns: Vec<StubTurn>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(turns.into()),
            attempts: AtomicUsize::new(0),
        })
    }

    /// Stub that always answers with the same text
    pub fn replying(text: &str) -> Arc<Self> {
        Self::new(vec![StubTurn::Reply(text.to_owned())])
    }

    /// Stub that fails every call
    pub fn always_failing() -> Arc<Self> {
        Self::new(vec![])
    }

    /// Number of completion attempts made against this stub
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmProvider for StubLlmProvider {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn display_name(&self) -> &'static str {
        "Scripted stub"
    }

    fn default_model(&self) -> &str {
        "stub-model"
    }

    fn available_models(&self) -> &'static [&'static str] {
        &["stub-model"]
    }

    async fn complete(&self, _request: &ChatRequest) -> Result<ChatResponse, AppError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);

        let turn = self.script.lock().unwrap().pop_front();
        match turn {
            Some(StubTurn::Reply(content)) => Ok(ChatResponse {
                content,
                model: "stub-model".to_owned(),
                usage: None,
                finish_reason: Some("stop".to_owned()),
            }),
            // An exhausted script keeps failing, like a dead upstream
            Some(StubTurn::Fail) | None => {
                Err(AppError::upstream_unavailable("stub: scripted failure"))
            }
        }
    }

    async fn health_check(&self) -> Result<bool, AppError> {
        Ok(true)
    }
}

/// Server config tuned for tests: no retry sleeps
pub fn test_config() -> ServerConfig {
    ServerConfig {
        nutrition: NutritionConfig {
            max_foods: 10,
            retry: RetryConfig {
                max_attempts: 3,
                delay_secs: 0,
            },
        },
        ..ServerConfig::default()
    }
}

/// Assemble server resources around a stub provider
pub fn test_resources(stub: Arc<StubLlmProvider>) -> Arc<ServerResources> {
    Arc::new(ServerResources::new(test_config(), stub))
}

/// A well-formed two-food model response
pub fn two_food_response() -> String {
    serde_json::json!({
        "foods": [
            {
                "food_name": "eggs",
                "quantity": "2 eggs",
                "carbohydrates_g": 1.2,
                "protein_g": 12.6,
                "fat_g": 9.5,
                "calories_kcal": 143.0
            },
            {
                "food_name": "rice",
                "quantity": "1 cup",
                "carbohydrates_g": 44.5,
                "protein_g": 4.3,
                "fat_g": 0.4,
                "calories_kcal": 205.0
            }
        ]
    })
    .to_string()
}
