// ABOUTME: HTTP middleware for the Nutrition Gateway
// ABOUTME: Currently CORS configuration for web client access
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Nutrition Gateway Project

//! HTTP middleware

/// CORS configuration
pub mod cors;

pub use cors::setup_cors;
