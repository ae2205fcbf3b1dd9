// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides quiet logging, a fixture catalog, and in-memory stores and services
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `workout_coach`

use std::sync::{Arc, Once};
use workout_coach::database::UserStore;
use workout_coach::errors::AppResult;
use workout_coach::progression::Catalog;
use workout_coach::services::CoachService;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // Check for TEST_LOG environment variable to control test logging level
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN, // Default to WARN for quiet tests
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Three progressions: a two-stage pushup ladder, squats, and plank
pub const FIXTURE_CATALOG: &str = r#"{
    "workouts": [
        {"name": "knee pushups", "unit": "reps", "howto": "https://example.com/knee"},
        {"name": "pushups", "unit": "reps", "howto": "https://example.com/pushups"},
        {"name": "squats", "unit": "reps", "howto": "https://example.com/squats"},
        {"name": "plank", "unit": "seconds", "howto": "https://example.com/plank", "extra": "keep hips level"}
    ],
    "progressions": [
        {"name": "pushups", "target": ["chest", "arms"], "workouts": [
            {"name": "knee pushups", "min": 5, "max": 20},
            {"name": "pushups", "min": 10, "max": 30}
        ]},
        {"name": "squats", "target": ["legs"], "workouts": [
            {"name": "squats", "min": 10, "max": 50}
        ]},
        {"name": "plank", "target": ["core"], "workouts": [
            {"name": "plank", "min": 20, "max": 60}
        ]}
    ]
}"#;

/// Parse the fixture catalog
pub fn fixture_catalog() -> Arc<Catalog> {
    Arc::new(Catalog::from_json_str(FIXTURE_CATALOG).unwrap())
}

/// Fresh in-memory store with the schema applied
pub async fn create_test_store() -> AppResult<UserStore> {
    init_test_logging();
    UserStore::connect("sqlite::memory:").await
}

/// Service over the fixture catalog and a fresh in-memory store
pub async fn create_test_service() -> AppResult<CoachService> {
    let store = create_test_store().await?;
    Ok(CoachService::new(fixture_catalog(), store))
}

/// Compare counts that went through floating point multiplication
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
