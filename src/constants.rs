// ABOUTME: System-wide constants and default configuration values for the workout coach
// ABOUTME: Environment variable names, defaults, and service identification
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Constants Module
//!
//! Defaults used when an environment variable is absent, and the names of the
//! variables themselves.

/// Service identification for structured logging
pub mod service_names {
    /// Name reported in startup logs
    pub const WORKOUT_COACH: &str = "workout-coach";
}

/// Environment variable names
pub mod env_vars {
    /// SQLite connection string
    pub const DATABASE_URL: &str = "DATABASE_URL";
    /// Path of the JSON exercise catalog
    pub const CATALOG_PATH: &str = "WORKOUT_CATALOG_PATH";
    /// Minutes between challenges for newly registered users
    pub const DEFAULT_INTERVAL_MINUTES: &str = "DEFAULT_INTERVAL_MINUTES";
    /// Deployment environment (development, production, testing)
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
}

/// Default values
pub mod defaults {
    /// Database used when `DATABASE_URL` is unset
    pub const DATABASE_URL: &str = "sqlite:./data/workout.db";
    /// Catalog used when `WORKOUT_CATALOG_PATH` is unset
    pub const CATALOG_PATH: &str = "./data/exercises.json";
    /// Challenge interval for new users
    pub const INTERVAL_MINUTES: u32 = 60;
}

/// Table names
pub mod tables {
    /// One row per user
    pub const USERS: &str = "users";
    /// One row per (user, progression)
    pub const USER_PROGRESS: &str = "user_progress";
}
