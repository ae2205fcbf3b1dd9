// ABOUTME: Main library entry point for the workout coach
// ABOUTME: Wires the progression core to configuration, logging, and SQLite persistence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Workout Coach
//!
//! A workout-coaching bot backend. Each user has a position on a ladder of
//! exercise stages per progression; the coach issues randomized challenges and
//! moves the user up or down the ladder based on how the challenge went.
//!
//! The pure progression logic lives in the `coach-core` crate and is
//! re-exported here as [`progression`]. This crate adds the I/O around it:
//!
//! - **config**: environment-only configuration
//! - **logging**: structured `tracing` setup
//! - **database**: SQLite persistence of users and their progress points
//! - **services**: load/sample/report/save flows used by the CLI and chat layer
//! - **errors**: the `AppError` envelope every fallible operation returns
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use workout_coach::progression::{Catalog, ChallengeSampler};
//! use workout_coach::database::UserStore;
//! use workout_coach::errors::AppResult;
//! use workout_coach::services::CoachService;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let catalog = Arc::new(Catalog::load("data/exercises.json")?);
//!     let store = UserStore::connect("sqlite:./data/workout.db").await?;
//!     let service = CoachService::new(catalog, store);
//!
//!     service.register_user("U123", "Bob", 60).await?;
//!     let mut rng = ChallengeSampler::seeded_rng(7);
//!     let challenge = service.challenge("U123", &mut rng).await?;
//!     println!("Do {challenge}");
//!     Ok(())
//! }
//! ```

/// Progression core: catalog, progress model, sampler, and user model
pub use coach_core as progression;

/// Application constants and environment variable names
pub mod constants;

/// Environment-based configuration
pub mod config;

/// Unified error handling with `AppError` and `ErrorCode`
pub mod errors;

/// Structured logging configuration
pub mod logging;

/// SQLite persistence for users and progress points
pub mod database;

/// Coaching flows combining the catalog, sampler, and user store
pub mod services;
