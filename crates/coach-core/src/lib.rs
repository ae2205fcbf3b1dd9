// ABOUTME: Core types for the workout coach: exercise catalog, progress ladder, challenges
// ABOUTME: Foundation crate with the stage state machine, sampling, and domain errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Coach Core
//!
//! Pure, synchronous domain logic for the workout coach. Nothing in this crate
//! performs network or database I/O; persistence and messaging live in the
//! root crate and call into the types defined here.
//!
//! ## Modules
//!
//! - **catalog**: `Workout`, `Stage`, `Progression` and the JSON-backed `Catalog`
//! - **progress**: difficulty ratings and the `ProgressPoint` adjustment algorithm
//! - **challenge**: candidate filtering and randomized challenge sampling
//! - **user**: per-user mapping of progression to current `ProgressPoint`
//! - **errors**: `CoachError` precondition and data-inconsistency failures
//! - **constants**: scaling factors shared by the progress model and sampler

/// Scaling factors and reserved names
pub mod constants;

/// Domain error type for precondition violations and catalog inconsistencies
pub mod errors;

/// Exercise catalog: workouts, stages, progressions, and JSON loading
pub mod catalog;

/// Difficulty ratings and the stage ladder adjustment algorithm
pub mod progress;

/// Challenge candidate filtering and count sampling
pub mod challenge;

/// User accounts and their per-progression progress points
pub mod user;

pub use catalog::{Catalog, Progression, Stage, Workout};
pub use challenge::{generate_challenge, Challenge, ChallengeSampler};
pub use errors::{CoachError, CoachResult};
pub use progress::{
    CompletedDifficulty, Difficulty, DifficultyKind, FailureDifficulty, PointState, ProgressPoint,
};
pub use user::User;
