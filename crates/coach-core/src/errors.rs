// ABOUTME: Domain error types for the progression state machine and catalog
// ABOUTME: Every variant is a caller contract violation or malformed input data
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Coach Error Types
//!
//! Failures raised by the core never represent transient conditions, so none of
//! them are retried. They propagate to the caller, which converts them into the
//! application-level `AppError` envelope.

use crate::progress::DifficultyKind;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by catalog loading, progress adjustment, and challenge sampling
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CoachError {
    /// The workout is not one of the progression's stages
    #[error("workout '{workout}' is not a stage of progression '{progression}'")]
    WorkoutNotInProgression {
        /// Progression that was searched
        progression: String,
        /// Workout name that was not found
        workout: String,
    },

    /// The progression name is not present in the catalog or in a user's progress
    #[error("unknown progression '{name}'")]
    UnknownProgression {
        /// Progression name that failed to resolve
        name: String,
    },

    /// A progression stage references a workout the catalog does not define
    #[error("progression '{progression}' references unknown workout '{workout}'")]
    UnknownWorkout {
        /// Progression declaring the stage
        progression: String,
        /// Missing workout name
        workout: String,
    },

    /// A completion rating was passed where a failure rating was expected, or vice versa
    #[error("{operation} requires a {expected} difficulty, got a {actual} difficulty")]
    DifficultyKindMismatch {
        /// Operation that rejected the rating
        operation: &'static str,
        /// Kind the operation accepts
        expected: DifficultyKind,
        /// Kind that was supplied
        actual: DifficultyKind,
    },

    /// A difficulty name did not match any rating
    #[error("unknown difficulty '{0}'")]
    UnknownDifficulty(String),

    /// Filtering left no progression to challenge the user with
    #[error("no eligible progression to challenge user '{user_id}'")]
    NoChallengeCandidates {
        /// User that could not be challenged
        user_id: String,
    },

    /// The catalog violates a structural requirement
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),

    /// The catalog file could not be read
    #[error("failed to read catalog {path}: {source}")]
    CatalogIo {
        /// Path that was opened
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// The catalog document is not valid JSON for the expected shape
    #[error("failed to parse catalog: {0}")]
    CatalogParse(#[from] serde_json::Error),
}

impl CoachError {
    /// Create a "workout not in progression" error
    #[must_use]
    pub fn workout_not_in_progression(
        progression: impl Into<String>,
        workout: impl Into<String>,
    ) -> Self {
        Self::WorkoutNotInProgression {
            progression: progression.into(),
            workout: workout.into(),
        }
    }

    /// Create an "unknown progression" error
    #[must_use]
    pub fn unknown_progression(name: impl Into<String>) -> Self {
        Self::UnknownProgression { name: name.into() }
    }

    /// Create an "invalid catalog" error
    #[must_use]
    pub fn invalid_catalog(message: impl Into<String>) -> Self {
        Self::InvalidCatalog(message.into())
    }

    /// Whether this error came from looking up a name that does not exist
    #[must_use]
    pub const fn is_lookup_failure(&self) -> bool {
        matches!(
            self,
            Self::WorkoutNotInProgression { .. }
                | Self::UnknownProgression { .. }
                | Self::UnknownWorkout { .. }
        )
    }
}

/// Result alias for core operations
pub type CoachResult<T> = Result<T, CoachError>;
