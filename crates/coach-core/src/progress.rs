// ABOUTME: Progress model: difficulty ratings and the stage ladder adjustment algorithm
// ABOUTME: Computes a user's next point after a completed or failed challenge
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Progress Model
//!
//! A `ProgressPoint` is a user's position in one progression: the workout they
//! are on and the count they are expected to reach. Reported outcomes scale the
//! count by a fixed multiplier; crossing the stage maximum promotes the user to
//! the next stage, falling below the stage minimum demotes them.
//!
//! Adjustments never mutate the input point. Callers decide when to commit the
//! returned point to the user's progress map.

use crate::catalog::{Progression, Stage};
use crate::constants::{NEW_STAGE_FACTOR, PREV_STAGE_FACTOR};
use crate::errors::{CoachError, CoachResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

/// How hard a completed challenge felt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletedDifficulty {
    /// Barely completed
    VeryHard,
    /// Completed with strain
    Hard,
    /// Completed at a comfortable effort
    Moderate,
    /// Completed with reserve
    Easy,
    /// Completed with plenty left over
    VeryEasy,
}

impl CompletedDifficulty {
    /// Ratings from hardest to easiest
    pub const ALL: [Self; 5] = [
        Self::VeryHard,
        Self::Hard,
        Self::Moderate,
        Self::Easy,
        Self::VeryEasy,
    ];

    /// Scale applied to the count; looser effort grows the count more
    #[must_use]
    pub const fn multiplier(self) -> f64 {
        match self {
            Self::VeryHard => 1.00,
            Self::Hard => 1.03,
            Self::Moderate => 1.05,
            Self::Easy => 1.07,
            Self::VeryEasy => 1.10,
        }
    }

    /// Stable string representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::VeryHard => "very_hard",
            Self::Hard => "hard",
            Self::Moderate => "moderate",
            Self::Easy => "easy",
            Self::VeryEasy => "very_easy",
        }
    }
}

impl FromStr for CompletedDifficulty {
    type Err = CoachError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize(s);
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == normalized)
            .ok_or_else(|| CoachError::UnknownDifficulty(s.to_owned()))
    }
}

/// How close a failed challenge came to success
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureDifficulty {
    /// Nowhere near the target
    VeryFar,
    /// Well short of the target
    Far,
    /// Moderately short of the target
    Moderate,
    /// Just short of the target
    Close,
    /// Missed by a hair
    VeryClose,
}

impl FailureDifficulty {
    /// Ratings from furthest to closest
    pub const ALL: [Self; 5] = [
        Self::VeryFar,
        Self::Far,
        Self::Moderate,
        Self::Close,
        Self::VeryClose,
    ];

    /// Scale applied to the count; closer misses shrink the count less
    #[must_use]
    pub const fn multiplier(self) -> f64 {
        match self {
            Self::VeryFar => 0.90,
            Self::Far => 0.93,
            Self::Moderate => 0.95,
            Self::Close => 0.97,
            Self::VeryClose => 0.99,
        }
    }

    /// Stable string representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::VeryFar => "very_far",
            Self::Far => "far",
            Self::Moderate => "moderate",
            Self::Close => "close",
            Self::VeryClose => "very_close",
        }
    }
}

impl FromStr for FailureDifficulty {
    type Err = CoachError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize(s);
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == normalized)
            .ok_or_else(|| CoachError::UnknownDifficulty(s.to_owned()))
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase().replace(['-', ' '], "_")
}

/// Which family a difficulty rating belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyKind {
    /// Rating of a completed challenge
    Completed,
    /// Rating of a failed challenge
    Failure,
}

impl fmt::Display for DifficultyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed => write!(f, "completed"),
            Self::Failure => write!(f, "failure"),
        }
    }
}

/// A reported outcome of either family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "rating", rename_all = "snake_case")]
pub enum Difficulty {
    /// The user completed the challenge
    Completed(CompletedDifficulty),
    /// The user failed the challenge
    Failure(FailureDifficulty),
}

impl Difficulty {
    /// Family of this rating
    #[must_use]
    pub const fn kind(self) -> DifficultyKind {
        match self {
            Self::Completed(_) => DifficultyKind::Completed,
            Self::Failure(_) => DifficultyKind::Failure,
        }
    }

    /// Count multiplier of the underlying rating
    #[must_use]
    pub const fn multiplier(self) -> f64 {
        match self {
            Self::Completed(d) => d.multiplier(),
            Self::Failure(d) => d.multiplier(),
        }
    }

    /// Parse a rating name of either family
    ///
    /// `moderate` exists in both families and therefore needs a prefix:
    /// `completed:moderate` or `failure:moderate`. Unambiguous names may also be
    /// prefixed.
    ///
    /// # Errors
    ///
    /// Returns `CoachError::UnknownDifficulty` if the name matches no rating or is
    /// ambiguous
    pub fn parse(s: &str) -> CoachResult<Self> {
        if let Some((family, rating)) = s.split_once(':') {
            return match normalize(family).as_str() {
                "completed" | "complete" | "success" => rating.parse().map(Self::Completed),
                "failure" | "failed" | "fail" => rating.parse().map(Self::Failure),
                _ => Err(CoachError::UnknownDifficulty(s.to_owned())),
            };
        }
        let completed: CoachResult<CompletedDifficulty> = s.parse();
        let failure: CoachResult<FailureDifficulty> = s.parse();
        match (completed, failure) {
            (Ok(completed), Err(_)) => Ok(Self::Completed(completed)),
            (Err(_), Ok(failure)) => Ok(Self::Failure(failure)),
            _ => Err(CoachError::UnknownDifficulty(s.to_owned())),
        }
    }
}

impl From<CompletedDifficulty> for Difficulty {
    fn from(value: CompletedDifficulty) -> Self {
        Self::Completed(value)
    }
}

impl From<FailureDifficulty> for Difficulty {
    fn from(value: FailureDifficulty) -> Self {
        Self::Failure(value)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed(d) => write!(f, "completed:{}", d.as_str()),
            Self::Failure(d) => write!(f, "failure:{}", d.as_str()),
        }
    }
}

/// Whether a point is challengeable or suppressed
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointState<'a> {
    /// The user is working on `stage` with the given count
    Active {
        /// Current stage
        stage: &'a Stage,
        /// Current target count
        count: f64,
    },
    /// The user chose to ignore this progression
    Ignored,
}

/// A user's current workout and count within one progression
#[derive(Debug, Clone)]
pub struct ProgressPoint {
    /// Progression this point belongs to
    pub progression: Arc<Progression>,
    /// Name of the current workout, one of the progression's stages
    pub workout: String,
    /// Current target count
    pub count: f64,
}

impl PartialEq for ProgressPoint {
    fn eq(&self, other: &Self) -> bool {
        self.progression == other.progression
            && self.workout == other.workout
            && self.count.to_bits() == other.count.to_bits()
    }
}

impl ProgressPoint {
    /// Create a point
    #[must_use]
    pub fn new(progression: Arc<Progression>, workout: impl Into<String>, count: f64) -> Self {
        Self {
            progression,
            workout: workout.into(),
            count,
        }
    }

    /// Create a point positioned at the start of `stage`
    #[must_use]
    pub fn entering(progression: Arc<Progression>, stage: &Stage) -> Self {
        let count = stage.entry_count().min(stage.max);
        Self::new(progression, stage.workout.name.clone(), count)
    }

    /// The stage of the current workout
    ///
    /// # Errors
    ///
    /// Returns `CoachError::WorkoutNotInProgression` if the workout is not a stage
    pub fn stage(&self) -> CoachResult<&Stage> {
        self.progression.stage_for(&self.workout)
    }

    /// Tagged view of this point
    ///
    /// # Errors
    ///
    /// Returns `CoachError::WorkoutNotInProgression` if the workout is not a stage
    pub fn state(&self) -> CoachResult<PointState<'_>> {
        let stage = self.stage()?;
        if stage.is_ignore() {
            Ok(PointState::Ignored)
        } else {
            Ok(PointState::Active {
                stage,
                count: self.count,
            })
        }
    }

    /// Point after a completed challenge
    ///
    /// Scales the count by the rating's multiplier. Exceeding the stage maximum
    /// promotes to the next stage at `next.min * NEW_STAGE_FACTOR`, or clamps to
    /// the maximum when there is no next stage.
    ///
    /// # Errors
    ///
    /// Returns `CoachError::DifficultyKindMismatch` for a failure rating, or
    /// `CoachError::WorkoutNotInProgression` if the point's workout is unknown
    pub fn next_point(&self, difficulty: impl Into<Difficulty>) -> CoachResult<Self> {
        let difficulty = difficulty.into();
        let Difficulty::Completed(rating) = difficulty else {
            return Err(CoachError::DifficultyKindMismatch {
                operation: "next_point",
                expected: DifficultyKind::Completed,
                actual: difficulty.kind(),
            });
        };

        let current = self.stage()?;
        let scaled = self.count * rating.multiplier();
        let (stage, count) = if scaled <= current.max {
            (current, scaled)
        } else {
            match self.progression.next_stage(current) {
                Some(next) => (next, next.min * NEW_STAGE_FACTOR),
                None => (current, current.max),
            }
        };

        debug!(
            progression = %self.progression.name(),
            from.workout = %self.workout,
            from.count = self.count,
            to.workout = %stage.workout.name,
            to.count = count,
            difficulty = rating.as_str(),
            "Computed next progress point"
        );
        Ok(Self::new(
            Arc::clone(&self.progression),
            stage.workout.name.clone(),
            count,
        ))
    }

    /// Point after a failed challenge
    ///
    /// Scales the count down by the rating's multiplier. Falling below the stage
    /// minimum demotes to the previous stage at `prev.max * PREV_STAGE_FACTOR`.
    /// On the first stage the scaled count is kept even when it is below the
    /// minimum.
    ///
    /// # Errors
    ///
    /// Returns `CoachError::DifficultyKindMismatch` for a completed rating, or
    /// `CoachError::WorkoutNotInProgression` if the point's workout is unknown
    pub fn prev_point(&self, difficulty: impl Into<Difficulty>) -> CoachResult<Self> {
        let difficulty = difficulty.into();
        let Difficulty::Failure(rating) = difficulty else {
            return Err(CoachError::DifficultyKindMismatch {
                operation: "prev_point",
                expected: DifficultyKind::Failure,
                actual: difficulty.kind(),
            });
        };

        let current = self.stage()?;
        let scaled = self.count * rating.multiplier();
        let (stage, count) = if scaled >= current.min {
            (current, scaled)
        } else {
            // TODO: confirm with product whether the floor should clamp to `min` like the ceiling does
            match self.progression.prev_stage(current) {
                Some(prev) => (prev, prev.max * PREV_STAGE_FACTOR),
                None => (current, scaled),
            }
        };

        debug!(
            progression = %self.progression.name(),
            from.workout = %self.workout,
            from.count = self.count,
            to.workout = %stage.workout.name,
            to.count = count,
            difficulty = rating.as_str(),
            "Computed previous progress point"
        );
        Ok(Self::new(
            Arc::clone(&self.progression),
            stage.workout.name.clone(),
            count,
        ))
    }

    /// Point after an outcome of either family
    ///
    /// # Errors
    ///
    /// Returns `CoachError::WorkoutNotInProgression` if the point's workout is unknown
    pub fn apply(&self, difficulty: Difficulty) -> CoachResult<Self> {
        match difficulty {
            Difficulty::Completed(_) => self.next_point(difficulty),
            Difficulty::Failure(_) => self.prev_point(difficulty),
        }
    }
}
