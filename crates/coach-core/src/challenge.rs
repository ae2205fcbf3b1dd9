// ABOUTME: Challenge sampler selecting a progression and a perturbed count for a user
// ABOUTME: Applies interleaving, ignore, focus, and exclude filters before random choice
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Challenge Sampling
//!
//! A challenge is an ephemeral (progression, workout, count) triple presented
//! to a user. Sampling never touches the user's stored progress; the caller
//! records the challenge with `User::challenged_with` once it has been sent.

use crate::catalog::{Progression, Workout};
use crate::constants::CHALLENGE_RANDOM_RANGE;
use crate::errors::{CoachError, CoachResult};
use crate::progress::{PointState, ProgressPoint};
use crate::user::User;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// A sampled workout and count to present to a user
#[derive(Debug, Clone)]
pub struct Challenge {
    /// Progression the challenge was drawn from
    pub progression: Arc<Progression>,
    /// Workout to perform
    pub workout: Arc<Workout>,
    /// Target count
    pub count: u32,
    /// User being challenged
    pub user_id: String,
}

impl fmt::Display for Challenge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} of {}", self.count, self.workout.unit, self.workout.name)?;
        if !self.workout.extra.is_empty() {
            write!(f, " ({})", self.workout.extra)?;
        }
        Ok(())
    }
}

/// Selects challenges from a user's progress points
#[derive(Debug, Clone, Copy)]
pub struct ChallengeSampler {
    range: f64,
}

impl Default for ChallengeSampler {
    fn default() -> Self {
        Self::new(CHALLENGE_RANDOM_RANGE)
    }
}

impl ChallengeSampler {
    /// Create a sampler drawing counts from `count * (1 +/- range)`
    #[must_use]
    pub const fn new(range: f64) -> Self {
        Self { range }
    }

    /// Deterministic generator for reproducible challenge sequences
    #[must_use]
    pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(seed)
    }

    /// Points eligible for the next challenge
    ///
    /// Excludes the progression challenged last, ignored progressions, and
    /// progressions outside the user's focus or inside their exclude tags.
    ///
    /// # Errors
    ///
    /// Returns `CoachError::WorkoutNotInProgression` if a point is inconsistent
    /// with its progression
    pub fn candidates<'a>(&self, user: &'a User) -> CoachResult<Vec<&'a ProgressPoint>> {
        let mut candidates = Vec::new();
        for point in user.progress().values() {
            let progression = &point.progression;
            if user.last_progression.as_deref() == Some(progression.name()) {
                continue;
            }
            if matches!(point.state()?, PointState::Ignored) {
                continue;
            }
            if !user.focus.is_empty() && !progression.targets_any(&user.focus) {
                continue;
            }
            if !user.exclude.is_empty() && progression.targets_any(&user.exclude) {
                continue;
            }
            candidates.push(point);
        }
        Ok(candidates)
    }

    /// Draw a count uniformly from `count * (1 +/- range)`, floored
    pub fn sample_count<R: Rng + ?Sized>(&self, count: f64, rng: &mut R) -> u32 {
        let low = count * (1.0 - self.range);
        let high = count * (1.0 + self.range);
        let sampled = if high > low {
            rng.gen_range(low..=high)
        } else {
            low
        };
        sampled.floor().max(0.0) as u32
    }

    /// Pick one eligible progression uniformly and sample its count
    ///
    /// # Errors
    ///
    /// Returns `CoachError::NoChallengeCandidates` if filtering leaves nothing to
    /// choose from
    pub fn sample<R: Rng + ?Sized>(&self, user: &User, rng: &mut R) -> CoachResult<Challenge> {
        let candidates = self.candidates(user)?;
        let point = candidates
            .choose(&mut *rng)
            .ok_or_else(|| CoachError::NoChallengeCandidates {
                user_id: user.id.clone(),
            })?;

        let stage = point.stage()?;
        let count = self.sample_count(point.count, rng);
        debug!(
            user.id = %user.id,
            progression = %point.progression.name(),
            workout = %stage.workout.name,
            point.count = point.count,
            challenge.count = count,
            candidates = candidates.len(),
            "Sampled challenge"
        );
        Ok(Challenge {
            progression: Arc::clone(&point.progression),
            workout: Arc::clone(&stage.workout),
            count,
            user_id: user.id.clone(),
        })
    }
}

/// Sample a challenge with the default range
///
/// # Errors
///
/// Returns `CoachError::NoChallengeCandidates` if no progression is eligible
pub fn generate_challenge<R: Rng + ?Sized>(user: &User, rng: &mut R) -> CoachResult<Challenge> {
    ChallengeSampler::default().sample(user, rng)
}
