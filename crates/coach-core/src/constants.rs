// ABOUTME: Scaling factors for stage transitions and challenge sampling
// ABOUTME: Reserved workout name for the per-progression ignore stage
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Challenge counts are drawn from `point.count * (1 +/- CHALLENGE_RANDOM_RANGE)`
pub const CHALLENGE_RANDOM_RANGE: f64 = 0.01;

/// Scale applied to the next stage's minimum when a user is promoted
pub const NEW_STAGE_FACTOR: f64 = 1.10;

/// Scale applied to the previous stage's maximum when a user is demoted
pub const PREV_STAGE_FACTOR: f64 = 0.90;

/// Reserved workout name of the ignore stage appended to every progression
pub const IGNORE_WORKOUT: &str = "Ignore";
