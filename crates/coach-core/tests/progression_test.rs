// ABOUTME: Integration tests for the stage ladder adjustment algorithm
// ABOUTME: Covers promotion, demotion, ceiling clamp, floor behaviour, and kind mismatches
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(missing_docs, clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use coach_core::{
    Catalog, ChallengeSampler, CoachError, CompletedDifficulty, DifficultyKind, FailureDifficulty,
    PointState, ProgressPoint, Progression, User, Workout,
};
use std::sync::Arc;

const TOLERANCE: f64 = 1e-9;

fn workout(name: &str) -> Arc<Workout> {
    Arc::new(Workout::new(name, "reps", "", ""))
}

/// Three-stage pushup ladder without an ignore stage
fn pushups() -> Arc<Progression> {
    Arc::new(
        Progression::new("pushups", ["chest", "arms"])
            .with_stage(workout("wall pushup"), 1.0, 10.0)
            .with_stage(workout("knee pushup"), 5.0, 15.0)
            .with_stage(workout("pushup"), 8.0, 20.0),
    )
}

fn point(workout: &str, count: f64) -> ProgressPoint {
    ProgressPoint::new(pushups(), workout, count)
}

// ============================================================================
// Forward adjustment
// ============================================================================

#[test]
fn test_next_point_stays_on_stage_below_max() {
    let start = point("wall pushup", 9.0);

    let hard = start.next_point(CompletedDifficulty::Hard).unwrap();
    assert_eq!(hard.workout, "wall pushup");
    assert!((hard.count - 9.27).abs() < TOLERANCE);

    let very_easy = start.next_point(CompletedDifficulty::VeryEasy).unwrap();
    assert_eq!(very_easy.workout, "wall pushup");
    assert!((very_easy.count - 9.9).abs() < TOLERANCE);
}

#[test]
fn test_next_point_promotes_past_max() {
    let next = point("wall pushup", 10.0)
        .next_point(CompletedDifficulty::Hard)
        .unwrap();
    assert_eq!(next.workout, "knee pushup");
    assert!((next.count - 5.5).abs() < TOLERANCE);
}

#[test]
fn test_next_point_promotion_discards_scaled_count() {
    let from_max = point("knee pushup", 15.0)
        .next_point(CompletedDifficulty::VeryEasy)
        .unwrap();
    let from_just_below = point("knee pushup", 14.8)
        .next_point(CompletedDifficulty::Hard)
        .unwrap();
    assert_eq!(from_max, from_just_below);
    assert!((from_max.count - 8.8).abs() < TOLERANCE);
}

#[test]
fn test_next_point_clamps_at_ceiling() {
    let next = point("pushup", 20.0)
        .next_point(CompletedDifficulty::Hard)
        .unwrap();
    assert_eq!(next.workout, "pushup");
    assert!((next.count - 20.0).abs() < f64::EPSILON);

    let again = next.next_point(CompletedDifficulty::VeryEasy).unwrap();
    assert_eq!(again, next);
}

#[test]
fn test_very_hard_keeps_count() {
    let start = point("knee pushup", 7.0);
    let next = start.next_point(CompletedDifficulty::VeryHard).unwrap();
    assert_eq!(next, start);
}

#[test]
fn test_next_point_monotonic_in_difficulty() {
    let start = point("wall pushup", 2.0);
    let very_easy = start.next_point(CompletedDifficulty::VeryEasy).unwrap();
    let hard = start.next_point(CompletedDifficulty::Hard).unwrap();
    assert!(very_easy.count > hard.count);
    assert!(hard.count > start.count);

    let mut previous = start.count;
    for rating in CompletedDifficulty::ALL.into_iter().skip(1) {
        let next = start.next_point(rating).unwrap();
        assert!(next.count > previous, "{rating:?} should grow more");
        previous = next.count;
    }
}

// ============================================================================
// Backward adjustment
// ============================================================================

#[test]
fn test_prev_point_stays_on_stage_above_min() {
    let prev = point("pushup", 15.0)
        .prev_point(FailureDifficulty::Moderate)
        .unwrap();
    assert_eq!(prev.workout, "pushup");
    assert!((prev.count - 14.25).abs() < TOLERANCE);
}

#[test]
fn test_prev_point_demotes_below_min() {
    let prev = point("pushup", 8.0)
        .prev_point(FailureDifficulty::Close)
        .unwrap();
    assert_eq!(prev.workout, "knee pushup");
    assert!((prev.count - 13.5).abs() < TOLERANCE);
}

#[test]
fn test_prev_point_keeps_sub_minimum_count_at_floor() {
    let prev = point("wall pushup", 1.0)
        .prev_point(FailureDifficulty::VeryFar)
        .unwrap();
    assert_eq!(prev.workout, "wall pushup");
    assert!((prev.count - 0.9).abs() < TOLERANCE);
    assert!(prev.count < 1.0);
}

#[test]
fn test_prev_point_monotonic_in_difficulty() {
    let start = point("pushup", 18.0);
    let very_far = start.prev_point(FailureDifficulty::VeryFar).unwrap();
    let close = start.prev_point(FailureDifficulty::Close).unwrap();
    assert!(very_far.count < close.count);
    assert!(close.count < start.count);

    let very_close = start.prev_point(FailureDifficulty::VeryClose).unwrap();
    let far = start.prev_point(FailureDifficulty::Far).unwrap();
    assert!(very_close.count > far.count);
    assert!(very_close.count < start.count);
}

// ============================================================================
// Precondition violations
// ============================================================================

#[test]
fn test_next_point_rejects_failure_rating() {
    let err = point("wall pushup", 1.0)
        .next_point(FailureDifficulty::Close)
        .unwrap_err();
    match err {
        CoachError::DifficultyKindMismatch {
            expected, actual, ..
        } => {
            assert_eq!(expected, DifficultyKind::Completed);
            assert_eq!(actual, DifficultyKind::Failure);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_prev_point_rejects_completed_rating() {
    let err = point("pushup", 10.0)
        .prev_point(CompletedDifficulty::Easy)
        .unwrap_err();
    assert!(matches!(
        err,
        CoachError::DifficultyKindMismatch {
            expected: DifficultyKind::Failure,
            actual: DifficultyKind::Completed,
            ..
        }
    ));
}

#[test]
fn test_unknown_workout_is_not_found() {
    let stray = point("pullup", 3.0);
    let err = stray.next_point(CompletedDifficulty::Hard).unwrap_err();
    assert!(err.is_lookup_failure());
    assert!(err.to_string().contains("pullup"));
}

// ============================================================================
// Catalog ladders
// ============================================================================

const LEG_CATALOG: &str = r#"{
    "workouts": [
        {"name": "squat", "unit": "reps"},
        {"name": "plank", "unit": "seconds"}
    ],
    "progressions": [
        {"name": "squats", "target": ["legs"], "workouts": [{"name": "squat", "min": 10, "max": 40}]},
        {"name": "planks", "target": ["core"], "workouts": [{"name": "plank", "min": 20, "max": 60}]}
    ]
}"#;

#[test]
fn test_mastering_last_stage_moves_onto_ignore() {
    let catalog = Catalog::from_json_str(LEG_CATALOG).unwrap();
    let squats = catalog.progression("squats").unwrap();

    let next = ProgressPoint::new(Arc::clone(squats), "squat", 40.0)
        .next_point(CompletedDifficulty::Hard)
        .unwrap();
    assert_eq!(next.workout, "Ignore");
    assert!(next.count.abs() < f64::EPSILON);
    assert!(matches!(next.state().unwrap(), PointState::Ignored));

    let mut user = User::register("U1", "Bob", 30, &catalog);
    user.register_point(squats, "squat", 40.0).unwrap();
    user.record_outcome("squats", CompletedDifficulty::Hard.into())
        .unwrap();

    let candidates = ChallengeSampler::default().candidates(&user).unwrap();
    let names: Vec<&str> = candidates.iter().map(|p| p.progression.name()).collect();
    assert_eq!(names, ["planks"]);
}
