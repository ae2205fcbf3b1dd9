// ABOUTME: Integration tests for the coaching service flows
// ABOUTME: Registration, challenge issue with interleaving, reports, filters, and interval changes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Coaching Service Tests
//!
//! Each flow is a load/modify/save cycle, so every assertion reloads the user
//! from the store to check what was persisted.

#![allow(missing_docs, clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{assert_close, create_test_service};
use workout_coach::errors::ErrorCode;
use workout_coach::progression::{
    ChallengeSampler, CompletedDifficulty, Difficulty, FailureDifficulty, PointState,
};

#[tokio::test]
async fn test_register_user_seeds_every_progression() {
    let service = create_test_service().await.unwrap();

    let user = service.register_user("U1", "Bob", 60).await.unwrap();
    assert_eq!(user.progress().len(), 3);

    let stored = service.user("U1").await.unwrap();
    let pushups = stored.point("pushups").unwrap();
    assert_eq!(pushups.workout, "knee pushups");
    assert_close(pushups.count, 5.5);
    assert_close(stored.point("plank").unwrap().count, 22.0);
}

#[tokio::test]
async fn test_register_rejects_duplicates_and_zero_interval() {
    let service = create_test_service().await.unwrap();
    service.register_user("U1", "Bob", 60).await.unwrap();

    let duplicate = service.register_user("U1", "Robert", 30).await.unwrap_err();
    assert_eq!(duplicate.code, ErrorCode::ResourceAlreadyExists);
    assert_eq!(service.user("U1").await.unwrap().name, "Bob");

    let zero = service.register_user("U2", "Alice", 0).await.unwrap_err();
    assert_eq!(zero.code, ErrorCode::InvalidInput);
}

#[tokio::test]
async fn test_unknown_user() {
    let service = create_test_service().await.unwrap();
    let mut rng = ChallengeSampler::seeded_rng(1);

    let err = service.challenge("ghost", &mut rng).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);

    let err = service
        .report("ghost", "pushups", CompletedDifficulty::Easy.into())
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}

#[tokio::test]
async fn test_challenges_never_repeat_progression() {
    let service = create_test_service().await.unwrap();
    service.register_user("U1", "Bob", 60).await.unwrap();
    let mut rng = ChallengeSampler::seeded_rng(42);

    let mut previous: Option<String> = None;
    for _ in 0..25 {
        let challenge = service.challenge("U1", &mut rng).await.unwrap();
        let name = challenge.progression.name().to_owned();
        assert_ne!(previous.as_deref(), Some(name.as_str()));
        assert_eq!(challenge.user_id, "U1");

        let stored = service.user("U1").await.unwrap();
        assert_eq!(stored.last_progression.as_deref(), Some(name.as_str()));
        previous = Some(name);
    }
}

#[tokio::test]
async fn test_challenge_count_tracks_point() {
    let service = create_test_service().await.unwrap();
    service.register_user("U1", "Bob", 60).await.unwrap();
    service.set_focus("U1", &["core".to_owned()]).await.unwrap();
    let mut rng = ChallengeSampler::seeded_rng(3);

    let challenge = service.challenge("U1", &mut rng).await.unwrap();
    assert_eq!(challenge.progression.name(), "plank");
    assert_eq!(challenge.workout.name, "plank");
    // 22 seconds +/- 1%
    assert!((21..=22).contains(&challenge.count));
    assert!(challenge.to_string().ends_with("seconds of plank (keep hips level)"));
}

#[tokio::test]
async fn test_single_focus_exhausts_after_one_challenge() {
    let service = create_test_service().await.unwrap();
    service.register_user("U1", "Bob", 60).await.unwrap();
    service.set_focus("U1", &["legs".to_owned()]).await.unwrap();
    let mut rng = ChallengeSampler::seeded_rng(9);

    let first = service.challenge("U1", &mut rng).await.unwrap();
    assert_eq!(first.progression.name(), "squats");

    let err = service.challenge("U1", &mut rng).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceUnavailable);
    assert_eq!(err.user_id.as_deref(), Some("U1"));
}

#[tokio::test]
async fn test_exclude_and_ignore_filter_challenges() {
    let service = create_test_service().await.unwrap();
    service.register_user("U1", "Bob", 60).await.unwrap();
    service
        .set_exclude("U1", &["chest".to_owned()])
        .await
        .unwrap();
    service.ignore_progression("U1", "plank").await.unwrap();
    let mut rng = ChallengeSampler::seeded_rng(5);

    let challenge = service.challenge("U1", &mut rng).await.unwrap();
    assert_eq!(challenge.progression.name(), "squats");

    let stored = service.user("U1").await.unwrap();
    assert!(matches!(
        stored.point("plank").unwrap().state().unwrap(),
        PointState::Ignored
    ));
}

#[tokio::test]
async fn test_report_moves_point_and_persists() {
    let service = create_test_service().await.unwrap();
    service.register_user("U1", "Bob", 60).await.unwrap();

    let point = service
        .report("U1", "pushups", Difficulty::parse("easy").unwrap())
        .await
        .unwrap();
    assert_eq!(point.workout, "knee pushups");
    assert_close(point.count, 5.5 * 1.07);

    let point = service
        .report("U1", "pushups", FailureDifficulty::Far.into())
        .await
        .unwrap();
    assert_close(point.count, 5.5 * 1.07 * 0.93);

    let stored = service.user("U1").await.unwrap();
    assert_eq!(stored.point("pushups").unwrap(), &point);
}

#[tokio::test]
async fn test_report_unknown_progression() {
    let service = create_test_service().await.unwrap();
    service.register_user("U1", "Bob", 60).await.unwrap();

    let err = service
        .report("U1", "burpees", CompletedDifficulty::Hard.into())
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
    assert!(err.message.contains("burpees"));
}

#[tokio::test]
async fn test_report_promotes_to_next_stage() {
    let service = create_test_service().await.unwrap();
    service.register_user("U1", "Bob", 60).await.unwrap();
    service.set_stage("U1", "pushups", "knee pushups").await.unwrap();

    let mut point = service.user("U1").await.unwrap().point("pushups").unwrap().clone();
    while point.workout == "knee pushups" {
        point = service
            .report("U1", "pushups", CompletedDifficulty::VeryEasy.into())
            .await
            .unwrap();
    }
    assert_eq!(point.workout, "pushups");
    assert_close(point.count, 11.0);
}

#[tokio::test]
async fn test_set_stage_and_interval() {
    let service = create_test_service().await.unwrap();
    service.register_user("U1", "Bob", 60).await.unwrap();

    let point = service.set_stage("U1", "pushups", "pushups").await.unwrap();
    assert_close(point.count, 11.0);

    let err = service
        .set_stage("U1", "pushups", "squats")
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);

    let user = service.set_interval("U1", 15).await.unwrap();
    assert_eq!(user.interval_minutes, 15);
    assert_eq!(service.user("U1").await.unwrap().interval_minutes, 15);

    let err = service.set_interval("U1", 0).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
}
