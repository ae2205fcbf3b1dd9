// ABOUTME: Command helpers and output formatting for the workout-coach CLI
// ABOUTME: Prints catalogs, users, and progress points in a stable plain-text layout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeSet;
use std::path::Path;

use rand::RngCore;
use workout_coach::errors::{AppError, AppResult};
use workout_coach::progression::{
    Catalog, ChallengeSampler, Difficulty, PointState, ProgressPoint, User,
};
use workout_coach::services::CoachService;

/// Seeded generator, or a randomly seeded one when no seed is given
pub fn challenge_rng(seed: Option<u64>) -> impl RngCore {
    ChallengeSampler::seeded_rng(seed.unwrap_or_else(rand::random))
}

/// Create the parent directory of a file-backed `SQLite` database
///
/// # Errors
///
/// Returns a configuration error if the directory cannot be created
pub fn ensure_database_dir(database_url: &str) -> AppResult<()> {
    let Some(path) = database_url.strip_prefix("sqlite:") else {
        return Ok(());
    };
    let path = path.trim_start_matches("//");
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() || path.contains(":memory:") {
        return Ok(());
    }
    if let Some(parent) = Path::new(path).parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            AppError::config(format!("Failed to create {}: {e}", parent.display()))
        })?;
    }
    Ok(())
}

/// Parse the difficulty and apply it
///
/// # Errors
///
/// Returns an error for an unknown difficulty name or a failed report
pub async fn report(
    service: &CoachService,
    user_id: &str,
    progression: &str,
    difficulty: &str,
) -> AppResult<()> {
    let difficulty = Difficulty::parse(difficulty)?;
    let point = service.report(user_id, progression, difficulty).await?;
    print_point(progression, &point);
    Ok(())
}

/// Print every progression with its stages
pub fn print_catalog(catalog: &Catalog) {
    for progression in catalog.progressions() {
        let targets: Vec<&str> = progression.target().iter().map(String::as_str).collect();
        println!("{} [{}]", progression.name(), targets.join(", "));
        for stage in progression.stages() {
            println!("    {stage}");
        }
    }
}

/// Print a user's settings and progress
pub fn print_user(user: &User) {
    println!("{} ({}) every {} min", user.name, user.id, user.interval_minutes);
    if !user.focus.is_empty() {
        println!("  focus:   {}", join(&user.focus));
    }
    if !user.exclude.is_empty() {
        println!("  exclude: {}", join(&user.exclude));
    }
    for (name, point) in user.progress() {
        print_point(name, point);
    }
}

/// Print one progress point
pub fn print_point(progression: &str, point: &ProgressPoint) {
    match point.state() {
        Ok(PointState::Active { stage, count }) => println!(
            "  {progression}: {count:.2} {} of {}",
            stage.workout.unit, stage.workout.name
        ),
        Ok(PointState::Ignored) => println!("  {progression}: ignored"),
        Err(e) => println!("  {progression}: {e}"),
    }
}

fn join(tags: &BTreeSet<String>) -> String {
    tags.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}
