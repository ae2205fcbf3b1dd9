// ABOUTME: User account model holding per-progression progress points and tag filters
// ABOUTME: Registration, point updates, and outcome recording against the catalog
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::catalog::{Catalog, Progression};
use crate::challenge::Challenge;
use crate::errors::{CoachError, CoachResult};
use crate::progress::{Difficulty, ProgressPoint};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tracing::{debug, info};

/// A coached user and their position in every progression
///
/// Users are identified by `id`; two values with the same id compare equal.
#[derive(Debug, Clone)]
pub struct User {
    /// Stable identifier, e.g. the chat platform's user id
    pub id: String,
    /// Display name
    pub name: String,
    /// Minutes between challenges
    pub interval_minutes: u32,
    /// When non-empty, only progressions targeting one of these tags are challenged
    pub focus: BTreeSet<String>,
    /// Progressions targeting any of these tags are never challenged
    pub exclude: BTreeSet<String>,
    /// Progression of the most recent challenge
    pub last_progression: Option<String>,
    progress: BTreeMap<String, ProgressPoint>,
}

impl User {
    /// Create a user with no progress and no filters
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, interval_minutes: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            interval_minutes,
            focus: BTreeSet::new(),
            exclude: BTreeSet::new(),
            last_progression: None,
            progress: BTreeMap::new(),
        }
    }

    /// Register a new user with one starting point per catalog progression
    ///
    /// Each point starts on the progression's first stage at its entry count.
    #[must_use]
    pub fn register(
        id: impl Into<String>,
        name: impl Into<String>,
        interval_minutes: u32,
        catalog: &Catalog,
    ) -> Self {
        let mut user = Self::new(id, name, interval_minutes);
        for progression in catalog.progressions() {
            if let Some(stage) = progression.first_stage() {
                let point = ProgressPoint::entering(Arc::clone(progression), stage);
                user.progress.insert(progression.name().to_owned(), point);
            }
        }
        info!(
            user.id = %user.id,
            progressions = user.progress.len(),
            "Registered user"
        );
        user
    }

    /// Progress points keyed by progression name
    #[must_use]
    pub const fn progress(&self) -> &BTreeMap<String, ProgressPoint> {
        &self.progress
    }

    /// Current point in the named progression
    #[must_use]
    pub fn point(&self, progression: &str) -> Option<&ProgressPoint> {
        self.progress.get(progression)
    }

    /// Insert or overwrite the point for `progression`
    ///
    /// # Errors
    ///
    /// Returns `CoachError::WorkoutNotInProgression` if `workout` is not one of the
    /// progression's stages
    pub fn register_point(
        &mut self,
        progression: &Arc<Progression>,
        workout: &str,
        count: f64,
    ) -> CoachResult<&ProgressPoint> {
        progression.stage_for(workout)?;
        let point = ProgressPoint::new(Arc::clone(progression), workout, count);
        let name = progression.name().to_owned();
        self.progress.insert(name.clone(), point);
        Ok(&self.progress[&name])
    }

    /// Overwrite the point for `point.progression`
    pub fn update_progress(&mut self, point: ProgressPoint) {
        self.progress
            .insert(point.progression.name().to_owned(), point);
    }

    /// Remember the progression of the challenge just issued
    pub fn challenged_with(&mut self, challenge: &Challenge) {
        self.last_progression = Some(challenge.progression.name().to_owned());
    }

    /// Apply a reported outcome to the named progression and commit the result
    ///
    /// # Errors
    ///
    /// Returns `CoachError::UnknownProgression` if the user has no point in that
    /// progression, or any error of [`ProgressPoint::apply`]
    pub fn record_outcome(
        &mut self,
        progression: &str,
        difficulty: Difficulty,
    ) -> CoachResult<ProgressPoint> {
        let current = self
            .progress
            .get(progression)
            .ok_or_else(|| CoachError::unknown_progression(progression))?;
        let next = current.apply(difficulty)?;
        debug!(
            user.id = %self.id,
            progression = %progression,
            difficulty = %difficulty,
            workout = %next.workout,
            count = next.count,
            "Recorded challenge outcome"
        );
        self.update_progress(next.clone());
        Ok(next)
    }

    /// Move the named progression to the start of an explicit stage
    ///
    /// # Errors
    ///
    /// Returns `CoachError::UnknownProgression` if the user has no point in that
    /// progression, or `CoachError::WorkoutNotInProgression` for an unknown workout
    pub fn set_stage(&mut self, progression: &str, workout: &str) -> CoachResult<&ProgressPoint> {
        let current = self
            .progress
            .get(progression)
            .ok_or_else(|| CoachError::unknown_progression(progression))?;
        let ladder = Arc::clone(&current.progression);
        let stage = ladder.stage_for(workout)?;
        self.update_progress(ProgressPoint::entering(Arc::clone(&ladder), stage));
        Ok(&self.progress[progression])
    }

    /// Suppress challenges from the named progression
    ///
    /// # Errors
    ///
    /// Returns `CoachError::UnknownProgression` if the user has no point in that
    /// progression
    pub fn ignore_progression(&mut self, progression: &str) -> CoachResult<&ProgressPoint> {
        self.set_stage(progression, crate::constants::IGNORE_WORKOUT)
    }

    /// Replace the focus tags
    pub fn set_focus<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.focus = tags.into_iter().map(Into::into).collect();
    }

    /// Replace the exclude tags
    pub fn set_exclude<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude = tags.into_iter().map(Into::into).collect();
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for User {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Workout;
    use crate::progress::CompletedDifficulty;

    fn catalog() -> Catalog {
        let w = |name: &str| Arc::new(Workout::new(name, "reps", "", ""));
        Catalog::new([
            Progression::new("pushups", ["chest"])
                .with_stage(w("wall pushup"), 2.0, 10.0)
                .with_stage(w("knee pushup"), 5.0, 15.0),
            Progression::new("squats", ["legs"]).with_stage(w("squat"), 10.0, 40.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_register_seeds_first_stage() {
        let user = User::register("U1", "Bob", 30, &catalog());
        assert_eq!(user.progress().len(), 2);
        let point = user.point("pushups").unwrap();
        assert_eq!(point.workout, "wall pushup");
        assert!((point.count - 2.2).abs() < 1e-9);
    }

    #[test]
    fn test_register_point_rejects_foreign_workout() {
        let catalog = catalog();
        let mut user = User::new("U1", "Bob", 30);
        let pushups = catalog.progression("pushups").unwrap();
        assert!(user.register_point(pushups, "squat", 3.0).is_err());
        assert!(user.progress().is_empty());
        let point = user.register_point(pushups, "knee pushup", 6.0).unwrap();
        assert_eq!(point.workout, "knee pushup");
    }

    #[test]
    fn test_record_outcome_commits_point() {
        let mut user = User::register("U1", "Bob", 30, &catalog());
        let next = user
            .record_outcome("squats", CompletedDifficulty::Moderate.into())
            .unwrap();
        assert_eq!(user.point("squats"), Some(&next));
        assert!(user
            .record_outcome("planks", CompletedDifficulty::Moderate.into())
            .is_err());
    }

    #[test]
    fn test_ignore_progression_moves_to_ignore_stage() {
        let mut user = User::register("U1", "Bob", 30, &catalog());
        let point = user.ignore_progression("pushups").unwrap();
        assert!(point.stage().unwrap().is_ignore());
        assert!(point.count.abs() < f64::EPSILON);
    }

    #[test]
    fn test_users_compare_by_id() {
        let mut a = User::new("U1", "Bob", 30);
        let b = User::new("U1", "Robert", 60);
        a.set_focus(["legs"]);
        assert_eq!(a, b);
        assert_ne!(a, User::new("U2", "Bob", 30));
    }
}
