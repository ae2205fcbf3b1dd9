// ABOUTME: Exercise catalog model: workouts, ordered stage ladders, and progressions
// ABOUTME: Provides stage lookup and neighbour traversal used by the progress model
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Exercise Catalog
//!
//! The catalog is static reference data loaded once at startup and shared by
//! reference (`Arc`) between every user. A `Progression` is a ladder of `Stage`
//! values ordered by difficulty; index order is the only notion of "harder".

mod document;

pub use document::{CatalogDocument, ProgressionSpec, StageSpec, WorkoutSpec};

use crate::constants::IGNORE_WORKOUT;
use crate::errors::{CoachError, CoachResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// A single exercise, identified by its name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workout {
    /// Unique name, also the persisted key of a progress point
    pub name: String,
    /// Unit the count is measured in (reps, seconds, ...)
    pub unit: String,
    /// How-to reference, possibly empty
    pub howto: String,
    /// Free-text note shown alongside the workout
    pub extra: String,
}

impl Workout {
    /// Create a workout
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        unit: impl Into<String>,
        howto: impl Into<String>,
        extra: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            unit: unit.into(),
            howto: howto.into(),
            extra: extra.into(),
        }
    }

    /// The reserved workout backing each progression's ignore stage
    #[must_use]
    pub fn ignore() -> Self {
        Self::new(IGNORE_WORKOUT, "", "", "")
    }

    /// Whether this is the reserved ignore workout
    #[must_use]
    pub fn is_ignore(&self) -> bool {
        self.name == IGNORE_WORKOUT
    }
}

impl PartialEq for Workout {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Workout {}

/// One rung of a progression ladder
///
/// Two stages are equal when they describe the same workout, minimum and maximum.
#[derive(Debug, Clone, PartialEq)]
pub struct Stage {
    /// Workout performed at this stage
    pub workout: Arc<Workout>,
    /// Lowest count at this stage
    pub min: f64,
    /// Highest count at this stage
    pub max: f64,
}

impl Stage {
    /// Create a stage
    #[must_use]
    pub const fn new(workout: Arc<Workout>, min: f64, max: f64) -> Self {
        Self { workout, min, max }
    }

    /// The ungraded stage marking a progression as suppressed for a user
    #[must_use]
    pub fn ignore() -> Self {
        Self::new(Arc::new(Workout::ignore()), 0.0, 0.0)
    }

    /// Whether this is the ignore stage
    #[must_use]
    pub fn is_ignore(&self) -> bool {
        self.workout.is_ignore()
    }

    /// Count assigned when a user starts on this stage
    ///
    /// Scaling never grows a zero count, so a stage without a minimum starts
    /// halfway to its maximum instead.
    #[must_use]
    pub fn entry_count(&self) -> f64 {
        if self.min > 0.0 {
            self.min * crate::constants::NEW_STAGE_FACTOR
        } else {
            self.max / 2.0
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_ignore() {
            return write!(f, "Ignore");
        }
        write!(
            f,
            "{}:    {}-{} {}",
            title_case(&self.workout.name),
            self.min,
            self.max,
            self.workout.unit
        )
    }
}

fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut at_word_start = true;
    for c in name.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

/// A named ladder of stages of escalating difficulty
#[derive(Debug, Clone)]
pub struct Progression {
    name: String,
    target: BTreeSet<String>,
    stages: Vec<Stage>,
}

impl Progression {
    /// Create a progression with no stages
    #[must_use]
    pub fn new<I, S>(name: impl Into<String>, target: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            target: target.into_iter().map(Into::into).collect(),
            stages: Vec::new(),
        }
    }

    /// Append a stage at the hardest end of the ladder
    pub fn add_stage(&mut self, workout: Arc<Workout>, min: f64, max: f64) {
        self.stages.push(Stage::new(workout, min, max));
    }

    /// Builder form of [`Progression::add_stage`]
    #[must_use]
    pub fn with_stage(mut self, workout: Arc<Workout>, min: f64, max: f64) -> Self {
        self.add_stage(workout, min, max);
        self
    }

    /// Unique progression name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tags used for focus/exclude filtering
    #[must_use]
    pub const fn target(&self) -> &BTreeSet<String> {
        &self.target
    }

    /// Stages in difficulty order
    #[must_use]
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Easiest stage, if any
    #[must_use]
    pub fn first_stage(&self) -> Option<&Stage> {
        self.stages.first()
    }

    /// Whether any of the given tags is one of this progression's targets
    #[must_use]
    pub fn targets_any(&self, tags: &BTreeSet<String>) -> bool {
        !self.target.is_disjoint(tags)
    }

    /// The stage performing `workout_name`
    ///
    /// # Errors
    ///
    /// Returns `CoachError::WorkoutNotInProgression` if no stage uses that workout
    pub fn stage_for(&self, workout_name: &str) -> CoachResult<&Stage> {
        self.stages
            .iter()
            .find(|s| s.workout.name == workout_name)
            .ok_or_else(|| CoachError::workout_not_in_progression(&self.name, workout_name))
    }

    /// The stage immediately harder than `stage`, or `None` at the ceiling
    #[must_use]
    pub fn next_stage(&self, stage: &Stage) -> Option<&Stage> {
        let index = self.position(stage)?;
        self.stages.get(index + 1)
    }

    /// The stage immediately easier than `stage`, or `None` at the floor
    #[must_use]
    pub fn prev_stage(&self, stage: &Stage) -> Option<&Stage> {
        let index = self.position(stage)?;
        index.checked_sub(1).and_then(|i| self.stages.get(i))
    }

    fn position(&self, stage: &Stage) -> Option<usize> {
        self.stages.iter().position(|s| s == stage)
    }

    pub(crate) fn push_ignore_stage(&mut self) {
        self.stages.push(Stage::ignore());
    }
}

impl PartialEq for Progression {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Progression {}

/// Immutable, validated set of progressions keyed by name
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    workouts: BTreeMap<String, Arc<Workout>>,
    progressions: BTreeMap<String, Arc<Progression>>,
}

impl Catalog {
    /// Build a catalog from already-constructed progressions
    ///
    /// Each progression is validated and receives a trailing ignore stage.
    ///
    /// # Errors
    ///
    /// Returns `CoachError::InvalidCatalog` if a progression breaks a ladder rule
    /// or two progressions share a name
    pub fn new(progressions: impl IntoIterator<Item = Progression>) -> CoachResult<Self> {
        let mut catalog = Self::default();
        for mut progression in progressions {
            document::validate_stages(&progression)?;
            for stage in &progression.stages {
                catalog
                    .workouts
                    .entry(stage.workout.name.clone())
                    .or_insert_with(|| Arc::clone(&stage.workout));
            }
            progression.push_ignore_stage();
            let name = progression.name.clone();
            if catalog
                .progressions
                .insert(name.clone(), Arc::new(progression))
                .is_some()
            {
                return Err(CoachError::invalid_catalog(format!(
                    "duplicate progression '{name}'"
                )));
            }
        }
        Ok(catalog)
    }

    /// Build a catalog from a parsed JSON document
    ///
    /// # Errors
    ///
    /// Returns an error if a stage references an undefined workout or any ladder
    /// rule is violated
    pub fn from_document(document: CatalogDocument) -> CoachResult<Self> {
        document.into_catalog()
    }

    /// Parse a catalog from a JSON string
    ///
    /// # Errors
    ///
    /// Returns `CoachError::CatalogParse` for malformed JSON and a validation
    /// error for structurally invalid content
    pub fn from_json_str(json: &str) -> CoachResult<Self> {
        let document: CatalogDocument = serde_json::from_str(json)?;
        Self::from_document(document)
    }

    /// Load a catalog from a JSON file
    ///
    /// # Errors
    ///
    /// Returns `CoachError::CatalogIo` if the file cannot be read, otherwise the
    /// errors of [`Catalog::from_json_str`]
    pub fn load(path: impl AsRef<Path>) -> CoachResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CoachError::CatalogIo {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json_str(&json)?;
        info!(
            catalog.path = %path.display(),
            catalog.progressions = catalog.len(),
            catalog.workouts = catalog.workouts.len(),
            "Exercise catalog loaded"
        );
        Ok(catalog)
    }

    /// Resolve a progression by name
    ///
    /// # Errors
    ///
    /// Returns `CoachError::UnknownProgression` if the name is not in the catalog
    pub fn progression(&self, name: &str) -> CoachResult<&Arc<Progression>> {
        self.progressions
            .get(name)
            .ok_or_else(|| CoachError::unknown_progression(name))
    }

    /// Resolve a workout by name
    #[must_use]
    pub fn workout(&self, name: &str) -> Option<&Arc<Workout>> {
        self.workouts.get(name)
    }

    /// All progressions ordered by name
    pub fn progressions(&self) -> impl Iterator<Item = &Arc<Progression>> {
        self.progressions.values()
    }

    /// Number of progressions
    #[must_use]
    pub fn len(&self) -> usize {
        self.progressions.len()
    }

    /// Whether the catalog has no progressions
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.progressions.is_empty()
    }
}
