// ABOUTME: JSON catalog document schema and the ladder validation rules
// ABOUTME: Converts parsed workout/progression descriptors into a validated Catalog
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{Catalog, Progression, Workout};
use crate::errors::{CoachError, CoachResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// Top-level shape of an exercise catalog file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogDocument {
    /// Every workout a progression may reference
    pub workouts: Vec<WorkoutSpec>,
    /// Progression ladders in file order
    pub progressions: Vec<ProgressionSpec>,
}

/// Workout entry of a catalog file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutSpec {
    /// Unique workout name
    pub name: String,
    /// Unit of the count
    pub unit: String,
    /// How-to reference
    #[serde(default)]
    pub howto: String,
    /// Optional note
    #[serde(default)]
    pub extra: String,
}

/// Progression entry of a catalog file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressionSpec {
    /// Unique progression name
    pub name: String,
    /// Target tags
    #[serde(default)]
    pub target: Vec<String>,
    /// Stages from easiest to hardest
    pub workouts: Vec<StageSpec>,
}

/// Stage entry of a progression
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageSpec {
    /// Workout name, resolved against `CatalogDocument::workouts`
    pub name: String,
    /// Lowest count, zero when omitted
    #[serde(default)]
    pub min: f64,
    /// Highest count
    pub max: f64,
}

impl CatalogDocument {
    pub(super) fn into_catalog(self) -> CoachResult<Catalog> {
        let mut workouts: BTreeMap<String, Arc<Workout>> = BTreeMap::new();
        for spec in self.workouts {
            if spec.name == crate::constants::IGNORE_WORKOUT {
                return Err(CoachError::invalid_catalog(format!(
                    "workout name '{}' is reserved",
                    spec.name
                )));
            }
            let name = spec.name.clone();
            let workout = Workout::new(spec.name, spec.unit, spec.howto, spec.extra);
            if workouts.insert(name.clone(), Arc::new(workout)).is_some() {
                return Err(CoachError::invalid_catalog(format!(
                    "duplicate workout '{name}'"
                )));
            }
        }

        let mut progressions = Vec::with_capacity(self.progressions.len());
        for spec in self.progressions {
            let mut progression = Progression::new(spec.name, spec.target);
            for stage in spec.workouts {
                let workout =
                    workouts
                        .get(&stage.name)
                        .ok_or_else(|| CoachError::UnknownWorkout {
                            progression: progression.name().to_owned(),
                            workout: stage.name.clone(),
                        })?;
                progression.add_stage(Arc::clone(workout), stage.min, stage.max);
            }
            progressions.push(progression);
        }

        let mut catalog = Catalog::new(progressions)?;
        for (name, workout) in workouts {
            catalog.workouts.entry(name).or_insert(workout);
        }
        Ok(catalog)
    }
}

/// Check the ladder rules every catalog progression must satisfy
///
/// Stages must be non-empty, use distinct non-reserved workouts, have
/// `0 <= min <= max` with a positive `max`, and increase strictly in both `min` and `max`.
pub(super) fn validate_stages(progression: &Progression) -> CoachResult<()> {
    let name = progression.name();
    let stages = progression.stages();
    if stages.is_empty() {
        return Err(CoachError::invalid_catalog(format!(
            "progression '{name}' has no stages"
        )));
    }

    let mut seen = BTreeSet::new();
    for stage in stages {
        let workout = &stage.workout.name;
        if stage.is_ignore() {
            return Err(CoachError::invalid_catalog(format!(
                "progression '{name}' declares the reserved ignore stage"
            )));
        }
        if !seen.insert(workout.as_str()) {
            return Err(CoachError::invalid_catalog(format!(
                "progression '{name}' repeats workout '{workout}'"
            )));
        }
        if !(stage.min.is_finite() && stage.max.is_finite())
            || stage.min < 0.0
            || stage.max <= 0.0
            || stage.min > stage.max
        {
            return Err(CoachError::invalid_catalog(format!(
                "progression '{name}' stage '{workout}' has invalid range {}-{}",
                stage.min, stage.max
            )));
        }
    }

    for pair in stages.windows(2) {
        let (easier, harder) = (&pair[0], &pair[1]);
        if harder.min <= easier.min || harder.max <= easier.max {
            return Err(CoachError::invalid_catalog(format!(
                "progression '{name}' stage '{}' does not increase over '{}'",
                harder.workout.name, easier.workout.name
            )));
        }
    }
    Ok(())
}
