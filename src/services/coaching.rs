// ABOUTME: Coaching flows: registration, challenge issue, outcome reports, and filters
// ABOUTME: Loads users from the store, applies core progression logic, and saves the result
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use crate::database::UserStore;
use crate::errors::{AppError, AppResult};
use crate::progression::{
    Catalog, Challenge, ChallengeSampler, Difficulty, ProgressPoint, User,
};
use rand::Rng;
use tracing::info;

/// Coaching operations over a shared catalog and a user store
#[derive(Debug, Clone)]
pub struct CoachService {
    catalog: Arc<Catalog>,
    store: UserStore,
    sampler: ChallengeSampler,
}

impl CoachService {
    /// Create a service with the default challenge sampler
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, store: UserStore) -> Self {
        Self {
            catalog,
            store,
            sampler: ChallengeSampler::default(),
        }
    }

    /// Catalog used to resolve progressions
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Underlying user store
    #[must_use]
    pub const fn store(&self) -> &UserStore {
        &self.store
    }

    /// Register a new user positioned at the start of every progression
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` if the id is taken, `InvalidInput` for a
    /// zero interval, or a database error
    pub async fn register_user(
        &self,
        user_id: &str,
        name: &str,
        interval_minutes: u32,
    ) -> AppResult<User> {
        validate_interval(interval_minutes)?;
        if self.store.load(user_id, &self.catalog).await?.is_some() {
            return Err(AppError::already_exists(format!("User {user_id}")).with_user_id(user_id));
        }

        let user = User::register(user_id, name, interval_minutes, &self.catalog);
        self.store.save(&user).await?;
        Ok(user)
    }

    /// Fetch a registered user
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the user is not registered
    pub async fn user(&self, user_id: &str) -> AppResult<User> {
        self.store.load_required(user_id, &self.catalog).await
    }

    /// Sample a challenge for the user and remember its progression
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown user, `ResourceUnavailable` if
    /// filters leave no progression to choose from, or a database error
    pub async fn challenge<R: Rng + Send + ?Sized>(
        &self,
        user_id: &str,
        rng: &mut R,
    ) -> AppResult<Challenge> {
        let mut user = self.user(user_id).await?;
        let challenge = self
            .sampler
            .sample(&user, rng)
            .map_err(|e| AppError::from(e).with_user_id(user_id))?;
        user.challenged_with(&challenge);
        self.store.save(&user).await?;

        info!(
            user.id = %user_id,
            progression = %challenge.progression.name(),
            workout = %challenge.workout.name,
            count = challenge.count,
            "Issued challenge"
        );
        Ok(challenge)
    }

    /// Apply a reported outcome to one of the user's progressions
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown user or progression, or a
    /// database error
    pub async fn report(
        &self,
        user_id: &str,
        progression: &str,
        difficulty: Difficulty,
    ) -> AppResult<ProgressPoint> {
        let mut user = self.user(user_id).await?;
        let point = user
            .record_outcome(progression, difficulty)
            .map_err(|e| AppError::from(e).with_user_id(user_id))?;
        self.store.save(&user).await?;

        info!(
            user.id = %user_id,
            progression = %progression,
            difficulty = %difficulty,
            workout = %point.workout,
            count = point.count,
            "Recorded outcome"
        );
        Ok(point)
    }

    /// Move a progression to the start of an explicit stage
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown user, progression, or workout
    pub async fn set_stage(
        &self,
        user_id: &str,
        progression: &str,
        workout: &str,
    ) -> AppResult<ProgressPoint> {
        let mut user = self.user(user_id).await?;
        let point = user
            .set_stage(progression, workout)
            .map_err(|e| AppError::from(e).with_user_id(user_id))?
            .clone();
        self.store.save(&user).await?;
        Ok(point)
    }

    /// Stop challenging the user with a progression
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown user or progression
    pub async fn ignore_progression(&self, user_id: &str, progression: &str) -> AppResult<ProgressPoint> {
        let mut user = self.user(user_id).await?;
        let point = user
            .ignore_progression(progression)
            .map_err(|e| AppError::from(e).with_user_id(user_id))?
            .clone();
        self.store.save(&user).await?;
        Ok(point)
    }

    /// Replace the user's focus tags; an empty list clears the focus
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown user, or a database error
    pub async fn set_focus(&self, user_id: &str, tags: &[String]) -> AppResult<User> {
        let mut user = self.user(user_id).await?;
        user.set_focus(tags.iter().cloned());
        self.store.save(&user).await?;
        Ok(user)
    }

    /// Replace the user's exclude tags
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown user, or a database error
    pub async fn set_exclude(&self, user_id: &str, tags: &[String]) -> AppResult<User> {
        let mut user = self.user(user_id).await?;
        user.set_exclude(tags.iter().cloned());
        self.store.save(&user).await?;
        Ok(user)
    }

    /// Change the minutes between challenges
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a zero interval, `ResourceNotFound` for an
    /// unknown user, or a database error
    pub async fn set_interval(&self, user_id: &str, interval_minutes: u32) -> AppResult<User> {
        validate_interval(interval_minutes)?;
        let mut user = self.user(user_id).await?;
        user.interval_minutes = interval_minutes;
        self.store.save(&user).await?;
        Ok(user)
    }
}

fn validate_interval(interval_minutes: u32) -> AppResult<()> {
    if interval_minutes == 0 {
        return Err(AppError::invalid_input(
            "Challenge interval must be at least one minute",
        ));
    }
    Ok(())
}
