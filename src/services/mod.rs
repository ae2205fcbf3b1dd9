// ABOUTME: Domain service layer combining the catalog, sampler, and user store
// ABOUTME: Provides front-end agnostic coaching flows reusable by the CLI and chat layers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer
//!
//! Each operation is a single load, modify, save cycle against the store.
//! Serializing concurrent writes for the same user is left to the caller.

/// Registration, challenge, and report flows
pub mod coaching;

pub use coaching::CoachService;
