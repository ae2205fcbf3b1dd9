// ABOUTME: Configuration management module for the workout coach
// ABOUTME: Exposes environment-based settings for storage, catalog, and logging
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration is read from environment variables only; there is no config
//! file. Command-line flags of the binary override individual values.

/// Environment and runtime configuration
pub mod environment;

pub use environment::{CoachConfig, Environment};
