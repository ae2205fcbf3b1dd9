// ABOUTME: Workout coach CLI - register users, issue challenges, and record outcomes
// ABOUTME: Thin front end over CoachService backed by the JSON catalog and SQLite store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # List progressions and their stages
//! workout-coach catalog
//!
//! # Register a user
//! workout-coach register --id U123 --name Bob --interval 45
//!
//! # Issue a challenge (reproducible with --seed)
//! workout-coach challenge --user U123 --seed 7
//!
//! # Report how it went
//! workout-coach report --user U123 --progression pushups --difficulty easy
//!
//! # Only challenge upper body work
//! workout-coach focus --user U123 chest arms
//! ```

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use workout_coach::config::CoachConfig;
use workout_coach::database::UserStore;
use workout_coach::errors::AppResult;
use workout_coach::progression::Catalog;
use workout_coach::services::CoachService;

#[derive(Parser)]
#[command(
    name = "workout-coach",
    about = "Workout coaching bot CLI",
    long_about = "Issues workout challenges and adapts each user's progression ladder to reported difficulty."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Database URL override
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// Exercise catalog override
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// List progressions and their stages
    Catalog,

    #[command(flatten)]
    Coach(CoachCommand),
}

#[non_exhaustive]
#[derive(Subcommand)]
enum CoachCommand {
    /// Register a new user at the start of every progression
    Register {
        /// User id (e.g. the chat platform id)
        #[arg(long)]
        id: String,

        /// Display name
        #[arg(long)]
        name: String,

        /// Minutes between challenges (defaults to DEFAULT_INTERVAL_MINUTES)
        #[arg(long)]
        interval: Option<u32>,
    },

    /// Sample a challenge for a user
    Challenge {
        /// User id
        #[arg(long)]
        user: String,

        /// Seed for a reproducible challenge
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Report how a challenge went
    Report {
        /// User id
        #[arg(long)]
        user: String,

        /// Progression the challenge came from
        #[arg(long)]
        progression: String,

        /// Difficulty, e.g. `easy`, `very_close`, `completed:moderate`
        #[arg(long)]
        difficulty: String,
    },

    /// Move a progression to the start of a specific workout
    Stage {
        /// User id
        #[arg(long)]
        user: String,

        /// Progression to change
        #[arg(long)]
        progression: String,

        /// Workout to start from
        #[arg(long)]
        workout: String,
    },

    /// Stop challenging a user with a progression
    Ignore {
        /// User id
        #[arg(long)]
        user: String,

        /// Progression to ignore
        #[arg(long)]
        progression: String,
    },

    /// Replace focus tags (no tags clears the focus)
    Focus {
        /// User id
        #[arg(long)]
        user: String,

        /// Target tags
        tags: Vec<String>,
    },

    /// Replace exclude tags (no tags clears the list)
    Exclude {
        /// User id
        #[arg(long)]
        user: String,

        /// Target tags
        tags: Vec<String>,
    },

    /// Change the minutes between challenges
    Interval {
        /// User id
        #[arg(long)]
        user: String,

        /// Minutes between challenges
        minutes: u32,
    },

    /// Show a user's progress in every progression
    Show {
        /// User id
        #[arg(long)]
        user: String,
    },
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let cli = Cli::parse();

    let mut config = CoachConfig::from_env()?;
    if let Some(url) = cli.database_url {
        config = config.with_database_url(url);
    }
    if let Some(path) = cli.catalog {
        config = config.with_catalog_path(path);
    }
    config.logging.clone().with_verbosity(cli.verbose).init()?;
    config.log_summary();

    let catalog = Arc::new(Catalog::load(&config.catalog_path)?);

    match cli.command {
        Command::Catalog => commands::print_catalog(&catalog),
        Command::Coach(action) => {
            commands::ensure_database_dir(&config.database_url)?;
            let store = UserStore::connect(&config.database_url).await?;
            info!(database.url = %config.database_url, "Connected to database");
            let service = CoachService::new(catalog, store);
            run(&service, action, config.default_interval_minutes).await?;
        }
    }

    Ok(())
}

async fn run(
    service: &CoachService,
    action: CoachCommand,
    default_interval_minutes: u32,
) -> AppResult<()> {
    match action {
        CoachCommand::Register { id, name, interval } => {
            let interval = interval.unwrap_or(default_interval_minutes);
            let user = service.register_user(&id, &name, interval).await?;
            commands::print_user(&user);
        }
        CoachCommand::Challenge { user, seed } => {
            let mut rng = commands::challenge_rng(seed);
            let challenge = service.challenge(&user, &mut rng).await?;
            println!("{}: {challenge}", challenge.progression.name());
        }
        CoachCommand::Report {
            user,
            progression,
            difficulty,
        } => {
            commands::report(service, &user, &progression, &difficulty).await?;
        }
        CoachCommand::Stage {
            user,
            progression,
            workout,
        } => {
            let point = service.set_stage(&user, &progression, &workout).await?;
            commands::print_point(&progression, &point);
        }
        CoachCommand::Ignore { user, progression } => {
            let point = service.ignore_progression(&user, &progression).await?;
            commands::print_point(&progression, &point);
        }
        CoachCommand::Focus { user, tags } => {
            let user = service.set_focus(&user, &tags).await?;
            commands::print_user(&user);
        }
        CoachCommand::Exclude { user, tags } => {
            let user = service.set_exclude(&user, &tags).await?;
            commands::print_user(&user);
        }
        CoachCommand::Interval { user, minutes } => {
            let user = service.set_interval(&user, minutes).await?;
            commands::print_user(&user);
        }
        CoachCommand::Show { user } => {
            let user = service.user(&user).await?;
            commands::print_user(&user);
        }
    }

    Ok(())
}
