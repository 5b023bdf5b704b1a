// ABOUTME: rally-setup - command-line front end of the rally setup calculator
// ABOUTME: Formula calculation, reference lookups, tendency suggestions and saved-setup edits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RallyWorks
//!
//! Usage:
//! ```bash
//! # Recommended setup for a Group A car on a wet, smooth gravel stage
//! rally-setup calculate --car-class group_a --surface gravel --condition smooth --weather wet
//!
//! # Same, saved for later editing
//! rally-setup calculate -c rally4 -s tarmac -t bumpy -w dry --save rally4-bumpy
//!
//! # Reference setup of a car for the surface of a stage
//! rally-setup lookup --car "Lancia Delta HF Integrale Evo" --stage "Ouninpohja"
//!
//! # Community tendency suggestion with per-parameter comparison
//! rally-setup tendency --car "Lancia Delta HF Integrale Evo" --surface gravel
//!
//! # Edit a saved setup; malformed values keep the previous value
//! rally-setup edit rally4-bumpy camber_front=-2.8 gear_set="Set 3 (Long)"
//! ```

mod commands;
mod helpers;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use rally_setup_calculator::config::AppConfig;
use rally_setup_calculator::errors::AppResult;
use rally_setup_calculator::logging::LoggingConfig;
use tracing::error;

type Result<T> = AppResult<T>;

#[derive(Parser)]
#[command(
    name = "rally-setup",
    version,
    about = "Rally-sim setup calculator",
    long_about = "Computes recommended rally car setups from car class, surface, \
                  track condition and weather, \
                  looks up reference setups, and edits saved setups."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Reference data directory, overrides the environment
    #[arg(long, global = true)]
    data_dir: Option<String>,

    /// Saved setup directory, overrides the environment
    #[arg(long, global = true)]
    save_dir: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Run the modifier pipeline on the reference baseline
    Calculate {
        /// Car class: `group_a`, `group_b`, `rally2`, `rally4` or `historic_rwd`
        #[arg(long, short = 'c', default_value = "group_a")]
        car_class: String,

        /// Surface (asphalt/tarmac, gravel, snow, mixed)
        #[arg(long, short = 's')]
        surface: String,

        /// Track condition (smooth, bumpy, rough, rutted)
        #[arg(long, short = 't', default_value = "smooth")]
        condition: String,

        /// Weather (dry, damp, wet, snowfall)
        #[arg(long, short = 'w', default_value = "dry")]
        weather: String,

        /// Save the result under this name
        #[arg(long)]
        save: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show the reference setup of a car
    Lookup {
        /// Car name as listed by `cars`
        #[arg(long)]
        car: String,

        /// Stage name; its surface selects the setup
        #[arg(long, conflicts_with = "surface")]
        stage: Option<String>,

        /// Surface, when no stage is given
        #[arg(long)]
        surface: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// List cars with reference data
    Cars {
        /// Only cars with a setup for this surface
        #[arg(long)]
        surface: Option<String>,
    },

    /// List stages
    Stages {
        /// Only stages on this surface
        #[arg(long)]
        surface: Option<String>,
    },

    /// Convert a car's defaults with its community tendency profile
    Tendency {
        /// Car name
        #[arg(long)]
        car: String,

        /// Target surface
        #[arg(long, default_value = "gravel")]
        surface: String,

        /// Save the suggestion under this name
        #[arg(long)]
        save: Option<String>,
    },

    /// Apply key=value edits to a saved setup
    Edit {
        /// Saved setup name or path
        name: String,

        /// Edits such as `camber_front=-2.5` or `spring_rate_front="52000 N/m"`
        #[arg(required = true)]
        edits: Vec<String>,

        /// Save under a different name
        #[arg(long)]
        save_as: Option<String>,
    },

    /// Print a saved setup
    Show {
        /// Saved setup name or path
        name: String,

        /// Print the stored JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = LoggingConfig::from_env().verbose(cli.verbose).init() {
        eprintln!("logging disabled: {e}");
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(code = ?e.code, "{e}");
            eprintln!("Error: {e}");
            ExitCode::from(e.code.exit_code())
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = AppConfig::from_env();
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir.into();
    }
    if let Some(dir) = cli.save_dir {
        config.save_dir = dir.into();
    }

    match cli.command {
        Command::Calculate {
            car_class,
            surface,
            condition,
            weather,
            save,
            json,
        } => commands::calculate::run(
            &config,
            [&car_class, &surface, &condition, &weather],
            save.as_deref(),
            json,
        ),
        Command::Lookup {
            car,
            stage,
            surface,
            json,
        } => commands::lookup::lookup(&config, &car, stage.as_deref(), surface.as_deref(), json),
        Command::Cars { surface } => commands::lookup::cars(&config, surface.as_deref()),
        Command::Stages { surface } => commands::lookup::stages(&config, surface.as_deref()),
        Command::Tendency { car, surface, save } => {
            commands::tendency::run(&config, &car, &surface, save.as_deref())
        }
        Command::Edit {
            name,
            edits,
            save_as,
        } => commands::saved::edit(&config, &name, &edits, save_as.as_deref()),
        Command::Show { name, json } => commands::saved::show(&config, &name, json),
    }
}
