// ABOUTME: Tendency conversion command for rally-setup
// ABOUTME: Applies a car's community tendency profile to its defaults and shows what changed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RallyWorks

use rally_core::{SetupError, Surface};
use rally_setup_calculator::config::AppConfig;
use rally_setup_calculator::errors::AppResult;
use rally_setup_calculator::persistence::{PersistedSetup, SetupMetadata};
use rally_tuning::TendencyCatalog;
use tracing::info;

use crate::helpers::display::{print_header, print_parameters};

type Result<T> = AppResult<T>;

/// Suggest a setup for `car` on `surface`
pub fn run(config: &AppConfig, car: &str, surface: &str, save: Option<&str>) -> Result<()> {
    let surface = surface.parse::<Surface>()?;
    let catalog = TendencyCatalog::builtin()?;

    let profile = catalog
        .profile(car, surface)
        .ok_or_else(|| SetupError::not_supported(car, surface))?;
    let suggestion = profile.suggest()?;
    let changes = profile.compare()?;
    info!(car, %surface, source = %profile.source, "tendency suggestion built");

    print_header(&format!("{} on {surface}", profile.car));
    println!("Source: {}", profile.source);
    print_parameters(&suggestion, Some(&changes));

    if let Some(name) = save {
        let mut metadata = SetupMetadata::new(profile.car.clone(), Some(surface));
        metadata.profile = Some(profile.source.clone());

        let path = config.save_path(name);
        PersistedSetup::from_parameters(metadata, &suggestion).save_to_path(&path)?;
        println!("\nSaved to {}", path.display());
    }
    Ok(())
}
