// ABOUTME: Formula-mode calculation for rally-setup
// ABOUTME: Runs the modifier pipeline on the reference baseline and optionally saves the result
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RallyWorks

use rally_core::Selection;
use rally_setup_calculator::config::AppConfig;
use rally_setup_calculator::errors::AppResult;
use rally_setup_calculator::persistence::{PersistedSetup, SetupMetadata};
use rally_tuning::baseline::{reference_baseline, reference_ranges};
use rally_tuning::{compare_sets, ModifierPipeline};
use tracing::info;

use crate::helpers::display::{print_header, print_parameters};

type Result<T> = AppResult<T>;

/// Compute the recommended setup for one selection
pub fn run(config: &AppConfig, selectors: [&str; 4], save: Option<&str>, json: bool) -> Result<()> {
    let [car_class, surface, condition, weather] = selectors;
    let selection = Selection::parse(car_class, surface, condition, weather)?;

    let tables = config.load_modifier_tables()?;
    let ranges = reference_ranges()?;
    let baseline = reference_baseline();
    let outcome = ModifierPipeline::new(&tables, &ranges).run(&baseline, selection);
    info!(%selection, profile = %outcome.profile, "setup calculated");

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print_header(&selection.to_string());
        println!("Profile: {}", outcome.profile);
        let changes = compare_sets(&baseline, &outcome.parameters);
        print_parameters(&outcome.parameters, Some(&changes));
    }

    if let Some(name) = save {
        let mut metadata =
            SetupMetadata::new(selection.car_class.display_name(), Some(selection.surface));
        metadata.selection = Some(selection);
        metadata.profile = Some(outcome.profile.label());

        let path = config.save_path(name);
        PersistedSetup::from_parameters(metadata, &outcome.parameters).save_to_path(&path)?;
        println!("\nSaved to {}", path.display());
    }

    Ok(())
}
