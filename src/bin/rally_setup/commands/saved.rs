// ABOUTME: Saved setup commands for rally-setup
// ABOUTME: Shows saved setups and applies fail-soft key=value edits to them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RallyWorks

use chrono::Utc;
use rally_core::catalog::spec_for;
use rally_core::RangeTable;
use rally_setup_calculator::config::AppConfig;
use rally_setup_calculator::errors::{AppError, AppResult};
use rally_setup_calculator::persistence::{PersistedSetup, SetupMetadata};
use rally_tuning::baseline::reference_ranges;
use rally_tuning::{EditableParameterSet, TendencyCatalog};
use tracing::{info, warn};

use crate::helpers::display::{print_header, print_parameters, render_value};

type Result<T> = AppResult<T>;

/// Print a saved setup
pub fn show(config: &AppConfig, name: &str, json: bool) -> Result<()> {
    let setup = PersistedSetup::load_from_path(&config.save_path(name))?;
    if json {
        println!("{}", setup.to_json()?);
        return Ok(());
    }

    let metadata = &setup.metadata;
    print_header(&metadata.car);
    if let Some(surface) = metadata.surface {
        println!("Surface: {surface}");
    }
    if let Some(profile) = &metadata.profile {
        println!("Profile: {profile}");
    }
    println!(
        "Saved: {}{}",
        metadata.saved_at.format("%Y-%m-%d %H:%M UTC"),
        if metadata.custom { " (custom)" } else { "" }
    );
    print_parameters(&setup.to_parameters(), None);
    Ok(())
}

/// Apply `key=value` edits to a saved setup
///
/// A malformed or non-numeric value for a numeric slot keeps the previous
/// value; only an unparsable `key=value` pair aborts the command.
pub fn edit(config: &AppConfig, name: &str, edits: &[String], save_as: Option<&str>) -> Result<()> {
    let path = config.save_path(name);
    let setup = PersistedSetup::load_from_path(&path)?;
    let ranges = edit_ranges(&setup.metadata)?;
    let mut editable = EditableParameterSet::new(setup.to_parameters(), ranges);

    for edit in edits {
        let (key, raw) = edit
            .split_once('=')
            .ok_or_else(|| AppError::invalid_input(format!("expected key=value, got '{edit}'")))?;
        let key = key.trim();
        if spec_for(key).is_none() {
            warn!(key, "unknown parameter, edit ignored");
            println!("   {key}: unknown parameter, ignored");
            continue;
        }

        let previous = editable.get(key).cloned();
        match editable.validate_and_parse(key, raw.trim()) {
            Some(value) if previous.as_ref() == Some(value) => {
                println!("   {key}: kept {}", render_value(key, value));
            }
            Some(value) => println!("   {key}: {}", render_value(key, value)),
            None => println!("   {key}: rejected '{raw}'"),
        }
    }

    let modified = editable.modified_keys().len();
    let mut metadata = setup.metadata;
    metadata.custom |= editable.is_custom();
    metadata.saved_at = Utc::now();

    let target = save_as.map_or(path, |other| config.save_path(other));
    PersistedSetup::from_parameters(metadata, editable.values()).save_to_path(&target)?;
    info!(path = %target.display(), modified, "edited setup saved");
    println!("\n{modified} parameter(s) changed, saved to {}", target.display());
    Ok(())
}

/// Ranges of the car's tendency profile when one exists, else the reference ranges
fn edit_ranges(metadata: &SetupMetadata) -> Result<RangeTable> {
    if let Some(surface) = metadata.surface {
        let catalog = TendencyCatalog::builtin()?;
        if let Some(profile) = catalog.profile(&metadata.car, surface) {
            return Ok(profile.ranges.clone());
        }
    }
    Ok(reference_ranges()?)
}
