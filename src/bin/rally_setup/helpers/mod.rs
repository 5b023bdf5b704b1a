// ABOUTME: Helper modules for rally-setup
// ABOUTME: Table rendering and reference data loading shared by the commands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RallyWorks

pub mod display;

use rally_setup_calculator::config::AppConfig;
use rally_setup_calculator::errors::AppResult;
use rally_setup_calculator::reference::load_reference_data;
use rally_tuning::SetupLibrary;
use tracing::warn;

/// Load the reference library, logging every line or row that was dropped
pub fn load_library(config: &AppConfig) -> AppResult<SetupLibrary> {
    let load = load_reference_data(&config.data_dir)?;

    for line in &load.malformed {
        warn!(
            file = %line.file,
            line = line.line,
            reason = %line.reason,
            "malformed reference line skipped"
        );
    }
    for row in &load.report.skipped {
        warn!(car = %row.car, path = %row.path, error = %row.error, "reference row skipped");
    }

    Ok(load.library)
}
