// ABOUTME: Application constants for the rally setup calculator shell
// ABOUTME: Service identity, environment variable names, default paths and reference file names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RallyWorks

/// Service identity used in structured logs
pub mod service_names {
    /// Name of the command-line service
    pub const RALLY_SETUP: &str = "rally-setup";
}

/// Environment variable names
pub mod env_config {
    /// Directory holding the reference TSV tables
    pub const DATA_DIR: &str = "RALLY_DATA_DIR";
    /// Optional JSON file replacing the built-in modifier tables
    pub const MODIFIER_TABLES: &str = "RALLY_MODIFIER_TABLES";
    /// Directory for persisted setups
    pub const SAVE_DIR: &str = "RALLY_SAVE_DIR";
}

/// Default paths
pub mod defaults {
    /// Reference data directory when `RALLY_DATA_DIR` is unset
    pub const DATA_DIR: &str = "data";
    /// Sub-directory of the user data directory used for saved setups
    pub const SAVE_SUBDIR: &str = "rally-setup";
}

/// Reference table file names inside the data directory
pub mod reference_files {
    /// Car catalogue
    pub const CARS: &str = "cars.tsv";
    /// Stage catalogue
    pub const STAGES: &str = "stages.tsv";
    /// Prefix of per-surface setup tables, followed by the surface file token
    pub const SETUPS_PREFIX: &str = "car_setups_";
}
