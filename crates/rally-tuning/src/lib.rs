// ABOUTME: Setup tuning engine for the rally setup calculator
// ABOUTME: Modifier pipeline, range validation, comparison, tendency profiles and reference library
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RallyWorks

#![deny(unsafe_code)]

//! # Rally Tuning
//!
//! Pure in-memory transformations over [`rally_core::ParameterSet`]. Nothing
//! here touches the filesystem: tables and reference rows are handed in by
//! the caller.
//!
//! ## Modules
//!
//! - **pipeline**: car class → drivetrain → surface → condition → weather
//! - **config**: declarative modifier tables
//! - **validation**: clamp, rounding and fail-soft edit parsing
//! - **comparison**: increase / decrease / unchanged classification
//! - **tendency**: per-car surface conversion profiles
//! - **library**: cars, stages and tabular reference setups
//! - **editable**: interactive editing on top of a baseline

/// Built-in reference baseline and ranges
pub mod baseline;

/// Comparison engine
pub mod comparison;

/// Modifier tables
pub mod config;

/// Interactive editing
pub mod editable;

/// Tabular baseline provider
pub mod library;

/// Stage operations
pub mod operation;

/// Modifier pipeline
pub mod pipeline;

/// Tendency profiles
pub mod tendency;

/// Range clamp and validator
pub mod validation;

pub use comparison::{
    compare, compare_numbers, compare_sets, Comparison, Direction, COMPARISON_TOLERANCE,
};
pub use config::{ModifierTables, StageOverrides};
pub use editable::EditableParameterSet;
pub use library::{CarInfo, LoadReport, ReferenceRow, ReferenceSetup, SetupLibrary, StageInfo};
pub use operation::Operation;
pub use pipeline::{EngineeringProfile, ModifierPipeline, PipelineOutcome, ProfileNote, StageKind};
pub use tendency::{TendencyAdjustment, TendencyCatalog, TendencyProfile};
pub use validation::{clamp, parse_edit, write_value};
