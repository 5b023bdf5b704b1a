// ABOUTME: Core types for the rally setup calculator
// ABOUTME: Foundation crate with errors, selectors, parameter sets, ranges, catalogue and units
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RallyWorks

#![deny(unsafe_code)]

//! # Rally Core
//!
//! Foundation crate shared by the tuning engine and the application shell.
//! It holds plain data only; the transformations live in `rally-tuning`.
//!
//! ## Modules
//!
//! - **errors**: `SetupError` taxonomy (invalid selector, format, range, config)
//! - **selectors**: closed enumerations for car class, surface, condition, weather
//! - **models**: `ParamValue`, `ParameterSet`, `RangeTable`, `RampAngle`
//! - **catalog**: key → section/position/field/unit/reference-path mapping
//! - **units**: unit-suffix extraction and formatting

/// Parameter catalogue
pub mod catalog;

/// Error taxonomy
pub mod errors;

/// Parameter values, sets, ranges and ramp angles
pub mod models;

/// Categorical selector enumerations
pub mod selectors;

/// Units, suffix extraction and formatting
pub mod units;

pub use errors::{SelectorKind, SetupError, SetupResult};
pub use models::{clamp, Axle, ParamValue, ParameterRange, ParameterSet, RampAngle, RangeTable};
pub use selectors::{CarClass, Selection, Surface, TrackCondition, TractionLayout, Weather};
