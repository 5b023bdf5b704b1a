// ABOUTME: Main library entry point for the rally setup calculator shell
// ABOUTME: Configuration, logging, reference tables and persisted setups over the tuning engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RallyWorks

#![deny(unsafe_code)]

//! # Rally Setup Calculator
//!
//! Produces suspension, damper, alignment, brake and differential settings
//! for a rally car from a few categorical inputs, or looks them up from
//! reference tables.
//!
//! ## Architecture
//!
//! - **`rally-core`**: selectors, parameter values, ranges, catalogue
//! - **`rally-tuning`**: modifier pipeline, validator, comparison, tendencies
//! - **this crate**: environment configuration, logging, TSV loader,
//!   persisted setups and the `rally-setup` binary
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use rally_setup_calculator::config::AppConfig;
//! use rally_setup_calculator::errors::AppResult;
//! use rally_tuning::baseline::{reference_baseline, reference_ranges};
//! use rally_tuning::ModifierPipeline;
//!
//! fn main() -> AppResult<()> {
//!     let config = AppConfig::from_env();
//!     let tables = config.load_modifier_tables()?;
//!     let ranges = reference_ranges()?;
//!     let outcome = ModifierPipeline::new(&tables, &ranges)
//!         .run_raw(&reference_baseline(), "group_a", "gravel", "smooth", "wet")?;
//!     println!("{}", outcome.profile);
//!     Ok(())
//! }
//! ```

/// Environment configuration
pub mod config;

/// Application constants
pub mod constants;

/// Application error type
pub mod errors;

/// Structured logging setup
pub mod logging;

/// Persisted setup format
pub mod persistence;

/// Reference table loader
pub mod reference;

pub use rally_core;
pub use rally_tuning;
