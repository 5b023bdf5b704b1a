// ABOUTME: Error taxonomy shared by every crate in the rally setup workspace
// ABOUTME: Distinguishes selector misuse, malformed reference data and bad range tables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RallyWorks

//! # Setup Error Types
//!
//! Soft input errors (a live edit that fails to parse) are deliberately absent:
//! they are recovered where they happen and never surface as a `SetupError`.

use std::fmt;
use thiserror::Error;

use crate::selectors::Surface;

/// Which closed enumeration a selector value was checked against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectorKind {
    /// Car class (Group A, Rally4, ...)
    CarClass,
    /// Driving surface
    Surface,
    /// Track condition
    TrackCondition,
    /// Weather
    Weather,
    /// Traction layout (`4WD`/`FWD`/`RWD`)
    TractionLayout,
}

impl fmt::Display for SelectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::CarClass => "car class",
            Self::Surface => "surface",
            Self::TrackCondition => "track condition",
            Self::Weather => "weather",
            Self::TractionLayout => "traction layout",
        };
        f.write_str(name)
    }
}

/// Errors produced by the setup core
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SetupError {
    /// A categorical input outside its closed enumeration
    #[error("Invalid {kind}: '{value}'. Valid options: {valid}")]
    InvalidSelector {
        /// Enumeration the value was checked against
        kind: SelectorKind,
        /// The rejected input
        value: String,
        /// Comma-separated list of accepted values
        valid: &'static str,
    },

    /// A malformed compound reference-data value (e.g. a ramp-angle pair)
    #[error("Malformed {field} value '{value}': {reason}")]
    Format {
        /// Field or path the value belongs to
        field: String,
        /// The raw value as found in the data
        value: String,
        /// What was wrong with it
        reason: String,
    },

    /// A range table entry with `min > max`
    #[error("Invalid range for '{key}': min {min} exceeds max {max}")]
    InvalidRange {
        /// Parameter key
        key: String,
        /// Declared minimum
        min: f64,
        /// Declared maximum
        max: f64,
    },

    /// Configuration tables failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// No tendency profile exists for the requested car and surface
    #[error("No tendency profile for '{car}' on {surface}")]
    NotSupported {
        /// Car display name
        car: String,
        /// Requested surface
        surface: Surface,
    },
}

impl SetupError {
    /// Create an "invalid selector" error
    #[must_use]
    pub fn invalid_selector(
        kind: SelectorKind,
        value: impl Into<String>,
        valid: &'static str,
    ) -> Self {
        Self::InvalidSelector {
            kind,
            value: value.into(),
            valid,
        }
    }

    /// Create a "format" error
    #[must_use]
    pub fn format(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Format {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a "not supported" error
    #[must_use]
    pub fn not_supported(car: impl Into<String>, surface: Surface) -> Self {
        Self::NotSupported {
            car: car.into(),
            surface,
        }
    }

    /// Create an "invalid config" error
    #[must_use]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}

/// Result alias for the setup core
pub type SetupResult<T> = Result<T, SetupError>;
