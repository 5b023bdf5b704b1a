// ABOUTME: Immutable per-vehicle min/max bounds for tunable parameters
// ABOUTME: Provides the total clamp primitive shared by the pipeline and interactive editing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RallyWorks

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::{SetupError, SetupResult};

/// Clamp `value` into `[min, max]` as `max(min, min(max, value))`.
///
/// Total: never panics, even for NaN input or an inverted range (unlike
/// `f64::clamp`).
#[must_use]
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    min.max(max.min(value))
}

/// Inclusive bounds for one parameter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterRange {
    /// Lower bound
    pub min: f64,
    /// Upper bound
    pub max: f64,
}

impl ParameterRange {
    /// Create a range, rejecting `min > max`
    ///
    /// # Errors
    ///
    /// Returns `SetupError::InvalidRange` when `min > max` or either bound is not finite
    pub fn new(key: &str, min: f64, max: f64) -> SetupResult<Self> {
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(SetupError::InvalidRange {
                key: key.to_owned(),
                min,
                max,
            });
        }
        Ok(Self { min, max })
    }

    /// Clamp `value` into this range
    #[must_use]
    pub fn clamp(&self, value: f64) -> f64 {
        clamp(value, self.min, self.max)
    }

    /// Whether `value` lies inside the range
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Range table for one vehicle model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RangeTable {
    /// Vehicle the bounds belong to
    pub vehicle: String,
    ranges: BTreeMap<String, ParameterRange>,
}

impl RangeTable {
    /// Create an empty table for `vehicle`
    #[must_use]
    pub fn new(vehicle: impl Into<String>) -> Self {
        Self {
            vehicle: vehicle.into(),
            ranges: BTreeMap::new(),
        }
    }

    /// Builder-style insertion of a validated range
    ///
    /// # Errors
    ///
    /// Returns `SetupError::InvalidRange` when `min > max`
    pub fn with(mut self, key: &str, min: f64, max: f64) -> SetupResult<Self> {
        let range = ParameterRange::new(key, min, max)?;
        self.ranges.insert(key.to_owned(), range);
        Ok(self)
    }

    /// Bounds for `key`; `None` means the parameter is free-form
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ParameterRange> {
        self.ranges.get(key)
    }

    /// Clamp `value` for `key`; keys without bounds pass through unchanged
    #[must_use]
    pub fn clamp(&self, key: &str, value: f64) -> f64 {
        self.ranges
            .get(key)
            .map_or(value, |range| range.clamp(value))
    }

    /// Iterate over `(key, range)` in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParameterRange)> {
        self.ranges.iter().map(|(key, range)| (key.as_str(), range))
    }

    /// Number of bounded parameters
    #[must_use]
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Whether no parameter is bounded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Re-check every entry, e.g. after deserializing a table from disk
    ///
    /// # Errors
    ///
    /// Returns the first `SetupError::InvalidRange` found
    pub fn validate(&self) -> SetupResult<()> {
        for (key, range) in &self.ranges {
            ParameterRange::new(key, range.min, range.max)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_bounds_and_idempotence() {
        let samples = [-1.0e9, -3.6, -3.5, 0.0, 0.999, 1.0, 1.5, 1.0e9];
        for value in samples {
            let once = clamp(value, -3.5, 1.0);
            assert!((-3.5..=1.0).contains(&once));
            assert!((clamp(once, -3.5, 1.0) - once).abs() < f64::EPSILON);
        }
        assert!((clamp(f64::NAN, 0.0, 10.0) - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        assert!(ParameterRange::new("arb_front", 23000.0, 12000.0).is_err());
        assert!(RangeTable::new("test").with("arb_front", 12000.0, 23000.0).is_ok());
    }

    #[test]
    fn test_unbounded_keys_pass_through() {
        let table = RangeTable::new("test")
            .with("arb_front", 12000.0, 23000.0)
            .unwrap();
        assert!((table.clamp("arb_front", 30000.0) - 23000.0).abs() < f64::EPSILON);
        assert!((table.clamp("centre_split", 130.0) - 130.0).abs() < f64::EPSILON);
    }
}
