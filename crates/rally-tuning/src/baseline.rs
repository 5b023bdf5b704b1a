// ABOUTME: Built-in reference baseline for formula mode and its vehicle range table
// ABOUTME: Group A gravel/tarmac all-rounder values that the modifier tables are tuned against
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RallyWorks

use rally_core::catalog::keys;
use rally_core::{ParamValue, ParameterSet, RangeTable, SetupResult};

/// Vehicle name carried by the reference range table
pub const REFERENCE_VEHICLE: &str = "Group A reference";

/// Reference values: (key, value)
const REFERENCE_VALUES: &[(&str, f64)] = &[
    (keys::SPRING_RATE_FRONT, 70000.0),
    (keys::SPRING_RATE_REAR, 62000.0),
    (keys::ARB_FRONT, 18500.0),
    (keys::ARB_REAR, 14000.0),
    (keys::RIDE_HEIGHT_FRONT, 85.0),
    (keys::RIDE_HEIGHT_REAR, 90.0),
    (keys::FRONT_SLOW_BUMP, 5000.0),
    (keys::FRONT_SLOW_REBOUND, 8000.0),
    (keys::FRONT_FAST_BUMP, 3000.0),
    (keys::FRONT_FAST_REBOUND, 4500.0),
    (keys::REAR_SLOW_BUMP, 4500.0),
    (keys::REAR_SLOW_REBOUND, 7000.0),
    (keys::REAR_FAST_BUMP, 2750.0),
    (keys::REAR_FAST_REBOUND, 4250.0),
    (keys::CAMBER_FRONT, -2.5),
    (keys::CAMBER_REAR, -1.8),
    (keys::TOE_FRONT, 0.0),
    (keys::TOE_REAR, 0.15),
    (keys::BRAKE_BIAS, 64.0),
    (keys::BRAKE_PRESSURE, 1000.0),
    (keys::FRONT_DIFF_ACCEL, 60.0),
    (keys::FRONT_DIFF_DECEL, 75.0),
    (keys::FRONT_DIFF_PRELOAD, 60.0),
    (keys::REAR_DIFF_ACCEL, 45.0),
    (keys::REAR_DIFF_DECEL, 70.0),
    (keys::REAR_DIFF_PRELOAD, 90.0),
    (keys::CENTRE_SPLIT, 40.0),
];

/// Reference bounds: (key, min, max)
const REFERENCE_RANGES: &[(&str, f64, f64)] = &[
    (keys::SPRING_RATE_FRONT, 30000.0, 90000.0),
    (keys::SPRING_RATE_REAR, 25000.0, 85000.0),
    (keys::ARB_FRONT, 8000.0, 30000.0),
    (keys::ARB_REAR, 4000.0, 25000.0),
    (keys::RIDE_HEIGHT_FRONT, 40.0, 200.0),
    (keys::RIDE_HEIGHT_REAR, 40.0, 200.0),
    (keys::FRONT_SLOW_BUMP, 2500.0, 8000.0),
    (keys::FRONT_SLOW_REBOUND, 4000.0, 12500.0),
    (keys::FRONT_FAST_BUMP, 1500.0, 6000.0),
    (keys::FRONT_FAST_REBOUND, 2500.0, 8000.0),
    (keys::REAR_SLOW_BUMP, 2500.0, 8000.0),
    (keys::REAR_SLOW_REBOUND, 4000.0, 12500.0),
    (keys::REAR_FAST_BUMP, 1500.0, 6000.0),
    (keys::REAR_FAST_REBOUND, 2500.0, 8000.0),
    (keys::CAMBER_FRONT, -4.0, 1.0),
    (keys::CAMBER_REAR, -4.0, 1.0),
    (keys::TOE_FRONT, -0.5, 0.5),
    (keys::TOE_REAR, -0.5, 0.5),
    (keys::BRAKE_BIAS, 50.0, 75.0),
    (keys::BRAKE_PRESSURE, 600.0, 1400.0),
    (keys::FRONT_DIFF_ACCEL, 30.0, 90.0),
    (keys::FRONT_DIFF_DECEL, 30.0, 90.0),
    (keys::FRONT_DIFF_PRELOAD, 0.0, 250.0),
    (keys::REAR_DIFF_ACCEL, 30.0, 90.0),
    (keys::REAR_DIFF_DECEL, 30.0, 90.0),
    (keys::REAR_DIFF_PRELOAD, 0.0, 250.0),
    (keys::CENTRE_SPLIT, 20.0, 80.0),
];

/// Reference gear set, the only free-form parameter of the baseline
pub const REFERENCE_GEAR_SET: &str = "Set 2 (Balanced)";

/// Fresh copy of the reference baseline
#[must_use]
pub fn reference_baseline() -> ParameterSet {
    let mut baseline: ParameterSet = REFERENCE_VALUES
        .iter()
        .map(|&(key, value)| (key.to_owned(), ParamValue::Numeric(value)))
        .collect();
    baseline.insert(keys::GEAR_SET, REFERENCE_GEAR_SET);
    baseline
}

/// Range table matching the reference baseline
///
/// # Errors
///
/// Returns `SetupError::InvalidRange` if a built-in bound is inverted
pub fn reference_ranges() -> SetupResult<RangeTable> {
    REFERENCE_RANGES
        .iter()
        .try_fold(RangeTable::new(REFERENCE_VEHICLE), |table, &(key, min, max)| {
            table.with(key, min, max)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::out_of_range;

    #[test]
    fn test_reference_baseline_lies_within_reference_ranges() {
        let ranges = reference_ranges().unwrap();
        let baseline = reference_baseline();
        assert!(out_of_range(&baseline, &ranges).is_empty());
        assert_eq!(ranges.len(), REFERENCE_RANGES.len());
    }

    #[test]
    fn test_every_numeric_baseline_key_is_bounded() {
        let ranges = reference_ranges().unwrap();
        for (key, value) in &reference_baseline() {
            if value.is_numeric() {
                assert!(ranges.get(key).is_some(), "{key} has no range");
            }
        }
    }
}
