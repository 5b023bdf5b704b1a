// ABOUTME: Lancia Delta HF Integrale Evo defaults, adjustable ranges and gravel tendencies
// ABOUTME: Converts the tarmac-leaning default setup into a gravel setup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RallyWorks

use std::collections::BTreeMap;

use rally_core::catalog::keys;
use rally_core::{Axle, ParamValue, ParameterSet, RangeTable, SetupResult, Surface};

use super::{TendencyAdjustment, TendencyProfile};

/// Car name as it appears in the reference tables
pub const CAR_NAME: &str = "Lancia Delta HF Integrale Evo";

const RANGES: &[(&str, f64, f64)] = &[
    (keys::SPRING_RATE_FRONT, 40000.0, 75000.0),
    (keys::SPRING_RATE_REAR, 30000.0, 55000.0),
    (keys::FRONT_SLOW_BUMP, 3500.0, 6500.0),
    (keys::FRONT_SLOW_REBOUND, 5500.0, 12500.0),
    (keys::FRONT_FAST_BUMP, 2000.0, 4500.0),
    (keys::FRONT_FAST_REBOUND, 3000.0, 6000.0),
    (keys::REAR_SLOW_BUMP, 3000.0, 6000.0),
    (keys::REAR_SLOW_REBOUND, 4500.0, 9000.0),
    (keys::REAR_FAST_BUMP, 1500.0, 4000.0),
    (keys::REAR_FAST_REBOUND, 3000.0, 6000.0),
    (keys::ARB_FRONT, 12000.0, 23000.0),
    (keys::ARB_REAR, 4000.0, 22000.0),
    (keys::RIDE_HEIGHT_FRONT, 0.0, 200.0),
    (keys::RIDE_HEIGHT_REAR, 0.0, 200.0),
    (keys::FRONT_DIFF_PRELOAD, 0.0, 250.0),
    (keys::REAR_DIFF_PRELOAD, 0.0, 250.0),
    (keys::CAMBER_FRONT, -3.5, 1.0),
    (keys::CAMBER_REAR, -3.7, 1.0),
    (keys::TOE_FRONT, -0.5, 0.5),
    (keys::TOE_REAR, -0.5, 0.5),
    (keys::BRAKE_BIAS, 35.0, 80.0),
];

const DEFAULTS: &[(&str, f64)] = &[
    (keys::SPRING_RATE_FRONT, 40000.0),
    (keys::SPRING_RATE_REAR, 40000.0),
    (keys::ARB_FRONT, 11500.0),
    (keys::ARB_REAR, 13500.0),
    (keys::RIDE_HEIGHT_FRONT, 130.0),
    (keys::RIDE_HEIGHT_REAR, 100.0),
    (keys::FRONT_SLOW_BUMP, 4250.0),
    (keys::FRONT_SLOW_REBOUND, 9000.0),
    (keys::FRONT_FAST_BUMP, 2500.0),
    (keys::FRONT_FAST_REBOUND, 5000.0),
    (keys::REAR_SLOW_BUMP, 3750.0),
    (keys::REAR_SLOW_REBOUND, 6750.0),
    (keys::REAR_FAST_BUMP, 2500.0),
    (keys::REAR_FAST_REBOUND, 4500.0),
    (keys::CAMBER_FRONT, -2.4),
    (keys::CAMBER_REAR, -2.6),
    (keys::TOE_FRONT, 0.006),
    (keys::TOE_REAR, 0.0),
    (keys::BRAKE_BIAS, 67.0),
    (keys::FRONT_DIFF_ACCEL, 60.0),
    (keys::FRONT_DIFF_DECEL, 75.0),
    (keys::FRONT_DIFF_PRELOAD, 60.0),
    (keys::REAR_DIFF_ACCEL, 45.0),
    (keys::REAR_DIFF_DECEL, 70.0),
    (keys::REAR_DIFF_PRELOAD, 90.0),
];

const SCALES: &[(&str, f64)] = &[
    (keys::SPRING_RATE_FRONT, 1.50),
    (keys::SPRING_RATE_REAR, 1.30),
    (keys::ARB_FRONT, 1.04),
    (keys::ARB_REAR, 0.50),
    (keys::FRONT_SLOW_BUMP, 0.90),
    (keys::FRONT_SLOW_REBOUND, 1.10),
    (keys::FRONT_FAST_BUMP, 0.92),
    (keys::FRONT_FAST_REBOUND, 1.08),
    (keys::REAR_SLOW_BUMP, 0.80),
    (keys::REAR_SLOW_REBOUND, 1.15),
    (keys::REAR_FAST_BUMP, 0.85),
    (keys::REAR_FAST_REBOUND, 1.10),
];

const ABSOLUTES: &[(&str, f64)] = &[
    (keys::RIDE_HEIGHT_FRONT, 100.0),
    (keys::RIDE_HEIGHT_REAR, 85.0),
    (keys::CAMBER_FRONT, -1.5),
    (keys::CAMBER_REAR, -0.4),
    (keys::TOE_FRONT, 0.0),
    (keys::TOE_REAR, -0.2),
    (keys::BRAKE_BIAS, 66.0),
    (keys::FRONT_DIFF_PRELOAD, 40.0),
    (keys::REAR_DIFF_PRELOAD, 70.0),
    (keys::CENTRE_SPLIT, 30.0),
];

/// Gravel profile for the Delta
///
/// # Errors
///
/// Returns `SetupError::InvalidRange` if a built-in bound is inverted
pub fn delta_integrale_gravel() -> SetupResult<TendencyProfile> {
    let ranges = RANGES
        .iter()
        .try_fold(RangeTable::new(CAR_NAME), |table, &(key, min, max)| {
            table.with(key, min, max)
        })?;

    let defaults: ParameterSet = DEFAULTS
        .iter()
        .map(|&(key, value)| (key.to_owned(), ParamValue::Numeric(value)))
        .collect();

    let mut adjustments: BTreeMap<String, TendencyAdjustment> = SCALES
        .iter()
        .map(|&(key, factor)| (key.to_owned(), TendencyAdjustment::Scale { factor }))
        .chain(
            ABSOLUTES
                .iter()
                .map(|&(key, value)| (key.to_owned(), TendencyAdjustment::Set { value })),
        )
        .collect();

    for (axle, angles) in [(Axle::Front, "55_85"), (Axle::Rear, "55_75")] {
        adjustments.insert(
            format!("{}_ramp", axle.label()),
            TendencyAdjustment::Ramp {
                axle,
                angles: angles.to_owned(),
            },
        );
    }
    adjustments.insert(
        keys::CENTRE_DIFF_RATIO.to_owned(),
        TendencyAdjustment::Text {
            value: "50//12".to_owned(),
        },
    );
    adjustments.insert(
        keys::GEAR_SET.to_owned(),
        TendencyAdjustment::Text {
            value: "Set 2 (Balanced)".to_owned(),
        },
    );

    Ok(TendencyProfile {
        car: CAR_NAME.to_owned(),
        surface: Surface::Gravel,
        source: "DiRT Rally 2.0 gravel tendencies".to_owned(),
        defaults,
        ranges,
        adjustments,
    })
}
