// ABOUTME: Comparison engine classifying each parameter change as increase, decrease or unchanged
// ABOUTME: Absolute tolerance of 0.01 on values taken from numbers or unit-suffixed text
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RallyWorks

use std::collections::BTreeMap;
use std::fmt;

use rally_core::{ParamValue, ParameterSet};
use serde::{Deserialize, Serialize};

/// Differences below this absolute amount count as unchanged
pub const COMPARISON_TOLERANCE: f64 = 0.01;

/// Direction of change from current to suggested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Suggested is higher
    Increase,
    /// Suggested is lower
    Decrease,
    /// Within tolerance, or not comparable
    Unchanged,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Increase => "increase",
            Self::Decrease => "decrease",
            Self::Unchanged => "unchanged",
        })
    }
}

/// Classified change of one parameter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    /// Direction of change
    pub direction: Direction,
    /// Absolute difference, zero when not comparable
    pub magnitude: f64,
}

impl Comparison {
    /// Not comparable, or identical
    pub const UNCHANGED: Self = Self {
        direction: Direction::Unchanged,
        magnitude: 0.0,
    };
}

/// Classify two numbers
#[must_use]
pub fn compare_numbers(current: f64, suggested: f64) -> Comparison {
    let delta = suggested - current;
    if !delta.is_finite() {
        return Comparison::UNCHANGED;
    }

    let direction = if delta.abs() < COMPARISON_TOLERANCE {
        Direction::Unchanged
    } else if delta > 0.0 {
        Direction::Increase
    } else {
        Direction::Decrease
    };

    Comparison {
        direction,
        magnitude: delta.abs(),
    }
}

/// Classify two values, extracting numbers from unit-suffixed text
///
/// When either side has no numeric content the result is unchanged, even
/// if the two texts differ.
#[must_use]
pub fn compare(current: &ParamValue, suggested: &ParamValue) -> Comparison {
    match (current.extract_f64(), suggested.extract_f64()) {
        (Some(current), Some(suggested)) => compare_numbers(current, suggested),
        _ => Comparison::UNCHANGED,
    }
}

/// Compare every key present in both sets
#[must_use]
pub fn compare_sets(
    current: &ParameterSet,
    suggested: &ParameterSet,
) -> BTreeMap<String, Comparison> {
    current
        .iter()
        .filter_map(|(key, value)| {
            suggested
                .get(key)
                .map(|other| (key.clone(), compare(value, other)))
        })
        .collect()
}
