// ABOUTME: Differential ramp-angle pairs parsed from compound "<accel>_<decel>" strings
// ABOUTME: Malformed compounds are hard format errors since they indicate corrupted data
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RallyWorks

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::keys;
use crate::errors::SetupError;
use crate::models::range::RangeTable;

/// Driven axle carrying a limited-slip differential
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axle {
    /// Front axle
    Front,
    /// Rear axle
    Rear,
}

impl Axle {
    /// Both axles
    pub const ALL: [Self; 2] = [Self::Front, Self::Rear];

    /// Lower-case axle name
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Front => "front",
            Self::Rear => "rear",
        }
    }

    /// Flat key of the power-side ramp angle
    #[must_use]
    pub const fn accel_key(self) -> &'static str {
        match self {
            Self::Front => keys::FRONT_DIFF_ACCEL,
            Self::Rear => keys::REAR_DIFF_ACCEL,
        }
    }

    /// Flat key of the coast-side ramp angle
    #[must_use]
    pub const fn decel_key(self) -> &'static str {
        match self {
            Self::Front => keys::FRONT_DIFF_DECEL,
            Self::Rear => keys::REAR_DIFF_DECEL,
        }
    }

    /// Reference-data path of the compound ramp-angle value
    #[must_use]
    pub const fn ramp_path(self) -> &'static str {
        match self {
            Self::Front => "drivetrain.frontDiff.lsdRampAngle",
            Self::Rear => "drivetrain.rearDiff.lsdRampAngle",
        }
    }
}

/// Ramp angles of one differential, lower meaning more aggressive lock
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RampAngle {
    /// Angle on the drive (power) side, degrees
    pub accel: f64,
    /// Angle on the coast side, degrees
    pub decel: f64,
}

impl RampAngle {
    /// Create a ramp-angle pair
    #[must_use]
    pub const fn new(accel: f64, decel: f64) -> Self {
        Self { accel, decel }
    }

    /// Clamp both halves with the bounds `ranges` declares for `axle`
    #[must_use]
    pub fn clamped(self, axle: Axle, ranges: &RangeTable) -> Self {
        Self {
            accel: ranges.clamp(axle.accel_key(), self.accel),
            decel: ranges.clamp(axle.decel_key(), self.decel),
        }
    }
}

impl fmt::Display for RampAngle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.accel, self.decel)
    }
}

impl FromStr for RampAngle {
    type Err = SetupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim().trim_matches('"');
        let (accel, decel) = raw
            .split_once('_')
            .ok_or_else(|| SetupError::format("lsd_ramp_angle", s, "expected <accel>_<decel>"))?;

        let parse_half = |half: &str, side: &str| {
            half.trim()
                .parse::<f64>()
                .ok()
                .filter(|angle| angle.is_finite())
                .ok_or_else(|| {
                    SetupError::format("lsd_ramp_angle", s, format!("{side} angle is not a number"))
                })
        };

        Ok(Self {
            accel: parse_half(accel, "accel")?,
            decel: parse_half(decel, "decel")?,
        })
    }
}
