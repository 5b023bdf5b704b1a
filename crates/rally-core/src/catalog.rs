// ABOUTME: Catalogue of every known setup parameter key with its section, position and unit
// ABOUTME: Maps flat parameter keys to persisted-record slots and reference-data dotted paths
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RallyWorks

//! Parameter catalogue
//!
//! Two key families share one catalogue: per-axle keys used by the formula
//! engine (`spring_rate_front`, `front_slow_bump`, ...) and per-corner keys
//! read from reference tables (`spring_fl`, `damper_fl_slow_bump`, ...).
//! Where both describe the same physical setting (ARBs, brake bias,
//! differential preload) they share a key.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::units::Unit;

/// Flat keys used by the formula engine and tendency tables
pub mod keys {
    /// Front spring rate (N/m)
    pub const SPRING_RATE_FRONT: &str = "spring_rate_front";
    /// Rear spring rate (N/m)
    pub const SPRING_RATE_REAR: &str = "spring_rate_rear";
    /// Front anti-roll bar (N/m)
    pub const ARB_FRONT: &str = "arb_front";
    /// Rear anti-roll bar (N/m)
    pub const ARB_REAR: &str = "arb_rear";
    /// Front ride height (mm)
    pub const RIDE_HEIGHT_FRONT: &str = "ride_height_front";
    /// Rear ride height (mm)
    pub const RIDE_HEIGHT_REAR: &str = "ride_height_rear";
    /// Front slow bump (Ns/m)
    pub const FRONT_SLOW_BUMP: &str = "front_slow_bump";
    /// Front slow rebound (Ns/m)
    pub const FRONT_SLOW_REBOUND: &str = "front_slow_rebound";
    /// Front fast bump (Ns/m)
    pub const FRONT_FAST_BUMP: &str = "front_fast_bump";
    /// Front fast rebound (Ns/m)
    pub const FRONT_FAST_REBOUND: &str = "front_fast_rebound";
    /// Rear slow bump (Ns/m)
    pub const REAR_SLOW_BUMP: &str = "rear_slow_bump";
    /// Rear slow rebound (Ns/m)
    pub const REAR_SLOW_REBOUND: &str = "rear_slow_rebound";
    /// Rear fast bump (Ns/m)
    pub const REAR_FAST_BUMP: &str = "rear_fast_bump";
    /// Rear fast rebound (Ns/m)
    pub const REAR_FAST_REBOUND: &str = "rear_fast_rebound";
    /// Front camber (degrees)
    pub const CAMBER_FRONT: &str = "camber_front";
    /// Rear camber (degrees)
    pub const CAMBER_REAR: &str = "camber_rear";
    /// Front toe (degrees)
    pub const TOE_FRONT: &str = "toe_front";
    /// Rear toe (degrees)
    pub const TOE_REAR: &str = "toe_rear";
    /// Brake bias (% front)
    pub const BRAKE_BIAS: &str = "brake_bias";
    /// Brake line pressure (PSI)
    pub const BRAKE_PRESSURE: &str = "brake_pressure";
    /// Handbrake multiplier
    pub const HANDBRAKE_MULTIPLIER: &str = "handbrake_multiplier";
    /// Front differential ramp angle under power (degrees)
    pub const FRONT_DIFF_ACCEL: &str = "front_diff_accel";
    /// Front differential ramp angle off power (degrees)
    pub const FRONT_DIFF_DECEL: &str = "front_diff_decel";
    /// Front differential preload (Nm)
    pub const FRONT_DIFF_PRELOAD: &str = "front_diff_preload";
    /// Front differential clutch plates
    pub const FRONT_DIFF_PLATES: &str = "front_diff_plates";
    /// Front final drive ratio
    pub const FRONT_DIFF_RATIO: &str = "front_diff_ratio";
    /// Rear differential ramp angle under power (degrees)
    pub const REAR_DIFF_ACCEL: &str = "rear_diff_accel";
    /// Rear differential ramp angle off power (degrees)
    pub const REAR_DIFF_DECEL: &str = "rear_diff_decel";
    /// Rear differential preload (Nm)
    pub const REAR_DIFF_PRELOAD: &str = "rear_diff_preload";
    /// Rear differential clutch plates
    pub const REAR_DIFF_PLATES: &str = "rear_diff_plates";
    /// Rear final drive ratio
    pub const REAR_DIFF_RATIO: &str = "rear_diff_ratio";
    /// Centre torque split (% to the front axle)
    pub const CENTRE_SPLIT: &str = "centre_split";
    /// Centre differential ratio
    pub const CENTRE_DIFF_RATIO: &str = "centre_diff_ratio";
    /// Gear set recommendation (free-form text)
    pub const GEAR_SET: &str = "gear_set";
}

/// Top-level section of a setup sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    /// Springs, anti-roll bars, ride height
    Suspension,
    /// Per-corner damper curves
    Dampers,
    /// Pressure and alignment
    Tyres,
    /// Bias, pressure, handbrake
    Brakes,
    /// Differentials, torque split, gearing
    Drivetrain,
}

impl Section {
    /// Every section, in sheet order
    pub const ALL: [Self; 5] = [
        Self::Drivetrain,
        Self::Suspension,
        Self::Dampers,
        Self::Tyres,
        Self::Brakes,
    ];

    /// Lower-case section name, also the first segment of reference-data paths
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Suspension => "suspension",
            Self::Dampers => "dampers",
            Self::Tyres => "tyres",
            Self::Brakes => "brakes",
            Self::Drivetrain => "drivetrain",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Corner, axle or whole-car position a parameter applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Position {
    /// Front left corner
    #[serde(rename = "FL")]
    FrontLeft,
    /// Front right corner
    #[serde(rename = "FR")]
    FrontRight,
    /// Rear left corner
    #[serde(rename = "RL")]
    RearLeft,
    /// Rear right corner
    #[serde(rename = "RR")]
    RearRight,
    /// Front axle
    #[serde(rename = "front")]
    Front,
    /// Rear axle
    #[serde(rename = "rear")]
    Rear,
    /// Centre differential
    #[serde(rename = "centre")]
    Centre,
    /// Whole car
    #[serde(rename = "general")]
    General,
}

impl Position {
    /// Label used in persisted records
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FrontLeft => "FL",
            Self::FrontRight => "FR",
            Self::RearLeft => "RL",
            Self::RearRight => "RR",
            Self::Front => "front",
            Self::Rear => "rear",
            Self::Centre => "centre",
            Self::General => "general",
        }
    }

    /// Inverse of [`Position::label`]
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "FL" => Some(Self::FrontLeft),
            "FR" => Some(Self::FrontRight),
            "RL" => Some(Self::RearLeft),
            "RR" => Some(Self::RearRight),
            "front" => Some(Self::Front),
            "rear" => Some(Self::Rear),
            "centre" => Some(Self::Centre),
            "general" => Some(Self::General),
            _ => None,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Static description of one parameter key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterSpec {
    /// Flat parameter key
    pub key: &'static str,
    /// Sheet section
    pub section: Section,
    /// Corner / axle / whole-car slot
    pub position: Position,
    /// Field name within the position
    pub field: &'static str,
    /// Declared unit
    pub unit: Unit,
    /// Dotted reference-data path, for keys read from reference tables
    pub path: Option<&'static str>,
}

const fn spec(
    key: &'static str,
    section: Section,
    position: Position,
    field: &'static str,
    unit: Unit,
    path: Option<&'static str>,
) -> ParameterSpec {
    ParameterSpec {
        key,
        section,
        position,
        field,
        unit,
        path,
    }
}

use Position::{Centre, Front, FrontLeft, FrontRight, General, Rear, RearLeft, RearRight};
use Section::{Brakes, Dampers, Drivetrain, Suspension, Tyres};

/// Every known parameter
pub static CATALOG: &[ParameterSpec] = &[
    // Suspension, per axle
    spec(keys::SPRING_RATE_FRONT, Suspension, Front, "spring", Unit::NewtonsPerMetre, None),
    spec(keys::SPRING_RATE_REAR, Suspension, Rear, "spring", Unit::NewtonsPerMetre, None),
    spec(
        keys::ARB_FRONT,
        Suspension,
        Front,
        "arb",
        Unit::NewtonsPerMetre,
        Some("suspension.frontARB"),
    ),
    spec(
        keys::ARB_REAR,
        Suspension,
        Rear,
        "arb",
        Unit::NewtonsPerMetre,
        Some("suspension.rearARB"),
    ),
    spec(keys::RIDE_HEIGHT_FRONT, Suspension, Front, "ride_height", Unit::Millimetres, None),
    spec(keys::RIDE_HEIGHT_REAR, Suspension, Rear, "ride_height", Unit::Millimetres, None),
    // Suspension, per corner
    spec(
        "spring_fl",
        Suspension,
        FrontLeft,
        "spring",
        Unit::NewtonsPerMetre,
        Some("suspension.springs.FL"),
    ),
    spec(
        "spring_fr",
        Suspension,
        FrontRight,
        "spring",
        Unit::NewtonsPerMetre,
        Some("suspension.springs.FR"),
    ),
    spec(
        "spring_rl",
        Suspension,
        RearLeft,
        "spring",
        Unit::NewtonsPerMetre,
        Some("suspension.springs.RL"),
    ),
    spec(
        "spring_rr",
        Suspension,
        RearRight,
        "spring",
        Unit::NewtonsPerMetre,
        Some("suspension.springs.RR"),
    ),
    spec(
        "ride_height_fl",
        Suspension,
        FrontLeft,
        "ride_height",
        Unit::Millimetres,
        Some("suspension.rideHeight.FL"),
    ),
    spec(
        "ride_height_fr",
        Suspension,
        FrontRight,
        "ride_height",
        Unit::Millimetres,
        Some("suspension.rideHeight.FR"),
    ),
    spec(
        "ride_height_rl",
        Suspension,
        RearLeft,
        "ride_height",
        Unit::Millimetres,
        Some("suspension.rideHeight.RL"),
    ),
    spec(
        "ride_height_rr",
        Suspension,
        RearRight,
        "ride_height",
        Unit::Millimetres,
        Some("suspension.rideHeight.RR"),
    ),
    // Dampers, per axle
    spec(keys::FRONT_SLOW_BUMP, Dampers, Front, "slow_bump", Unit::NewtonSecondsPerMetre, None),
    spec(
        keys::FRONT_SLOW_REBOUND,
        Dampers,
        Front,
        "slow_rebound",
        Unit::NewtonSecondsPerMetre,
        None,
    ),
    spec(keys::FRONT_FAST_BUMP, Dampers, Front, "fast_bump", Unit::NewtonSecondsPerMetre, None),
    spec(
        keys::FRONT_FAST_REBOUND,
        Dampers,
        Front,
        "fast_rebound",
        Unit::NewtonSecondsPerMetre,
        None,
    ),
    spec(keys::REAR_SLOW_BUMP, Dampers, Rear, "slow_bump", Unit::NewtonSecondsPerMetre, None),
    spec(keys::REAR_SLOW_REBOUND, Dampers, Rear, "slow_rebound", Unit::NewtonSecondsPerMetre, None),
    spec(keys::REAR_FAST_BUMP, Dampers, Rear, "fast_bump", Unit::NewtonSecondsPerMetre, None),
    spec(keys::REAR_FAST_REBOUND, Dampers, Rear, "fast_rebound", Unit::NewtonSecondsPerMetre, None),
    // Dampers, per corner
    spec(
        "damper_fl_slow_bump",
        Dampers,
        FrontLeft,
        "slow_bump",
        Unit::NewtonSecondsPerMetre,
        Some("dampers.FL.slowBump"),
    ),
    spec(
        "damper_fl_slow_rebound",
        Dampers,
        FrontLeft,
        "slow_rebound",
        Unit::NewtonSecondsPerMetre,
        Some("dampers.FL.slowRebound"),
    ),
    spec(
        "damper_fl_fast_bump",
        Dampers,
        FrontLeft,
        "fast_bump",
        Unit::NewtonSecondsPerMetre,
        Some("dampers.FL.fastBump"),
    ),
    spec(
        "damper_fl_fast_rebound",
        Dampers,
        FrontLeft,
        "fast_rebound",
        Unit::NewtonSecondsPerMetre,
        Some("dampers.FL.fastRebound"),
    ),
    spec(
        "damper_fr_slow_bump",
        Dampers,
        FrontRight,
        "slow_bump",
        Unit::NewtonSecondsPerMetre,
        Some("dampers.FR.slowBump"),
    ),
    spec(
        "damper_fr_slow_rebound",
        Dampers,
        FrontRight,
        "slow_rebound",
        Unit::NewtonSecondsPerMetre,
        Some("dampers.FR.slowRebound"),
    ),
    spec(
        "damper_fr_fast_bump",
        Dampers,
        FrontRight,
        "fast_bump",
        Unit::NewtonSecondsPerMetre,
        Some("dampers.FR.fastBump"),
    ),
    spec(
        "damper_fr_fast_rebound",
        Dampers,
        FrontRight,
        "fast_rebound",
        Unit::NewtonSecondsPerMetre,
        Some("dampers.FR.fastRebound"),
    ),
    spec(
        "damper_rl_slow_bump",
        Dampers,
        RearLeft,
        "slow_bump",
        Unit::NewtonSecondsPerMetre,
        Some("dampers.RL.slowBump"),
    ),
    spec(
        "damper_rl_slow_rebound",
        Dampers,
        RearLeft,
        "slow_rebound",
        Unit::NewtonSecondsPerMetre,
        Some("dampers.RL.slowRebound"),
    ),
    spec(
        "damper_rl_fast_bump",
        Dampers,
        RearLeft,
        "fast_bump",
        Unit::NewtonSecondsPerMetre,
        Some("dampers.RL.fastBump"),
    ),
    spec(
        "damper_rl_fast_rebound",
        Dampers,
        RearLeft,
        "fast_rebound",
        Unit::NewtonSecondsPerMetre,
        Some("dampers.RL.fastRebound"),
    ),
    spec(
        "damper_rr_slow_bump",
        Dampers,
        RearRight,
        "slow_bump",
        Unit::NewtonSecondsPerMetre,
        Some("dampers.RR.slowBump"),
    ),
    spec(
        "damper_rr_slow_rebound",
        Dampers,
        RearRight,
        "slow_rebound",
        Unit::NewtonSecondsPerMetre,
        Some("dampers.RR.slowRebound"),
    ),
    spec(
        "damper_rr_fast_bump",
        Dampers,
        RearRight,
        "fast_bump",
        Unit::NewtonSecondsPerMetre,
        Some("dampers.RR.fastBump"),
    ),
    spec(
        "damper_rr_fast_rebound",
        Dampers,
        RearRight,
        "fast_rebound",
        Unit::NewtonSecondsPerMetre,
        Some("dampers.RR.fastRebound"),
    ),
    // Tyres and alignment, per axle
    spec(keys::CAMBER_FRONT, Tyres, Front, "camber", Unit::Degrees, None),
    spec(keys::CAMBER_REAR, Tyres, Rear, "camber", Unit::Degrees, None),
    spec(keys::TOE_FRONT, Tyres, Front, "toe", Unit::Degrees, None),
    spec(keys::TOE_REAR, Tyres, Rear, "toe", Unit::Degrees, None),
    // Tyres and alignment, per corner
    spec("tyre_fl_pressure", Tyres, FrontLeft, "pressure", Unit::Psi, Some("tyres.FL.pressure")),
    spec("tyre_fl_camber", Tyres, FrontLeft, "camber", Unit::Degrees, Some("tyres.FL.camber")),
    spec("tyre_fl_toe", Tyres, FrontLeft, "toe", Unit::Degrees, Some("tyres.FL.toe")),
    spec("tyre_fr_pressure", Tyres, FrontRight, "pressure", Unit::Psi, Some("tyres.FR.pressure")),
    spec("tyre_fr_camber", Tyres, FrontRight, "camber", Unit::Degrees, Some("tyres.FR.camber")),
    spec("tyre_fr_toe", Tyres, FrontRight, "toe", Unit::Degrees, Some("tyres.FR.toe")),
    spec("tyre_rl_pressure", Tyres, RearLeft, "pressure", Unit::Psi, Some("tyres.RL.pressure")),
    spec("tyre_rl_camber", Tyres, RearLeft, "camber", Unit::Degrees, Some("tyres.RL.camber")),
    spec("tyre_rl_toe", Tyres, RearLeft, "toe", Unit::Degrees, Some("tyres.RL.toe")),
    spec("tyre_rr_pressure", Tyres, RearRight, "pressure", Unit::Psi, Some("tyres.RR.pressure")),
    spec("tyre_rr_camber", Tyres, RearRight, "camber", Unit::Degrees, Some("tyres.RR.camber")),
    spec("tyre_rr_toe", Tyres, RearRight, "toe", Unit::Degrees, Some("tyres.RR.toe")),
    // Brakes
    spec(keys::BRAKE_BIAS, Brakes, General, "bias", Unit::PercentFront, Some("brakes.brakeBias")),
    spec(
        keys::BRAKE_PRESSURE,
        Brakes,
        General,
        "pressure",
        Unit::Psi,
        Some("brakes.propValvePressure"),
    ),
    spec(
        keys::HANDBRAKE_MULTIPLIER,
        Brakes,
        General,
        "handbrake",
        Unit::None,
        Some("brakes.handbrakeMultiplier"),
    ),
    // Drivetrain
    spec(keys::FRONT_DIFF_ACCEL, Drivetrain, Front, "ramp_accel", Unit::RampDegrees, None),
    spec(keys::FRONT_DIFF_DECEL, Drivetrain, Front, "ramp_decel", Unit::RampDegrees, None),
    spec(
        keys::FRONT_DIFF_PRELOAD,
        Drivetrain,
        Front,
        "preload",
        Unit::NewtonMetres,
        Some("drivetrain.frontDiff.lsdPreload"),
    ),
    spec(
        keys::FRONT_DIFF_PLATES,
        Drivetrain,
        Front,
        "plates",
        Unit::Count,
        Some("drivetrain.frontDiff.lsdPlates"),
    ),
    spec(
        keys::FRONT_DIFF_RATIO,
        Drivetrain,
        Front,
        "ratio",
        Unit::None,
        Some("drivetrain.frontDiff.ratio"),
    ),
    spec(keys::REAR_DIFF_ACCEL, Drivetrain, Rear, "ramp_accel", Unit::RampDegrees, None),
    spec(keys::REAR_DIFF_DECEL, Drivetrain, Rear, "ramp_decel", Unit::RampDegrees, None),
    spec(
        keys::REAR_DIFF_PRELOAD,
        Drivetrain,
        Rear,
        "preload",
        Unit::NewtonMetres,
        Some("drivetrain.rearDiff.lsdPreload"),
    ),
    spec(
        keys::REAR_DIFF_PLATES,
        Drivetrain,
        Rear,
        "plates",
        Unit::Count,
        Some("drivetrain.rearDiff.lsdPlates"),
    ),
    spec(
        keys::REAR_DIFF_RATIO,
        Drivetrain,
        Rear,
        "ratio",
        Unit::None,
        Some("drivetrain.rearDiff.ratio"),
    ),
    spec(
        keys::CENTRE_SPLIT,
        Drivetrain,
        Centre,
        "front_torque",
        Unit::Percent,
        Some("drivetrain.frontBias"),
    ),
    spec(
        keys::CENTRE_DIFF_RATIO,
        Drivetrain,
        Centre,
        "ratio",
        Unit::None,
        Some("drivetrain.centreDiffRatio"),
    ),
    spec(keys::GEAR_SET, Drivetrain, General, "gear_set", Unit::None, Some("drivetrain.gearsSet")),
];

/// Look up a parameter by flat key
#[must_use]
pub fn spec_for(key: &str) -> Option<&'static ParameterSpec> {
    CATALOG.iter().find(|spec| spec.key == key)
}

/// Look up a parameter by reference-data dotted path
#[must_use]
pub fn spec_for_path(path: &str) -> Option<&'static ParameterSpec> {
    CATALOG.iter().find(|spec| spec.path == Some(path))
}

/// Look up a parameter by its persisted-record slot
#[must_use]
pub fn spec_at(
    section: Section,
    position: Position,
    field: &str,
) -> Option<&'static ParameterSpec> {
    CATALOG
        .iter()
        .find(|spec| spec.section == section && spec.position == position && spec.field == field)
}

/// Declared unit of `key`, or [`Unit::None`] when the key is not catalogued
#[must_use]
pub fn unit_of(key: &str) -> Unit {
    spec_for(key).map_or(Unit::None, |spec| spec.unit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_keys_paths_and_slots_are_unique() {
        let mut keys_seen = HashSet::new();
        let mut paths_seen = HashSet::new();
        let mut slots_seen = HashSet::new();

        for spec in CATALOG {
            assert!(keys_seen.insert(spec.key), "duplicate key {}", spec.key);
            if let Some(path) = spec.path {
                assert!(paths_seen.insert(path), "duplicate path {path}");
            }
            assert!(
                slots_seen.insert((spec.section, spec.position, spec.field)),
                "duplicate slot for {}",
                spec.key
            );
        }
    }

    #[test]
    fn test_lookups() {
        let spec = spec_for("spring_rate_front").unwrap();
        assert_eq!(spec.unit, Unit::NewtonsPerMetre);
        assert_eq!(spec_for_path("suspension.springs.FL").unwrap().key, "spring_fl");
        assert_eq!(
            spec_at(Section::Drivetrain, Position::Front, "ramp_accel").unwrap().key,
            keys::FRONT_DIFF_ACCEL
        );
        assert_eq!(unit_of("not_a_key"), Unit::None);
        assert_eq!(Position::from_label("RR"), Some(Position::RearRight));
    }
}
