// ABOUTME: Declarative per-stage override tables for the modifier pipeline
// ABOUTME: One table per selector axis, keyed by enumeration value, loadable from JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RallyWorks

use std::collections::BTreeMap;

use rally_core::catalog::keys;
use rally_core::{CarClass, SetupError, SetupResult, Surface, TrackCondition, Weather};
use serde::{Deserialize, Serialize};

use crate::operation::Operation;

/// Overrides contributed by one selector value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StageOverrides {
    /// Engineering-profile note recorded when the stage changes something
    pub label: String,
    /// Operation per parameter key
    #[serde(default)]
    pub operations: BTreeMap<String, Operation>,
}

impl StageOverrides {
    /// Empty overrides with a profile label
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            operations: BTreeMap::new(),
        }
    }

    /// Builder-style insertion of one operation
    #[must_use]
    pub fn with(mut self, key: &str, operation: Operation) -> Self {
        self.operations.insert(key.to_owned(), operation);
        self
    }

    /// Same operation for a front/rear key pair
    #[must_use]
    pub fn with_pair(self, front: &str, rear: &str, operation: Operation) -> Self {
        self.with(front, operation).with(rear, operation)
    }

    /// Whether the stage has no operations
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    fn validate(&self) -> SetupResult<()> {
        if self.label.trim().is_empty() && !self.is_empty() {
            return Err(SetupError::invalid_config("stage overrides need a label"));
        }
        for (key, operation) in &self.operations {
            operation.validate(key)?;
        }
        Ok(())
    }
}

/// Override tables for all four stages
///
/// A selector value with no entry is the identity for its stage. The
/// reference values (Group A, asphalt, smooth, dry) have no entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifierTables {
    /// Car-class stage
    #[serde(default)]
    pub car_class: BTreeMap<CarClass, StageOverrides>,
    /// Surface stage
    #[serde(default)]
    pub surface: BTreeMap<Surface, StageOverrides>,
    /// Track-condition stage
    #[serde(default)]
    pub condition: BTreeMap<TrackCondition, StageOverrides>,
    /// Weather stage
    #[serde(default)]
    pub weather: BTreeMap<Weather, StageOverrides>,
}

impl ModifierTables {
    /// Tables with no overrides at all
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            car_class: BTreeMap::new(),
            surface: BTreeMap::new(),
            condition: BTreeMap::new(),
            weather: BTreeMap::new(),
        }
    }

    /// Parse tables from JSON and validate them
    ///
    /// # Errors
    ///
    /// Returns `SetupError::InvalidConfig` for malformed JSON, unknown
    /// selector names or invalid operation constants
    pub fn from_json(json: &str) -> SetupResult<Self> {
        let tables: Self = serde_json::from_str(json)
            .map_err(|e| SetupError::invalid_config(format!("modifier tables: {e}")))?;
        tables.validate()?;
        Ok(tables)
    }

    /// Check every operation in every table
    ///
    /// # Errors
    ///
    /// Returns the first `SetupError::InvalidConfig` found
    pub fn validate(&self) -> SetupResult<()> {
        let stages = self
            .car_class
            .values()
            .chain(self.surface.values())
            .chain(self.condition.values())
            .chain(self.weather.values());
        for stage in stages {
            stage.validate()?;
        }
        Ok(())
    }

    /// Total number of operations across all tables
    #[must_use]
    pub fn operation_count(&self) -> usize {
        self.car_class
            .values()
            .chain(self.surface.values())
            .chain(self.condition.values())
            .chain(self.weather.values())
            .map(|stage| stage.operations.len())
            .sum()
    }
}

impl Default for ModifierTables {
    fn default() -> Self {
        Self {
            car_class: default_car_class(),
            surface: default_surface(),
            condition: default_condition(),
            weather: default_weather(),
        }
    }
}

fn default_car_class() -> BTreeMap<CarClass, StageOverrides> {
    BTreeMap::from([
        (
            CarClass::GroupB,
            StageOverrides::new("Group B power delivery")
                .with(keys::SPRING_RATE_FRONT, Operation::scale(1.08))
                .with(keys::SPRING_RATE_REAR, Operation::scale(1.10))
                .with(keys::ARB_REAR, Operation::scale(1.15))
                .with(keys::CENTRE_SPLIT, Operation::set(35.0))
                .with(keys::REAR_DIFF_ACCEL, Operation::offset_floor(-5.0, 35.0))
                .with(keys::BRAKE_PRESSURE, Operation::scale(1.05)),
        ),
        (
            CarClass::Rally2,
            StageOverrides::new("Rally2 damper platform")
                .with_pair(keys::FRONT_SLOW_BUMP, keys::REAR_SLOW_BUMP, Operation::scale(1.05))
                .with_pair(
                    keys::FRONT_FAST_REBOUND,
                    keys::REAR_FAST_REBOUND,
                    Operation::scale(1.10),
                )
                .with(keys::FRONT_DIFF_PRELOAD, Operation::scale(1.20))
                .with(keys::CENTRE_SPLIT, Operation::set(50.0)),
        ),
        (
            CarClass::Rally4,
            StageOverrides::new("Rally4 front-drive rotation")
                .with(keys::ARB_REAR, Operation::scale(1.25))
                .with(keys::SPRING_RATE_REAR, Operation::scale(0.95))
                .with(keys::FRONT_DIFF_ACCEL, Operation::offset_floor(-10.0, 35.0))
                .with(keys::FRONT_DIFF_PRELOAD, Operation::scale(1.30))
                .with(keys::BRAKE_BIAS, Operation::offset_floor(-2.0, 55.0)),
        ),
        (
            CarClass::HistoricRwd,
            StageOverrides::new("Historic RWD compliance")
                .with(keys::SPRING_RATE_FRONT, Operation::scale(0.90))
                .with(keys::SPRING_RATE_REAR, Operation::scale(0.85))
                .with(keys::ARB_FRONT, Operation::scale(0.90))
                .with(keys::REAR_DIFF_PRELOAD, Operation::scale(0.80))
                .with(keys::REAR_DIFF_ACCEL, Operation::offset_ceiling(5.0, 70.0)),
        ),
    ])
}

fn default_surface() -> BTreeMap<Surface, StageOverrides> {
    BTreeMap::from([
        (
            Surface::Gravel,
            StageOverrides::new("Gravel compliance")
                .with_pair(keys::SPRING_RATE_FRONT, keys::SPRING_RATE_REAR, Operation::scale(0.65))
                .with(keys::ARB_FRONT, Operation::scale(0.70))
                .with(keys::ARB_REAR, Operation::scale(0.60))
                .with_pair(
                    keys::RIDE_HEIGHT_FRONT,
                    keys::RIDE_HEIGHT_REAR,
                    Operation::offset_ceiling(30.0, 180.0),
                )
                .with_pair(keys::FRONT_SLOW_BUMP, keys::REAR_SLOW_BUMP, Operation::scale(0.85))
                .with_pair(keys::FRONT_FAST_BUMP, keys::REAR_FAST_BUMP, Operation::scale(0.80))
                .with(keys::CAMBER_FRONT, Operation::set(-1.5))
                .with(keys::CAMBER_REAR, Operation::set(-1.0))
                .with(keys::FRONT_DIFF_ACCEL, Operation::offset_floor(-10.0, 40.0))
                .with(keys::REAR_DIFF_ACCEL, Operation::offset_floor(-5.0, 35.0)),
        ),
        (
            Surface::Snow,
            StageOverrides::new("Snow grip")
                .with_pair(keys::SPRING_RATE_FRONT, keys::SPRING_RATE_REAR, Operation::scale(0.55))
                .with_pair(keys::ARB_FRONT, keys::ARB_REAR, Operation::scale(0.50))
                .with_pair(
                    keys::RIDE_HEIGHT_FRONT,
                    keys::RIDE_HEIGHT_REAR,
                    Operation::offset_ceiling(40.0, 190.0),
                )
                .with(keys::CAMBER_FRONT, Operation::set(-0.8))
                .with(keys::CAMBER_REAR, Operation::set(-0.5))
                .with(keys::BRAKE_BIAS, Operation::offset_floor(-3.0, 55.0))
                .with(keys::FRONT_DIFF_ACCEL, Operation::offset_floor(-15.0, 35.0))
                .with(keys::REAR_DIFF_ACCEL, Operation::offset_floor(-10.0, 30.0)),
        ),
        (
            Surface::Mixed,
            StageOverrides::new("Mixed-surface compromise")
                .with_pair(keys::SPRING_RATE_FRONT, keys::SPRING_RATE_REAR, Operation::scale(0.85))
                .with_pair(keys::ARB_FRONT, keys::ARB_REAR, Operation::scale(0.85))
                .with_pair(
                    keys::RIDE_HEIGHT_FRONT,
                    keys::RIDE_HEIGHT_REAR,
                    Operation::offset_ceiling(12.0, 160.0),
                )
                .with(keys::CAMBER_FRONT, Operation::set(-2.0)),
        ),
    ])
}

fn default_condition() -> BTreeMap<TrackCondition, StageOverrides> {
    BTreeMap::from([
        (
            TrackCondition::Bumpy,
            StageOverrides::new("Bumpy: extra travel")
                .with_pair(
                    keys::RIDE_HEIGHT_FRONT,
                    keys::RIDE_HEIGHT_REAR,
                    Operation::offset_ceiling(10.0, 170.0),
                )
                .with_pair(keys::FRONT_FAST_BUMP, keys::REAR_FAST_BUMP, Operation::scale(0.90))
                .with_pair(
                    keys::FRONT_SLOW_REBOUND,
                    keys::REAR_SLOW_REBOUND,
                    Operation::scale(1.05),
                ),
        ),
        (
            TrackCondition::Rough,
            StageOverrides::new("Rough: protect the chassis")
                .with_pair(
                    keys::RIDE_HEIGHT_FRONT,
                    keys::RIDE_HEIGHT_REAR,
                    Operation::offset_ceiling(20.0, 190.0),
                )
                .with_pair(keys::FRONT_FAST_BUMP, keys::REAR_FAST_BUMP, Operation::scale(0.80))
                .with_pair(
                    keys::FRONT_FAST_REBOUND,
                    keys::REAR_FAST_REBOUND,
                    Operation::scale(0.90),
                )
                .with_pair(keys::SPRING_RATE_FRONT, keys::SPRING_RATE_REAR, Operation::scale(0.95)),
        ),
        (
            TrackCondition::Rutted,
            StageOverrides::new("Rutted: raise and support")
                .with_pair(
                    keys::RIDE_HEIGHT_FRONT,
                    keys::RIDE_HEIGHT_REAR,
                    Operation::offset_ceiling(25.0, 200.0),
                )
                .with_pair(keys::SPRING_RATE_FRONT, keys::SPRING_RATE_REAR, Operation::scale(1.05))
                .with(keys::ARB_FRONT, Operation::scale(1.10)),
        ),
    ])
}

fn default_weather() -> BTreeMap<Weather, StageOverrides> {
    BTreeMap::from([
        (
            Weather::Damp,
            StageOverrides::new("Damp: softer roll stiffness")
                .with(keys::ARB_FRONT, Operation::scale(0.92))
                .with(keys::ARB_REAR, Operation::scale(0.90))
                .with(keys::BRAKE_BIAS, Operation::offset_floor(-1.0, 55.0)),
        ),
        (
            Weather::Wet,
            StageOverrides::new("Wet: grip over response")
                .with_pair(keys::SPRING_RATE_FRONT, keys::SPRING_RATE_REAR, Operation::scale(0.85))
                .with(keys::ARB_FRONT, Operation::scale(0.85))
                .with(keys::ARB_REAR, Operation::scale(0.80))
                .with(keys::BRAKE_BIAS, Operation::offset_floor(-2.0, 55.0))
                .with(keys::FRONT_DIFF_ACCEL, Operation::offset_floor(-5.0, 40.0))
                .with(keys::REAR_DIFF_ACCEL, Operation::offset_floor(-5.0, 35.0)),
        ),
        (
            Weather::Snowfall,
            StageOverrides::new("Snowfall: maximum compliance")
                .with_pair(keys::SPRING_RATE_FRONT, keys::SPRING_RATE_REAR, Operation::scale(0.80))
                .with_pair(keys::ARB_FRONT, keys::ARB_REAR, Operation::scale(0.75))
                .with_pair(
                    keys::RIDE_HEIGHT_FRONT,
                    keys::RIDE_HEIGHT_REAR,
                    Operation::offset_ceiling(10.0, 200.0),
                )
                .with(keys::BRAKE_BIAS, Operation::offset_floor(-3.0, 52.0))
                .with(keys::FRONT_DIFF_ACCEL, Operation::offset_floor(-5.0, 35.0))
                .with(keys::REAR_DIFF_ACCEL, Operation::offset_floor(-5.0, 30.0)),
        ),
    ])
}
