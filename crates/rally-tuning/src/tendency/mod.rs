// ABOUTME: Tendency profiles converting a car's default setup for a target surface
// ABOUTME: Per-car multipliers, absolute values and ramp angles, clamped to that car's ranges
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RallyWorks

use std::collections::BTreeMap;

use rally_core::{
    Axle, ParamValue, ParameterSet, RampAngle, RangeTable, SetupError, SetupResult, Surface,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::comparison::{compare_sets, Comparison};
use crate::operation::Operation;
use crate::validation::write_value;

/// Built-in Lancia Delta HF Integrale profile
pub mod lancia;

/// One adjustment of a tendency profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum TendencyAdjustment {
    /// Multiply the default value
    Scale {
        /// Factor
        factor: f64,
    },
    /// Replace with an absolute value
    Set {
        /// Value
        value: f64,
    },
    /// Replace a differential's ramp angles with `<accel>_<decel>`
    Ramp {
        /// Axle of the differential
        axle: Axle,
        /// Compound ramp string
        angles: String,
    },
    /// Replace with free-form text
    Text {
        /// Text value
        value: String,
    },
}

/// Conversion of one car's defaults towards a target surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TendencyProfile {
    /// Car display name
    pub car: String,
    /// Target surface
    pub surface: Surface,
    /// Where the tendencies come from
    pub source: String,
    /// The car's default setup
    pub defaults: ParameterSet,
    /// The car's adjustable ranges
    pub ranges: RangeTable,
    /// Adjustment per parameter key; ramp entries are keyed by their axle
    pub adjustments: BTreeMap<String, TendencyAdjustment>,
}

impl TendencyProfile {
    /// Apply every adjustment to a copy of the defaults
    ///
    /// Keys without an adjustment keep their default value.
    ///
    /// # Errors
    ///
    /// Returns `SetupError::Format` when a ramp string is malformed
    pub fn suggest(&self) -> SetupResult<ParameterSet> {
        let mut suggestion = self.defaults.clone();

        for (key, adjustment) in &self.adjustments {
            match adjustment {
                TendencyAdjustment::Scale { factor } => {
                    let Some(current) = suggestion.get_f64(key) else {
                        debug!(car = %self.car, key, "no numeric default to scale");
                        continue;
                    };
                    let scaled = Operation::scale(*factor).apply(current);
                    suggestion.insert(key.as_str(), write_value(&self.ranges, key, scaled));
                }
                TendencyAdjustment::Set { value } => {
                    suggestion.insert(key.as_str(), write_value(&self.ranges, key, *value));
                }
                TendencyAdjustment::Ramp { axle, angles } => {
                    let ramp = angles.parse::<RampAngle>()?.clamped(*axle, &self.ranges);
                    suggestion.insert(
                        axle.accel_key(),
                        write_value(&self.ranges, axle.accel_key(), ramp.accel),
                    );
                    suggestion.insert(
                        axle.decel_key(),
                        write_value(&self.ranges, axle.decel_key(), ramp.decel),
                    );
                }
                TendencyAdjustment::Text { value } => {
                    suggestion.insert(key.as_str(), ParamValue::Text(value.clone()));
                }
            }
        }

        Ok(suggestion)
    }

    /// Suggestion classified against the defaults
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Self::suggest`]
    pub fn compare(&self) -> SetupResult<BTreeMap<String, Comparison>> {
        Ok(compare_sets(&self.defaults, &self.suggest()?))
    }

    /// Check ranges and adjustment constants
    ///
    /// # Errors
    ///
    /// Returns `SetupError::InvalidRange`, `SetupError::InvalidConfig` or
    /// `SetupError::Format` for the first bad entry
    pub fn validate(&self) -> SetupResult<()> {
        self.ranges.validate()?;
        for (key, adjustment) in &self.adjustments {
            match adjustment {
                TendencyAdjustment::Scale { factor } => Operation::scale(*factor).validate(key)?,
                TendencyAdjustment::Set { value } => Operation::set(*value).validate(key)?,
                TendencyAdjustment::Ramp { angles, .. } => {
                    angles.parse::<RampAngle>()?;
                }
                TendencyAdjustment::Text { .. } => {}
            }
        }
        Ok(())
    }
}

/// All known tendency profiles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TendencyCatalog {
    profiles: Vec<TendencyProfile>,
}

impl TendencyCatalog {
    /// Catalog from explicit profiles
    ///
    /// # Errors
    ///
    /// Returns the first validation error of any profile
    pub fn new(profiles: Vec<TendencyProfile>) -> SetupResult<Self> {
        for profile in &profiles {
            profile.validate()?;
        }
        Ok(Self { profiles })
    }

    /// Catalog with the built-in profiles
    ///
    /// # Errors
    ///
    /// Returns an error if built-in data fails validation
    pub fn builtin() -> SetupResult<Self> {
        Self::new(vec![lancia::delta_integrale_gravel()?])
    }

    /// Profile for `car` on `surface`
    #[must_use]
    pub fn profile(&self, car: &str, surface: Surface) -> Option<&TendencyProfile> {
        self.profiles
            .iter()
            .find(|profile| profile.car == car && profile.surface == surface)
    }

    /// Whether a profile exists for `car` on `surface`
    #[must_use]
    pub fn has_profile(&self, car: &str, surface: Surface) -> bool {
        self.profile(car, surface).is_some()
    }

    /// Suggested setup for `car` on `surface`
    ///
    /// # Errors
    ///
    /// Returns `SetupError::NotSupported` when no profile exists, or the
    /// profile's own error
    pub fn suggest(&self, car: &str, surface: Surface) -> SetupResult<ParameterSet> {
        self.profile(car, surface)
            .ok_or_else(|| SetupError::not_supported(car, surface))?
            .suggest()
    }

    /// `(car, surface)` pairs with a profile
    pub fn supported(&self) -> impl Iterator<Item = (&str, Surface)> {
        self.profiles
            .iter()
            .map(|profile| (profile.car.as_str(), profile.surface))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparison::Direction;
    use rally_core::catalog::keys;

    const LANCIA: &str = lancia::CAR_NAME;

    #[test]
    fn test_lancia_gravel_suggestion() {
        let catalog = TendencyCatalog::builtin().unwrap();
        let suggestion = catalog.suggest(LANCIA, Surface::Gravel).unwrap();

        let expect = |key: &str, value: f64| {
            let actual = suggestion.get_f64(key).unwrap();
            assert!((actual - value).abs() < 1e-9, "{key}: {actual} != {value}");
        };
        expect(keys::SPRING_RATE_FRONT, 60000.0);
        expect(keys::SPRING_RATE_REAR, 52000.0);
        // 11500 * 1.04 = 11960, raised to the 12000 minimum
        expect(keys::ARB_FRONT, 12000.0);
        expect(keys::ARB_REAR, 6750.0);
        expect(keys::RIDE_HEIGHT_FRONT, 100.0);
        expect(keys::RIDE_HEIGHT_REAR, 85.0);
        expect(keys::FRONT_SLOW_BUMP, 3825.0);
        expect(keys::FRONT_SLOW_REBOUND, 9900.0);
        expect(keys::FRONT_FAST_BUMP, 2300.0);
        expect(keys::FRONT_FAST_REBOUND, 5400.0);
        expect(keys::REAR_SLOW_BUMP, 3000.0);
        expect(keys::REAR_SLOW_REBOUND, 7762.0);
        expect(keys::REAR_FAST_BUMP, 2125.0);
        expect(keys::REAR_FAST_REBOUND, 4950.0);
        expect(keys::CAMBER_FRONT, -1.5);
        expect(keys::CAMBER_REAR, -0.4);
        expect(keys::TOE_REAR, -0.2);
        expect(keys::BRAKE_BIAS, 66.0);
        expect(keys::FRONT_DIFF_ACCEL, 55.0);
        expect(keys::FRONT_DIFF_DECEL, 85.0);
        expect(keys::FRONT_DIFF_PRELOAD, 40.0);
        expect(keys::REAR_DIFF_ACCEL, 55.0);
        expect(keys::REAR_DIFF_DECEL, 75.0);
        expect(keys::REAR_DIFF_PRELOAD, 70.0);
        expect(keys::CENTRE_SPLIT, 30.0);
        assert_eq!(
            suggestion.get(keys::GEAR_SET),
            Some(&ParamValue::from("Set 2 (Balanced)"))
        );
        assert_eq!(
            suggestion.get(keys::CENTRE_DIFF_RATIO),
            Some(&ParamValue::from("50//12"))
        );
    }

    #[test]
    fn test_lancia_comparison_directions() {
        let catalog = TendencyCatalog::builtin().unwrap();
        let comparison = catalog.profile(LANCIA, Surface::Gravel).unwrap().compare().unwrap();
        assert_eq!(comparison[keys::SPRING_RATE_FRONT].direction, Direction::Increase);
        assert_eq!(comparison[keys::ARB_REAR].direction, Direction::Decrease);
        assert_eq!(comparison[keys::TOE_FRONT].direction, Direction::Unchanged);
        // Only keys present in the defaults are compared
        assert!(!comparison.contains_key(keys::GEAR_SET));
    }

    #[test]
    fn test_unsupported_pairs() {
        let catalog = TendencyCatalog::builtin().unwrap();
        assert!(catalog.has_profile(LANCIA, Surface::Gravel));
        assert!(!catalog.has_profile(LANCIA, Surface::Asphalt));
        assert!(matches!(
            catalog.suggest("Ford Escort Mk2", Surface::Gravel),
            Err(SetupError::NotSupported { .. })
        ));
    }

    #[test]
    fn test_malformed_ramp_is_a_format_error() {
        let mut profile = lancia::delta_integrale_gravel().unwrap();
        profile.adjustments.insert(
            "front_ramp".to_owned(),
            TendencyAdjustment::Ramp {
                axle: Axle::Front,
                angles: "55-85".to_owned(),
            },
        );
        assert!(matches!(profile.suggest(), Err(SetupError::Format { .. })));
        assert!(TendencyCatalog::new(vec![profile]).is_err());
    }
}
