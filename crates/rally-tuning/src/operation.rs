// ABOUTME: Per-parameter operations applied by modifier stages
// ABOUTME: Multiply by a factor, set an absolute value, or add a delta with a stage floor/ceiling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RallyWorks

use std::fmt;

use rally_core::{SetupError, SetupResult};
use serde::{Deserialize, Serialize};

/// One override inside a stage table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    /// `new = current * factor`
    Scale {
        /// Multiplicative factor, strictly positive
        factor: f64,
    },
    /// `new = value`
    Set {
        /// Absolute value
        value: f64,
    },
    /// `new = current + delta`, then limited by the stage's own floor/ceiling
    ///
    /// The floor and ceiling are independent of the vehicle's global range,
    /// which is still applied afterwards.
    Offset {
        /// Additive delta
        delta: f64,
        /// Stage-specific minimum
        #[serde(default, skip_serializing_if = "Option::is_none")]
        floor: Option<f64>,
        /// Stage-specific maximum
        #[serde(default, skip_serializing_if = "Option::is_none")]
        ceiling: Option<f64>,
    },
}

impl Operation {
    /// Multiply by `factor`
    #[must_use]
    pub const fn scale(factor: f64) -> Self {
        Self::Scale { factor }
    }

    /// Set to `value`
    #[must_use]
    pub const fn set(value: f64) -> Self {
        Self::Set { value }
    }

    /// Add `delta` with no stage limit
    #[must_use]
    pub const fn offset(delta: f64) -> Self {
        Self::Offset {
            delta,
            floor: None,
            ceiling: None,
        }
    }

    /// Add `delta`, never going below `floor`
    #[must_use]
    pub const fn offset_floor(delta: f64, floor: f64) -> Self {
        Self::Offset {
            delta,
            floor: Some(floor),
            ceiling: None,
        }
    }

    /// Add `delta`, never going above `ceiling`
    #[must_use]
    pub const fn offset_ceiling(delta: f64, ceiling: f64) -> Self {
        Self::Offset {
            delta,
            floor: None,
            ceiling: Some(ceiling),
        }
    }

    /// Candidate value before global clamping and rounding
    #[must_use]
    pub fn apply(&self, current: f64) -> f64 {
        match *self {
            Self::Scale { factor } => current * factor,
            Self::Set { value } => value,
            Self::Offset {
                delta,
                floor,
                ceiling,
            } => {
                let mut candidate = current + delta;
                if let Some(floor) = floor {
                    candidate = candidate.max(floor);
                }
                if let Some(ceiling) = ceiling {
                    candidate = candidate.min(ceiling);
                }
                candidate
            }
        }
    }

    /// Check the operation's constants
    ///
    /// # Errors
    ///
    /// Returns `SetupError::InvalidConfig` for non-finite numbers, a
    /// non-positive scale factor, or a floor above the ceiling
    pub fn validate(&self, key: &str) -> SetupResult<()> {
        match *self {
            Self::Scale { factor } => {
                if !factor.is_finite() || factor <= 0.0 {
                    return Err(SetupError::invalid_config(format!(
                        "{key}: scale factor must be finite and > 0, got {factor}"
                    )));
                }
            }
            Self::Set { value } => {
                if !value.is_finite() {
                    return Err(SetupError::invalid_config(format!(
                        "{key}: absolute value must be finite"
                    )));
                }
            }
            Self::Offset {
                delta,
                floor,
                ceiling,
            } => {
                let limits_finite =
                    floor.is_none_or(f64::is_finite) && ceiling.is_none_or(f64::is_finite);
                if !delta.is_finite() || !limits_finite {
                    return Err(SetupError::invalid_config(format!(
                        "{key}: offset delta and limits must be finite"
                    )));
                }
                if let (Some(floor), Some(ceiling)) = (floor, ceiling) {
                    if floor > ceiling {
                        return Err(SetupError::invalid_config(format!(
                            "{key}: offset floor {floor} exceeds ceiling {ceiling}"
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Scale { factor } => write!(f, "x{factor}"),
            Self::Set { value } => write!(f, "= {value}"),
            Self::Offset {
                delta,
                floor,
                ceiling,
            } => {
                write!(f, "{delta:+}")?;
                if let Some(floor) = floor {
                    write!(f, " (floor {floor})")?;
                }
                if let Some(ceiling) = ceiling {
                    write!(f, " (ceiling {ceiling})")?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply() {
        assert!((Operation::scale(0.65).apply(70000.0) - 45500.0).abs() < 1e-6);
        assert!((Operation::set(-1.5).apply(-2.5) + 1.5).abs() < f64::EPSILON);
        assert!((Operation::offset_floor(-10.0, 40.0).apply(45.0) - 40.0).abs() < f64::EPSILON);
        assert!((Operation::offset_ceiling(30.0, 180.0).apply(160.0) - 180.0).abs() < f64::EPSILON);
        assert!((Operation::offset(5.0).apply(60.0) - 65.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_validate() {
        assert!(Operation::scale(0.0).validate("k").is_err());
        assert!(Operation::scale(f64::NAN).validate("k").is_err());
        let inverted = Operation::Offset {
            delta: 1.0,
            floor: Some(10.0),
            ceiling: Some(5.0),
        };
        assert!(inverted.validate("k").is_err());
        assert!(Operation::offset_floor(-5.0, 40.0).validate("k").is_ok());
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_value(Operation::offset_floor(-10.0, 40.0)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"op": "offset", "delta": -10.0, "floor": 40.0})
        );
        let parsed: Operation = serde_json::from_str(r#"{"op":"scale","factor":0.85}"#).unwrap();
        assert_eq!(parsed, Operation::scale(0.85));
    }
}
