// ABOUTME: Physical units of setup parameters with unit-suffix extraction and formatting
// ABOUTME: Turns "4250 Ns/m" or "67% front" into numbers and numbers back into suffixed strings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RallyWorks

use serde::{Deserialize, Serialize};

/// Unit tokens stripped before numeric parsing, longest first so `ns/m` is
/// removed before `n/m` could match part of it.
const UNIT_TOKENS: [&str; 11] = [
    "ns/m", "n/m", "nm", "mm", "psi", "deg", "front", "rear", "%", "°", "\"",
];

/// Declared unit of a setup parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    /// Spring and anti-roll bar rate
    NewtonsPerMetre,
    /// Damper rate
    NewtonSecondsPerMetre,
    /// Ride height
    Millimetres,
    /// Camber and toe (continuous)
    Degrees,
    /// Differential ramp angle (whole degrees)
    RampDegrees,
    /// Generic percentage (torque split)
    Percent,
    /// Percentage towards the front axle (brake bias)
    PercentFront,
    /// Pressure
    Psi,
    /// Differential preload torque
    NewtonMetres,
    /// Whole-number count (clutch plates)
    Count,
    /// Dimensionless or free-form (ratios, gear sets)
    None,
}

impl Unit {
    /// Whether values in this unit are whole numbers and get rounded on write
    #[must_use]
    pub const fn is_integral(self) -> bool {
        matches!(
            self,
            Self::NewtonsPerMetre
                | Self::NewtonSecondsPerMetre
                | Self::RampDegrees
                | Self::NewtonMetres
                | Self::Count
        )
    }

    /// Suffix appended when rendering a value of this unit
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::NewtonsPerMetre => " N/m",
            Self::NewtonSecondsPerMetre => " Ns/m",
            Self::Millimetres => " mm",
            Self::Degrees | Self::RampDegrees => "°",
            Self::Percent => "%",
            Self::PercentFront => "% front",
            Self::Psi => " PSI",
            Self::NewtonMetres => " Nm",
            Self::Count | Self::None => "",
        }
    }
}

/// Strip known unit tokens and whitespace from `raw` and parse what is left.
///
/// Returns `None` when nothing numeric remains; callers treat that as
/// "not a number", never as an error.
#[must_use]
pub fn extract_numeric(raw: &str) -> Option<f64> {
    let mut cleaned = raw.to_lowercase();
    for token in UNIT_TOKENS {
        cleaned = cleaned.replace(token, "");
    }
    cleaned.retain(|c| !c.is_whitespace());

    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Render `value` with the suffix of `unit`
#[must_use]
pub fn format_value(value: f64, unit: Unit) -> String {
    format!("{value}{}", unit.suffix())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_numeric_strips_units() {
        assert_eq!(extract_numeric("4250 Ns/m"), Some(4250.0));
        assert_eq!(extract_numeric("40000 N/m"), Some(40000.0));
        assert_eq!(extract_numeric("67% front"), Some(67.0));
        assert_eq!(extract_numeric("-2.4°"), Some(-2.4));
        assert_eq!(extract_numeric(" 90 Nm "), Some(90.0));
        assert_eq!(extract_numeric("130.5 mm"), Some(130.5));
        assert_eq!(extract_numeric("1000 PSI"), Some(1000.0));
    }

    #[test]
    fn test_extract_numeric_rejects_text() {
        assert_eq!(extract_numeric("Set 2 (Balanced)"), None);
        assert_eq!(extract_numeric("50//12"), None);
        assert_eq!(extract_numeric("60_75"), None);
        assert_eq!(extract_numeric(""), None);
        assert_eq!(extract_numeric("front"), None);
        assert_eq!(extract_numeric("inf"), None);
    }

    #[test]
    fn test_format_value_reparses_to_same_number() {
        for (value, unit) in [
            (38675.0, Unit::NewtonsPerMetre),
            (4250.0, Unit::NewtonSecondsPerMetre),
            (-2.4, Unit::Degrees),
            (67.5, Unit::PercentFront),
            (0.006, Unit::Degrees),
        ] {
            let rendered = format_value(value, unit);
            assert_eq!(extract_numeric(&rendered), Some(value), "{rendered}");
        }
        assert_eq!(format_value(38675.0, Unit::NewtonsPerMetre), "38675 N/m");
        assert_eq!(format_value(67.0, Unit::PercentFront), "67% front");
    }
}
