// ABOUTME: Range clamp and fail-soft validation of edited values
// ABOUTME: Every write into a parameter set goes through write_value so bounds always hold
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RallyWorks

use rally_core::catalog::unit_of;
use rally_core::{ParamValue, ParameterSet, RangeTable};
use tracing::debug;

pub use rally_core::clamp;

/// Clamp `candidate` to the bounds of `key` and round integral units
///
/// Rounding is half-to-even and the result is clamped again, so a range
/// with fractional bounds can never be escaped through rounding.
#[must_use]
pub fn write_value(ranges: &RangeTable, key: &str, candidate: f64) -> f64 {
    let clamped = ranges.clamp(key, candidate);
    if unit_of(key).is_integral() {
        ranges.clamp(key, clamped.round_ties_even())
    } else {
        clamped
    }
}

/// Validate one edited value
///
/// Returns `None` when the input must be rejected; the caller then keeps the
/// previously committed value. Bounded keys and keys that currently hold a
/// number accept only input with a finite numeric part. Other keys are
/// free-form and accept any non-blank text.
#[must_use]
pub fn parse_edit(
    key: &str,
    raw: &ParamValue,
    previous: Option<&ParamValue>,
    ranges: &RangeTable,
) -> Option<ParamValue> {
    let numeric_slot = ranges.get(key).is_some() || previous.is_some_and(ParamValue::is_numeric);

    if numeric_slot {
        let Some(value) = raw.extract_f64().filter(|value| value.is_finite()) else {
            debug!(key, input = %raw, "rejected non-numeric edit");
            return None;
        };
        return Some(ParamValue::Numeric(write_value(ranges, key, value)));
    }

    match raw {
        ParamValue::Numeric(value) if value.is_finite() => Some(ParamValue::Numeric(*value)),
        ParamValue::Numeric(_) => None,
        ParamValue::Text(text) => {
            let text = text.trim();
            if text.is_empty() {
                None
            } else {
                Some(ParamValue::parse(text))
            }
        }
    }
}

/// Keys whose numeric value lies outside the bounds of `ranges`
#[must_use]
pub fn out_of_range<'a>(parameters: &'a ParameterSet, ranges: &RangeTable) -> Vec<&'a str> {
    parameters
        .iter()
        .filter_map(|(key, value)| {
            let range = ranges.get(key)?;
            let number = value.as_f64()?;
            (!range.contains(number)).then_some(key.as_str())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rally_core::catalog::keys;

    fn ranges() -> RangeTable {
        RangeTable::new("test")
            .with(keys::SPRING_RATE_FRONT, 30000.0, 90000.0)
            .unwrap()
            .with(keys::CAMBER_FRONT, -3.5, 1.0)
            .unwrap()
            .with(keys::RIDE_HEIGHT_FRONT, 0.0, 200.0)
            .unwrap()
    }

    #[test]
    fn test_write_value_clamps_then_rounds_integral_units() {
        let ranges = ranges();
        assert!(
            (write_value(&ranges, keys::SPRING_RATE_FRONT, 45500.4) - 45500.0).abs() < f64::EPSILON
        );
        assert!(
            (write_value(&ranges, keys::SPRING_RATE_FRONT, 7762.5) - 30000.0).abs() < f64::EPSILON
        );
        assert!(
            (write_value(&ranges, keys::SPRING_RATE_FRONT, 1.0e9) - 90000.0).abs() < f64::EPSILON
        );
        // Millimetres keep their fraction
        assert!((write_value(&ranges, keys::RIDE_HEIGHT_FRONT, 97.5) - 97.5).abs() < f64::EPSILON);
        // Unbounded keys pass through
        assert!((write_value(&ranges, keys::TOE_REAR, 0.123) - 0.123).abs() < f64::EPSILON);
    }

    #[test]
    fn test_write_value_ties_to_even() {
        let ranges = RangeTable::new("test");
        assert!(
            (write_value(&ranges, keys::REAR_SLOW_REBOUND, 7762.5) - 7762.0).abs() < f64::EPSILON
        );
        assert!(
            (write_value(&ranges, keys::REAR_SLOW_REBOUND, 7763.5) - 7764.0).abs() < f64::EPSILON
        );
    }

    #[test]
    fn test_parse_edit_clamps_suffixed_input() {
        let ranges = ranges();
        let previous = ParamValue::Numeric(-2.0);
        let parsed = parse_edit(
            keys::CAMBER_FRONT,
            &ParamValue::from("-5.0°"),
            Some(&previous),
            &ranges,
        );
        assert_eq!(parsed, Some(ParamValue::Numeric(-3.5)));
    }

    #[test]
    fn test_parse_edit_rejects_garbage_for_numeric_slots() {
        let ranges = ranges();
        let previous = ParamValue::Numeric(-2.0);
        assert_eq!(
            parse_edit(keys::CAMBER_FRONT, &ParamValue::from("abc"), Some(&previous), &ranges),
            None
        );
        assert_eq!(
            parse_edit(keys::CAMBER_FRONT, &ParamValue::from(""), Some(&previous), &ranges),
            None
        );
        // Unbounded but currently numeric
        assert_eq!(
            parse_edit(
                keys::TOE_REAR,
                &ParamValue::from("n/a"),
                Some(&ParamValue::Numeric(0.1)),
                &ranges,
            ),
            None
        );
    }

    #[test]
    fn test_parse_edit_free_form_keys() {
        let ranges = ranges();
        let previous = ParamValue::from("Set 1 (Short)");
        assert_eq!(
            parse_edit(
                keys::GEAR_SET,
                &ParamValue::from(" Set 3 (Long) "),
                Some(&previous),
                &ranges,
            ),
            Some(ParamValue::from("Set 3 (Long)"))
        );
        assert_eq!(
            parse_edit(keys::GEAR_SET, &ParamValue::from("   "), Some(&previous), &ranges),
            None
        );
    }

    #[test]
    fn test_out_of_range() {
        let ranges = ranges();
        let mut set = ParameterSet::new();
        set.insert(keys::SPRING_RATE_FRONT, 20000.0);
        set.insert(keys::CAMBER_FRONT, -1.0);
        set.insert(keys::GEAR_SET, "Set 2");
        assert_eq!(out_of_range(&set, &ranges), vec![keys::SPRING_RATE_FRONT]);
    }
}
