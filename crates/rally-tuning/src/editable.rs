// ABOUTME: Editable parameter set with fail-soft validation of user edits
// ABOUTME: Rejected edits keep the last committed value; reset restores the baseline
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RallyWorks

use rally_core::{ParamValue, ParameterSet, RangeTable};
use tracing::{debug, warn};

use crate::validation::parse_edit;

/// A parameter set under interactive editing
#[derive(Debug, Clone, PartialEq)]
pub struct EditableParameterSet {
    values: ParameterSet,
    baseline: ParameterSet,
    ranges: RangeTable,
}

impl EditableParameterSet {
    /// Start editing from `baseline`
    #[must_use]
    pub fn new(baseline: ParameterSet, ranges: RangeTable) -> Self {
        Self {
            values: baseline.clone(),
            baseline,
            ranges,
        }
    }

    /// Validate and commit one edit
    ///
    /// Returns the committed value for `key` after the edit: the new value
    /// when accepted, otherwise the previous one. `None` means the key had no
    /// value and the input was rejected.
    pub fn validate_and_parse(
        &mut self,
        key: &str,
        raw: impl Into<ParamValue>,
    ) -> Option<&ParamValue> {
        let raw = raw.into();
        match parse_edit(key, &raw, self.values.get(key), &self.ranges) {
            Some(accepted) => {
                debug!(key, value = %accepted, "edit committed");
                self.values.insert(key, accepted);
            }
            None => {
                warn!(key, input = %raw, "edit rejected, keeping previous value");
            }
        }
        self.values.get(key)
    }

    /// Current value of `key`
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.values.get(key)
    }

    /// Current values
    #[must_use]
    pub const fn values(&self) -> &ParameterSet {
        &self.values
    }

    /// Bounds applied to edits
    #[must_use]
    pub const fn ranges(&self) -> &RangeTable {
        &self.ranges
    }

    /// Keys whose value differs from the baseline, including added keys
    #[must_use]
    pub fn modified_keys(&self) -> Vec<&str> {
        self.values
            .iter()
            .filter(|(key, value)| self.baseline.get(key) != Some(*value))
            .map(|(key, _)| key.as_str())
            .collect()
    }

    /// Whether any edit changed the baseline
    #[must_use]
    pub fn is_custom(&self) -> bool {
        self.values != self.baseline
    }

    /// Drop all edits
    pub fn reset(&mut self) {
        self.values = self.baseline.clone();
    }

    /// Finish editing
    #[must_use]
    pub fn into_parameters(self) -> ParameterSet {
        self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rally_core::catalog::keys;

    fn editable() -> EditableParameterSet {
        let mut baseline = ParameterSet::new();
        baseline.insert(keys::SPRING_RATE_FRONT, 45000.0);
        baseline.insert(keys::CAMBER_FRONT, -2.0);
        baseline.insert(keys::GEAR_SET, "Set 2 (Balanced)");
        let ranges = RangeTable::new("test")
            .with(keys::SPRING_RATE_FRONT, 40000.0, 75000.0)
            .unwrap()
            .with(keys::CAMBER_FRONT, -3.5, 1.0)
            .unwrap();
        EditableParameterSet::new(baseline, ranges)
    }

    #[test]
    fn test_malformed_edit_keeps_previous_value() {
        let mut set = editable();
        let committed = set.validate_and_parse(keys::SPRING_RATE_FRONT, "abc").cloned();
        assert_eq!(committed, Some(ParamValue::Numeric(45000.0)));
        assert!(!set.is_custom());
    }

    #[test]
    fn test_out_of_range_edit_is_clamped() {
        let mut set = editable();
        let committed = set.validate_and_parse(keys::CAMBER_FRONT, "-5.0°").cloned();
        assert_eq!(committed, Some(ParamValue::Numeric(-3.5)));
        assert_eq!(set.modified_keys(), vec![keys::CAMBER_FRONT]);
    }

    #[test]
    fn test_suffixed_edit_is_rounded_for_integral_units() {
        let mut set = editable();
        let committed = set.validate_and_parse(keys::SPRING_RATE_FRONT, "52000.4 N/m").cloned();
        assert_eq!(committed, Some(ParamValue::Numeric(52000.0)));
    }

    #[test]
    fn test_free_form_edit_and_reset() {
        let mut set = editable();
        set.validate_and_parse(keys::GEAR_SET, "Set 3 (Long)");
        assert_eq!(set.get(keys::GEAR_SET), Some(&ParamValue::from("Set 3 (Long)")));
        assert!(set.is_custom());

        set.reset();
        assert!(!set.is_custom());
        assert_eq!(set.get(keys::GEAR_SET), Some(&ParamValue::from("Set 2 (Balanced)")));
    }

    #[test]
    fn test_rejected_edit_of_unknown_key_stays_absent() {
        let mut set = editable();
        assert_eq!(set.validate_and_parse("mystery", ""), None);
        assert!(set.get("mystery").is_none());
    }
}
