// ABOUTME: Parameter set mapping flat parameter keys to tagged values
// ABOUTME: Ordered storage with prefix projections for semantic groups
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RallyWorks

use std::collections::btree_map::{self, BTreeMap};

use serde::{Deserialize, Serialize};

use crate::models::value::ParamValue;

/// Mapping from parameter key to value
///
/// Keys are kept sorted so iteration, serialization and logging are
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterSet {
    values: BTreeMap<String, ParamValue>,
}

impl ParameterSet {
    /// Create an empty set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Value stored under `key`
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.values.get(key)
    }

    /// Numeric value stored under `key`; `None` for absent or text values
    #[must_use]
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.values.get(key).and_then(ParamValue::as_f64)
    }

    /// Insert or replace a value, returning the previous one
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<ParamValue>,
    ) -> Option<ParamValue> {
        self.values.insert(key.into(), value.into())
    }

    /// Remove a key
    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        self.values.remove(key)
    }

    /// Whether `key` is present
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Number of parameters
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the set holds no parameters
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate in key order
    pub fn iter(&self) -> btree_map::Iter<'_, String, ParamValue> {
        self.values.iter()
    }

    /// Iterate keys in order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Keep only the entries for which `keep` returns true
    pub fn retain(&mut self, mut keep: impl FnMut(&str, &ParamValue) -> bool) {
        self.values.retain(|key, value| keep(key, value));
    }

    /// Sub-set of parameters whose key starts with `prefix`
    ///
    /// An empty result means the group is absent (e.g. no rear differential
    /// on a front-driven car), not that its values are zero.
    #[must_use]
    pub fn section(&self, prefix: &str) -> Self {
        self.values
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

impl FromIterator<(String, ParamValue)> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = (String, ParamValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ParameterSet {
    type Item = (&'a String, &'a ParamValue);
    type IntoIter = btree_map::Iter<'a, String, ParamValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl IntoIterator for ParameterSet {
    type Item = (String, ParamValue);
    type IntoIter = btree_map::IntoIter<String, ParamValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_projection() {
        let mut set = ParameterSet::new();
        set.insert("front_diff_accel", 60.0);
        set.insert("front_diff_preload", 60.0);
        set.insert("arb_front", 18500.0);

        let front_diff = set.section("front_diff_");
        assert_eq!(front_diff.len(), 2);
        assert!(set.section("rear_diff_").is_empty());
    }

    #[test]
    fn test_numeric_accessor_ignores_text() {
        let mut set = ParameterSet::new();
        set.insert("gear_set", "Set 2 (Balanced)");
        set.insert("spring_rate_front", 70000.0);

        assert_eq!(set.get_f64("spring_rate_front"), Some(70000.0));
        assert_eq!(set.get_f64("gear_set"), None);
        assert_eq!(set.get_f64("missing"), None);
    }
}
