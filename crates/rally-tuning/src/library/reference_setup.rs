// ABOUTME: One car's reference setup for one surface, keyed by dotted reference path
// ABOUTME: Section and subsection queries plus conversion into a flat parameter set
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RallyWorks

use std::collections::BTreeMap;

use rally_core::catalog::{spec_for_path, Section};
use rally_core::{Axle, ParamValue, ParameterSet, RampAngle, Surface, TractionLayout};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One reference value: the raw text and its resolved form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceEntry {
    /// Value as found in the data, quotes stripped
    pub raw: String,
    /// Resolved once at load time
    pub value: ParamValue,
}

impl ReferenceEntry {
    /// Resolve a raw value
    #[must_use]
    pub fn new(raw: &str) -> Self {
        let raw = raw.trim().trim_matches('"').to_owned();
        let value = ParamValue::parse(&raw);
        Self { raw, value }
    }
}

/// Reference setup of one car on one surface
///
/// Records may be partial: a front-drive car simply has no rear or centre
/// differential paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceSetup {
    /// Car display name
    pub car: String,
    /// Drive type from the first row seen for the car
    pub drive_type: Option<TractionLayout>,
    /// Surface the setup is for
    pub surface: Surface,
    entries: BTreeMap<String, ReferenceEntry>,
}

impl ReferenceSetup {
    /// Empty setup
    #[must_use]
    pub fn new(
        car: impl Into<String>,
        drive_type: Option<TractionLayout>,
        surface: Surface,
    ) -> Self {
        Self {
            car: car.into(),
            drive_type,
            surface,
            entries: BTreeMap::new(),
        }
    }

    /// Store a value; a later value for the same path replaces the earlier one
    pub fn insert(&mut self, path: impl Into<String>, entry: ReferenceEntry) {
        self.entries.insert(path.into(), entry);
    }

    /// Entry at `path`
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&ReferenceEntry> {
        self.entries.get(path)
    }

    /// Raw text at `path`
    #[must_use]
    pub fn raw(&self, path: &str) -> Option<&str> {
        self.entries.get(path).map(|entry| entry.raw.as_str())
    }

    /// Number of stored paths
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no path is stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries under `prefix`, e.g. `"drivetrain.rearDiff"`
    #[must_use]
    pub fn subsection(&self, prefix: &str) -> BTreeMap<&str, &ReferenceEntry> {
        let prefix = format!("{}.", prefix.trim_end_matches('.'));
        self.entries
            .iter()
            .filter(|(path, _)| path.starts_with(&prefix))
            .map(|(path, entry)| (path.as_str(), entry))
            .collect()
    }

    /// Entries of one top-level section
    #[must_use]
    pub fn section(&self, section: Section) -> BTreeMap<&str, &ReferenceEntry> {
        self.subsection(section.name())
    }

    /// Ramp angles of `axle`, when present
    ///
    /// Ramp strings are validated at load time, so a stored one always parses.
    #[must_use]
    pub fn ramp_angle(&self, axle: Axle) -> Option<RampAngle> {
        self.raw(axle.ramp_path())?.parse().ok()
    }

    /// Flat parameter set of every catalogued path
    ///
    /// Ramp-angle pairs expand into their accel/decel keys; paths without a
    /// catalogue entry are skipped.
    #[must_use]
    pub fn to_parameter_set(&self) -> ParameterSet {
        let mut parameters = ParameterSet::new();

        for axle in Axle::ALL {
            if let Some(ramp) = self.ramp_angle(axle) {
                parameters.insert(axle.accel_key(), ramp.accel);
                parameters.insert(axle.decel_key(), ramp.decel);
            }
        }

        for (path, entry) in &self.entries {
            if Axle::ALL.iter().any(|axle| axle.ramp_path() == path) {
                continue;
            }
            match spec_for_path(path) {
                Some(spec) => {
                    parameters.insert(spec.key, entry.value.clone());
                }
                None => debug!(car = %self.car, path, "uncatalogued reference path"),
            }
        }

        parameters
    }

    /// Iterate over `(path, entry)` in path order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ReferenceEntry)> {
        self.entries.iter().map(|(path, entry)| (path.as_str(), entry))
    }
}
