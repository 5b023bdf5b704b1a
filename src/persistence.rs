// ABOUTME: Persisted setup format: metadata plus five sections of unit-suffixed strings
// ABOUTME: Pretty-printed JSON save/load; save-load-save is byte-stable apart from the timestamp
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RallyWorks

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use rally_core::catalog::{spec_at, spec_for, Position, Section};
use rally_core::units::format_value;
use rally_core::{ParamValue, ParameterSet, Selection, Surface};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::{AppError, AppResult};

/// Version written into new files
pub const FORMAT_VERSION: u32 = 1;

/// `position label → field → unit-suffixed value`
pub type SectionValues = BTreeMap<String, BTreeMap<String, String>>;

/// Who and what a saved setup is for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupMetadata {
    /// Car name, or car class for formula-mode results
    pub car: String,
    /// Target surface
    #[serde(default)]
    pub surface: Option<Surface>,
    /// Full selection when the setup came from the modifier pipeline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection: Option<Selection>,
    /// Engineering profile label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    /// Save time
    pub saved_at: DateTime<Utc>,
    /// Format version
    pub version: u32,
    /// Whether the values were edited by hand
    #[serde(default)]
    pub custom: bool,
}

impl SetupMetadata {
    /// Metadata stamped with the current time
    #[must_use]
    pub fn new(car: impl Into<String>, surface: Option<Surface>) -> Self {
        Self {
            car: car.into(),
            surface,
            selection: None,
            profile: None,
            saved_at: Utc::now(),
            version: FORMAT_VERSION,
            custom: false,
        }
    }
}

/// A setup as stored on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedSetup {
    /// Metadata
    pub metadata: SetupMetadata,
    /// Springs, anti-roll bars, ride height
    #[serde(default)]
    pub suspension: SectionValues,
    /// Damper rates
    #[serde(default)]
    pub dampers: SectionValues,
    /// Pressures and alignment
    #[serde(default)]
    pub tyres: SectionValues,
    /// Bias and pressures
    #[serde(default)]
    pub brakes: SectionValues,
    /// Differentials and gearing
    #[serde(default)]
    pub drivetrain: SectionValues,
}

impl PersistedSetup {
    /// Lay out `parameters` by section, position and field
    ///
    /// Keys without a catalogue entry are skipped with a warning.
    #[must_use]
    pub fn from_parameters(metadata: SetupMetadata, parameters: &ParameterSet) -> Self {
        let mut setup = Self {
            metadata,
            suspension: SectionValues::new(),
            dampers: SectionValues::new(),
            tyres: SectionValues::new(),
            brakes: SectionValues::new(),
            drivetrain: SectionValues::new(),
        };

        for (key, value) in parameters {
            let Some(spec) = spec_for(key) else {
                warn!(key, "parameter has no catalogue entry, not saved");
                continue;
            };
            let rendered = match value {
                ParamValue::Numeric(number) => format_value(*number, spec.unit),
                ParamValue::Text(text) => text.clone(),
            };
            setup
                .section_mut(spec.section)
                .entry(spec.position.label().to_owned())
                .or_default()
                .insert(spec.field.to_owned(), rendered);
        }
        setup
    }

    /// Values of one section
    #[must_use]
    pub const fn section(&self, section: Section) -> &SectionValues {
        match section {
            Section::Suspension => &self.suspension,
            Section::Dampers => &self.dampers,
            Section::Tyres => &self.tyres,
            Section::Brakes => &self.brakes,
            Section::Drivetrain => &self.drivetrain,
        }
    }

    fn section_mut(&mut self, section: Section) -> &mut SectionValues {
        match section {
            Section::Suspension => &mut self.suspension,
            Section::Dampers => &mut self.dampers,
            Section::Tyres => &mut self.tyres,
            Section::Brakes => &mut self.brakes,
            Section::Drivetrain => &mut self.drivetrain,
        }
    }

    /// Rebuild the flat parameter set
    ///
    /// Slots that do not map to a catalogued key are skipped.
    #[must_use]
    pub fn to_parameters(&self) -> ParameterSet {
        let mut parameters = ParameterSet::new();
        for section in Section::ALL {
            for (label, fields) in self.section(section) {
                let Some(position) = Position::from_label(label) else {
                    warn!(%section, label, "unknown position, skipped");
                    continue;
                };
                for (field, raw) in fields {
                    match spec_at(section, position, field) {
                        Some(spec) => {
                            parameters.insert(spec.key, ParamValue::parse(raw));
                        }
                        None => debug!(%section, label, field, "unknown field, skipped"),
                    }
                }
            }
        }
        parameters
    }

    /// Pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails
    pub fn to_json(&self) -> AppResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write to `path`, creating parent directories
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written
    pub fn save_to_path(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| AppError::storage(parent.display(), e))?;
        }
        let json = self.to_json()?;
        fs::write(path, json + "\n").map_err(|e| AppError::storage(path.display(), e))?;
        debug!(path = %path.display(), car = %self.metadata.car, "setup saved");
        Ok(())
    }

    /// Read from `path`
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or is not a valid setup
    pub fn load_from_path(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Err(AppError::not_found(format!("Saved setup '{}'", path.display())));
        }
        let json = fs::read_to_string(path).map_err(|e| AppError::storage(path.display(), e))?;
        let setup: Self = serde_json::from_str(&json)?;
        if setup.metadata.version > FORMAT_VERSION {
            warn!(
                version = setup.metadata.version,
                supported = FORMAT_VERSION,
                "saved setup is from a newer version"
            );
        }
        Ok(setup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rally_core::catalog::keys;

    #[test]
    fn test_layout_by_section_position_field() {
        let mut parameters = ParameterSet::new();
        parameters.insert(keys::SPRING_RATE_FRONT, 38675.0);
        parameters.insert(keys::CAMBER_FRONT, -1.5);
        parameters.insert(keys::BRAKE_BIAS, 62.0);
        parameters.insert(keys::GEAR_SET, "Set 2 (Balanced)");
        parameters.insert("mystery_knob", 3.0);

        let metadata = SetupMetadata::new("Group A", Some(Surface::Gravel));
        let setup = PersistedSetup::from_parameters(metadata, &parameters);
        assert_eq!(setup.suspension["front"]["spring"], "38675 N/m");
        assert_eq!(setup.tyres["front"]["camber"], "-1.5°");
        assert_eq!(setup.brakes["general"]["bias"], "62% front");
        assert_eq!(setup.drivetrain["general"]["gear_set"], "Set 2 (Balanced)");

        let restored = setup.to_parameters();
        assert_eq!(restored.len(), 4);
        assert_eq!(restored.get_f64(keys::SPRING_RATE_FRONT), Some(38675.0));
        assert!(!restored.contains("mystery_knob"));
    }
}
