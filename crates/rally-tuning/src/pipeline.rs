// ABOUTME: Four-stage modifier pipeline from a baseline to a recommended setup
// ABOUTME: Car class, drivetrain gating, surface, condition, weather; clamp and round every write
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RallyWorks

use std::fmt;

use rally_core::{ParameterSet, RangeTable, Selection, SetupResult, TractionLayout};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::config::{ModifierTables, StageOverrides};
use crate::validation::write_value;

/// Pipeline stage, in application order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    /// Car class overrides
    CarClass,
    /// Removal of differentials the layout does not have
    Drivetrain,
    /// Surface overrides
    Surface,
    /// Track condition overrides
    TrackCondition,
    /// Weather overrides
    Weather,
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::CarClass => "car class",
            Self::Drivetrain => "drivetrain",
            Self::Surface => "surface",
            Self::TrackCondition => "track condition",
            Self::Weather => "weather",
        };
        f.write_str(name)
    }
}

/// One note in the engineering profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileNote {
    /// Stage that produced the note
    pub stage: StageKind,
    /// Human-readable description
    pub label: String,
    /// Number of parameters the stage changed or removed
    pub changed: usize,
}

/// Ordered notes of the stages that actually changed something
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineeringProfile {
    notes: Vec<ProfileNote>,
}

impl EngineeringProfile {
    /// Label used when no stage changed anything
    pub const BASELINE_LABEL: &'static str = "Reference baseline";

    /// Notes in stage order
    #[must_use]
    pub fn notes(&self) -> &[ProfileNote] {
        &self.notes
    }

    /// Whether no stage changed anything
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Notes joined with `" + "`
    #[must_use]
    pub fn label(&self) -> String {
        if self.notes.is_empty() {
            return Self::BASELINE_LABEL.to_owned();
        }
        self.notes
            .iter()
            .map(|note| note.label.as_str())
            .collect::<Vec<_>>()
            .join(" + ")
    }

    fn record(&mut self, stage: StageKind, label: &str, changed: usize) {
        if changed > 0 {
            self.notes.push(ProfileNote {
                stage,
                label: label.to_owned(),
                changed,
            });
        }
    }
}

impl fmt::Display for EngineeringProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Result of one pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineOutcome {
    /// Selection the run was made for
    pub selection: Selection,
    /// Recommended parameters
    pub parameters: ParameterSet,
    /// Which stages contributed
    pub profile: EngineeringProfile,
}

/// Applies the modifier tables to a baseline
///
/// Stages run in a fixed order and each one reads what the previous one
/// wrote, so effects compound multiplicatively. Every written value is
/// clamped to the vehicle range and rounded when its unit is integral.
#[derive(Debug, Clone, Copy)]
pub struct ModifierPipeline<'a> {
    tables: &'a ModifierTables,
    ranges: &'a RangeTable,
}

impl<'a> ModifierPipeline<'a> {
    /// Create a pipeline over explicit tables and ranges
    #[must_use]
    pub const fn new(tables: &'a ModifierTables, ranges: &'a RangeTable) -> Self {
        Self { tables, ranges }
    }

    /// Parse raw selector strings and run
    ///
    /// # Errors
    ///
    /// Returns `SetupError::InvalidSelector` if any selector is unknown
    pub fn run_raw(
        &self,
        baseline: &ParameterSet,
        car_class: &str,
        surface: &str,
        condition: &str,
        weather: &str,
    ) -> SetupResult<PipelineOutcome> {
        let selection = Selection::parse(car_class, surface, condition, weather)?;
        Ok(self.run(baseline, selection))
    }

    /// Run all stages on a copy of `baseline`
    ///
    /// Ranged values of the copy are clamped and rounded before the first stage.
    #[must_use]
    #[instrument(
        skip(self, baseline, selection),
        fields(selection = %selection, vehicle = %self.ranges.vehicle)
    )]
    pub fn run(&self, baseline: &ParameterSet, selection: Selection) -> PipelineOutcome {
        let mut working = baseline.clone();
        let mut profile = EngineeringProfile::default();

        let corrected = self.bring_into_range(&mut working);
        if corrected > 0 {
            warn!(corrected, "baseline values outside the vehicle range were clamped");
        }

        let car_class = self.tables.car_class.get(&selection.car_class);
        self.apply_stage(StageKind::CarClass, car_class, &mut working, &mut profile);

        let layout = selection.car_class.layout();
        let removed = gate_layout(layout, &mut working);
        profile.record(
            StageKind::Drivetrain,
            &format!("{layout} drivetrain"),
            removed,
        );

        let surface = self.tables.surface.get(&selection.surface);
        self.apply_stage(StageKind::Surface, surface, &mut working, &mut profile);

        let condition = self.tables.condition.get(&selection.condition);
        self.apply_stage(StageKind::TrackCondition, condition, &mut working, &mut profile);

        let weather = self.tables.weather.get(&selection.weather);
        self.apply_stage(StageKind::Weather, weather, &mut working, &mut profile);

        debug!(profile = %profile, parameters = working.len(), "pipeline complete");

        PipelineOutcome {
            selection,
            parameters: working,
            profile,
        }
    }

    /// Clamp and round every ranged numeric value of `working` in place
    ///
    /// Returns the number of values that changed.
    fn bring_into_range(&self, working: &mut ParameterSet) -> usize {
        let updates: Vec<(String, f64)> = working
            .iter()
            .filter(|(key, _)| self.ranges.get(key).is_some())
            .filter_map(|(key, value)| {
                let current = value.as_f64()?;
                let written = write_value(self.ranges, key, current);
                ((written - current).abs() > f64::EPSILON).then(|| (key.clone(), written))
            })
            .collect();

        for (key, value) in &updates {
            debug!(key, value, "baseline value brought into range");
            working.insert(key.as_str(), *value);
        }
        updates.len()
    }

    fn apply_stage(
        &self,
        stage: StageKind,
        overrides: Option<&StageOverrides>,
        working: &mut ParameterSet,
        profile: &mut EngineeringProfile,
    ) {
        let Some(overrides) = overrides else {
            return;
        };

        let mut changed = 0;
        for (key, operation) in &overrides.operations {
            let Some(current) = working.get(key) else {
                debug!(%stage, key, "parameter absent, override skipped");
                continue;
            };
            let Some(current) = current.as_f64() else {
                debug!(%stage, key, "textual parameter, override skipped");
                continue;
            };

            let written = write_value(self.ranges, key, operation.apply(current));
            if (written - current).abs() > f64::EPSILON {
                changed += 1;
            }
            working.insert(key.as_str(), written);
        }

        profile.record(stage, &overrides.label, changed);
    }
}

/// Remove differential parameters the layout has no hardware for
///
/// Returns the number of keys removed.
pub fn gate_layout(layout: TractionLayout, parameters: &mut ParameterSet) -> usize {
    let before = parameters.len();
    parameters.retain(|key, _| {
        if key.starts_with("front_diff_") {
            layout.has_front_diff()
        } else if key.starts_with("rear_diff_") {
            layout.has_rear_diff()
        } else if key.starts_with("centre_") {
            layout.has_centre_diff()
        } else {
            true
        }
    });
    before - parameters.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::baseline::{reference_baseline, reference_ranges};
    use crate::operation::Operation;
    use crate::validation::out_of_range;
    use rally_core::catalog::keys;
    use rally_core::{CarClass, ParamValue, SetupError, Surface, TrackCondition, Weather};

    fn selection(
        car: CarClass,
        surface: Surface,
        condition: TrackCondition,
        weather: Weather,
    ) -> Selection {
        Selection::new(car, surface, condition, weather)
    }

    #[test]
    fn test_reference_selection_is_identity() {
        let tables = ModifierTables::default();
        let ranges = reference_ranges().unwrap();
        let baseline = reference_baseline();
        let outcome = ModifierPipeline::new(&tables, &ranges).run(
            &baseline,
            selection(CarClass::GroupA, Surface::Asphalt, TrackCondition::Smooth, Weather::Dry),
        );

        assert_eq!(outcome.parameters, baseline);
        assert_eq!(outcome.parameters.get_f64(keys::SPRING_RATE_FRONT), Some(70000.0));
        assert_eq!(outcome.parameters.get_f64(keys::ARB_FRONT), Some(18500.0));
        assert_eq!(outcome.parameters.get_f64(keys::FRONT_DIFF_ACCEL), Some(60.0));
        assert!(outcome.profile.is_empty());
        assert_eq!(outcome.profile.label(), EngineeringProfile::BASELINE_LABEL);
    }

    #[test]
    fn test_stages_compound_multiplicatively() {
        let tables = ModifierTables::default();
        let ranges = reference_ranges().unwrap();
        let baseline = reference_baseline();
        let pipeline = ModifierPipeline::new(&tables, &ranges);

        let gravel = pipeline.run(
            &baseline,
            selection(CarClass::GroupA, Surface::Gravel, TrackCondition::Smooth, Weather::Dry),
        );
        assert_eq!(gravel.parameters.get_f64(keys::SPRING_RATE_FRONT), Some(45500.0));

        let gravel_wet = pipeline.run(
            &baseline,
            selection(CarClass::GroupA, Surface::Gravel, TrackCondition::Smooth, Weather::Wet),
        );
        assert_eq!(gravel_wet.parameters.get_f64(keys::SPRING_RATE_FRONT), Some(38675.0));
        assert_eq!(
            gravel_wet.profile.label(),
            "Gravel compliance + Wet: grip over response"
        );
    }

    #[test]
    fn test_output_respects_ranges_for_every_selection() {
        let tables = ModifierTables::default();
        let ranges = reference_ranges().unwrap();
        let baseline = reference_baseline();
        let pipeline = ModifierPipeline::new(&tables, &ranges);

        for car in CarClass::ALL {
            for surface in Surface::ALL {
                for condition in TrackCondition::ALL {
                    for weather in Weather::ALL {
                        let outcome =
                            pipeline.run(&baseline, selection(car, surface, condition, weather));
                        assert!(
                            out_of_range(&outcome.parameters, &ranges).is_empty(),
                            "{car:?}/{surface:?}/{condition:?}/{weather:?}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_extreme_override_is_clamped() {
        let mut tables = ModifierTables::empty();
        tables.weather.insert(
            Weather::Wet,
            StageOverrides::new("Extreme").with(keys::SPRING_RATE_FRONT, Operation::scale(0.01)),
        );
        let ranges = reference_ranges().unwrap();
        let outcome = ModifierPipeline::new(&tables, &ranges).run(
            &reference_baseline(),
            selection(CarClass::GroupA, Surface::Asphalt, TrackCondition::Smooth, Weather::Wet),
        );
        let min = ranges.get(keys::SPRING_RATE_FRONT).unwrap().min;
        assert_eq!(outcome.parameters.get_f64(keys::SPRING_RATE_FRONT), Some(min));
    }

    #[test]
    fn test_out_of_range_baseline_is_clamped_before_any_stage() {
        let tables = ModifierTables::default();
        let ranges = reference_ranges().unwrap();
        let mut baseline = reference_baseline();
        baseline.insert(keys::SPRING_RATE_FRONT, 100_000.0);
        baseline.insert(keys::ARB_REAR, 1000.4);
        baseline.insert(keys::CAMBER_FRONT, -9.0);
        let pipeline = ModifierPipeline::new(&tables, &ranges);

        let reference = pipeline.run(
            &baseline,
            selection(CarClass::GroupA, Surface::Asphalt, TrackCondition::Smooth, Weather::Dry),
        );
        assert_eq!(reference.parameters.get_f64(keys::SPRING_RATE_FRONT), Some(90000.0));
        assert_eq!(reference.parameters.get_f64(keys::ARB_REAR), Some(4000.0));
        assert_eq!(reference.parameters.get_f64(keys::CAMBER_FRONT), Some(-4.0));
        assert!(out_of_range(&reference.parameters, &ranges).is_empty());
        assert_eq!(baseline.get_f64(keys::SPRING_RATE_FRONT), Some(100_000.0));

        for weather in Weather::ALL {
            let outcome = pipeline.run(
                &baseline,
                selection(CarClass::Rally4, Surface::Snow, TrackCondition::Rutted, weather),
            );
            assert!(out_of_range(&outcome.parameters, &ranges).is_empty(), "{weather:?}");
        }
    }

    #[test]
    fn test_pipeline_is_deterministic_and_leaves_baseline_untouched() {
        let tables = ModifierTables::default();
        let ranges = reference_ranges().unwrap();
        let baseline = reference_baseline();
        let pipeline = ModifierPipeline::new(&tables, &ranges);
        let chosen = selection(
            CarClass::Rally2,
            Surface::Snow,
            TrackCondition::Rutted,
            Weather::Snowfall,
        );

        let first = pipeline.run(&baseline, chosen);
        let second = pipeline.run(&baseline, chosen);
        assert_eq!(first, second);
        assert_eq!(baseline, reference_baseline());
    }

    #[test]
    fn test_textual_and_absent_keys_are_skipped() {
        let mut tables = ModifierTables::empty();
        tables.surface.insert(
            Surface::Gravel,
            StageOverrides::new("Text")
                .with(keys::GEAR_SET, Operation::scale(2.0))
                .with("not_in_baseline", Operation::set(1.0)),
        );
        let ranges = reference_ranges().unwrap();
        let baseline = reference_baseline();
        let outcome = ModifierPipeline::new(&tables, &ranges).run(
            &baseline,
            selection(CarClass::GroupA, Surface::Gravel, TrackCondition::Smooth, Weather::Dry),
        );
        assert_eq!(outcome.parameters, baseline);
        assert!(!outcome.parameters.contains("not_in_baseline"));
        assert!(outcome.profile.is_empty());
    }

    #[test]
    fn test_front_drive_class_drops_rear_and_centre_diff() {
        let tables = ModifierTables::default();
        let ranges = reference_ranges().unwrap();
        let outcome = ModifierPipeline::new(&tables, &ranges).run(
            &reference_baseline(),
            selection(CarClass::Rally4, Surface::Asphalt, TrackCondition::Smooth, Weather::Dry),
        );
        assert!(outcome.parameters.section("rear_diff_").is_empty());
        assert!(outcome.parameters.section("centre_").is_empty());
        assert!(!outcome.parameters.section("front_diff_").is_empty());
        assert!(outcome
            .profile
            .notes()
            .iter()
            .any(|note| note.stage == StageKind::Drivetrain));
    }

    #[test]
    fn test_run_raw_rejects_unknown_selector() {
        let tables = ModifierTables::default();
        let ranges = reference_ranges().unwrap();
        let result = ModifierPipeline::new(&tables, &ranges).run_raw(
            &reference_baseline(),
            "group a",
            "lava",
            "smooth",
            "dry",
        );
        assert!(matches!(result, Err(SetupError::InvalidSelector { .. })));
    }

    #[test]
    fn test_gate_layout_keeps_text_parameters() {
        let mut set = ParameterSet::new();
        set.insert(keys::GEAR_SET, ParamValue::from("Set 2"));
        set.insert(keys::CENTRE_SPLIT, 40.0);
        assert_eq!(gate_layout(TractionLayout::RearWheelDrive, &mut set), 1);
        assert!(set.contains(keys::GEAR_SET));
    }
}
