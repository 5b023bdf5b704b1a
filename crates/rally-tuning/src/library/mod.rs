// ABOUTME: Tabular baseline provider: cars, stages and reference setups per surface
// ABOUTME: Rows are ingested already split into columns; malformed rows are skipped and reported
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RallyWorks

use std::collections::{BTreeMap, BTreeSet};

use rally_core::{Axle, RampAngle, SetupError, SetupResult, Surface, TractionLayout};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Reference setup records
pub mod reference_setup;

pub use reference_setup::{ReferenceEntry, ReferenceSetup};

/// Catalogue entry for one car
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarInfo {
    /// Display name, the lookup key
    pub name: String,
    /// Manufacturer
    pub manufacturer: String,
    /// Class or era, free text
    pub class_era: String,
    /// Drivetrain layout, when recognised
    pub drivetrain: Option<TractionLayout>,
    /// Free-form notes
    pub notes: String,
}

/// Catalogue entry for one stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageInfo {
    /// Stage name including variant, the lookup key
    pub name: String,
    /// Location or rally
    pub location: String,
    /// Driving surface
    pub surface: Surface,
    /// Style or character, free text
    pub style: String,
    /// Length as written in the data
    pub length: String,
    /// Free-form notes
    pub notes: String,
}

/// One `(car, drive type, path, value)` row of a reference setup table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceRow {
    /// Car display name
    pub car: String,
    /// Drive type column, free text
    #[serde(alias = "driveType", default)]
    pub drive_type: String,
    /// Dotted parameter path
    pub path: String,
    /// Raw value
    pub value: String,
}

/// A row that was not ingested
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRow {
    /// Zero-based row index within the ingested batch
    pub index: usize,
    /// Car column
    pub car: String,
    /// Path column
    pub path: String,
    /// Why the row was rejected
    pub error: SetupError,
}

/// Outcome of one ingestion batch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    /// Rows stored
    pub accepted: usize,
    /// Rows rejected
    pub skipped: Vec<SkippedRow>,
}

impl LoadReport {
    /// Fold another report into this one
    pub fn merge(&mut self, other: Self) {
        self.accepted += other.accepted;
        self.skipped.extend(other.skipped);
    }
}

/// In-memory reference library
///
/// Populated once at load time and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SetupLibrary {
    cars: BTreeMap<String, CarInfo>,
    stages: BTreeMap<String, StageInfo>,
    setups: BTreeMap<(String, Surface), ReferenceSetup>,
}

impl SetupLibrary {
    /// Empty library
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a car
    pub fn add_car(&mut self, car: CarInfo) {
        self.cars.insert(car.name.clone(), car);
    }

    /// Register a stage
    pub fn add_stage(&mut self, stage: StageInfo) {
        self.stages.insert(stage.name.clone(), stage);
    }

    /// Ingest reference rows for `surface`
    ///
    /// Rows with an empty car or path, or a malformed ramp-angle value, are
    /// skipped with a warning and listed in the report.
    pub fn ingest_rows(
        &mut self,
        surface: Surface,
        rows: impl IntoIterator<Item = ReferenceRow>,
    ) -> LoadReport {
        let mut report = LoadReport::default();

        for (index, row) in rows.into_iter().enumerate() {
            let car = row.car.trim().trim_matches('"').to_owned();
            let path = row.path.trim().trim_matches('"').to_owned();

            if let Err(error) = check_row(&car, &path, &row.value) {
                warn!(index, %car, %path, %error, "skipping reference row");
                report.skipped.push(SkippedRow {
                    index,
                    car,
                    path,
                    error,
                });
                continue;
            }

            let setup = self
                .setups
                .entry((car.clone(), surface))
                .or_insert_with(|| {
                    let drive_type = parse_drive_type(&row.drive_type);
                    ReferenceSetup::new(car, drive_type, surface)
                });
            setup.insert(path, ReferenceEntry::new(&row.value));
            report.accepted += 1;
        }

        debug!(
            %surface,
            accepted = report.accepted,
            skipped = report.skipped.len(),
            "reference rows ingested"
        );
        report
    }

    /// Every car with a reference setup on any surface, sorted
    ///
    /// Catalogue-only cars are not listed since they have nothing to look up.
    #[must_use]
    pub fn cars(&self) -> Vec<&str> {
        let names: BTreeSet<&str> = self.setups.keys().map(|(car, _)| car.as_str()).collect();
        names.into_iter().collect()
    }

    /// Cars with a reference setup for `surface`, sorted
    #[must_use]
    pub fn cars_on(&self, surface: Surface) -> Vec<&str> {
        self.setups
            .keys()
            .filter(|(_, on)| *on == surface)
            .map(|(car, _)| car.as_str())
            .collect()
    }

    /// Every stage name, sorted
    #[must_use]
    pub fn stages(&self) -> Vec<&str> {
        self.stages.keys().map(String::as_str).collect()
    }

    /// Stage names on `surface`, sorted
    #[must_use]
    pub fn stages_on(&self, surface: Surface) -> Vec<&str> {
        self.stages
            .values()
            .filter(|stage| stage.surface == surface)
            .map(|stage| stage.name.as_str())
            .collect()
    }

    /// Surface of a stage
    #[must_use]
    pub fn stage_surface(&self, stage: &str) -> Option<Surface> {
        self.stages.get(stage).map(|info| info.surface)
    }

    /// Catalogue entry of a car
    #[must_use]
    pub fn car_info(&self, car: &str) -> Option<&CarInfo> {
        self.cars.get(car)
    }

    /// Catalogue entry of a stage
    #[must_use]
    pub fn stage_info(&self, stage: &str) -> Option<&StageInfo> {
        self.stages.get(stage)
    }

    /// Reference setup of `car` on `surface`
    #[must_use]
    pub fn setup(&self, car: &str, surface: Surface) -> Option<&ReferenceSetup> {
        self.setups.get(&(car.to_owned(), surface))
    }

    /// Reference setup of `car` for the surface of `stage`
    ///
    /// Only gravel and tarmac tables exist, so snow and mixed stages use the
    /// tarmac setup unless a setup for their own surface was ingested.
    #[must_use]
    pub fn setup_for_stage(&self, car: &str, stage: &str) -> Option<&ReferenceSetup> {
        let surface = self.stage_surface(stage)?;
        self.setup(car, surface).or_else(|| match surface {
            Surface::Gravel | Surface::Asphalt => None,
            Surface::Snow | Surface::Mixed => self.setup(car, Surface::Asphalt),
        })
    }

    /// Number of stored reference setups
    #[must_use]
    pub fn setup_count(&self) -> usize {
        self.setups.len()
    }
}

fn check_row(car: &str, path: &str, value: &str) -> SetupResult<()> {
    if car.is_empty() {
        return Err(SetupError::format("car", car, "empty car name"));
    }
    if path.is_empty() {
        return Err(SetupError::format("path", path, "empty parameter path"));
    }
    if Axle::ALL.iter().any(|axle| axle.ramp_path() == path) {
        value.parse::<RampAngle>()?;
    }
    Ok(())
}

fn parse_drive_type(raw: &str) -> Option<TractionLayout> {
    let raw = raw.trim().trim_matches('"');
    if raw.is_empty() {
        return None;
    }
    match raw.parse() {
        Ok(layout) => Some(layout),
        Err(error) => {
            warn!(%error, "unrecognised drive type");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(car: &str, drive: &str, path: &str, value: &str) -> ReferenceRow {
        ReferenceRow {
            car: car.to_owned(),
            drive_type: drive.to_owned(),
            path: path.to_owned(),
            value: value.to_owned(),
        }
    }

    fn stage(name: &str, surface: Surface) -> StageInfo {
        StageInfo {
            name: name.to_owned(),
            location: "Test".to_owned(),
            surface,
            style: String::new(),
            length: "10 km".to_owned(),
            notes: String::new(),
        }
    }

    fn library() -> SetupLibrary {
        let mut library = SetupLibrary::new();
        library.add_stage(stage("Ouninpohja", Surface::Gravel));
        library.add_stage(stage("Col de Turini", Surface::Asphalt));
        library.add_stage(stage("Sweden Snow", Surface::Snow));
        library.add_stage(stage("Mixed Special", Surface::Mixed));
        library.ingest_rows(
            Surface::Gravel,
            vec![
                row("Lancia Delta HF Integrale Evo", "4WD", "suspension.frontARB", "11500 N/m"),
                row(
                    "Lancia Delta HF Integrale Evo",
                    "4WD",
                    "drivetrain.rearDiff.lsdRampAngle",
                    "\"55_75\"",
                ),
                row("Peugeot 208 Rally4", "FWD", "drivetrain.frontDiff.lsdPreload", "80 Nm"),
            ],
        );
        library.ingest_rows(
            Surface::Asphalt,
            vec![row("Lancia Delta HF Integrale Evo", "4WD", "suspension.frontARB", "18000 N/m")],
        );
        library
    }

    #[test]
    fn test_lookup_by_stage_surface() {
        let library = library();
        let gravel = library
            .setup_for_stage("Lancia Delta HF Integrale Evo", "Ouninpohja")
            .unwrap();
        assert_eq!(gravel.raw("suspension.frontARB"), Some("11500 N/m"));
        assert_eq!(gravel.drive_type, Some(TractionLayout::FourWheelDrive));
        assert_eq!(gravel.ramp_angle(Axle::Rear), Some(RampAngle::new(55.0, 75.0)));

        let tarmac = library
            .setup_for_stage("Lancia Delta HF Integrale Evo", "Col de Turini")
            .unwrap();
        assert_eq!(tarmac.raw("suspension.frontARB"), Some("18000 N/m"));

        assert!(library.setup_for_stage("Peugeot 208 Rally4", "Col de Turini").is_none());
        assert!(library.setup_for_stage("Lancia Delta HF Integrale Evo", "Unknown").is_none());
    }

    #[test]
    fn test_snow_and_mixed_stages_fall_back_to_tarmac_setup() {
        let library = library();
        for name in ["Sweden Snow", "Mixed Special"] {
            let setup = library
                .setup_for_stage("Lancia Delta HF Integrale Evo", name)
                .unwrap();
            assert_eq!(setup.surface, Surface::Asphalt);
            assert_eq!(setup.raw("suspension.frontARB"), Some("18000 N/m"));
        }
        assert!(library.setup_for_stage("Peugeot 208 Rally4", "Sweden Snow").is_none());
    }

    #[test]
    fn test_catalogue_only_cars_are_not_listed() {
        let mut library = library();
        library.add_car(CarInfo {
            name: "Ghost Car".to_owned(),
            manufacturer: "Nobody".to_owned(),
            class_era: "Group B".to_owned(),
            drivetrain: Some(TractionLayout::FourWheelDrive),
            notes: String::new(),
        });

        assert!(library.car_info("Ghost Car").is_some());
        assert!(!library.cars().contains(&"Ghost Car"));
        assert_eq!(
            library.cars(),
            vec!["Lancia Delta HF Integrale Evo", "Peugeot 208 Rally4"]
        );
    }

    #[test]
    fn test_listings_are_sorted_unions() {
        let library = library();
        assert_eq!(
            library.cars(),
            vec!["Lancia Delta HF Integrale Evo", "Peugeot 208 Rally4"]
        );
        assert_eq!(library.cars_on(Surface::Asphalt), vec!["Lancia Delta HF Integrale Evo"]);
        assert_eq!(
            library.stages(),
            vec!["Col de Turini", "Mixed Special", "Ouninpohja", "Sweden Snow"]
        );
        assert_eq!(library.stages_on(Surface::Gravel), vec!["Ouninpohja"]);
        assert_eq!(library.setup_count(), 3);
    }

    #[test]
    fn test_bad_rows_are_skipped_and_reported() {
        let mut library = SetupLibrary::new();
        let report = library.ingest_rows(
            Surface::Gravel,
            vec![
                row("Car", "RWD", "drivetrain.rearDiff.lsdRampAngle", "55-75"),
                row("", "RWD", "suspension.frontARB", "1"),
                row("Car", "RWD", "suspension.frontARB", "9000"),
            ],
        );
        assert_eq!(report.accepted, 1);
        assert_eq!(report.skipped.len(), 2);
        assert_eq!(report.skipped[0].index, 0);
        assert!(matches!(report.skipped[0].error, SetupError::Format { .. }));

        let setup = library.setup("Car", Surface::Gravel).unwrap();
        assert!(setup.ramp_angle(Axle::Rear).is_none());
        assert_eq!(setup.len(), 1);
    }

    #[test]
    fn test_unknown_drive_type_is_kept_as_none() {
        let mut library = SetupLibrary::new();
        library.ingest_rows(Surface::Snow, vec![row("Car", "AWD-ish", "brakes.brakeBias", "60%")]);
        assert_eq!(library.setup("Car", Surface::Snow).unwrap().drive_type, None);
    }
}
