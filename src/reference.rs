// ABOUTME: Loader for the tab-separated reference tables (cars, stages, per-surface setups)
// ABOUTME: Missing files are warned about and treated as empty; malformed lines are skipped
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RallyWorks

use std::path::Path;

use csv::{Position, ReaderBuilder, Trim};
use rally_core::{Surface, TractionLayout};
use rally_tuning::{CarInfo, LoadReport, ReferenceRow, SetupLibrary, StageInfo};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{info, warn};

use crate::constants::reference_files;
use crate::errors::AppResult;

/// Surfaces that ship a reference setup table
pub const REFERENCE_SURFACES: [Surface; 2] = [Surface::Gravel, Surface::Asphalt];

#[derive(Debug, Deserialize)]
struct CarRow {
    #[serde(rename = "Car Name")]
    name: String,
    #[serde(rename = "Manufacturer", default)]
    manufacturer: String,
    #[serde(rename = "Class/Era", default)]
    class_era: String,
    #[serde(rename = "Drivetrain", default)]
    drivetrain: String,
    #[serde(rename = "Notes", default)]
    notes: String,
}

#[derive(Debug, Deserialize)]
struct StageRow {
    #[serde(rename = "Stage Name (Variant)")]
    name: String,
    #[serde(rename = "Location", default)]
    location: String,
    #[serde(rename = "Surface")]
    surface: String,
    #[serde(rename = "Style/Character", default)]
    style: String,
    #[serde(rename = "Length", default)]
    length: String,
    #[serde(rename = "Notes", default)]
    notes: String,
}

/// A line that could not be read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedLine {
    /// File name
    pub file: String,
    /// One-based line number, header included
    pub line: u64,
    /// What was wrong
    pub reason: String,
}

/// Everything produced by one load of the data directory
#[derive(Debug, Clone, Default)]
pub struct ReferenceLoad {
    /// The populated library
    pub library: SetupLibrary,
    /// Setup rows accepted and rejected by the library
    pub report: LoadReport,
    /// Lines of any table that could not be parsed
    pub malformed: Vec<MalformedLine>,
}

/// File name of the setup table for `surface`
#[must_use]
pub fn setups_file(surface: Surface) -> String {
    format!("{}{}.tsv", reference_files::SETUPS_PREFIX, surface.file_token())
}

/// Load every reference table under `data_dir`
///
/// # Errors
///
/// Returns an error if an existing table cannot be opened or its header
/// cannot be read
pub fn load_reference_data(data_dir: &Path) -> AppResult<ReferenceLoad> {
    let mut load = ReferenceLoad::default();

    for row in read_table::<CarRow>(&data_dir.join(reference_files::CARS), &mut load.malformed)? {
        load.library.add_car(car_info(row));
    }

    let stages_path = data_dir.join(reference_files::STAGES);
    for (line, row) in read_numbered::<StageRow>(&stages_path, &mut load.malformed)? {
        match stage_info(row) {
            Ok(stage) => load.library.add_stage(stage),
            Err(reason) => {
                warn!(file = reference_files::STAGES, line, %reason, "skipping stage");
                load.malformed.push(MalformedLine {
                    file: reference_files::STAGES.to_owned(),
                    line,
                    reason,
                });
            }
        }
    }

    for surface in REFERENCE_SURFACES {
        let file = setups_file(surface);
        let rows = read_table::<ReferenceRow>(&data_dir.join(&file), &mut load.malformed)?;
        let report = load.library.ingest_rows(surface, rows);
        load.report.merge(report);
    }

    info!(
        data_dir = %data_dir.display(),
        cars = load.library.cars().len(),
        stages = load.library.stages().len(),
        setups = load.library.setup_count(),
        skipped_rows = load.report.skipped.len(),
        malformed_lines = load.malformed.len(),
        "reference data loaded"
    );
    Ok(load)
}

fn car_info(row: CarRow) -> CarInfo {
    let drivetrain = clean(&row.drivetrain);
    CarInfo {
        name: clean(&row.name),
        manufacturer: clean(&row.manufacturer),
        class_era: clean(&row.class_era),
        drivetrain: drivetrain.parse::<TractionLayout>().ok(),
        notes: clean(&row.notes),
    }
}

fn stage_info(row: StageRow) -> Result<StageInfo, String> {
    let surface = clean(&row.surface)
        .parse::<Surface>()
        .map_err(|e| e.to_string())?;
    Ok(StageInfo {
        name: clean(&row.name),
        location: clean(&row.location),
        surface,
        style: clean(&row.style),
        length: clean(&row.length),
        notes: clean(&row.notes),
    })
}

fn clean(raw: &str) -> String {
    raw.trim().trim_matches('"').trim().to_owned()
}

fn read_table<T: DeserializeOwned>(
    path: &Path,
    malformed: &mut Vec<MalformedLine>,
) -> AppResult<Vec<T>> {
    Ok(read_numbered(path, malformed)?
        .into_iter()
        .map(|(_, row)| row)
        .collect())
}

fn read_numbered<T: DeserializeOwned>(
    path: &Path,
    malformed: &mut Vec<MalformedLine>,
) -> AppResult<Vec<(u64, T)>> {
    if !path.exists() {
        warn!(path = %path.display(), "reference table missing, treating as empty");
        return Ok(Vec::new());
    }

    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .quoting(false)
        .flexible(true)
        .trim(Trim::All)
        .from_path(path)?;
    let headers = reader.headers()?.clone();
    let file = file_name(path);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = match record {
            Ok(record) => record,
            Err(error) => {
                let line = error.position().map_or(0, Position::line);
                skip_line(malformed, &file, line, &error);
                continue;
            }
        };
        let line = record.position().map_or(0, Position::line);
        match record.deserialize::<T>(Some(&headers)) {
            Ok(row) => rows.push((line, row)),
            Err(error) => skip_line(malformed, &file, line, &error),
        }
    }
    Ok(rows)
}

fn skip_line(malformed: &mut Vec<MalformedLine>, file: &str, line: u64, error: &csv::Error) {
    warn!(file, line, %error, "skipping malformed line");
    malformed.push(MalformedLine {
        file: file.to_owned(),
        line,
        reason: error.to_string(),
    });
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned())
}
