// ABOUTME: Integration tests for loading the tab-separated reference tables
// ABOUTME: Covers car, stage and setup files, malformed lines, rejected rows and missing files
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RallyWorks

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::fs;
use std::path::Path;

use rally_core::{Axle, ParamValue, RampAngle, Surface, TractionLayout};
use rally_setup_calculator::reference::{load_reference_data, setups_file};
use tempfile::TempDir;

const DELTA: &str = "Lancia Delta HF Integrale Evo";
const CLIO: &str = "Renault Clio Rally4";

fn write(dir: &Path, file: &str, lines: &[&str]) {
    fs::write(dir.join(file), lines.join("\n") + "\n").unwrap();
}

fn populated_data_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "cars.tsv",
        &[
            "Car Name\tManufacturer\tClass/Era\tDrivetrain\tNotes",
            &format!("{DELTA}\tLancia\tGroup A\tAWD\tTurbo"),
            &format!("{CLIO}\tRenault\tRally4\tFWD\t"),
        ],
    );
    write(
        dir.path(),
        "stages.tsv",
        &[
            "Stage Name (Variant)\tLocation\tSurface\tStyle/Character\tLength\tNotes",
            "Ouninpohja\tFinland\tGravel\tFast crests\t33 km\t",
            "Lava Run\tNowhere\tLava\tHot\t2 km\t",
            "Col de Turini\tMonte Carlo\tTarmac\tHairpins\t15 km\t",
        ],
    );
    write(
        dir.path(),
        &setups_file(Surface::Gravel),
        &[
            "car\tdriveType\tpath\tvalue",
            &format!("{DELTA}\tAWD\tsuspension.springs.FL\t45000 N/m"),
            &format!("{DELTA}\tAWD\tsuspension.frontARB\t\"12000 N/m\""),
            &format!("{DELTA}\tAWD\tdrivetrain.frontDiff.lsdRampAngle\t55_85"),
            &format!("{DELTA}\tAWD\tdrivetrain.rearDiff.lsdRampAngle\tbroken"),
            "\tAWD\tbrakes.brakeBias\t60",
            &format!("{CLIO}\tFWD\tbrakes.brakeBias\t66% front"),
        ],
    );
    dir
}

#[test]
fn test_loads_cars_stages_and_setups() {
    let dir = populated_data_dir();
    let load = load_reference_data(dir.path()).unwrap();
    let library = &load.library;

    assert_eq!(library.cars(), vec![DELTA, CLIO]);
    assert_eq!(
        library.car_info(DELTA).unwrap().drivetrain,
        Some(TractionLayout::FourWheelDrive)
    );
    assert_eq!(library.stage_surface("Ouninpohja"), Some(Surface::Gravel));
    assert_eq!(library.stage_surface("Col de Turini"), Some(Surface::Asphalt));

    let setup = library.setup(DELTA, Surface::Gravel).unwrap();
    assert_eq!(setup.drive_type, Some(TractionLayout::FourWheelDrive));
    assert_eq!(setup.raw("suspension.springs.FL"), Some("45000 N/m"));
    assert_eq!(setup.raw("suspension.frontARB"), Some("12000 N/m"));
    assert_eq!(
        setup.get("suspension.frontARB").unwrap().value,
        ParamValue::Numeric(12000.0)
    );
    assert_eq!(setup.ramp_angle(Axle::Front), Some(RampAngle::new(55.0, 85.0)));
    assert_eq!(setup.ramp_angle(Axle::Rear), None);
}

#[test]
fn test_bad_rows_and_lines_are_reported_not_fatal() {
    let dir = populated_data_dir();
    let load = load_reference_data(dir.path()).unwrap();

    assert_eq!(load.report.accepted, 4);
    assert_eq!(load.report.skipped.len(), 2);
    assert!(load
        .report
        .skipped
        .iter()
        .any(|row| row.path == "drivetrain.rearDiff.lsdRampAngle"));
    assert!(load.report.skipped.iter().any(|row| row.car.is_empty()));

    assert_eq!(load.malformed.len(), 1);
    assert_eq!(load.malformed[0].file, "stages.tsv");
    assert_eq!(load.malformed[0].line, 3);
    assert!(load.library.stage_info("Lava Run").is_none());
}

#[test]
fn test_setup_for_stage_follows_stage_surface() {
    let dir = populated_data_dir();
    let library = load_reference_data(dir.path()).unwrap().library;

    assert!(library.setup_for_stage(DELTA, "Ouninpohja").is_some());
    assert!(library.setup_for_stage(DELTA, "Col de Turini").is_none());
    assert!(library.setup_for_stage(DELTA, "Unknown stage").is_none());
    assert_eq!(library.cars_on(Surface::Gravel).len(), 2);
    assert!(library.cars_on(Surface::Asphalt).is_empty());
}

#[test]
fn test_missing_tables_load_as_empty() {
    let dir = TempDir::new().unwrap();
    let load = load_reference_data(dir.path()).unwrap();

    assert!(load.library.cars().is_empty());
    assert!(load.library.stages().is_empty());
    assert_eq!(load.library.setup_count(), 0);
    assert!(load.malformed.is_empty());
}
