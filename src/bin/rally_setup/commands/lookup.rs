// ABOUTME: Reference data commands for rally-setup
// ABOUTME: Looks up a car's reference setup and lists the cars and stages in the data directory
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RallyWorks

use rally_core::Surface;
use rally_setup_calculator::config::AppConfig;
use rally_setup_calculator::errors::{AppError, AppResult};

use crate::helpers::display::{print_header, print_reference_setup};
use crate::helpers::load_library;

type Result<T> = AppResult<T>;

/// Show the reference setup of `car` for a stage's surface or an explicit surface
pub fn lookup(
    config: &AppConfig,
    car: &str,
    stage: Option<&str>,
    surface: Option<&str>,
    json: bool,
) -> Result<()> {
    let library = load_library(config)?;

    let surface = match (stage, surface) {
        (Some(stage), _) => library
            .stage_surface(stage)
            .ok_or_else(|| AppError::not_found(format!("Stage '{stage}'")))?,
        (None, Some(surface)) => surface.parse::<Surface>()?,
        (None, None) => {
            return Err(AppError::invalid_input(
                "either --stage or --surface is required",
            ))
        }
    };

    let setup = library
        .setup(car, surface)
        .ok_or_else(|| AppError::not_found(format!("Reference setup for '{car}' on {surface}")))?;

    if json {
        println!("{}", serde_json::to_string_pretty(setup)?);
    } else {
        print_reference_setup(setup);
    }
    Ok(())
}

/// List cars, optionally only those with a setup for `surface`
pub fn cars(config: &AppConfig, surface: Option<&str>) -> Result<()> {
    let library = load_library(config)?;
    let names = match surface {
        Some(surface) => {
            let surface = surface.parse::<Surface>()?;
            print_header(&format!("Cars with a {surface} setup"));
            library.cars_on(surface)
        }
        None => {
            print_header("Cars");
            library.cars()
        }
    };

    for name in names {
        match library.car_info(name) {
            Some(info) => println!("   {name:<40} {} {}", info.manufacturer, info.class_era),
            None => println!("   {name}"),
        }
    }
    Ok(())
}

/// List stages, optionally only those on `surface`
pub fn stages(config: &AppConfig, surface: Option<&str>) -> Result<()> {
    let library = load_library(config)?;
    let names = match surface {
        Some(surface) => {
            let surface = surface.parse::<Surface>()?;
            print_header(&format!("{surface} stages"));
            library.stages_on(surface)
        }
        None => {
            print_header("Stages");
            library.stages()
        }
    };

    for name in names {
        if let Some(info) = library.stage_info(name) {
            println!("   {name:<40} {:<8} {} {}", info.surface, info.location, info.length);
        }
    }
    Ok(())
}
