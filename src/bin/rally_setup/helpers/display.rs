// ABOUTME: Output formatting helpers for rally-setup
// ABOUTME: Renders parameter sets grouped by sheet section, with optional change markers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RallyWorks

use std::collections::BTreeMap;

use rally_core::catalog::{spec_for, unit_of, Section, CATALOG};
use rally_core::units::format_value;
use rally_core::{ParamValue, ParameterSet};
use rally_tuning::{Comparison, Direction, ReferenceSetup};

const RULE_WIDTH: usize = 64;

/// Value rendered with the unit of its key
pub fn render_value(key: &str, value: &ParamValue) -> String {
    match value {
        ParamValue::Numeric(number) => format_value(*number, unit_of(key)),
        ParamValue::Text(text) => text.clone(),
    }
}

/// One-character marker for a comparison direction
pub const fn direction_marker(direction: Direction) -> &'static str {
    match direction {
        Direction::Increase => "+",
        Direction::Decrease => "-",
        Direction::Unchanged => "=",
    }
}

/// Title line followed by a rule
pub fn print_header(title: &str) {
    println!("\n{title}");
    println!("{}", "=".repeat(RULE_WIDTH));
}

/// Print `parameters` grouped by section
///
/// With `comparisons`, each line is prefixed by its change marker and
/// numeric changes show their magnitude.
pub fn print_parameters(
    parameters: &ParameterSet,
    comparisons: Option<&BTreeMap<String, Comparison>>,
) {
    for section in Section::ALL {
        let rows: Vec<_> = CATALOG
            .iter()
            .filter(|spec| spec.section == section)
            .filter_map(|spec| parameters.get(spec.key).map(|value| (spec.key, value)))
            .collect();
        if rows.is_empty() {
            continue;
        }
        println!("\n{section}");
        for (key, value) in rows {
            print_row(key, value, comparisons);
        }
    }

    let uncatalogued: Vec<_> = parameters
        .iter()
        .filter(|(key, _)| spec_for(key).is_none())
        .collect();
    if !uncatalogued.is_empty() {
        println!("\nOther");
        for (key, value) in uncatalogued {
            print_row(key, value, comparisons);
        }
    }
}

fn print_row(key: &str, value: &ParamValue, comparisons: Option<&BTreeMap<String, Comparison>>) {
    let rendered = render_value(key, value);
    let Some(comparison) =
        comparisons.map(|all| all.get(key).copied().unwrap_or(Comparison::UNCHANGED))
    else {
        println!("   {key:<24} {rendered}");
        return;
    };
    let marker = direction_marker(comparison.direction);
    if comparison.direction == Direction::Unchanged {
        println!(" {marker} {key:<24} {rendered}");
    } else {
        println!(" {marker} {key:<24} {rendered}  ({marker}{})", comparison.magnitude);
    }
}

/// Print a reference setup by section, as stored in the data
pub fn print_reference_setup(setup: &ReferenceSetup) {
    let layout = setup
        .drive_type
        .map_or_else(|| "unknown drivetrain".to_owned(), |layout| layout.to_string());
    print_header(&format!("{} ({layout}) on {}", setup.car, setup.surface));

    for section in Section::ALL {
        let entries = setup.section(section);
        if entries.is_empty() {
            continue;
        }
        println!("\n{section}");
        for (path, entry) in entries {
            println!("   {path:<40} {}", entry.raw);
        }
    }
}
