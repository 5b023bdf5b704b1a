// ABOUTME: Configuration module for the tuning engine
// ABOUTME: Declarative modifier tables with built-in defaults and validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RallyWorks

/// Stage modifier tables
pub mod modifiers;

pub use modifiers::{ModifierTables, StageOverrides};
