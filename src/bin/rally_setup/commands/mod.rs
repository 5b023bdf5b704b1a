// ABOUTME: Command modules for rally-setup
// ABOUTME: Formula calculation, reference lookups, tendency suggestions and saved-setup handling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RallyWorks

pub mod calculate;
pub mod lookup;
pub mod saved;
pub mod tendency;
