// ABOUTME: Core data models for setup parameters
// ABOUTME: Tagged values, parameter sets, per-vehicle ranges and differential ramp angles
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RallyWorks

/// Parameter sets keyed by flat parameter name
pub mod parameter_set;
/// Differential ramp-angle pairs
pub mod ramp;
/// Per-vehicle min/max bounds and the clamp primitive
pub mod range;
/// Numeric-or-text parameter values
pub mod value;

pub use parameter_set::ParameterSet;
pub use ramp::{Axle, RampAngle};
pub use range::{clamp, ParameterRange, RangeTable};
pub use value::ParamValue;
