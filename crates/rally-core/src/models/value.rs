// ABOUTME: Tagged union for parameter values that are either numbers or free-form text
// ABOUTME: Resolved once at ingestion so consumers never re-parse unit-suffixed strings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RallyWorks

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::units::extract_numeric;

/// A setup parameter value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Continuous or integral quantity, unit implied by the key
    Numeric(f64),
    /// Free-form value (gear set name, ratio string)
    Text(String),
}

impl ParamValue {
    /// Resolve a raw ingested string: numeric when a number survives unit stripping
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        extract_numeric(raw).map_or_else(|| Self::Text(raw.trim().to_owned()), Self::Numeric)
    }

    /// The number held, if this is a `Numeric` value
    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Numeric(value) => Some(*value),
            Self::Text(_) => None,
        }
    }

    /// The number held, or one extracted from unit-suffixed text
    #[must_use]
    pub fn extract_f64(&self) -> Option<f64> {
        match self {
            Self::Numeric(value) => Some(*value),
            Self::Text(text) => extract_numeric(text),
        }
    }

    /// Whether this is a `Numeric` value
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Numeric(_))
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Numeric(value)
    }
}

impl From<&str> for ParamValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for ParamValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_resolves_numbers_and_text() {
        assert_eq!(ParamValue::parse("4250 Ns/m"), ParamValue::Numeric(4250.0));
        assert_eq!(
            ParamValue::parse("Set 2 (Balanced)"),
            ParamValue::Text("Set 2 (Balanced)".into())
        );
        assert_eq!(ParamValue::parse("60_75"), ParamValue::Text("60_75".into()));
    }

    #[test]
    fn test_untagged_serde() {
        let json = serde_json::to_string(&ParamValue::Numeric(38675.0)).unwrap();
        assert_eq!(json, "38675.0");
        let text: ParamValue = serde_json::from_str("\"50//12\"").unwrap();
        assert_eq!(text, ParamValue::Text("50//12".into()));
    }

    #[test]
    fn test_extract_from_text() {
        assert_eq!(ParamValue::from("67% front").extract_f64(), Some(67.0));
        assert_eq!(ParamValue::from("67% front").as_f64(), None);
    }
}
