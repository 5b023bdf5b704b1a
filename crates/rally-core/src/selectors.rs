// ABOUTME: Closed categorical selector enumerations driving the modifier pipeline
// ABOUTME: Car class (with traction layout), surface, track condition and weather
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RallyWorks

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{SelectorKind, SetupError, SetupResult};

/// Lower-case a selector token and drop separators so "Group A", "group-a"
/// and "GROUP_A" all compare equal.
fn normalize(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Driven-wheel layout; gates which differential parameters exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TractionLayout {
    /// Four-wheel drive: front, rear and centre differentials
    #[serde(rename = "4WD")]
    FourWheelDrive,
    /// Front-wheel drive: front differential only
    #[serde(rename = "FWD")]
    FrontWheelDrive,
    /// Rear-wheel drive: rear differential only
    #[serde(rename = "RWD")]
    RearWheelDrive,
}

impl TractionLayout {
    /// Whether this layout has a driven front axle
    #[must_use]
    pub const fn has_front_diff(self) -> bool {
        matches!(self, Self::FourWheelDrive | Self::FrontWheelDrive)
    }

    /// Whether this layout has a driven rear axle
    #[must_use]
    pub const fn has_rear_diff(self) -> bool {
        matches!(self, Self::FourWheelDrive | Self::RearWheelDrive)
    }

    /// Whether this layout has a centre differential
    #[must_use]
    pub const fn has_centre_diff(self) -> bool {
        matches!(self, Self::FourWheelDrive)
    }
}

impl fmt::Display for TractionLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::FourWheelDrive => "4WD",
            Self::FrontWheelDrive => "FWD",
            Self::RearWheelDrive => "RWD",
        })
    }
}

impl FromStr for TractionLayout {
    type Err = SetupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "4wd" | "awd" => Ok(Self::FourWheelDrive),
            "fwd" => Ok(Self::FrontWheelDrive),
            "rwd" => Ok(Self::RearWheelDrive),
            _ => Err(SetupError::invalid_selector(
                SelectorKind::TractionLayout,
                s,
                "4WD, FWD, RWD",
            )),
        }
    }
}

/// Homologation class of the car
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CarClass {
    /// Group A (4WD), the reference class
    GroupA,
    /// Group B (4WD)
    GroupB,
    /// Rally2 (4WD)
    Rally2,
    /// Rally4 (FWD)
    Rally4,
    /// Historic rear-drive cars
    HistoricRwd,
}

impl CarClass {
    /// Every car class, in display order
    pub const ALL: [Self; 5] = [
        Self::GroupA,
        Self::GroupB,
        Self::Rally2,
        Self::Rally4,
        Self::HistoricRwd,
    ];

    /// Traction layout carried by this class
    #[must_use]
    pub const fn layout(self) -> TractionLayout {
        match self {
            Self::GroupA | Self::GroupB | Self::Rally2 => TractionLayout::FourWheelDrive,
            Self::Rally4 => TractionLayout::FrontWheelDrive,
            Self::HistoricRwd => TractionLayout::RearWheelDrive,
        }
    }

    /// Human-readable name
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::GroupA => "Group A",
            Self::GroupB => "Group B",
            Self::Rally2 => "Rally2",
            Self::Rally4 => "Rally4",
            Self::HistoricRwd => "Historic RWD",
        }
    }
}

impl fmt::Display for CarClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for CarClass {
    type Err = SetupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "groupa" | "gra" => Ok(Self::GroupA),
            "groupb" | "grb" => Ok(Self::GroupB),
            "rally2" | "r5" => Ok(Self::Rally2),
            "rally4" | "r2" => Ok(Self::Rally4),
            "historicrwd" | "historic" => Ok(Self::HistoricRwd),
            _ => Err(SetupError::invalid_selector(
                SelectorKind::CarClass,
                s,
                "group_a, group_b, rally2, rally4, historic_rwd",
            )),
        }
    }
}

/// Driving surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Surface {
    /// Sealed road; "tarmac" in the reference data
    Asphalt,
    /// Loose gravel
    Gravel,
    /// Snow and ice
    Snow,
    /// Mixed sealed and loose sections
    Mixed,
}

impl Surface {
    /// Every surface, in display order
    pub const ALL: [Self; 4] = [Self::Asphalt, Self::Gravel, Self::Snow, Self::Mixed];

    /// Lower-case token used in reference file names (`car_setups_<token>.tsv`)
    #[must_use]
    pub const fn file_token(self) -> &'static str {
        match self {
            Self::Asphalt => "tarmac",
            Self::Gravel => "gravel",
            Self::Snow => "snow",
            Self::Mixed => "mixed",
        }
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Asphalt => "Asphalt",
            Self::Gravel => "Gravel",
            Self::Snow => "Snow",
            Self::Mixed => "Mixed",
        })
    }
}

impl FromStr for Surface {
    type Err = SetupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "asphalt" | "tarmac" => Ok(Self::Asphalt),
            "gravel" => Ok(Self::Gravel),
            "snow" | "ice" => Ok(Self::Snow),
            "mixed" => Ok(Self::Mixed),
            _ => Err(SetupError::invalid_selector(
                SelectorKind::Surface,
                s,
                "asphalt (tarmac), gravel, snow, mixed",
            )),
        }
    }
}

/// State of the stage's road surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackCondition {
    /// Well-kept surface
    Smooth,
    /// Undulating, with crests and compressions
    Bumpy,
    /// Broken surface, rocks and potholes
    Rough,
    /// Deep ruts cut by earlier cars
    Rutted,
}

impl TrackCondition {
    /// Every track condition, in display order
    pub const ALL: [Self; 4] = [Self::Smooth, Self::Bumpy, Self::Rough, Self::Rutted];
}

impl fmt::Display for TrackCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Smooth => "Smooth",
            Self::Bumpy => "Bumpy",
            Self::Rough => "Rough",
            Self::Rutted => "Rutted",
        })
    }
}

impl FromStr for TrackCondition {
    type Err = SetupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "smooth" => Ok(Self::Smooth),
            "bumpy" => Ok(Self::Bumpy),
            "rough" => Ok(Self::Rough),
            "rutted" => Ok(Self::Rutted),
            _ => Err(SetupError::invalid_selector(
                SelectorKind::TrackCondition,
                s,
                "smooth, bumpy, rough, rutted",
            )),
        }
    }
}

/// Weather during the stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weather {
    /// Dry
    Dry,
    /// Damp, drying line
    Damp,
    /// Standing water
    Wet,
    /// Falling snow
    Snowfall,
}

impl Weather {
    /// Every weather value, in display order
    pub const ALL: [Self; 4] = [Self::Dry, Self::Damp, Self::Wet, Self::Snowfall];
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Dry => "Dry",
            Self::Damp => "Damp",
            Self::Wet => "Wet",
            Self::Snowfall => "Snowfall",
        })
    }
}

impl FromStr for Weather {
    type Err = SetupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "dry" => Ok(Self::Dry),
            "damp" => Ok(Self::Damp),
            "wet" | "rain" => Ok(Self::Wet),
            "snowfall" | "snowing" | "snow" => Ok(Self::Snowfall),
            _ => Err(SetupError::invalid_selector(
                SelectorKind::Weather,
                s,
                "dry, damp, wet, snowfall",
            )),
        }
    }
}

/// The four categorical inputs of one pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
    /// Car class (carries the traction layout)
    pub car_class: CarClass,
    /// Driving surface
    pub surface: Surface,
    /// Track condition
    pub condition: TrackCondition,
    /// Weather
    pub weather: Weather,
}

impl Selection {
    /// Build a selection from already-validated values
    #[must_use]
    pub const fn new(
        car_class: CarClass,
        surface: Surface,
        condition: TrackCondition,
        weather: Weather,
    ) -> Self {
        Self {
            car_class,
            surface,
            condition,
            weather,
        }
    }

    /// Parse a selection from raw strings at the input boundary
    ///
    /// # Errors
    ///
    /// Returns `SetupError::InvalidSelector` for the first value outside its enumeration
    pub fn parse(
        car_class: &str,
        surface: &str,
        condition: &str,
        weather: &str,
    ) -> SetupResult<Self> {
        Ok(Self {
            car_class: car_class.parse()?,
            surface: surface.parse()?,
            condition: condition.parse()?,
            weather: weather.parse()?,
        })
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) / {} / {} / {}",
            self.car_class,
            self.car_class.layout(),
            self.surface,
            self.condition,
            self.weather
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_parsing_is_separator_and_case_insensitive() {
        assert_eq!("Group A".parse::<CarClass>(), Ok(CarClass::GroupA));
        assert_eq!("group-a".parse::<CarClass>(), Ok(CarClass::GroupA));
        assert_eq!("TARMAC".parse::<Surface>(), Ok(Surface::Asphalt));
        assert_eq!("4wd".parse::<TractionLayout>(), Ok(TractionLayout::FourWheelDrive));
    }

    #[test]
    fn test_unknown_selector_is_rejected() {
        let err = "hovercraft".parse::<CarClass>().unwrap_err();
        assert!(matches!(
            err,
            SetupError::InvalidSelector {
                kind: SelectorKind::CarClass,
                ..
            }
        ));

        let err = Selection::parse("group_a", "gravel", "smooth", "hail").unwrap_err();
        assert!(matches!(
            err,
            SetupError::InvalidSelector {
                kind: SelectorKind::Weather,
                ..
            }
        ));
    }

    #[test]
    fn test_car_class_layouts() {
        assert_eq!(CarClass::GroupA.layout(), TractionLayout::FourWheelDrive);
        assert_eq!(CarClass::Rally4.layout(), TractionLayout::FrontWheelDrive);
        assert!(!CarClass::HistoricRwd.layout().has_front_diff());
        assert!(CarClass::HistoricRwd.layout().has_rear_diff());
        assert!(!TractionLayout::FrontWheelDrive.has_centre_diff());
    }
}
