// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Operating mode of a climate device.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// Operating mode requested from a climate device.
///
/// The numeric codes match the device API: `Off` is 0 through `Dry` at 5.
///
/// # Examples
///
/// ```
/// use climate_state::types::ClimateMode;
///
/// assert_eq!(ClimateMode::Heat.as_num(), 3);
/// assert_eq!(ClimateMode::try_from(1).unwrap(), ClimateMode::Auto);
/// assert_eq!("fan_only".parse::<ClimateMode>().unwrap(), ClimateMode::FanOnly);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
#[serde(into = "u8", try_from = "u8")]
pub enum ClimateMode {
    /// Device is off.
    #[default]
    Off,
    /// Device heats or cools to stay between the low and high setpoints.
    Auto,
    /// Cooling.
    Cool,
    /// Heating.
    Heat,
    /// Fan only, no heating or cooling.
    FanOnly,
    /// Dehumidifying.
    Dry,
}

impl ClimateMode {
    /// Returns the upper-case name of the mode.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "OFF",
            Self::Auto => "AUTO",
            Self::Cool => "COOL",
            Self::Heat => "HEAT",
            Self::FanOnly => "FAN_ONLY",
            Self::Dry => "DRY",
        }
    }

    /// Returns the numeric code used by the device API.
    #[must_use]
    pub const fn as_num(&self) -> u8 {
        match self {
            Self::Off => 0,
            Self::Auto => 1,
            Self::Cool => 2,
            Self::Heat => 3,
            Self::FanOnly => 4,
            Self::Dry => 5,
        }
    }

    /// Returns `true` unless the mode is [`ClimateMode::Off`].
    #[must_use]
    pub const fn is_on(&self) -> bool {
        !matches!(self, Self::Off)
    }
}

impl fmt::Display for ClimateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ClimateMode {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "OFF" | "0" => Ok(Self::Off),
            "AUTO" | "1" => Ok(Self::Auto),
            "COOL" | "2" => Ok(Self::Cool),
            "HEAT" | "3" => Ok(Self::Heat),
            "FAN_ONLY" | "FANONLY" | "4" => Ok(Self::FanOnly),
            "DRY" | "5" => Ok(Self::Dry),
            _ => Err(ValueError::InvalidClimateMode(s.to_string())),
        }
    }
}

impl TryFrom<u8> for ClimateMode {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Off),
            1 => Ok(Self::Auto),
            2 => Ok(Self::Cool),
            3 => Ok(Self::Heat),
            4 => Ok(Self::FanOnly),
            5 => Ok(Self::Dry),
            _ => Err(ValueError::InvalidClimateModeCode(value)),
        }
    }
}

impl From<ClimateMode> for u8 {
    fn from(mode: ClimateMode) -> Self {
        mode.as_num()
    }
}
