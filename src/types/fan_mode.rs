// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fan behaviour requested from a climate device.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// Requested fan behaviour.
///
/// Codes follow the device API, `On` is 0 and `Quiet` is 9.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
#[serde(into = "u8", try_from = "u8")]
pub enum FanMode {
    /// Fan always on.
    On,
    /// Fan off.
    #[default]
    Off,
    /// Fan speed chosen by the device.
    Auto,
    /// Low speed.
    Low,
    /// Medium speed.
    Medium,
    /// High speed.
    High,
    /// Airflow directed to the middle.
    Middle,
    /// Focused airflow.
    Focus,
    /// Diffused airflow.
    Diffused,
    /// Quiet operation.
    Quiet,
}

impl FanMode {
    /// Returns the upper-case name of the fan mode.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::On => "ON",
            Self::Off => "OFF",
            Self::Auto => "AUTO",
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Middle => "MIDDLE",
            Self::Focus => "FOCUS",
            Self::Diffused => "DIFFUSED",
            Self::Quiet => "QUIET",
        }
    }

    /// Returns the numeric code used by the device API.
    #[must_use]
    pub const fn as_num(&self) -> u8 {
        match self {
            Self::On => 0,
            Self::Off => 1,
            Self::Auto => 2,
            Self::Low => 3,
            Self::Medium => 4,
            Self::High => 5,
            Self::Middle => 6,
            Self::Focus => 7,
            Self::Diffused => 8,
            Self::Quiet => 9,
        }
    }

    const ALL: [Self; 10] = [
        Self::On,
        Self::Off,
        Self::Auto,
        Self::Low,
        Self::Medium,
        Self::High,
        Self::Middle,
        Self::Focus,
        Self::Diffused,
        Self::Quiet,
    ];
}

impl fmt::Display for FanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FanMode {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == upper || mode.as_num().to_string() == upper)
            .ok_or_else(|| ValueError::InvalidFanMode(s.to_string()))
    }
}

impl TryFrom<u8> for FanMode {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(value))
            .copied()
            .ok_or(ValueError::InvalidFanModeCode(value))
    }
}

impl From<FanMode> for u8 {
    fn from(mode: FanMode) -> Self {
        mode.as_num()
    }
}
