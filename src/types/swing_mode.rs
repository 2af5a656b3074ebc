// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Louvre swing behaviour.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// Louvre swing behaviour of a climate device.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
#[serde(into = "u8", try_from = "u8")]
pub enum SwingMode {
    /// Louvres fixed.
    #[default]
    Off,
    /// Horizontal swing.
    Horizontal,
    /// Vertical swing.
    Vertical,
    /// Swing on both axes.
    Both,
}

impl SwingMode {
    /// Returns the upper-case name of the swing mode.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "OFF",
            Self::Horizontal => "HORIZONTAL",
            Self::Vertical => "VERTICAL",
            Self::Both => "BOTH",
        }
    }

    /// Returns the numeric code used by the device API.
    #[must_use]
    pub const fn as_num(&self) -> u8 {
        match self {
            Self::Off => 0,
            Self::Horizontal => 1,
            Self::Vertical => 2,
            Self::Both => 3,
        }
    }
}

impl fmt::Display for SwingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SwingMode {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "OFF" | "0" => Ok(Self::Off),
            "HORIZONTAL" | "1" => Ok(Self::Horizontal),
            "VERTICAL" | "2" => Ok(Self::Vertical),
            "BOTH" | "3" => Ok(Self::Both),
            _ => Err(ValueError::InvalidSwingMode(s.to_string())),
        }
    }
}

impl TryFrom<u8> for SwingMode {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Off),
            1 => Ok(Self::Horizontal),
            2 => Ok(Self::Vertical),
            3 => Ok(Self::Both),
            _ => Err(ValueError::InvalidSwingModeCode(value)),
        }
    }
}

impl From<SwingMode> for u8 {
    fn from(mode: SwingMode) -> Self {
        mode.as_num()
    }
}

impl From<bool> for SwingMode {
    /// Maps a plain oscillation toggle onto swing on both axes.
    fn from(value: bool) -> Self {
        if value { Self::Both } else { Self::Off }
    }
}
