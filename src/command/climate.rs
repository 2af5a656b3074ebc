// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The consolidated climate command.

use crate::error::Result;
use crate::types::{ClimateMode, EntityKey, FanMode, SwingMode};

/// Snapshot of the desired state of a climate entity.
///
/// One command is produced per flush and carries the final value of every
/// controllable property. Low and high setpoints equal the target
/// temperature unless the entity supports dual setpoints and is in AUTO mode.
///
/// Serializes to the camelCase record the device API expects, with numeric
/// enum codes.
///
/// # Examples
///
/// ```
/// use climate_state::command::ClimateCommand;
/// use climate_state::types::{ClimateMode, EntityKey, FanMode, SwingMode};
///
/// let command = ClimateCommand {
///     key: EntityKey::new("bedroom"),
///     swing_mode: SwingMode::Off,
///     fan_mode: FanMode::Auto,
///     mode: ClimateMode::Cool,
///     target_temperature: 22.0,
///     target_temperature_low: 22.0,
///     target_temperature_high: 22.0,
/// };
///
/// let json = command.to_json().unwrap();
/// assert!(json.contains("\"mode\":2"));
/// ```
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClimateCommand {
    /// Identity of the addressed entity.
    pub key: EntityKey,
    /// Louvre swing behaviour.
    pub swing_mode: SwingMode,
    /// Fan behaviour.
    pub fan_mode: FanMode,
    /// Operating mode.
    pub mode: ClimateMode,
    /// Single setpoint target.
    pub target_temperature: f32,
    /// Lower bound of the dual setpoint range.
    pub target_temperature_low: f32,
    /// Upper bound of the dual setpoint range.
    pub target_temperature_high: f32,
}

impl ClimateCommand {
    /// Encodes the command as a JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encode`](crate::Error::Encode) if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Returns `true` if the command carries distinct low/high setpoints.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_dual_setpoint(&self) -> bool {
        self.mode == ClimateMode::Auto
            && (self.target_temperature_low != self.target_temperature
                || self.target_temperature_high != self.target_temperature)
    }
}
