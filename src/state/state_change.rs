// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed property writes.
//!
//! A [`ClimateChange`] is one inbound write from the accessory layer or from
//! device telemetry. Changes are applied to a
//! [`ClimateState`](super::ClimateState), which decides whether they are
//! worth dispatching.
//!
//! # Examples
//!
//! ```
//! use climate_state::state::{ClimateChange, ClimateState};
//! use climate_state::types::{ClimateMode, FanMode};
//!
//! let mut state = ClimateState::new("hall");
//!
//! assert!(state.apply(&ClimateChange::power_on()));
//! assert!(state.apply(&ClimateChange::FanMode(FanMode::High)));
//!
//! // Writing the same value again is not a change
//! assert!(!state.apply(&ClimateChange::FanMode(FanMode::High)));
//! assert_eq!(state.mode(), ClimateMode::Auto);
//! ```

use crate::types::{ClimateMode, FanMode, SwingMode};

/// A single property write.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum ClimateChange {
    /// Power on or off.
    Active(bool),

    /// Fan behaviour.
    FanMode(FanMode),

    /// Operating mode.
    Mode(ClimateMode),

    /// Louvre swing behaviour.
    SwingMode(SwingMode),

    /// Single setpoint target.
    TargetTemperature(f32),

    /// Lower dual setpoint. Re-infers the mode with COOL as candidate.
    TargetTemperatureLow(f32),

    /// Upper dual setpoint. Re-infers the mode with HEAT as candidate.
    TargetTemperatureHigh(f32),

    /// Ambient reading from the device. Never dispatched on its own.
    CurrentTemperature(f32),

    /// Whether low/high setpoints are meaningful. Never dispatched on its own.
    SupportsDualSetpoint(bool),

    /// Several writes applied in order.
    Batch(Vec<ClimateChange>),
}

impl ClimateChange {
    /// Creates a power-on change.
    #[must_use]
    pub fn power_on() -> Self {
        Self::Active(true)
    }

    /// Creates a power-off change.
    #[must_use]
    pub fn power_off() -> Self {
        Self::Active(false)
    }

    /// Creates a low/high setpoint pair, written back to back.
    ///
    /// Applied at one instant, the pair always resolves to AUTO mode.
    #[must_use]
    pub fn dual_setpoint(low: f32, high: f32) -> Self {
        Self::Batch(vec![
            Self::TargetTemperatureLow(low),
            Self::TargetTemperatureHigh(high),
        ])
    }

    /// Returns the property name, for logging.
    #[must_use]
    pub const fn property(&self) -> &'static str {
        match self {
            Self::Active(_) => "active",
            Self::FanMode(_) => "fan_mode",
            Self::Mode(_) => "mode",
            Self::SwingMode(_) => "swing_mode",
            Self::TargetTemperature(_) => "target_temperature",
            Self::TargetTemperatureLow(_) => "target_temperature_low",
            Self::TargetTemperatureHigh(_) => "target_temperature_high",
            Self::CurrentTemperature(_) => "current_temperature",
            Self::SupportsDualSetpoint(_) => "supports_dual_setpoint",
            Self::Batch(_) => "batch",
        }
    }
}

impl From<ClimateMode> for ClimateChange {
    fn from(mode: ClimateMode) -> Self {
        Self::Mode(mode)
    }
}

impl From<FanMode> for ClimateChange {
    fn from(mode: FanMode) -> Self {
        Self::FanMode(mode)
    }
}

impl From<SwingMode> for ClimateChange {
    fn from(mode: SwingMode) -> Self {
        Self::SwingMode(mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_helpers() {
        assert_eq!(ClimateChange::power_on(), ClimateChange::Active(true));
        assert_eq!(ClimateChange::power_off(), ClimateChange::Active(false));
    }

    #[test]
    fn dual_setpoint_is_ordered_batch() {
        let change = ClimateChange::dual_setpoint(18.0, 24.0);
        assert_eq!(
            change,
            ClimateChange::Batch(vec![
                ClimateChange::TargetTemperatureLow(18.0),
                ClimateChange::TargetTemperatureHigh(24.0),
            ])
        );
    }

    #[test]
    fn conversions_and_names() {
        let change: ClimateChange = ClimateMode::Dry.into();
        assert_eq!(change.property(), "mode");
        let change: ClimateChange = SwingMode::Both.into();
        assert_eq!(change, ClimateChange::SwingMode(SwingMode::Both));
        assert_eq!(ClimateChange::from(FanMode::Quiet).property(), "fan_mode");
    }
}
