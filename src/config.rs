// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tuning for a climate entity.

use std::time::Duration;

/// Configuration for a climate entity.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use climate_state::ClimateConfig;
///
/// let config = ClimateConfig::default()
///     .with_flush_delay(Duration::from_millis(40))
///     .with_auto_inference_window(Duration::from_millis(120))
///     .with_dual_setpoint(true);
///
/// assert_eq!(config.flush_delay, Duration::from_millis(40));
/// assert!(config.supports_dual_setpoint);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ClimateConfig {
    /// Delay between a flush request and the flush itself.
    ///
    /// Requests arriving within this delay share one flush.
    pub flush_delay: Duration,
    /// Maximum gap between two temperature writes for a low/high setpoint
    /// pair to be read as AUTO mode.
    pub auto_inference_window: Duration,
    /// Initial value of every temperature property, in degrees.
    pub initial_temperature: f32,
    /// Whether the entity honours independent low/high setpoints.
    pub supports_dual_setpoint: bool,
}

impl ClimateConfig {
    /// Default flush delay.
    pub const DEFAULT_FLUSH_DELAY: Duration = Duration::from_millis(25);

    /// Default AUTO inference window.
    pub const DEFAULT_AUTO_INFERENCE_WINDOW: Duration = Duration::from_millis(50);

    /// Default initial temperature.
    pub const DEFAULT_TEMPERATURE: f32 = 20.0;

    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the flush delay.
    #[must_use]
    pub fn with_flush_delay(mut self, delay: Duration) -> Self {
        self.flush_delay = delay;
        self
    }

    /// Sets the AUTO inference window.
    #[must_use]
    pub fn with_auto_inference_window(mut self, window: Duration) -> Self {
        self.auto_inference_window = window;
        self
    }

    /// Sets the initial temperature.
    #[must_use]
    pub fn with_initial_temperature(mut self, degrees: f32) -> Self {
        self.initial_temperature = degrees;
        self
    }

    /// Sets dual setpoint support.
    #[must_use]
    pub fn with_dual_setpoint(mut self, supported: bool) -> Self {
        self.supports_dual_setpoint = supported;
        self
    }
}

impl Default for ClimateConfig {
    fn default() -> Self {
        Self {
            flush_delay: Self::DEFAULT_FLUSH_DELAY,
            auto_inference_window: Self::DEFAULT_AUTO_INFERENCE_WINDOW,
            initial_temperature: Self::DEFAULT_TEMPERATURE,
            supports_dual_setpoint: false,
        }
    }
}
