// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Dirty-tracked state of one climate entity.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use crate::clock::{Clock, TokioClock};
use crate::command::{ClimateCommand, ClimateCommandSink};
use crate::config::ClimateConfig;
use crate::types::{ClimateMode, EntityKey, FanMode, SwingMode};

use super::ClimateChange;

/// Which temperature property a write targeted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TemperatureWrite {
    Target,
    Low,
    High,
}

impl TemperatureWrite {
    fn candidate_mode(self) -> ClimateMode {
        match self {
            Self::Low => ClimateMode::Cool,
            Self::High => ClimateMode::Heat,
            Self::Target => ClimateMode::Auto,
        }
    }
}

/// Desired and observed state of a climate entity.
///
/// Every write goes through [`apply`](Self::apply) (or one of the `set_*`
/// shorthands). A write that changes a dispatched value marks the state
/// dirty; [`take_command`](Self::take_command) then yields one command
/// describing the net result and clears the flag.
///
/// # Power and mode
///
/// While the entity is inactive its mode is always [`ClimateMode::Off`].
/// Powering off remembers the running mode and powering on restores it,
/// falling back to [`ClimateMode::Auto`] when there is nothing to restore.
/// A running mode written while inactive is remembered for the next
/// power-on; writing `Off` while inactive changes nothing.
///
/// # AUTO inference
///
/// Accessory frameworks deliver a dual setpoint change as two separate
/// low/high writes. A setpoint write arriving within
/// [`ClimateConfig::auto_inference_window`] of a target write or of a write
/// to the opposite setpoint puts the entity in AUTO mode; otherwise a low
/// write selects COOL and a high write selects HEAT. Repeated writes to the
/// same setpoint never complete a pair.
///
/// # Examples
///
/// ```
/// use climate_state::state::ClimateState;
/// use climate_state::types::ClimateMode;
///
/// let mut state = ClimateState::new("hall");
/// state.set_active(true);
/// assert!(state.is_dirty());
///
/// let command = state.take_command().unwrap();
/// assert_eq!(command.mode, ClimateMode::Auto);
/// assert!(!state.is_dirty());
/// assert!(state.take_command().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct ClimateState {
    key: EntityKey,
    active: bool,
    fan_mode: FanMode,
    mode: ClimateMode,
    previous_mode: ClimateMode,
    swing_mode: SwingMode,
    supports_dual_setpoint: bool,
    target_temperature: f32,
    current_temperature: f32,
    target_temperature_low: f32,
    target_temperature_high: f32,
    dirty: bool,
    last_temperature_write: Option<(Instant, TemperatureWrite)>,
    auto_inference_window: Duration,
    clock: Arc<dyn Clock>,
}

impl ClimateState {
    /// Creates a state with the default configuration.
    #[must_use]
    pub fn new(key: impl Into<EntityKey>) -> Self {
        Self::with_config(key, &ClimateConfig::default())
    }

    /// Creates a state from a configuration.
    #[must_use]
    pub fn with_config(key: impl Into<EntityKey>, config: &ClimateConfig) -> Self {
        Self {
            key: key.into(),
            active: false,
            fan_mode: FanMode::Off,
            mode: ClimateMode::Off,
            previous_mode: ClimateMode::Off,
            swing_mode: SwingMode::Off,
            supports_dual_setpoint: config.supports_dual_setpoint,
            target_temperature: config.initial_temperature,
            current_temperature: config.initial_temperature,
            target_temperature_low: config.initial_temperature,
            target_temperature_high: config.initial_temperature,
            dirty: false,
            last_temperature_write: None,
            auto_inference_window: config.auto_inference_window,
            clock: Arc::new(TokioClock),
        }
    }

    /// Replaces the clock used to time temperature writes.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    // ========== Read accessors ==========

    /// Returns the entity key.
    #[must_use]
    pub fn key(&self) -> &EntityKey {
        &self.key
    }

    /// Returns whether the entity is powered on.
    #[must_use]
    pub fn active(&self) -> bool {
        self.active
    }

    /// Returns the requested fan behaviour.
    #[must_use]
    pub fn fan_mode(&self) -> FanMode {
        self.fan_mode
    }

    /// Returns the operating mode.
    #[must_use]
    pub fn mode(&self) -> ClimateMode {
        self.mode
    }

    /// Returns the mode restored on the next power-on.
    #[must_use]
    pub fn previous_mode(&self) -> ClimateMode {
        self.previous_mode
    }

    /// Returns the louvre swing behaviour.
    #[must_use]
    pub fn swing_mode(&self) -> SwingMode {
        self.swing_mode
    }

    /// Returns whether low/high setpoints are honoured.
    #[must_use]
    pub fn supports_dual_setpoint(&self) -> bool {
        self.supports_dual_setpoint
    }

    /// Returns the single setpoint target.
    #[must_use]
    pub fn target_temperature(&self) -> f32 {
        self.target_temperature
    }

    /// Returns the last ambient reading.
    #[must_use]
    pub fn current_temperature(&self) -> f32 {
        self.current_temperature
    }

    /// Returns the lower dual setpoint.
    #[must_use]
    pub fn target_temperature_low(&self) -> f32 {
        self.target_temperature_low
    }

    /// Returns the upper dual setpoint.
    #[must_use]
    pub fn target_temperature_high(&self) -> f32 {
        self.target_temperature_high
    }

    /// Returns `true` if changes are waiting to be dispatched.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    // ========== Write accessors ==========

    /// Powers the entity on or off.
    pub fn set_active(&mut self, value: bool) {
        self.apply(&ClimateChange::Active(value));
    }

    /// Sets the fan behaviour.
    pub fn set_fan_mode(&mut self, value: FanMode) {
        self.apply(&ClimateChange::FanMode(value));
    }

    /// Sets the operating mode.
    pub fn set_mode(&mut self, value: ClimateMode) {
        self.apply(&ClimateChange::Mode(value));
    }

    /// Sets the louvre swing behaviour.
    pub fn set_swing_mode(&mut self, value: SwingMode) {
        self.apply(&ClimateChange::SwingMode(value));
    }

    /// Sets the single setpoint target.
    pub fn set_target_temperature(&mut self, value: f32) {
        self.apply(&ClimateChange::TargetTemperature(value));
    }

    /// Sets the lower dual setpoint.
    pub fn set_target_temperature_low(&mut self, value: f32) {
        self.apply(&ClimateChange::TargetTemperatureLow(value));
    }

    /// Sets the upper dual setpoint.
    pub fn set_target_temperature_high(&mut self, value: f32) {
        self.apply(&ClimateChange::TargetTemperatureHigh(value));
    }

    /// Records an ambient reading.
    pub fn set_current_temperature(&mut self, value: f32) {
        self.apply(&ClimateChange::CurrentTemperature(value));
    }

    /// Sets whether low/high setpoints are honoured.
    pub fn set_supports_dual_setpoint(&mut self, value: bool) {
        self.apply(&ClimateChange::SupportsDualSetpoint(value));
    }

    /// Applies a property write.
    ///
    /// Returns `true` if the write changed a dispatched value and marked the
    /// state dirty. Writes of ambient readings or dual setpoint support always
    /// return `false`.
    #[allow(clippy::float_cmp)]
    pub fn apply(&mut self, change: &ClimateChange) -> bool {
        let changed = match change {
            ClimateChange::Active(value) => self.apply_active(*value),
            ClimateChange::FanMode(value) => {
                let changed = self.fan_mode != *value;
                self.fan_mode = *value;
                changed
            }
            ClimateChange::Mode(value) => self.assign_mode(*value),
            ClimateChange::SwingMode(value) => {
                let changed = self.swing_mode != *value;
                self.swing_mode = *value;
                changed
            }
            ClimateChange::TargetTemperature(value) => {
                let changed = self.target_temperature != *value;
                self.target_temperature = *value;
                self.last_temperature_write = Some((self.clock.now(), TemperatureWrite::Target));
                changed
            }
            ClimateChange::TargetTemperatureLow(value) => {
                let changed = self.target_temperature_low != *value;
                self.target_temperature_low = *value;
                let mode_changed = self.apply_inferred_mode(TemperatureWrite::Low);
                changed || mode_changed
            }
            ClimateChange::TargetTemperatureHigh(value) => {
                let changed = self.target_temperature_high != *value;
                self.target_temperature_high = *value;
                let mode_changed = self.apply_inferred_mode(TemperatureWrite::High);
                changed || mode_changed
            }
            ClimateChange::CurrentTemperature(value) => {
                self.current_temperature = *value;
                false
            }
            ClimateChange::SupportsDualSetpoint(value) => {
                self.supports_dual_setpoint = *value;
                false
            }
            ClimateChange::Batch(changes) => {
                let mut any_changed = false;
                for c in changes {
                    if self.apply(c) {
                        any_changed = true;
                    }
                }
                return any_changed;
            }
        };

        if changed {
            tracing::trace!(key = %self.key, property = change.property(), "Climate property changed");
            self.dirty = true;
        }
        changed
    }

    fn apply_active(&mut self, value: bool) -> bool {
        let mut mode = if self.active {
            self.mode
        } else {
            self.previous_mode
        };
        if value && mode == ClimateMode::Off {
            mode = ClimateMode::Auto;
        }
        if !value {
            if self.active {
                self.previous_mode = self.mode;
            }
            mode = ClimateMode::Off;
        }

        let changed = self.active != value || self.mode != mode;
        self.active = value;
        self.mode = mode;
        changed
    }

    /// Sets the mode, or remembers it for power-on while inactive.
    ///
    /// `Off` is never remembered, the next power-on restores the last
    /// running mode.
    fn assign_mode(&mut self, mode: ClimateMode) -> bool {
        if !self.active {
            if mode.is_on() {
                self.previous_mode = mode;
            }
            return false;
        }
        let changed = self.mode != mode;
        self.mode = mode;
        changed
    }

    fn apply_inferred_mode(&mut self, write: TemperatureWrite) -> bool {
        let now = self.clock.now();
        let mode = self.infer_mode(write, now);
        self.last_temperature_write = Some((now, write));
        self.assign_mode(mode)
    }

    /// A setpoint following the target or the opposite setpoint within the
    /// window completes a pair: AUTO. Otherwise the low side cools and the
    /// high side heats.
    fn infer_mode(&self, write: TemperatureWrite, now: Instant) -> ClimateMode {
        match self.last_temperature_write {
            Some((last, previous))
                if previous != write
                    && now.saturating_duration_since(last) < self.auto_inference_window =>
            {
                ClimateMode::Auto
            }
            _ => write.candidate_mode(),
        }
    }

    // ========== Dispatch ==========

    /// Builds the command for the current state without touching the dirty
    /// flag.
    #[must_use]
    pub fn command(&self) -> ClimateCommand {
        let dual = self.supports_dual_setpoint && self.mode == ClimateMode::Auto;
        let (low, high) = if dual {
            (self.target_temperature_low, self.target_temperature_high)
        } else {
            (self.target_temperature, self.target_temperature)
        };

        ClimateCommand {
            key: self.key.clone(),
            swing_mode: self.swing_mode,
            fan_mode: self.fan_mode,
            mode: self.mode,
            target_temperature: self.target_temperature,
            target_temperature_low: low,
            target_temperature_high: high,
        }
    }

    /// Clears the dirty flag and returns the command to dispatch.
    ///
    /// Returns `None` when nothing changed since the last call. Writes made
    /// after this returns start a new dirty period.
    pub fn take_command(&mut self) -> Option<ClimateCommand> {
        if !self.dirty {
            return None;
        }
        self.dirty = false;
        Some(self.command())
    }

    /// Dispatches the pending command to `sink`, if any.
    ///
    /// Returns `true` if the sink was called.
    pub fn flush(&mut self, sink: &dyn ClimateCommandSink) -> bool {
        match self.take_command() {
            Some(command) => {
                tracing::debug!(key = %self.key, mode = %command.mode, "Dispatching climate command");
                sink.climate_command(command);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;

    use super::*;
    use crate::clock::ManualClock;

    fn state_with_clock() -> (ClimateState, ManualClock) {
        let clock = ManualClock::new();
        let config = ClimateConfig::default().with_dual_setpoint(true);
        let state = ClimateState::with_config("test", &config).with_clock(Arc::new(clock.clone()));
        (state, clock)
    }

    #[test]
    fn new_state_defaults() {
        let state = ClimateState::new("test");
        assert!(!state.active());
        assert_eq!(state.mode(), ClimateMode::Off);
        assert_eq!(state.previous_mode(), ClimateMode::Off);
        assert_eq!(state.fan_mode(), FanMode::Off);
        assert_eq!(state.swing_mode(), SwingMode::Off);
        assert!(!state.supports_dual_setpoint());
        assert!((state.target_temperature() - 20.0).abs() < f32::EPSILON);
        assert!((state.current_temperature() - 20.0).abs() < f32::EPSILON);
        assert!(!state.is_dirty());
        assert_eq!(state.key().as_str(), "test");
    }

    #[test]
    fn unchanged_writes_stay_clean() {
        let mut state = ClimateState::new("test");
        state.set_active(false);
        state.set_fan_mode(FanMode::Off);
        state.set_swing_mode(SwingMode::Off);
        state.set_target_temperature(20.0);

        assert!(!state.is_dirty());
        assert!(state.take_command().is_none());
    }

    #[test]
    fn changed_write_marks_dirty_once() {
        let mut state = ClimateState::new("test");
        state.set_fan_mode(FanMode::High);
        assert!(state.is_dirty());

        assert!(state.take_command().is_some());
        assert!(!state.is_dirty());
        assert!(state.take_command().is_none());
    }

    #[test]
    fn target_temperature_detects_real_changes() {
        let mut state = ClimateState::new("test");
        assert!(!state.apply(&ClimateChange::TargetTemperature(20.0)));
        assert!(state.apply(&ClimateChange::TargetTemperature(22.5)));
        assert!(!state.apply(&ClimateChange::TargetTemperature(22.5)));
    }

    #[test]
    fn passive_writes_never_mark_dirty() {
        let mut state = ClimateState::new("test");
        state.set_current_temperature(27.0);
        state.set_supports_dual_setpoint(true);

        assert!(!state.is_dirty());
        assert!((state.current_temperature() - 27.0).abs() < f32::EPSILON);
        assert!(state.supports_dual_setpoint());
    }

    #[test]
    fn power_on_from_off_selects_auto() {
        let mut state = ClimateState::new("test");
        state.set_active(true);
        assert_eq!(state.mode(), ClimateMode::Auto);
        assert!(state.is_dirty());
    }

    #[test]
    fn power_cycle_restores_mode() {
        let mut state = ClimateState::new("test");
        state.set_active(true);
        state.set_mode(ClimateMode::Cool);

        state.set_active(false);
        assert_eq!(state.mode(), ClimateMode::Off);
        assert_eq!(state.previous_mode(), ClimateMode::Cool);

        state.set_active(true);
        assert_eq!(state.mode(), ClimateMode::Cool);
    }

    #[test]
    fn power_cycle_from_off_mode_restores_auto() {
        let mut state = ClimateState::new("test");
        state.set_active(true);
        state.set_mode(ClimateMode::Off);

        state.set_active(false);
        state.set_active(true);
        assert_eq!(state.mode(), ClimateMode::Auto);
    }

    #[test]
    fn repeated_power_off_keeps_previous_mode() {
        let mut state = ClimateState::new("test");
        state.set_active(true);
        state.set_mode(ClimateMode::Heat);
        state.set_active(false);
        state.take_command();

        state.set_active(false);
        assert!(!state.is_dirty());
        assert_eq!(state.previous_mode(), ClimateMode::Heat);

        state.set_active(true);
        assert_eq!(state.mode(), ClimateMode::Heat);
    }

    #[test]
    fn mode_written_while_off_applies_on_power_on() {
        let mut state = ClimateState::new("test");
        state.set_mode(ClimateMode::Dry);

        assert_eq!(state.mode(), ClimateMode::Off);
        assert!(!state.is_dirty());

        state.set_active(true);
        assert_eq!(state.mode(), ClimateMode::Dry);
    }

    #[test]
    fn off_written_while_off_keeps_previous_mode() {
        let mut state = ClimateState::new("test");
        state.set_active(true);
        state.set_mode(ClimateMode::Cool);
        state.set_active(false);

        state.set_mode(ClimateMode::Off);
        assert_eq!(state.previous_mode(), ClimateMode::Cool);
        assert!(state.take_command().is_some_and(|c| c.mode == ClimateMode::Off));

        state.set_active(true);
        assert_eq!(state.mode(), ClimateMode::Cool);
    }

    #[test]
    fn lone_high_setpoint_selects_heat() {
        let (mut state, _clock) = state_with_clock();
        state.set_active(true);

        state.set_target_temperature_high(25.0);
        assert_eq!(state.mode(), ClimateMode::Heat);
    }

    #[test]
    fn lone_low_setpoint_selects_cool() {
        let (mut state, _clock) = state_with_clock();
        state.set_active(true);

        state.set_target_temperature_low(17.0);
        assert_eq!(state.mode(), ClimateMode::Cool);
    }

    #[test]
    fn setpoint_pair_within_window_selects_auto() {
        let (mut state, clock) = state_with_clock();
        state.set_active(true);

        state.set_target_temperature_low(18.0);
        clock.advance(Duration::from_millis(10));
        state.set_target_temperature_high(24.0);

        assert_eq!(state.mode(), ClimateMode::Auto);
        let command = state.take_command().unwrap();
        assert!((command.target_temperature_low - 18.0).abs() < f32::EPSILON);
        assert!((command.target_temperature_high - 24.0).abs() < f32::EPSILON);
    }

    #[test]
    fn setpoint_pair_in_reverse_order_selects_auto() {
        let (mut state, clock) = state_with_clock();
        state.set_active(true);

        state.set_target_temperature_high(26.0);
        clock.advance(Duration::from_millis(49));
        state.set_target_temperature_low(19.0);

        assert_eq!(state.mode(), ClimateMode::Auto);
    }

    #[test]
    fn setpoint_pair_outside_window_keeps_candidate() {
        let (mut state, clock) = state_with_clock();
        state.set_active(true);

        state.set_target_temperature_low(18.0);
        clock.advance(Duration::from_millis(50));
        state.set_target_temperature_high(24.0);

        assert_eq!(state.mode(), ClimateMode::Heat);
    }

    #[test]
    fn repeated_high_setpoint_within_window_keeps_heat() {
        let (mut state, clock) = state_with_clock();
        state.set_active(true);

        state.set_target_temperature_high(24.0);
        clock.advance(Duration::from_millis(20));
        state.set_target_temperature_high(25.0);

        assert_eq!(state.mode(), ClimateMode::Heat);
    }

    #[test]
    fn repeated_low_setpoint_within_window_keeps_cool() {
        let (mut state, clock) = state_with_clock();
        state.set_active(true);

        state.set_target_temperature_low(18.0);
        clock.advance(Duration::from_millis(10));
        state.set_target_temperature_low(17.5);
        clock.advance(Duration::from_millis(10));
        state.set_target_temperature_low(17.0);

        assert_eq!(state.mode(), ClimateMode::Cool);
    }

    #[test]
    fn opposite_setpoint_after_repeats_selects_auto() {
        let (mut state, clock) = state_with_clock();
        state.set_active(true);

        state.set_target_temperature_high(24.0);
        clock.advance(Duration::from_millis(20));
        state.set_target_temperature_high(25.0);
        clock.advance(Duration::from_millis(20));
        state.set_target_temperature_low(18.0);

        assert_eq!(state.mode(), ClimateMode::Auto);
    }

    #[test]
    fn target_write_opens_inference_window() {
        let (mut state, clock) = state_with_clock();
        state.set_active(true);

        state.set_target_temperature(21.0);
        clock.advance(Duration::from_millis(5));
        state.set_target_temperature_low(19.0);

        assert_eq!(state.mode(), ClimateMode::Auto);
    }

    #[test]
    fn inference_window_is_configurable() {
        let clock = ManualClock::new();
        let config = ClimateConfig::default().with_auto_inference_window(Duration::from_millis(200));
        let mut state = ClimateState::with_config("test", &config).with_clock(Arc::new(clock.clone()));
        state.set_active(true);

        state.set_target_temperature_low(18.0);
        clock.advance(Duration::from_millis(150));
        state.set_target_temperature_high(24.0);

        assert_eq!(state.mode(), ClimateMode::Auto);
    }

    #[test]
    fn dual_setpoint_batch_selects_auto() {
        let (mut state, _clock) = state_with_clock();
        state.set_active(true);
        state.take_command();

        assert!(state.apply(&ClimateChange::dual_setpoint(17.0, 23.0)));
        assert_eq!(state.mode(), ClimateMode::Auto);
    }

    #[test]
    fn setpoints_collapse_without_dual_support() {
        let clock = ManualClock::new();
        let mut state = ClimateState::new("test").with_clock(Arc::new(clock.clone()));
        state.set_active(true);
        state.set_target_temperature(21.0);
        clock.advance(Duration::from_secs(1));
        state.apply(&ClimateChange::dual_setpoint(17.0, 23.0));

        assert_eq!(state.mode(), ClimateMode::Auto);
        let command = state.take_command().unwrap();
        assert!((command.target_temperature_low - 21.0).abs() < f32::EPSILON);
        assert!((command.target_temperature_high - 21.0).abs() < f32::EPSILON);
    }

    #[test]
    fn setpoints_collapse_outside_auto_mode() {
        let (mut state, clock) = state_with_clock();
        state.set_active(true);
        state.set_target_temperature_high(26.0);
        clock.advance(Duration::from_secs(1));
        state.set_mode(ClimateMode::Heat);
        state.set_target_temperature(22.0);

        let command = state.take_command().unwrap();
        assert_eq!(command.mode, ClimateMode::Heat);
        assert!((command.target_temperature_low - 22.0).abs() < f32::EPSILON);
        assert!((command.target_temperature_high - 22.0).abs() < f32::EPSILON);
    }

    #[test]
    fn setpoint_while_off_does_not_power_on() {
        let (mut state, _clock) = state_with_clock();
        state.set_target_temperature_high(28.0);

        assert!(!state.active());
        assert_eq!(state.mode(), ClimateMode::Off);
        assert_eq!(state.previous_mode(), ClimateMode::Heat);
        assert!(state.is_dirty());
    }

    #[test]
    fn activation_scenario_produces_default_command() {
        let mut state = ClimateState::new("test");
        state.set_active(true);

        let command = state.take_command().unwrap();
        assert_eq!(command.key, EntityKey::new("test"));
        assert_eq!(command.mode, ClimateMode::Auto);
        assert_eq!(command.fan_mode, FanMode::Off);
        assert_eq!(command.swing_mode, SwingMode::Off);
        assert!((command.target_temperature - 20.0).abs() < f32::EPSILON);
        assert!((command.target_temperature_low - 20.0).abs() < f32::EPSILON);
        assert!((command.target_temperature_high - 20.0).abs() < f32::EPSILON);
        assert!(!state.is_dirty());
    }

    #[test]
    fn flush_calls_sink_only_when_dirty() {
        let received = Arc::new(Mutex::new(Vec::new()));
        let received_clone = Arc::clone(&received);
        let sink = move |command: ClimateCommand| received_clone.lock().push(command);

        let mut state = ClimateState::new("test");
        assert!(!state.flush(&sink));

        state.set_swing_mode(SwingMode::Both);
        assert!(state.flush(&sink));
        assert!(!state.flush(&sink));

        let received = received.lock();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].swing_mode, SwingMode::Both);
    }

    #[test]
    fn command_does_not_clear_dirty() {
        let mut state = ClimateState::new("test");
        state.set_fan_mode(FanMode::Quiet);

        let command = state.command();
        assert_eq!(command.fan_mode, FanMode::Quiet);
        assert!(state.is_dirty());
    }
}
