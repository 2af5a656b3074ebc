// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Debounced dispatch for a climate entity.
//!
//! [`ClimateDevice`] wraps a [`ClimateState`] together with the sink that
//! receives its commands. Callers write properties at any rate and signal
//! flush opportunities with [`ClimateDevice::request_flush`]. The flush runs
//! once per quantum, after [`ClimateConfig::flush_delay`], with whatever state
//! is current at that moment.
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//! use climate_state::{ClimateChange, ClimateCommand, ClimateDevice};
//!
//! # async fn example() {
//! let device = ClimateDevice::new(
//!     "living_room",
//!     Arc::new(|command: ClimateCommand| println!("send {command:?}")),
//! );
//!
//! device.apply(&ClimateChange::power_on());
//! device.apply(&ClimateChange::TargetTemperature(22.0));
//!
//! // Both requests share one flush
//! device.request_flush();
//! device.request_flush();
//! # }
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::command::{ClimateCommand, ClimateCommandSink};
use crate::config::ClimateConfig;
use crate::state::{ClimateChange, ClimateState};
use crate::types::EntityKey;

/// A climate entity with coalesced, delayed command dispatch.
///
/// At most one flush is pending at any time. Requests made while one is
/// pending join it. Requests made once the flush has started schedule the
/// next one, so writes made during a sink call are never lost.
///
/// Dropping the device or calling [`shutdown`](Self::shutdown) cancels the
/// pending flush and the polling task; no command is dispatched afterwards.
pub struct ClimateDevice {
    inner: Arc<Inner>,
    polling: Mutex<Option<JoinHandle<()>>>,
}

struct Inner {
    state: Mutex<ClimateState>,
    sink: Arc<dyn ClimateCommandSink>,
    flush_delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
    shut_down: AtomicBool,
}

impl ClimateDevice {
    /// Creates a device with the default configuration.
    #[must_use]
    pub fn new(key: impl Into<EntityKey>, sink: Arc<dyn ClimateCommandSink>) -> Self {
        Self::with_config(key, sink, &ClimateConfig::default())
    }

    /// Creates a device from a configuration.
    #[must_use]
    pub fn with_config(
        key: impl Into<EntityKey>,
        sink: Arc<dyn ClimateCommandSink>,
        config: &ClimateConfig,
    ) -> Self {
        Self::from_state(ClimateState::with_config(key, config), sink, config.flush_delay)
    }

    /// Creates a device around an existing state.
    #[must_use]
    pub fn from_state(
        state: ClimateState,
        sink: Arc<dyn ClimateCommandSink>,
        flush_delay: Duration,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(state),
                sink,
                flush_delay,
                pending: Mutex::new(None),
                shut_down: AtomicBool::new(false),
            }),
            polling: Mutex::new(None),
        }
    }

    /// Returns the entity key.
    #[must_use]
    pub fn key(&self) -> EntityKey {
        self.inner.state.lock().key().clone()
    }

    /// Returns a copy of the current state.
    #[must_use]
    pub fn state(&self) -> ClimateState {
        self.inner.state.lock().clone()
    }

    /// Returns the command the current state would dispatch, leaving the
    /// dirty flag alone.
    #[must_use]
    pub fn snapshot(&self) -> ClimateCommand {
        self.inner.state.lock().command()
    }

    /// Returns `true` if changes are waiting to be dispatched.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.inner.state.lock().is_dirty()
    }

    /// Applies a property write.
    ///
    /// Returns `true` if the write marked the state dirty. Does not schedule
    /// a flush by itself.
    pub fn apply(&self, change: &ClimateChange) -> bool {
        self.inner.state.lock().apply(change)
    }

    /// Runs `f` with exclusive access to the state.
    pub fn update<R>(&self, f: impl FnOnce(&mut ClimateState) -> R) -> R {
        f(&mut *self.inner.state.lock())
    }

    /// Signals a flush opportunity.
    ///
    /// Schedules a flush after the configured delay unless one is already
    /// pending. Outside of a tokio runtime the request is dropped with a
    /// warning and the state stays dirty; use [`flush_now`](Self::flush_now)
    /// to dispatch synchronously.
    pub fn request_flush(&self) {
        self.inner.request_flush();
    }

    /// Returns `true` while a scheduled flush has not started yet.
    #[must_use]
    pub fn is_flush_pending(&self) -> bool {
        self.inner
            .pending
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Flushes immediately, bypassing the delay.
    ///
    /// Returns `true` if a command was dispatched. A pending scheduled flush
    /// stays armed and finds nothing to send unless more writes arrive.
    pub fn flush_now(&self) -> bool {
        self.inner.flush_if_dirty()
    }

    /// Requests a flush every `interval`, replacing any previous polling.
    ///
    /// The first request happens one interval from now.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a tokio runtime.
    pub fn start_polling(&self, interval: Duration) {
        let inner = Arc::clone(&self.inner);
        let task = tokio::spawn(async move {
            let start = tokio::time::Instant::now() + interval;
            let mut ticker = tokio::time::interval_at(start, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                inner.request_flush();
            }
        });

        if let Some(previous) = self.polling.lock().replace(task) {
            previous.abort();
        }
        tracing::debug!(
            key = %self.key(),
            interval_ms = interval.as_millis(),
            "Started climate polling"
        );
    }

    /// Stops periodic flush requests. A flush already scheduled still runs.
    pub fn stop_polling(&self) {
        if let Some(task) = self.polling.lock().take() {
            task.abort();
            tracing::debug!(key = %self.key(), "Stopped climate polling");
        }
    }

    /// Returns `true` while periodic flush requests are active.
    #[must_use]
    pub fn is_polling(&self) -> bool {
        self.polling
            .lock()
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }

    /// Cancels polling and any pending flush.
    ///
    /// After shutdown the device still accepts writes but never dispatches.
    pub fn shutdown(&self) {
        if self.inner.shut_down.swap(true, Ordering::SeqCst) {
            return;
        }
        if let Some(task) = self.polling.lock().take() {
            task.abort();
        }
        if let Some(task) = self.inner.pending.lock().take() {
            task.abort();
        }
        tracing::debug!(key = %self.key(), "Climate device shut down");
    }

    /// Returns `true` once [`shutdown`](Self::shutdown) has run.
    #[must_use]
    pub fn is_shut_down(&self) -> bool {
        self.inner.shut_down.load(Ordering::SeqCst)
    }
}

impl Inner {
    fn request_flush(self: &Arc<Self>) {
        if self.shut_down.load(Ordering::SeqCst) {
            tracing::trace!("Ignoring flush request after shutdown");
            return;
        }

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!("No tokio runtime, dropping flush request");
            return;
        };

        let mut pending = self.pending.lock();
        if pending.as_ref().is_some_and(|handle| !handle.is_finished()) {
            tracing::trace!("Flush already pending, coalescing request");
            return;
        }

        let inner = Arc::clone(self);
        let delay = self.flush_delay;
        *pending = Some(runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            // Free the slot first: requests from here on get their own flush.
            inner.pending.lock().take();
            inner.flush_if_dirty();
        }));
        tracing::trace!(delay_ms = delay.as_millis(), "Scheduled climate flush");
    }

    fn flush_if_dirty(&self) -> bool {
        if self.shut_down.load(Ordering::SeqCst) {
            return false;
        }

        // The lock is released before the sink runs.
        let command = self.state.lock().take_command();
        match command {
            Some(command) => {
                tracing::debug!(
                    key = %command.key,
                    mode = %command.mode,
                    fan_mode = %command.fan_mode,
                    swing_mode = %command.swing_mode,
                    target_temperature = command.target_temperature,
                    "Dispatching climate command"
                );
                self.sink.climate_command(command);
                true
            }
            None => {
                tracing::trace!("Climate state clean, nothing to flush");
                false
            }
        }
    }
}

impl Drop for ClimateDevice {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for ClimateDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClimateDevice")
            .field("state", &*self.inner.state.lock())
            .field("flush_delay", &self.inner.flush_delay)
            .field("flush_pending", &self.is_flush_pending())
            .field("shut_down", &self.is_shut_down())
            .finish_non_exhaustive()
    }
}
