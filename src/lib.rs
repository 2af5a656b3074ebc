// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Climate State - debounced, coalescing state for climate devices.
//!
//! This library keeps the desired state of a single HVAC/thermostat entity,
//! absorbs bursts of independent property writes, and turns them into at
//! most one consolidated command per flush.
//!
//! # Features
//!
//! - **Dirty tracking**: only value-changing writes lead to a dispatch
//! - **Coalesced dispatch**: flush requests within the delay share one flush
//! - **Power handling**: the running mode survives a power cycle
//! - **AUTO inference**: back-to-back low/high setpoint writes mean AUTO mode
//! - **Cancellable scheduling**: pending flushes and polling stop on shutdown
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use climate_state::{ClimateChange, ClimateCommand, ClimateDevice};
//! use climate_state::types::{ClimateMode, FanMode};
//!
//! #[tokio::main]
//! async fn main() {
//!     let (sink, mut commands) = climate_state::ChannelSink::channel();
//!     let device = ClimateDevice::new("living_room", Arc::new(sink));
//!
//!     device.apply(&ClimateChange::power_on());
//!     device.apply(&ClimateChange::FanMode(FanMode::Auto));
//!     device.request_flush();
//!
//!     let command: ClimateCommand = commands.recv().await.unwrap();
//!     assert_eq!(command.mode, ClimateMode::Auto);
//!     assert_eq!(command.fan_mode, FanMode::Auto);
//! }
//! ```
//!
//! # Without a runtime
//!
//! [`ClimateState`] is usable on its own when the caller drives dispatch:
//!
//! ```
//! use climate_state::ClimateState;
//!
//! let mut state = ClimateState::new("bedroom");
//! state.set_target_temperature(21.5);
//! if let Some(command) = state.take_command() {
//!     // hand the command to the transport
//!     assert!((command.target_temperature - 21.5).abs() < f32::EPSILON);
//! }
//! ```

pub mod clock;
pub mod command;
mod config;
mod device;
pub mod error;
pub mod state;
pub mod types;

pub use command::{ChannelSink, ClimateCommand, ClimateCommandSink};
pub use config::ClimateConfig;
pub use device::ClimateDevice;
pub use error::{Error, Result, ValueError};
pub use state::{ClimateChange, ClimateState};
pub use types::{ClimateMode, EntityKey, FanMode, SwingMode};
