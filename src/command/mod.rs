// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Outbound climate commands and the sinks that receive them.
//!
//! A flush produces one [`ClimateCommand`] and hands it to a
//! [`ClimateCommandSink`]. The sink owns delivery: latency, retries and
//! failures are its concern, and the caller never waits on it.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use climate_state::command::{ClimateCommand, ClimateCommandSink};
//!
//! let sink: Arc<dyn ClimateCommandSink> = Arc::new(|command: ClimateCommand| {
//!     println!("sending {command:?}");
//! });
//! ```

mod climate;
mod sink;

pub use climate::ClimateCommand;
pub use sink::{ChannelSink, ClimateCommandSink};
