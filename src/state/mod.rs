// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Climate state management types.
//!
//! [`ClimateState`] holds the desired and observed state of one climate
//! entity and tracks whether it changed since the last dispatch.
//! [`ClimateChange`] represents individual property writes that can be
//! applied to it.
//!
//! # Examples
//!
//! ```
//! use climate_state::state::{ClimateChange, ClimateState};
//! use climate_state::types::{ClimateMode, SwingMode};
//!
//! let mut state = ClimateState::new("bedroom");
//!
//! state.apply(&ClimateChange::power_on());
//! state.apply(&ClimateChange::SwingMode(SwingMode::Vertical));
//!
//! // Both writes are folded into one command
//! let command = state.take_command().unwrap();
//! assert_eq!(command.mode, ClimateMode::Auto);
//! assert_eq!(command.swing_mode, SwingMode::Vertical);
//! assert!(state.take_command().is_none());
//! ```

mod climate_state;
mod state_change;

pub use climate_state::ClimateState;
pub use state_change::ClimateChange;
