// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for climate device control.
//!
//! Each enum carries the numeric code the device API uses, converts from
//! that code with [`TryFrom<u8>`], and parses from its upper-case name.
//!
//! # Types
//!
//! - [`ClimateMode`] - Operating mode (Off, Auto, Cool, Heat, FanOnly, Dry)
//! - [`FanMode`] - Fan behaviour (On, Off, Auto, speeds and airflow styles)
//! - [`SwingMode`] - Louvre swing (Off, Horizontal, Vertical, Both)
//! - [`EntityKey`] - Opaque identity of the climate entity

mod climate_mode;
mod entity_key;
mod fan_mode;
mod swing_mode;

pub use climate_mode::ClimateMode;
pub use entity_key::EntityKey;
pub use fan_mode::FanMode;
pub use swing_mode::SwingMode;
