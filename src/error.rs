// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the climate state library.
//!
//! Property writes and flushes are infallible. Errors only arise at the
//! edges: converting raw device values into typed enums, and encoding an
//! outbound command.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// A raw value could not be converted into a typed value.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// A command could not be encoded.
    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Errors raised when converting raw device values into typed enums.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// Numeric code does not name a climate mode.
    #[error("invalid climate mode code: {0}")]
    InvalidClimateModeCode(u8),

    /// String does not name a climate mode.
    #[error("invalid climate mode: {0}")]
    InvalidClimateMode(String),

    /// Numeric code does not name a fan mode.
    #[error("invalid fan mode code: {0}")]
    InvalidFanModeCode(u8),

    /// String does not name a fan mode.
    #[error("invalid fan mode: {0}")]
    InvalidFanMode(String),

    /// Numeric code does not name a swing mode.
    #[error("invalid swing mode code: {0}")]
    InvalidSwingModeCode(u8),

    /// String does not name a swing mode.
    #[error("invalid swing mode: {0}")]
    InvalidSwingMode(String),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
