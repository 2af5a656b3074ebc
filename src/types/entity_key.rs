// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Climate entity identifier.

use std::fmt;

/// Identity of a climate entity on its device.
///
/// The key is opaque to this crate. It is handed to the sink unchanged with
/// every command so the transport can address the right entity.
///
/// # Examples
///
/// ```
/// use climate_state::types::EntityKey;
///
/// let key = EntityKey::new("living_room_ac");
/// assert_eq!(key.as_str(), "living_room_ac");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct EntityKey(String);

impl EntityKey {
    /// Creates a key from any string-like identity.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityKey({})", self.0)
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for EntityKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for EntityKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl From<u32> for EntityKey {
    fn from(key: u32) -> Self {
        Self(key.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_conversions() {
        assert_eq!(EntityKey::from("abc"), EntityKey::new("abc"));
        assert_eq!(EntityKey::from(String::from("x")).as_str(), "x");
        assert_eq!(EntityKey::from(1_234_u32).as_str(), "1234");
    }

    #[test]
    fn key_formatting() {
        let key = EntityKey::new("hall");
        assert_eq!(key.to_string(), "hall");
        assert_eq!(format!("{key:?}"), "EntityKey(hall)");
    }

    #[test]
    fn key_serializes_transparently() {
        let key = EntityKey::new("hall");
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"hall\"");
    }
}
