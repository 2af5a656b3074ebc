// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Receivers of consolidated climate commands.

use tokio::sync::mpsc;

use super::ClimateCommand;

/// Capability to deliver a climate command downstream.
///
/// Called once per flush with the final state. Implementations must not
/// block: the call is fire-and-forget and nothing is returned to the caller.
///
/// Any `Fn(ClimateCommand)` closure is a sink.
pub trait ClimateCommandSink: Send + Sync {
    /// Delivers one consolidated command.
    fn climate_command(&self, command: ClimateCommand);
}

impl<F> ClimateCommandSink for F
where
    F: Fn(ClimateCommand) + Send + Sync,
{
    fn climate_command(&self, command: ClimateCommand) {
        self(command);
    }
}

/// Sink that forwards commands over an unbounded tokio channel.
///
/// Useful when the transport lives in its own task.
///
/// # Examples
///
/// ```
/// use climate_state::command::ChannelSink;
///
/// let (sink, mut commands) = ChannelSink::channel();
/// assert!(commands.try_recv().is_err());
/// # drop(sink);
/// ```
#[derive(Debug, Clone)]
pub struct ChannelSink {
    sender: mpsc::UnboundedSender<ClimateCommand>,
}

impl ChannelSink {
    /// Creates a sink and the receiver that yields its commands.
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ClimateCommand>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }

    /// Returns `true` once the receiving side has been dropped.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

impl ClimateCommandSink for ChannelSink {
    fn climate_command(&self, command: ClimateCommand) {
        if let Err(e) = self.sender.send(command) {
            tracing::warn!(key = %e.0.key, "Command receiver dropped, discarding command");
        }
    }
}
