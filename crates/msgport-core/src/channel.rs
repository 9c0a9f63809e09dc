// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! A pair of entangled ports.

use crate::port::MessagePort;
use std::borrow::Cow;

/// Two ports wired to each other at construction.
///
/// Whatever is sent on [`port1`](Self::port1) is delivered to the observers of
/// [`port2`](Self::port2), and the other way round. The wiring is fixed for
/// the lifetime of the ports: calling [`MessagePort::set_peer`] on either one
/// fails with [`PortError::ChannelOwned`](crate::PortError::ChannelOwned).
///
/// Ports reference each other weakly. The channel (or whoever holds the handles
/// returned by [`into_ports`](Self::into_ports)) keeps them alive; once one side
/// is dropped, sending from the other is a silent no-op.
///
/// Both ports share one delivery lock: at most one thread delivers on the
/// channel at a time, which keeps observers replying across the channel from
/// several threads free of lock-order deadlocks.
#[derive(Debug)]
pub struct MessageChannel<T> {
    port1: MessagePort<T>,
    port2: MessagePort<T>,
}

impl<T> MessageChannel<T> {
    /// Creates a channel whose ports are labelled `port1` and `port2`.
    pub fn new() -> Self {
        Self::with_labels("port1", "port2")
    }

    /// Creates a channel with custom port labels.
    ///
    /// ## Arguments
    /// * `label1` - The label of the first port.
    /// * `label2` - The label of the second port.
    pub fn with_labels(
        label1: impl Into<Cow<'static, str>>,
        label2: impl Into<Cow<'static, str>>,
    ) -> Self {
        let (port1, port2) = MessagePort::entangled_pair(label1, label2);
        log::debug!(
            "Message channel created between '{}' and '{}'.",
            port1.label(),
            port2.label()
        );
        Self { port1, port2 }
    }

    /// Returns the first port.
    pub fn port1(&self) -> &MessagePort<T> {
        &self.port1
    }

    /// Returns the second port.
    pub fn port2(&self) -> &MessagePort<T> {
        &self.port2
    }

    /// Consumes the channel and returns both port handles, still wired.
    pub fn into_ports(self) -> (MessagePort<T>, MessagePort<T>) {
        (self.port1, self.port2)
    }
}

impl<T> Default for MessageChannel<T> {
    fn default() -> Self {
        Self::new()
    }
}
