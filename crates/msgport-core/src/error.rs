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

//! Errors raised while wiring ports together.

use std::borrow::Cow;
use thiserror::Error;

/// An error returned by [`MessagePort::set_peer`](crate::MessagePort::set_peer).
///
/// Delivery itself never fails: sending from an unwired port or removing an
/// unknown listener are silent no-ops.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PortError {
    /// A port was asked to become its own peer.
    #[error("port '{label}' cannot be its own peer")]
    SelfPeer {
        /// The label of the port.
        label: Cow<'static, str>,
    },
    /// The port belongs to a channel and its wiring is fixed.
    #[error("port '{label}' is owned by a channel and cannot be re-wired")]
    ChannelOwned {
        /// The label of the port.
        label: Cow<'static, str>,
    },
}
