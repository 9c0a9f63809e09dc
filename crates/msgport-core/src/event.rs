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

//! The value handed to handlers and listeners for each delivery.

/// A message delivered to a port.
///
/// The payload is carried untouched in [`data`](MessageEvent::data); the port
/// never inspects, copies, or transforms it. One event value is built per
/// delivery and shared by reference with every observer of that delivery.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MessageEvent<T> {
    /// The payload, exactly as it was sent.
    pub data: T,
}

impl<T> MessageEvent<T> {
    /// Wraps a payload in a new event.
    pub fn new(data: T) -> Self {
        Self { data }
    }

    /// Consumes the event and returns its payload.
    pub fn into_data(self) -> T {
        self.data
    }
}

impl<T> From<T> for MessageEvent<T> {
    fn from(data: T) -> Self {
        Self::new(data)
    }
}
