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

//! # msgport-core
//!
//! An in-process message channel: two entangled [`MessagePort`]s that hand
//! opaque payloads to each other.
//!
//! Each port offers two observer mechanisms side by side: one replaceable
//! handler slot and an ordered list of listeners. A delivery runs the handler
//! first, then the listeners in registration order, synchronously, before
//! [`MessagePort::send`] returns.
//!
//! ```rust
//! use msgport_core::{MessageChannel, MessageEvent};
//! use std::sync::{Arc, Mutex};
//!
//! let channel = MessageChannel::new();
//! let received = Arc::new(Mutex::new(Vec::new()));
//!
//! let sink = Arc::clone(&received);
//! channel.port1().on_message(move |event: &MessageEvent<String>| {
//!     sink.lock().unwrap().push(event.data.clone());
//! });
//!
//! channel.port2().send("a".to_string());
//! channel.port2().send("b".to_string());
//! assert_eq!(*received.lock().unwrap(), vec!["a", "b"]);
//! ```

#![warn(missing_docs)]

pub mod channel;
pub mod error;
pub mod event;
pub mod listener;
pub mod port;

pub use self::channel::MessageChannel;
pub use self::error::PortError;
pub use self::event::MessageEvent;
pub use self::listener::Listener;
pub use self::port::MessagePort;
