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

//! One endpoint of a message channel.
//!
//! A [`MessagePort`] carries two independent observer mechanisms that coexist
//! on the same port:
//!
//! - a single, replaceable *handler* slot ([`set_handler`](MessagePort::set_handler)),
//! - an ordered list of *listeners* ([`add_listener`](MessagePort::add_listener) /
//!   [`remove_listener`](MessagePort::remove_listener)).
//!
//! Every inbound delivery invokes the handler first, then each listener in
//! registration order, synchronously and on the caller's thread.
//!
//! # Concurrency
//!
//! Port state sits behind a per-port mutex that is never held while observers
//! run. Deliveries are serialised by a second, reentrant lock: deliveries coming
//! from different threads never interleave, while an observer may touch its own
//! port or send on the same thread without deadlocking. Registration changes
//! made during a delivery take effect from the next delivery on.
//!
//! The two ports of a [`MessageChannel`](crate::MessageChannel) share a single
//! delivery lock, so replies sent from observers on both sides, from several
//! threads at once, cannot deadlock. Standalone ports each own their delivery
//! lock. When two hand-wired ports reply to each other from observers while
//! other threads send in the opposite direction, each thread can end up holding
//! one port's lock while waiting for the other's. Wire such ports through a
//! channel instead.
//!
//! # Faults
//!
//! A panicking observer unwinds out of [`dispatch`](MessagePort::dispatch) and
//! [`send`](MessagePort::send); observers after it are skipped for that
//! delivery. The locks do not poison, so the port keeps working afterwards.

use crate::error::PortError;
use crate::event::MessageEvent;
use crate::listener::Listener;
use parking_lot::{Mutex, ReentrantMutex};
use std::borrow::Cow;
use std::fmt;
use std::sync::{Arc, Weak};

const DEFAULT_LABEL: &str = "port";

struct PortState<T> {
    handler: Option<Listener<T>>,
    listeners: Vec<Listener<T>>,
    peer: Option<Weak<PortInner<T>>>,
    /// Set once a channel has wired this port; the peer is then fixed.
    channel_owned: bool,
}

struct PortInner<T> {
    label: Cow<'static, str>,
    state: Mutex<PortState<T>>,
    /// Shared by both ports of a channel.
    delivery: Arc<ReentrantMutex<()>>,
}

/// A handle to one endpoint of a message channel.
///
/// Cloning the handle does not create a new port: all clones observe and mutate
/// the same handler, listeners, and peer. Equality compares port identity.
///
/// A port created with [`MessagePort::new`] is standalone. Sending from it is a
/// silent no-op until a peer is assigned with [`set_peer`](Self::set_peer).
/// The peer is held weakly; a port never keeps its peer alive.
pub struct MessagePort<T> {
    inner: Arc<PortInner<T>>,
}

impl<T> MessagePort<T> {
    /// Creates a standalone port with no handler, no listeners, and no peer.
    pub fn new() -> Self {
        Self::with_label(DEFAULT_LABEL)
    }

    /// Creates a standalone port carrying `label` in logs and errors.
    pub fn with_label(label: impl Into<Cow<'static, str>>) -> Self {
        Self::with_delivery_lock(label, Arc::new(ReentrantMutex::new(())))
    }

    /// Creates two ports pinned as mutual peers and sharing one delivery lock.
    pub(crate) fn entangled_pair(
        label1: impl Into<Cow<'static, str>>,
        label2: impl Into<Cow<'static, str>>,
    ) -> (Self, Self) {
        let delivery = Arc::new(ReentrantMutex::new(()));
        let port1 = Self::with_delivery_lock(label1, Arc::clone(&delivery));
        let port2 = Self::with_delivery_lock(label2, delivery);
        port1.pin_peer(&port2);
        port2.pin_peer(&port1);
        (port1, port2)
    }

    fn with_delivery_lock(
        label: impl Into<Cow<'static, str>>,
        delivery: Arc<ReentrantMutex<()>>,
    ) -> Self {
        Self {
            inner: Arc::new(PortInner {
                label: label.into(),
                state: Mutex::new(PortState {
                    handler: None,
                    listeners: Vec::new(),
                    peer: None,
                    channel_owned: false,
                }),
                delivery,
            }),
        }
    }

    /// Returns the label given at construction.
    pub fn label(&self) -> &str {
        &self.inner.label
    }

    /// Replaces the handler slot. `None` clears it.
    ///
    /// Deliveries already in progress keep the handler they started with.
    pub fn set_handler(&self, handler: Option<Listener<T>>) {
        self.inner.state.lock().handler = handler;
    }

    /// Installs `f` as the handler and returns the handle that now occupies the slot.
    pub fn on_message<F>(&self, f: F) -> Listener<T>
    where
        F: Fn(&MessageEvent<T>) + Send + Sync + 'static,
    {
        let handler = Listener::new(f);
        self.set_handler(Some(handler.clone()));
        handler
    }

    /// Returns the current handler, if any.
    pub fn handler(&self) -> Option<Listener<T>> {
        self.inner.state.lock().handler.clone()
    }

    /// Appends `listener` to the listener list.
    ///
    /// No de-duplication is performed: a listener added twice runs twice per delivery.
    pub fn add_listener(&self, listener: Listener<T>) {
        self.inner.state.lock().listeners.push(listener);
    }

    /// Wraps `f` in a [`Listener`], appends it, and returns the handle needed to remove it.
    pub fn add_message_listener<F>(&self, f: F) -> Listener<T>
    where
        F: Fn(&MessageEvent<T>) + Send + Sync + 'static,
    {
        let listener = Listener::new(f);
        self.add_listener(listener.clone());
        listener
    }

    /// Removes the first registration of `listener`, matched by identity.
    ///
    /// ## Returns
    /// `true` if a registration was removed, `false` if `listener` was not registered.
    pub fn remove_listener(&self, listener: &Listener<T>) -> bool {
        let mut state = self.inner.state.lock();
        match state.listeners.iter().position(|l| l.ptr_eq(listener)) {
            Some(index) => {
                state.listeners.remove(index);
                true
            }
            None => false,
        }
    }

    /// Returns the number of listener registrations (the handler is not counted).
    pub fn listener_count(&self) -> usize {
        self.inner.state.lock().listeners.len()
    }

    /// Delivers `data` to this port's own observers.
    ///
    /// This is the inbound path used by the peer's [`send`](Self::send).
    pub fn dispatch(&self, data: T) {
        self.dispatch_event(&MessageEvent::new(data));
    }

    /// Delivers an already built event to the handler, then to each listener in order.
    pub fn dispatch_event(&self, event: &MessageEvent<T>) {
        let _delivery = self.inner.delivery.lock();
        let (handler, listeners) = {
            let state = self.inner.state.lock();
            (state.handler.clone(), state.listeners.clone())
        };

        log::trace!(
            "Port '{}' dispatching to {} listener(s), handler set: {}.",
            self.inner.label,
            listeners.len(),
            handler.is_some()
        );

        if let Some(handler) = handler {
            handler.call(event);
        }
        for listener in &listeners {
            listener.call(event);
        }
    }

    /// Sends `data` to the peer port.
    ///
    /// Without a peer (or once the peer has been dropped) nothing is delivered
    /// and no error is raised. The peer's observers have all run when this returns.
    ///
    /// This blocks while another thread is delivering to the peer. Calling it
    /// from an observer of a hand-wired port can therefore deadlock against a
    /// thread sending the other way; channel ports share their delivery lock
    /// and are not affected.
    pub fn send(&self, data: T) {
        match self.peer() {
            Some(peer) => {
                log::trace!(
                    "Port '{}' sending to '{}'.",
                    self.inner.label,
                    peer.inner.label
                );
                peer.dispatch(data);
            }
            None => {
                log::debug!("Port '{}' has no peer; message dropped.", self.inner.label);
            }
        }
    }

    /// Points this port at `peer`, or detaches it with `None`.
    ///
    /// Only this port is modified; wire the other direction separately.
    ///
    /// ## Errors
    /// * [`PortError::SelfPeer`] if `peer` is this very port.
    /// * [`PortError::ChannelOwned`] if this port was wired by a
    ///   [`MessageChannel`](crate::MessageChannel).
    pub fn set_peer(&self, peer: Option<&MessagePort<T>>) -> Result<(), PortError> {
        if peer.is_some_and(|p| p == self) {
            return Err(PortError::SelfPeer {
                label: self.inner.label.clone(),
            });
        }

        let mut state = self.inner.state.lock();
        if state.channel_owned {
            return Err(PortError::ChannelOwned {
                label: self.inner.label.clone(),
            });
        }
        state.peer = peer.map(|p| Arc::downgrade(&p.inner));

        match peer {
            Some(p) => log::debug!("Port '{}' now peers with '{}'.", self.inner.label, p.label()),
            None => log::debug!("Port '{}' detached from its peer.", self.inner.label),
        }
        Ok(())
    }

    /// Returns the peer port, if one is assigned and still alive.
    pub fn peer(&self) -> Option<MessagePort<T>> {
        let state = self.inner.state.lock();
        state
            .peer
            .as_ref()
            .and_then(Weak::upgrade)
            .map(|inner| MessagePort { inner })
    }

    /// Returns `true` if a live peer is assigned.
    pub fn has_peer(&self) -> bool {
        self.peer().is_some()
    }

    /// Wires `self` to `peer` for good.
    fn pin_peer(&self, peer: &MessagePort<T>) {
        let mut state = self.inner.state.lock();
        state.peer = Some(Arc::downgrade(&peer.inner));
        state.channel_owned = true;
    }
}

impl<T> Clone for MessagePort<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> PartialEq for MessagePort<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T> Eq for MessagePort<T> {}

impl<T> Default for MessagePort<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for MessagePort<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (has_handler, listeners, peer) = {
            let state = self.inner.state.lock();
            let peer = state
                .peer
                .as_ref()
                .and_then(Weak::upgrade)
                .map(|inner| inner.label.clone());
            (state.handler.is_some(), state.listeners.len(), peer)
        };
        f.debug_struct("MessagePort")
            .field("label", &self.inner.label)
            .field("has_handler", &has_handler)
            .field("listeners", &listeners)
            .field("peer", &peer)
            .finish()
    }
}
