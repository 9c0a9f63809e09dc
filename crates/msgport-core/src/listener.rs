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

//! Shared callback handles used as port handlers and listeners.

use crate::event::MessageEvent;
use std::fmt;
use std::sync::Arc;

type ListenerFn<T> = dyn Fn(&MessageEvent<T>) + Send + Sync;

/// A shared handle to a message callback.
///
/// Cloning a `Listener` is cheap and yields the *same* callback: identity is
/// tied to the allocation made by [`Listener::new`], not to the closure's
/// code. Keep a clone around to later remove it from a port.
///
/// # Example
///
/// ```rust
/// use msgport_core::{Listener, MessageEvent};
///
/// let a = Listener::new(|event: &MessageEvent<u32>| assert_eq!(event.data, 7));
/// let b = a.clone();
/// let c = Listener::new(|_: &MessageEvent<u32>| {});
///
/// assert!(a.ptr_eq(&b));
/// assert!(!a.ptr_eq(&c));
/// a.call(&MessageEvent::new(7));
/// ```
pub struct Listener<T> {
    inner: Arc<ListenerFn<T>>,
}

impl<T> Listener<T> {
    /// Creates a new listener from a function or closure.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&MessageEvent<T>) + Send + Sync + 'static,
    {
        Self { inner: Arc::new(f) }
    }

    /// Invokes the callback with `event`.
    pub fn call(&self, event: &MessageEvent<T>) {
        (self.inner)(event)
    }

    /// Returns `true` if both handles refer to the same callback.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        // Compare data pointers only; vtable addresses are not unique.
        std::ptr::addr_eq(Arc::as_ptr(&self.inner), Arc::as_ptr(&other.inner))
    }
}

impl<T> Clone for Listener<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for Listener<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("ptr", &Arc::as_ptr(&self.inner).cast::<()>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_clone_shares_identity() {
        let listener = Listener::new(|_: &MessageEvent<()>| {});
        let clone = listener.clone();
        assert!(listener.ptr_eq(&clone));
    }

    #[test]
    fn test_identical_closures_are_distinct() {
        let first = Listener::new(|_: &MessageEvent<()>| {});
        let second = Listener::new(|_: &MessageEvent<()>| {});
        assert!(!first.ptr_eq(&second));
    }

    #[test]
    fn test_call_invokes_closure() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let listener = Listener::new(move |event: &MessageEvent<usize>| {
            counter.fetch_add(event.data, Ordering::SeqCst);
        });

        listener.call(&MessageEvent::new(2));
        listener.clone().call(&MessageEvent::new(3));

        assert_eq!(hits.load(Ordering::SeqCst), 5);
    }
}
