//! Signal/slot notifications.
//!
//! A [`Signal`] holds any number of connected slots (closures). Emitting the
//! signal invokes every slot in connection order on the emitting thread.
//!
//! # Example
//!
//! ```
//! use stoolbar_core::Signal;
//!
//! let clicked = Signal::<u32>::new();
//! let id = clicked.connect(|count| println!("clicked {count} times"));
//! clicked.emit(1);
//! clicked.disconnect(id);
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use slotmap::{new_key_type, SlotMap};

use crate::logging::targets;

new_key_type! {
    /// Identifies one signal-slot connection.
    pub struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

/// A type-safe signal that can have multiple connected slots.
pub struct Signal<Args> {
    connections: Mutex<SlotMap<ConnectionId, Slot<Args>>>,
    blocked: AtomicBool,
}

impl<Args> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args> Signal<Args> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(SlotMap::with_key()),
            blocked: AtomicBool::new(false),
        }
    }

    /// Connect a slot to this signal.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.connect_shared(Arc::new(slot))
    }

    /// Connect an already shared slot.
    ///
    /// The same slot may be connected to several signals.
    pub fn connect_shared(&self, slot: Arc<dyn Fn(&Args) + Send + Sync>) -> ConnectionId {
        self.connections.lock().insert(slot)
    }

    /// Disconnect a slot by its connection id.
    ///
    /// Returns `true` if the connection existed.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.connections.lock().remove(id).is_some()
    }

    /// Disconnect every slot.
    pub fn disconnect_all(&self) {
        self.connections.lock().clear();
    }

    /// Number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }

    /// Block or unblock emission.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    /// Check if emission is currently blocked.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Emit the signal, invoking all connected slots.
    ///
    /// The connection table is not locked while slots run, so a slot may
    /// connect or disconnect on the same signal.
    #[tracing::instrument(skip_all, target = "stoolbar_core::signal", level = "trace")]
    pub fn emit(&self, args: Args) {
        if self.is_blocked() {
            tracing::trace!(target: targets::SIGNAL, "signal blocked, skipping emit");
            return;
        }

        let slots: Vec<Slot<Args>> = self.connections.lock().values().cloned().collect();
        tracing::trace!(target: targets::SIGNAL, connection_count = slots.len(), "emitting signal");
        for slot in slots {
            slot(&args);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_signal_emit_reaches_every_slot() {
        let signal = Signal::<usize>::new();
        let total = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let total = total.clone();
            signal.connect(move |n| {
                total.fetch_add(*n, Ordering::SeqCst);
            });
        }

        signal.emit(2);
        assert_eq!(total.load(Ordering::SeqCst), 6);
        assert_eq!(signal.connection_count(), 3);
    }

    #[test]
    fn test_signal_disconnect() {
        let signal = Signal::<()>::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_clone = hits.clone();
        let id = signal.connect(move |_| {
            hits_clone.fetch_add(1, Ordering::SeqCst);
        });

        assert!(signal.disconnect(id));
        assert!(!signal.disconnect(id));
        signal.emit(());
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_signal_blocked() {
        let signal = Signal::<()>::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_clone = hits.clone();
        signal.connect(move |_| {
            hits_clone.fetch_add(1, Ordering::SeqCst);
        });

        signal.set_blocked(true);
        signal.emit(());
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        signal.set_blocked(false);
        signal.emit(());
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
