//! Event bus for fire-and-forget control signals
//!
//! Listeners register explicitly and receive a [`ListenerId`] they must hand
//! back to unsubscribe. Publishing is synchronous: every listener registered
//! at the moment of the call sees the event before `publish` returns.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::trace;

/// Handle returned by [`EventBus::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Payload-free control notifications shared between gameplay components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlEvent {
    /// Flip the movement gate of every subscribed controller
    ToggleMovement,
    /// The player asked for the pause menu
    PauseRequested,
}

type Listener<E> = Arc<dyn Fn(&E) + Send + Sync>;

struct Registry<E> {
    next_id: u64,
    listeners: Vec<(ListenerId, Listener<E>)>,
}

/// Cloneable handle to a shared listener registry
pub struct EventBus<E> {
    registry: Arc<Mutex<Registry<E>>>,
}

impl<E> Clone for EventBus<E> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> EventBus<E> {
    /// Create an empty bus
    pub fn new() -> Self {
        Self {
            registry: Arc::new(Mutex::new(Registry {
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    /// Register a listener, returning the id needed to remove it again
    pub fn subscribe<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        let mut registry = self.registry.lock();
        let id = ListenerId(registry.next_id);
        registry.next_id += 1;
        let listener: Listener<E> = Arc::new(listener);
        registry.listeners.push((id, listener));
        id
    }

    /// Remove a listener. Returns false if the id was not registered.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut registry = self.registry.lock();
        let before = registry.listeners.len();
        registry.listeners.retain(|(listener_id, _)| *listener_id != id);
        registry.listeners.len() != before
    }

    /// Deliver an event to every registered listener
    pub fn publish(&self, event: &E) {
        // Snapshot so listeners may publish or (un)subscribe re-entrantly
        let listeners: Vec<Listener<E>> = self
            .registry
            .lock()
            .listeners
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        trace!(listeners = listeners.len(), "Publishing event");
        for listener in listeners {
            listener(event);
        }
    }

    /// Number of currently registered listeners
    pub fn listener_count(&self) -> usize {
        self.registry.lock().listeners.len()
    }
}
