use crate::{host::SubscriptionId, input::events::MapEvent};
use fxhash::FxHashMap as HashMap;
use std::collections::VecDeque;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, Mutex, MutexGuard, PoisonError,
};

/// Event listener callback type
pub type EventCallback = Arc<dyn Fn(&MapEvent) + Send + Sync>;

/// Event management system for the map
///
/// Events are queued by [`EventManager::emit`] and delivered by
/// [`EventManager::process_events`]. Handlers run without any internal lock
/// held, so they may subscribe or unsubscribe while being dispatched.
#[derive(Default)]
pub struct EventManager {
    /// Event listeners by event type, in registration order
    listeners: Mutex<HashMap<String, Vec<(SubscriptionId, EventCallback)>>>,
    /// Event queue for processing
    event_queue: Mutex<VecDeque<MapEvent>>,
    next_id: AtomicU64,
}

impl EventManager {
    pub fn new() -> Self {
        Self::default()
    }

    fn listeners(&self) -> MutexGuard<'_, HashMap<String, Vec<(SubscriptionId, EventCallback)>>> {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn queue(&self) -> MutexGuard<'_, VecDeque<MapEvent>> {
        self.event_queue.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register an event listener
    pub fn on(&self, event_type: &str, callback: EventCallback) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        self.listeners()
            .entry(event_type.to_string())
            .or_default()
            .push((id, callback));
        log::trace!("subscribed {} to {}", id, event_type);
        id
    }

    /// Unregister a listener; returns false if it was not registered
    pub fn off(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners();
        for callbacks in listeners.values_mut() {
            if let Some(pos) = callbacks.iter().position(|(sub, _)| *sub == id) {
                callbacks.remove(pos);
                log::trace!("unsubscribed {}", id);
                return true;
            }
        }
        false
    }

    /// Number of listeners for an event type
    pub fn listener_count(&self, event_type: &str) -> usize {
        self.listeners().get(event_type).map_or(0, Vec::len)
    }

    /// Emit an event to the queue
    pub fn emit(&self, event: MapEvent) {
        self.queue().push_back(event);
    }

    /// Deliver one event to its listeners immediately
    pub fn dispatch(&self, event: &MapEvent) {
        let callbacks: Vec<EventCallback> = self
            .listeners()
            .get(event.event_name())
            .map(|callbacks| callbacks.iter().map(|(_, cb)| Arc::clone(cb)).collect())
            .unwrap_or_default();

        for callback in callbacks {
            callback(event);
        }
    }

    /// Process all queued events
    pub fn process_events(&self) -> Vec<MapEvent> {
        let events: Vec<_> = self.queue().drain(..).collect();

        for event in &events {
            self.dispatch(event);
        }

        events
    }

    /// Get number of pending events
    pub fn pending_events(&self) -> usize {
        self.queue().len()
    }
}
