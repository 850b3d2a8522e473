//! The standard event manager.
//!
//! Listeners are kept per event name in registration order. An object is
//! identified by its `Arc` allocation, so registering the same object twice
//! for an event is a no-op while two equal-but-distinct objects are both kept.

use ormevents_core::{
    DispatchError, EmptyEventArgs, EventArgs, EventDispatcher, EventNames, EventSubscriber,
    SharedObject,
};
use std::{collections::BTreeMap, fmt, sync::Arc};

/// Routes named events to the listeners registered for them.
#[derive(Default, Clone)]
pub struct EventManager {
    listeners: BTreeMap<String, Vec<SharedObject>>,
}

impl EventManager {
    /// Create an empty event manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispatch an event that carries no payload.
    pub fn dispatch(&self, event: &str) -> Result<(), DispatchError> {
        self.dispatch_event(event, &EmptyEventArgs)
    }

    /// The listeners registered for `event`, in registration order.
    pub fn listeners(&self, event: &str) -> &[SharedObject] {
        self.listeners.get(event).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All listeners grouped by event name.
    pub fn all_listeners(&self) -> &BTreeMap<String, Vec<SharedObject>> {
        &self.listeners
    }

    /// Returns `true` if at least one listener is registered for `event`.
    pub fn has_listeners(&self, event: &str) -> bool {
        !self.listeners(event).is_empty()
    }

    /// Total number of (event, listener) registrations.
    pub fn listener_count(&self) -> usize {
        self.listeners.values().map(Vec::len).sum()
    }

    /// Returns `true` if no event has a listener.
    ///
    /// Only (event, listener) pairs count: a subscriber whose subscribed
    /// events are empty is accepted by [`add_event_subscriber`] but leaves
    /// the manager empty.
    ///
    /// [`add_event_subscriber`]: EventDispatcher::add_event_subscriber
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Remove `listener` from every event in `events`.
    pub fn remove_event_listener(&mut self, events: &EventNames, listener: &SharedObject) {
        for event in events {
            if let Some(bucket) = self.listeners.get_mut(event.as_str()) {
                bucket.retain(|registered| !Arc::ptr_eq(registered, listener));
                if bucket.is_empty() {
                    self.listeners.remove(event.as_str());
                }
            }
        }
    }

    /// Remove `subscriber` from the events it subscribes to.
    pub fn remove_event_subscriber(&mut self, subscriber: &Arc<dyn EventSubscriber>) {
        let events = subscriber.subscribed_events();
        let listener: SharedObject = subscriber.clone();
        self.remove_event_listener(&events, &listener);
    }
}

impl EventDispatcher for EventManager {
    fn add_event_listener(&mut self, events: &EventNames, listener: SharedObject) {
        for event in events {
            let bucket = self.listeners.entry(event.clone()).or_default();
            if bucket.iter().any(|registered| Arc::ptr_eq(registered, &listener)) {
                continue;
            }
            bucket.push(listener.clone());
        }
    }

    fn dispatch_event(&self, event: &str, args: &dyn EventArgs) -> Result<(), DispatchError> {
        for listener in self.listeners(event) {
            #[cfg(feature = "tracing")]
            tracing::trace!(event, listener = listener.type_name(), "Dispatching event");

            listener
                .invoke(event, args)
                .map_err(|source| DispatchError::Listener {
                    event: event.to_owned(),
                    listener: listener.type_name(),
                    source,
                })?;
        }
        Ok(())
    }
}

impl fmt::Debug for EventManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.listeners.iter().map(|(event, listeners)| {
                let names: Vec<&str> = listeners.iter().map(|l| l.type_name()).collect();
                (event, names)
            }))
            .finish()
    }
}
