//! Testing utilities for ormevents.
//!
//! This module provides objects that make it easy to check what the factory
//! registered and what the event manager dispatched.
//!
//! # Features
//!
//! - [`RecordingListener`]: A listener that responds to a fixed set of
//!   methods and records every invocation
//! - [`StaticSubscriber`]: A subscriber with a fixed list of events
//! - [`CountingObject`]: A plain object without methods that counts how many
//!   instances were created

use ormevents_core::{
    BoxError, DispatchError, EventArgs, EventNames, EventSubscriber, Object,
};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

// ============================================================================
// Recording Listener
// ============================================================================

/// A listener that records all invocations it receives.
///
/// Clones share the same record, so a clone can be handed to a container
/// while the test keeps the original for inspection.
///
/// # Example
///
/// ```rust,ignore
/// let listener = RecordingListener::new(["postLoad"]);
/// manager.add_event_listener(&"postLoad".into(), Arc::new(listener.clone()));
///
/// manager.dispatch("postLoad")?;
/// assert_eq!(listener.calls(), ["postLoad"]);
/// ```
#[derive(Clone, Default)]
pub struct RecordingListener {
    methods: EventNames,
    calls: Arc<Mutex<Vec<String>>>,
    failing: Option<String>,
}

impl RecordingListener {
    /// Create a listener responding to `methods`.
    pub fn new(methods: impl Into<EventNames>) -> Self {
        Self {
            methods: methods.into(),
            calls: Arc::new(Mutex::new(Vec::new())),
            failing: None,
        }
    }

    /// Make `method` return an error when invoked.
    pub fn failing_on(mut self, method: impl Into<String>) -> Self {
        self.failing = Some(method.into());
        self
    }

    /// The methods invoked so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of invocations.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Clear all recorded invocations.
    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }
}

impl Object for RecordingListener {
    fn responds_to(&self, method: &str) -> bool {
        self.methods.contains(method)
    }

    fn invoke(&self, method: &str, _args: &dyn EventArgs) -> Result<(), BoxError> {
        if !self.responds_to(method) {
            return Err(DispatchError::UnknownMethod {
                type_name: self.type_name(),
                method: method.to_owned(),
            }
            .into());
        }
        self.calls.lock().unwrap().push(method.to_owned());
        if self.failing.as_deref() == Some(method) {
            return Err(format!("{method} failed").into());
        }
        Ok(())
    }
}

// ============================================================================
// Static Subscriber
// ============================================================================

/// A subscriber that subscribes to a fixed list of events and records
/// every invocation.
#[derive(Clone, Default)]
pub struct StaticSubscriber {
    inner: RecordingListener,
}

impl StaticSubscriber {
    /// Create a subscriber for `events`.
    pub fn new(events: impl Into<EventNames>) -> Self {
        Self {
            inner: RecordingListener::new(events),
        }
    }

    /// The events dispatched to this subscriber so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.inner.calls()
    }
}

impl Object for StaticSubscriber {
    fn responds_to(&self, method: &str) -> bool {
        self.inner.responds_to(method)
    }

    fn invoke(&self, method: &str, args: &dyn EventArgs) -> Result<(), BoxError> {
        self.inner.invoke(method, args)
    }

    fn as_subscriber(self: Arc<Self>) -> Option<Arc<dyn EventSubscriber>> {
        Some(self)
    }
}

impl EventSubscriber for StaticSubscriber {
    fn subscribed_events(&self) -> EventNames {
        self.inner.methods.clone()
    }
}

// ============================================================================
// Counting Object
// ============================================================================

static CREATED: AtomicUsize = AtomicUsize::new(0);

/// An object with no methods that counts its instances.
///
/// It is neither a subscriber nor a listener for any event, which makes it a
/// convenient "wrong kind of object" in tests.
pub struct CountingObject;

impl CountingObject {
    /// Total number of instances created by this process.
    pub fn created() -> usize {
        CREATED.load(Ordering::SeqCst)
    }
}

impl Default for CountingObject {
    fn default() -> Self {
        CREATED.fetch_add(1, Ordering::SeqCst);
        Self
    }
}

impl Object for CountingObject {}
