#![allow(dead_code)]

use ormevents::{EventArgs, EventNames, EventSubscriber, Instantiable};
use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

// ============================================================================
// Logging
// ============================================================================

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// ============================================================================
// Test Payloads
// ============================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct LoadArgs {
    pub id: u64,
}

// ============================================================================
// Test Subscribers and Listeners
// ============================================================================

#[derive(Default, Instantiable)]
pub struct AuditSubscriber {
    pub flushes: AtomicUsize,
}

#[ormevents::object(subscriber)]
impl AuditSubscriber {
    fn on_flush(&self, _args: &dyn EventArgs) {
        self.flushes.fetch_add(1, Ordering::SeqCst);
    }
}

impl EventSubscriber for AuditSubscriber {
    fn subscribed_events(&self) -> EventNames {
        EventNames::from("on_flush")
    }
}

#[derive(Default, Instantiable)]
pub struct Timestamps {
    pub loaded: Mutex<Vec<u64>>,
    pub saved: AtomicUsize,
}

#[ormevents::object]
impl Timestamps {
    fn load(&self, args: &LoadArgs) {
        self.loaded.lock().unwrap().push(args.id);
    }

    fn save(&self, _args: &dyn EventArgs) -> Result<(), String> {
        self.saved.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    #[object(skip)]
    fn on_flush(&self, _args: &dyn EventArgs) {}

    pub fn loaded_ids(&self) -> Vec<u64> {
        self.loaded.lock().unwrap().clone()
    }
}

/// Responds to `load` only.
#[derive(Default, Instantiable)]
pub struct LoadOnly;

#[ormevents::object]
impl LoadOnly {
    fn load(&self, _args: &dyn EventArgs) {}
}

/// An object without members or subscriber capability.
#[derive(Default, Instantiable)]
pub struct Inert;

#[ormevents::object]
impl Inert {}

/// Fails every `save`.
#[derive(Default)]
pub struct FailingSave;

#[ormevents::object]
impl FailingSave {
    fn save(&self, _args: &dyn EventArgs) -> Result<(), std::io::Error> {
        Err(std::io::Error::other("disk full"))
    }
}
