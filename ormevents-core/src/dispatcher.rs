//! Dispatcher core trait.

use crate::{
    args::EventArgs,
    error::DispatchError,
    events::EventNames,
    object::{EventSubscriber, SharedObject},
};
use std::sync::Arc;

/// The registration and dispatch contract of an event manager.
///
/// The factory in `ormevents` only ever calls the two registration methods;
/// `dispatch_event` is what the ORM calls afterwards.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not an `EventDispatcher`",
    label = "missing `EventDispatcher` implementation",
    note = "Implement `EventDispatcher` to receive subscribers and listeners."
)]
pub trait EventDispatcher {
    /// Register `listener` for every event in `events`.
    fn add_event_listener(&mut self, events: &EventNames, listener: SharedObject);

    /// Register `subscriber` for the events it subscribes to.
    fn add_event_subscriber(&mut self, subscriber: Arc<dyn EventSubscriber>) {
        let events = subscriber.subscribed_events();
        self.add_event_listener(&events, subscriber);
    }

    /// Invoke the method named `event` on every listener registered for it.
    fn dispatch_event(&self, event: &str, args: &dyn EventArgs) -> Result<(), DispatchError>;
}
