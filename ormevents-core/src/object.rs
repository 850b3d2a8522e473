//! # Objects and Capabilities
//!
//! An [`Object`] is the value a service container hands out and an event
//! manager calls into. It does not expose reflection; instead it answers a
//! small set of explicit capability queries:
//!
//! - **Invocable members**: [`Object::responds_to`] reports whether a method
//!   with a given name exists, and [`Object::invoke`] calls it with an event
//!   payload.
//! - **Subscriber capability**: [`Object::as_subscriber`] returns the object
//!   as an [`EventSubscriber`] when it declares its own events.
//!
//! Implementations are usually generated with `#[ormevents::object]`, but
//! writing one by hand is straightforward.

use crate::{
    args::EventArgs,
    error::{BoxError, DispatchError},
    events::EventNames,
};
use std::{any::Any, sync::Arc};

/// Name of the subscriber capability, as reported in error messages.
pub const SUBSCRIBER_CAPABILITY: &str = "ormevents::EventSubscriber";

/// A shared, type-erased object.
pub type SharedObject = Arc<dyn Object>;

/// Upcast to [`Any`], implemented for every `'static` type.
pub trait AsAny {
    /// Returns `self` as `&dyn Any`.
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A dynamically typed value with explicit capabilities.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not an `Object`",
    label = "missing `Object` implementation",
    note = "Annotate an inherent impl block of `{Self}` with `#[ormevents::object]`."
)]
pub trait Object: AsAny + Send + Sync + 'static {
    /// The concrete type name, used in error messages and as the lookup key
    /// of the type registry.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Returns `true` if the object has an invocable member named `method`.
    fn responds_to(&self, method: &str) -> bool {
        let _ = method;
        false
    }

    /// Invokes the member named `method` with the event payload.
    fn invoke(&self, method: &str, args: &dyn EventArgs) -> Result<(), BoxError> {
        let _ = args;
        Err(DispatchError::UnknownMethod {
            type_name: self.type_name(),
            method: method.to_owned(),
        }
        .into())
    }

    /// Returns the object as a subscriber if it has the subscriber capability.
    fn as_subscriber(self: Arc<Self>) -> Option<Arc<dyn EventSubscriber>> {
        None
    }
}

impl dyn Object {
    /// Returns the object as `T` if it has that concrete type.
    pub fn downcast_ref<T: Object>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Returns `true` if the object has the concrete type `T`.
    pub fn is<T: Object>(&self) -> bool {
        self.as_any().is::<T>()
    }
}

impl std::fmt::Debug for dyn Object {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Object<{}>", self.type_name())
    }
}

/// An object that declares which events it handles.
///
/// When registered with an event manager, the subscriber is added as a
/// listener for each of its [`subscribed_events`](Self::subscribed_events);
/// each of those events is then dispatched through [`Object::invoke`].
pub trait EventSubscriber: Object {
    /// The events this subscriber wants to receive.
    fn subscribed_events(&self) -> EventNames;
}
