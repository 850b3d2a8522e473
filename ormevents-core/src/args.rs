//! Event payloads.

use crate::object::AsAny;
use std::any::Any;

/// A marker trait for payloads passed to listener methods.
///
/// Any `Send + Sync + 'static` type is an `EventArgs`. Listener methods
/// receive `&dyn EventArgs` and recover the concrete payload with
/// [`downcast_ref`](#method.downcast_ref).
///
/// # Example
///
/// ```rust,ignore
/// struct LoadArgs { id: u64 }
///
/// manager.dispatch_event("postLoad", &LoadArgs { id: 7 })?;
/// ```
pub trait EventArgs: AsAny + Send + Sync {}

impl<T: Any + Send + Sync> EventArgs for T {}

impl<'a> dyn EventArgs + 'a {
    /// Returns the payload as `T` if it has that concrete type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Returns `true` if the payload has the concrete type `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.as_any().is::<T>()
    }
}

/// The payload used when an event carries no data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmptyEventArgs;
