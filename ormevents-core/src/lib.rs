//! # ormevents-core
//!
//! Core traits for wiring ORM event subscribers and listeners.
//!
//! This crate has minimal dependencies and is meant to be imported by code that
//! provides services or listeners without needing the concrete event manager
//! from `ormevents-std`.
//!
//! # Building Blocks
//!
//! - [`Object`] - a dynamically typed service value. It answers capability
//!   queries: which methods it responds to, and whether it is an
//!   [`EventSubscriber`].
//! - [`EventArgs`] - the payload handed to listener methods on dispatch.
//! - [`EventDispatcher`] - the registration and dispatch contract implemented
//!   by event managers.
//! - [`ServiceContainer`] - the lookup interface of a dependency container.
//!
//! # Error Types
//!
//! - [`WiringError`] - Top-level error returned when building an event manager
//! - [`ConfigError`] - Configuration entries with the wrong shape
//! - [`DomainError`] - Entries that resolve to unusable values
//! - [`ContainerError`] - Service lookup failures
//! - [`DispatchError`] - Failures while dispatching an event

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod args;
mod container;
mod dispatcher;
mod error;
mod events;
mod kind;
mod object;
mod response;

// Re-exports
pub use args::{EmptyEventArgs, EventArgs};
pub use container::ServiceContainer;
pub use dispatcher::EventDispatcher;
pub use error::{
    BoxError, ConfigError, ContainerError, DispatchError, DomainError, WiringError,
};
pub use events::EventNames;
pub use kind::ValueKind;
pub use object::{AsAny, EventSubscriber, Object, SUBSCRIBER_CAPABILITY, SharedObject};
pub use response::IntoDispatchOutcome;
