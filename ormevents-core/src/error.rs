//! Error types for ormevents.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`WiringError`] - Top-level error returned while building an event manager
//! - [`ConfigError`] - A configuration entry has the wrong shape
//! - [`DomainError`] - A resolved entry does not satisfy its contract
//! - [`ContainerError`] - A service could not be fetched
//! - [`DispatchError`] - A listener failed during dispatch

use crate::kind::ValueKind;
use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for building an event manager.
#[derive(Error, Debug)]
pub enum WiringError {
    /// A configuration entry has the wrong structural shape.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A configuration entry resolved to a value that cannot be registered.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The service container failed to produce a service it reported as known.
    #[error(transparent)]
    Container(#[from] ContainerError),
}

/// Errors caused by the structure of the configuration itself.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A listener entry is not a `{listener, events}` mapping.
    #[error("invalid event listener config: must be a mapping, \"{found}\" given")]
    ListenerNotMapping {
        /// The kind of value found instead.
        found: ValueKind,
    },

    /// The `config` service exists but is not an application config.
    #[error("invalid \"config\" service: must be an application config, \"{found}\" given")]
    UnexpectedConfigService {
        /// Concrete type name of the service.
        found: &'static str,
    },
}

/// Errors raised when a resolved entry fails its capability check.
#[derive(Error, Debug)]
pub enum DomainError {
    /// A subscriber entry did not resolve to an [`EventSubscriber`](crate::EventSubscriber).
    #[error(
        "invalid event subscriber \"{name}\" given, must be a dependency name, type name or an instance implementing {required}"
    )]
    InvalidSubscriber {
        /// Display name of the entry.
        name: String,
        /// The capability the entry lacks.
        required: &'static str,
    },

    /// A listener entry did not resolve to an object.
    #[error(
        "invalid event listener \"{name}\" given, must be a dependency name, type name or an object"
    )]
    InvalidListener {
        /// Display name of the entry.
        name: String,
    },

    /// A listener does not respond to one of its configured events.
    #[error("invalid event listener \"{listener}\" given: must have a \"{method}\" method")]
    MissingListenerMethod {
        /// Display name of the listener.
        listener: String,
        /// The missing method (the event name).
        method: String,
    },
}

/// Errors returned by a [`ServiceContainer`](crate::ServiceContainer).
#[derive(Error, Debug)]
pub enum ContainerError {
    /// No service is registered under the name.
    #[error("service \"{0}\" not found")]
    NotFound(String),

    /// The service is registered but could not be constructed.
    #[error("service \"{name}\" could not be created")]
    Creation {
        /// Name of the service.
        name: String,
        /// The underlying failure.
        #[source]
        source: BoxError,
    },
}

/// Errors that can occur while dispatching an event.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// The object has no invocable member with this name.
    #[error("`{type_name}` has no \"{method}\" method")]
    UnknownMethod {
        /// Concrete type name of the object.
        type_name: &'static str,
        /// The requested method.
        method: String,
    },

    /// The event arguments are not of the type the method expects.
    #[error("method \"{method}\" expects arguments of type `{expected}`")]
    ArgsMismatch {
        /// The invoked method.
        method: String,
        /// The argument type the method expects.
        expected: &'static str,
    },

    /// A listener returned an error.
    #[error("listener `{listener}` failed while handling \"{event}\"")]
    Listener {
        /// The dispatched event.
        event: String,
        /// Concrete type name of the failing listener.
        listener: &'static str,
        /// The listener's error.
        #[source]
        source: BoxError,
    },
}
