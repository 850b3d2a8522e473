//! # ormevents - Config-Driven Event Manager Wiring
//!
//! `ormevents` builds an ORM event manager from configuration. Subscribers
//! and listeners are named in configuration as container services or type
//! names, or handed over as live objects; the factory resolves each entry,
//! checks its capabilities and registers it.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ormevents::{ContainerBuilder, EventManagerConfig, EventManagerFactory};
//!
//! #[derive(Default)]
//! struct Timestamps;
//!
//! #[ormevents::object]
//! impl Timestamps {
//!     fn pre_persist(&self, args: &dyn ormevents::EventArgs) { ... }
//! }
//!
//! let container = ContainerBuilder::new()
//!     .instance("timestamps", Timestamps)
//!     .build();
//!
//! let config = EventManagerConfig::default().with_listener("timestamps", "pre_persist");
//! let manager = EventManagerFactory::new().build(&container, &config)?;
//! manager.dispatch("pre_persist")?;
//! ```

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub mod config;
pub mod factory;

pub use config::{
    ApplicationConfig, CONFIG_SERVICE, DEFAULT_CONFIG_KEY, Entry, EventManagerConfig,
    ListenerConfig, ListenerSlot, OrmConfig,
};
pub use factory::EventManagerFactory;

pub use ormevents_core::{
    // Errors
    BoxError,
    ConfigError,
    ContainerError,
    DispatchError,
    DomainError,
    WiringError,
    // Objects
    AsAny,
    EventSubscriber,
    Object,
    SUBSCRIBER_CAPABILITY,
    SharedObject,
    // Events
    EmptyEventArgs,
    EventArgs,
    EventNames,
    IntoDispatchOutcome,
    ValueKind,
    // Collaborators
    EventDispatcher,
    ServiceContainer,
};

pub use ormevents_std::{
    Constructor, Container, ContainerBuilder, EventManager, TypeRegistration, TypeRegistry,
    register_type,
};

#[doc(hidden)]
pub use ormevents_std::inventory;

#[cfg(feature = "macros")]
pub use ormevents_macros::{Instantiable, object};

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use ormevents_std::testing::*;
}

/// Prelude module - common imports for ormevents.
///
/// # Usage
///
/// ```rust,ignore
/// use ormevents::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Entry, EventArgs, EventDispatcher, EventManager, EventManagerConfig,
        EventManagerFactory, EventNames, EventSubscriber, Object, ServiceContainer,
        SharedObject, WiringError,
    };
}
