//! # Event Manager Factory
//!
//! Builds an [`EventManager`] from an [`EventManagerConfig`], pulling
//! subscribers and listeners out of a [`ServiceContainer`].
//!
//! # Resolution
//!
//! Subscriber entries and the `listener` field of listener entries are
//! resolved the same way, first match wins:
//!
//! 1. **Instance**: used as-is; displayed by its concrete type name.
//! 2. **Not a name**: left unresolved; displayed by its kind (`"integer"`, ...).
//! 3. **Container service**: fetched from the container; displayed by the
//!    service name.
//! 4. **Registered type**: instantiated through the [`TypeRegistry`];
//!    displayed by its type name.
//! 5. **Anything else**: left unresolved; displayed by the name itself.
//!
//! The display name is what error messages report.
//!
//! # Validation
//!
//! - A subscriber must have the subscriber capability.
//! - A listener must be an object that responds to every event it is
//!   configured for. All events of an entry are checked before the entry is
//!   registered.
//!
//! Subscribers are registered before listeners, each in configuration order.
//! The manager is built locally and only returned on success, so a failed
//! build leaves nothing behind.

use crate::config::{
    ApplicationConfig, CONFIG_SERVICE, DEFAULT_CONFIG_KEY, Entry, EventManagerConfig,
    ListenerConfig, ListenerSlot,
};
use ormevents_core::{
    ConfigError, DomainError, EventDispatcher, SUBSCRIBER_CAPABILITY, ServiceContainer,
    SharedObject, WiringError,
};
use ormevents_std::{EventManager, TypeRegistry};

/// An entry after resolution.
struct Resolved {
    object: Option<SharedObject>,
    display_name: String,
}

/// Creates configured event managers.
///
/// # Example
/// ```ignore
/// let manager = EventManagerFactory::with_config_key("orm_reporting").create(&container)?;
/// ```
#[derive(Debug, Clone)]
pub struct EventManagerFactory {
    config_key: String,
    types: TypeRegistry,
}

impl Default for EventManagerFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl EventManagerFactory {
    /// A factory for [`DEFAULT_CONFIG_KEY`] using the global type registry.
    pub fn new() -> Self {
        Self::with_config_key(DEFAULT_CONFIG_KEY)
    }

    /// A factory reading the event manager section named `config_key`.
    pub fn with_config_key(config_key: impl Into<String>) -> Self {
        Self {
            config_key: config_key.into(),
            types: TypeRegistry::global(),
        }
    }

    /// Replace the registry used to instantiate types by name.
    pub fn with_types(mut self, types: TypeRegistry) -> Self {
        self.types = types;
        self
    }

    /// The config key this factory reads.
    pub fn config_key(&self) -> &str {
        &self.config_key
    }

    /// Build an event manager from the application config held by the
    /// container's [`CONFIG_SERVICE`].
    ///
    /// Without that service the default (empty) configuration is used.
    pub fn create<C>(&self, container: &C) -> Result<EventManager, WiringError>
    where
        C: ServiceContainer + ?Sized,
    {
        let config = self.retrieve_config(container)?;
        self.build(container, &config)
    }

    /// Build an event manager from `config`.
    pub fn build<C>(
        &self,
        container: &C,
        config: &EventManagerConfig,
    ) -> Result<EventManager, WiringError>
    where
        C: ServiceContainer + ?Sized,
    {
        self.build_into(container, config)
    }

    /// Build any [`EventDispatcher`] from `config`.
    pub fn build_into<D, C>(&self, container: &C, config: &EventManagerConfig) -> Result<D, WiringError>
    where
        D: EventDispatcher + Default,
        C: ServiceContainer + ?Sized,
    {
        let result = self.populate(container, config);

        #[cfg(feature = "tracing")]
        {
            match &result {
                Ok(_) => tracing::info!(
                    config_key = %self.config_key,
                    subscribers = config.subscribers.len(),
                    listeners = config.listeners.len(),
                    "Event manager built"
                ),
                Err(error) => tracing::warn!(
                    config_key = %self.config_key,
                    %error,
                    "Event manager rejected"
                ),
            }
        }

        result
    }

    fn populate<D, C>(&self, container: &C, config: &EventManagerConfig) -> Result<D, WiringError>
    where
        D: EventDispatcher + Default,
        C: ServiceContainer + ?Sized,
    {
        let mut dispatcher = D::default();

        for entry in &config.subscribers {
            let resolved = self.resolve(container, entry)?;
            let Some(subscriber) = resolved.object.and_then(|object| object.as_subscriber())
            else {
                return Err(DomainError::InvalidSubscriber {
                    name: resolved.display_name,
                    required: SUBSCRIBER_CAPABILITY,
                }
                .into());
            };

            #[cfg(feature = "tracing")]
            {
                let events = subscriber.subscribed_events();
                tracing::debug!(
                    subscriber = %resolved.display_name,
                    events = ?events.as_slice(),
                    "Registering event subscriber"
                );
            }

            dispatcher.add_event_subscriber(subscriber);
        }

        for slot in &config.listeners {
            let listener_config = match slot {
                ListenerSlot::Config(listener_config) => listener_config,
                ListenerSlot::Malformed(found) => {
                    return Err(ConfigError::ListenerNotMapping { found: *found }.into());
                }
            };

            let listener = self.resolve_listener(container, listener_config)?;

            #[cfg(feature = "tracing")]
            tracing::debug!(
                listener = listener.type_name(),
                events = ?listener_config.events.as_slice(),
                "Registering event listener"
            );

            dispatcher.add_event_listener(&listener_config.events, listener);
        }

        Ok(dispatcher)
    }

    fn resolve_listener<C>(
        &self,
        container: &C,
        listener_config: &ListenerConfig,
    ) -> Result<SharedObject, WiringError>
    where
        C: ServiceContainer + ?Sized,
    {
        let resolved = self.resolve(container, &listener_config.listener)?;
        let Some(listener) = resolved.object else {
            return Err(DomainError::InvalidListener {
                name: resolved.display_name,
            }
            .into());
        };

        if let Some(method) = listener_config
            .events
            .iter()
            .find(|event| !listener.responds_to(event))
        {
            return Err(DomainError::MissingListenerMethod {
                listener: resolved.display_name,
                method: method.clone(),
            }
            .into());
        }

        Ok(listener)
    }

    fn resolve<C>(&self, container: &C, entry: &Entry) -> Result<Resolved, WiringError>
    where
        C: ServiceContainer + ?Sized,
    {
        let resolved = match entry {
            Entry::Instance(object) => Resolved {
                object: Some(object.clone()),
                display_name: object.type_name().to_owned(),
            },
            Entry::Invalid(kind) => Resolved {
                object: None,
                display_name: kind.to_string(),
            },
            Entry::Name(name) if container.has(name) => Resolved {
                object: Some(container.get(name)?),
                display_name: name.clone(),
            },
            Entry::Name(name) => match self.types.instantiate(name) {
                Some(object) => Resolved {
                    display_name: object.type_name().to_owned(),
                    object: Some(object),
                },
                None => Resolved {
                    object: None,
                    display_name: name.clone(),
                },
            },
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            entry = ?entry,
            name = %resolved.display_name,
            resolved = resolved.object.is_some(),
            "Resolved configuration entry"
        );

        Ok(resolved)
    }

    fn retrieve_config<C>(&self, container: &C) -> Result<EventManagerConfig, WiringError>
    where
        C: ServiceContainer + ?Sized,
    {
        if !container.has(CONFIG_SERVICE) {
            return Ok(EventManagerConfig::default());
        }

        let service = container.get(CONFIG_SERVICE)?;
        let application = service.downcast_ref::<ApplicationConfig>().ok_or(
            ConfigError::UnexpectedConfigService {
                found: service.type_name(),
            },
        )?;
        Ok(application.event_manager(&self.config_key))
    }
}
