//! An in-memory service container.
//!
//! Services are either ready-made instances or factories. A factory runs on
//! the first `get` and its result is shared by every later `get`.

use ormevents_core::{BoxError, ContainerError, Object, ServiceContainer, SharedObject};
use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, OnceLock},
};

type ServiceFactory = Arc<dyn Fn() -> Result<SharedObject, BoxError> + Send + Sync>;

enum ServiceSlot {
    Instance(SharedObject),
    Factory {
        factory: ServiceFactory,
        cell: OnceLock<SharedObject>,
    },
}

/// A service container backed by a map of names to services.
///
/// # Example
/// ```ignore
/// let container = ContainerBuilder::new()
///     .instance("audit", AuditSubscriber::default())
///     .factory("timestamps", TimestampListener::default)
///     .build();
/// ```
pub struct Container {
    services: HashMap<String, ServiceSlot>,
}

impl Container {
    /// Start building a container.
    pub fn builder() -> ContainerBuilder {
        ContainerBuilder::new()
    }

    /// Number of registered services.
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// Returns `true` if no services are registered.
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

impl ServiceContainer for Container {
    fn has(&self, name: &str) -> bool {
        self.services.contains_key(name)
    }

    fn get(&self, name: &str) -> Result<SharedObject, ContainerError> {
        match self.services.get(name) {
            Some(ServiceSlot::Instance(service)) => Ok(service.clone()),
            Some(ServiceSlot::Factory { factory, cell }) => {
                if let Some(service) = cell.get() {
                    return Ok(service.clone());
                }
                let created = factory().map_err(|source| ContainerError::Creation {
                    name: name.to_owned(),
                    source,
                })?;
                Ok(cell.get_or_init(|| created).clone())
            }
            None => Err(ContainerError::NotFound(name.to_owned())),
        }
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.services.keys().collect();
        names.sort();
        f.debug_struct("Container").field("services", &names).finish()
    }
}

/// Builder for constructing a [`Container`].
///
/// Registering a name twice replaces the earlier service.
#[derive(Default)]
pub struct ContainerBuilder {
    services: HashMap<String, ServiceSlot>,
}

impl ContainerBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an owned service instance.
    pub fn instance<O: Object>(self, name: impl Into<String>, service: O) -> Self {
        self.shared(name, Arc::new(service))
    }

    /// Register an already shared service instance.
    pub fn shared(mut self, name: impl Into<String>, service: SharedObject) -> Self {
        self.services
            .insert(name.into(), ServiceSlot::Instance(service));
        self
    }

    /// Register an infallible factory.
    pub fn factory<F, O>(self, name: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> O + Send + Sync + 'static,
        O: Object,
    {
        self.try_factory(name, move || Ok(Arc::new(factory()) as SharedObject))
    }

    /// Register a factory that may fail.
    pub fn try_factory<F>(mut self, name: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Result<SharedObject, BoxError> + Send + Sync + 'static,
    {
        self.services.insert(
            name.into(),
            ServiceSlot::Factory {
                factory: Arc::new(factory),
                cell: OnceLock::new(),
            },
        );
        self
    }

    /// Build the container.
    pub fn build(self) -> Container {
        Container {
            services: self.services,
        }
    }
}
