//! Service lookup.

use crate::{error::ContainerError, object::SharedObject};
use std::sync::Arc;

/// The lookup interface of a dependency container.
///
/// `has` must be a side-effect free query; `get` fetches the service and
/// fails with [`ContainerError::NotFound`] when the name is unknown.
pub trait ServiceContainer {
    /// Returns `true` if a service is registered under `name`.
    fn has(&self, name: &str) -> bool;

    /// Fetch the service registered under `name`.
    fn get(&self, name: &str) -> Result<SharedObject, ContainerError>;
}

impl<C: ServiceContainer + ?Sized> ServiceContainer for &C {
    fn has(&self, name: &str) -> bool {
        (**self).has(name)
    }

    fn get(&self, name: &str) -> Result<SharedObject, ContainerError> {
        (**self).get(name)
    }
}

impl<C: ServiceContainer + ?Sized> ServiceContainer for Box<C> {
    fn has(&self, name: &str) -> bool {
        (**self).has(name)
    }

    fn get(&self, name: &str) -> Result<SharedObject, ContainerError> {
        (**self).get(name)
    }
}

impl<C: ServiceContainer + ?Sized> ServiceContainer for Arc<C> {
    fn has(&self, name: &str) -> bool {
        (**self).has(name)
    }

    fn get(&self, name: &str) -> Result<SharedObject, ContainerError> {
        (**self).get(name)
    }
}
