//! Type registry for instantiating objects by type name.
//!
//! Configuration may name a type instead of a service. Types become
//! instantiable by name when they are registered here, either explicitly or
//! through `inventory` with [`register_type!`] (which `#[derive(Instantiable)]`
//! expands to). The registry key is the type's [`std::any::type_name`], so it
//! matches [`Object::type_name`] for the instances it creates.
//!
//! [`register_type!`]: crate::register_type

use ormevents_core::{Object, SharedObject};
use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, OnceLock},
};

/// A zero-argument constructor.
pub type Constructor = fn() -> SharedObject;

fn construct<T: Object + Default>() -> SharedObject {
    Arc::new(T::default())
}

/// A type submitted to the global registry.
///
/// This struct is submitted to `inventory` for automatic collection.
pub struct TypeRegistration {
    /// Returns the fully-qualified type name.
    pub type_name: fn() -> &'static str,
    /// Creates a fresh instance.
    pub construct: Constructor,
}

impl TypeRegistration {
    /// Registration for `T`, constructed through [`Default`].
    pub const fn of<T: Object + Default>() -> Self {
        Self {
            type_name: std::any::type_name::<T>,
            construct: construct::<T>,
        }
    }
}

inventory::collect!(TypeRegistration);

/// Registers a type in the global [`TypeRegistry`].
///
/// The type must implement [`Object`] and [`Default`].
///
/// # Example
/// ```rust,ignore
/// #[derive(Default)]
/// struct AuditSubscriber;
///
/// register_type!(AuditSubscriber);
/// ```
///
/// [`Object`]: ormevents_core::Object
#[macro_export]
macro_rules! register_type {
    ($ty:ty) => {
        $crate::inventory::submit! {
            $crate::types::TypeRegistration::of::<$ty>()
        }
    };
}

/// Maps type names to zero-argument constructors.
#[derive(Clone, Default)]
pub struct TypeRegistry {
    constructors: HashMap<String, Constructor>,
}

impl TypeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every type submitted with [`register_type!`].
    ///
    /// [`register_type!`]: crate::register_type
    pub fn global() -> Self {
        static GLOBAL: OnceLock<TypeRegistry> = OnceLock::new();
        GLOBAL
            .get_or_init(|| {
                let mut registry = TypeRegistry::new();
                for registration in inventory::iter::<TypeRegistration> {
                    registry.register_as((registration.type_name)(), registration.construct);
                }
                registry
            })
            .clone()
    }

    /// Register `T` under its type name.
    pub fn register<T: Object + Default>(&mut self) -> &mut Self {
        self.register_as(std::any::type_name::<T>(), construct::<T>)
    }

    /// Register a constructor under an explicit name.
    pub fn register_as(&mut self, name: impl Into<String>, constructor: Constructor) -> &mut Self {
        self.constructors.insert(name.into(), constructor);
        self
    }

    /// Returns `true` if `name` can be instantiated.
    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }

    /// Create a fresh instance of the type registered under `name`.
    pub fn instantiate(&self, name: &str) -> Option<SharedObject> {
        self.constructors.get(name).map(|construct| construct())
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    /// Returns `true` if no types are registered.
    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.constructors.keys().collect();
        names.sort();
        f.debug_struct("TypeRegistry").field("types", &names).finish()
    }
}
