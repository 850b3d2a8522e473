//! # ormevents-std
//!
//! Standard implementations for ormevents.
//!
//! This crate provides:
//! - **Event manager**: [`EventManager`], the concrete [`EventDispatcher`]
//! - **Service container**: [`Container`] and [`ContainerBuilder`]
//! - **Type registry**: [`TypeRegistry`] and the [`register_type!`] macro
//! - **Testing utilities**: recording listeners and subscribers
//!
//! [`EventDispatcher`]: ormevents_core::EventDispatcher

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use ormevents_core;

// Modules
pub mod container;
pub mod manager;
pub mod testing;
pub mod types;

pub use container::{Container, ContainerBuilder};
pub use inventory;
pub use manager::EventManager;
pub use types::{Constructor, TypeRegistration, TypeRegistry};
