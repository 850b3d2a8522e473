#![cfg(feature = "macros")]

use ormevents::{
    DispatchError, EmptyEventArgs, Object, SharedObject, TypeRegistry,
};
use std::sync::{Arc, atomic::Ordering};

mod common;
use common::{AuditSubscriber, FailingSave, Inert, LoadArgs, Timestamps};

// ============================================================================
// Test: #[object]
// ============================================================================

#[test]
fn test_member_table() {
    let timestamps = Timestamps::default();

    assert!(timestamps.responds_to("load"));
    assert!(timestamps.responds_to("save"));
    assert!(!timestamps.responds_to("loaded_ids"));
    assert!(!timestamps.responds_to("missing"));
}

#[test]
fn test_skipped_method_is_not_a_member() {
    assert!(!Timestamps::default().responds_to("on_flush"));
}

#[test]
fn test_empty_impl_has_no_members() {
    let inert = Inert;

    assert!(!inert.responds_to("load"));
    assert!(matches!(
        inert
            .invoke("load", &EmptyEventArgs)
            .unwrap_err()
            .downcast_ref::<DispatchError>(),
        Some(DispatchError::UnknownMethod { method, .. }) if method == "load"
    ));
}

#[test]
fn test_typed_payload_is_downcast() {
    let timestamps = Timestamps::default();

    timestamps.invoke("load", &LoadArgs { id: 3 }).unwrap();
    timestamps.invoke("load", &LoadArgs { id: 4 }).unwrap();

    assert_eq!(timestamps.loaded_ids(), [3, 4]);
}

#[test]
fn test_wrong_payload_type_is_an_error() {
    let timestamps = Timestamps::default();

    let err = timestamps.invoke("load", &EmptyEventArgs).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<DispatchError>(),
        Some(DispatchError::ArgsMismatch { method, expected })
            if method == "load" && *expected == std::any::type_name::<LoadArgs>()
    ));
    assert!(timestamps.loaded_ids().is_empty());
}

#[test]
fn test_erased_payload_is_passed_through() {
    let timestamps = Timestamps::default();

    timestamps.invoke("save", &LoadArgs { id: 1 }).unwrap();
    timestamps.invoke("save", &EmptyEventArgs).unwrap();

    assert_eq!(timestamps.saved.load(Ordering::SeqCst), 2);
}

#[test]
fn test_method_error_is_returned() {
    let err = FailingSave.invoke("save", &EmptyEventArgs).unwrap_err();
    assert_eq!(err.to_string(), "disk full");
}

#[test]
fn test_subscriber_flag_grants_capability() {
    let audit: SharedObject = Arc::new(AuditSubscriber::default());
    let timestamps: SharedObject = Arc::new(Timestamps::default());

    let subscriber = audit.as_subscriber().expect("subscriber capability");
    assert_eq!(subscriber.subscribed_events().as_slice(), ["on_flush"]);
    assert!(timestamps.as_subscriber().is_none());
}

#[test]
fn test_type_name_is_fully_qualified() {
    let timestamps = Timestamps::default();
    assert_eq!(timestamps.type_name(), std::any::type_name::<Timestamps>());
}

// ============================================================================
// Test: derive(Instantiable)
// ============================================================================

#[test]
fn test_derived_types_are_in_global_registry() {
    let registry = TypeRegistry::global();

    for name in [
        std::any::type_name::<AuditSubscriber>(),
        std::any::type_name::<Timestamps>(),
        std::any::type_name::<Inert>(),
    ] {
        assert!(registry.contains(name), "{name} not registered");
    }
    assert!(!registry.contains(std::any::type_name::<FailingSave>()));

    let instance = registry
        .instantiate(std::any::type_name::<Timestamps>())
        .unwrap();
    assert!(instance.is::<Timestamps>());
}
