//! Event manager configuration.
//!
//! The configuration is an in-memory value. It can be assembled in code with
//! the builder helpers or deserialized with serde from any self-describing
//! format. Deserialization never fails on the *kind* of an entry: values that
//! cannot name a subscriber or listener are kept as [`Entry::Invalid`] or
//! [`ListenerSlot::Malformed`] so the factory can report them precisely.
//!
//! The application-wide document has this layout:
//!
//! ```json
//! {
//!   "doctrine": {
//!     "event_manager": {
//!       "orm_default": {
//!         "subscribers": ["app::AuditSubscriber", "audit.subscriber"],
//!         "listeners": [{ "listener": "timestamps", "events": ["pre_persist"] }]
//!       }
//!     }
//!   }
//! }
//! ```

use ormevents_core::{EventNames, Object, SharedObject, ValueKind};
use serde::{
    Deserialize, Deserializer,
    de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor, value::MapAccessDeserializer},
};
use std::{collections::HashMap, fmt, sync::Arc};

/// The config key used when none is given.
pub const DEFAULT_CONFIG_KEY: &str = "orm_default";

/// Name of the container service holding the [`ApplicationConfig`].
pub const CONFIG_SERVICE: &str = "config";

// ============================================================================
// Entries
// ============================================================================

/// A subscriber entry, or the `listener` field of a listener entry.
#[derive(Clone)]
pub enum Entry {
    /// A live object, used as-is.
    Instance(SharedObject),
    /// A container service name or a registered type name.
    Name(String),
    /// Any other value; only its kind is kept.
    Invalid(ValueKind),
}

impl Entry {
    /// An entry holding `object`.
    pub fn instance<O: Object>(object: O) -> Self {
        Entry::Instance(Arc::new(object))
    }

    /// An entry naming a type by its fully-qualified name.
    pub fn type_of<O: Object>() -> Self {
        Entry::Name(std::any::type_name::<O>().to_owned())
    }

    fn missing() -> Self {
        Entry::Invalid(ValueKind::Null)
    }
}

impl From<&str> for Entry {
    fn from(name: &str) -> Self {
        Entry::Name(name.to_owned())
    }
}

impl From<String> for Entry {
    fn from(name: String) -> Self {
        Entry::Name(name)
    }
}

impl From<SharedObject> for Entry {
    fn from(object: SharedObject) -> Self {
        Entry::Instance(object)
    }
}

impl From<ValueKind> for Entry {
    fn from(kind: ValueKind) -> Self {
        Entry::Invalid(kind)
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Instance(object) => f.debug_tuple("Instance").field(&object.type_name()).finish(),
            Entry::Name(name) => f.debug_tuple("Name").field(name).finish(),
            Entry::Invalid(kind) => f.debug_tuple("Invalid").field(kind).finish(),
        }
    }
}

/// A listener entry: a listener plus the events it handles.
#[derive(Debug, Clone, Deserialize)]
pub struct ListenerConfig {
    /// The listener to resolve.
    #[serde(default = "Entry::missing")]
    pub listener: Entry,
    /// The events to register the listener for.
    #[serde(default)]
    pub events: EventNames,
}

impl ListenerConfig {
    /// Create a listener entry.
    pub fn new(listener: impl Into<Entry>, events: impl Into<EventNames>) -> Self {
        Self {
            listener: listener.into(),
            events: events.into(),
        }
    }
}

/// An item of the `listeners` list as found in configuration.
#[derive(Debug, Clone)]
pub enum ListenerSlot {
    /// A well-formed `{listener, events}` mapping.
    Config(ListenerConfig),
    /// Anything that is not a mapping.
    Malformed(ValueKind),
}

impl From<ListenerConfig> for ListenerSlot {
    fn from(config: ListenerConfig) -> Self {
        ListenerSlot::Config(config)
    }
}

// ============================================================================
// Deserialization
// ============================================================================

/// Implements the visitor methods that only record a value's kind.
macro_rules! visit_kinds {
    ($de:lifetime, $wrap:path) => {
        fn visit_bool<E: de::Error>(self, _: bool) -> Result<Self::Value, E> {
            Ok($wrap(ValueKind::Boolean))
        }

        fn visit_i64<E: de::Error>(self, _: i64) -> Result<Self::Value, E> {
            Ok($wrap(ValueKind::Integer))
        }

        fn visit_u64<E: de::Error>(self, _: u64) -> Result<Self::Value, E> {
            Ok($wrap(ValueKind::Integer))
        }

        fn visit_f64<E: de::Error>(self, _: f64) -> Result<Self::Value, E> {
            Ok($wrap(ValueKind::Float))
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok($wrap(ValueKind::Null))
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok($wrap(ValueKind::Null))
        }

        fn visit_seq<A: SeqAccess<$de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            while seq.next_element::<IgnoredAny>()?.is_some() {}
            Ok($wrap(ValueKind::Array))
        }
    };
}

struct EntryVisitor;

impl<'de> Visitor<'de> for EntryVisitor {
    type Value = Entry;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a service or type name")
    }

    visit_kinds!('de, Entry::Invalid);

    fn visit_str<E: de::Error>(self, name: &str) -> Result<Self::Value, E> {
        Ok(Entry::Name(name.to_owned()))
    }

    fn visit_string<E: de::Error>(self, name: String) -> Result<Self::Value, E> {
        Ok(Entry::Name(name))
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(Entry::Invalid(ValueKind::Mapping))
    }
}

impl<'de> Deserialize<'de> for Entry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(EntryVisitor)
    }
}

struct ListenerSlotVisitor;

impl<'de> Visitor<'de> for ListenerSlotVisitor {
    type Value = ListenerSlot;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a listener mapping")
    }

    visit_kinds!('de, ListenerSlot::Malformed);

    fn visit_str<E: de::Error>(self, _: &str) -> Result<Self::Value, E> {
        Ok(ListenerSlot::Malformed(ValueKind::String))
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
        ListenerConfig::deserialize(MapAccessDeserializer::new(map)).map(ListenerSlot::Config)
    }
}

impl<'de> Deserialize<'de> for ListenerSlot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ListenerSlotVisitor)
    }
}

// ============================================================================
// Event manager section
// ============================================================================

/// Configuration of one event manager.
///
/// The default value has no subscribers and no listeners.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EventManagerConfig {
    /// Subscriber entries, in registration order.
    pub subscribers: Vec<Entry>,
    /// Listener entries, in registration order.
    pub listeners: Vec<ListenerSlot>,
}

impl EventManagerConfig {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a subscriber entry.
    pub fn with_subscriber(mut self, subscriber: impl Into<Entry>) -> Self {
        self.subscribers.push(subscriber.into());
        self
    }

    /// Append a listener entry.
    pub fn with_listener(
        mut self,
        listener: impl Into<Entry>,
        events: impl Into<EventNames>,
    ) -> Self {
        self.listeners
            .push(ListenerSlot::Config(ListenerConfig::new(listener, events)));
        self
    }

    /// Append a raw listener slot, well-formed or not.
    pub fn with_listener_slot(mut self, slot: impl Into<ListenerSlot>) -> Self {
        self.listeners.push(slot.into());
        self
    }

    /// Returns `true` if there is nothing to register.
    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty() && self.listeners.is_empty()
    }
}

// ============================================================================
// Application config
// ============================================================================

/// The ORM section of the application config.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OrmConfig {
    /// Event manager sections by config key.
    pub event_manager: HashMap<String, EventManagerConfig>,
}

/// The application-wide configuration document.
///
/// Registered in a container under [`CONFIG_SERVICE`], it is where
/// [`EventManagerFactory::create`](crate::EventManagerFactory::create) looks up
/// its section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    /// The ORM section, found under the `doctrine` key.
    #[serde(rename = "doctrine")]
    pub orm: OrmConfig,
}

impl ApplicationConfig {
    /// Create an empty application config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the event manager section for `key`.
    pub fn with_event_manager(mut self, key: impl Into<String>, config: EventManagerConfig) -> Self {
        self.orm.event_manager.insert(key.into(), config);
        self
    }

    /// The event manager section for `key`, or the default (empty) section.
    pub fn event_manager(&self, key: &str) -> EventManagerConfig {
        self.orm
            .event_manager
            .get(key)
            .cloned()
            .unwrap_or_default()
    }
}

impl Object for ApplicationConfig {}

#[cfg(test)]
mod tests {
    use super::{ApplicationConfig, DEFAULT_CONFIG_KEY, Entry, EventManagerConfig, ListenerSlot};
    use crate::testing::CountingObject;
    use ormevents_core::{EventNames, ValueKind};

    #[test]
    fn test_default_is_empty() {
        let config = EventManagerConfig::default();
        assert!(config.subscribers.is_empty());
        assert!(config.listeners.is_empty());
        assert!(config.is_empty());
    }

    #[test]
    fn test_missing_keys_default_to_empty() {
        let config: EventManagerConfig = serde_json::from_str("{}").unwrap();
        assert!(config.is_empty());

        let config: EventManagerConfig =
            serde_json::from_str(r#"{"subscribers": ["audit"]}"#).unwrap();
        assert_eq!(config.subscribers.len(), 1);
        assert!(config.listeners.is_empty());
    }

    #[test]
    fn test_subscriber_entries_keep_their_kind() {
        let config: EventManagerConfig = serde_json::from_str(
            r#"{"subscribers": ["audit", 42, 1.5, true, null, [1, 2], {"a": 1}]}"#,
        )
        .unwrap();

        let kinds: Vec<String> = config
            .subscribers
            .iter()
            .map(|entry| match entry {
                Entry::Name(name) => name.clone(),
                Entry::Invalid(kind) => kind.to_string(),
                Entry::Instance(_) => unreachable!(),
            })
            .collect();
        assert_eq!(
            kinds,
            ["audit", "integer", "float", "boolean", "null", "array", "mapping"]
        );
    }

    #[test]
    fn test_listener_slots() {
        let config: EventManagerConfig = serde_json::from_str(
            r#"{"listeners": [
                {"listener": "timestamps", "events": "load"},
                {"listener": "timestamps", "events": ["load", "save"]},
                "timestamps",
                7,
                {"events": "load"}
            ]}"#,
        )
        .unwrap();

        let ListenerSlot::Config(single) = &config.listeners[0] else {
            panic!("expected a listener config");
        };
        assert!(matches!(single.listener, Entry::Name(ref name) if name == "timestamps"));
        assert_eq!(single.events, EventNames::from("load"));

        let ListenerSlot::Config(many) = &config.listeners[1] else {
            panic!("expected a listener config");
        };
        assert_eq!(many.events, EventNames::from(["load", "save"]));

        assert!(matches!(
            config.listeners[2],
            ListenerSlot::Malformed(ValueKind::String)
        ));
        assert!(matches!(
            config.listeners[3],
            ListenerSlot::Malformed(ValueKind::Integer)
        ));

        let ListenerSlot::Config(missing) = &config.listeners[4] else {
            panic!("expected a listener config");
        };
        assert!(matches!(missing.listener, Entry::Invalid(ValueKind::Null)));
    }

    #[test]
    fn test_application_config_sections() {
        let app: ApplicationConfig = serde_json::from_str(
            r#"{"doctrine": {"event_manager": {
                "orm_default": {"subscribers": ["audit"]},
                "orm_reporting": {"listeners": [{"listener": "cache", "events": "flush"}]}
            }}}"#,
        )
        .unwrap();

        assert_eq!(app.event_manager(DEFAULT_CONFIG_KEY).subscribers.len(), 1);
        assert_eq!(app.event_manager("orm_reporting").listeners.len(), 1);
        assert!(app.event_manager("orm_missing").is_empty());
    }

    #[test]
    fn test_builder_helpers() {
        let config = EventManagerConfig::new()
            .with_subscriber("audit")
            .with_subscriber(Entry::instance(CountingObject))
            .with_listener("timestamps", ["load", "save"])
            .with_listener_slot(ListenerSlot::Malformed(ValueKind::Integer));

        assert_eq!(config.subscribers.len(), 2);
        assert_eq!(config.listeners.len(), 2);
        assert!(format!("{:?}", config.subscribers[1]).contains("CountingObject"));
    }
}
