//! Ordered sets of event names.

use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::{fmt, slice};

/// An ordered list of event names.
///
/// Configuration accepts either a single name or a sequence of names; both
/// normalize to this type. A missing or null value is an empty list, and
/// numeric or boolean names keep their text form (`42` becomes `"42"`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct EventNames(Vec<String>);

impl EventNames {
    /// Create an empty list.
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Create a list holding exactly one name.
    pub fn single(name: impl Into<String>) -> Self {
        Self(vec![name.into()])
    }

    /// Append a name.
    pub fn push(&mut self, name: impl Into<String>) {
        self.0.push(name.into());
    }

    /// Returns `true` if `name` is in the list.
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|n| n == name)
    }

    /// Iterate over the names in order.
    pub fn iter(&self) -> slice::Iter<'_, String> {
        self.0.iter()
    }

    /// The names as a slice.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Number of names.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no names.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for EventNames {
    fn from(name: &str) -> Self {
        Self::single(name)
    }
}

impl From<String> for EventNames {
    fn from(name: String) -> Self {
        Self::single(name)
    }
}

impl From<Vec<String>> for EventNames {
    fn from(names: Vec<String>) -> Self {
        Self(names)
    }
}

impl From<Vec<&str>> for EventNames {
    fn from(names: Vec<&str>) -> Self {
        names.into_iter().collect()
    }
}

impl<const N: usize> From<[&str; N]> for EventNames {
    fn from(names: [&str; N]) -> Self {
        names.into_iter().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for EventNames {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<'a> IntoIterator for &'a EventNames {
    type Item = &'a String;
    type IntoIter = slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for EventNames {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'de> Deserialize<'de> for EventNames {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(EventNamesVisitor)
    }
}

/// Scalars keep their text form so an odd name surfaces later as a missing
/// listener method instead of failing the whole parse.
struct EventNamesVisitor;

impl<'de> Visitor<'de> for EventNamesVisitor {
    type Value = EventNames;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an event name or a sequence of event names")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(EventNames::single(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(EventNames::single(v))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(EventNames::single(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(EventNames::single(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(EventNames::single(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(EventNames::single(v.to_string()))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(EventNames::new())
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(EventNames::new())
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut names = EventNames::new();
        while let Some(EventName(name)) = seq.next_element()? {
            names.push(name);
        }
        Ok(names)
    }

    // Keys are dropped; the values are the names.
    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut names = EventNames::new();
        while let Some((IgnoredAny, EventName(name))) = map.next_entry()? {
            names.push(name);
        }
        Ok(names)
    }
}

/// One element of an event name sequence.
struct EventName(String);

impl<'de> Deserialize<'de> for EventName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(EventNameVisitor)
    }
}

struct EventNameVisitor;

impl<'de> Visitor<'de> for EventNameVisitor {
    type Value = EventName;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an event name")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(EventName(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(EventName(v))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(EventName(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(EventName(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(EventName(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(EventName(v.to_string()))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(EventName(String::new()))
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(EventName(String::new()))
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }

    // Nested containers cannot name a method; keep their kind so the
    // failure still names something.
    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(EventName(String::from("array")))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(EventName(String::from("mapping")))
    }
}

#[cfg(test)]
mod tests {
    use super::EventNames;

    #[test]
    fn test_single_name_normalizes() {
        let names = EventNames::from("postLoad");
        assert_eq!(names.as_slice(), ["postLoad"]);
        assert_eq!(names.len(), 1);
    }

    #[test]
    fn test_preserves_order() {
        let names = EventNames::from(["prePersist", "postLoad", "onFlush"]);
        let collected: Vec<&str> = names.iter().map(String::as_str).collect();
        assert_eq!(collected, ["prePersist", "postLoad", "onFlush"]);
        assert!(names.contains("postLoad"));
        assert!(!names.contains("preUpdate"));
    }

    #[test]
    fn test_deserialize_forms() {
        let one: EventNames = serde_json::from_str(r#""postLoad""#).unwrap();
        assert_eq!(one, EventNames::from("postLoad"));

        let many: EventNames = serde_json::from_str(r#"["postLoad", "onFlush"]"#).unwrap();
        assert_eq!(many, EventNames::from(["postLoad", "onFlush"]));

        let none: EventNames = serde_json::from_str("null").unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn test_deserialize_keeps_scalar_text() {
        let number: EventNames = serde_json::from_str("42").unwrap();
        assert_eq!(number, EventNames::from("42"));

        let mixed: EventNames = serde_json::from_str(r#"[1, "postLoad", true, 1.5]"#).unwrap();
        assert_eq!(mixed, EventNames::from(["1", "postLoad", "true", "1.5"]));

        let nested: EventNames = serde_json::from_str(r#"[["postLoad"], {"a": 1}]"#).unwrap();
        assert_eq!(nested, EventNames::from(["array", "mapping"]));
    }

    #[test]
    fn test_deserialize_mapping_keeps_values() {
        let names: EventNames =
            serde_json::from_str(r#"{"first": "postLoad", "second": "onFlush"}"#).unwrap();
        assert_eq!(names, EventNames::from(["postLoad", "onFlush"]));
    }
}
