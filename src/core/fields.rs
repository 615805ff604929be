//! Insertion-ordered string fields
//!
//! Issues, evidence, notes and issue-library entries carry free-form
//! `#[Key]#` fields whose order matters: it is the order the server renders
//! them in and the order [`crate::core::codec::encode_fields`] writes them
//! back out.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::core::error::{DradisError, Result};

/// A string-to-string map with unique keys that remembers insertion order
///
/// Setting an existing key replaces its value in place; setting a new key
/// appends it. `Clone` is a deep copy, so a caller can edit a copy of an
/// entity's fields before submitting an update without touching the live
/// entity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedFieldMap {
    entries: Vec<(String, String)>,
}

impl OrderedFieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or update a field
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Like [`get`](Self::get) but a missing key is an error carrying the key
    pub fn require(&self, key: &str) -> Result<&str> {
        self.get(key)
            .ok_or_else(|| DradisError::FieldNotFound(key.to_string()))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Remove a field, keeping the order of the rest
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Key/value pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for OrderedFieldMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = OrderedFieldMap::new();
        map.extend(iter);
        map
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for OrderedFieldMap {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.set(k, v);
        }
    }
}

impl Serialize for OrderedFieldMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for OrderedFieldMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(FieldMapVisitor)
    }
}

struct FieldMapVisitor;

impl<'de> Visitor<'de> for FieldMapVisitor {
    type Value = OrderedFieldMap;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of field names to values")
    }

    // The server sends `null` for entities that have no fields yet
    fn visit_unit<E: serde::de::Error>(self) -> std::result::Result<Self::Value, E> {
        Ok(OrderedFieldMap::new())
    }

    fn visit_none<E: serde::de::Error>(self) -> std::result::Result<Self::Value, E> {
        Ok(OrderedFieldMap::new())
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Self::Value, A::Error> {
        let mut map = OrderedFieldMap::new();
        while let Some((key, value)) = access.next_entry::<String, serde_json::Value>()? {
            let value = match value {
                serde_json::Value::String(s) => s,
                serde_json::Value::Null => String::new(),
                other => other.to_string(),
            };
            map.set(key, value);
        }
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_follow_first_insertion() {
        let mut map = OrderedFieldMap::new();
        map.set("Title", "XSS");
        map.set("Severity", "High");
        map.set("Description", "...");
        map.set("Severity", "Low");

        let keys: Vec<_> = map.keys().collect();
        assert_eq!(keys, vec!["Title", "Severity", "Description"]);
        assert_eq!(map.get("Severity"), Some("Low"));
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_keys_are_restartable() {
        let map: OrderedFieldMap = [("a", "1"), ("b", "2")].into_iter().collect();
        let first: Vec<_> = map.keys().collect();
        let second: Vec<_> = map.keys().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut original = OrderedFieldMap::new();
        original.set("k", "v1");

        let mut copy = original.clone();
        copy.set("k", "v2");
        copy.set("extra", "x");
        original.set("other", "y");

        assert_eq!(original.get("k"), Some("v1"));
        assert!(!original.contains_key("extra"));
        assert_eq!(copy.get("k"), Some("v2"));
        assert!(!copy.contains_key("other"));
    }

    #[test]
    fn test_require_reports_missing_key() {
        let map = OrderedFieldMap::new();
        let err = map.require("Port").unwrap_err();
        assert!(matches!(err, DradisError::FieldNotFound(ref k) if k == "Port"));
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut map: OrderedFieldMap = [("a", "1"), ("b", "2"), ("c", "3")].into_iter().collect();
        assert_eq!(map.remove("b"), Some("2".to_string()));
        assert_eq!(map.remove("zzz"), None);
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["a", "c"]);
    }

    #[test]
    fn test_deserialize_preserves_wire_order() {
        let json = r#"{"Title":"SQLi","Rating":"Critical","CVSS":9.8,"Notes":null}"#;
        let map: OrderedFieldMap = serde_json::from_str(json).unwrap();
        assert_eq!(
            map.keys().collect::<Vec<_>>(),
            vec!["Title", "Rating", "CVSS", "Notes"]
        );
        assert_eq!(map.get("CVSS"), Some("9.8"));
        assert_eq!(map.get("Notes"), Some(""));
    }

    #[test]
    fn test_deserialize_null_is_empty() {
        let map: OrderedFieldMap = serde_json::from_str("null").unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn test_serialize_in_order() {
        let map: OrderedFieldMap = [("z", "1"), ("a", "2")].into_iter().collect();
        assert_eq!(serde_json::to_string(&map).unwrap(), r#"{"z":"1","a":"2"}"#);
    }
}
