//! Normalized record sets.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::value::Value;

/// Identity column holding an entity's name.
pub const NAME_COLUMN: &str = "name";
/// Identity column holding the logical section identifier.
pub const LOGICAL_FILE_ID_COLUMN: &str = "logical-file-id";

/// Returns true for the identity columns that never appear in
/// [`RecordSet::attributes`].
pub fn is_identity_column(column: &str) -> bool {
    column == NAME_COLUMN || column == LOGICAL_FILE_ID_COLUMN
}

/// A string-keyed map that keeps insertion order.
///
/// Serializes as a JSON object with keys in insertion order. Inserting an
/// existing key replaces the value in place.
///
/// Lookups scan linearly, so building a map of `n` keys costs O(n²). Record
/// sets and headers hold tens of keys; do not use it for bulk sample data.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedMap<V> {
    entries: Vec<(String, V)>,
}

impl<V> OrderedMap<V> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Inserts or replaces a value, returning the previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();
        if let Some(slot) = self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            return Some(std::mem::replace(&mut slot.1, value));
        }
        self.entries.push((key, value));
        None
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn retain(&mut self, mut keep: impl FnMut(&str, &V) -> bool) {
        self.entries.retain(|(key, value)| keep(key, value));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for OrderedMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = OrderedMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl<V> IntoIterator for OrderedMap<V> {
    type Item = (String, V);
    type IntoIter = std::vec::IntoIter<(String, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<V: Serialize> Serialize for OrderedMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct OrderedMapVisitor<V>(PhantomData<V>);

impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedMapVisitor<V> {
    type Value = OrderedMap<V>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a map with string keys")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = OrderedMap::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<String, V>()? {
            map.insert(key, value);
        }
        Ok(map)
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(OrderedMapVisitor(PhantomData))
    }
}

/// The normalized `{attributes, objects}` table for one entity kind.
///
/// `objects` maps each (deduplicated) entity name to its values, positionally
/// aligned with `attributes`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RecordSet {
    pub attributes: Vec<String>,
    pub objects: OrderedMap<Vec<Value>>,
}

impl RecordSet {
    pub fn new(attributes: Vec<String>) -> Self {
        Self {
            attributes,
            objects: OrderedMap::new(),
        }
    }

    /// An empty record set: no attributes, no objects.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.objects.keys()
    }

    pub fn get(&self, name: &str) -> Option<&[Value]> {
        self.objects.get(name).map(Vec::as_slice)
    }

    pub fn attribute_index(&self, attribute: &str) -> Option<usize> {
        self.attributes.iter().position(|existing| existing == attribute)
    }

    /// Returns one attribute value of a named object.
    pub fn value(&self, name: &str, attribute: &str) -> Option<&Value> {
        let index = self.attribute_index(attribute)?;
        self.get(name)?.get(index)
    }

    /// Keeps only the objects whose name satisfies `keep`.
    pub fn retain_names(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.objects.retain(|name, _| keep(name));
    }

    /// A record set holding only the named object, with the same attributes.
    pub fn subset(&self, name: &str) -> RecordSet {
        let mut subset = RecordSet::new(self.attributes.clone());
        if let Some(values) = self.objects.get(name) {
            subset.objects.insert(name, values.clone());
        }
        subset
    }
}
