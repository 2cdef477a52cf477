use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A single persisted object as a named record of field values.
///
/// Field values are opaque JSON (`serde_json::Value`): strings, numbers,
/// booleans, null, arrays, objects. The model attaches no meaning to them
/// beyond equality; `Value::Null` is an explicit value (a cleared field),
/// never an "absent" marker. Absence is expressed structurally, by a key
/// not being present at all (see [`FieldEdit`](crate::FieldEdit)).
///
/// Fields are kept in a `BTreeMap`, so iteration order is the sorted
/// field-name order and is stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Entity {
    fields: BTreeMap<String, Value>,
}

impl Entity {
    /// Creates an empty entity.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field, consuming and returning the entity (builder style).
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Sets a field, returning the previous value if the field existed.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(name.into(), value.into())
    }

    /// Removes a field, returning its value if it existed.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.fields.remove(name)
    }

    /// Returns the value of a field.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Extracts a string field value.
    #[must_use]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(|v| v.as_str())
    }

    /// Extracts a boolean field value.
    #[must_use]
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.fields.get(name).and_then(|v| v.as_bool())
    }

    /// Extracts a numeric field value.
    #[must_use]
    pub fn get_number(&self, name: &str) -> Option<f64> {
        self.fields.get(name).and_then(|v| v.as_f64())
    }

    /// Returns true if the entity has a field with this name.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the entity has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over field names in sorted order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Iterates over `(name, value)` pairs in sorted name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }
}

impl From<BTreeMap<String, Value>> for Entity {
    fn from(fields: BTreeMap<String, Value>) -> Self {
        Self { fields }
    }
}

impl<S: Into<String>, V: Into<Value>> FromIterator<(S, V)> for Entity {
    fn from_iter<I: IntoIterator<Item = (S, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

impl IntoIterator for Entity {
    type Item = (String, Value);
    type IntoIter = std::collections::btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl<'a> IntoIterator for &'a Entity {
    type Item = (&'a String, &'a Value);
    type IntoIter = std::collections::btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

/// The caller's current entities, keyed by entity key.
///
/// Entity keys are caller-supplied strings (record ids, field ids, slugs,
/// whatever identifies the object in the caller's store). Iteration order
/// is the sorted key order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityMap {
    entities: BTreeMap<String, Entity>,
}

impl EntityMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entity under a key, consuming and returning the map.
    #[must_use]
    pub fn with_entity(mut self, key: impl Into<String>, entity: Entity) -> Self {
        self.entities.insert(key.into(), entity);
        self
    }

    /// Inserts an entity, returning the previous one if the key existed.
    pub fn insert(&mut self, key: impl Into<String>, entity: Entity) -> Option<Entity> {
        self.entities.insert(key.into(), entity)
    }

    /// Returns the entity stored under a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Entity> {
        self.entities.get(key)
    }

    /// Returns true if an entity is stored under this key.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entities.contains_key(key)
    }

    /// Number of entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns true if the map holds no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Iterates over `(key, entity)` pairs in sorted key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Entity)> {
        self.entities.iter()
    }

    /// Iterates over entity keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entities.keys().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<(S, Entity)> for EntityMap {
    fn from_iter<I: IntoIterator<Item = (S, Entity)>>(iter: I) -> Self {
        Self {
            entities: iter
                .into_iter()
                .map(|(key, entity)| (key.into(), entity))
                .collect(),
        }
    }
}
