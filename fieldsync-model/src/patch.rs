//! Field-level edits and the entity merge rule.
//!
//! An edit form hands back one [`FieldEdit`] per field: either the user
//! touched the field (including clearing it to an empty string or null),
//! or they never did. The distinction drives the merge rule: touched
//! values override the stored entity, untouched fields keep their
//! last-known-good value.

use crate::Entity;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;

/// One proposed change to a single field.
///
/// `Set` carries any explicit value, including an empty string or null:
/// clearing a field is a real change that must be applied. `Untouched`
/// means the user never supplied anything for the field, so the original
/// value stands.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FieldEdit {
    /// The field was not touched; the original value (if any) stands.
    #[default]
    Untouched,
    /// An explicit value was supplied, to be applied verbatim.
    Set(Value),
}

impl FieldEdit {
    /// Returns true if this edit carries an explicit value.
    #[must_use]
    pub fn is_touched(&self) -> bool {
        matches!(self, FieldEdit::Set(_))
    }

    /// Returns the explicit value, if any.
    #[must_use]
    pub fn value(&self) -> Option<&Value> {
        match self {
            FieldEdit::Untouched => None,
            FieldEdit::Set(value) => Some(value),
        }
    }

    /// Consumes the edit, returning the explicit value if any.
    #[must_use]
    pub fn into_value(self) -> Option<Value> {
        match self {
            FieldEdit::Untouched => None,
            FieldEdit::Set(value) => Some(value),
        }
    }

    /// Converts an optional value: `None` becomes `Untouched`.
    #[must_use]
    pub fn from_option(value: Option<Value>) -> Self {
        match value {
            None => FieldEdit::Untouched,
            Some(value) => FieldEdit::Set(value),
        }
    }
}

impl From<Value> for FieldEdit {
    fn from(value: Value) -> Self {
        FieldEdit::Set(value)
    }
}

/// The proposed field changes for one entity.
///
/// Keys are field names; iteration order is the sorted name order.
///
/// # Serialization
///
/// JSON has no "untouched" form, so a patch serializes its touched fields
/// only; an `Untouched` entry is equivalent to a missing key. On
/// deserialization every present key becomes `Set`, and JSON `null` is
/// `Set(Value::Null)`, an explicit clear.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldPatch {
    edits: BTreeMap<String, FieldEdit>,
}

impl FieldPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an explicit value, consuming and returning the patch.
    #[must_use]
    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.edits.insert(name.into(), FieldEdit::Set(value.into()));
        self
    }

    /// Records a field as untouched, consuming and returning the patch.
    #[must_use]
    pub fn with_untouched(mut self, name: impl Into<String>) -> Self {
        self.edits.insert(name.into(), FieldEdit::Untouched);
        self
    }

    /// Inserts an edit, returning the previous one if the field was present.
    pub fn insert(&mut self, name: impl Into<String>, edit: FieldEdit) -> Option<FieldEdit> {
        self.edits.insert(name.into(), edit)
    }

    /// Returns the edit recorded for a field.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldEdit> {
        self.edits.get(name)
    }

    /// Number of recorded edits, touched or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edits.len()
    }

    /// Returns true if no edits are recorded at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Iterates over all `(name, edit)` pairs in sorted name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldEdit)> {
        self.edits.iter()
    }

    /// Iterates over the explicitly set fields only.
    pub fn touched(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.edits.iter().filter_map(|(name, edit)| match edit {
            FieldEdit::Set(value) => Some((name.as_str(), value)),
            FieldEdit::Untouched => None,
        })
    }

    /// Returns true if at least one field carries an explicit value.
    ///
    /// A patch where every entry is `Untouched` (or with no entries at
    /// all) proposes nothing; bulk updates skip such entities entirely.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.edits.values().any(FieldEdit::is_touched)
    }
}

impl<S: Into<String>> FromIterator<(S, FieldEdit)> for FieldPatch {
    fn from_iter<I: IntoIterator<Item = (S, FieldEdit)>>(iter: I) -> Self {
        Self {
            edits: iter
                .into_iter()
                .map(|(name, edit)| (name.into(), edit))
                .collect(),
        }
    }
}

impl Serialize for FieldPatch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.touched().count()))?;
        for (name, value) in self.touched() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FieldPatch {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields = BTreeMap::<String, Value>::deserialize(deserializer)?;
        Ok(fields
            .into_iter()
            .map(|(name, value)| (name, FieldEdit::Set(value)))
            .collect())
    }
}

impl Entity {
    /// Returns a new entity combining this one with a patch's touched fields.
    ///
    /// - Fields the patch does not name, or names as `Untouched`, keep
    ///   their original value.
    /// - Every `Set` value is written into the result, overwriting the
    ///   original and adding the field when the original lacks it.
    /// - An `Untouched` entry for a field absent from the original emits
    ///   nothing.
    ///
    /// The result's field set is exactly the original's plus the patch's
    /// touched names, and every value in it is concrete. `self` is left
    /// unchanged.
    #[must_use]
    pub fn merged(&self, patch: &FieldPatch) -> Entity {
        let mut merged = self.clone();
        merged.apply(patch);
        merged
    }

    /// Applies a patch's touched fields in place.
    ///
    /// Same rule as [`Entity::merged`], mutating `self` instead of
    /// returning a copy.
    pub fn apply(&mut self, patch: &FieldPatch) {
        for (name, value) in patch.touched() {
            self.insert(name, value.clone());
        }
    }
}
