use crate::FieldPatch;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Proposed field changes across a collection of entities, keyed by
/// entity key.
///
/// Iteration order is the sorted key order; bulk updates walk entries
/// in that order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BulkPatch {
    patches: BTreeMap<String, FieldPatch>,
}

impl BulkPatch {
    /// Creates an empty bulk patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a per-entity patch, consuming and returning the bulk patch.
    #[must_use]
    pub fn with_entity(mut self, key: impl Into<String>, patch: FieldPatch) -> Self {
        self.patches.insert(key.into(), patch);
        self
    }

    /// Inserts a per-entity patch, returning the previous one if present.
    pub fn insert(&mut self, key: impl Into<String>, patch: FieldPatch) -> Option<FieldPatch> {
        self.patches.insert(key.into(), patch)
    }

    /// Returns the patch recorded for an entity key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FieldPatch> {
        self.patches.get(key)
    }

    /// Number of entities with a recorded patch, changed or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patches.len()
    }

    /// Returns true if no entity has a recorded patch.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }

    /// Iterates over `(key, patch)` pairs in sorted key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldPatch)> {
        self.patches.iter()
    }

    /// Iterates over the keys whose patch carries at least one explicit
    /// value, i.e. the entities a bulk update would actually touch.
    pub fn changed_keys(&self) -> impl Iterator<Item = &str> {
        self.patches
            .iter()
            .filter(|(_, patch)| patch.has_changes())
            .map(|(key, _)| key.as_str())
    }
}

impl<S: Into<String>> FromIterator<(S, FieldPatch)> for BulkPatch {
    fn from_iter<I: IntoIterator<Item = (S, FieldPatch)>>(iter: I) -> Self {
        Self {
            patches: iter
                .into_iter()
                .map(|(key, patch)| (key.into(), patch))
                .collect(),
        }
    }
}
