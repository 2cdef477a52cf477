//! Declarative section configuration.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Fetch operation names with their positional arguments, for one run
/// of the fetch flow.
///
/// Callers build one per invocation, or embed one in a [`Section`].
/// Iteration order is the sorted name order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FetchSpec {
    ops: BTreeMap<String, Vec<Value>>,
}

impl FetchSpec {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an operation with its arguments, builder style.
    #[must_use]
    pub fn with_op(mut self, name: impl Into<String>, args: Vec<Value>) -> Self {
        self.ops.insert(name.into(), args);
        self
    }

    /// Adds an operation that takes no arguments, builder style.
    #[must_use]
    pub fn with_plain_op(self, name: impl Into<String>) -> Self {
        self.with_op(name, Vec::new())
    }

    /// Adds an operation, returning the previous arguments if the name
    /// was already present.
    pub fn insert(&mut self, name: impl Into<String>, args: Vec<Value>) -> Option<Vec<Value>> {
        self.ops.insert(name.into(), args)
    }

    /// Returns the arguments registered for an operation name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[Value]> {
        self.ops.get(name).map(Vec::as_slice)
    }

    /// Iterates over `(name, args)` pairs in sorted name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &[Value])> {
        self.ops.iter().map(|(name, args)| (name, args.as_slice()))
    }

    /// Iterates over operation names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.ops.keys().map(String::as_str)
    }

    /// Number of operations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Returns true if no operations are named.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, Vec<Value>)> for FetchSpec {
    fn from_iter<I: IntoIterator<Item = (S, Vec<Value>)>>(iter: I) -> Self {
        Self {
            ops: iter
                .into_iter()
                .map(|(name, args)| (name.into(), args))
                .collect(),
        }
    }
}

/// One screen's declarative data requirements.
///
/// A section names the fetches that populate it and, optionally, the
/// update operation that persists its single-entity edits. Sections
/// round-trip through serde so they can be loaded from configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Fetches to run when the section loads.
    #[serde(default, skip_serializing_if = "FetchSpec::is_empty")]
    pub fetch: FetchSpec,
    /// Update operation for single-entity saves, if the section has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update: Option<String>,
}

impl Section {
    /// Creates a section with no fetches and no update operation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a fetch operation, builder style.
    #[must_use]
    pub fn with_fetch_op(mut self, name: impl Into<String>, args: Vec<Value>) -> Self {
        self.fetch = self.fetch.with_op(name, args);
        self
    }

    /// Declares the update operation, builder style.
    #[must_use]
    pub fn with_update(mut self, name: impl Into<String>) -> Self {
        self.update = Some(name.into());
        self
    }

    /// The update operation name, if the section declares one.
    #[must_use]
    pub fn update_op(&self) -> Option<&str> {
        self.update.as_deref()
    }
}
