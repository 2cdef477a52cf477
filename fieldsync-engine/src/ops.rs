//! Named operations and their registry.
//!
//! Operations are the caller's data-access code. The engine never talks
//! to a store or a network itself; it resolves names against these
//! tables and awaits whatever the caller registered.

use crate::error::OperationError;
use async_trait::async_trait;
use fieldsync_model::Entity;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// A named data fetch.
///
/// Implementations load data into the caller's own store; the engine
/// consumes nothing beyond completion or failure.
#[async_trait]
pub trait FetchOperation: Send + Sync {
    /// Runs the fetch with its positional arguments.
    async fn call(&self, args: &[Value]) -> Result<(), OperationError>;
}

/// A named entity update.
#[async_trait]
pub trait UpdateOperation: Send + Sync {
    /// Persists the merged entity.
    async fn update(&self, merged: &Entity) -> Result<(), OperationError>;
}

/// Name → operation tables, injected into the engine at construction.
///
/// Fetch and update operations live in separate namespaces because
/// their signatures differ; the same name may appear in both. A lookup
/// miss is surfaced by the engine as `EngineError::UnknownOperation`.
#[derive(Clone, Default)]
pub struct OperationRegistry {
    fetch_ops: BTreeMap<String, Arc<dyn FetchOperation>>,
    update_ops: BTreeMap<String, Arc<dyn UpdateOperation>>,
}

impl OperationRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a fetch operation, consuming and returning the
    /// registry (builder style).
    #[must_use]
    pub fn with_fetch(mut self, name: impl Into<String>, op: Arc<dyn FetchOperation>) -> Self {
        self.fetch_ops.insert(name.into(), op);
        self
    }

    /// Registers an update operation, builder style.
    #[must_use]
    pub fn with_update(mut self, name: impl Into<String>, op: Arc<dyn UpdateOperation>) -> Self {
        self.update_ops.insert(name.into(), op);
        self
    }

    /// Registers a fetch operation, replacing any previous registration
    /// under the same name.
    pub fn register_fetch(&mut self, name: impl Into<String>, op: Arc<dyn FetchOperation>) {
        self.fetch_ops.insert(name.into(), op);
    }

    /// Registers an update operation, replacing any previous
    /// registration under the same name.
    pub fn register_update(&mut self, name: impl Into<String>, op: Arc<dyn UpdateOperation>) {
        self.update_ops.insert(name.into(), op);
    }

    /// Looks up a fetch operation.
    #[must_use]
    pub fn fetch(&self, name: &str) -> Option<Arc<dyn FetchOperation>> {
        self.fetch_ops.get(name).cloned()
    }

    /// Looks up an update operation.
    #[must_use]
    pub fn update(&self, name: &str) -> Option<Arc<dyn UpdateOperation>> {
        self.update_ops.get(name).cloned()
    }

    /// Registered fetch operation names, in sorted order.
    pub fn fetch_names(&self) -> impl Iterator<Item = &str> {
        self.fetch_ops.keys().map(String::as_str)
    }

    /// Registered update operation names, in sorted order.
    pub fn update_names(&self) -> impl Iterator<Item = &str> {
        self.update_ops.keys().map(String::as_str)
    }
}
