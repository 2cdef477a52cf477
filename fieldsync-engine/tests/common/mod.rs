#![allow(dead_code)]

//! Shared test fixtures.
//!
//! Recording hooks and operations all append to one [`EventLog`], so a
//! test can assert the interleaving of hook and operation calls as a
//! single sequence.

use async_trait::async_trait;
use fieldsync_engine::{EngineError, FetchOperation, OperationError, UiHooks, UpdateOperation};
use fieldsync_model::Entity;
use serde_json::Value;
use std::sync::{Arc, Mutex};

/// Shared, ordered record of hook and operation calls.
#[derive(Clone, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<String>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: impl Into<String>) {
        self.events.lock().unwrap().push(event.into());
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    /// How many recorded events equal `event` exactly.
    pub fn count_of(&self, event: &str) -> usize {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.as_str() == event)
            .count()
    }

    /// How many recorded events start with `prefix`.
    pub fn count_prefixed(&self, prefix: &str) -> usize {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.starts_with(prefix))
            .count()
    }
}

/// Hooks that append every signal to the log.
pub struct RecordingHooks {
    log: EventLog,
}

impl RecordingHooks {
    pub fn new(log: EventLog) -> Self {
        Self { log }
    }
}

#[async_trait]
impl UiHooks for RecordingHooks {
    fn clear_error(&self) {
        self.log.push("clear_error");
    }

    fn start_loading(&self) {
        self.log.push("start_loading");
    }

    fn end_loading(&self) {
        self.log.push("end_loading");
    }

    fn set_error(&self, error: &EngineError) {
        self.log.push(format!("set_error:{error}"));
    }

    fn end_editing(&self) {
        self.log.push("end_editing");
    }

    fn reset_form(&self) {
        self.log.push("reset_form");
    }

    async fn update_field(&self, merged: Entity) -> Result<(), OperationError> {
        self.log.push(format!("update_field:{}", entity_json(&merged)));
        Ok(())
    }
}

/// Hooks whose `update_field` records the call, then fails.
pub struct FailingFieldHooks {
    log: EventLog,
}

impl FailingFieldHooks {
    pub fn new(log: EventLog) -> Self {
        Self { log }
    }
}

#[async_trait]
impl UiHooks for FailingFieldHooks {
    async fn update_field(&self, merged: Entity) -> Result<(), OperationError> {
        self.log.push(format!("update_field:{}", entity_json(&merged)));
        Err(OperationError::new("store rejected the write"))
    }
}

/// Fetch operation that records its name and arguments, then succeeds.
pub struct RecordingFetch {
    name: String,
    log: EventLog,
}

impl RecordingFetch {
    pub fn new(name: &str, log: EventLog) -> Self {
        Self {
            name: name.to_string(),
            log,
        }
    }
}

#[async_trait]
impl FetchOperation for RecordingFetch {
    async fn call(&self, args: &[Value]) -> Result<(), OperationError> {
        self.log.push(format!(
            "fetch:{}:{}",
            self.name,
            serde_json::to_string(args).unwrap()
        ));
        Ok(())
    }
}

/// Fetch operation that records the call, then fails.
pub struct FailingFetch {
    name: String,
    log: EventLog,
}

impl FailingFetch {
    pub fn new(name: &str, log: EventLog) -> Self {
        Self {
            name: name.to_string(),
            log,
        }
    }
}

#[async_trait]
impl FetchOperation for FailingFetch {
    async fn call(&self, _args: &[Value]) -> Result<(), OperationError> {
        self.log.push(format!("fetch:{}:failed", self.name));
        Err(OperationError::new(format!("{} unavailable", self.name)))
    }
}

/// Update operation that records the merged entity it receives.
pub struct RecordingUpdate {
    log: EventLog,
}

impl RecordingUpdate {
    pub fn new(log: EventLog) -> Self {
        Self { log }
    }
}

#[async_trait]
impl UpdateOperation for RecordingUpdate {
    async fn update(&self, merged: &Entity) -> Result<(), OperationError> {
        self.log.push(format!("update:{}", entity_json(merged)));
        Ok(())
    }
}

/// Update operation that records the call, then fails.
pub struct FailingUpdate {
    log: EventLog,
}

impl FailingUpdate {
    pub fn new(log: EventLog) -> Self {
        Self { log }
    }
}

#[async_trait]
impl UpdateOperation for FailingUpdate {
    async fn update(&self, merged: &Entity) -> Result<(), OperationError> {
        self.log.push(format!("update:{}:failed", entity_json(merged)));
        Err(OperationError::new("write failed"))
    }
}

/// Compact JSON of an entity. Keys come out sorted, so the string is
/// deterministic and safe to assert against.
pub fn entity_json(entity: &Entity) -> String {
    serde_json::to_string(entity).unwrap()
}

pub fn sample_entity() -> Entity {
    Entity::new().with_field("foo", "foo").with_field("bar", "bar")
}
