mod common;

use common::{entity_json, sample_entity, EventLog, FailingFetch, RecordingFetch, RecordingUpdate};
use fieldsync_engine::{OperationRegistry, SectionEngine};
use pretty_assertions::assert_eq;
use std::sync::Arc;

// ── Lookup ───────────────────────────────────────────────────────

#[test]
fn lookup_hits_and_misses() {
    let log = EventLog::new();
    let ops = OperationRegistry::new()
        .with_fetch("load", Arc::new(RecordingFetch::new("load", log.clone())))
        .with_update("save", Arc::new(RecordingUpdate::new(log.clone())));

    assert!(ops.fetch("load").is_some());
    assert!(ops.fetch("save").is_none());
    assert!(ops.update("save").is_some());
    assert!(ops.update("load").is_none());
}

#[test]
fn fetch_and_update_namespaces_are_independent() {
    let log = EventLog::new();
    let ops = OperationRegistry::new()
        .with_fetch("sync", Arc::new(RecordingFetch::new("sync", log.clone())))
        .with_update("sync", Arc::new(RecordingUpdate::new(log.clone())));

    assert!(ops.fetch("sync").is_some());
    assert!(ops.update("sync").is_some());
}

#[tokio::test]
async fn later_registration_replaces_earlier() {
    let log = EventLog::new();
    let mut ops = OperationRegistry::new();
    ops.register_fetch("load", Arc::new(RecordingFetch::new("load", log.clone())));
    ops.register_fetch("load", Arc::new(FailingFetch::new("load", log.clone())));

    let result = ops.fetch("load").unwrap().call(&[]).await;

    assert!(result.is_err());
    assert_eq!(log.events(), vec!["fetch:load:failed"]);
}

#[tokio::test]
async fn register_update_stores_the_operation() {
    let log = EventLog::new();
    let mut ops = OperationRegistry::new();
    ops.register_update("save", Arc::new(RecordingUpdate::new(log.clone())));

    let result = ops.update("save").unwrap().update(&sample_entity()).await;

    assert!(result.is_ok());
    let expected = format!("update:{}", entity_json(&sample_entity()));
    assert_eq!(log.events(), vec![expected]);
}

#[test]
fn names_come_back_sorted() {
    let log = EventLog::new();
    let ops = OperationRegistry::new()
        .with_fetch("zulu", Arc::new(RecordingFetch::new("zulu", log.clone())))
        .with_fetch("alpha", Arc::new(RecordingFetch::new("alpha", log.clone())));

    let names: Vec<&str> = ops.fetch_names().collect();
    assert_eq!(names, vec!["alpha", "zulu"]);
    assert_eq!(ops.update_names().count(), 0);
}

#[test]
fn clones_share_the_registered_operations() {
    let log = EventLog::new();
    let ops = OperationRegistry::new()
        .with_fetch("load", Arc::new(RecordingFetch::new("load", log.clone())));

    let cloned = ops.clone();
    assert!(cloned.fetch("load").is_some());
}

#[test]
fn engine_exposes_its_registry() {
    let log = EventLog::new();
    let ops = OperationRegistry::new()
        .with_fetch("load", Arc::new(RecordingFetch::new("load", log.clone())));
    let engine = SectionEngine::new(ops);

    assert!(engine.operations().fetch("load").is_some());
    let names: Vec<&str> = engine.operations().fetch_names().collect();
    assert_eq!(names, vec!["load"]);
}
