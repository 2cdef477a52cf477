//! Section engine: fetch, update, and bulk-update flows.
//!
//! The engine owns no I/O and no state of its own. Caller-supplied
//! operations do the data work; caller-supplied hooks surface loading
//! and error state. Flows bracket the operations with those hooks and
//! never spawn: concurrency is cooperative within the calling task, so
//! the engine runs on any async runtime.

use crate::error::{EngineError, EngineResult};
use crate::hooks::{NullHooks, UiHooks};
use crate::ops::{FetchOperation, OperationRegistry};
use crate::section::{FetchSpec, Section};
use fieldsync_model::{BulkPatch, Entity, EntityMap, FieldPatch};
use futures::future::join_all;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// Drives the fetch/update flows through hooks and registered
/// operations.
pub struct SectionEngine {
    /// UI lifecycle signals.
    hooks: Arc<dyn UiHooks>,
    /// Named fetch/update operations.
    ops: OperationRegistry,
}

impl SectionEngine {
    /// Creates an engine with the default `NullHooks` (no UI signals).
    pub fn new(ops: OperationRegistry) -> Self {
        Self::with_hooks(Arc::new(NullHooks), ops)
    }

    /// Creates an engine with custom hooks.
    pub fn with_hooks(hooks: Arc<dyn UiHooks>, ops: OperationRegistry) -> Self {
        Self { hooks, ops }
    }

    /// Returns a reference to the hooks.
    pub fn hooks(&self) -> &Arc<dyn UiHooks> {
        &self.hooks
    }

    /// Returns the operation registry.
    pub fn operations(&self) -> &OperationRegistry {
        &self.ops
    }

    // ── Fetch flow ───────────────────────────────────────────────

    /// Runs every named fetch concurrently, bracketed by the
    /// loading/error hooks.
    ///
    /// Every operation name is resolved before any operation launches,
    /// so an unknown name means nothing runs. All results are awaited;
    /// on failure the first failing operation in name order becomes the
    /// flow's error, surfaced through `set_error` and returned.
    /// Additional failures are logged but not re-reported.
    ///
    /// An empty [`FetchSpec`] still runs the bracket and succeeds.
    pub async fn fetch_all(&self, spec: &FetchSpec) -> EngineResult<()> {
        self.hooks.clear_error();
        self.hooks.start_loading();

        let result = self.run_fetches(spec).await;
        if let Err(err) = &result {
            self.hooks.set_error(err);
        }
        self.hooks.end_loading();
        result
    }

    /// Runs a section's declared fetches.
    pub async fn fetch_section(&self, section: &Section) -> EngineResult<()> {
        self.fetch_all(&section.fetch).await
    }

    async fn run_fetches(&self, spec: &FetchSpec) -> EngineResult<()> {
        // Resolve every name up front so an unknown one launches nothing.
        let mut resolved: Vec<(&str, Arc<dyn FetchOperation>, &[Value])> =
            Vec::with_capacity(spec.len());
        for (name, args) in spec.iter() {
            let op = self
                .ops
                .fetch(name)
                .ok_or_else(|| EngineError::UnknownOperation(name.clone()))?;
            resolved.push((name.as_str(), op, args));
        }

        debug!("Launching {} fetch operations", resolved.len());

        let results = join_all(resolved.into_iter().map(|(name, op, args)| async move {
            op.call(args).await.map_err(|source| EngineError::Fetch {
                name: name.to_string(),
                source,
            })
        }))
        .await;

        // Results come back in spec (sorted name) order; the first
        // failure is the flow's error.
        let mut flow_error = None;
        for result in results {
            if let Err(err) = result {
                if flow_error.is_none() {
                    flow_error = Some(err);
                } else {
                    warn!("Additional fetch failure: {}", err);
                }
            }
        }

        match flow_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    // ── Update flow ──────────────────────────────────────────────

    /// Merges the patch into the entity and persists the result through
    /// the named update operation, bracketed by the loading/error hooks.
    ///
    /// On success the form lifecycle hooks fire (`end_editing`, then
    /// `reset_form`); on failure they do not, so editing state survives
    /// for a retry. A patch with no touched fields still persists; the
    /// merged entity simply equals the original.
    pub async fn update_entity(
        &self,
        op_name: &str,
        entity: &Entity,
        patch: &FieldPatch,
    ) -> EngineResult<()> {
        self.run_update_flow(Some(op_name), entity, patch).await
    }

    /// Persists an edit through the section's declared update
    /// operation. A section without one fails with `NoUpdateOperation`
    /// through the normal failure path.
    pub async fn update_section(
        &self,
        section: &Section,
        entity: &Entity,
        patch: &FieldPatch,
    ) -> EngineResult<()> {
        self.run_update_flow(section.update_op(), entity, patch).await
    }

    async fn run_update_flow(
        &self,
        op_name: Option<&str>,
        entity: &Entity,
        patch: &FieldPatch,
    ) -> EngineResult<()> {
        self.hooks.clear_error();
        self.hooks.start_loading();

        let result = match op_name {
            Some(name) => self.run_update(name, entity, patch).await,
            None => Err(EngineError::NoUpdateOperation),
        };

        match &result {
            Ok(()) => {
                self.hooks.end_editing();
                self.hooks.reset_form();
            }
            Err(err) => self.hooks.set_error(err),
        }
        self.hooks.end_loading();
        result
    }

    async fn run_update(
        &self,
        op_name: &str,
        entity: &Entity,
        patch: &FieldPatch,
    ) -> EngineResult<()> {
        let op = self
            .ops
            .update(op_name)
            .ok_or_else(|| EngineError::UnknownOperation(op_name.to_string()))?;

        let merged = entity.merged(patch);
        debug!(
            "Updating entity via '{}' ({} touched fields)",
            op_name,
            patch.touched().count()
        );

        op.update(&merged)
            .await
            .map_err(|source| EngineError::Update {
                name: op_name.to_string(),
                source,
            })
    }

    // ── Bulk update flow ─────────────────────────────────────────

    /// Applies per-entity patches across a collection, invoking the
    /// `update_field` hook once per entity that actually changed.
    ///
    /// Keys walk in sorted order. A patch with no touched fields is
    /// skipped without any hook call; every hook call receives the
    /// fully merged entity, never a partial diff. The first failure
    /// (missing entity or failing hook) stops the walk and propagates;
    /// updates already issued stand.
    ///
    /// No loading/error bracketing happens here; the caller's
    /// edit-submit flow owns that.
    pub async fn update_fields(
        &self,
        bulk: &BulkPatch,
        entities: &EntityMap,
    ) -> EngineResult<()> {
        for (key, patch) in bulk.iter() {
            if !patch.has_changes() {
                debug!("Skipping '{}': no touched fields", key);
                continue;
            }

            let current = entities
                .get(key)
                .ok_or_else(|| EngineError::MissingEntity(key.clone()))?;

            let merged = current.merged(patch);
            self.hooks
                .update_field(merged)
                .await
                .map_err(|source| EngineError::FieldUpdate {
                    key: key.clone(),
                    source,
                })?;
        }
        Ok(())
    }
}
