//! Fetch/update orchestration for FieldSync.
//!
//! Drives the three UI data-synchronization flows:
//! - **Fetch**: run a batch of named fetches concurrently behind one
//!   loading flag ([`SectionEngine::fetch_all`])
//! - **Update**: merge a form's edits into an entity and persist it
//!   ([`SectionEngine::update_entity`])
//! - **Bulk update**: apply per-entity patches across a collection
//!   ([`SectionEngine::update_fields`])
//!
//! # Architecture
//!
//! The engine owns no I/O and no state. Callers supply two
//! collaborators at construction:
//!
//! - **Operations**: named fetch/update implementations in an
//!   [`OperationRegistry`]
//! - **Hooks**: [`UiHooks`] lifecycle signals (loading flag, error
//!   slot, form lifecycle), all defaulted to no-ops
//!
//! Flows bracket the caller's operations with those hooks and report
//! failures both ways: through [`UiHooks::set_error`] and as the
//! returned [`EngineError`]. The engine spawns no tasks, so it runs on
//! any async runtime.
//!
//! # Example
//!
//! ```
//! use fieldsync_engine::{OperationRegistry, Section, SectionEngine};
//! use serde_json::json;
//!
//! let engine = SectionEngine::new(OperationRegistry::new());
//!
//! let section = Section::new()
//!     .with_fetch_op("load_entries", vec![json!(7)])
//!     .with_update("save_entry");
//!
//! assert_eq!(section.update_op(), Some("save_entry"));
//! assert_eq!(engine.operations().fetch_names().count(), 0);
//! ```

mod engine;
mod error;
mod hooks;
mod ops;
mod section;

pub use engine::SectionEngine;
pub use error::{EngineError, EngineResult, OperationError};
pub use hooks::{NullHooks, UiHooks};
pub use ops::{FetchOperation, OperationRegistry, UpdateOperation};
pub use section::{FetchSpec, Section};
