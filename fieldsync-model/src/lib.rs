//! Core data model for FieldSync.
//!
//! Defines the types the orchestration engine and its callers share:
//! - [`Entity`]: one persisted object as a named record of opaque JSON
//!   field values
//! - [`FieldEdit`]: a per-field edit, either `Untouched` or an explicit
//!   `Set` value (including explicitly empty ones)
//! - [`FieldPatch`]: one entity's proposed field changes, with the
//!   merge rule ([`Entity::merged`] / [`Entity::apply`])
//! - [`BulkPatch`]: per-entity patches across a collection, keyed by
//!   entity key
//! - [`EntityMap`]: the caller's current entities, keyed the same way
//!
//! Everything here is pure data: no I/O, no async, no logging. The
//! merge rule is deterministic and total. Untouched fields keep their
//! last-known-good value, touched fields (empty string and null
//! included) override it, and fields touched for the first time are
//! added.
//!
//! # Example
//!
//! ```
//! use fieldsync_model::{Entity, FieldPatch};
//! use serde_json::json;
//!
//! let entity = Entity::new()
//!     .with_field("name", "orders")
//!     .with_field("description", "All orders");
//!
//! let patch = FieldPatch::new()
//!     .with_value("description", "")
//!     .with_untouched("name");
//!
//! let merged = entity.merged(&patch);
//! assert_eq!(merged.get_str("name"), Some("orders"));
//! assert_eq!(merged.get_str("description"), Some(""));
//! ```

mod bulk;
mod entity;
mod patch;

pub use bulk::BulkPatch;
pub use entity::{Entity, EntityMap};
pub use patch::{FieldEdit, FieldPatch};
