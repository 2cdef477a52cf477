use crate::error::{EngineError, OperationError};
use async_trait::async_trait;
use fieldsync_model::Entity;

/// Optional trait for the UI signals the engine drives.
///
/// Every method has a no-op default, so callers implement only the
/// signals they observe: a loading spinner needs just `start_loading`
/// and `end_loading`, an error banner just `set_error` and
/// `clear_error`.
///
/// The engine guarantees per flow: `clear_error` and `start_loading`
/// fire exactly once before any operation runs, `end_loading` exactly
/// once after the flow settles, and `set_error` at most once, only on
/// failure, with the same error the flow returns.
#[async_trait]
pub trait UiHooks: Send + Sync {
    /// Clears any previously surfaced error at the start of a flow.
    fn clear_error(&self) {}

    /// Raises the shared loading flag.
    fn start_loading(&self) {}

    /// Drops the shared loading flag.
    fn end_loading(&self) {}

    /// Surfaces a flow failure. The flow also returns the same error,
    /// so callers that only watch this signal lose nothing.
    fn set_error(&self, error: &EngineError) {
        let _ = error;
    }

    /// Leaves edit mode after a successful single-entity update.
    fn end_editing(&self) {}

    /// Resets form state after a successful single-entity update.
    fn reset_form(&self) {}

    /// Persists one merged entity during a bulk update.
    /// Return `Err` to stop the walk.
    async fn update_field(&self, merged: Entity) -> Result<(), OperationError> {
        let _ = merged;
        Ok(())
    }
}

/// Hooks that observe nothing, for headless callers.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullHooks;

#[async_trait]
impl UiHooks for NullHooks {}
