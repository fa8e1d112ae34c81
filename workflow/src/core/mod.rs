//! Core workflow logic
//!
//! Pure state transitions and asset reconciliation with no I/O dependencies.

pub mod reconciler;
pub mod state;

pub use reconciler::AssetReconciler;
pub use state::{PendingAdvance, PendingRequest, WorkflowState};
