//! Predictive-maintenance workflow engine
//!
//! Walks an operator through upload -> train -> assess against a remote
//! prediction service and reconciles the results into one deduplicated view
//! of the fleet. The store is the single owner of workflow state; everything
//! it talks to is injected through the traits in [`traits`].

pub mod core;
pub mod error;
pub mod services;
pub mod store;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use core::{AssetReconciler, WorkflowState};
pub use error::{RemoteOperation, WorkflowError, WorkflowResult};
pub use services::{HttpPredictionService, ServiceConfig};
pub use store::WorkflowStore;
pub use traits::{MockPredictionService, PredictionService};
pub use types::{AssetRecord, FleetSummary, StagedInputInfo, TrainingOutcome, UploadedInput, WorkflowSnapshot};

pub use shared::{RiskLevel, WorkflowPhase};
