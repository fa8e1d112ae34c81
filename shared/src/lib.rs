//! Shared types for the predictive maintenance workflow
//!
//! Contains the wire contract with the training/prediction service, the
//! workflow and risk enumerations, and the logging setup used by every binary.

pub mod errors;
pub mod logging;
pub mod messages;
pub mod types;

pub use errors::*;
pub use types::*;

// Re-export the service payloads
pub use messages::{
    // Training
    TrainResponse,

    // Prediction
    AssetAssessment, PredictResponse,

    // Asset listing and detail
    AssetDetailResponse, AssetStatus, AssetsResponse, HistoryPoint, MetricsSnapshot, PredictionSummary,

    // Development helpers
    SeedResponse,

    // Error bodies
    ErrorBody,
};
