//! Payloads exchanged with the training/prediction service
//!
//! This module organizes the HTTP contract by endpoint:
//! - `training`: `POST /train`
//! - `prediction`: `POST /predict`
//! - `assets`: `GET /assets` and `GET /assets/{id}`
//! - `seed`: `POST /seed-demo-data`

pub mod assets;
pub mod prediction;
pub mod seed;
pub mod training;

use serde::{Deserialize, Serialize};

pub use assets::{AssetDetailResponse, AssetStatus, AssetsResponse, HistoryPoint, MetricsSnapshot, PredictionSummary};
pub use prediction::{AssetAssessment, PredictResponse};
pub use seed::SeedResponse;
pub use training::TrainResponse;

/// Error body returned by the service on non-2xx responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: serde_json::Value,
}

impl ErrorBody {
    /// Human-readable message carried by the body, if any.
    ///
    /// `detail` is a plain string for application errors and a list of
    /// `{loc, msg, type}` objects for request validation errors.
    pub fn message(&self) -> Option<String> {
        match &self.detail {
            serde_json::Value::String(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
            serde_json::Value::Array(items) => items
                .iter()
                .find_map(|item| item.get("msg").and_then(|msg| msg.as_str()))
                .map(str::to_string),
            _ => None,
        }
    }
}
