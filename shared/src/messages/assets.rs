//! `GET /assets` and `GET /assets/{id}` responses

use serde::{Deserialize, Serialize};

use crate::types::RiskLevel;

/// Partial status entry from the server's asset listing.
///
/// Every field besides the id is optional: assets that were seen in training
/// data but never assessed come back with only their id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetStatus {
    pub asset_id: String,
    #[serde(default)]
    pub risk_level: Option<RiskLevel>,
    #[serde(default)]
    pub failure_probability: Option<f64>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub model_id: Option<String>,
}

impl AssetStatus {
    /// Bare listing entry carrying only an id
    pub fn bare(asset_id: impl Into<String>) -> Self {
        Self {
            asset_id: asset_id.into(),
            risk_level: None,
            failure_probability: None,
            timestamp: None,
            model_id: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetsResponse {
    pub assets: Vec<AssetStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionSummary {
    pub model_id: String,
    pub timestamp: String,
    pub risk_level: RiskLevel,
    pub failure_probability: f64,
}

/// One past prediction in an asset's history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub model_id: String,
    pub timestamp: String,
    pub risk_level: RiskLevel,
    pub failure_probability: f64,
}

/// Current sensor readings for an asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub temperature: f64,
    pub vibration: f64,
    pub pressure: f64,
    pub current: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetDetailResponse {
    pub asset_id: String,
    #[serde(default)]
    pub latest: Option<PredictionSummary>,
    /// Bounded history, newest first (the service caps it at 200 points)
    #[serde(default)]
    pub history: Vec<HistoryPoint>,
    #[serde(default)]
    pub metrics: Option<MetricsSnapshot>,
}
