//! Domain types owned by the workflow store

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use shared::{RiskLevel, TrainResponse, WorkflowPhase};

use crate::error::WorkflowResult;

pub const CSV_CONTENT_TYPE: &str = "text/csv";
pub const BINARY_CONTENT_TYPE: &str = "application/octet-stream";

/// Sensor data file staged for training and assessment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedInput {
    pub file_name: String,
    pub content_type: String,
    pub payload: Vec<u8>,
}

impl UploadedInput {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, payload: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            payload,
        }
    }

    /// Stage a CSV payload held in memory
    pub fn csv(file_name: impl Into<String>, payload: impl Into<Vec<u8>>) -> Self {
        Self::new(file_name, CSV_CONTENT_TYPE, payload.into())
    }

    /// Read a file from disk, tagging `.csv` files as `text/csv`
    pub async fn from_path(path: impl AsRef<Path>) -> WorkflowResult<Self> {
        let path = path.as_ref();
        let payload = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let is_csv = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("csv"))
            .unwrap_or(false);
        let content_type = if is_csv { CSV_CONTENT_TYPE } else { BINARY_CONTENT_TYPE };

        Ok(Self::new(file_name, content_type, payload))
    }

    pub fn is_csv(&self) -> bool {
        self.content_type == CSV_CONTENT_TYPE
    }

    pub fn info(&self) -> StagedInputInfo {
        StagedInputInfo {
            file_name: self.file_name.clone(),
            content_type: self.content_type.clone(),
            size_bytes: self.payload.len(),
        }
    }
}

/// Metadata about the staged input, without the payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagedInputInfo {
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: usize,
}

/// Result of a successful training call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingOutcome {
    pub model_id: String,
    pub rows_used: u64,
    pub assets_detected: u64,
    pub positive_rate: f64,
    pub metrics: HashMap<String, f64>,
    pub model_path: Option<String>,
}

impl From<TrainResponse> for TrainingOutcome {
    fn from(response: TrainResponse) -> Self {
        Self {
            model_id: response.model_id,
            rows_used: response.rows_used,
            assets_detected: response.assets,
            positive_rate: response.positive_rate.clamp(0.0, 1.0),
            metrics: response.metrics,
            model_path: response.model_path,
        }
    }
}

/// Reconciled per-asset view shown in the fleet table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetRecord {
    pub asset_id: String,
    pub display_name: String,
    pub risk_level: RiskLevel,
    pub temperature: f64,
    pub vibration: f64,
    /// Derived health score in [0, 100]
    pub derived_efficiency: f64,
    pub last_reading_timestamp: Option<String>,
    pub prediction_summary: String,
    pub recommended_action: String,
}

/// Risk counts across the current asset collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetSummary {
    pub total: usize,
    pub normal: usize,
    pub warning: usize,
    pub critical: usize,
}

impl FleetSummary {
    pub fn from_assets(assets: &[AssetRecord]) -> Self {
        assets.iter().fold(Self::default(), |mut summary, asset| {
            summary.total += 1;
            match asset.risk_level {
                RiskLevel::Normal => summary.normal += 1,
                RiskLevel::Warning => summary.warning += 1,
                RiskLevel::Critical => summary.critical += 1,
            }
            summary
        })
    }
}

/// Immutable copy of the store state published to subscribers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowSnapshot {
    pub phase: WorkflowPhase,
    pub staged_input: Option<StagedInputInfo>,
    pub training: Option<TrainingOutcome>,
    pub assets: Vec<AssetRecord>,
    pub selected_asset_id: Option<String>,
    /// Target phase of the advance currently awaiting the service
    pub in_flight: Option<WorkflowPhase>,
}

impl WorkflowSnapshot {
    pub fn is_processing(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn fleet_summary(&self) -> FleetSummary {
        FleetSummary::from_assets(&self.assets)
    }

    pub fn selected_asset(&self) -> Option<&AssetRecord> {
        let selected = self.selected_asset_id.as_deref()?;
        self.assets.iter().find(|asset| asset.asset_id == selected)
    }
}
