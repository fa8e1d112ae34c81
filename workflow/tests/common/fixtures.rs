//! Test fixtures and sample payloads

use std::collections::HashMap;

use workflow::{RiskLevel, UploadedInput};
use shared::{AssetAssessment, AssetStatus, PredictResponse, TrainResponse};

/// Canned data for workflow tests
pub struct TestFixtures;

impl TestFixtures {
    pub const MODEL_ID: &'static str = "m1";
    pub const ROWS_USED: u64 = 1000;
    pub const ASSETS_DETECTED: u64 = 8;
    pub const POSITIVE_RATE: f64 = 0.12;

    pub const EARLIER: &'static str = "2024-03-01T08:00:00";
    pub const LATER: &'static str = "2024-03-01T09:30:00";

    pub fn csv_input() -> UploadedInput {
        UploadedInput::csv(
            "sensor_readings.csv",
            "timestamp,asset_id,temperature,vibration,pressure,current,label\n\
             2024-03-01T08:00:00,A1,71.2,3.1,101.3,12.0,0\n"
                .as_bytes()
                .to_vec(),
        )
    }

    pub fn train_response() -> TrainResponse {
        TrainResponse {
            model_id: Self::MODEL_ID.to_string(),
            rows_used: Self::ROWS_USED,
            assets: Self::ASSETS_DETECTED,
            positive_rate: Self::POSITIVE_RATE,
            metrics: HashMap::new(),
            model_path: None,
        }
    }

    pub fn train_response_with_id(model_id: &str) -> TrainResponse {
        TrainResponse {
            model_id: model_id.to_string(),
            ..Self::train_response()
        }
    }

    pub fn assessment(asset_id: &str, timestamp: &str, probability: f64, risk: RiskLevel) -> AssetAssessment {
        AssetAssessment {
            asset_id: asset_id.to_string(),
            timestamp: timestamp.to_string(),
            temperature: 70.0 + probability * 30.0,
            vibration: 2.0 + probability * 5.0,
            pressure: 101.0,
            current: 12.0,
            failure_probability: probability,
            risk_level: risk,
        }
    }

    /// Two readings for A1 (earlier normal, later critical) and one for A3
    pub fn duplicate_assessments() -> PredictResponse {
        PredictResponse {
            model_id: Self::MODEL_ID.to_string(),
            assessments: vec![
                Self::assessment("A1", Self::LATER, 0.91, RiskLevel::Critical),
                Self::assessment("A3", Self::EARLIER, 0.35, RiskLevel::Warning),
                Self::assessment("A1", Self::EARLIER, 0.05, RiskLevel::Normal),
            ],
        }
    }

    pub fn single_assessment() -> PredictResponse {
        PredictResponse {
            model_id: Self::MODEL_ID.to_string(),
            assessments: vec![Self::assessment("A1", Self::EARLIER, 0.2, RiskLevel::Normal)],
        }
    }

    pub fn bare_status(asset_id: &str) -> AssetStatus {
        AssetStatus::bare(asset_id)
    }

    pub fn scored_status(asset_id: &str, probability: f64, risk: RiskLevel) -> AssetStatus {
        AssetStatus {
            asset_id: asset_id.to_string(),
            risk_level: Some(risk),
            failure_probability: Some(probability),
            timestamp: Some(Self::LATER.to_string()),
            model_id: Some(Self::MODEL_ID.to_string()),
        }
    }
}
