//! `POST /predict` response

use serde::{Deserialize, Serialize};

use crate::types::RiskLevel;

/// Risk assessment for the latest reading of one asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetAssessment {
    pub asset_id: String,
    /// Reading timestamp as sent by the service (ISO 8601, offset optional)
    pub timestamp: String,

    pub temperature: f64,
    pub vibration: f64,
    pub pressure: f64,
    pub current: f64,

    /// Probability of failure in [0, 1]
    pub failure_probability: f64,
    pub risk_level: RiskLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    pub model_id: String,
    pub assessments: Vec<AssetAssessment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predict_response_parsing() {
        let json = r#"{
            "model_id": "m1",
            "assessments": [{
                "asset_id": "PUMP_001",
                "timestamp": "2024-03-01T10:00:00",
                "temperature": 71.5,
                "vibration": 4.2,
                "pressure": 101.3,
                "current": 12.0,
                "failure_probability": 0.83,
                "risk_level": "critical"
            }]
        }"#;
        let response: PredictResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.model_id, "m1");
        assert_eq!(response.assessments.len(), 1);
        assert_eq!(response.assessments[0].risk_level, RiskLevel::Critical);
        assert_eq!(response.assessments[0].timestamp, "2024-03-01T10:00:00");
    }

    #[test]
    fn test_unknown_risk_level_is_rejected() {
        let json = r#"{
            "asset_id": "PUMP_001", "timestamp": "2024-03-01T10:00:00",
            "temperature": 1.0, "vibration": 1.0, "pressure": 1.0, "current": 1.0,
            "failure_probability": 0.1, "risk_level": "severe"
        }"#;
        assert!(serde_json::from_str::<AssetAssessment>(json).is_err());
    }
}
