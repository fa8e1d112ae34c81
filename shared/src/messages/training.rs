//! `POST /train` response

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Response returned after a successful training run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainResponse {
    /// Identifier of the trained model artifact
    pub model_id: String,
    /// Number of rows used for training
    pub rows_used: u64,
    /// Number of unique assets in the training dataset
    pub assets: u64,
    /// Share of rows labelled as failures
    pub positive_rate: f64,
    #[serde(default)]
    pub metrics: HashMap<String, f64>,
    #[serde(default)]
    pub model_path: Option<String>,
}
