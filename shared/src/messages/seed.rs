//! `POST /seed-demo-data` response

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedResponse {
    pub message: String,
    pub predictions_added: u64,
}
