//! Trait definitions with mockall annotations for testing
//!
//! The store only talks to the training/prediction backend through
//! `PredictionService`, so tests can swap in `MockPredictionService`.

use shared::{AssetDetailResponse, AssetStatus, PredictResponse, SeedResponse, TrainResponse};

use crate::error::WorkflowResult;
use crate::types::UploadedInput;

/// Remote training and prediction backend
///
/// Every method is a single request; failures surface as
/// `WorkflowError::RemoteCallFailed` carrying the server's message when it sent one.
#[mockall::automock]
#[async_trait::async_trait]
pub trait PredictionService: Send + Sync {
    /// Train a model on the uploaded sensor data
    async fn train(&self, input: &UploadedInput) -> WorkflowResult<TrainResponse>;

    /// Score every row of the uploaded data with a trained model
    ///
    /// # Parameters
    /// - `input`: the same data file that was used for training
    /// - `model_id`: identifier returned by `train`
    async fn predict(&self, input: &UploadedInput, model_id: &str) -> WorkflowResult<PredictResponse>;

    /// Latest known status of every asset the server tracks
    async fn list_assets(&self) -> WorkflowResult<Vec<AssetStatus>>;

    /// History and latest metrics for one asset
    async fn asset_detail(&self, asset_id: &str) -> WorkflowResult<AssetDetailResponse>;

    /// Ask the server to populate itself with demo predictions
    async fn seed_demo_data(&self) -> WorkflowResult<SeedResponse>;
}
