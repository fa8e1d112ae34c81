//! Test helpers, store builders and fake services

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use shared::{AssetDetailResponse, AssetStatus, PredictResponse, SeedResponse, TrainResponse};
use tokio::sync::Notify;
use tokio::time::timeout;
use workflow::*;

use super::fixtures::TestFixtures;

/// Upper bound for anything a test awaits
pub const TEST_TIMEOUT: Duration = Duration::from_secs(2);

/// Builder for stores over `MockPredictionService` with sensible defaults
pub struct StoreBuilder {
    service: MockPredictionService,
}

impl StoreBuilder {
    /// Training and prediction succeed with fixture data.
    ///
    /// Mockall matches expectations first-in first-out, so listings are
    /// configured with `with_listing`/`with_listing_error` rather than a default.
    pub fn new() -> Self {
        let mut service = MockPredictionService::new();
        service
            .expect_train()
            .returning(|_| Ok(TestFixtures::train_response()))
            .times(0..);
        service
            .expect_predict()
            .returning(|_, _| Ok(TestFixtures::single_assessment()))
            .times(0..);
        Self { service }
    }

    /// Start from a mock with no expectations; unexpected calls panic
    pub fn strict() -> Self {
        Self {
            service: MockPredictionService::new(),
        }
    }

    /// Every refresh returns `listing`
    pub fn with_listing(mut self, listing: Vec<AssetStatus>) -> Self {
        self.service
            .expect_list_assets()
            .returning(move || Ok(listing.clone()))
            .times(0..);
        self
    }

    /// Every refresh fails with the given HTTP status
    pub fn with_listing_error(mut self, status: u16) -> Self {
        self.service
            .expect_list_assets()
            .returning(move || Err(WorkflowError::remote(RemoteOperation::ListAssets, Some(status), None)))
            .times(0..);
        self
    }

    pub fn service_mut(&mut self) -> &mut MockPredictionService {
        &mut self.service
    }

    pub fn build(self) -> WorkflowStore<MockPredictionService> {
        WorkflowStore::new(self.service)
    }
}

impl Default for StoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Common test operations
pub struct TestHelpers;

impl TestHelpers {
    /// Stage the fixture CSV and advance to `DataStaged`
    pub async fn stage<S: PredictionService>(store: &WorkflowStore<S>) {
        store.stage_input(TestFixtures::csv_input()).await;
        assert_eq!(
            store.advance(WorkflowPhase::DataStaged).await.unwrap(),
            WorkflowPhase::DataStaged
        );
    }

    /// Stage and train
    pub async fn train<S: PredictionService>(store: &WorkflowStore<S>) {
        Self::stage(store).await;
        assert_eq!(
            store.advance(WorkflowPhase::ModelTrained).await.unwrap(),
            WorkflowPhase::ModelTrained
        );
    }

    /// Stage, train and assess
    pub async fn assess<S: PredictionService>(store: &WorkflowStore<S>) {
        Self::train(store).await;
        assert_eq!(
            store.advance(WorkflowPhase::AssessmentComplete).await.unwrap(),
            WorkflowPhase::AssessmentComplete
        );
    }

    pub fn asset_ids(snapshot: &WorkflowSnapshot) -> Vec<&str> {
        snapshot.assets.iter().map(|a| a.asset_id.as_str()).collect()
    }

    pub fn assert_initial(snapshot: &WorkflowSnapshot) {
        assert_eq!(snapshot.phase, WorkflowPhase::Idle);
        assert!(snapshot.staged_input.is_none());
        assert!(snapshot.training.is_none());
        assert!(snapshot.assets.is_empty());
        assert!(snapshot.selected_asset_id.is_none());
        assert!(snapshot.in_flight.is_none());
    }

    /// Wait for a future, failing the test instead of hanging
    pub async fn with_timeout<T, F>(future: F) -> T
    where
        F: std::future::Future<Output = T>,
    {
        timeout(TEST_TIMEOUT, future).await.expect("timed out")
    }
}

/// Fake service whose calls block until the test opens the gate.
///
/// Used to interleave `reset`/`stage_input` with a request that is still in
/// flight. Each call signals `entered` before waiting on `gate`.
#[derive(Clone)]
pub struct GatedService {
    entered: Arc<Notify>,
    gate: Arc<Notify>,
    calls: Arc<AtomicUsize>,
    train_response: Arc<StdMutex<TrainResponse>>,
    predict_response: PredictResponse,
    listing: Vec<AssetStatus>,
}

impl GatedService {
    pub fn new() -> Self {
        Self {
            entered: Arc::new(Notify::new()),
            gate: Arc::new(Notify::new()),
            calls: Arc::new(AtomicUsize::new(0)),
            train_response: Arc::new(StdMutex::new(TestFixtures::train_response())),
            predict_response: TestFixtures::duplicate_assessments(),
            listing: Vec::new(),
        }
    }

    pub fn with_listing(mut self, listing: Vec<AssetStatus>) -> Self {
        self.listing = listing;
        self
    }

    /// Change what the next training call returns
    pub fn set_train_response(&self, response: TrainResponse) {
        *self.train_response.lock().unwrap() = response;
    }

    /// Resolves once a call has reached the service
    pub async fn wait_entered(&self) {
        TestHelpers::with_timeout(self.entered.notified()).await;
    }

    /// Let one blocked call complete
    pub fn release(&self) {
        self.gate.notify_one();
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn pass(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.entered.notify_one();
        self.gate.notified().await;
    }
}

#[async_trait::async_trait]
impl PredictionService for GatedService {
    async fn train(&self, _input: &UploadedInput) -> WorkflowResult<TrainResponse> {
        self.pass().await;
        Ok(self.train_response.lock().unwrap().clone())
    }

    async fn predict(&self, _input: &UploadedInput, _model_id: &str) -> WorkflowResult<PredictResponse> {
        self.pass().await;
        Ok(self.predict_response.clone())
    }

    async fn list_assets(&self) -> WorkflowResult<Vec<AssetStatus>> {
        self.pass().await;
        Ok(self.listing.clone())
    }

    async fn asset_detail(&self, asset_id: &str) -> WorkflowResult<AssetDetailResponse> {
        Ok(AssetDetailResponse {
            asset_id: asset_id.to_string(),
            latest: None,
            history: Vec::new(),
            metrics: None,
        })
    }

    async fn seed_demo_data(&self) -> WorkflowResult<SeedResponse> {
        Ok(SeedResponse {
            message: "seeded".to_string(),
            predictions_added: 0,
        })
    }
}
