//! Workflow store
//!
//! Owns the workflow state behind an async mutex, drives the prediction
//! service, and publishes a snapshot to subscribers after every committed
//! change. The mutex is never held across a service call, so `reset`,
//! `select_asset` and friends stay responsive while a request is in flight.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch, Mutex};
use tokio::time::{interval, MissedTickBehavior};

use shared::{component_debug, component_info, component_warn, logging, AssetDetailResponse, Component, WorkflowPhase};

use crate::core::{AssetReconciler, PendingRequest, WorkflowState};
use crate::error::{WorkflowError, WorkflowResult};
use crate::traits::PredictionService;
use crate::types::{AssetRecord, FleetSummary, TrainingOutcome, UploadedInput, WorkflowSnapshot};

/// Workflow state store with an injected prediction service
pub struct WorkflowStore<S>
where
    S: PredictionService + 'static,
{
    state: Arc<Mutex<WorkflowState>>,
    service: S,
    snapshots: watch::Sender<WorkflowSnapshot>,
}

impl<S> WorkflowStore<S>
where
    S: PredictionService + 'static,
{
    pub fn new(service: S) -> Self {
        let (snapshots, _) = watch::channel(WorkflowSnapshot::default());
        Self {
            state: Arc::new(Mutex::new(WorkflowState::new())),
            service,
            snapshots,
        }
    }

    /// Receive a snapshot after every committed change
    pub fn subscribe(&self) -> watch::Receiver<WorkflowSnapshot> {
        self.snapshots.subscribe()
    }

    /// Stage (or replace) the input file. Calls issued for a previous input are discarded on arrival.
    pub async fn stage_input(&self, input: UploadedInput) {
        let mut state = self.state.lock().await;
        component_info!(
            Component::Store,
            "📄 Staged {} ({} bytes, {})",
            input.file_name,
            input.payload.len(),
            input.content_type
        );
        state.stage_input(input);
        self.publish(&state);
    }

    /// Advance the workflow to `target`, calling the prediction service when the phase needs it.
    ///
    /// Returns the phase the store is in once the call settles. A result that
    /// arrives after a `reset` or `stage_input` is dropped and the current
    /// phase is returned unchanged.
    pub async fn advance(&self, target: WorkflowPhase) -> WorkflowResult<WorkflowPhase> {
        let pending = {
            let mut state = self.state.lock().await;
            let pending = state.begin_advance(target).map_err(|e| {
                component_debug!(Component::Store, "⛔ Advance to {} rejected: {}", target, e);
                e
            })?;
            self.publish(&state);
            pending
        };

        match &pending.request {
            PendingRequest::None => {
                component_info!(Component::Store, "➡️ Phase is now {}", pending.target);
                Ok(pending.target)
            }
            PendingRequest::Train { input } => {
                component_info!(Component::Store, "🧠 Training on {}", input.file_name);
                let response = self.service.train(input).await;

                let mut state = self.state.lock().await;
                let result = match response {
                    Ok(response) => {
                        let outcome = TrainingOutcome::from(response);
                        let model_id = outcome.model_id.clone();
                        state.commit_training(&pending, outcome).map(|phase| {
                            logging::log_success(Component::Store, &format!("Model {model_id} trained"));
                            phase
                        })
                    }
                    Err(e) => state.abandon(&pending).and(Err(e)),
                };
                self.settle(&state, result)
            }
            PendingRequest::Predict { input, model_id } => {
                component_info!(Component::Store, "🔮 Assessing {} with model {}", input.file_name, model_id);
                let response = self.service.predict(input, model_id).await;
                let records = response.map(|response| AssetReconciler::from_assessments(response.assessments));

                let mut state = self.state.lock().await;
                let result = match records {
                    Ok(records) => {
                        let count = records.len();
                        state.commit_assessment(&pending, records).map(|phase| {
                            logging::log_success(Component::Store, &format!("Assessment complete for {count} assets"));
                            phase
                        })
                    }
                    Err(e) => state.abandon(&pending).and(Err(e)),
                };
                self.settle(&state, result)
            }
        }
    }

    /// Merge the server's asset listing into the collection.
    ///
    /// Best effort: a no-op before an assessment has completed, and failures
    /// are logged rather than returned.
    pub async fn refresh_assets(&self) {
        let Some(generation) = self.state.lock().await.refresh_ticket() else {
            component_debug!(Component::Store, "⏭️ Skipping asset refresh before assessment");
            return;
        };

        let listing = match self.service.list_assets().await {
            Ok(listing) => listing,
            Err(e) => {
                component_warn!(Component::Store, error = %e, "⚠️ Asset refresh failed: {}", e.user_message());
                return;
            }
        };

        let mut state = self.state.lock().await;
        match state.apply_listing(generation, listing) {
            Ok(added) => {
                component_debug!(
                    Component::Store,
                    "🔄 Asset refresh merged, {} new, {} total",
                    added,
                    state.assets().len()
                );
                self.publish(&state);
            }
            Err(e) => {
                component_debug!(Component::Store, "🗑️ Dropping asset listing: {}", e);
            }
        }
    }

    /// Refresh assets every `period` until `shutdown` fires or its sender is dropped
    pub async fn run_refresh_loop(&self, period: Duration, mut shutdown: mpsc::Receiver<()>) {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        logging::log_startup(Component::Store, &format!("asset refresh every {period:?}"));

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.refresh_assets().await;
                }
                _ = shutdown.recv() => {
                    logging::log_shutdown(Component::Store, "asset refresh stopped");
                    break;
                }
            }
        }
    }

    pub async fn select_asset(&self, asset_id: impl Into<String>) {
        let mut state = self.state.lock().await;
        state.select_asset(asset_id);
        self.publish(&state);
    }

    pub async fn clear_selection(&self) {
        let mut state = self.state.lock().await;
        state.clear_selection();
        self.publish(&state);
    }

    /// Return to `Idle`, dropping input, model, assets and selection
    pub async fn reset(&self) {
        let mut state = self.state.lock().await;
        state.reset();
        component_info!(Component::Store, "🔁 Workflow reset");
        self.publish(&state);
    }

    /// Fetch history for one asset. Does not touch store state.
    pub async fn asset_detail(&self, asset_id: &str) -> WorkflowResult<AssetDetailResponse> {
        self.service.asset_detail(asset_id).await
    }

    // State access methods
    pub async fn snapshot(&self) -> WorkflowSnapshot {
        self.state.lock().await.snapshot()
    }

    pub async fn phase(&self) -> WorkflowPhase {
        self.state.lock().await.phase()
    }

    pub async fn assets(&self) -> Vec<AssetRecord> {
        self.state.lock().await.assets().to_vec()
    }

    pub async fn training_outcome(&self) -> Option<TrainingOutcome> {
        self.state.lock().await.training().cloned()
    }

    pub async fn selected_asset_id(&self) -> Option<String> {
        self.state.lock().await.selected_asset_id().map(str::to_string)
    }

    pub async fn selected_asset(&self) -> Option<AssetRecord> {
        let state = self.state.lock().await;
        let selected = state.selected_asset_id()?;
        state.assets().iter().find(|asset| asset.asset_id == selected).cloned()
    }

    pub async fn fleet_summary(&self) -> FleetSummary {
        FleetSummary::from_assets(self.state.lock().await.assets())
    }

    pub async fn is_processing(&self) -> bool {
        self.state.lock().await.in_flight().is_some()
    }

    fn publish(&self, state: &WorkflowState) {
        self.snapshots.send_replace(state.snapshot());
    }

    /// Publish and map a stale completion to the current phase
    fn settle(&self, state: &WorkflowState, result: WorkflowResult<WorkflowPhase>) -> WorkflowResult<WorkflowPhase> {
        self.publish(state);
        match result {
            Err(WorkflowError::StaleResult { issued, current }) => {
                component_debug!(
                    Component::Store,
                    "🗑️ Discarding result issued at generation {} (now {})",
                    issued,
                    current
                );
                Ok(state.phase())
            }
            Err(e) => {
                logging::log_error(Component::Store, "Workflow advance", &e);
                Err(e)
            }
            ok => ok,
        }
    }
}
