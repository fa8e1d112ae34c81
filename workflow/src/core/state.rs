//! Workflow state management
//!
//! Pure state transitions for the upload -> train -> assess workflow that can
//! be tested without a service behind them. Remote calls are split in two:
//! `begin_advance` validates and hands back a `PendingAdvance` carrying the
//! generation it was issued at, and the matching `commit_*`/`abandon` call
//! only takes effect if no reset or re-stage happened in between.

use shared::{AssetStatus, WorkflowPhase};

use crate::core::reconciler::AssetReconciler;
use crate::error::{WorkflowError, WorkflowResult};
use crate::types::{AssetRecord, TrainingOutcome, UploadedInput, WorkflowSnapshot};

/// Core workflow state
#[derive(Debug, Default)]
pub struct WorkflowState {
    phase: WorkflowPhase,
    input: Option<UploadedInput>,
    training: Option<TrainingOutcome>,

    // Always deduplicated and sorted by asset id
    assets: Vec<AssetRecord>,
    selected_asset_id: Option<String>,

    // Bumped by reset, stage_input and every remote advance
    generation: u64,
    in_flight: Option<WorkflowPhase>,
}

/// Remote work required to complete an accepted advance
#[derive(Debug, Clone, PartialEq)]
pub enum PendingRequest {
    /// Nothing to send; the transition has already been applied
    None,
    Train { input: UploadedInput },
    Predict { input: UploadedInput, model_id: String },
}

/// Ticket for an accepted advance
#[derive(Debug, Clone, PartialEq)]
pub struct PendingAdvance {
    pub target: WorkflowPhase,
    pub generation: u64,
    pub request: PendingRequest,
}

impl WorkflowState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the staged input. Results of calls issued for the previous input are discarded.
    pub fn stage_input(&mut self, input: UploadedInput) {
        self.input = Some(input);
        self.generation += 1;
        self.in_flight = None;
    }

    /// Validate an advance to `target` and, for remote phases, mark it in flight.
    ///
    /// Rejections happen here, before any remote work: any advance while a
    /// remote call is in flight is `WorkflowBusy` (only `reset` and
    /// `stage_input` supersede it), a missing prerequisite is `InputMissing`,
    /// and skipping or regressing a phase is `InvalidTransition`.
    /// `DataStaged` needs no remote call and is applied immediately.
    pub fn begin_advance(&mut self, target: WorkflowPhase) -> WorkflowResult<PendingAdvance> {
        if let Some(in_flight) = self.in_flight {
            return Err(WorkflowError::WorkflowBusy { target, in_flight });
        }

        let request = match target {
            WorkflowPhase::Idle => {
                return Err(WorkflowError::InvalidTransition {
                    from: self.phase,
                    to: target,
                })
            }
            WorkflowPhase::DataStaged => {
                self.require_input()?;
                PendingRequest::None
            }
            WorkflowPhase::ModelTrained => PendingRequest::Train {
                input: self.require_input()?.clone(),
            },
            WorkflowPhase::AssessmentComplete => {
                let model_id = self
                    .training
                    .as_ref()
                    .map(|outcome| outcome.model_id.clone())
                    .ok_or_else(|| WorkflowError::input_missing("training outcome"))?;
                PendingRequest::Predict {
                    input: self.require_input()?.clone(),
                    model_id,
                }
            }
        };

        let reachable = target == self.phase || self.phase.next() == Some(target);
        if !reachable {
            return Err(WorkflowError::InvalidTransition {
                from: self.phase,
                to: target,
            });
        }

        if target.requires_remote_call() {
            self.generation += 1;
            self.in_flight = Some(target);
        } else {
            self.phase = target;
        }

        Ok(PendingAdvance {
            target,
            generation: self.generation,
            request,
        })
    }

    /// Install a training outcome for an in-flight `ModelTrained` advance
    pub fn commit_training(&mut self, pending: &PendingAdvance, outcome: TrainingOutcome) -> WorkflowResult<WorkflowPhase> {
        self.ensure_current(pending.generation)?;
        self.in_flight = None;
        self.training = Some(outcome);
        self.phase = WorkflowPhase::ModelTrained;
        Ok(self.phase)
    }

    /// Replace the asset collection with assessed records for an in-flight `AssessmentComplete` advance
    pub fn commit_assessment(&mut self, pending: &PendingAdvance, records: Vec<AssetRecord>) -> WorkflowResult<WorkflowPhase> {
        self.ensure_current(pending.generation)?;
        self.in_flight = None;
        // Route through the reconciler so the sort/dedup invariant holds on every write
        self.assets = AssetReconciler::merge(records, Vec::new());
        self.phase = WorkflowPhase::AssessmentComplete;
        Ok(self.phase)
    }

    /// Clear the in-flight marker after a failed remote call, leaving phase and data untouched
    pub fn abandon(&mut self, pending: &PendingAdvance) -> WorkflowResult<()> {
        self.ensure_current(pending.generation)?;
        self.in_flight = None;
        Ok(())
    }

    /// Generation to capture before fetching the asset listing, or `None` if a refresh is not allowed yet
    pub fn refresh_ticket(&self) -> Option<u64> {
        (self.phase >= WorkflowPhase::AssessmentComplete).then_some(self.generation)
    }

    /// Merge a server listing fetched at `generation` into the collection
    pub fn apply_listing(&mut self, generation: u64, listing: Vec<AssetStatus>) -> WorkflowResult<usize> {
        self.ensure_current(generation)?;
        if self.phase < WorkflowPhase::AssessmentComplete {
            return Ok(0);
        }
        let before = self.assets.len();
        self.assets = AssetReconciler::merge(std::mem::take(&mut self.assets), listing);
        Ok(self.assets.len() - before)
    }

    pub fn select_asset(&mut self, asset_id: impl Into<String>) {
        self.selected_asset_id = Some(asset_id.into());
    }

    pub fn clear_selection(&mut self) {
        self.selected_asset_id = None;
    }

    /// Return to the initial state. Pending remote results become stale.
    pub fn reset(&mut self) {
        *self = Self {
            generation: self.generation + 1,
            ..Self::default()
        };
    }

    pub fn snapshot(&self) -> WorkflowSnapshot {
        WorkflowSnapshot {
            phase: self.phase,
            staged_input: self.input.as_ref().map(UploadedInput::info),
            training: self.training.clone(),
            assets: self.assets.clone(),
            selected_asset_id: self.selected_asset_id.clone(),
            in_flight: self.in_flight,
        }
    }

    fn require_input(&self) -> WorkflowResult<&UploadedInput> {
        self.input
            .as_ref()
            .ok_or_else(|| WorkflowError::input_missing("staged input file"))
    }

    fn ensure_current(&self, generation: u64) -> WorkflowResult<()> {
        if generation == self.generation {
            Ok(())
        } else {
            Err(WorkflowError::StaleResult {
                issued: generation,
                current: self.generation,
            })
        }
    }

    // Accessors
    pub fn phase(&self) -> WorkflowPhase {
        self.phase
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn in_flight(&self) -> Option<WorkflowPhase> {
        self.in_flight
    }

    pub fn input(&self) -> Option<&UploadedInput> {
        self.input.as_ref()
    }

    pub fn training(&self) -> Option<&TrainingOutcome> {
        self.training.as_ref()
    }

    pub fn assets(&self) -> &[AssetRecord] {
        &self.assets
    }

    pub fn selected_asset_id(&self) -> Option<&str> {
        self.selected_asset_id.as_deref()
    }
}
