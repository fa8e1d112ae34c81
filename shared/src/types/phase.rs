//! Workflow phase ordering

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::SharedError;

/// Discrete stage of the upload -> train -> assess workflow.
///
/// Variants are declared in workflow order so the derived `Ord` matches
/// the numeric representation.
/// Serialised as its integer value (0-3).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum WorkflowPhase {
    #[default]
    Idle = 0,
    DataStaged = 1,
    ModelTrained = 2,
    AssessmentComplete = 3,
}

impl WorkflowPhase {
    pub const ALL: [WorkflowPhase; 4] = [
        WorkflowPhase::Idle,
        WorkflowPhase::DataStaged,
        WorkflowPhase::ModelTrained,
        WorkflowPhase::AssessmentComplete,
    ];

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// The phase immediately after this one, if any
    pub fn next(self) -> Option<WorkflowPhase> {
        match self {
            WorkflowPhase::Idle => Some(WorkflowPhase::DataStaged),
            WorkflowPhase::DataStaged => Some(WorkflowPhase::ModelTrained),
            WorkflowPhase::ModelTrained => Some(WorkflowPhase::AssessmentComplete),
            WorkflowPhase::AssessmentComplete => None,
        }
    }

    /// Whether reaching this phase requires a call to the remote service
    pub fn requires_remote_call(self) -> bool {
        matches!(self, WorkflowPhase::ModelTrained | WorkflowPhase::AssessmentComplete)
    }
}

impl TryFrom<u8> for WorkflowPhase {
    type Error = SharedError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        WorkflowPhase::ALL
            .get(value as usize)
            .copied()
            .ok_or(SharedError::InvalidPhase { value })
    }
}

impl From<WorkflowPhase> for u8 {
    fn from(phase: WorkflowPhase) -> Self {
        phase.as_u8()
    }
}

impl fmt::Display for WorkflowPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkflowPhase::Idle => write!(f, "idle"),
            WorkflowPhase::DataStaged => write!(f, "data staged"),
            WorkflowPhase::ModelTrained => write!(f, "model trained"),
            WorkflowPhase::AssessmentComplete => write!(f, "assessment complete"),
        }
    }
}
