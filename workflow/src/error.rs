//! Workflow-specific error types

use std::fmt;

use shared::{SharedError, WorkflowPhase};
use thiserror::Error;

/// Remote call issued to the training/prediction service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteOperation {
    Train,
    Predict,
    ListAssets,
    AssetDetail,
    SeedDemoData,
}

impl fmt::Display for RemoteOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteOperation::Train => write!(f, "Training"),
            RemoteOperation::Predict => write!(f, "Prediction"),
            RemoteOperation::ListAssets => write!(f, "Asset listing"),
            RemoteOperation::AssetDetail => write!(f, "Asset detail"),
            RemoteOperation::SeedDemoData => write!(f, "Demo data seeding"),
        }
    }
}

#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("Missing prerequisite: {what}")]
    InputMissing { what: String },

    #[error("Workflow busy: cannot advance to {target} while {in_flight} is in flight")]
    WorkflowBusy {
        target: WorkflowPhase,
        in_flight: WorkflowPhase,
    },

    #[error("Invalid transition from {from} to {to}")]
    InvalidTransition { from: WorkflowPhase, to: WorkflowPhase },

    #[error("{operation} failed: {}", .message.as_deref().unwrap_or("no details from server"))]
    RemoteCallFailed {
        operation: RemoteOperation,
        status: Option<u16>,
        message: Option<String>,
    },

    #[error("Stale result discarded: issued at generation {issued}, store is at {current}")]
    StaleResult { issued: u64, current: u64 },

    #[error("Configuration error: {field}")]
    ConfigurationError { field: String },

    #[error("Shared component error: {0}")]
    Shared(#[from] SharedError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl WorkflowError {
    pub fn input_missing(what: impl Into<String>) -> Self {
        Self::InputMissing { what: what.into() }
    }

    pub fn config(field: impl Into<String>) -> Self {
        Self::ConfigurationError { field: field.into() }
    }

    pub fn remote(operation: RemoteOperation, status: Option<u16>, message: Option<String>) -> Self {
        Self::RemoteCallFailed {
            operation,
            status,
            message,
        }
    }

    /// Message suitable for showing to the operator.
    ///
    /// Remote failures surface the server's own message when it sent one and
    /// fall back to a generic "<operation> failed".
    pub fn user_message(&self) -> String {
        match self {
            Self::RemoteCallFailed {
                operation,
                message: Some(message),
                ..
            } => format!("{operation} failed: {message}"),
            Self::RemoteCallFailed { operation, .. } => format!("{operation} failed"),
            other => other.to_string(),
        }
    }
}

pub type WorkflowResult<T> = Result<T, WorkflowError>;
