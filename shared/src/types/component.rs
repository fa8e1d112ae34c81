//! Component identifiers attached to every log event

use std::fmt;

use serde::{Deserialize, Serialize};

/// Logical component emitting a trace event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Component {
    /// Workflow state store
    Store,
    /// HTTP client for the training/prediction service
    Client,
    /// Command line composition root
    Cli,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::Store => write!(f, "store"),
            Component::Client => write!(f, "client"),
            Component::Cli => write!(f, "cli"),
        }
    }
}
