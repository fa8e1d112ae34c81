//! Shared error types for the maintenance workflow

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SharedError {
    #[error("Invalid workflow phase: {value}")]
    InvalidPhase { value: u8 },

    #[error("Invalid risk level: {input}")]
    InvalidRiskLevel { input: String },
}

pub type SharedResult<T> = Result<T, SharedError>;
