//! Core types shared between the workflow engine and its callers

pub mod component;
pub mod phase;
pub mod risk;

pub use component::Component;
pub use phase::WorkflowPhase;
pub use risk::RiskLevel;
