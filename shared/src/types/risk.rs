//! Categorical failure risk attached to an asset

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::SharedError;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    #[default]
    Normal,
    Warning,
    Critical,
}

impl RiskLevel {
    /// Fixed recommendation shown next to an asset at this risk level
    pub fn recommended_action(self) -> &'static str {
        match self {
            RiskLevel::Critical => "Urgent inspection recommended",
            RiskLevel::Warning => "Schedule maintenance soon",
            RiskLevel::Normal => "Continue monitoring",
        }
    }

    /// Operator-facing badge label
    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Critical => "High Risk",
            RiskLevel::Warning => "Attention",
            RiskLevel::Normal => "Normal",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            RiskLevel::Normal => "normal",
            RiskLevel::Warning => "warning",
            RiskLevel::Critical => "critical",
        })
    }
}

impl FromStr for RiskLevel {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "normal" => Ok(RiskLevel::Normal),
            "warning" => Ok(RiskLevel::Warning),
            "critical" => Ok(RiskLevel::Critical),
            _ => Err(SharedError::InvalidRiskLevel { input: s.to_string() }),
        }
    }
}
