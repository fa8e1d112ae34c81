//! Asset reconciliation
//!
//! Pure functions that turn assessment responses and server listings into a
//! single deduplicated, id-sorted asset collection. Nothing here holds state:
//! records go in by value and come out by value.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDateTime};
use shared::{AssetAssessment, AssetStatus, RiskLevel};

use crate::types::AssetRecord;

/// Summary shown for assets the server knows about but never assessed
pub const NO_PREDICTION_SUMMARY: &str = "No prediction yet";

const NAIVE_TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Merges asset records from assessments, server listings and local state
pub struct AssetReconciler;

impl AssetReconciler {
    /// Map raw assessment entries to asset records, one per asset id.
    ///
    /// When an id appears more than once the entry with the latest reading
    /// timestamp wins. If either timestamp cannot be parsed, or both are
    /// equal, the entry later in the input wins.
    pub fn from_assessments(assessments: Vec<AssetAssessment>) -> Vec<AssetRecord> {
        let mut latest: BTreeMap<String, AssetAssessment> = BTreeMap::new();

        for assessment in assessments {
            let superseded = latest
                .get(&assessment.asset_id)
                .map(|current| Self::is_older(&assessment, current))
                .unwrap_or(false);
            if !superseded {
                latest.insert(assessment.asset_id.clone(), assessment);
            }
        }

        latest.into_values().map(Self::record_from_assessment).collect()
    }

    /// Overlay a partial server listing onto existing records.
    ///
    /// Records absent from the listing are kept as they are; listed ids with no
    /// local record get a placeholder. Sensor fields are never taken from the
    /// listing. The result is sorted by asset id and `merge(merge(a, b), b)`
    /// equals `merge(a, b)`.
    pub fn merge(existing: Vec<AssetRecord>, listing: Vec<AssetStatus>) -> Vec<AssetRecord> {
        let mut by_id: BTreeMap<String, AssetRecord> = existing
            .into_iter()
            .map(|record| (record.asset_id.clone(), record))
            .collect();

        for status in listing {
            let record = by_id
                .entry(status.asset_id.clone())
                .or_insert_with(|| Self::placeholder(&status.asset_id));
            Self::overlay(record, &status);
        }

        by_id.into_values().collect()
    }

    /// Derived efficiency score for a failure probability
    pub fn efficiency(failure_probability: f64) -> f64 {
        let p = Self::sanitize_probability(failure_probability);
        ((1.0 - p) * 100.0).round().clamp(0.0, 100.0)
    }

    /// One-line prediction summary for a failure probability
    pub fn prediction_summary(failure_probability: f64) -> String {
        let p = Self::sanitize_probability(failure_probability);
        format!("{}% failure probability", (p * 100.0).round() as i64)
    }

    /// Operator-facing name for an asset id (`PUMP_003` -> `Pump 003`)
    pub fn display_name(asset_id: &str) -> String {
        let words: Vec<String> = asset_id
            .split(['_', '-'])
            .filter(|word| !word.is_empty())
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                    None => String::new(),
                }
            })
            .collect();

        if words.is_empty() {
            asset_id.to_string()
        } else {
            words.join(" ")
        }
    }

    /// Parse a reading timestamp as sent by the service.
    ///
    /// Offset-qualified timestamps are normalised to UTC; naive ones are taken as-is.
    pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
        let raw = raw.trim();
        if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
            return Some(with_offset.naive_utc());
        }
        NAIVE_TIMESTAMP_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
    }

    fn is_older(candidate: &AssetAssessment, current: &AssetAssessment) -> bool {
        match (
            Self::parse_timestamp(&candidate.timestamp),
            Self::parse_timestamp(&current.timestamp),
        ) {
            (Some(candidate_ts), Some(current_ts)) => candidate_ts.cmp(&current_ts) == Ordering::Less,
            _ => false,
        }
    }

    fn record_from_assessment(assessment: AssetAssessment) -> AssetRecord {
        AssetRecord {
            display_name: Self::display_name(&assessment.asset_id),
            risk_level: assessment.risk_level,
            temperature: assessment.temperature,
            vibration: assessment.vibration,
            derived_efficiency: Self::efficiency(assessment.failure_probability),
            last_reading_timestamp: Some(assessment.timestamp),
            prediction_summary: Self::prediction_summary(assessment.failure_probability),
            recommended_action: assessment.risk_level.recommended_action().to_string(),
            asset_id: assessment.asset_id,
        }
    }

    fn placeholder(asset_id: &str) -> AssetRecord {
        AssetRecord {
            asset_id: asset_id.to_string(),
            display_name: Self::display_name(asset_id),
            risk_level: RiskLevel::Normal,
            temperature: 0.0,
            vibration: 0.0,
            derived_efficiency: Self::efficiency(0.0),
            last_reading_timestamp: None,
            prediction_summary: NO_PREDICTION_SUMMARY.to_string(),
            recommended_action: RiskLevel::Normal.recommended_action().to_string(),
        }
    }

    fn overlay(record: &mut AssetRecord, status: &AssetStatus) {
        if let Some(risk_level) = status.risk_level {
            record.risk_level = risk_level;
            record.recommended_action = risk_level.recommended_action().to_string();
        }
        if let Some(probability) = status.failure_probability {
            record.derived_efficiency = Self::efficiency(probability);
            record.prediction_summary = Self::prediction_summary(probability);
        }
        if let Some(timestamp) = &status.timestamp {
            record.last_reading_timestamp = Some(timestamp.clone());
        }
    }

    // NaN counts as "no risk observed"
    fn sanitize_probability(p: f64) -> f64 {
        if p.is_nan() {
            0.0
        } else {
            p.clamp(0.0, 1.0)
        }
    }
}
