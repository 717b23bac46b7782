use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{CoachError, Result};
use crate::models::Session;

/// The trader's own constraints, read-only for the duration of an evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleSet {
    // Risk
    pub max_risk_per_trade: f64,
    pub max_position_size: u32,
    #[serde(rename = "minPlannedRR")]
    pub min_planned_rr: f64,

    // Frequency
    pub max_trades_per_day: u32,
    pub max_losing_trades_per_day: u32,

    // Execution
    pub allowed_sessions: Vec<Session>,
    pub required_confluences: Vec<String>,

    // Behavior
    pub cooldown_minutes_after_loss: u32,
    pub disallowed_emotions: Vec<String>,
}

impl RuleSet {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| CoachError::io(path, e))?;
        let rules: RuleSet = serde_json::from_str(&content)?;
        rules.validate()?;
        Ok(rules)
    }

    /// Rejects values the evaluator cannot meaningfully compare against.
    pub fn validate(&self) -> Result<()> {
        if !self.min_planned_rr.is_finite() || self.min_planned_rr < 0.0 {
            return Err(CoachError::InvalidConfig(format!(
                "minPlannedRR must be a finite, non-negative number (got {})",
                self.min_planned_rr
            )));
        }
        if !self.max_risk_per_trade.is_finite() {
            return Err(CoachError::InvalidConfig(
                "maxRiskPerTrade must be finite".to_string(),
            ));
        }
        Ok(())
    }
}
