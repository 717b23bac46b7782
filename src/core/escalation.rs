use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::core::evaluate::TradeEvaluationResult;
use crate::models::Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EscalationLevel {
    Info,
    Warning,
    Critical,
}

impl EscalationLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            EscalationLevel::Info => "INFO",
            EscalationLevel::Warning => "WARNING",
            EscalationLevel::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for EscalationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecommendedAction {
    Continue,
    SlowDown,
    StopTrading,
}

impl RecommendedAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendedAction::Continue => "CONTINUE",
            RecommendedAction::SlowDown => "SLOW_DOWN",
            RecommendedAction::StopTrading => "STOP_TRADING",
        }
    }
}

impl fmt::Display for RecommendedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EscalationResult {
    pub level: EscalationLevel,
    pub title: String,
    pub message: String,
    pub recommended_action: RecommendedAction,
}

impl EscalationResult {
    fn critical() -> Self {
        Self {
            level: EscalationLevel::Critical,
            title: "Stop Trading Immediately".to_string(),
            message: "You are repeatedly breaking high-impact rules. Continuing to trade right \
                      now is statistically likely to lead to account loss. The edge only exists \
                      when rules are followed."
                .to_string(),
            recommended_action: RecommendedAction::StopTrading,
        }
    }

    fn warning() -> Self {
        Self {
            level: EscalationLevel::Warning,
            title: "Rule Deviation Detected".to_string(),
            message: "You are deviating from your rules. Slow down, reduce size, and reassess \
                      before taking another trade."
                .to_string(),
            recommended_action: RecommendedAction::SlowDown,
        }
    }

    fn info() -> Self {
        Self {
            level: EscalationLevel::Info,
            title: "Rules Followed".to_string(),
            message: "You followed your rules on this trade. Maintain discipline and continue \
                      executing your plan."
                .to_string(),
            recommended_action: RecommendedAction::Continue,
        }
    }
}

/// Maps an evaluation plus the caller's running streak of non-compliant
/// trades to a coaching tier. First matching tier wins.
pub fn escalate(
    evaluation: &TradeEvaluationResult,
    consecutive_rule_breaks: u32,
) -> EscalationResult {
    let high_severity_count = evaluation.count_severity(Severity::High);
    let score = evaluation.compliance_score;

    let result = if score < 50 || high_severity_count >= 2 || consecutive_rule_breaks >= 3 {
        EscalationResult::critical()
    } else if score < 80 || high_severity_count == 1 || consecutive_rule_breaks == 2 {
        // Exactly 80 with no HIGH and a streak below 2 is still INFO.
        EscalationResult::warning()
    } else {
        EscalationResult::info()
    };

    debug!(
        level = %result.level,
        score,
        high_severity_count,
        consecutive_rule_breaks,
        "escalation classified"
    );
    result
}
