use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{RuleSet, Severity, Trade, Violation};

/// Stateful facts about the trading day that the rules need.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeContext {
    pub trades_today: u32,
    pub losing_trades_today: u32,
    pub last_loss_time: Option<DateTime<Utc>>,
}

/// Subjective inputs the trader supplies at entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInputs {
    pub confluences_confirmed: Vec<String>,
    pub emotion: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeEvaluationResult {
    /// In check order, not severity order.
    pub violations: Vec<Violation>,
    pub rules_passed: u32,
    pub rules_failed: u32,
    /// 0-100
    pub compliance_score: u8,
    pub highest_severity: Option<Severity>,
}

impl TradeEvaluationResult {
    pub fn is_compliant(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn rules_evaluated(&self) -> u32 {
        self.rules_passed + self.rules_failed
    }

    pub fn count_severity(&self, severity: Severity) -> usize {
        self.violations
            .iter()
            .filter(|v| v.severity == severity)
            .count()
    }

    pub fn has_violation(&self, rule_id: &str) -> bool {
        self.violations.iter().any(|v| v.rule_id == rule_id)
    }
}

/// Static description of one rule check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleCheck {
    pub id: &'static str,
    pub name: &'static str,
    pub severity: Severity,
    pub message: &'static str,
}

pub const F1_MAX_TRADES: RuleCheck = RuleCheck {
    id: "F1_MAX_TRADES",
    name: "Max Trades Per Day",
    severity: Severity::High,
    message: "You exceeded your maximum allowed trades for the day.",
};

pub const F2_MAX_LOSSES: RuleCheck = RuleCheck {
    id: "F2_MAX_LOSSES",
    name: "Max Losing Trades Per Day",
    severity: Severity::High,
    message: "You exceeded your maximum allowed losing trades for the day.",
};

pub const R3_MIN_RR: RuleCheck = RuleCheck {
    id: "R3_MIN_RR",
    name: "Minimum Planned R:R",
    severity: Severity::Medium,
    message: "Planned R:R was below your required minimum.",
};

pub const E2_SESSION: RuleCheck = RuleCheck {
    id: "E2_SESSION",
    name: "Allowed Session",
    severity: Severity::Medium,
    message: "Trade was taken outside of your allowed session.",
};

pub const E1_CONFLUENCES: RuleCheck = RuleCheck {
    id: "E1_CONFLUENCES",
    name: "Required Confluences",
    severity: Severity::Medium,
    message: "One or more required confluences were missing.",
};

pub const B1_COOLDOWN: RuleCheck = RuleCheck {
    id: "B1_COOLDOWN",
    name: "Cooldown After Loss",
    severity: Severity::High,
    message: "You entered a trade before your cooldown period ended.",
};

pub const B3_EMOTION: RuleCheck = RuleCheck {
    id: "B3_EMOTION",
    name: "Emotional State",
    severity: Severity::High,
    message: "You entered this trade while in a disallowed emotional state.",
};

/// All checks in the order they run.
pub const RULE_CHECKS: &[RuleCheck] = &[
    F1_MAX_TRADES,
    F2_MAX_LOSSES,
    R3_MIN_RR,
    E2_SESSION,
    E1_CONFLUENCES,
    B1_COOLDOWN,
    B3_EMOTION,
];

#[derive(Default)]
struct Tally {
    violations: Vec<Violation>,
    passed: u32,
    failed: u32,
}

impl Tally {
    fn record(&mut self, check: &RuleCheck, passed: bool) {
        if passed {
            self.passed += 1;
        } else {
            debug!(rule = check.id, severity = %check.severity, "rule check failed");
            self.violations.push(Violation::new(
                check.id,
                check.name,
                check.severity,
                check.message,
            ));
            self.failed += 1;
        }
    }
}

/// Scores one trade against the rule set. Pure and deterministic.
pub fn evaluate_trade(
    trade: &Trade,
    rules: &RuleSet,
    context: &TradeContext,
    inputs: &UserInputs,
) -> TradeEvaluationResult {
    let mut tally = Tally::default();

    // Frequency
    tally.record(&F1_MAX_TRADES, context.trades_today <= rules.max_trades_per_day);
    tally.record(
        &F2_MAX_LOSSES,
        context.losing_trades_today <= rules.max_losing_trades_per_day,
    );

    // Risk
    tally.record(&R3_MIN_RR, trade.planned_rr >= rules.min_planned_rr);

    // Execution
    tally.record(&E2_SESSION, rules.allowed_sessions.contains(&trade.session));
    let all_confluences = rules
        .required_confluences
        .iter()
        .all(|c| inputs.confluences_confirmed.contains(c));
    tally.record(&E1_CONFLUENCES, all_confluences);

    // Behavior. Without a prior loss the cooldown cannot be broken.
    match context.last_loss_time {
        Some(last_loss) => {
            let minutes_since_loss =
                (trade.entry_time - last_loss).num_milliseconds() as f64 / 60_000.0;
            tally.record(
                &B1_COOLDOWN,
                minutes_since_loss >= f64::from(rules.cooldown_minutes_after_loss),
            );
        }
        None => tally.passed += 1,
    }
    tally.record(
        &B3_EMOTION,
        !rules.disallowed_emotions.contains(&inputs.emotion),
    );

    let compliance_score = compliance_score(tally.passed, tally.failed);
    let highest_severity = highest_severity(&tally.violations);

    debug!(
        trade_id = %trade.trade_id,
        passed = tally.passed,
        failed = tally.failed,
        compliance_score,
        "trade evaluated"
    );

    TradeEvaluationResult {
        violations: tally.violations,
        rules_passed: tally.passed,
        rules_failed: tally.failed,
        compliance_score,
        highest_severity,
    }
}

/// Rounded pass percentage; 100 when nothing was checked.
pub fn compliance_score(passed: u32, failed: u32) -> u8 {
    let total = passed + failed;
    if total == 0 {
        return 100;
    }
    (f64::from(passed) / f64::from(total) * 100.0).round() as u8
}

/// Priority scan: first HIGH, else first MEDIUM, else first LOW.
pub fn highest_severity(violations: &[Violation]) -> Option<Severity> {
    [Severity::High, Severity::Medium, Severity::Low]
        .into_iter()
        .find_map(|s| violations.iter().find(|v| v.severity == s).map(|v| v.severity))
}
