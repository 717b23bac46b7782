use chrono::{DateTime, Duration, Utc};

use crate::core::{TradeContext, TradeEvaluationResult, UserInputs};
use crate::models::{Direction, RuleSet, Session, Severity, Trade, Violation};

fn parse_utc(ts: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(ts)
        .unwrap()
        .with_timezone(&Utc)
}

/// Losing 2-lot NQ long in NY with a 1.5 planned R:R.
pub fn sample_trade() -> Trade {
    trade_at("1", "2024-01-15T14:30:00Z", -200.0)
}

/// Same shape as `sample_trade`, entered at `entry` and closed 15 minutes later.
pub fn trade_at(id: &str, entry: &str, pnl: f64) -> Trade {
    let entry_time = parse_utc(entry);
    Trade {
        trade_id: id.to_string(),
        instrument: "NQ".to_string(),
        direction: Direction::Long,
        entry_time,
        exit_time: entry_time + Duration::minutes(15),
        contracts: 2,
        planned_rr: 1.5,
        pnl,
        session: Session::Ny,
    }
}

pub fn sample_rules() -> RuleSet {
    RuleSet {
        max_risk_per_trade: 300.0,
        max_position_size: 3,
        min_planned_rr: 2.0,
        max_trades_per_day: 1,
        max_losing_trades_per_day: 1,
        allowed_sessions: vec![Session::Ny],
        required_confluences: vec!["HTF Bias".to_string()],
        cooldown_minutes_after_loss: 10,
        disallowed_emotions: vec!["Frustrated".to_string()],
    }
}

/// First trade of the day, no prior loss.
pub fn clean_context() -> TradeContext {
    TradeContext {
        trades_today: 1,
        losing_trades_today: 0,
        last_loss_time: None,
    }
}

pub fn clean_inputs() -> UserInputs {
    UserInputs {
        confluences_confirmed: vec!["HTF Bias".to_string()],
        emotion: "Calm".to_string(),
    }
}

/// One HIGH violation out of seven checks.
pub fn sample_evaluation() -> TradeEvaluationResult {
    TradeEvaluationResult {
        violations: vec![Violation::new(
            "B3_EMOTION",
            "Emotional State",
            Severity::High,
            "You entered this trade while in a disallowed emotional state.",
        )],
        rules_passed: 6,
        rules_failed: 1,
        compliance_score: 86,
        highest_severity: Some(Severity::High),
    }
}
