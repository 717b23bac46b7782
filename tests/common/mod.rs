#![allow(dead_code)]

use chrono::{DateTime, Duration, Utc};
use trade_coach::core::{TradeContext, UserInputs};
use trade_coach::models::{Direction, RuleSet, Session, Trade};

pub fn ts(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339)
        .unwrap()
        .with_timezone(&Utc)
}

/// A trade that passes every rule in `rules()` given `calm_inputs()`.
pub fn clean_trade(id: &str, entry: &str) -> Trade {
    let entry_time = ts(entry);
    Trade {
        trade_id: id.to_string(),
        instrument: "ES".to_string(),
        direction: Direction::Short,
        entry_time,
        exit_time: entry_time + Duration::minutes(20),
        contracts: 1,
        planned_rr: 2.5,
        pnl: 125.0,
        session: Session::London,
    }
}

pub fn rules() -> RuleSet {
    RuleSet {
        max_risk_per_trade: 250.0,
        max_position_size: 2,
        min_planned_rr: 2.0,
        max_trades_per_day: 1,
        max_losing_trades_per_day: 1,
        allowed_sessions: vec![Session::London, Session::Ny],
        required_confluences: vec!["HTF Bias".to_string(), "Liquidity Sweep".to_string()],
        cooldown_minutes_after_loss: 30,
        disallowed_emotions: vec!["Frustrated".to_string(), "FOMO".to_string()],
    }
}

pub fn calm_inputs() -> UserInputs {
    UserInputs {
        confluences_confirmed: vec!["Liquidity Sweep".to_string(), "HTF Bias".to_string()],
        emotion: "Calm".to_string(),
    }
}

pub fn first_trade_context() -> TradeContext {
    TradeContext {
        trades_today: 1,
        losing_trades_today: 0,
        last_loss_time: None,
    }
}
