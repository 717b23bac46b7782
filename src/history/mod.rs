pub mod store;

pub use store::{JsonFileStore, MemoryStore, TradeHistoryStore};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{TradeContext, TradeEvaluationResult};
use crate::models::{RuleSet, Trade};

/// A trade as stored in history: the trade itself plus what was attached
/// when it was logged. Never mutated after logging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggedTrade {
    #[serde(flatten)]
    pub trade: Trade,
    #[serde(default)]
    pub evaluation: Option<TradeEvaluationResult>,
    /// The trade lost, so it opened a cooldown window.
    #[serde(default)]
    pub cooldown_started: bool,
    #[serde(default)]
    pub cooldown_until: Option<DateTime<Utc>>,
}

impl LoggedTrade {
    pub fn is_rule_break(&self) -> bool {
        self.evaluation.as_ref().is_some_and(|e| !e.is_compliant())
    }
}

pub fn log_trade(
    trade: Trade,
    evaluation: Option<TradeEvaluationResult>,
    rules: &RuleSet,
) -> LoggedTrade {
    let cooldown_started = trade.is_loss();
    let cooldown_until = cooldown_started
        .then(|| trade.exit_time + Duration::minutes(i64::from(rules.cooldown_minutes_after_loss)));
    LoggedTrade {
        trade,
        evaluation,
        cooldown_started,
        cooldown_until,
    }
}

/// Derives the day's context for `candidate` from prior history.
///
/// Counts include the candidate itself, since the frequency rules compare
/// with `<=` against the daily maximum.
pub fn trade_context(history: &[LoggedTrade], candidate: &Trade) -> TradeContext {
    let day = candidate.entry_time.date_naive();
    let today: Vec<&Trade> = history
        .iter()
        .map(|l| &l.trade)
        .filter(|t| t.entry_time.date_naive() == day && t.trade_id != candidate.trade_id)
        .collect();

    let trades_today = today.len() as u32 + 1;
    let losing_trades_today =
        today.iter().filter(|t| t.is_loss()).count() as u32 + u32::from(candidate.is_loss());

    let last_loss_time = history
        .iter()
        .map(|l| &l.trade)
        .filter(|t| t.is_loss() && t.trade_id != candidate.trade_id)
        .map(|t| t.exit_time)
        .filter(|exit| *exit <= candidate.entry_time)
        .max();

    TradeContext {
        trades_today,
        losing_trades_today,
        last_loss_time,
    }
}

/// Trailing run of logged trades with at least one violation.
pub fn consecutive_rule_breaks(history: &[LoggedTrade]) -> u32 {
    history
        .iter()
        .rev()
        .take_while(|l| l.is_rule_break())
        .count() as u32
}
