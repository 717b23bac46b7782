use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::Result;
use crate::models::{RuleSet, Session};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Rule set built from `COACH_*` variables.
    pub rules: RuleSet,
    /// When set, a JSON rule set that replaces `rules`.
    pub rules_file: Option<String>,

    pub history_file: String,

    // Logging
    pub log_level: String,
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let env = |key: &str, default: &str| -> String {
            std::env::var(key).unwrap_or_else(|_| default.to_string())
        };

        let allowed_sessions: Vec<Session> = split_list(&env("COACH_ALLOWED_SESSIONS", "LONDON,NY"))
            .iter()
            .filter_map(|s| Session::from_str(s).ok())
            .collect();

        let rules = RuleSet {
            max_risk_per_trade: env("COACH_MAX_RISK_PER_TRADE", "300")
                .parse()
                .unwrap_or(300.0),
            max_position_size: env("COACH_MAX_POSITION_SIZE", "3").parse().unwrap_or(3),
            min_planned_rr: env("COACH_MIN_PLANNED_RR", "2").parse().unwrap_or(2.0),
            max_trades_per_day: env("COACH_MAX_TRADES_PER_DAY", "3").parse().unwrap_or(3),
            max_losing_trades_per_day: env("COACH_MAX_LOSING_TRADES_PER_DAY", "2")
                .parse()
                .unwrap_or(2),
            allowed_sessions,
            required_confluences: split_list(&env("COACH_REQUIRED_CONFLUENCES", "HTF Bias")),
            cooldown_minutes_after_loss: env("COACH_COOLDOWN_MINUTES", "10").parse().unwrap_or(10),
            disallowed_emotions: split_list(&env(
                "COACH_DISALLOWED_EMOTIONS",
                "Frustrated,Revenge,FOMO",
            )),
        };

        Config {
            rules,
            rules_file: std::env::var("COACH_RULES_FILE")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            history_file: env("COACH_HISTORY_FILE", "logs/trade_history.json"),
            log_level: env("COACH_LOG_LEVEL", "INFO"),
        }
    }

    /// The rule file if one is configured, otherwise the env-built rules.
    pub fn load_rules(&self) -> Result<RuleSet> {
        match &self.rules_file {
            Some(path) => RuleSet::from_json_file(path),
            None => {
                self.rules.validate()?;
                Ok(self.rules.clone())
            }
        }
    }
}
