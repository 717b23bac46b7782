use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use trade_coach::coach::review_trade;
use trade_coach::config::Config;
use trade_coach::core::sessions::session_for;
use trade_coach::core::UserInputs;
use trade_coach::history::{log_trade, JsonFileStore, TradeHistoryStore};
use trade_coach::models::{Direction, Session, Trade};

/// A trade plus the trader's inputs, as written by the journaling form.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    trade_id: String,
    instrument: String,
    direction: Direction,
    entry_time: DateTime<Utc>,
    exit_time: DateTime<Utc>,
    contracts: u32,
    #[serde(rename = "plannedRR")]
    planned_rr: f64,
    pnl: f64,
    /// Inferred from `entry_time` when omitted.
    #[serde(default)]
    session: Option<Session>,
    #[serde(default)]
    confluences_confirmed: Vec<String>,
    #[serde(default)]
    emotion: String,
    #[serde(default)]
    journal_note: String,
}

impl Candidate {
    fn into_parts(self) -> Result<(Trade, UserInputs, String)> {
        let session = match self.session {
            Some(s) => s,
            None => session_for(self.entry_time).ok_or_else(|| {
                anyhow!(
                    "entry time {} is outside every trading session; set \"session\" explicitly",
                    self.entry_time
                )
            })?,
        };
        let trade = Trade {
            trade_id: self.trade_id,
            instrument: self.instrument,
            direction: self.direction,
            entry_time: self.entry_time,
            exit_time: self.exit_time,
            contracts: self.contracts,
            planned_rr: self.planned_rr,
            pnl: self.pnl,
            session,
        };
        let inputs = UserInputs {
            confluences_confirmed: self.confluences_confirmed,
            emotion: self.emotion,
        };
        Ok((trade, inputs, self.journal_note))
    }
}

fn main() -> Result<()> {
    let cfg = Config::from_env();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_writer(std::io::stderr)
        .init();

    // trade-coach <candidate.json> [review|prompt]
    let args: Vec<String> = std::env::args().collect();
    let candidate_path = args
        .get(1)
        .ok_or_else(|| anyhow!("usage: trade-coach <candidate.json> [review|prompt]"))?;
    let mode = args.get(2).map(String::as_str).unwrap_or("review");

    let rules = cfg.load_rules().context("loading rule set")?;

    let raw = std::fs::read_to_string(candidate_path)
        .with_context(|| format!("reading candidate trade {}", candidate_path))?;
    let candidate: Candidate = serde_json::from_str(&raw)
        .with_context(|| format!("parsing candidate trade {}", candidate_path))?;
    let (trade, inputs, note) = candidate.into_parts()?;

    let mut store = JsonFileStore::new(&cfg.history_file);
    let mut history = store.load_trade_history().context("loading trade history")?;
    if history.iter().any(|l| l.trade.trade_id == trade.trade_id) {
        warn!("Trade {} is already in history; it is excluded from its own context", trade.trade_id);
    }

    let review = review_trade(&history, &trade, &rules, &inputs, &note);

    match mode {
        "prompt" => println!("{}", review.prompt),
        "review" => {
            println!("{}", serde_json::to_string_pretty(&review)?);
            history.push(log_trade(trade, Some(review.evaluation.clone()), &rules));
            store.save(&history).context("saving trade history")?;
            info!("History now holds {} trade(s)", history.len());
        }
        other => return Err(anyhow!("unknown mode '{}' (expected review or prompt)", other)),
    }

    Ok(())
}
