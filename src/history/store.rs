use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{CoachError, Result};
use crate::history::LoggedTrade;

/// Load/save contract for the trader's logged history.
pub trait TradeHistoryStore {
    fn load_trade_history(&self) -> Result<Vec<LoggedTrade>>;
    fn save(&mut self, history: &[LoggedTrade]) -> Result<()>;
}

/// Pretty-printed JSON array on disk.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TradeHistoryStore for JsonFileStore {
    fn load_trade_history(&self) -> Result<Vec<LoggedTrade>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No history at {}, starting empty", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(CoachError::io(&self.path, e)),
        };
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        let history: Vec<LoggedTrade> = serde_json::from_str(&content)?;
        debug!("Loaded {} trade(s) from {}", history.len(), self.path.display());
        Ok(history)
    }

    fn save(&mut self, history: &[LoggedTrade]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| CoachError::io(parent, e))?;
        }
        let json = serde_json::to_string_pretty(history)?;
        fs::write(&self.path, json).map_err(|e| CoachError::io(&self.path, e))?;
        info!("Saved {} trade(s) to {}", history.len(), self.path.display());
        Ok(())
    }
}

/// Keeps history in memory; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    trades: Vec<LoggedTrade>,
}

impl MemoryStore {
    pub fn new(trades: Vec<LoggedTrade>) -> Self {
        Self { trades }
    }
}

impl TradeHistoryStore for MemoryStore {
    fn load_trade_history(&self) -> Result<Vec<LoggedTrade>> {
        Ok(self.trades.clone())
    }

    fn save(&mut self, history: &[LoggedTrade]) -> Result<()> {
        self.trades = history.to_vec();
        Ok(())
    }
}
