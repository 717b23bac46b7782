pub mod escalation;
pub mod evaluate;
pub mod sessions;

pub use escalation::{escalate, EscalationLevel, EscalationResult, RecommendedAction};
pub use evaluate::{evaluate_trade, TradeContext, TradeEvaluationResult, UserInputs};
