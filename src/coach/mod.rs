pub mod mock;
pub mod prompt;

pub use mock::mock_coach_response;
pub use prompt::{build_coach_prompt, CoachOutputFormat, CoachPromptInput, RuleBreakdown, Verdict};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::{
    escalate, evaluate_trade, EscalationResult, TradeContext, TradeEvaluationResult, UserInputs,
};
use crate::history::{consecutive_rule_breaks, trade_context, LoggedTrade};
use crate::models::{escalation_to_severity, DisplaySeverity, RuleSet, Trade};

/// Everything the shell needs to show for one candidate trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeReview {
    pub context: TradeContext,
    pub evaluation: TradeEvaluationResult,
    pub consecutive_rule_breaks: u32,
    pub escalation: EscalationResult,
    pub display_severity: DisplaySeverity,
    pub coach: CoachOutputFormat,
    pub prompt: String,
}

/// Runs evaluate, escalate and both formatters for a candidate trade
/// against prior history.
///
/// The streak passed to escalation includes the candidate when it broke a
/// rule and resets to zero when it did not.
pub fn review_trade(
    history: &[LoggedTrade],
    trade: &Trade,
    rules: &RuleSet,
    inputs: &UserInputs,
    user_journal_note: &str,
) -> TradeReview {
    let context = trade_context(history, trade);
    let evaluation = evaluate_trade(trade, rules, &context, inputs);

    let streak = if evaluation.is_compliant() {
        0
    } else {
        consecutive_rule_breaks(history) + 1
    };
    let escalation = escalate(&evaluation, streak);

    let coach = mock_coach_response(&evaluation, &escalation);
    let prompt = build_coach_prompt(&CoachPromptInput {
        trade,
        rules,
        evaluation: &evaluation,
        escalation: &escalation,
        user_journal_note,
    });

    info!(
        "Trade {} on {}: score {}%, {} violation(s), streak {}, {} -> {}",
        trade.trade_id,
        trade.instrument,
        evaluation.compliance_score,
        evaluation.violations.len(),
        streak,
        escalation.level,
        escalation.recommended_action
    );

    TradeReview {
        context,
        display_severity: escalation_to_severity(escalation.level),
        evaluation,
        consecutive_rule_breaks: streak,
        escalation,
        coach,
        prompt,
    }
}
