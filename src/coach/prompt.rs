use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::{EscalationLevel, EscalationResult, RecommendedAction, TradeEvaluationResult};
use crate::models::{RuleSet, Severity, Trade};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Compliant,
    NonCompliant,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Compliant => write!(f, "COMPLIANT"),
            Verdict::NonCompliant => write!(f, "NON_COMPLIANT"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleBreakdown {
    pub rule_id: String,
    pub severity: Severity,
    pub what_went_wrong: String,
    pub what_to_do_next_time: String,
}

/// Structured coaching output, the shape the text-generation collaborator
/// is asked to return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachOutputFormat {
    pub verdict: Verdict,
    pub escalation_level: EscalationLevel,
    pub recommended_action: RecommendedAction,
    /// Short summary of what happened.
    pub headline: String,
    pub rule_breakdown: Vec<RuleBreakdown>,
    /// The single thing to do before the next trade.
    pub next_step: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hard_stop_message: Option<String>,
}

pub struct CoachPromptInput<'a> {
    pub trade: &'a Trade,
    pub rules: &'a RuleSet,
    pub evaluation: &'a TradeEvaluationResult,
    pub escalation: &'a EscalationResult,
    /// What the trader wrote after the trade.
    pub user_journal_note: &'a str,
}

fn join<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

fn rules_summary(rules: &RuleSet) -> String {
    [
        format!("maxTradesPerDay={}", rules.max_trades_per_day),
        format!("maxLosingTradesPerDay={}", rules.max_losing_trades_per_day),
        format!("minPlannedRR={}", rules.min_planned_rr),
        format!("allowedSessions={}", join(&rules.allowed_sessions)),
        format!("cooldownMinutesAfterLoss={}", rules.cooldown_minutes_after_loss),
        format!("disallowedEmotions={}", join(&rules.disallowed_emotions)),
        format!("requiredConfluences={}", join(&rules.required_confluences)),
    ]
    .join(" | ")
}

fn violations_text(evaluation: &TradeEvaluationResult) -> String {
    if evaluation.violations.is_empty() {
        return "None.".to_string();
    }
    evaluation
        .violations
        .iter()
        .map(|v| format!("- [{}] ({}) {}: {}", v.rule_id, v.severity, v.rule_name, v.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders the deterministic instruction document for the coach. The
/// evaluation and escalation are stated as authoritative so the generated
/// reply cannot contradict them.
pub fn build_coach_prompt(input: &CoachPromptInput<'_>) -> String {
    let CoachPromptInput {
        trade,
        rules,
        evaluation,
        escalation,
        user_journal_note,
    } = input;

    let highest = evaluation
        .highest_severity
        .map_or("None", |s| s.as_str());

    let prompt = format!(
        r#"
You are a strict trading accountability coach.
Your job: enforce the user's rules and protect them from overtrading and emotional decision-making.
You MUST NOT excuse rule-breaking. You MUST NOT contradict the evaluation data.
If escalation says STOP_TRADING, you must clearly tell them to stop and reflect.

Return output as VALID JSON that matches this schema exactly:
{{
  "verdict": "COMPLIANT" | "NON_COMPLIANT",
  "escalationLevel": "INFO" | "WARNING" | "CRITICAL",
  "recommendedAction": "CONTINUE" | "SLOW_DOWN" | "STOP_TRADING",
  "headline": string,
  "ruleBreakdown": [
    {{
      "ruleId": string,
      "severity": "LOW" | "MEDIUM" | "HIGH",
      "whatWentWrong": string,
      "whatToDoNextTime": string
    }}
  ],
  "nextStep": string,
  "hardStopMessage"?: string
}}

CONTEXT
- Instrument: {instrument}
- Direction: {direction}
- Contracts: {contracts}
- PlannedRR: {planned_rr}
- PnL: {pnl}
- Session: {session}
- Rules: {rules}

EVALUATION (authoritative truth)
- ComplianceScore: {score}
- HighestSeverity: {highest}
- Violations:
{violations}

ESCALATION (authoritative coaching stance)
- Level: {level}
- RecommendedAction: {action}
- CoachMessage: {coach_message}

USER JOURNAL NOTE (their own words)
"""
{note}
"""

INSTRUCTIONS
1) Determine verdict: COMPLIANT if 0 violations, else NON_COMPLIANT.
2) For each violation, add a ruleBreakdown entry (ruleId, severity).
3) Provide ONE nextStep the user should do before any next trade.
4) If escalation is WARNING or CRITICAL, include hardStopMessage.
5) Keep the tone strict, clear, and concise. No fluff.
"#,
        instrument = trade.instrument,
        direction = trade.direction,
        contracts = trade.contracts,
        planned_rr = trade.planned_rr,
        pnl = trade.pnl,
        session = trade.session,
        rules = rules_summary(rules),
        score = evaluation.compliance_score,
        highest = highest,
        violations = violations_text(evaluation),
        level = escalation.level,
        action = escalation.recommended_action,
        coach_message = escalation.message,
        note = user_journal_note,
    );

    prompt.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::escalate;
    use crate::models::Violation;
    use crate::test_helpers::{sample_rules, sample_trade};

    fn critical_evaluation() -> TradeEvaluationResult {
        TradeEvaluationResult {
            violations: vec![Violation::new(
                "F1_MAX_TRADES",
                "Max Trades Per Day",
                Severity::High,
                "Exceeded max trades.",
            )],
            rules_passed: 1,
            rules_failed: 1,
            compliance_score: 50,
            highest_severity: Some(Severity::High),
        }
    }

    fn critical_escalation() -> EscalationResult {
        EscalationResult {
            level: EscalationLevel::Critical,
            title: "Stop Trading Immediately".to_string(),
            message: "Stop trading and reflect.".to_string(),
            recommended_action: RecommendedAction::StopTrading,
        }
    }

    #[test]
    fn includes_evaluation_escalation_and_demands_json() {
        let trade = sample_trade();
        let rules = sample_rules();
        let evaluation = critical_evaluation();
        let escalation = critical_escalation();
        let prompt = build_coach_prompt(&CoachPromptInput {
            trade: &trade,
            rules: &rules,
            evaluation: &evaluation,
            escalation: &escalation,
            user_journal_note: "I felt like I had to win it back.",
        });

        assert!(prompt.contains("Return output as VALID JSON"));
        assert!(prompt.contains("EVALUATION (authoritative truth)"));
        assert!(prompt.contains("ESCALATION (authoritative coaching stance)"));
        assert!(prompt.contains("- RecommendedAction: STOP_TRADING"));
        assert!(prompt.contains("- Instrument: NQ"));
        assert!(prompt.contains("- [F1_MAX_TRADES] (HIGH) Max Trades Per Day: Exceeded max trades."));
        assert!(prompt.contains("I felt like I had to win it back."));
        assert!(prompt.starts_with("You are a strict trading accountability coach."));
        assert!(prompt.ends_with("No fluff."));
    }

    #[test]
    fn numbers_and_lists_render_compactly() {
        let trade = sample_trade();
        let rules = sample_rules();
        let evaluation = critical_evaluation();
        let escalation = critical_escalation();
        let prompt = build_coach_prompt(&CoachPromptInput {
            trade: &trade,
            rules: &rules,
            evaluation: &evaluation,
            escalation: &escalation,
            user_journal_note: "",
        });

        assert!(prompt.contains("- PlannedRR: 1.5"));
        assert!(prompt.contains("- PnL: -200"));
        assert!(prompt.contains(
            "- Rules: maxTradesPerDay=1 | maxLosingTradesPerDay=1 | minPlannedRR=2 | \
             allowedSessions=NY | cooldownMinutesAfterLoss=10 | \
             disallowedEmotions=Frustrated | requiredConfluences=HTF Bias"
        ));
    }

    #[test]
    fn clean_evaluation_lists_no_violations() {
        let mut trade = sample_trade();
        trade.planned_rr = 3.0;
        let rules = sample_rules();
        let evaluation = TradeEvaluationResult {
            violations: vec![],
            rules_passed: 7,
            rules_failed: 0,
            compliance_score: 100,
            highest_severity: None,
        };
        let escalation = escalate(&evaluation, 0);
        let prompt = build_coach_prompt(&CoachPromptInput {
            trade: &trade,
            rules: &rules,
            evaluation: &evaluation,
            escalation: &escalation,
            user_journal_note: "Textbook.",
        });

        assert!(prompt.contains("- HighestSeverity: None\n- Violations:\nNone."));
        assert!(prompt.contains("- RecommendedAction: CONTINUE"));
    }

    #[test]
    fn output_format_omits_absent_hard_stop() {
        let out = CoachOutputFormat {
            verdict: Verdict::Compliant,
            escalation_level: EscalationLevel::Info,
            recommended_action: RecommendedAction::Continue,
            headline: "Rules were followed.".to_string(),
            rule_breakdown: vec![],
            next_step: "Continue.".to_string(),
            hard_stop_message: None,
        };
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json["verdict"], "COMPLIANT");
        assert_eq!(json["escalationLevel"], "INFO");
        assert!(json.get("hardStopMessage").is_none());

        let back: CoachOutputFormat = serde_json::from_value(json).unwrap();
        assert_eq!(back, out);
    }
}
