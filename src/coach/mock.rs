use crate::coach::prompt::{CoachOutputFormat, RuleBreakdown, Verdict};
use crate::core::{EscalationLevel, EscalationResult, RecommendedAction, TradeEvaluationResult};

const FALLBACK_WHAT_WENT_WRONG: &str = "Rule was violated.";
const WHAT_TO_DO_NEXT_TIME: &str = "Do not take the trade unless all rule conditions are met.";
const HARD_STOP_MESSAGE: &str = "Trading now increases the probability of blowing your account.";

/// Deterministic offline stand-in for the text-generation coach.
///
/// Only CRITICAL attaches a hard-stop message here, even though the prompt
/// asks the generated coach to include one for WARNING as well.
pub fn mock_coach_response(
    evaluation: &TradeEvaluationResult,
    escalation: &EscalationResult,
) -> CoachOutputFormat {
    let non_compliant = !evaluation.violations.is_empty();

    let rule_breakdown = evaluation
        .violations
        .iter()
        .map(|v| RuleBreakdown {
            rule_id: v.rule_id.clone(),
            severity: v.severity,
            what_went_wrong: if v.message.is_empty() {
                FALLBACK_WHAT_WENT_WRONG.to_string()
            } else {
                v.message.clone()
            },
            what_to_do_next_time: WHAT_TO_DO_NEXT_TIME.to_string(),
        })
        .collect();

    let next_step = match escalation.recommended_action {
        RecommendedAction::StopTrading => {
            "Stop trading for the session and review your last violations."
        }
        RecommendedAction::SlowDown => "Reduce frequency and re-evaluate your next setup carefully.",
        RecommendedAction::Continue => "Continue following your plan with discipline.",
    };

    CoachOutputFormat {
        verdict: if non_compliant {
            Verdict::NonCompliant
        } else {
            Verdict::Compliant
        },
        escalation_level: escalation.level,
        recommended_action: escalation.recommended_action,
        headline: if non_compliant {
            "Rules were broken on this trade.".to_string()
        } else {
            "Rules were followed.".to_string()
        },
        rule_breakdown,
        next_step: next_step.to_string(),
        hard_stop_message: (escalation.level == EscalationLevel::Critical)
            .then(|| HARD_STOP_MESSAGE.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::escalate;
    use crate::models::{Severity, Violation};

    fn evaluation_with(violations: Vec<Violation>, score: u8) -> TradeEvaluationResult {
        TradeEvaluationResult {
            rules_failed: violations.len() as u32,
            rules_passed: 1,
            highest_severity: crate::core::evaluate::highest_severity(&violations),
            violations,
            compliance_score: score,
        }
    }

    #[test]
    fn critical_escalation_returns_stop_trading_advice() {
        let evaluation = evaluation_with(
            vec![Violation::new(
                "B3_EMOTION",
                "Emotion",
                Severity::High,
                "Traded while frustrated.",
            )],
            40,
        );
        let escalation = EscalationResult {
            level: EscalationLevel::Critical,
            title: "Stop Trading".to_string(),
            message: "Repeated rule violations detected.".to_string(),
            recommended_action: RecommendedAction::StopTrading,
        };

        let r = mock_coach_response(&evaluation, &escalation);
        assert_eq!(r.verdict, Verdict::NonCompliant);
        assert_eq!(r.recommended_action, RecommendedAction::StopTrading);
        assert_eq!(r.hard_stop_message.as_deref(), Some(HARD_STOP_MESSAGE));
        assert_eq!(
            r.next_step,
            "Stop trading for the session and review your last violations."
        );
        assert_eq!(r.rule_breakdown.len(), 1);
        assert_eq!(r.rule_breakdown[0].rule_id, "B3_EMOTION");
        assert_eq!(r.rule_breakdown[0].what_went_wrong, "Traded while frustrated.");
    }

    #[test]
    fn compliant_trade_has_no_breakdown_or_hard_stop() {
        let evaluation = evaluation_with(vec![], 100);
        let r = mock_coach_response(&evaluation, &escalate(&evaluation, 0));
        assert_eq!(r.verdict, Verdict::Compliant);
        assert!(r.rule_breakdown.is_empty());
        assert!(r.hard_stop_message.is_none());
        assert_eq!(r.headline, "Rules were followed.");
        assert_eq!(r.next_step, "Continue following your plan with discipline.");
    }

    #[test]
    fn warning_does_not_attach_hard_stop() {
        let evaluation = evaluation_with(
            vec![Violation::new("R3_MIN_RR", "Minimum Planned R:R", Severity::Medium, "")],
            71,
        );
        let escalation = escalate(&evaluation, 0);
        assert_eq!(escalation.level, EscalationLevel::Warning);

        let r = mock_coach_response(&evaluation, &escalation);
        assert!(r.hard_stop_message.is_none());
        assert_eq!(r.rule_breakdown[0].what_went_wrong, FALLBACK_WHAT_WENT_WRONG);
        assert_eq!(r.rule_breakdown[0].what_to_do_next_time, WHAT_TO_DO_NEXT_TIME);
        assert_eq!(
            r.next_step,
            "Reduce frequency and re-evaluate your next setup carefully."
        );
    }
}
