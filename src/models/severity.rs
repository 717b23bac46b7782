use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::escalation::EscalationLevel;
use crate::models::Severity;

/// Four-tier severity used for display only.
///
/// `Critical` is reachable solely from an escalation level, never from a
/// single violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DisplaySeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DisplaySeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplaySeverity::Low => "LOW",
            DisplaySeverity::Medium => "MEDIUM",
            DisplaySeverity::High => "HIGH",
            DisplaySeverity::Critical => "CRITICAL",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            DisplaySeverity::Low => "#16a34a",
            DisplaySeverity::Medium => "#eab308",
            DisplaySeverity::High => "#ea580c",
            DisplaySeverity::Critical => "#dc2626",
        }
    }
}

impl fmt::Display for DisplaySeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Severity> for DisplaySeverity {
    fn from(s: Severity) -> Self {
        match s {
            Severity::Low => DisplaySeverity::Low,
            Severity::Medium => DisplaySeverity::Medium,
            Severity::High => DisplaySeverity::High,
        }
    }
}

pub fn escalation_to_severity(level: EscalationLevel) -> DisplaySeverity {
    match level {
        EscalationLevel::Info => DisplaySeverity::Low,
        EscalationLevel::Warning => DisplaySeverity::Medium,
        EscalationLevel::Critical => DisplaySeverity::Critical,
    }
}
