pub mod rules;
pub mod severity;
pub mod trade;
pub mod violation;

pub use rules::RuleSet;
pub use severity::{escalation_to_severity, DisplaySeverity};
pub use trade::{Direction, Session, Trade};
pub use violation::{Severity, Violation};
