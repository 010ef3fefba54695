// crates/secret-gate-core/src/evaluate.rs
// ============================================================================
// Module: Secret Gate Limit Evaluator
// Description: Age-limit evaluation of alerts against a severity policy.
// Purpose: Decide whether any alert has outlived its allowed duration.
// Dependencies: crate::{alert, policy}, time
// ============================================================================

//! ## Overview
//! The evaluator walks alerts in fetch order and compares each alert's age
//! against the policy entry for its severity. The evaluation instant is
//! supplied by the caller and fixed for the whole pass. The first alert whose
//! age strictly exceeds its allowed duration ends the pass; severities with
//! no policy entry are recorded as gaps and can never trigger a violation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use time::Duration;
use time::OffsetDateTime;

use crate::alert::Alert;
use crate::policy::Policy;

// ============================================================================
// SECTION: Outcome Types
// ============================================================================

/// A severity observed in alerts but absent from the policy.
///
/// # Invariants
/// - Gaps are non-fatal; the affected alert is treated as non-violating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyGap {
    /// Identifier of the alert with the uncovered severity.
    pub alert_id: u64,
    /// Severity name missing from the policy.
    pub severity: String,
}

/// The first alert found to exceed its allowed duration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Identifier of the violating alert.
    pub alert_id: u64,
    /// Severity name of the violating alert.
    pub severity: String,
    /// Allowed age in days for that severity.
    pub allowed_days: u64,
}

/// Result of one evaluator pass.
///
/// # Invariants
/// - `gaps` lists only severities observed before the short-circuit point.
/// - The outcome is derived fresh each run and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// First violation found, when any alert exceeded its allowed age.
    pub violation: Option<Violation>,
    /// Policy gaps observed during the pass, in alert order.
    pub gaps: Vec<PolicyGap>,
}

impl Evaluation {
    /// Returns true when the pass found a violating alert.
    #[must_use]
    pub const fn exceeded(&self) -> bool {
        self.violation.is_some()
    }
}

// ============================================================================
// SECTION: Evaluation
// ============================================================================

/// Evaluates alerts against the policy at a fixed instant.
///
/// Walks alerts in order and short-circuits on the first alert whose age
/// strictly exceeds the allowed duration for its severity. An alert exactly
/// at its limit does not violate. An empty alert sequence never violates.
#[must_use]
pub fn evaluate(alerts: &[Alert], policy: &Policy, now: OffsetDateTime) -> Evaluation {
    let mut gaps = Vec::new();
    for alert in alerts {
        let Some(days) = policy.max_age_days(&alert.severity) else {
            gaps.push(PolicyGap {
                alert_id: alert.id,
                severity: alert.severity.as_str().to_string(),
            });
            continue;
        };
        // Day counts past the representable range can never be exceeded.
        let allowed = i64::try_from(days)
            .ok()
            .and_then(|d| d.checked_mul(86_400))
            .map_or(Duration::MAX, Duration::seconds);
        if now - alert.created_at > allowed {
            return Evaluation {
                violation: Some(Violation {
                    alert_id: alert.id,
                    severity: alert.severity.as_str().to_string(),
                    allowed_days: days,
                }),
                gaps,
            };
        }
    }
    Evaluation {
        violation: None,
        gaps,
    }
}
