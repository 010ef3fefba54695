// crates/secret-gate-core/tests/evaluator.rs
// ============================================================================
// Module: Limit Evaluator Tests
// Description: Age comparisons, short-circuiting, and policy-gap handling.
// Purpose: Pin the decision semantics of the evaluator pass.
// ============================================================================

//! ## Overview
//! Exercises the evaluator against a fixed instant: strict-greater age
//! comparison, first-violation short-circuit, policy gaps for uncovered
//! severities, and the empty-input case.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use secret_gate_core::Alert;
use secret_gate_core::Policy;
use secret_gate_core::Severity;
use secret_gate_core::evaluate;
use time::Duration;
use time::OffsetDateTime;
use time::macros::datetime;

/// Fixed evaluation instant shared by all cases.
const NOW: OffsetDateTime = datetime!(2026-03-01 12:00:00 UTC);

/// Builds an alert created the given number of hours before [`NOW`].
fn alert(id: u64, severity: Severity, age_hours: i64) -> Alert {
    Alert {
        id,
        secret: format!("secret-{id}"),
        severity,
        created_at: NOW - Duration::hours(age_hours),
    }
}

/// Policy covering the three lower severities, mirroring common usage.
fn default_policy() -> Policy {
    [("high".to_string(), 1), ("medium".to_string(), 3), ("low".to_string(), 7)]
        .into_iter()
        .collect()
}

#[test]
fn empty_alerts_never_violate() {
    let evaluation = evaluate(&[], &default_policy(), NOW);
    assert!(!evaluation.exceeded());
    assert!(evaluation.gaps.is_empty());
}

#[test]
fn ages_within_limits_pass() {
    let alerts = vec![
        alert(1, Severity::High, 12),
        alert(2, Severity::Medium, 48),
        alert(3, Severity::Low, 24 * 6),
    ];
    assert!(!evaluate(&alerts, &default_policy(), NOW).exceeded());
}

#[test]
fn age_exactly_at_limit_does_not_violate() {
    // Exactly 24h old with a one-day limit: strict comparison, no violation.
    let alerts = vec![alert(1, Severity::High, 24)];
    assert!(!evaluate(&alerts, &default_policy(), NOW).exceeded());
}

#[test]
fn age_one_second_past_limit_violates() {
    let past_limit = Alert {
        created_at: NOW - Duration::days(1) - Duration::seconds(1),
        ..alert(1, Severity::High, 0)
    };
    let evaluation = evaluate(&[past_limit], &default_policy(), NOW);
    let violation = evaluation.violation.unwrap();
    assert_eq!(violation.alert_id, 1);
    assert_eq!(violation.severity, "high");
    assert_eq!(violation.allowed_days, 1);
}

#[test]
fn first_violation_wins_over_later_alerts() {
    // The second alert violates; the third is older but is never reached.
    let alerts = vec![
        alert(1, Severity::Medium, 2),
        alert(2, Severity::High, 48),
        alert(3, Severity::High, 24 * 30),
    ];
    let evaluation = evaluate(&alerts, &default_policy(), NOW);
    assert_eq!(evaluation.violation.unwrap().alert_id, 2);
}

#[test]
fn uncovered_severity_is_a_gap_not_a_violation() {
    let alerts = vec![alert(1, Severity::Critical, 24 * 100)];
    let evaluation = evaluate(&alerts, &default_policy(), NOW);
    assert!(!evaluation.exceeded());
    assert_eq!(evaluation.gaps.len(), 1);
    assert_eq!(evaluation.gaps[0].alert_id, 1);
    assert_eq!(evaluation.gaps[0].severity, "critical");
}

#[test]
fn gaps_before_a_violation_are_reported() {
    let alerts = vec![
        alert(1, Severity::Other("note".to_string()), 1),
        alert(2, Severity::High, 48),
        alert(3, Severity::Critical, 24 * 100),
    ];
    let evaluation = evaluate(&alerts, &default_policy(), NOW);
    assert_eq!(evaluation.violation.as_ref().unwrap().alert_id, 2);
    // Only the gap observed before the short-circuit point is recorded.
    assert_eq!(evaluation.gaps.len(), 1);
    assert_eq!(evaluation.gaps[0].severity, "note");
}

#[test]
fn empty_policy_flags_every_severity() {
    let alerts = vec![alert(1, Severity::High, 24 * 400), alert(2, Severity::Low, 1)];
    let evaluation = evaluate(&alerts, &Policy::default(), NOW);
    assert!(!evaluation.exceeded());
    assert_eq!(evaluation.gaps.len(), 2);
}

#[test]
fn zero_day_limit_blocks_any_aged_alert() {
    let policy: Policy = [("high".to_string(), 0)].into_iter().collect();
    let alerts = vec![alert(1, Severity::High, 1)];
    assert!(evaluate(&alerts, &policy, NOW).exceeded());
}

#[test]
fn oversized_day_limit_never_violates() {
    let policy: Policy = [("high".to_string(), u64::MAX)].into_iter().collect();
    let alerts = vec![alert(1, Severity::High, 24 * 365)];
    assert!(!evaluate(&alerts, &policy, NOW).exceeded());
}
