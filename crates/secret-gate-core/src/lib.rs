// crates/secret-gate-core/src/lib.rs
// ============================================================================
// Module: Secret Gate Core
// Description: Alert model, age policy, limit evaluator, and report rendering.
// Purpose: Provide the deterministic decision logic behind the CI gate.
// Dependencies: serde, serde_yaml, thiserror, time
// ============================================================================

//! ## Overview
//! This crate holds the decision logic of Secret Gate: the alert and policy
//! data model, the age-limit evaluator, and the pull-request report renderer.
//! The crate performs no I/O and never reads wall-clock time; callers supply
//! the evaluation instant so that every decision is replayable in tests.
//! Invariants:
//! - Evaluation compares every alert against one caller-supplied instant.
//! - A severity without a policy entry is flagged as a gap, never a violation.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod alert;
pub mod evaluate;
pub mod policy;
pub mod report;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use alert::Alert;
pub use alert::Severity;
pub use evaluate::Evaluation;
pub use evaluate::PolicyGap;
pub use evaluate::Violation;
pub use evaluate::evaluate;
pub use policy::Policy;
pub use policy::PolicyError;
pub use report::MAX_REPORT_ROWS;
pub use report::render_report;
