// crates/secret-gate-cli/src/gate.rs
// ============================================================================
// Module: Gate Run Pipeline
// Description: Fetch, evaluate, and report in one strictly sequential pass.
// Purpose: Map the pipeline onto a pass/violation outcome with typed errors.
// Dependencies: crate::config, secret-gate-core, secret-gate-github, time
// ============================================================================

//! ## Overview
//! One gate run is a linear pipeline: fetch the open alerts, fetch and parse
//! the policy document, evaluate alert ages against one fixed instant, and
//! on violation post the summary comment before surfacing the failure. Any
//! transport or parse error aborts the run; there is no retry and no partial
//! success. Policy-gap warnings are written to the supplied sink so the
//! pipeline itself stays free of ambient output.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;

use secret_gate_core::Policy;
use secret_gate_core::PolicyError;
use secret_gate_core::Violation;
use secret_gate_core::evaluate;
use secret_gate_core::render_report;
use secret_gate_github::ApiError;
use secret_gate_github::GithubClient;
use secret_gate_github::GithubClientConfig;
use thiserror::Error;
use time::OffsetDateTime;

use crate::config::ConfigError;
use crate::config::GateConfig;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors that abort a gate run before a pass/violation decision.
///
/// # Invariants
/// - Infrastructure errors are distinct from the violation outcome.
#[derive(Debug, Error)]
pub enum GateError {
    /// Configuration resolution failed.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// An API call failed.
    #[error(transparent)]
    Api(#[from] ApiError),
    /// The policy document could not be parsed.
    #[error(transparent)]
    Policy(#[from] PolicyError),
    /// A diagnostic could not be written to the warning sink.
    #[error("failed to write diagnostics: {0}")]
    Output(#[from] std::io::Error),
}

// ============================================================================
// SECTION: Outcome
// ============================================================================

/// Business outcome of a completed gate run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    /// No alert exceeded its allowed age.
    Pass,
    /// An alert exceeded its allowed age; the comment has been posted.
    Violation(Violation),
}

// ============================================================================
// SECTION: Pipeline
// ============================================================================

/// Executes one gate run against the configured repositories.
///
/// Policy-gap warnings are written to `warnings` as they are observed. On
/// violation the summary comment is posted before the outcome is returned,
/// so a reporting failure surfaces as an error rather than a silent pass.
///
/// # Errors
///
/// Returns [`GateError`] when any fetch, parse, post, or diagnostic write
/// fails. Errors are never retried.
pub fn run_gate(config: &GateConfig, warnings: &mut dyn Write) -> Result<GateOutcome, GateError> {
    let client = GithubClient::new(GithubClientConfig {
        timeout_ms: config.timeout_ms,
        allow_http: config.allow_http,
        ..GithubClientConfig::new(config.api_base.clone(), config.token.clone())
    })?;

    let alerts = client.fetch_alerts(&config.repository)?;
    let document = client.fetch_raw_file(&config.config_repository, &config.config_path)?;
    let policy = Policy::from_yaml(&document)?;

    // One instant for the whole pass; no drift across a long alert list.
    let now = OffsetDateTime::now_utc();
    let evaluation = evaluate(&alerts, &policy, now);
    for gap in &evaluation.gaps {
        writeln!(
            warnings,
            "warning: no policy entry for severity `{}` (alert {})",
            gap.severity, gap.alert_id
        )?;
    }

    match evaluation.violation {
        Some(violation) => {
            let body = render_report(&alerts);
            client.post_pr_comment(&config.repository, config.pr_number, &body)?;
            Ok(GateOutcome::Violation(violation))
        }
        None => Ok(GateOutcome::Pass),
    }
}
