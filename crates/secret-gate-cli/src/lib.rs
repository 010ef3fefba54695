// crates/secret-gate-cli/src/lib.rs
// ============================================================================
// Module: Secret Gate CLI Library
// Description: Configuration resolution and the gate run pipeline.
// Purpose: Keep the run logic testable behind the thin binary entry point.
// Dependencies: secret-gate-core, secret-gate-github, thiserror, time, url
// ============================================================================

//! ## Overview
//! The binary delegates to this crate: [`config`] resolves and validates the
//! run configuration from flags and environment fallbacks before any network
//! call, and [`gate`] executes the fetch → evaluate → report pipeline and
//! maps it onto a pass/violation outcome.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod gate;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::ConfigError;
pub use config::EnvValues;
pub use config::GateConfig;
pub use config::GateOverrides;
pub use gate::GateError;
pub use gate::GateOutcome;
pub use gate::run_gate;
