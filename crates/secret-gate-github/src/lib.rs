// crates/secret-gate-github/src/lib.rs
// ============================================================================
// Module: Secret Gate GitHub Client
// Description: Bounded REST client for alerts, policy files, and PR comments.
// Purpose: Provide the three upstream calls the gate makes, fail closed.
// Dependencies: secret-gate-core, reqwest, serde, url
// ============================================================================

//! ## Overview
//! This crate wraps the three GitHub REST calls Secret Gate performs: listing
//! open secret-scanning alerts, fetching the raw policy document from a
//! configuration repository, and posting the summary comment on a pull
//! request. Every call carries a bounded timeout, follows no redirects, and
//! enforces a response size limit. No call is retried; the first failure
//! aborts the run.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod client;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use client::ApiError;
pub use client::GithubClient;
pub use client::GithubClientConfig;
