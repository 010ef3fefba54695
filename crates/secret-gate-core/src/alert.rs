// crates/secret-gate-core/src/alert.rs
// ============================================================================
// Module: Secret Gate Alert Model
// Description: Secret-scanning alert records and severity levels.
// Purpose: Give the evaluator a typed view of upstream alert payloads.
// Dependencies: serde, time
// ============================================================================

//! ## Overview
//! Alerts arrive as a JSON array from the scanning service and are immutable
//! once fetched. Unknown payload fields are ignored; unknown severity values
//! are preserved verbatim so that policy-gap warnings can name them.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use time::OffsetDateTime;

// ============================================================================
// SECTION: Severity
// ============================================================================

/// Severity level reported by the scanning service.
///
/// # Invariants
/// - Known variants serialize as lowercase names.
/// - Values outside the known set round-trip through [`Severity::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Low severity finding.
    Low,
    /// Medium severity finding.
    Medium,
    /// High severity finding.
    High,
    /// Critical severity finding.
    Critical,
    /// Severity name not in the known set, preserved verbatim.
    #[serde(untagged)]
    Other(String),
}

impl Severity {
    /// Returns the severity name as used in policy lookups.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
            Self::Other(name) => name.as_str(),
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Alert
// ============================================================================

/// A single detected-secret finding.
///
/// # Invariants
/// - Records are immutable once fetched and are never persisted.
/// - `created_at` is the upstream creation instant in UTC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    /// Upstream alert identifier.
    pub id: u64,
    /// Detected secret value as reported by the scanning service.
    pub secret: String,
    /// Reported severity level.
    pub severity: Severity,
    /// Creation timestamp of the alert.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}
