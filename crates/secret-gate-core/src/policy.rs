// crates/secret-gate-core/src/policy.rs
// ============================================================================
// Module: Secret Gate Age Policy
// Description: Per-severity maximum-age policy parsed from YAML.
// Purpose: Resolve allowed alert ages with an explicit document schema.
// Dependencies: serde, serde_yaml, thiserror
// ============================================================================

//! ## Overview
//! The policy document maps severity names to maximum allowed alert age in
//! whole days. Two document shapes exist in the wild: a flat
//! `{severity: days}` mapping and the same mapping nested under a
//! `secret-scanning:` key. Both are accepted; when the nested table is
//! present it takes precedence and top-level entries are ignored. No default
//! policy is ever substituted for a failed parse.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_yaml::Value;
use thiserror::Error;

use crate::alert::Severity;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Policy document errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum PolicyError {
    /// The document is not valid YAML or has an unexpected shape.
    #[error("policy document parse failed: {0}")]
    Parse(#[from] serde_yaml::Error),
    /// A severity entry is not a non-negative integer day count.
    #[error("policy entry for severity `{severity}` must be a non-negative integer day count")]
    InvalidDays {
        /// Severity name of the offending entry.
        severity: String,
    },
}

// ============================================================================
// SECTION: Document Shape
// ============================================================================

/// Raw policy document accepting both the flat and nested schemas.
#[derive(Debug, Deserialize)]
struct PolicyDocument {
    /// Optional nested severity table; wins over top-level entries.
    #[serde(rename = "secret-scanning")]
    secret_scanning: Option<BTreeMap<String, Value>>,
    /// Top-level entries used when no nested table is present.
    #[serde(flatten)]
    top_level: BTreeMap<String, Value>,
}

// ============================================================================
// SECTION: Policy
// ============================================================================

/// Per-severity maximum allowed alert age.
///
/// # Invariants
/// - Day counts are non-negative whole days.
/// - The mapping is immutable for the duration of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Policy {
    /// Maximum allowed age in days, keyed by severity name.
    limits: BTreeMap<String, u64>,
}

impl Policy {
    /// Parses a policy from YAML text.
    ///
    /// Applies the documented schema precedence: a nested `secret-scanning`
    /// table, when present, replaces any top-level severity entries.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError`] when the document is not valid YAML or an
    /// entry is not a non-negative integer.
    pub fn from_yaml(text: &str) -> Result<Self, PolicyError> {
        let document: PolicyDocument = serde_yaml::from_str(text)?;
        let entries = document.secret_scanning.unwrap_or(document.top_level);
        let mut limits = BTreeMap::new();
        for (severity, value) in entries {
            let days = value.as_u64().ok_or(PolicyError::InvalidDays {
                severity: severity.clone(),
            })?;
            limits.insert(severity, days);
        }
        Ok(Self {
            limits,
        })
    }

    /// Returns the maximum allowed age in days for a severity, when set.
    #[must_use]
    pub fn max_age_days(&self, severity: &Severity) -> Option<u64> {
        self.limits.get(severity.as_str()).copied()
    }

    /// Returns true when the policy holds no severity entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.limits.is_empty()
    }
}

impl FromIterator<(String, u64)> for Policy {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        Self {
            limits: iter.into_iter().collect(),
        }
    }
}
