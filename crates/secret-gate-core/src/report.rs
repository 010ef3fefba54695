// crates/secret-gate-core/src/report.rs
// ============================================================================
// Module: Secret Gate Report Rendering
// Description: Markdown summary table posted to the pull request.
// Purpose: Render a bounded, deterministic view of the fetched alerts.
// Dependencies: crate::alert, time
// ============================================================================

//! ## Overview
//! The report is a Markdown table over the first [`MAX_REPORT_ROWS`] alerts
//! in original fetch order, followed by an overflow note when more alerts
//! exist. Timestamps are rendered in their upstream RFC 3339 form.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Write;

use time::format_description::well_known::Rfc3339;

use crate::alert::Alert;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum number of alert rows rendered into the report table.
pub const MAX_REPORT_ROWS: usize = 20;

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Renders the pull-request comment body for the given alerts.
///
/// The table covers the first [`MAX_REPORT_ROWS`] alerts in fetch order;
/// when more exist a trailing note states how many were omitted.
#[must_use]
pub fn render_report(alerts: &[Alert]) -> String {
    let mut body = String::from("## Secret Scanning Alerts\n\n");
    body.push_str("| Alert | Severity | Created At |\n");
    body.push_str("|-------|----------|------------|\n");
    for alert in alerts.iter().take(MAX_REPORT_ROWS) {
        let created = alert
            .created_at
            .format(&Rfc3339)
            .unwrap_or_else(|_| alert.created_at.to_string());
        // String formatting is infallible; the Write error cannot surface.
        let _ = writeln!(
            &mut body,
            "| {} | {} | {} |",
            alert.secret, alert.severity, created
        );
    }
    if alerts.len() > MAX_REPORT_ROWS {
        let omitted = alerts.len() - MAX_REPORT_ROWS;
        let _ = write!(&mut body, "\n...and {omitted} more alerts.\n");
    }
    body
}
