// crates/secret-gate-cli/src/main.rs
// ============================================================================
// Module: Secret Gate CLI Entry Point
// Description: Flag parsing and exit-status mapping for the gate run.
// Purpose: Distinguish pass, violation, and infrastructure error exits.
// Dependencies: clap, secret-gate-cli
// ============================================================================

//! ## Overview
//! The binary parses flags, captures environment fallbacks once, resolves
//! the configuration, and runs the gate. Exit status 0 means no violation,
//! 1 means an alert exceeded its allowed age (the comment has been posted),
//! and 2 means the run itself failed before a decision was reached.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Parser;
use secret_gate_cli::EnvValues;
use secret_gate_cli::GateConfig;
use secret_gate_cli::GateError;
use secret_gate_cli::GateOutcome;
use secret_gate_cli::GateOverrides;
use secret_gate_cli::run_gate;

// ============================================================================
// SECTION: Exit Codes
// ============================================================================

/// Exit status for a run that failed before reaching a decision.
const EXIT_ERROR: u8 = 2;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "secret-gate", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue)]
    show_version: bool,
    /// Target repository in owner/name form (falls back to `GITHUB_REPOSITORY`).
    #[arg(long = "repo", value_name = "OWNER/NAME")]
    repository: Option<String>,
    /// Access token (falls back to `GITHUB_TOKEN`).
    #[arg(long, value_name = "TOKEN")]
    token: Option<String>,
    /// Repository holding the policy document (falls back to `CONFIG_REPO`).
    #[arg(long = "config-repo", value_name = "OWNER/NAME")]
    config_repository: Option<String>,
    /// Path of the policy document (falls back to `CONFIG_PATH`).
    #[arg(long = "config-path", value_name = "PATH")]
    config_path: Option<String>,
    /// Pull request to comment on (falls back to `PR_NUMBER`).
    #[arg(long = "pr-number", value_name = "N")]
    pr_number: Option<u64>,
    /// REST API base URL (falls back to `GITHUB_API_URL`).
    #[arg(long = "api-base", value_name = "URL")]
    api_base: Option<String>,
    /// Timeout for every outbound call, in milliseconds.
    #[arg(long = "timeout-ms", value_name = "MS")]
    timeout_ms: Option<u64>,
    /// Allow a cleartext http API base (loopback testing only).
    #[arg(long = "allow-http", action = ArgAction::SetTrue)]
    allow_http: bool,
}

impl Cli {
    /// Converts parsed flags into configuration overrides.
    fn into_overrides(self) -> GateOverrides {
        GateOverrides {
            repository: self.repository,
            token: self.token,
            config_repository: self.config_repository,
            config_path: self.config_path,
            pr_number: self.pr_number,
            api_base: self.api_base,
            timeout_ms: self.timeout_ms,
            allow_http: self.allow_http,
        }
    }
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Resolves the configuration and executes the gate run.
fn run() -> Result<ExitCode, GateError> {
    let cli = Cli::parse();
    if cli.show_version {
        write_stdout_line(env!("CARGO_PKG_VERSION"))?;
        return Ok(ExitCode::SUCCESS);
    }

    let config = GateConfig::resolve(cli.into_overrides(), EnvValues::capture())?;
    let mut stderr = std::io::stderr();
    match run_gate(&config, &mut stderr)? {
        GateOutcome::Pass => {
            write_stdout_line("no secret-scanning alert exceeds its allowed age")?;
            Ok(ExitCode::SUCCESS)
        }
        GateOutcome::Violation(violation) => {
            write_stderr_line(&format!(
                "secret-scanning alert {} (severity {}) is older than its {}-day limit; \
                 blocking this pull request",
                violation.alert_id, violation.severity, violation.allowed_days
            ))?;
            Ok(ExitCode::FAILURE)
        }
    }
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Reports a fatal error and returns the infrastructure-error exit status.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(&format!("error: {message}"));
    ExitCode::from(EXIT_ERROR)
}
