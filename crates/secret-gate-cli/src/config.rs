// crates/secret-gate-cli/src/config.rs
// ============================================================================
// Module: Gate Configuration
// Description: Explicit run configuration resolved once at process start.
// Purpose: Validate every required input before any network call is made.
// Dependencies: thiserror, url
// ============================================================================

//! ## Overview
//! The gate never reads the environment from inside business logic. The
//! binary captures the relevant variables once, pairs them with the parsed
//! flags, and resolves a [`GateConfig`] up front. A missing or malformed
//! field fails fast with a [`ConfigError`] naming the flag and variable,
//! never as a transport failure deep in the call chain.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;
use url::Url;

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Default REST API base used when no override is provided.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";
/// Default timeout applied to every outbound call, in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration resolution errors.
///
/// # Invariants
/// - Every variant names the offending input for operator visibility.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required field was provided neither as a flag nor as a variable.
    #[error("missing {field}: pass {flag} or set {env}")]
    MissingField {
        /// Human-readable field name.
        field: &'static str,
        /// CLI flag that supplies the field.
        flag: &'static str,
        /// Environment variable fallback for the field.
        env: &'static str,
    },
    /// A repository identifier is not in `owner/name` form.
    #[error("{field} `{value}` is not an owner/name repository identifier")]
    InvalidRepository {
        /// Human-readable field name.
        field: &'static str,
        /// Rejected value.
        value: String,
    },
    /// The pull-request number is not a positive integer.
    #[error("pull-request number `{0}` is not a positive integer")]
    InvalidPrNumber(String),
    /// The API base URL could not be parsed.
    #[error("api base `{0}` is not a valid url")]
    InvalidApiBase(String),
    /// The request timeout is zero.
    #[error("request timeout must be greater than zero")]
    InvalidTimeout,
}

// ============================================================================
// SECTION: Inputs
// ============================================================================

/// Flag-level overrides collected from the command line.
#[derive(Debug, Clone, Default)]
pub struct GateOverrides {
    /// Target repository in `owner/name` form.
    pub repository: Option<String>,
    /// Access token for every API call.
    pub token: Option<String>,
    /// Repository holding the policy document.
    pub config_repository: Option<String>,
    /// Path of the policy document within the configuration repository.
    pub config_path: Option<String>,
    /// Pull request to comment on when the gate fails.
    pub pr_number: Option<u64>,
    /// REST API base URL override.
    pub api_base: Option<String>,
    /// Request timeout override in milliseconds.
    pub timeout_ms: Option<u64>,
    /// Allow a cleartext `http://` API base (loopback testing only).
    pub allow_http: bool,
}

/// Environment fallbacks captured once at process start.
#[derive(Debug, Clone, Default)]
pub struct EnvValues {
    /// `GITHUB_REPOSITORY` value, when set.
    pub repository: Option<String>,
    /// `GITHUB_TOKEN` value, when set.
    pub token: Option<String>,
    /// `CONFIG_REPO` value, when set.
    pub config_repository: Option<String>,
    /// `CONFIG_PATH` value, when set.
    pub config_path: Option<String>,
    /// `PR_NUMBER` value, when set.
    pub pr_number: Option<String>,
    /// `GITHUB_API_URL` value, when set.
    pub api_base: Option<String>,
}

impl EnvValues {
    /// Captures the relevant environment variables.
    #[must_use]
    pub fn capture() -> Self {
        Self {
            repository: std::env::var("GITHUB_REPOSITORY").ok(),
            token: std::env::var("GITHUB_TOKEN").ok(),
            config_repository: std::env::var("CONFIG_REPO").ok(),
            config_path: std::env::var("CONFIG_PATH").ok(),
            pr_number: std::env::var("PR_NUMBER").ok(),
            api_base: std::env::var("GITHUB_API_URL").ok(),
        }
    }
}

// ============================================================================
// SECTION: Resolved Configuration
// ============================================================================

/// Fully validated run configuration.
///
/// # Invariants
/// - Repository identifiers are in `owner/name` form.
/// - `pr_number` is positive and `timeout_ms` is non-zero.
/// - Constructed once at process start and passed by reference thereafter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateConfig {
    /// Target repository in `owner/name` form.
    pub repository: String,
    /// Access token for every API call.
    pub token: String,
    /// Repository holding the policy document.
    pub config_repository: String,
    /// Path of the policy document within the configuration repository.
    pub config_path: String,
    /// Pull request to comment on when the gate fails.
    pub pr_number: u64,
    /// REST API base URL.
    pub api_base: Url,
    /// Timeout applied to every outbound call, in milliseconds.
    pub timeout_ms: u64,
    /// Allow a cleartext `http://` API base (loopback testing only).
    pub allow_http: bool,
}

impl GateConfig {
    /// Resolves the configuration from flags and environment fallbacks.
    ///
    /// Flags take precedence over environment variables. All required
    /// fields are validated here, before any network call.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] naming the first missing or invalid field.
    pub fn resolve(overrides: GateOverrides, env: EnvValues) -> Result<Self, ConfigError> {
        let repository = require(
            overrides.repository.or(env.repository),
            "target repository",
            "--repo",
            "GITHUB_REPOSITORY",
        )?;
        validate_repository("target repository", &repository)?;
        let token =
            require(overrides.token.or(env.token), "access token", "--token", "GITHUB_TOKEN")?;
        let config_repository = require(
            overrides.config_repository.or(env.config_repository),
            "configuration repository",
            "--config-repo",
            "CONFIG_REPO",
        )?;
        validate_repository("configuration repository", &config_repository)?;
        let config_path = require(
            overrides.config_path.or(env.config_path),
            "configuration path",
            "--config-path",
            "CONFIG_PATH",
        )?;
        let pr_number = resolve_pr_number(overrides.pr_number, env.pr_number)?;
        let api_base_text = overrides
            .api_base
            .or(env.api_base)
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let api_base =
            Url::parse(&api_base_text).map_err(|_| ConfigError::InvalidApiBase(api_base_text))?;
        let timeout_ms = overrides.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS);
        if timeout_ms == 0 {
            return Err(ConfigError::InvalidTimeout);
        }
        Ok(Self {
            repository,
            token,
            config_repository,
            config_path,
            pr_number,
            api_base,
            timeout_ms,
            allow_http: overrides.allow_http,
        })
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Requires a field value, naming its flag and variable when absent.
fn require(
    value: Option<String>,
    field: &'static str,
    flag: &'static str,
    env: &'static str,
) -> Result<String, ConfigError> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::MissingField {
            field,
            flag,
            env,
        }),
    }
}

/// Validates that a repository identifier is in `owner/name` form.
fn validate_repository(field: &'static str, value: &str) -> Result<(), ConfigError> {
    let valid = matches!(
        value.split('/').collect::<Vec<_>>().as_slice(),
        [owner, name] if !owner.is_empty() && !name.is_empty()
    );
    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidRepository {
            field,
            value: value.to_string(),
        })
    }
}

/// Resolves the pull-request number from flag or environment text.
fn resolve_pr_number(
    flag: Option<u64>,
    env: Option<String>,
) -> Result<u64, ConfigError> {
    let number = match (flag, env) {
        (Some(number), _) => number,
        (None, Some(text)) => {
            text.parse::<u64>().map_err(|_| ConfigError::InvalidPrNumber(text))?
        }
        (None, None) => {
            return Err(ConfigError::MissingField {
                field: "pull-request number",
                flag: "--pr-number",
                env: "PR_NUMBER",
            });
        }
    };
    if number == 0 {
        return Err(ConfigError::InvalidPrNumber(number.to_string()));
    }
    Ok(number)
}
