//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use parkspot_config::ConfigError;
use parkspot_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const REJECTED: i32 = 5;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
    pub const UNAVAILABLE: i32 = 9;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to backend at {url}")]
    #[diagnostic(
        code(parkspot::connection_failed),
        help(
            "Check that the backend is running and accessible.\n\
             Reason: {reason}"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(parkspot::timeout),
        help("Increase timeout with --timeout or check backend responsiveness.")
    )]
    Timeout { seconds: u64 },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(parkspot::auth_failed),
        help("Verify the account and password, then run: parkspot login")
    )]
    AuthFailed { message: String },

    #[error("No password configured for profile '{profile}'")]
    #[diagnostic(
        code(parkspot::no_credentials),
        help(
            "Store one with: parkspot config set-password\n\
             Or set the PARKSPOT_PASSWORD environment variable."
        )
    )]
    NoCredentials { profile: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(parkspot::not_found),
        help("Run: parkspot {list_command} to check what exists")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("Parking spot unavailable: {message}")]
    #[diagnostic(
        code(parkspot::spot_unavailable),
        help("Pick another spot. Run: parkspot lots list")
    )]
    SpotUnavailable { message: String },

    #[error("Request rejected: {message}")]
    #[diagnostic(code(parkspot::rejected))]
    Rejected { message: String },

    #[error("Backend unavailable: {message}")]
    #[diagnostic(code(parkspot::unavailable), help("Retry in a moment."))]
    ServiceUnavailable { message: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error ({code}): {message}")]
    #[diagnostic(code(parkspot::api_error))]
    ApiError { code: String, message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(parkspot::validation))]
    Validation { field: String, reason: String },

    #[error("No {what} ID given")]
    #[diagnostic(
        code(parkspot::missing_id),
        help(
            "Pass {flag}, or store it with: parkspot config set {key} <ID>"
        )
    )]
    MissingId {
        what: String,
        flag: String,
        key: String,
    },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(parkspot::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: parkspot config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("Configuration file not found")]
    #[diagnostic(
        code(parkspot::no_config),
        help(
            "Create one with: parkspot config init\n\
             Or pass --base-url.\n\
             Expected at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(parkspot::config))]
    Config { message: String },

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(parkspot::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO / Serialization ────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render output: {0}")]
    #[diagnostic(code(parkspot::render))]
    Render(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::SpotUnavailable { .. } => exit_code::CONFLICT,
            Self::Rejected { .. } => exit_code::REJECTED,
            Self::ServiceUnavailable { .. } => exit_code::UNAVAILABLE,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Validation { .. }
            | Self::MissingId { .. }
            | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

fn list_command_for(entity_type: &str) -> &'static str {
    match entity_type {
        "car" => "car show",
        "reservation" => "reservation show",
        "profile" => "profile show",
        "user" => "status",
        _ => "lots list",
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => {
                CliError::ConnectionFailed { url, reason }
            }

            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },

            CoreError::Timeout { timeout_secs } => CliError::Timeout {
                seconds: timeout_secs,
            },

            CoreError::NotFound {
                entity_type,
                identifier,
            } => CliError::NotFound {
                list_command: list_command_for(&entity_type).into(),
                resource_type: entity_type,
                identifier,
            },

            CoreError::SpotUnavailable { message } => CliError::SpotUnavailable { message },

            CoreError::Rejected { message } => CliError::Rejected { message },

            CoreError::ServiceUnavailable { message } => CliError::ServiceUnavailable { message },

            CoreError::Api { message, status } => CliError::ApiError {
                code: status.map_or_else(|| "unknown".into(), |s| s.to_string()),
                message,
            },

            CoreError::Config { message } => CliError::Config { message },

            CoreError::Internal(message) => CliError::ApiError {
                code: "internal".into(),
                message,
            },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::UnknownProfile { name, available } => {
                CliError::ProfileNotFound { name, available }
            }
            ConfigError::NoCredentials { profile } => CliError::NoCredentials { profile },
            ConfigError::Io(e) => CliError::Io(e),
            other => CliError::Config {
                message: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taken_spot_exits_with_conflict() {
        let err = CliError::from(CoreError::SpotUnavailable {
            message: "taken".into(),
        });
        assert_eq!(err.exit_code(), exit_code::CONFLICT);
    }

    #[test]
    fn missing_car_points_at_car_show() {
        let err = CliError::from(CoreError::NotFound {
            entity_type: "car".into(),
            identifier: "3".into(),
        });
        match err {
            CliError::NotFound { list_command, .. } => assert_eq!(list_command, "car show"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn missing_id_is_a_usage_error() {
        let err = CliError::MissingId {
            what: "user".into(),
            flag: "--user".into(),
            key: "user_id".into(),
        };
        assert_eq!(err.exit_code(), exit_code::USAGE);
    }
}
