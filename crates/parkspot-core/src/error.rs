// ── Core error types ──
//
// User-facing errors from parkspot-core. Consumers never see HTTP status
// codes or JSON parse failures directly: the `From<parkspot_api::Error>`
// impl translates transport-layer errors into domain variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach backend at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Backend request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Parking spot unavailable: {message}")]
    SpotUnavailable { message: String },

    #[error("Request rejected by backend: {message}")]
    Rejected { message: String },

    #[error("Backend temporarily unavailable: {message}")]
    ServiceUnavailable { message: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Entity name for a backend resource path such as `/mycar/3`.
fn entity_for_path(path: &str) -> (String, String) {
    let mut segments = path.trim_matches('/').split('/');
    let resource = segments.next().unwrap_or_default();
    let identifier = segments.next_back().unwrap_or(resource).to_owned();
    let entity = match resource {
        "mycar" => "car",
        "parkinglots" => "parking lot",
        "profile" => "profile",
        "reservation" => "reservation",
        "history" => "spot",
        "userstatus" | "login" => "user",
        _ => "resource",
    };
    (entity.to_owned(), identifier)
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<parkspot_api::Error> for CoreError {
    fn from(err: parkspot_api::Error) -> Self {
        use parkspot_api::Error as ApiError;

        match err {
            ApiError::Authentication { message } => CoreError::AuthenticationFailed { message },
            ApiError::Transport(ref e) => {
                if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            ApiError::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            ApiError::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            ApiError::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            ApiError::NotFound { path, .. } => {
                let (entity_type, identifier) = entity_for_path(&path);
                CoreError::NotFound {
                    entity_type,
                    identifier,
                }
            }
            ApiError::Conflict { message } => CoreError::SpotUnavailable { message },
            ApiError::BadRequest { message } | ApiError::UnsupportedMediaType { message } => {
                CoreError::Rejected { message }
            }
            ApiError::Unavailable { message } => CoreError::ServiceUnavailable { message },
            ApiError::Api { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            ApiError::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
