use thiserror::Error;

/// Top-level error type for the `parkspot-api` crate.
///
/// Covers every failure mode of the reservation backend: transport,
/// authentication, the backend's status-code conventions, and payload
/// decoding. `parkspot-core` maps these into user-facing errors.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Login rejected (unknown account or wrong password).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request timed out.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// TLS handshake or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Backend status codes ────────────────────────────────────────
    /// HTTP 404: the car, reservation, spot or profile does not exist.
    #[error("Not found: {path}")]
    NotFound { path: String, message: Option<String> },

    /// HTTP 409: the requested spot is already reserved or occupied.
    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// HTTP 400: a required body field is missing or malformed.
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// HTTP 415: the request carried no JSON body.
    #[error("Unsupported media type: {message}")]
    UnsupportedMediaType { message: String },

    /// HTTP 503: the backend could not commit the change.
    #[error("Service unavailable: {message}")]
    Unavailable { message: String },

    /// Any other non-success status.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

/// Error bodies are `{"message": "..."}` or `{"error": "..."}` when present.
#[derive(serde::Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

impl Error {
    /// Classify a non-success HTTP response.
    ///
    /// `path` is the request path, used for `NotFound` diagnostics.
    pub fn from_status(status: u16, path: &str, body: &str) -> Self {
        let detail = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message.or(b.error));
        let message = detail
            .clone()
            .unwrap_or_else(|| body.chars().take(200).collect::<String>().trim().to_owned());

        match status {
            400 => Self::BadRequest { message },
            401 | 403 => Self::Authentication { message },
            404 => Self::NotFound {
                path: path.to_owned(),
                message: detail,
            },
            409 => Self::Conflict { message },
            415 => Self::UnsupportedMediaType { message },
            503 => Self::Unavailable { message },
            _ => Self::Api { status, message },
        }
    }

    /// HTTP status associated with this error, if it came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            Self::Authentication { .. } => Some(401),
            Self::NotFound { .. } => Some(404),
            Self::Conflict { .. } => Some(409),
            Self::BadRequest { .. } => Some(400),
            Self::UnsupportedMediaType { .. } => Some(415),
            Self::Unavailable { .. } => Some(503),
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::NotFound { .. } => true,
            _ => false,
        }
    }
}
