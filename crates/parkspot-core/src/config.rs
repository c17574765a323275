// ── Runtime gateway configuration ──
//
// These types describe *how* to reach the reservation backend and how to
// present occupancy. They never touch disk: the CLI/TUI build a
// `GatewayConfig` from their own configuration and hand it in.

use std::time::Duration;

use url::Url;

use crate::progress::StartFrom;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (self-signed development backends).
    DangerAcceptInvalid,
}

/// How the animated occupancy percentage advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayConfig {
    /// Time between two animation steps.
    pub step_interval: Duration,
    /// Percentage points per step.
    pub step: u8,
    /// Where a new progression starts when the snapshot changes.
    pub start_from: StartFrom,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            step_interval: Duration::from_millis(1000),
            step: 1,
            start_from: StartFrom::Previous,
        }
    }
}

/// Configuration for talking to one backend.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Backend root URL (e.g., `http://localhost:5000`).
    pub base_url: Url,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Request timeout.
    pub timeout: Duration,
    /// How often the lot feed polls `/parkinglots`. Zero disables polling.
    pub poll_interval: Duration,
    /// Occupancy animation settings.
    pub display: DisplayConfig,
}

impl GatewayConfig {
    /// Configuration with defaults for everything except the URL.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            poll_interval: Duration::from_secs(10),
            display: DisplayConfig::default(),
        }
    }
}
