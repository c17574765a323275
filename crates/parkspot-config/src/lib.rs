//! Shared configuration for the parkspot CLI and TUI.
//!
//! TOML profiles, password resolution (env + keyring + plaintext), and
//! translation to `parkspot_core::GatewayConfig`. Both binaries depend on
//! this crate; the CLI adds `GlobalOpts`-aware overrides on top.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use parkspot_core::{DisplayConfig, GatewayConfig, StartFrom, TlsVerification};

const KEYRING_SERVICE: &str = "parkspot";

/// Environment variable consulted first for the login password.
pub const PASSWORD_ENV: &str = "PARKSPOT_PASSWORD";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{name}' not found (available: {available})")]
    UnknownProfile { name: String, available: String },

    #[error("no password configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration shared by CLI and TUI.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named backend profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

impl Config {
    /// Name of the profile to use: the override, else `default_profile`,
    /// else `"default"`.
    pub fn active_profile_name(&self, requested: Option<&str>) -> String {
        requested
            .map(str::to_owned)
            .or_else(|| self.default_profile.clone())
            .unwrap_or_else(|| "default".into())
    }

    /// Look up a profile by name.
    pub fn profile(&self, name: &str) -> Result<&Profile, ConfigError> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::UnknownProfile {
                name: name.into(),
                available: self.profile_names(),
            })
    }

    /// Sorted, comma-separated profile names; `(none)` when there are none.
    pub fn profile_names(&self) -> String {
        let mut names: Vec<_> = self.profiles.keys().map(String::as_str).collect();
        if names.is_empty() {
            return "(none)".into();
        }
        names.sort_unstable();
        names.join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named backend profile.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Profile {
    /// Backend base URL (e.g., "http://localhost:5000").
    pub base_url: String,

    /// User the per-user commands act for.
    pub user_id: Option<u64>,

    /// Car the reservation commands act for.
    pub car_id: Option<u64>,

    /// Login account name.
    pub account: Option<String>,

    /// Login password (plaintext, prefer keyring).
    pub password: Option<String>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Accept invalid TLS certificates.
    pub insecure: Option<bool>,

    /// Override timeout.
    pub timeout: Option<u64>,

    /// Occupancy presentation.
    #[serde(default)]
    pub display: DisplaySettings,
}

impl Profile {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            user_id: None,
            car_id: None,
            account: None,
            password: None,
            ca_cert: None,
            insecure: None,
            timeout: None,
            display: DisplaySettings::default(),
        }
    }
}

/// `[profiles.<name>.display]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct DisplaySettings {
    /// Milliseconds between two animation steps.
    #[serde(default = "default_step_interval_ms")]
    pub step_interval_ms: u64,

    /// Percentage points per animation step.
    #[serde(default = "default_step")]
    pub step: u8,

    /// `zero` or `previous`.
    #[serde(default)]
    pub start_from: StartFrom,

    /// Seconds between lot polls; 0 disables polling.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            step_interval_ms: default_step_interval_ms(),
            step: default_step(),
            start_from: StartFrom::default(),
            poll_interval_secs: default_poll_interval_secs(),
        }
    }
}

fn default_step_interval_ms() -> u64 {
    1000
}
fn default_step() -> u8 {
    1
}
fn default_poll_interval_secs() -> u64 {
    10
}

impl DisplaySettings {
    /// Validate and convert into the core animation config.
    pub fn to_display_config(self) -> Result<DisplayConfig, ConfigError> {
        if self.step == 0 {
            return Err(ConfigError::Validation {
                field: "display.step".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.step_interval_ms == 0 {
            return Err(ConfigError::Validation {
                field: "display.step_interval_ms".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(DisplayConfig {
            step_interval: Duration::from_millis(self.step_interval_ms),
            step: self.step,
            start_from: self.start_from,
        })
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "parkspot", "parkspot").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("parkspot");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load the full Config from `path` + environment.
///
/// `PARKSPOT_` variables use `__` to reach nested keys, e.g.
/// `PARKSPOT_DEFAULTS__OUTPUT=json`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("PARKSPOT_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load the config as stored on disk, without environment overrides.
///
/// Read-modify-write paths use this so that `PARKSPOT_` variables never
/// leak into the saved file. A missing file yields the defaults; a file
/// that fails to parse is an error.
pub fn load_file_config() -> Result<Config, ConfigError> {
    load_file_config_from(&config_path())
}

/// Load the config stored at `path`, without environment overrides.
pub fn load_file_config_from(path: &Path) -> Result<Config, ConfigError> {
    let config: Config = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

/// Serialize config to TOML and write it to `path`.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

fn keyring_entry(profile_name: &str) -> Result<keyring::Entry, ConfigError> {
    Ok(keyring::Entry::new(
        KEYRING_SERVICE,
        &format!("{profile_name}/password"),
    )?)
}

/// Resolve the login password: env var, then keyring, then plaintext.
pub fn resolve_password(
    profile: &Profile,
    profile_name: &str,
) -> Result<SecretString, ConfigError> {
    // 1. Env var
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        return Ok(SecretString::from(pw));
    }

    // 2. Keyring
    if let Ok(entry) = keyring_entry(profile_name) {
        if let Ok(pw) = entry.get_password() {
            return Ok(SecretString::from(pw));
        }
    }

    // 3. Plaintext in config
    if let Some(ref pw) = profile.password {
        return Ok(SecretString::from(pw.clone()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Store a profile's password in the system keyring.
pub fn store_password(profile_name: &str, password: &str) -> Result<(), ConfigError> {
    keyring_entry(profile_name)?.set_password(password)?;
    Ok(())
}

// ── Translation to core config ──────────────────────────────────────

/// Parse and validate a backend base URL.
pub fn parse_base_url(raw: &str) -> Result<url::Url, ConfigError> {
    let url: url::Url = raw.parse().map_err(|_| ConfigError::Validation {
        field: "base_url".into(),
        reason: format!("invalid URL: {raw}"),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Validation {
            field: "base_url".into(),
            reason: format!("expected http or https, got '{}'", url.scheme()),
        });
    }
    Ok(url)
}

/// Build a `GatewayConfig` from a profile, without CLI flag overrides.
///
/// Suitable for the TUI and other non-CLI consumers.
pub fn profile_to_gateway_config(profile: &Profile) -> Result<GatewayConfig, ConfigError> {
    let base_url = parse_base_url(&profile.base_url)?;

    let tls = if profile.insecure.unwrap_or(false) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    Ok(GatewayConfig {
        base_url,
        tls,
        timeout: Duration::from_secs(profile.timeout.unwrap_or_else(default_timeout)),
        poll_interval: Duration::from_secs(profile.display.poll_interval_secs),
        display: profile.display.to_display_config()?,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn active_profile_prefers_override() {
        let cfg = Config {
            default_profile: Some("campus".into()),
            ..Config::default()
        };
        assert_eq!(cfg.active_profile_name(Some("home")), "home");
        assert_eq!(cfg.active_profile_name(None), "campus");

        let bare = Config {
            default_profile: None,
            ..Config::default()
        };
        assert_eq!(bare.active_profile_name(None), "default");
    }

    #[test]
    fn unknown_profile_is_an_error() {
        let err = Config::default().profile("nope").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownProfile { .. }));
        assert!(err.to_string().ends_with("(available: (none))"));
    }

    #[test]
    fn unknown_profile_lists_the_configured_ones() {
        let mut cfg = Config::default();
        cfg.profiles.insert("staging".into(), Profile::new("http://b"));
        cfg.profiles.insert("campus".into(), Profile::new("http://a"));

        let err = cfg.profile("home").unwrap_err();
        assert_eq!(
            err.to_string(),
            "profile 'home' not found (available: campus, staging)"
        );
    }

    #[test]
    fn gateway_config_carries_display_settings() {
        let mut profile = Profile::new("http://localhost:5000");
        profile.timeout = Some(5);
        profile.display = DisplaySettings {
            step_interval_ms: 250,
            step: 2,
            start_from: StartFrom::Zero,
            poll_interval_secs: 0,
        };

        let cfg = profile_to_gateway_config(&profile).unwrap();
        assert_eq!(cfg.base_url.as_str(), "http://localhost:5000/");
        assert_eq!(cfg.timeout, Duration::from_secs(5));
        assert_eq!(cfg.poll_interval, Duration::ZERO);
        assert_eq!(cfg.display.step_interval, Duration::from_millis(250));
        assert_eq!(cfg.display.step, 2);
        assert_eq!(cfg.display.start_from, StartFrom::Zero);
        assert_eq!(cfg.tls, TlsVerification::SystemDefaults);
    }

    #[test]
    fn insecure_wins_over_ca_cert() {
        let mut profile = Profile::new("https://parking.example");
        profile.ca_cert = Some("/tmp/ca.pem".into());
        profile.insecure = Some(true);
        let cfg = profile_to_gateway_config(&profile).unwrap();
        assert_eq!(cfg.tls, TlsVerification::DangerAcceptInvalid);
    }

    #[test]
    fn rejects_bad_urls() {
        assert!(matches!(
            parse_base_url("not a url"),
            Err(ConfigError::Validation { .. })
        ));
        assert!(matches!(
            parse_base_url("ftp://host"),
            Err(ConfigError::Validation { .. })
        ));
    }

    #[test]
    fn zero_step_is_rejected() {
        let settings = DisplaySettings {
            step: 0,
            ..DisplaySettings::default()
        };
        assert!(settings.to_display_config().is_err());
    }

    #[test]
    fn plaintext_password_is_last_resort() {
        let mut profile = Profile::new("http://localhost:5000");
        profile.password = Some("hunter2".into());
        // Env or keyring may win on a developer machine; only the error case
        // is deterministic without them.
        let unset = Profile::new("http://localhost:5000");
        if std::env::var(PASSWORD_ENV).is_err() {
            assert!(resolve_password(&profile, "parkspot-test-none").is_ok());
            assert!(matches!(
                resolve_password(&unset, "parkspot-test-none"),
                Err(ConfigError::NoCredentials { .. })
            ));
        }
    }
}
