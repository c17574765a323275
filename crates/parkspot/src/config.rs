//! Resolution of the active profile plus CLI flag overrides into the
//! `GatewayConfig` and per-user identifiers the commands need.
//!
//! Core never sees these types: it receives a pre-built `GatewayConfig`.

use std::time::Duration;

use parkspot_config::{Config, Profile, config_path, load_config, parse_base_url};
use parkspot_core::{GatewayConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Everything a backend-bound command needs besides its own arguments.
#[derive(Debug, Clone)]
pub struct Session {
    pub profile_name: String,
    pub gateway: GatewayConfig,
    pub user_id: Option<u64>,
    pub car_id: Option<u64>,
    pub account: Option<String>,
    /// The profile the session was built from, when one exists.
    pub profile: Option<Profile>,
}

impl Session {
    pub fn require_user(&self) -> Result<u64, CliError> {
        self.user_id.ok_or_else(|| CliError::MissingId {
            what: "user".into(),
            flag: "--user".into(),
            key: "user_id".into(),
        })
    }

    pub fn require_car(&self) -> Result<u64, CliError> {
        self.car_id.ok_or_else(|| CliError::MissingId {
            what: "car".into(),
            flag: "--car".into(),
            key: "car_id".into(),
        })
    }
}

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    config.active_profile_name(global.profile.as_deref())
}

/// Build a [`Session`] from the config file, profile, and CLI overrides.
pub fn build_session(global: &GlobalOpts) -> Result<Session, CliError> {
    let cfg = load_config()?;
    let profile_name = active_profile_name(global, &cfg);

    // If a profile exists, use it with CLI flag overrides
    if let Some(profile) = cfg.profiles.get(&profile_name) {
        return resolve_profile(profile, &profile_name, global);
    }

    // An explicitly requested profile must exist
    if global.profile.is_some() {
        return Err(CliError::ProfileNotFound {
            available: cfg.profile_names(),
            name: profile_name,
        });
    }

    // No profile found -- try to build from CLI flags / env vars alone
    let url_str = global.base_url.as_deref().ok_or_else(|| CliError::NoConfig {
        path: config_path().display().to_string(),
    })?;
    let mut gateway = GatewayConfig::new(parse_base_url(url_str)?);
    gateway.timeout = Duration::from_secs(global.timeout.unwrap_or(cfg.defaults.timeout));
    if global.insecure {
        gateway.tls = TlsVerification::DangerAcceptInvalid;
    }

    Ok(Session {
        profile_name,
        gateway,
        user_id: global.user,
        car_id: global.car,
        account: None,
        profile: None,
    })
}

/// Translate a `Profile` + global flags into a [`Session`].
///
/// This is the single boundary where CLI flags override profile values.
pub fn resolve_profile(
    profile: &Profile,
    profile_name: &str,
    global: &GlobalOpts,
) -> Result<Session, CliError> {
    let mut gateway = parkspot_config::profile_to_gateway_config(profile)?;

    // Base URL (flag > env > profile)
    if let Some(ref url_str) = global.base_url {
        gateway.base_url = parse_base_url(url_str)?;
    }

    if global.insecure {
        gateway.tls = TlsVerification::DangerAcceptInvalid;
    }

    if let Some(secs) = global.timeout {
        gateway.timeout = Duration::from_secs(secs);
    }

    Ok(Session {
        profile_name: profile_name.into(),
        gateway,
        user_id: global.user.or(profile.user_id),
        car_id: global.car.or(profile.car_id),
        account: profile.account.clone(),
        profile: Some(profile.clone()),
    })
}
