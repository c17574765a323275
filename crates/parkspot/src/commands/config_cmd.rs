//! Config subcommand handlers.

use std::fmt::Write;

use dialoguer::{Input, Select};

use parkspot_config::{
    Config, Profile, config_path, load_config, load_file_config, parse_base_url, save_config,
    store_password,
};
use parkspot_core::StartFrom;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::active_profile_name;
use crate::error::CliError;
use crate::output;

use super::util::prompt_err;

const VALID_KEYS: &str = "base_url, user_id, car_id, account, insecure, timeout, ca_cert, \
     display.step_interval_ms, display.step, display.start_from, display.poll_interval_secs";

// ── Helpers ─────────────────────────────────────────────────────────

/// Format config for display, masking the password.
fn format_config_redacted(cfg: &Config) -> String {
    let mut out = String::new();

    if let Some(ref default) = cfg.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", cfg.defaults.output);
    let _ = writeln!(out, "color = \"{}\"", cfg.defaults.color);
    let _ = writeln!(out, "timeout = {}", cfg.defaults.timeout);

    let mut names: Vec<_> = cfg.profiles.keys().collect();
    names.sort();
    for name in names {
        let p = &cfg.profiles[name];
        let _ = writeln!(out);
        let _ = writeln!(out, "[profiles.{name}]");
        let _ = writeln!(out, "base_url = \"{}\"", p.base_url);
        if let Some(id) = p.user_id {
            let _ = writeln!(out, "user_id = {id}");
        }
        if let Some(id) = p.car_id {
            let _ = writeln!(out, "car_id = {id}");
        }
        if let Some(ref account) = p.account {
            let _ = writeln!(out, "account = \"{account}\"");
        }
        if p.password.is_some() {
            let _ = writeln!(out, "password = \"****\"");
        }
        if let Some(ref ca) = p.ca_cert {
            let _ = writeln!(out, "ca_cert = \"{}\"", ca.display());
        }
        if let Some(insecure) = p.insecure {
            let _ = writeln!(out, "insecure = {insecure}");
        }
        if let Some(timeout) = p.timeout {
            let _ = writeln!(out, "timeout = {timeout}");
        }
        let d = &p.display;
        let _ = writeln!(out, "display.step_interval_ms = {}", d.step_interval_ms);
        let _ = writeln!(out, "display.step = {}", d.step);
        let _ = writeln!(out, "display.start_from = \"{}\"", d.start_from);
        let _ = writeln!(out, "display.poll_interval_secs = {}", d.poll_interval_secs);
    }

    out
}

/// Copy of `cfg` safe to serialize for `config show`.
fn redacted(cfg: &Config) -> Config {
    let mut cfg = cfg.clone();
    for profile in cfg.profiles.values_mut() {
        if profile.password.is_some() {
            profile.password = Some("****".into());
        }
    }
    cfg
}

fn parse_value<T: std::str::FromStr>(
    field: &str,
    value: &str,
    expected: &str,
) -> Result<T, CliError> {
    value.parse().map_err(|_| CliError::Validation {
        field: field.into(),
        reason: format!("must be {expected}"),
    })
}

/// Apply one `key = value` assignment to a profile.
fn apply_setting(profile: &mut Profile, key: &str, value: &str) -> Result<(), CliError> {
    match key {
        "base_url" | "base-url" => {
            parse_base_url(value)?;
            profile.base_url = value.into();
        }
        "user_id" | "user-id" => profile.user_id = Some(parse_value(key, value, "a user ID")?),
        "car_id" | "car-id" => profile.car_id = Some(parse_value(key, value, "a car ID")?),
        "account" => profile.account = Some(value.into()),
        "insecure" => profile.insecure = Some(parse_value(key, value, "'true' or 'false'")?),
        "timeout" => profile.timeout = Some(parse_value(key, value, "a number (seconds)")?),
        "ca_cert" | "ca-cert" => profile.ca_cert = Some(value.into()),
        "display.step_interval_ms" => {
            let ms: u64 = parse_value(key, value, "a number (milliseconds)")?;
            if ms == 0 {
                return Err(CliError::Validation {
                    field: key.into(),
                    reason: "must be at least 1".into(),
                });
            }
            profile.display.step_interval_ms = ms;
        }
        "display.step" => {
            let step: u8 = parse_value(key, value, "a number between 1 and 100")?;
            if !(1..=100).contains(&step) {
                return Err(CliError::Validation {
                    field: key.into(),
                    reason: "must be a number between 1 and 100".into(),
                });
            }
            profile.display.step = step;
        }
        "display.start_from" => {
            profile.display.start_from =
                parse_value::<StartFrom>(key, value, "'zero' or 'previous'")?;
        }
        "display.poll_interval_secs" => {
            profile.display.poll_interval_secs =
                parse_value(key, value, "a number (seconds, 0 disables polling)")?;
        }
        other => {
            return Err(CliError::Validation {
                field: other.into(),
                reason: format!("unknown config key '{other}'. Valid keys: {VALID_KEYS}"),
            });
        }
    }
    Ok(())
}

/// Ask where the password goes. Returns it only for plaintext storage.
fn prompt_password_storage(profile_name: &str) -> Result<Option<String>, CliError> {
    let choices = &[
        "Store in system keyring (recommended)",
        "Save to config file (plaintext)",
        "Don't store (prompt on login)",
    ];
    let selection = Select::new()
        .with_prompt("Where to store the password?")
        .items(choices)
        .default(0)
        .interact()
        .map_err(prompt_err)?;

    if selection == 2 {
        return Ok(None);
    }

    let password = rpassword::prompt_password("Password: ").map_err(prompt_err)?;
    if password.is_empty() {
        return Err(CliError::Validation {
            field: "password".into(),
            reason: "password cannot be empty".into(),
        });
    }

    if selection == 0 {
        store_password(profile_name, &password)?;
        eprintln!("   ✓ Password stored in system keyring");
        Ok(None)
    } else {
        Ok(Some(password))
    }
}

fn prompt_optional_id(prompt: &str) -> Result<Option<u64>, CliError> {
    let raw: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_err)?;
    if raw.trim().is_empty() {
        return Ok(None);
    }
    parse_value(prompt, raw.trim(), "a number").map(Some)
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let path = config_path();
            // Keep other profiles if a config already exists
            let mut cfg = load_file_config()?;
            eprintln!("✨ parkspot configuration wizard");
            eprintln!("   Config path: {}\n", path.display());

            let profile_name: String = Input::new()
                .with_prompt("Profile name")
                .default("default".into())
                .interact_text()
                .map_err(prompt_err)?;

            let base_url: String = Input::new()
                .with_prompt("Backend URL")
                .default("http://localhost:5000".into())
                .validate_with(|input: &String| parse_base_url(input).map(|_| ()))
                .interact_text()
                .map_err(prompt_err)?;

            let account: String = Input::new()
                .with_prompt("Account (empty to skip)")
                .allow_empty(true)
                .interact_text()
                .map_err(prompt_err)?;

            let mut profile = Profile::new(base_url);
            profile.user_id = prompt_optional_id("User ID (empty to skip)")?;
            profile.car_id = prompt_optional_id("Car ID (empty to skip)")?;
            if !account.is_empty() {
                profile.account = Some(account);
                profile.password = prompt_password_storage(&profile_name)?;
            }

            cfg.profiles.insert(profile_name.clone(), profile);
            cfg.default_profile = Some(profile_name.clone());
            save_config(&cfg)?;

            eprintln!("\n✓ Configuration written to {}", path.display());
            eprintln!("  Active profile: {profile_name}");
            eprintln!("\n  Test it: parkspot occupancy");
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = redacted(&load_config()?);
            let out = output::render_single(&global.output, &cfg, format_config_redacted, |c| {
                c.active_profile_name(global.profile.as_deref())
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Set <key> <value> ───────────────────────────────────────
        ConfigCommand::Set { key, value } => {
            let mut cfg = load_file_config()?;
            let profile_name = active_profile_name(global, &cfg);

            // A new profile needs a URL before anything else
            let sets_url = matches!(key.as_str(), "base_url" | "base-url");
            if !cfg.profiles.contains_key(&profile_name) && !sets_url {
                return Err(CliError::ProfileNotFound {
                    available: cfg.profile_names(),
                    name: profile_name,
                });
            }

            let profile = cfg
                .profiles
                .entry(profile_name.clone())
                .or_insert_with(|| Profile::new(String::new()));
            apply_setting(profile, &key, &value)?;

            save_config(&cfg)?;
            if !global.quiet {
                eprintln!("✓ Set {key} on profile '{profile_name}'");
            }
            Ok(())
        }

        // ── Profiles ────────────────────────────────────────────────
        ConfigCommand::Profiles => {
            let cfg = load_config()?;
            let active = cfg.active_profile_name(None);
            if cfg.profiles.is_empty() {
                eprintln!("No profiles configured. Run: parkspot config init");
            } else {
                let mut names: Vec<_> = cfg.profiles.keys().collect();
                names.sort();
                for name in names {
                    let marker = if *name == active { " *" } else { "" };
                    println!("{name}{marker}");
                }
            }
            Ok(())
        }

        // ── Use <name> ─────────────────────────────────────────────
        ConfigCommand::Use { name } => {
            let mut cfg = load_file_config()?;

            if !cfg.profiles.contains_key(&name) {
                return Err(CliError::ProfileNotFound {
                    available: cfg.profile_names(),
                    name,
                });
            }

            cfg.default_profile = Some(name.clone());
            save_config(&cfg)?;
            eprintln!("✓ Default profile set to '{name}'");
            Ok(())
        }

        // ── Set-password ────────────────────────────────────────────
        ConfigCommand::SetPassword => {
            let cfg = load_file_config()?;
            let profile_name = active_profile_name(global, &cfg);
            if !cfg.profiles.contains_key(&profile_name) {
                return Err(CliError::ProfileNotFound {
                    available: cfg.profile_names(),
                    name: profile_name,
                });
            }

            let password = rpassword::prompt_password("Password: ").map_err(prompt_err)?;
            if password.is_empty() {
                return Err(CliError::Validation {
                    field: "password".into(),
                    reason: "password cannot be empty".into(),
                });
            }
            store_password(&profile_name, &password)?;
            eprintln!("✓ Password for profile '{profile_name}' stored in system keyring");
            Ok(())
        }
    }
}
