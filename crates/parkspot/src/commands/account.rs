//! Login and user status handlers.

use secrecy::SecretString;

use parkspot_config::{load_file_config, resolve_password, save_config};
use parkspot_core::Gateway;

use crate::cli::{GlobalOpts, LoginArgs};
use crate::config::Session;
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn status(
    gateway: &Gateway,
    session: &Session,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let user_id = session.require_user()?;
    let status = gateway.user_status(user_id).await?;
    let out = output::render_single(
        &global.output,
        &status,
        |s| output::detail_lines(&[("User", user_id.to_string()), ("Status", s.status.clone())]),
        |s| s.status.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn login(
    gateway: &Gateway,
    session: &Session,
    args: LoginArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let account = match args.account.or_else(|| session.account.clone()) {
        Some(account) => account,
        None => prompt_account()?,
    };
    let password = password_for(session)?;

    let user_id = gateway.login(&account, &password).await?;

    if args.save {
        save_user_id(&session.profile_name, user_id)?;
        if !global.quiet {
            eprintln!("Saved user_id {user_id} to profile '{}'", session.profile_name);
        }
    }

    let out = output::render_single(
        &global.output,
        &serde_json::json!({ "account": &account, "user_id": user_id }),
        |_| output::detail_lines(&[("Account", account.clone()), ("User", user_id.to_string())]),
        |_| user_id.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

fn prompt_account() -> Result<String, CliError> {
    dialoguer::Input::<String>::new()
        .with_prompt("Account")
        .interact_text()
        .map_err(util::prompt_err)
}

/// Stored credentials first; prompt only when none are configured.
fn password_for(session: &Session) -> Result<SecretString, CliError> {
    let stored = match session.profile {
        Some(ref profile) => resolve_password(profile, &session.profile_name).ok(),
        None => std::env::var(parkspot_config::PASSWORD_ENV)
            .ok()
            .map(SecretString::from),
    };
    if let Some(password) = stored {
        return Ok(password);
    }
    let entered = rpassword::prompt_password("Password: ").map_err(util::prompt_err)?;
    Ok(SecretString::from(entered))
}

fn save_user_id(profile_name: &str, user_id: u64) -> Result<(), CliError> {
    let mut cfg = load_file_config()?;
    let available = cfg.profile_names();
    let profile = cfg
        .profiles
        .get_mut(profile_name)
        .ok_or_else(|| CliError::ProfileNotFound {
            name: profile_name.into(),
            available,
        })?;
    profile.user_id = Some(user_id);
    save_config(&cfg)?;
    Ok(())
}
