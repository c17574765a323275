//! Profile command handlers.

use parkspot_core::{Gateway, Profile, ProfileCreate, ProfileUpdate};

use crate::cli::{GlobalOpts, ProfileArgs, ProfileCommand, ProfileFields};
use crate::config::Session;
use crate::error::CliError;
use crate::output;

use super::util;

pub(crate) fn detail(p: &Profile) -> String {
    let lot = match (&p.preference_lot_name, p.preference_lot_id) {
        (Some(name), _) => name.clone(),
        (None, id) => util::fmt_opt(id),
    };
    let area = match (&p.preference_area_name, p.preference_area_id) {
        (Some(name), _) => name.clone(),
        (None, id) => util::fmt_opt(id),
    };
    output::detail_lines(&[
        ("User", p.id.to_string()),
        ("Preference", util::fmt_opt(p.preference)),
        ("Lot", lot),
        ("Area", area),
        ("Role", p.role.clone().unwrap_or_default()),
        ("Priority", p.priority.clone().unwrap_or_default()),
        ("Expires", util::fmt_time(p.expired)),
    ])
}

fn print_profile(profile: &Profile, global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_single(&global.output, profile, detail, |p| p.id.to_string())?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn handle(
    gateway: &Gateway,
    session: &Session,
    args: ProfileArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let user_id = session.require_user()?;

    match args.command {
        ProfileCommand::Show => {
            let profile = gateway.profile(user_id).await?;
            print_profile(&profile, global)
        }

        ProfileCommand::Update(ProfileFields {
            preference,
            role,
            priority,
        }) => {
            let update = ProfileUpdate {
                preference,
                role,
                priority,
            };
            let profile = gateway.update_profile(user_id, &update).await?;
            print_profile(&profile, global)
        }

        ProfileCommand::Create(ProfileFields {
            preference,
            role,
            priority,
        }) => {
            let create = ProfileCreate {
                user_id,
                preference,
                role,
                priority,
            };
            let profile = gateway.create_profile(&create).await?;
            print_profile(&profile, global)
        }
    }
}
