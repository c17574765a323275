//! Command dispatch: bridges CLI args -> gateway calls -> output formatting.

pub mod account;
pub mod car;
pub mod config_cmd;
pub mod history;
pub mod lots;
pub mod occupancy;
pub mod profile;
pub mod reservation;
pub mod util;
pub mod view;

use parkspot_core::Gateway;

use crate::cli::{Command, GlobalOpts};
use crate::config::Session;
use crate::error::CliError;

/// Dispatch a backend-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    gateway: &Gateway,
    session: &Session,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Lots(args) => lots::handle(gateway, args, global).await,
        Command::Occupancy(args) => occupancy::handle(gateway, session, args, global).await,
        Command::Car(args) => car::handle(gateway, session, args, global).await,
        Command::Profile(args) => profile::handle(gateway, session, args, global).await,
        Command::Reservation(args) => reservation::handle(gateway, session, args, global).await,
        Command::History { spot } => history::handle(gateway, spot, global).await,
        Command::Status => account::status(gateway, session, global).await,
        Command::Login(args) => account::login(gateway, session, args, global).await,
        Command::View(args) => view::handle(gateway, session, args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => Err(CliError::Validation {
            field: "command".into(),
            reason: "handled without a backend session".into(),
        }),
    }
}
