//! Car command handlers.

use parkspot_core::Gateway;

use crate::cli::{CarArgs, CarCommand, GlobalOpts};
use crate::config::Session;
use crate::error::CliError;
use crate::output;

use super::util;

pub(crate) fn detail(car: &parkspot_core::Car) -> String {
    output::detail_lines(&[
        ("Car", car.car_id.to_string()),
        ("Lot", car.parking_lot_name.clone()),
        ("Area", car.area_name.clone()),
        ("Floor", car.area_floor.to_string()),
        ("Spot", car.parking_spot_number.to_string()),
        ("Since", util::fmt_time(car.start_time)),
    ])
}

pub async fn handle(
    gateway: &Gateway,
    session: &Session,
    args: CarArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        CarCommand::Show => {
            let user_id = session.require_user()?;
            let car = gateway.car(user_id).await?;
            let out = output::render_single(&global.output, &car, detail, |c| {
                format!("{} {}", c.parking_lot_name, c.parking_spot_number)
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
